use crate::{
    analysis::AnalysisResult,
    entities::{FunctionInfo, GlobalVariable, PreprocessorDirectives, SymbolOccurrences},
    errors::AnalyzerResult,
    heuristics::{ErrorPath, FunctionSummary, SideEffects},
    relationships::{CallGraph, FunctionDependencies},
};
use std::path::Path;

/// Core trait that all C analysis backends implement
///
/// Callers depend only on this contract, never on backend internals. Every
/// operation reads the file at `path` afresh, so unchanged content always
/// yields value-equal results.
///
/// # Not found
///
/// An unknown function or symbol name is not an error. Each operation
/// returns its documented empty shape instead: `None` for
/// [`get_function_body`](CAnalyzer::get_function_body), empty lists, or a
/// summary with every flag cleared.
///
/// # Errors
///
/// Operations fail with [`AnalyzerError`](crate::AnalyzerError) when the
/// file cannot be read or decoded, or when the backend cannot parse it.
pub trait CAnalyzer {
    /// Stable identifier of the backend, part of every cache key
    fn backend_name(&self) -> &str;

    /// Complete structural analysis of a file
    fn analyze_file(&self, path: &Path) -> AnalyzerResult<AnalysisResult>;

    /// Function definitions only
    fn list_functions(&self, path: &Path) -> AnalyzerResult<Vec<FunctionInfo>>;

    /// Body text (braces included) of the first definition named `name`
    fn get_function_body(&self, path: &Path, name: &str) -> AnalyzerResult<Option<String>>;

    /// Includes, defines and conditionals
    fn get_preprocessor_directives(&self, path: &Path) -> AnalyzerResult<PreprocessorDirectives>;

    /// Direct callees of every function definition
    fn get_call_graph(&self, path: &Path) -> AnalyzerResult<CallGraph>;

    /// Calls, named types and macro-like identifiers used by one function
    fn get_function_dependencies(
        &self,
        path: &Path,
        name: &str,
    ) -> AnalyzerResult<FunctionDependencies>;

    /// Heuristic behaviour flags of one function
    fn summarize_function(&self, path: &Path, name: &str) -> AnalyzerResult<FunctionSummary>;

    /// Variables declared at file scope
    fn list_globals(&self, path: &Path) -> AnalyzerResult<Vec<GlobalVariable>>;

    /// Lines of every identifier token spelling `symbol`
    fn find_symbol(&self, path: &Path, symbol: &str) -> AnalyzerResult<SymbolOccurrences>;

    /// `return` and `goto` statements of one function, in source order
    fn get_error_handling_paths(&self, path: &Path, name: &str) -> AnalyzerResult<Vec<ErrorPath>>;

    /// Recognised I/O calls and allocation of one function
    fn list_side_effects(&self, path: &Path, name: &str) -> AnalyzerResult<SideEffects>;
}

impl<A: CAnalyzer + ?Sized> CAnalyzer for Box<A> {
    fn backend_name(&self) -> &str {
        (**self).backend_name()
    }

    fn analyze_file(&self, path: &Path) -> AnalyzerResult<AnalysisResult> {
        (**self).analyze_file(path)
    }

    fn list_functions(&self, path: &Path) -> AnalyzerResult<Vec<FunctionInfo>> {
        (**self).list_functions(path)
    }

    fn get_function_body(&self, path: &Path, name: &str) -> AnalyzerResult<Option<String>> {
        (**self).get_function_body(path, name)
    }

    fn get_preprocessor_directives(&self, path: &Path) -> AnalyzerResult<PreprocessorDirectives> {
        (**self).get_preprocessor_directives(path)
    }

    fn get_call_graph(&self, path: &Path) -> AnalyzerResult<CallGraph> {
        (**self).get_call_graph(path)
    }

    fn get_function_dependencies(
        &self,
        path: &Path,
        name: &str,
    ) -> AnalyzerResult<FunctionDependencies> {
        (**self).get_function_dependencies(path, name)
    }

    fn summarize_function(&self, path: &Path, name: &str) -> AnalyzerResult<FunctionSummary> {
        (**self).summarize_function(path, name)
    }

    fn list_globals(&self, path: &Path) -> AnalyzerResult<Vec<GlobalVariable>> {
        (**self).list_globals(path)
    }

    fn find_symbol(&self, path: &Path, symbol: &str) -> AnalyzerResult<SymbolOccurrences> {
        (**self).find_symbol(path, symbol)
    }

    fn get_error_handling_paths(&self, path: &Path, name: &str) -> AnalyzerResult<Vec<ErrorPath>> {
        (**self).get_error_handling_paths(path, name)
    }

    fn list_side_effects(&self, path: &Path, name: &str) -> AnalyzerResult<SideEffects> {
        (**self).list_side_effects(path, name)
    }
}
