//! Implementation of the CAnalyzer trait for C using libclang

use ccodetools_api::preprocessor::scan_directives;
use ccodetools_api::{
    AnalysisResult, AnalyzerError, AnalyzerResult, CAnalyzer, CallGraph, ErrorPath,
    FunctionDependencies, FunctionInfo, FunctionSummary, GlobalVariable, PreprocessorDirectives,
    SideEffects, SourceFile, SymbolOccurrences,
};
use clang::{Index, TranslationUnit};
use log::debug;
use std::path::Path;

use crate::runtime::ClangRuntime;
use crate::walker;

/// Backend identifier used in cache keys and logs
pub const BACKEND_NAME: &str = "clang";

/// Semantic C analyzer
///
/// Builds a translation unit per call, so callees, types and includes are
/// resolved by the compiler frontend. Code in inactive `#if` branches is not
/// seen by this backend.
pub struct ClangAnalyzer<'c> {
    index: Index<'c>,
    arguments: Vec<String>,
}

impl<'c> ClangAnalyzer<'c> {
    /// Create an analyzer passing `arguments` to every parse
    pub fn new(runtime: &'c ClangRuntime, arguments: Vec<String>) -> Self {
        Self {
            index: Index::new(runtime.clang(), false, false),
            arguments,
        }
    }

    fn parse(&self, path: &Path) -> AnalyzerResult<TranslationUnit<'_>> {
        let tu = self
            .index
            .parser(path)
            .arguments(&self.arguments)
            .detailed_preprocessing_record(true)
            .parse()
            .map_err(|e| AnalyzerError::ParseError(path.to_path_buf(), e.to_string()))?;
        debug!(
            "built translation unit for {} with {:?}",
            path.display(),
            self.arguments
        );
        Ok(tu)
    }

    /// Read the file, then parse it with the frontend
    fn load(&self, path: &Path) -> AnalyzerResult<(SourceFile, TranslationUnit<'_>)> {
        let source = SourceFile::read(path)?;
        let tu = self.parse(path)?;
        Ok((source, tu))
    }

    fn directives(tu: &TranslationUnit, source: &SourceFile) -> PreprocessorDirectives {
        let scanned = scan_directives(&source.lines());
        PreprocessorDirectives {
            includes: walker::includes(tu),
            defines: scanned.defines,
            conditionals: scanned.conditionals,
        }
    }
}

impl CAnalyzer for ClangAnalyzer<'_> {
    fn backend_name(&self) -> &str {
        BACKEND_NAME
    }

    fn analyze_file(&self, path: &Path) -> AnalyzerResult<AnalysisResult> {
        let (source, tu) = self.load(path)?;

        let mut result = AnalysisResult::new(path.to_path_buf());
        result.functions = walker::functions(&tu, &source);
        result.set_directives(Self::directives(&tu, &source));
        walker::collect_declarations(tu.get_entity(), &mut result);
        result.sort_declarations();
        Ok(result)
    }

    fn list_functions(&self, path: &Path) -> AnalyzerResult<Vec<FunctionInfo>> {
        let (source, tu) = self.load(path)?;
        Ok(walker::functions(&tu, &source))
    }

    fn get_function_body(&self, path: &Path, name: &str) -> AnalyzerResult<Option<String>> {
        let (source, tu) = self.load(path)?;
        Ok(walker::function_body(&tu, &source, name))
    }

    fn get_preprocessor_directives(&self, path: &Path) -> AnalyzerResult<PreprocessorDirectives> {
        let (source, tu) = self.load(path)?;
        Ok(Self::directives(&tu, &source))
    }

    fn get_call_graph(&self, path: &Path) -> AnalyzerResult<CallGraph> {
        let (_, tu) = self.load(path)?;
        Ok(walker::call_graph(&tu))
    }

    fn get_function_dependencies(
        &self,
        path: &Path,
        name: &str,
    ) -> AnalyzerResult<FunctionDependencies> {
        let (_, tu) = self.load(path)?;
        Ok(walker::dependencies(&tu, name))
    }

    fn summarize_function(&self, path: &Path, name: &str) -> AnalyzerResult<FunctionSummary> {
        let (_, tu) = self.load(path)?;
        Ok(walker::summary(&tu, name))
    }

    fn list_globals(&self, path: &Path) -> AnalyzerResult<Vec<GlobalVariable>> {
        let (_, tu) = self.load(path)?;
        Ok(walker::globals(&tu))
    }

    fn find_symbol(&self, path: &Path, symbol: &str) -> AnalyzerResult<SymbolOccurrences> {
        let (_, tu) = self.load(path)?;
        Ok(walker::symbol_occurrences(&tu, symbol))
    }

    fn get_error_handling_paths(&self, path: &Path, name: &str) -> AnalyzerResult<Vec<ErrorPath>> {
        let (_, tu) = self.load(path)?;
        Ok(walker::error_paths(&tu, name))
    }

    fn list_side_effects(&self, path: &Path, name: &str) -> AnalyzerResult<SideEffects> {
        let (_, tu) = self.load(path)?;
        Ok(walker::side_effects(&tu, name))
    }
}
