//! Implementation of the CAnalyzer trait for C using tree-sitter

use ccodetools_api::preprocessor::scan_directives;
use ccodetools_api::{
    AnalysisResult, AnalyzerError, AnalyzerResult, CAnalyzer, CallGraph, ErrorPath,
    FunctionDependencies, FunctionInfo, FunctionSummary, GlobalVariable, PreprocessorDirectives,
    SideEffects, SourceFile, SymbolOccurrences,
};
use log::{debug, warn};
use std::cell::RefCell;
use std::path::Path;
use tree_sitter::{Parser, Tree};

use crate::queries;
use crate::visitor::CVisitor;

/// Backend identifier used in cache keys and logs
pub const BACKEND_NAME: &str = "tree-sitter";

/// Syntax-tree C analyzer
///
/// Parses each file with tree-sitter and walks the concrete syntax tree.
/// Files with syntax errors are still analyzed: the grammar recovers with
/// ERROR nodes and the walk reports whatever it can recognise around them.
pub struct TreeSitterAnalyzer {
    parser: RefCell<Parser>,
}

impl TreeSitterAnalyzer {
    /// Create an analyzer with the C grammar loaded
    ///
    /// # Errors
    ///
    /// [`AnalyzerError::LanguageError`] if the grammar is incompatible with
    /// the linked tree-sitter runtime.
    pub fn new() -> AnalyzerResult<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_c::language();
        parser
            .set_language(&language)
            .map_err(|e| AnalyzerError::LanguageError(e.to_string()))?;
        Ok(Self {
            parser: RefCell::new(parser),
        })
    }

    /// Parse already-loaded source text
    pub fn parse(&self, source: &SourceFile) -> AnalyzerResult<Tree> {
        let tree = self
            .parser
            .borrow_mut()
            .parse(source.as_bytes(), None)
            .ok_or_else(|| {
                AnalyzerError::ParseError(
                    source.path().to_path_buf(),
                    "tree-sitter returned no tree".to_string(),
                )
            })?;

        if tree.root_node().has_error() {
            warn!(
                "{}: syntax errors present, analysing recoverable parts",
                source.path().display()
            );
        }
        debug!(
            "parsed {} ({} bytes)",
            source.path().display(),
            source.as_bytes().len()
        );
        Ok(tree)
    }

    fn load(&self, path: &Path) -> AnalyzerResult<(SourceFile, Tree)> {
        let source = SourceFile::read(path)?;
        let tree = self.parse(&source)?;
        Ok((source, tree))
    }

    /// Full structural analysis of source text
    pub fn analyze_source(&self, source: &SourceFile) -> AnalyzerResult<AnalysisResult> {
        let tree = self.parse(source)?;
        Ok(analyze_tree(&tree, source))
    }

    /// Call graph of source text
    pub fn call_graph_of(&self, source: &SourceFile) -> AnalyzerResult<CallGraph> {
        let tree = self.parse(source)?;
        Ok(queries::call_graph(tree.root_node(), source.as_bytes()))
    }
}

fn visit_tree<'a>(tree: &Tree, source: &'a SourceFile) -> CVisitor<'a> {
    let mut visitor = CVisitor::new(source.as_bytes(), source.lines(), source.path());
    visitor.visit_node(tree.root_node());
    if visitor.error_count > 0 {
        debug!(
            "{}: {} error nodes skipped",
            source.path().display(),
            visitor.error_count
        );
    }
    visitor
}

fn analyze_tree(tree: &Tree, source: &SourceFile) -> AnalysisResult {
    let visitor = visit_tree(tree, source);

    let mut result = AnalysisResult::new(source.path().to_path_buf());
    result.functions = visitor.functions;
    result.structs = visitor.structs;
    result.enums = visitor.enums;
    result.typedefs = visitor.typedefs;
    result.set_directives(scan_directives(&source.lines()));
    result.sort_declarations();
    result
}

impl CAnalyzer for TreeSitterAnalyzer {
    fn backend_name(&self) -> &str {
        BACKEND_NAME
    }

    fn analyze_file(&self, path: &Path) -> AnalyzerResult<AnalysisResult> {
        let (source, tree) = self.load(path)?;
        Ok(analyze_tree(&tree, &source))
    }

    fn list_functions(&self, path: &Path) -> AnalyzerResult<Vec<FunctionInfo>> {
        let (source, tree) = self.load(path)?;
        Ok(visit_tree(&tree, &source).functions)
    }

    fn get_function_body(&self, path: &Path, name: &str) -> AnalyzerResult<Option<String>> {
        let (source, tree) = self.load(path)?;
        Ok(queries::function_body(
            tree.root_node(),
            source.as_bytes(),
            name,
        ))
    }

    fn get_preprocessor_directives(&self, path: &Path) -> AnalyzerResult<PreprocessorDirectives> {
        // Directives come from the line scanner; no parse is needed
        let source = SourceFile::read(path)?;
        Ok(scan_directives(&source.lines()))
    }

    fn get_call_graph(&self, path: &Path) -> AnalyzerResult<CallGraph> {
        let (source, tree) = self.load(path)?;
        Ok(queries::call_graph(tree.root_node(), source.as_bytes()))
    }

    fn get_function_dependencies(
        &self,
        path: &Path,
        name: &str,
    ) -> AnalyzerResult<FunctionDependencies> {
        let (source, tree) = self.load(path)?;
        Ok(queries::dependencies(
            tree.root_node(),
            source.as_bytes(),
            name,
        ))
    }

    fn summarize_function(&self, path: &Path, name: &str) -> AnalyzerResult<FunctionSummary> {
        let (source, tree) = self.load(path)?;
        Ok(queries::summary(tree.root_node(), source.as_bytes(), name))
    }

    fn list_globals(&self, path: &Path) -> AnalyzerResult<Vec<GlobalVariable>> {
        let (source, tree) = self.load(path)?;
        Ok(queries::globals(tree.root_node(), source.as_bytes()))
    }

    fn find_symbol(&self, path: &Path, symbol: &str) -> AnalyzerResult<SymbolOccurrences> {
        let (source, tree) = self.load(path)?;
        Ok(queries::symbol_occurrences(
            tree.root_node(),
            source.as_bytes(),
            symbol,
        ))
    }

    fn get_error_handling_paths(&self, path: &Path, name: &str) -> AnalyzerResult<Vec<ErrorPath>> {
        let (source, tree) = self.load(path)?;
        Ok(queries::error_paths(
            tree.root_node(),
            source.as_bytes(),
            name,
        ))
    }

    fn list_side_effects(&self, path: &Path, name: &str) -> AnalyzerResult<SideEffects> {
        let (source, tree) = self.load(path)?;
        Ok(queries::side_effects(
            tree.root_node(),
            source.as_bytes(),
            name,
        ))
    }
}
