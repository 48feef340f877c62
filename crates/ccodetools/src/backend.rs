//! Backend selection
//!
//! The set of backends is closed: [`Analyzer`] has one variant per backend
//! and is chosen once, when it is constructed from an [`AnalyzerConfig`].

use ccodetools_api::{
    AnalysisResult, AnalyzerConfig, AnalyzerError, AnalyzerResult, BackendKind, CAnalyzer,
    CallGraph, ErrorPath, FunctionDependencies, FunctionInfo, FunctionSummary, GlobalVariable,
    PreprocessorDirectives, SideEffects, SymbolOccurrences,
};
use ccodetools_c::TreeSitterAnalyzer;
use ccodetools_clang::{ClangAnalyzer, ClangRuntime};
use log::debug;
use std::path::Path;

use crate::cache::CachedAnalyzer;

/// One of the available backends
pub enum Analyzer<'c> {
    TreeSitter(TreeSitterAnalyzer),
    Clang(ClangAnalyzer<'c>),
}

impl Analyzer<'_> {
    pub fn kind(&self) -> BackendKind {
        match self {
            Analyzer::TreeSitter(_) => BackendKind::TreeSitter,
            Analyzer::Clang(_) => BackendKind::Clang,
        }
    }
}

/// Load libclang if `config` selects the semantic backend
///
/// Must be called at most once per process; the returned runtime has to
/// outlive every analyzer built from it.
pub fn initialize_runtime(config: &AnalyzerConfig) -> AnalyzerResult<Option<ClangRuntime>> {
    match config.backend {
        BackendKind::Clang => ClangRuntime::initialize(config.libclang_path.as_deref()).map(Some),
        BackendKind::TreeSitter => Ok(None),
    }
}

/// Construct the backend selected by `config`
///
/// # Errors
///
/// [`AnalyzerError::BackendUnavailable`] when the semantic backend is
/// selected but no runtime was initialized.
pub fn make_analyzer<'c>(
    config: &AnalyzerConfig,
    runtime: Option<&'c ClangRuntime>,
) -> AnalyzerResult<Analyzer<'c>> {
    debug!("constructing {} backend", config.backend);
    match config.backend {
        BackendKind::TreeSitter => Ok(Analyzer::TreeSitter(TreeSitterAnalyzer::new()?)),
        BackendKind::Clang => {
            let runtime = runtime.ok_or_else(|| {
                AnalyzerError::unavailable(
                    ccodetools_clang::BACKEND_NAME,
                    "libclang runtime was not initialized",
                )
            })?;
            Ok(Analyzer::Clang(ClangAnalyzer::new(
                runtime,
                config.clang_arguments.clone(),
            )))
        }
    }
}

/// Construct a backend by name with default settings
///
/// # Errors
///
/// [`AnalyzerError::UnsupportedBackend`] for an unknown name.
pub fn analyzer_by_name<'c>(
    name: &str,
    runtime: Option<&'c ClangRuntime>,
) -> AnalyzerResult<Analyzer<'c>> {
    let config = AnalyzerConfig::default().with_backend(name.parse()?);
    make_analyzer(&config, runtime)
}

/// Construct the configured backend, wrapped in the cache when enabled
pub fn build_analyzer<'c>(
    config: &AnalyzerConfig,
    runtime: Option<&'c ClangRuntime>,
) -> AnalyzerResult<Box<dyn CAnalyzer + 'c>> {
    config.validate()?;
    let analyzer = make_analyzer(config, runtime)?;
    if config.cache_enabled {
        Ok(Box::new(CachedAnalyzer::with_capacity(
            analyzer,
            config.max_cached_files,
        )?))
    } else {
        Ok(Box::new(analyzer))
    }
}

macro_rules! delegate {
    ($self:ident, $method:ident($($arg:expr),*)) => {
        match $self {
            Analyzer::TreeSitter(analyzer) => analyzer.$method($($arg),*),
            Analyzer::Clang(analyzer) => analyzer.$method($($arg),*),
        }
    };
}

impl CAnalyzer for Analyzer<'_> {
    fn backend_name(&self) -> &str {
        delegate!(self, backend_name())
    }

    fn analyze_file(&self, path: &Path) -> AnalyzerResult<AnalysisResult> {
        delegate!(self, analyze_file(path))
    }

    fn list_functions(&self, path: &Path) -> AnalyzerResult<Vec<FunctionInfo>> {
        delegate!(self, list_functions(path))
    }

    fn get_function_body(&self, path: &Path, name: &str) -> AnalyzerResult<Option<String>> {
        delegate!(self, get_function_body(path, name))
    }

    fn get_preprocessor_directives(&self, path: &Path) -> AnalyzerResult<PreprocessorDirectives> {
        delegate!(self, get_preprocessor_directives(path))
    }

    fn get_call_graph(&self, path: &Path) -> AnalyzerResult<CallGraph> {
        delegate!(self, get_call_graph(path))
    }

    fn get_function_dependencies(
        &self,
        path: &Path,
        name: &str,
    ) -> AnalyzerResult<FunctionDependencies> {
        delegate!(self, get_function_dependencies(path, name))
    }

    fn summarize_function(&self, path: &Path, name: &str) -> AnalyzerResult<FunctionSummary> {
        delegate!(self, summarize_function(path, name))
    }

    fn list_globals(&self, path: &Path) -> AnalyzerResult<Vec<GlobalVariable>> {
        delegate!(self, list_globals(path))
    }

    fn find_symbol(&self, path: &Path, symbol: &str) -> AnalyzerResult<SymbolOccurrences> {
        delegate!(self, find_symbol(path, symbol))
    }

    fn get_error_handling_paths(&self, path: &Path, name: &str) -> AnalyzerResult<Vec<ErrorPath>> {
        delegate!(self, get_error_handling_paths(path, name))
    }

    fn list_side_effects(&self, path: &Path, name: &str) -> AnalyzerResult<SideEffects> {
        delegate!(self, list_side_effects(path, name))
    }
}
