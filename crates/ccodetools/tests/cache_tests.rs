//! Integration tests for the caching decorator

use ccodetools::{
    AnalysisResult, AnalyzerError, AnalyzerResult, CAnalyzer, CacheStats, CachedAnalyzer,
    CallGraph, ErrorPath, FunctionDependencies, FunctionInfo, FunctionSummary, GlobalVariable,
    PreprocessorDirectives, SideEffects, SymbolOccurrences, TreeSitterAnalyzer,
};
use std::cell::RefCell;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Real backend that records which operations reached it
struct RecordingAnalyzer {
    inner: TreeSitterAnalyzer,
    calls: RefCell<Vec<&'static str>>,
    /// Content written to a file just before the next operation reads it
    pending_write: RefCell<Option<(PathBuf, String)>>,
}

impl RecordingAnalyzer {
    fn new() -> Self {
        Self {
            inner: TreeSitterAnalyzer::new().unwrap(),
            calls: RefCell::new(Vec::new()),
            pending_write: RefCell::new(None),
        }
    }

    fn rewrite_before_next_read(&self, path: &Path, source: &str) {
        *self.pending_write.borrow_mut() = Some((path.to_path_buf(), source.to_string()));
    }

    fn record(&self, operation: &'static str) {
        self.calls.borrow_mut().push(operation);
        if let Some((path, source)) = self.pending_write.borrow_mut().take() {
            fs::write(path, source).unwrap();
        }
    }

    fn count(&self, operation: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|&&op| op == operation)
            .count()
    }
}

impl CAnalyzer for RecordingAnalyzer {
    fn backend_name(&self) -> &str {
        "recording"
    }

    fn analyze_file(&self, path: &Path) -> AnalyzerResult<AnalysisResult> {
        self.record("analyze_file");
        self.inner.analyze_file(path)
    }

    fn list_functions(&self, path: &Path) -> AnalyzerResult<Vec<FunctionInfo>> {
        self.record("list_functions");
        self.inner.list_functions(path)
    }

    fn get_function_body(&self, path: &Path, name: &str) -> AnalyzerResult<Option<String>> {
        self.record("get_function_body");
        self.inner.get_function_body(path, name)
    }

    fn get_preprocessor_directives(&self, path: &Path) -> AnalyzerResult<PreprocessorDirectives> {
        self.record("get_preprocessor_directives");
        self.inner.get_preprocessor_directives(path)
    }

    fn get_call_graph(&self, path: &Path) -> AnalyzerResult<CallGraph> {
        self.record("get_call_graph");
        self.inner.get_call_graph(path)
    }

    fn get_function_dependencies(
        &self,
        path: &Path,
        name: &str,
    ) -> AnalyzerResult<FunctionDependencies> {
        self.record("get_function_dependencies");
        self.inner.get_function_dependencies(path, name)
    }

    fn summarize_function(&self, path: &Path, name: &str) -> AnalyzerResult<FunctionSummary> {
        self.record("summarize_function");
        self.inner.summarize_function(path, name)
    }

    fn list_globals(&self, path: &Path) -> AnalyzerResult<Vec<GlobalVariable>> {
        self.record("list_globals");
        self.inner.list_globals(path)
    }

    fn find_symbol(&self, path: &Path, symbol: &str) -> AnalyzerResult<SymbolOccurrences> {
        self.record("find_symbol");
        self.inner.find_symbol(path, symbol)
    }

    fn get_error_handling_paths(&self, path: &Path, name: &str) -> AnalyzerResult<Vec<ErrorPath>> {
        self.record("get_error_handling_paths");
        self.inner.get_error_handling_paths(path, name)
    }

    fn list_side_effects(&self, path: &Path, name: &str) -> AnalyzerResult<SideEffects> {
        self.record("list_side_effects");
        self.inner.list_side_effects(path, name)
    }
}

fn cached(max_files: usize) -> CachedAnalyzer<RecordingAnalyzer> {
    CachedAnalyzer::new(
        RecordingAnalyzer::new(),
        NonZeroUsize::new(max_files).unwrap(),
    )
}

fn write(dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn test_repeated_request_is_served_from_cache() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "a.c", "int add(int a, int b) { return a + b; }\n");
    let analyzer = cached(4);

    let first = analyzer.analyze_file(&path).unwrap();
    let second = analyzer.analyze_file(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(analyzer.inner().count("analyze_file"), 1);
    let stats = analyzer.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.cached_bytes, fs::metadata(&path).unwrap().len() as usize);
}

#[test]
fn test_modified_file_is_never_stale() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "edit.c", "int one(void) { return 1; }\n");
    let analyzer = cached(4);

    let before = analyzer.list_functions(&path).unwrap();
    assert_eq!(before[0].name, "one");

    fs::write(&path, "int two(void) { return 2; }\n").unwrap();
    let after = analyzer.list_functions(&path).unwrap();

    assert_eq!(after[0].name, "two");
    assert_eq!(analyzer.inner().count("list_functions"), 2);

    // Restoring the old content hits the old entry again
    fs::write(&path, "int one(void) { return 1; }\n").unwrap();
    assert_eq!(analyzer.list_functions(&path).unwrap(), before);
    assert_eq!(analyzer.inner().count("list_functions"), 2);
}

#[test]
fn test_file_rewritten_during_analysis_is_not_stored() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "race.c", "int old(void) { return 1; }\n");
    let analyzer = cached(4);

    analyzer
        .inner()
        .rewrite_before_next_read(&path, "int new(void) { return 2; }\n");
    let functions = analyzer.list_functions(&path).unwrap();
    assert_eq!(functions[0].name, "new");

    // The result for the new content was not filed under the old digest
    fs::write(&path, "int old(void) { return 1; }\n").unwrap();
    let functions = analyzer.list_functions(&path).unwrap();
    assert_eq!(functions[0].name, "old");
    assert_eq!(analyzer.inner().count("list_functions"), 2);

    analyzer.list_functions(&path).unwrap();
    assert_eq!(analyzer.inner().count("list_functions"), 2);
    assert_eq!(analyzer.stats().hits, 1);
}

#[test]
fn test_least_recently_used_entry_is_evicted() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.c", "int a(void) { return 0; }\n");
    let b = write(&dir, "b.c", "int b(void) { return 0; }\n");
    let c = write(&dir, "c.c", "int c(void) { return 0; }\n");
    let analyzer = cached(2);

    analyzer.get_call_graph(&a).unwrap();
    analyzer.get_call_graph(&b).unwrap();
    // Touch `a` so `b` becomes least recently used
    analyzer.get_call_graph(&a).unwrap();
    analyzer.get_call_graph(&c).unwrap();
    assert_eq!(analyzer.inner().count("get_call_graph"), 3);
    assert_eq!(analyzer.stats().evictions, 1);

    analyzer.get_call_graph(&a).unwrap();
    assert_eq!(analyzer.inner().count("get_call_graph"), 3);

    analyzer.get_call_graph(&b).unwrap();
    assert_eq!(analyzer.inner().count("get_call_graph"), 4);
    assert_eq!(analyzer.stats().entries, 2);
}

#[test]
fn test_capacity_plus_one_files_recomputes_oldest() {
    let dir = TempDir::new().unwrap();
    let analyzer = cached(3);
    let paths: Vec<PathBuf> = (0..4)
        .map(|i| write(&dir, &format!("f{i}.c"), &format!("int g{i};\n")))
        .collect();

    for path in &paths {
        analyzer.list_globals(path).unwrap();
    }
    assert_eq!(analyzer.inner().count("list_globals"), 4);

    let globals = analyzer.list_globals(&paths[0]).unwrap();
    assert_eq!(globals[0].name, "g0");
    assert_eq!(analyzer.inner().count("list_globals"), 5);
}

#[test]
fn test_sub_results_are_filled_lazily() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "lazy.c",
        "int g;\nint f(void) { return g; }\nint main(void) { return f(); }\n",
    );
    let analyzer = cached(4);

    analyzer.analyze_file(&path).unwrap();
    assert_eq!(analyzer.inner().count("get_call_graph"), 0);

    let graph = analyzer.get_call_graph(&path).unwrap();
    assert_eq!(graph["main"], vec!["f"]);
    analyzer.get_call_graph(&path).unwrap();
    analyzer.list_functions(&path).unwrap();
    analyzer.list_globals(&path).unwrap();
    analyzer.analyze_file(&path).unwrap();

    let inner = analyzer.inner();
    assert_eq!(inner.count("analyze_file"), 1);
    assert_eq!(inner.count("get_call_graph"), 1);
    assert_eq!(inner.count("list_functions"), 1);
    assert_eq!(inner.count("list_globals"), 1);
    assert_eq!(analyzer.stats().entries, 1);
}

#[test]
fn test_function_queries_pass_through() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "pass.c", "int f(void) { return 0; }\n");
    let analyzer = cached(4);

    for _ in 0..2 {
        analyzer.find_symbol(&path, "f").unwrap();
        analyzer.get_function_body(&path, "f").unwrap();
        analyzer.summarize_function(&path, "f").unwrap();
        analyzer.get_preprocessor_directives(&path).unwrap();
    }

    let inner = analyzer.inner();
    assert_eq!(inner.count("find_symbol"), 2);
    assert_eq!(inner.count("get_function_body"), 2);
    assert_eq!(inner.count("summarize_function"), 2);
    assert_eq!(inner.count("get_preprocessor_directives"), 2);
    assert_eq!(analyzer.stats(), CacheStats::default());
}

#[test]
fn test_errors_propagate_and_are_not_cached() {
    let dir = TempDir::new().unwrap();
    let analyzer = cached(4);

    let missing = analyzer.analyze_file(&dir.path().join("missing.c"));
    assert!(matches!(missing, Err(AnalyzerError::IoError(..))));
    assert_eq!(analyzer.inner().count("analyze_file"), 0);

    let invalid = dir.path().join("latin1.c");
    fs::write(&invalid, [0x69, 0x6e, 0x74, 0x20, 0xe9, 0x3b]).unwrap();
    for _ in 0..2 {
        let result = analyzer.analyze_file(&invalid);
        assert!(matches!(result, Err(AnalyzerError::DecodeError(..))));
    }
    assert_eq!(analyzer.inner().count("analyze_file"), 2);
    assert_eq!(analyzer.stats().hits, 0);
}

#[test]
fn test_clear_drops_entries() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "clear.c", "int f(void) { return 0; }\n");
    let analyzer = cached(4);

    analyzer.analyze_file(&path).unwrap();
    analyzer.clear();
    assert_eq!(analyzer.stats().entries, 0);
    assert_eq!(analyzer.stats().cached_bytes, 0);

    analyzer.analyze_file(&path).unwrap();
    assert_eq!(analyzer.inner().count("analyze_file"), 2);
}

#[test]
fn test_zero_capacity_is_rejected() {
    let result = CachedAnalyzer::with_capacity(RecordingAnalyzer::new(), 0);
    assert!(matches!(result, Err(AnalyzerError::InvalidConfig(_))));
}

#[test]
fn test_cached_backend_name_is_inner_name() {
    let analyzer = cached(1);
    assert_eq!(analyzer.backend_name(), "recording");
    assert_eq!(analyzer.capacity(), 1);
}
