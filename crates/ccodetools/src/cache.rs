//! Content-hash LRU caching decorator
//!
//! [`CachedAnalyzer`] wraps any [`CAnalyzer`] and memoizes the whole-file
//! operations. An entry is keyed by backend name, path and the SHA-256 of the
//! file's current bytes, so editing a file can never return a stale result:
//! the new content simply hashes to a different key.
//!
//! Each entry holds up to one value per cached operation, computed lazily on
//! the first request for it. Function-scoped and symbol queries are not
//! cached and go straight to the wrapped backend.

use ccodetools_api::source::read_bytes;
use ccodetools_api::{
    AnalysisResult, AnalyzerError, AnalyzerResult, CAnalyzer, CallGraph, ErrorPath,
    FunctionDependencies, FunctionInfo, FunctionSummary, GlobalVariable, PreprocessorDirectives,
    SideEffects, SymbolOccurrences,
};
use log::{debug, trace};
use lru::LruCache;
use sha2::{Digest, Sha256};
use std::cell::{Cell, RefCell};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Identity of one cached file version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    backend: String,
    path: PathBuf,
    digest: String,
}

impl CacheKey {
    fn new(backend: &str, path: &Path, content: &[u8]) -> Self {
        Self {
            backend: backend.to_string(),
            path: path.to_path_buf(),
            digest: content_digest(content),
        }
    }
}

/// Hex SHA-256 of file content
fn content_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Lazily computed results for one file version, one slot per operation
#[derive(Debug, Default)]
struct DerivedResults {
    analysis: Option<AnalysisResult>,
    functions: Option<Vec<FunctionInfo>>,
    call_graph: Option<CallGraph>,
    globals: Option<Vec<GlobalVariable>>,
}

#[derive(Debug)]
struct CacheEntry {
    content: Vec<u8>,
    derived: DerivedResults,
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests answered from a filled slot
    pub hits: usize,
    /// Requests that ran the wrapped backend
    pub misses: usize,
    /// Entries dropped to stay within capacity
    pub evictions: usize,
    /// Live entries
    pub entries: usize,
    /// Source bytes held by live entries
    pub cached_bytes: usize,
}

impl CacheStats {
    /// Fraction of requests served from the cache (0.0-1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Caching decorator over a backend
///
/// Not `Sync`: the cache uses interior mutability so that every operation
/// can take `&self` like the backends do.
pub struct CachedAnalyzer<A> {
    inner: A,
    entries: RefCell<LruCache<CacheKey, CacheEntry>>,
    hits: Cell<usize>,
    misses: Cell<usize>,
    evictions: Cell<usize>,
}

impl<A: CAnalyzer> CachedAnalyzer<A> {
    /// Wrap `inner`, keeping at most `max_files` file versions
    pub fn new(inner: A, max_files: NonZeroUsize) -> Self {
        Self {
            inner,
            entries: RefCell::new(LruCache::new(max_files)),
            hits: Cell::new(0),
            misses: Cell::new(0),
            evictions: Cell::new(0),
        }
    }

    /// Like [`new`](Self::new), rejecting a zero capacity
    pub fn with_capacity(inner: A, max_files: usize) -> AnalyzerResult<Self> {
        let max_files = NonZeroUsize::new(max_files).ok_or_else(|| {
            AnalyzerError::InvalidConfig("cache size must be at least 1".to_string())
        })?;
        Ok(Self::new(inner, max_files))
    }

    /// The wrapped backend
    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn capacity(&self) -> usize {
        self.entries.borrow().cap().get()
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.borrow();
        CacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
            evictions: self.evictions.get(),
            entries: entries.len(),
            cached_bytes: entries.iter().map(|(_, entry)| entry.content.len()).sum(),
        }
    }

    /// Drop every entry; counters are kept
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        debug!("cache cleared");
    }

    /// Serve `slot` of the entry for the file's current content, computing it
    /// with `compute` on first request.
    ///
    /// The wrapped backend reads the file itself, so the file is hashed again
    /// afterwards; a result computed from content that no longer matches the
    /// key is returned but not stored.
    fn cached<T, C>(
        &self,
        path: &Path,
        slot: fn(&mut DerivedResults) -> &mut Option<T>,
        compute: C,
    ) -> AnalyzerResult<T>
    where
        T: Clone,
        C: FnOnce(&A, &Path) -> AnalyzerResult<T>,
    {
        let content = read_bytes(path)?;
        let key = CacheKey::new(self.inner.backend_name(), path, &content);

        {
            let mut entries = self.entries.borrow_mut();
            match entries.get_mut(&key) {
                Some(entry) => {
                    if let Some(value) = slot(&mut entry.derived).as_ref() {
                        self.hits.set(self.hits.get() + 1);
                        trace!("cache hit for {}", path.display());
                        return Ok(value.clone());
                    }
                }
                None => {
                    let entry = CacheEntry {
                        content,
                        derived: DerivedResults::default(),
                    };
                    if let Some((evicted, _)) = entries.push(key.clone(), entry) {
                        self.evictions.set(self.evictions.get() + 1);
                        trace!("evicted {} from cache", evicted.path.display());
                    }
                }
            }
        }

        self.misses.set(self.misses.get() + 1);
        debug!(
            "cache miss for {} ({})",
            path.display(),
            self.inner.backend_name()
        );

        let value = compute(&self.inner, path)?;
        let unchanged =
            read_bytes(path).map_or(false, |after| content_digest(&after) == key.digest);
        if !unchanged {
            debug!("{} changed during analysis, result not cached", path.display());
            return Ok(value);
        }
        if let Some(entry) = self.entries.borrow_mut().get_mut(&key) {
            *slot(&mut entry.derived) = Some(value.clone());
        }
        Ok(value)
    }
}

impl<A: CAnalyzer> CAnalyzer for CachedAnalyzer<A> {
    fn backend_name(&self) -> &str {
        self.inner.backend_name()
    }

    fn analyze_file(&self, path: &Path) -> AnalyzerResult<AnalysisResult> {
        self.cached(path, |d| &mut d.analysis, A::analyze_file)
    }

    fn list_functions(&self, path: &Path) -> AnalyzerResult<Vec<FunctionInfo>> {
        self.cached(path, |d| &mut d.functions, A::list_functions)
    }

    fn get_call_graph(&self, path: &Path) -> AnalyzerResult<CallGraph> {
        self.cached(path, |d| &mut d.call_graph, A::get_call_graph)
    }

    fn list_globals(&self, path: &Path) -> AnalyzerResult<Vec<GlobalVariable>> {
        self.cached(path, |d| &mut d.globals, A::list_globals)
    }

    fn get_function_body(&self, path: &Path, name: &str) -> AnalyzerResult<Option<String>> {
        self.inner.get_function_body(path, name)
    }

    fn get_preprocessor_directives(&self, path: &Path) -> AnalyzerResult<PreprocessorDirectives> {
        self.inner.get_preprocessor_directives(path)
    }

    fn get_function_dependencies(
        &self,
        path: &Path,
        name: &str,
    ) -> AnalyzerResult<FunctionDependencies> {
        self.inner.get_function_dependencies(path, name)
    }

    fn summarize_function(&self, path: &Path, name: &str) -> AnalyzerResult<FunctionSummary> {
        self.inner.summarize_function(path, name)
    }

    fn find_symbol(&self, path: &Path, symbol: &str) -> AnalyzerResult<SymbolOccurrences> {
        self.inner.find_symbol(path, symbol)
    }

    fn get_error_handling_paths(&self, path: &Path, name: &str) -> AnalyzerResult<Vec<ErrorPath>> {
        self.inner.get_error_handling_paths(path, name)
    }

    fn list_side_effects(&self, path: &Path, name: &str) -> AnalyzerResult<SideEffects> {
        self.inner.list_side_effects(path, name)
    }
}
