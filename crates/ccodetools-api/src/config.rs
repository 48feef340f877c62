use crate::errors::{AnalyzerError, AnalyzerResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default number of files kept by the cache
pub const DEFAULT_MAX_CACHED_FILES: usize = 32;

/// Default language standard passed to the semantic frontend
pub const DEFAULT_C_STANDARD: &str = "-std=c11";

pub const ENV_BACKEND: &str = "CCODETOOLS_BACKEND";
pub const ENV_CACHE: &str = "CCODETOOLS_CACHE";
pub const ENV_CACHE_SIZE: &str = "CCODETOOLS_CACHE_SIZE";
pub const ENV_CLANG_ARGS: &str = "CCODETOOLS_CLANG_ARGS";
pub const ENV_LIBCLANG_PATH: &str = "CCODETOOLS_LIBCLANG_PATH";

/// Which extraction strategy to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Concrete syntax tree walker (tree-sitter)
    #[default]
    TreeSitter,
    /// Compiler frontend walker (libclang)
    Clang,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::TreeSitter => "tree-sitter",
            BackendKind::Clang => "clang",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree-sitter" | "tree_sitter" | "treesitter" => Ok(BackendKind::TreeSitter),
            "clang" | "libclang" => Ok(BackendKind::Clang),
            _ => Err(AnalyzerError::UnsupportedBackend(s.to_string())),
        }
    }
}

/// Configuration for analyzer construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Backend to construct
    pub backend: BackendKind,

    /// Wrap the backend in the content-hash cache
    pub cache_enabled: bool,

    /// Maximum number of distinct (backend, path, content) entries cached
    pub max_cached_files: usize,

    /// Arguments passed to the semantic frontend when parsing
    pub clang_arguments: Vec<String>,

    /// Directory containing libclang; `None` uses the system search path
    pub libclang_path: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            cache_enabled: true,
            max_cached_files: DEFAULT_MAX_CACHED_FILES,
            clang_arguments: vec![DEFAULT_C_STANDARD.to_string()],
            libclang_path: None,
        }
    }
}

impl AnalyzerConfig {
    /// Default configuration overlaid with `CCODETOOLS_*` environment variables
    ///
    /// # Errors
    ///
    /// [`AnalyzerError::UnsupportedBackend`] for an unknown backend name and
    /// [`AnalyzerError::InvalidConfig`] for malformed values.
    pub fn from_env() -> AnalyzerResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AnalyzerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(backend) = lookup(ENV_BACKEND) {
            config.backend = backend.parse()?;
        }
        if let Some(cache) = lookup(ENV_CACHE) {
            config.cache_enabled = parse_flag(ENV_CACHE, &cache)?;
        }
        if let Some(size) = lookup(ENV_CACHE_SIZE) {
            let size = size.trim().parse::<usize>().map_err(|e| {
                AnalyzerError::InvalidConfig(format!("{ENV_CACHE_SIZE}={size}: {e}"))
            })?;
            config = config.with_max_cached_files(size);
        }
        if let Some(args) = lookup(ENV_CLANG_ARGS) {
            config.clang_arguments = args.split_whitespace().map(str::to_string).collect();
        }
        if let Some(path) = lookup(ENV_LIBCLANG_PATH).filter(|p| !p.trim().is_empty()) {
            config.libclang_path = Some(PathBuf::from(path));
        }

        config.validate()?;
        Ok(config)
    }

    /// Check invariants that construction relies on
    pub fn validate(&self) -> AnalyzerResult<()> {
        if self.cache_enabled && self.max_cached_files == 0 {
            return Err(AnalyzerError::InvalidConfig(
                "cache size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn with_max_cached_files(mut self, max_files: usize) -> Self {
        self.max_cached_files = max_files;
        self
    }

    pub fn with_clang_arguments(mut self, arguments: Vec<String>) -> Self {
        self.clang_arguments = arguments;
        self
    }

    pub fn with_libclang_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.libclang_path = Some(path.into());
        self
    }
}

fn parse_flag(key: &str, value: &str) -> AnalyzerResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(AnalyzerError::InvalidConfig(format!(
            "{key}={other}: expected a boolean"
        ))),
    }
}
