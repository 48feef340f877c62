//! # ccodetools
//!
//! Structural analysis of C source files.
//!
//! Two interchangeable backends implement the [`CAnalyzer`] contract:
//!
//! - **tree-sitter** ([`TreeSitterAnalyzer`]): concrete syntax tree, no
//!   compiler needed, tolerant of syntax errors
//! - **clang** ([`ClangAnalyzer`]): libclang translation unit with resolved
//!   callees, types and includes
//!
//! Either can be wrapped in [`CachedAnalyzer`], which memoizes whole-file
//! results keyed by the SHA-256 of the file content.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ccodetools::{build_analyzer, initialize_runtime, AnalyzerConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnalyzerConfig::from_env()?;
//! let runtime = initialize_runtime(&config)?;
//! let analyzer = build_analyzer(&config, runtime.as_ref())?;
//!
//! let graph = analyzer.get_call_graph(Path::new("main.c"))?;
//! for (caller, callees) in &graph {
//!     println!("{caller} -> {callees:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod cache;
pub mod cli;

pub use backend::{analyzer_by_name, build_analyzer, initialize_runtime, make_analyzer, Analyzer};
pub use cache::{CacheStats, CachedAnalyzer};

// Re-export the contract and backends
pub use ccodetools_api::*;
pub use ccodetools_c::TreeSitterAnalyzer;
pub use ccodetools_clang::{ClangAnalyzer, ClangRuntime};
