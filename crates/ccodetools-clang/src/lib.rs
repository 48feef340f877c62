//! # ccodetools-clang
//!
//! Semantic backend for ccodetools - analyzes C source files with libclang.
//!
//! Unlike the syntax-tree backend this one resolves names: callees are the
//! functions a call actually refers to, types come from resolved references
//! and includes report the header path the frontend found.
//!
//! libclang is loaded at runtime. The composition layer loads it once per
//! process with [`ClangRuntime::initialize`] and hands the runtime to every
//! analyzer it builds.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ccodetools_api::CAnalyzer;
//! use ccodetools_clang::{ClangAnalyzer, ClangRuntime};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runtime = ClangRuntime::initialize(None)?;
//! let analyzer = ClangAnalyzer::new(&runtime, vec!["-std=c11".to_string()]);
//!
//! let graph = analyzer.get_call_graph(Path::new("main.c"))?;
//! println!("{graph:?}");
//! # Ok(())
//! # }
//! ```

mod parser_impl;
mod runtime;
mod walker;

pub use parser_impl::{ClangAnalyzer, BACKEND_NAME};
pub use runtime::{ClangRuntime, LIBCLANG_PATH};
