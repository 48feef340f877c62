//! # ccodetools-c
//!
//! Syntax-tree backend for ccodetools - analyzes C source files with tree-sitter.
//!
//! ## Features
//!
//! - Parse C source files (.c) and header files (.h) without a compiler
//! - Extract functions, structs, enums, typedefs and file-scope variables
//! - Build per-function call graphs from direct calls
//! - Answer function-scoped queries (dependencies, summaries, error paths)
//! - **Tolerant parsing**: syntax errors never abort an analysis
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ccodetools_c::TreeSitterAnalyzer;
//! use ccodetools_api::CAnalyzer;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = TreeSitterAnalyzer::new()?;
//!
//! let result = analyzer.analyze_file(Path::new("main.c"))?;
//! println!("Found {} functions", result.functions.len());
//! # Ok(())
//! # }
//! ```

mod declarator;
mod parser_impl;
mod queries;
pub mod visitor;

// Re-export analyzer API types for convenience
pub use ccodetools_api::{AnalysisResult, AnalyzerError, AnalyzerResult, CAnalyzer};

pub use parser_impl::{TreeSitterAnalyzer, BACKEND_NAME};
