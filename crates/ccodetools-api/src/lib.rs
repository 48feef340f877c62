//! ccodetools analyzer API
//!
//! Shared contract and types for the C structural analysis backends.
//!
//! This crate defines:
//!
//! - **CAnalyzer trait**: the operation set every backend implements
//! - **Entity types**: functions, directives, type declarations, globals
//! - **Relationships**: call graphs and per-function dependencies
//! - **Heuristics**: name-based behaviour summaries and side effects
//! - **Shared scanners**: the source reader, the line-based preprocessor
//!   scanner and the doc-comment scanner used by every backend
//! - **Configuration** and **errors**
//!
//! # Example
//!
//! ```rust,ignore
//! use ccodetools_api::{CAnalyzer, AnalyzerResult};
//! use std::path::Path;
//!
//! fn report(analyzer: &dyn CAnalyzer, path: &Path) -> AnalyzerResult<()> {
//!     for function in analyzer.list_functions(path)? {
//!         println!("{} (lines {}-{})", function.signature, function.start_line, function.end_line);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod comments;
pub mod config;
pub mod entities;
pub mod errors;
pub mod heuristics;
pub mod preprocessor;
pub mod relationships;
pub mod source;
pub mod traits;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use analysis::AnalysisResult;
pub use config::{AnalyzerConfig, BackendKind};
pub use entities::{
    DirectiveKind, FunctionInfo, GlobalVariable, Parameter, PreprocessorDirective,
    PreprocessorDirectives, SymbolOccurrences, TypeDeclaration,
};
pub use errors::{AnalyzerError, AnalyzerResult};
pub use heuristics::{ErrorPath, ErrorPathKind, FunctionSummary, SideEffects};
pub use relationships::{CallGraph, FunctionDependencies};
pub use source::SourceFile;
pub use traits::CAnalyzer;
