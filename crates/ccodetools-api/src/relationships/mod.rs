pub mod calls;
pub mod dependencies;

pub use calls::{CallGraph, CallGraphBuilder};
pub use dependencies::{DependencyBuilder, FunctionDependencies};
