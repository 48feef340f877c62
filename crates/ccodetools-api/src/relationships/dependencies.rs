use crate::heuristics::is_macro_like;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structural dependencies of one function
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDependencies {
    pub function: String,
    /// Directly called function names
    pub calls: Vec<String>,
    /// Named types referenced in the function
    pub types: Vec<String>,
    /// Upper-case identifiers, assumed to be macros or constants
    pub macros: Vec<String>,
}

impl FunctionDependencies {
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.types.is_empty() && self.macros.is_empty()
    }
}

/// Collects dependencies while walking a function's active region
#[derive(Debug, Default)]
pub struct DependencyBuilder {
    calls: BTreeSet<String>,
    types: BTreeSet<String>,
    macros: BTreeSet<String>,
}

impl DependencyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_call(&mut self, callee: &str) {
        self.calls.insert(callee.to_string());
    }

    pub fn add_type(&mut self, type_name: &str) {
        self.types.insert(type_name.to_string());
    }

    /// Record an identifier; only macro-like names are kept
    pub fn add_identifier(&mut self, identifier: &str) {
        if is_macro_like(identifier) {
            self.macros.insert(identifier.to_string());
        }
    }

    pub fn build(self, function: &str) -> FunctionDependencies {
        FunctionDependencies {
            function: function.to_string(),
            calls: self.calls.into_iter().collect(),
            types: self.types.into_iter().collect(),
            macros: self.macros.into_iter().collect(),
        }
    }
}
