//! Name-based behavioural heuristics for C functions.
//!
//! Detection is purely syntactic: a call counts as an allocation when the
//! callee is literally named `malloc`, regardless of what it resolves to.
//! Wrapped or renamed allocators are not recognised.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Callee name that marks a memory allocation
pub const ALLOCATION_CALL: &str = "malloc";

/// Callee name that marks a memory release
pub const DEALLOCATION_CALL: &str = "free";

/// Callee names that count as I/O side effects
pub const IO_CALLS: &[&str] = &["printf", "write", "send"];

pub fn is_io_call(name: &str) -> bool {
    IO_CALLS.contains(&name)
}

/// True for identifiers that look like macros: at least one letter and no
/// lower-case letters (`MAX_SIZE`, `X1`, but not `_` or `Max`).
pub fn is_macro_like(name: &str) -> bool {
    name.chars().any(|c| c.is_alphabetic()) && !name.chars().any(|c| c.is_lowercase())
}

/// Heuristic behaviour flags of one function
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSummary {
    pub function: String,
    pub allocates_memory: bool,
    pub frees_memory: bool,
    pub multiple_returns: bool,
    pub uses_goto: bool,
}

/// Builder for incrementally tracking a summary during traversal
#[derive(Debug, Default)]
pub struct SummaryBuilder {
    allocates_memory: bool,
    frees_memory: bool,
    returns: u32,
    uses_goto: bool,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a direct call to `callee`
    pub fn add_call(&mut self, callee: &str) {
        if callee == ALLOCATION_CALL {
            self.allocates_memory = true;
        }
        if callee == DEALLOCATION_CALL {
            self.frees_memory = true;
        }
    }

    pub fn add_return(&mut self) {
        self.returns += 1;
    }

    pub fn add_goto(&mut self) {
        self.uses_goto = true;
    }

    pub fn build(self, function: &str) -> FunctionSummary {
        FunctionSummary {
            function: function.to_string(),
            allocates_memory: self.allocates_memory,
            frees_memory: self.frees_memory,
            multiple_returns: self.returns > 1,
            uses_goto: self.uses_goto,
        }
    }
}

/// Observable side effects of one function
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideEffects {
    /// Recognised I/O calls, sorted
    pub io: Vec<String>,
    pub allocates_memory: bool,
}

#[derive(Debug, Default)]
pub struct SideEffectsBuilder {
    io: BTreeSet<String>,
    allocates_memory: bool,
}

impl SideEffectsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_call(&mut self, callee: &str) {
        if is_io_call(callee) {
            self.io.insert(callee.to_string());
        }
        if callee == ALLOCATION_CALL {
            self.allocates_memory = true;
        }
    }

    pub fn build(self) -> SideEffects {
        SideEffects {
            io: self.io.into_iter().collect(),
            allocates_memory: self.allocates_memory,
        }
    }
}

/// How control leaves a function on an error path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPathKind {
    Return,
    Goto,
}

/// A `return` or `goto` inside a function
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorPath {
    pub line: usize,
    #[serde(rename = "type")]
    pub kind: ErrorPathKind,
}

impl ErrorPath {
    pub fn new(line: usize, kind: ErrorPathKind) -> Self {
        Self { line, kind }
    }
}
