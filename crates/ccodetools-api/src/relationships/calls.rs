use std::collections::{BTreeMap, BTreeSet};

/// Function name to the sorted, de-duplicated names it calls
pub type CallGraph = BTreeMap<String, Vec<String>>;

/// Accumulates caller/callee pairs during a single traversal
#[derive(Debug, Default)]
pub struct CallGraphBuilder {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl CallGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function so it appears in the graph even if it calls nothing
    pub fn add_function(&mut self, name: &str) {
        self.edges.entry(name.to_string()).or_default();
    }

    /// Record that `caller` calls `callee`
    pub fn add_call(&mut self, caller: &str, callee: &str) {
        self.edges
            .entry(caller.to_string())
            .or_default()
            .insert(callee.to_string());
    }

    pub fn build(self) -> CallGraph {
        self.edges
            .into_iter()
            .map(|(caller, callees)| (caller, callees.into_iter().collect()))
            .collect()
    }
}
