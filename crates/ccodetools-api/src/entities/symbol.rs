use serde::{Deserialize, Serialize};

/// Every line on which an identifier token spells `symbol`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolOccurrences {
    pub symbol: String,
    /// One entry per occurrence, in source order
    pub lines: Vec<usize>,
}

impl SymbolOccurrences {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: usize) {
        self.lines.push(line);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
