use serde::{Deserialize, Serialize};

/// A named struct, enum or typedef declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,

    /// Declaration line (1-indexed)
    pub line: usize,

    /// Last line of the declaration, when the backend knows it
    pub end_line: Option<usize>,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
            end_line: None,
        }
    }

    pub fn with_end_line(mut self, end_line: usize) -> Self {
        self.end_line = Some(end_line.max(self.line));
        self
    }
}

/// A variable declared at file scope
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalVariable {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    /// Declaration line (1-indexed)
    pub line: usize,
}

impl GlobalVariable {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            line,
        }
    }
}
