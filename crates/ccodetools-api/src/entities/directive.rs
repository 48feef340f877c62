use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of preprocessor directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    Include,
    Define,
    If,
    Ifdef,
    Ifndef,
    Elif,
    Else,
    Endif,
}

impl DirectiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveKind::Include => "include",
            DirectiveKind::Define => "define",
            DirectiveKind::If => "if",
            DirectiveKind::Ifdef => "ifdef",
            DirectiveKind::Ifndef => "ifndef",
            DirectiveKind::Elif => "elif",
            DirectiveKind::Else => "else",
            DirectiveKind::Endif => "endif",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One preprocessor directive found in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessorDirective {
    #[serde(rename = "type")]
    pub kind: DirectiveKind,

    /// Full line for includes and conditionals, the bare macro name for defines
    pub content: String,

    /// Line number (1-indexed)
    pub line: usize,

    /// Macro body after the name; only set for defines that have one
    pub value: Option<String>,
}

impl PreprocessorDirective {
    pub fn new(kind: DirectiveKind, content: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            content: content.into(),
            line,
            value: None,
        }
    }

    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }
}

/// Directives of one file, grouped by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessorDirectives {
    pub includes: Vec<PreprocessorDirective>,
    pub defines: Vec<PreprocessorDirective>,
    pub conditionals: Vec<PreprocessorDirective>,
}

impl PreprocessorDirectives {
    pub fn len(&self) -> usize {
        self.includes.len() + self.defines.len() + self.conditionals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
