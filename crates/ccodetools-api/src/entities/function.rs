use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Type spelling used for a trailing `...` parameter
pub const VARIADIC: &str = "...";

/// Represents a function parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter type as written (or as resolved by the semantic backend)
    #[serde(rename = "type")]
    pub type_name: String,

    /// Parameter name; empty for unnamed parameters
    pub name: String,
}

impl Parameter {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// The `...` of a variadic function
    pub fn variadic() -> Self {
        Self::new(VARIADIC, "")
    }

    pub fn is_variadic(&self) -> bool {
        self.type_name == VARIADIC
    }

    /// `"<type> <name>"`, or just the type when the parameter is unnamed
    pub fn render(&self) -> String {
        if self.name.is_empty() {
            self.type_name.clone()
        } else {
            format!("{} {}", self.type_name, self.name)
        }
    }
}

/// Represents a function definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    /// Function name
    pub name: String,

    /// `"<return_type> <name>(<type name>, ...)"`
    pub signature: String,

    /// Starting line number (1-indexed)
    pub start_line: usize,

    /// Ending line number (1-indexed, inclusive)
    pub end_line: usize,

    /// Return type
    pub return_type: String,

    /// Parameters in declaration order
    pub parameters: Vec<Parameter>,

    /// Comment immediately above the definition, markers stripped
    pub doc_comment: Option<String>,

    /// File the definition was read from
    pub file_path: PathBuf,
}

impl FunctionInfo {
    /// Create a function with a signature rendered from its parts
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<String>,
        parameters: Vec<Parameter>,
        start_line: usize,
        end_line: usize,
        file_path: impl Into<PathBuf>,
    ) -> Self {
        let name = name.into();
        let return_type = return_type.into();
        let signature = render_signature(&return_type, &name, &parameters);
        Self {
            name,
            signature,
            start_line,
            end_line: end_line.max(start_line),
            return_type,
            parameters,
            doc_comment: None,
            file_path: file_path.into(),
        }
    }

    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc_comment = doc;
        self
    }

    /// Number of source lines covered by the definition
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// Render a C signature the same way for every backend
pub fn render_signature(return_type: &str, name: &str, parameters: &[Parameter]) -> String {
    let params: Vec<String> = parameters.iter().map(Parameter::render).collect();
    format!("{return_type} {name}({})", params.join(", "))
}

/// Format a base type followed by pointer stars: `("char", 2)` is `char **`.
pub fn pointer_type(base: &str, depth: usize) -> String {
    if depth == 0 {
        base.to_string()
    } else {
        format!("{base} {}", "*".repeat(depth))
    }
}
