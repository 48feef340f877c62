use crate::entities::{FunctionInfo, PreprocessorDirective, PreprocessorDirectives, TypeDeclaration};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete structural analysis of one C file
///
/// This is the whole-file result both backends produce. Function-scoped and
/// graph queries are computed separately on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Source file path
    pub file_path: PathBuf,

    /// Function definitions in traversal order
    pub functions: Vec<FunctionInfo>,

    pub includes: Vec<PreprocessorDirective>,
    pub defines: Vec<PreprocessorDirective>,
    pub conditionals: Vec<PreprocessorDirective>,

    pub structs: Vec<TypeDeclaration>,
    pub enums: Vec<TypeDeclaration>,
    pub typedefs: Vec<TypeDeclaration>,
}

impl AnalysisResult {
    /// Create a new empty result
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            ..Default::default()
        }
    }

    /// Attach grouped directives
    pub fn set_directives(&mut self, directives: PreprocessorDirectives) {
        self.includes = directives.includes;
        self.defines = directives.defines;
        self.conditionals = directives.conditionals;
    }

    /// Find a function by exact name; the first definition wins
    pub fn function(&self, name: &str) -> Option<&FunctionInfo> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Total number of declarations (functions and types)
    pub fn entity_count(&self) -> usize {
        self.functions.len() + self.structs.len() + self.enums.len() + self.typedefs.len()
    }

    /// Sort type declarations by name, then line, so output order does not
    /// depend on traversal order
    pub fn sort_declarations(&mut self) {
        for decls in [&mut self.structs, &mut self.enums, &mut self.typedefs] {
            decls.sort_by(|a, b| a.name.cmp(&b.name).then(a.line.cmp(&b.line)));
        }
    }
}
