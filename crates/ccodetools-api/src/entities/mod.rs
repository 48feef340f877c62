pub mod declaration;
pub mod directive;
pub mod function;
pub mod symbol;

pub use declaration::{GlobalVariable, TypeDeclaration};
pub use directive::{DirectiveKind, PreprocessorDirective, PreprocessorDirectives};
pub use function::{FunctionInfo, Parameter};
pub use symbol::SymbolOccurrences;
