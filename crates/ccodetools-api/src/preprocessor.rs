//! Line-based preprocessor directive scanner
//!
//! Directives are recognised by prefix matching on stripped source lines, in
//! a single forward pass and without any parse tree. There is no comment
//! stripping pass, so a `#define` inside a block comment is still reported.

use crate::entities::{DirectiveKind, PreprocessorDirective, PreprocessorDirectives};

const INCLUDE_PREFIX: &str = "#include";
const DEFINE_PREFIX: &str = "#define";

/// Conditional prefixes in match priority order. `#if` must follow
/// `#ifdef`/`#ifndef` since it is a prefix of both.
const CONDITIONAL_PREFIXES: &[(&str, DirectiveKind)] = &[
    ("#ifdef", DirectiveKind::Ifdef),
    ("#ifndef", DirectiveKind::Ifndef),
    ("#if", DirectiveKind::If),
    ("#elif", DirectiveKind::Elif),
    ("#else", DirectiveKind::Else),
    ("#endif", DirectiveKind::Endif),
];

/// Scan all directives of a file in one pass
pub fn scan_directives<S: AsRef<str>>(lines: &[S]) -> PreprocessorDirectives {
    let mut directives = PreprocessorDirectives::default();

    for (index, line) in lines.iter().enumerate() {
        let stripped = line.as_ref().trim();
        if !stripped.starts_with('#') {
            continue;
        }
        let line_no = index + 1;

        if stripped.starts_with(INCLUDE_PREFIX) {
            directives
                .includes
                .push(PreprocessorDirective::new(DirectiveKind::Include, stripped, line_no));
        } else if let Some(rest) = stripped.strip_prefix(DEFINE_PREFIX) {
            directives.defines.push(parse_define(rest, line_no));
        } else if let Some(kind) = conditional_kind(stripped) {
            directives
                .conditionals
                .push(PreprocessorDirective::new(kind, stripped, line_no));
        }
    }

    directives
}

fn conditional_kind(stripped: &str) -> Option<DirectiveKind> {
    CONDITIONAL_PREFIXES
        .iter()
        .find(|(prefix, _)| stripped.starts_with(prefix))
        .map(|(_, kind)| *kind)
}

/// Split the text after `#define` into macro name and optional value.
///
/// The name ends at the first space, tab or `(`, so a function-like macro
/// keeps its parameter list in the value.
fn parse_define(rest: &str, line: usize) -> PreprocessorDirective {
    let rest = rest.trim();
    let boundary = rest.find(&[' ', '\t', '('][..]).unwrap_or(rest.len());

    let name = if boundary > 0 { &rest[..boundary] } else { rest };
    let value = if boundary < rest.len() {
        Some(rest[boundary..].trim().to_string())
    } else {
        None
    };

    PreprocessorDirective::new(DirectiveKind::Define, name, line).with_value(value)
}
