//! Helpers for unwrapping tree-sitter C declarators and type specifiers

use ccodetools_api::entities::function::pointer_type;
use tree_sitter::Node;

pub(crate) fn node_text<'s>(node: Node, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or("")
}

pub(crate) fn line_of(node: Node) -> usize {
    node.start_position().row + 1
}

pub(crate) fn end_line_of(node: Node) -> usize {
    node.end_position().row + 1
}

/// Unwrap a declarator chain down to the node that names the declared entity.
///
/// Handles `int x`, `*p`, `a[10]`, `f(void)`, `(*fp)(int)` and initialised
/// declarators, returning the `identifier` (or `type_identifier` in a typedef).
pub(crate) fn declared_name(node: Node) -> Option<Node> {
    match node.kind() {
        "identifier" | "type_identifier" | "field_identifier" => Some(node),
        "init_declarator" | "pointer_declarator" | "array_declarator" | "function_declarator" => {
            node.child_by_field_name("declarator").and_then(declared_name)
        }
        "parenthesized_declarator" | "attributed_declarator" => {
            let mut cursor = node.walk();
            let found = node.named_children(&mut cursor).find_map(declared_name);
            found
        }
        _ => None,
    }
}

/// Name of a `function_definition`, if its declarator resolves to an identifier
pub(crate) fn function_name<'s>(definition: Node, source: &'s [u8]) -> Option<&'s str> {
    definition
        .child_by_field_name("declarator")
        .and_then(declared_name)
        .filter(|name| name.kind() == "identifier")
        .map(|name| node_text(name, source))
}

/// Find the `function_declarator` inside a declarator chain, counting the
/// pointer declarators wrapped around it (the return type's indirection)
pub(crate) fn function_declarator(node: Node) -> Option<(Node, usize)> {
    let mut current = node;
    let mut depth = 0;
    loop {
        match current.kind() {
            "function_declarator" => return Some((current, depth)),
            "pointer_declarator" => {
                depth += 1;
                current = current.child_by_field_name("declarator")?;
            }
            "init_declarator" | "array_declarator" => {
                current = current.child_by_field_name("declarator")?;
            }
            "parenthesized_declarator" | "attributed_declarator" => {
                let mut cursor = current.walk();
                let inner = current.named_children(&mut cursor).find(|child| {
                    child.kind().ends_with("declarator") || child.kind() == "identifier"
                });
                current = inner?;
            }
            _ => return None,
        }
    }
}

/// First named child that is itself a declarator or a name
fn inner_declarator(node: Node) -> Option<Node> {
    match node.kind() {
        "parenthesized_declarator" | "attributed_declarator" => {
            let mut cursor = node.walk();
            let inner = node.named_children(&mut cursor).find(|child| {
                child.kind().ends_with("declarator") || child.kind() == "identifier"
            });
            inner
        }
        _ => node.child_by_field_name("declarator"),
    }
}

/// Whether a declarator chain contains a `function_declarator`
pub(crate) fn contains_function(node: Node) -> bool {
    match node.kind() {
        "function_declarator" => true,
        "identifier" | "type_identifier" | "field_identifier" => false,
        _ => inner_declarator(node).map_or(false, contains_function),
    }
}

/// Whether a declarator names a function (a prototype) rather than an object.
///
/// `f(void)`, `*dup(const char *)` and `(*get(void))(int)` declare functions;
/// `(*handler)(int)` and `(*table[4])(void)` declare pointers to functions.
pub(crate) fn declares_function(node: Node) -> bool {
    match node.kind() {
        "init_declarator" | "pointer_declarator" | "parenthesized_declarator"
        | "attributed_declarator" => inner_declarator(node).map_or(false, declares_function),
        "function_declarator" => match node.child_by_field_name("declarator") {
            Some(inner) => !names_object(inner),
            None => false,
        },
        _ => false,
    }
}

/// Whether the declarator wrapped by a `function_declarator` denotes an
/// object: a pointer or array reached before any nested function declarator
fn names_object(node: Node) -> bool {
    match node.kind() {
        "parenthesized_declarator" | "attributed_declarator" => {
            inner_declarator(node).map_or(false, names_object)
        }
        "pointer_declarator" | "array_declarator" => {
            !inner_declarator(node).map_or(false, contains_function)
        }
        _ => false,
    }
}

/// Abstract type of a pointer-to-function object, `int (*)(int)` for
/// `int (*handler)(int)`: the declarator text with the name spliced out
pub(crate) fn function_pointer_type(
    declaration: Node,
    declarator: Node,
    source: &[u8],
) -> Option<String> {
    let declarator = match declarator.kind() {
        "init_declarator" => declarator.child_by_field_name("declarator")?,
        _ => declarator,
    };
    if !contains_function(declarator) || declares_function(declarator) {
        return None;
    }
    let name = declared_name(declarator)?;
    let head = source.get(declarator.start_byte()..name.start_byte())?;
    let tail = source.get(name.end_byte()..declarator.end_byte())?;
    let base = declaration_type(declaration, source).unwrap_or_default();
    Some(format!(
        "{base} {}{}",
        String::from_utf8_lossy(head),
        String::from_utf8_lossy(tail)
    ))
}

/// Parameter type with arrays decayed to pointers: `char *argv[]` is `char **`
pub(crate) fn parameter_type(parameter: Node, source: &[u8]) -> String {
    let Some(declarator) = parameter.child_by_field_name("declarator") else {
        return declaration_type(parameter, source).unwrap_or_default();
    };
    if let Some(rendered) = function_pointer_type(parameter, declarator, source) {
        return rendered;
    }

    let mut depth = 0;
    let mut current = Some(declarator);
    while let Some(node) = current {
        match node.kind() {
            "pointer_declarator"
            | "abstract_pointer_declarator"
            | "array_declarator"
            | "abstract_array_declarator" => depth += 1,
            "parenthesized_declarator" | "attributed_declarator" => {}
            _ => break,
        }
        current = inner_declarator(node);
    }
    let base = declaration_type(parameter, source).unwrap_or_default();
    pointer_type(&base, depth)
}

/// Number of pointer declarators between a declaration and its name
pub(crate) fn pointer_depth(node: Node) -> usize {
    let mut current = node;
    let mut depth = 0;
    loop {
        match current.kind() {
            "pointer_declarator" => depth += 1,
            "init_declarator" | "array_declarator" => {}
            _ => return depth,
        }
        match current.child_by_field_name("declarator") {
            Some(inner) => current = inner,
            None => return depth,
        }
    }
}

/// Render the `type` field of a declaration, prefixed by its qualifiers.
///
/// Struct, union and enum definitions render as `struct Name` rather than
/// their full body. Returns `None` when there is no explicit type.
pub(crate) fn declaration_type(declaration: Node, source: &[u8]) -> Option<String> {
    let type_node = declaration.child_by_field_name("type")?;

    let mut parts: Vec<&str> = Vec::new();
    let mut cursor = declaration.walk();
    for child in declaration.children(&mut cursor) {
        if child.kind() == "type_qualifier" {
            parts.push(node_text(child, source));
        }
    }

    let base = type_specifier_text(type_node, source);
    let mut rendered = parts.join(" ");
    if !rendered.is_empty() {
        rendered.push(' ');
    }
    rendered.push_str(&base);
    Some(rendered)
}

/// Declaration type including the pointer stars of `declarator`
pub(crate) fn declarator_type(declaration: Node, declarator: Node, source: &[u8]) -> String {
    let base = declaration_type(declaration, source).unwrap_or_default();
    pointer_type(&base, pointer_depth(declarator))
}

fn type_specifier_text(node: Node, source: &[u8]) -> String {
    match node.kind() {
        "struct_specifier" | "union_specifier" | "enum_specifier" => {
            let keyword = match node.kind() {
                "struct_specifier" => "struct",
                "union_specifier" => "union",
                _ => "enum",
            };
            match node.child_by_field_name("name") {
                Some(name) => format!("{keyword} {}", node_text(name, source)),
                None => keyword.to_string(),
            }
        }
        _ => node_text(node, source).trim().to_string(),
    }
}

/// Callee name of a call whose `function` is a bare identifier
pub(crate) fn direct_callee<'s>(call: Node, source: &'s [u8]) -> Option<&'s str> {
    call.child_by_field_name("function")
        .filter(|callee| callee.kind() == "identifier")
        .map(|callee| node_text(callee, source))
}
