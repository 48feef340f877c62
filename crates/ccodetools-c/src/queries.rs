//! Tree queries behind the graph and function-scoped operations

use ccodetools_api::heuristics::{SideEffectsBuilder, SummaryBuilder};
use ccodetools_api::relationships::{CallGraphBuilder, DependencyBuilder};
use ccodetools_api::{
    CallGraph, ErrorPath, ErrorPathKind, FunctionDependencies, FunctionSummary, GlobalVariable,
    SideEffects, SymbolOccurrences,
};
use tree_sitter::Node;

use crate::declarator::{
    declarator_type, declared_name, declares_function, direct_callee, function_name,
    function_pointer_type, line_of, node_text,
};

/// Visit every node in preorder
pub(crate) fn for_each_node<'t, F>(node: Node<'t>, visit: &mut F)
where
    F: FnMut(Node<'t>),
{
    visit(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        for_each_node(child, visit);
    }
}

/// Visit every node inside the first definition of `target`.
///
/// The walk carries an `active` flag that is set on entering the matching
/// `function_definition` and inherited by its descendants. Later definitions
/// with the same name are ignored.
pub(crate) fn for_each_in_function<'t, F>(root: Node<'t>, source: &[u8], target: &str, visit: &mut F)
where
    F: FnMut(Node<'t>),
{
    let mut claimed = false;
    walk_active(root, source, target, false, &mut claimed, visit);
}

fn walk_active<'t, F>(
    node: Node<'t>,
    source: &[u8],
    target: &str,
    active: bool,
    claimed: &mut bool,
    visit: &mut F,
) where
    F: FnMut(Node<'t>),
{
    let active = if node.kind() == "function_definition" {
        let matches = !*claimed && function_name(node, source) == Some(target);
        if matches {
            *claimed = true;
        }
        matches
    } else {
        active
    };

    if active {
        visit(node);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_active(child, source, target, active, claimed, visit);
    }
}

/// First `function_definition` named `name`
pub(crate) fn find_function<'t>(root: Node<'t>, source: &[u8], name: &str) -> Option<Node<'t>> {
    if root.kind() == "function_definition" && function_name(root, source) == Some(name) {
        return Some(root);
    }
    let mut cursor = root.walk();
    let found = root
        .children(&mut cursor)
        .find_map(|child| find_function(child, source, name));
    found
}

pub(crate) fn function_body(root: Node, source: &[u8], name: &str) -> Option<String> {
    find_function(root, source, name)
        .and_then(|def| def.child_by_field_name("body"))
        .map(|body| node_text(body, source).to_string())
}

pub(crate) fn call_graph(root: Node, source: &[u8]) -> CallGraph {
    let mut builder = CallGraphBuilder::new();
    collect_calls(root, source, None, &mut builder);
    builder.build()
}

fn collect_calls<'s>(
    node: Node,
    source: &'s [u8],
    current: Option<&'s str>,
    builder: &mut CallGraphBuilder,
) {
    let current = if node.kind() == "function_definition" {
        let name = function_name(node, source);
        if let Some(name) = name {
            builder.add_function(name);
        }
        name
    } else {
        current
    };

    if node.kind() == "call_expression" {
        if let (Some(caller), Some(callee)) = (current, direct_callee(node, source)) {
            builder.add_call(caller, callee);
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_calls(child, source, current, builder);
    }
}

pub(crate) fn dependencies(root: Node, source: &[u8], name: &str) -> FunctionDependencies {
    let mut deps = DependencyBuilder::new();
    for_each_in_function(root, source, name, &mut |node| match node.kind() {
        "call_expression" => {
            if let Some(callee) = direct_callee(node, source) {
                deps.add_call(callee);
            }
        }
        "type_identifier" => deps.add_type(node_text(node, source)),
        "identifier" => deps.add_identifier(node_text(node, source)),
        _ => {}
    });
    deps.build(name)
}

pub(crate) fn summary(root: Node, source: &[u8], name: &str) -> FunctionSummary {
    let mut builder = SummaryBuilder::new();
    for_each_in_function(root, source, name, &mut |node| match node.kind() {
        "call_expression" => {
            if let Some(callee) = direct_callee(node, source) {
                builder.add_call(callee);
            }
        }
        "return_statement" => builder.add_return(),
        "goto_statement" => builder.add_goto(),
        _ => {}
    });
    builder.build(name)
}

pub(crate) fn error_paths(root: Node, source: &[u8], name: &str) -> Vec<ErrorPath> {
    let mut paths = Vec::new();
    for_each_in_function(root, source, name, &mut |node| match node.kind() {
        "return_statement" => paths.push(ErrorPath::new(line_of(node), ErrorPathKind::Return)),
        "goto_statement" => paths.push(ErrorPath::new(line_of(node), ErrorPathKind::Goto)),
        _ => {}
    });
    paths
}

pub(crate) fn side_effects(root: Node, source: &[u8], name: &str) -> SideEffects {
    let mut builder = SideEffectsBuilder::new();
    for_each_in_function(root, source, name, &mut |node| {
        if node.kind() == "call_expression" {
            if let Some(callee) = direct_callee(node, source) {
                builder.add_call(callee);
            }
        }
    });
    builder.build()
}

/// Variables declared directly at file scope.
///
/// Prototypes (`int f(void);`) are declarations too but declare no variable,
/// so declarators wrapping a function declarator are skipped.
pub(crate) fn globals(root: Node, source: &[u8]) -> Vec<GlobalVariable> {
    let mut globals = Vec::new();

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() != "declaration" {
            continue;
        }

        let mut declarators = child.walk();
        for declarator in child.children_by_field_name("declarator", &mut declarators) {
            // Prototypes declare functions; pointers to functions are objects
            if declares_function(declarator) {
                continue;
            }
            let Some(name) = declared_name(declarator) else {
                continue;
            };
            let type_name = function_pointer_type(child, declarator, source)
                .unwrap_or_else(|| declarator_type(child, declarator, source));
            globals.push(GlobalVariable::new(
                node_text(name, source),
                type_name,
                line_of(child),
            ));
        }
    }

    globals
}

pub(crate) fn symbol_occurrences(root: Node, source: &[u8], symbol: &str) -> SymbolOccurrences {
    let mut occurrences = SymbolOccurrences::new(symbol);
    for_each_node(root, &mut |node| {
        if node.kind() == "identifier" && node_text(node, source) == symbol {
            occurrences.push(line_of(node));
        }
    });
    occurrences
}
