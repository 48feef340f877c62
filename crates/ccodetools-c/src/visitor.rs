//! AST visitor for extracting C entities
//!
//! This visitor traverses the tree-sitter AST and extracts:
//! - Function definitions (signature, parameters, doc comment, line span)
//! - Named struct and enum definitions
//! - Typedef names
//!
//! ERROR nodes are traversed like any other node so that the valid parts of
//! a file that does not fully parse are still reported.

use ccodetools_api::comments::doc_comment_before;
use ccodetools_api::entities::function::pointer_type;
use ccodetools_api::{FunctionInfo, Parameter, TypeDeclaration};
use std::path::Path;
use tree_sitter::Node;

use crate::declarator::{
    declaration_type, declared_name, end_line_of, function_declarator, function_name, line_of,
    node_text, parameter_type,
};

pub struct CVisitor<'a> {
    pub source: &'a [u8],
    lines: Vec<&'a str>,
    file_path: &'a Path,
    pub functions: Vec<FunctionInfo>,
    pub structs: Vec<TypeDeclaration>,
    pub enums: Vec<TypeDeclaration>,
    pub typedefs: Vec<TypeDeclaration>,
    /// Number of ERROR nodes seen during the walk
    pub error_count: usize,
}

impl<'a> CVisitor<'a> {
    pub fn new(source: &'a [u8], lines: Vec<&'a str>, file_path: &'a Path) -> Self {
        Self {
            source,
            lines,
            file_path,
            functions: Vec::new(),
            structs: Vec::new(),
            enums: Vec::new(),
            typedefs: Vec::new(),
            error_count: 0,
        }
    }

    pub fn visit_node(&mut self, node: Node) {
        if node.is_error() {
            self.error_count += 1;
        }

        match node.kind() {
            "function_definition" => self.visit_function(node),
            "struct_specifier" => self.visit_tagged(node, TagKind::Struct),
            "enum_specifier" => self.visit_tagged(node, TagKind::Enum),
            "type_definition" => self.visit_typedef(node),
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit_node(child);
        }
    }

    fn visit_function(&mut self, node: Node) {
        let Some(name) = function_name(node, self.source) else {
            return;
        };

        let (parameters, pointer_depth) = match node
            .child_by_field_name("declarator")
            .and_then(function_declarator)
        {
            Some((declarator, depth)) => (self.extract_parameters(declarator), depth),
            None => (Vec::new(), 0),
        };

        let base = declaration_type(node, self.source).unwrap_or_else(|| "void".to_string());
        let return_type = pointer_type(&base, pointer_depth);

        let start_line = line_of(node);
        let doc = doc_comment_before(&self.lines, start_line);

        let func = FunctionInfo::new(
            name,
            return_type,
            parameters,
            start_line,
            end_line_of(node),
            self.file_path,
        )
        .with_doc(doc);

        self.functions.push(func);
    }

    fn extract_parameters(&self, declarator: Node) -> Vec<Parameter> {
        let mut parameters = Vec::new();

        let Some(list) = declarator.child_by_field_name("parameters") else {
            return parameters;
        };

        let mut cursor = list.walk();
        for child in list.children(&mut cursor) {
            match child.kind() {
                "parameter_declaration" => {
                    let name = child
                        .child_by_field_name("declarator")
                        .and_then(declared_name)
                        .map(|name| node_text(name, self.source))
                        .unwrap_or("");
                    parameters.push(Parameter::new(parameter_type(child, self.source), name));
                }
                "variadic_parameter" => parameters.push(Parameter::variadic()),
                _ => {}
            }
        }

        // `(void)` declares no parameters
        if let [only] = parameters.as_slice() {
            if only.type_name == "void" && only.name.is_empty() {
                parameters.clear();
            }
        }
        parameters
    }

    fn visit_tagged(&mut self, node: Node, kind: TagKind) {
        // Only definitions count; `struct Point *p` is a reference
        if node.child_by_field_name("body").is_none() {
            return;
        }
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };

        let decl = TypeDeclaration::new(node_text(name, self.source), line_of(node))
            .with_end_line(end_line_of(node));
        match kind {
            TagKind::Struct => self.structs.push(decl),
            TagKind::Enum => self.enums.push(decl),
        }
    }

    fn visit_typedef(&mut self, node: Node) {
        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            if let Some(name) = declared_name(declarator) {
                let decl = TypeDeclaration::new(node_text(name, self.source), line_of(node))
                    .with_end_line(end_line_of(node));
                self.typedefs.push(decl);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TagKind {
    Struct,
    Enum,
}
