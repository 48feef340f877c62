//! Integration tests for the tree-sitter C analyzer

use ccodetools_api::{DirectiveKind, ErrorPath, ErrorPathKind};
use ccodetools_c::{CAnalyzer, TreeSitterAnalyzer};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample.c")
}

fn write_source(source: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".c").tempfile().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

#[test]
fn test_analyze_sample_file() {
    let analyzer = TreeSitterAnalyzer::new().unwrap();
    let result = analyzer.analyze_file(&fixture()).unwrap();

    let names: Vec<&str> = result.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["add", "multiply", "print_hello", "make_point", "main"]
    );
    assert_eq!(result.file_path, fixture());

    assert_eq!(result.structs.len(), 1);
    assert_eq!(result.structs[0].name, "Point");
    assert_eq!(result.structs[0].line, 8);
    assert_eq!(result.structs[0].end_line, Some(11));
    assert_eq!(result.enums[0].name, "Status");
    assert_eq!(result.typedefs[0].name, "Point_t");
    assert_eq!(result.typedefs[0].line, 13);

    assert_eq!(result.includes.len(), 2);
    assert_eq!(result.defines.len(), 2);
    assert!(result.conditionals.is_empty());
}

#[test]
fn test_function_details() {
    let analyzer = TreeSitterAnalyzer::new().unwrap();
    let functions = analyzer.list_functions(&fixture()).unwrap();

    let add = &functions[0];
    assert_eq!(add.signature, "int add(int a, int b)");
    assert_eq!(add.start_line, 27);
    assert_eq!(add.end_line, 29);
    assert_eq!(
        add.doc_comment.as_deref(),
        Some("Calculates the sum of two integers Returns the sum")
    );

    let multiply = &functions[1];
    assert_eq!(multiply.doc_comment.as_deref(), Some("Multiplies two numbers"));

    let print_hello = &functions[2];
    assert_eq!(print_hello.return_type, "void");
    assert!(print_hello.doc_comment.is_none());

    let make_point = &functions[3];
    assert_eq!(make_point.return_type, "Point_t *");
    assert_eq!(make_point.signature, "Point_t * make_point(int x, int y)");

    let main = &functions[4];
    assert_eq!(main.parameters.len(), 2);
    assert_eq!(main.parameters[1].type_name, "char **");
    assert_eq!(main.parameters[1].name, "argv");
    assert_eq!(main.signature, "int main(int argc, char ** argv)");
    assert!(functions.iter().all(|f| f.end_line >= f.start_line));
}

#[test]
fn test_function_body() {
    let analyzer = TreeSitterAnalyzer::new().unwrap();
    let body = analyzer.get_function_body(&fixture(), "add").unwrap();
    assert_eq!(body.as_deref(), Some("{\n    return a + b;\n}"));

    let missing = analyzer.get_function_body(&fixture(), "nonexistent").unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_preprocessor_directives() {
    let analyzer = TreeSitterAnalyzer::new().unwrap();
    let directives = analyzer.get_preprocessor_directives(&fixture()).unwrap();

    assert_eq!(directives.includes[0].kind, DirectiveKind::Include);
    assert_eq!(directives.includes[0].content, "#include <stdio.h>");
    assert_eq!(directives.includes[0].line, 1);

    let max_size = &directives.defines[0];
    assert_eq!(max_size.content, "MAX_SIZE");
    assert_eq!(max_size.value.as_deref(), Some("100"));
    assert_eq!(max_size.line, 4);

    let min = &directives.defines[1];
    assert_eq!(min.content, "MIN");
    assert_eq!(min.value.as_deref(), Some("(a, b) ((a) < (b) ? (a) : (b))"));
}

#[test]
fn test_define_on_third_line() {
    let file = write_source("#include <stdio.h>\n\n#define MAX_SIZE 100\n");
    let analyzer = TreeSitterAnalyzer::new().unwrap();
    let directives = analyzer.get_preprocessor_directives(file.path()).unwrap();

    let define = &directives.defines[0];
    assert_eq!(define.content, "MAX_SIZE");
    assert_eq!(define.value.as_deref(), Some("100"));
    assert_eq!(define.line, 3);
}

#[test]
fn test_call_graph_and_main_summary() {
    let file = write_source(
        "#include <stdio.h>\n\
         int add(int a, int b) { return a + b; }\n\
         int main() { printf(\"%d\", add(1,2)); return 0; }\n",
    );
    let analyzer = TreeSitterAnalyzer::new().unwrap();

    let graph = analyzer.get_call_graph(file.path()).unwrap();
    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json, serde_json::json!({"add": [], "main": ["add", "printf"]}));

    let summary = analyzer.summarize_function(file.path(), "main").unwrap();
    assert_eq!(summary.function, "main");
    assert!(!summary.multiple_returns);
    assert!(!summary.uses_goto);
    assert!(!summary.allocates_memory);
}

#[test]
fn test_function_dependencies() {
    let analyzer = TreeSitterAnalyzer::new().unwrap();
    let deps = analyzer
        .get_function_dependencies(&fixture(), "make_point")
        .unwrap();

    assert_eq!(deps.function, "make_point");
    assert!(deps.calls.contains(&"malloc".to_string()));
    assert!(deps.calls.contains(&"MIN".to_string()));
    assert_eq!(deps.types, vec!["Point_t"]);
    assert!(deps.macros.contains(&"MAX_SIZE".to_string()));
    assert!(!deps.macros.contains(&"counter".to_string()));

    let unknown = analyzer
        .get_function_dependencies(&fixture(), "nonexistent")
        .unwrap();
    assert!(unknown.is_empty());
}

#[test]
fn test_summary_and_error_paths_with_goto() {
    let analyzer = TreeSitterAnalyzer::new().unwrap();

    let summary = analyzer.summarize_function(&fixture(), "make_point").unwrap();
    assert!(summary.allocates_memory);
    assert!(!summary.frees_memory);
    assert!(summary.multiple_returns);
    assert!(summary.uses_goto);

    let paths = analyzer
        .get_error_handling_paths(&fixture(), "make_point")
        .unwrap();
    assert_eq!(
        paths,
        vec![
            ErrorPath::new(43, ErrorPathKind::Goto),
            ErrorPath::new(47, ErrorPathKind::Return),
            ErrorPath::new(49, ErrorPathKind::Return),
        ]
    );
}

#[test]
fn test_side_effects() {
    let analyzer = TreeSitterAnalyzer::new().unwrap();

    let effects = analyzer.list_side_effects(&fixture(), "main").unwrap();
    assert_eq!(effects.io, vec!["printf"]);
    assert!(!effects.allocates_memory);

    let effects = analyzer.list_side_effects(&fixture(), "make_point").unwrap();
    assert!(effects.io.is_empty());
    assert!(effects.allocates_memory);
}

#[test]
fn test_globals() {
    let analyzer = TreeSitterAnalyzer::new().unwrap();
    let globals = analyzer.list_globals(&fixture()).unwrap();

    assert_eq!(globals.len(), 1);
    assert_eq!(globals[0].name, "counter");
    assert_eq!(globals[0].type_name, "int");
    assert_eq!(globals[0].line, 21);
}

#[test]
fn test_find_symbol() {
    let analyzer = TreeSitterAnalyzer::new().unwrap();

    let found = analyzer.find_symbol(&fixture(), "counter").unwrap();
    assert_eq!(found.lines, vec![21, 46]);

    let missing = analyzer
        .find_symbol(&fixture(), "nonexistent_symbol")
        .unwrap();
    let json = serde_json::to_value(&missing).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"symbol": "nonexistent_symbol", "lines": []})
    );
}

#[test]
fn test_repeated_analysis_is_stable() {
    let analyzer = TreeSitterAnalyzer::new().unwrap();
    let first = analyzer.analyze_file(&fixture()).unwrap();
    let second = analyzer.analyze_file(&fixture()).unwrap();
    assert_eq!(first, second);

    let listed = analyzer.list_functions(&fixture()).unwrap();
    for function in &listed {
        assert!(first
            .functions
            .iter()
            .any(|f| f.name == function.name
                && f.start_line == function.start_line
                && f.end_line == function.end_line));
    }

    let body = analyzer.get_function_body(&fixture(), "make_point").unwrap();
    assert_eq!(
        body,
        analyzer.get_function_body(&fixture(), "make_point").unwrap()
    );
}

#[test]
fn test_syntax_errors_are_tolerated() {
    let file = write_source("int ok(void) { return 1; }\n\nint broken(int x { return x;\n");
    let analyzer = TreeSitterAnalyzer::new().unwrap();

    let functions = analyzer.list_functions(file.path()).unwrap();
    assert!(functions.iter().any(|f| f.name == "ok"));
}

#[test]
fn test_empty_file() {
    let file = write_source("");
    let analyzer = TreeSitterAnalyzer::new().unwrap();

    let result = analyzer.analyze_file(file.path()).unwrap();
    assert_eq!(result.entity_count(), 0);
    assert!(analyzer.get_call_graph(file.path()).unwrap().is_empty());
    assert!(analyzer.list_globals(file.path()).unwrap().is_empty());
}

#[test]
fn test_missing_file_fails() {
    let analyzer = TreeSitterAnalyzer::new().unwrap();
    assert!(analyzer.analyze_file(Path::new("/no/such/dir/none.c")).is_err());
}
