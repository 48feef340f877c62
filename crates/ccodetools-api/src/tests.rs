//! Tests for analyzer API types and utilities

use crate::config::{ENV_BACKEND, ENV_CACHE, ENV_CACHE_SIZE, ENV_CLANG_ARGS, ENV_LIBCLANG_PATH};
use crate::entities::function::{pointer_type, render_signature};
use crate::heuristics::{is_macro_like, SideEffectsBuilder, SummaryBuilder};
use crate::relationships::{CallGraphBuilder, DependencyBuilder};
use crate::*;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_signature_rendering() {
    let params = vec![Parameter::new("int", "a"), Parameter::new("int", "b")];
    assert_eq!(render_signature("int", "add", &params), "int add(int a, int b)");

    let variadic = vec![Parameter::new("const char *", "fmt"), Parameter::variadic()];
    assert_eq!(
        render_signature("int", "log_msg", &variadic),
        "int log_msg(const char * fmt, ...)"
    );
    assert_eq!(render_signature("void", "noop", &[]), "void noop()");
}

#[test]
fn test_pointer_type() {
    assert_eq!(pointer_type("char", 0), "char");
    assert_eq!(pointer_type("char", 2), "char **");
}

#[test]
fn test_function_info_end_line_never_before_start() {
    let func = FunctionInfo::new("f", "void", Vec::new(), 10, 3, "a.c");
    assert!(func.end_line >= func.start_line);
    assert_eq!(func.line_count(), 1);
}

#[test]
fn test_call_graph_builder_sorts_and_dedups() {
    let mut builder = CallGraphBuilder::new();
    builder.add_function("add");
    builder.add_function("main");
    builder.add_call("main", "printf");
    builder.add_call("main", "add");
    builder.add_call("main", "printf");

    let graph = builder.build();
    assert_eq!(graph["add"], Vec::<String>::new());
    assert_eq!(graph["main"], vec!["add".to_string(), "printf".to_string()]);
}

#[test]
fn test_macro_like_identifiers() {
    assert!(is_macro_like("MAX_SIZE"));
    assert!(is_macro_like("X1"));
    assert!(!is_macro_like("_"));
    assert!(!is_macro_like("Max"));
    assert!(!is_macro_like("value"));
}

#[test]
fn test_dependency_builder() {
    let mut builder = DependencyBuilder::new();
    builder.add_call("memcpy");
    builder.add_call("helper");
    builder.add_type("Point_t");
    builder.add_identifier("BUFFER_LEN");
    builder.add_identifier("count");

    let deps = builder.build("copy");
    assert_eq!(deps.function, "copy");
    assert_eq!(deps.calls, vec!["helper", "memcpy"]);
    assert_eq!(deps.types, vec!["Point_t"]);
    assert_eq!(deps.macros, vec!["BUFFER_LEN"]);
}

#[test]
fn test_summary_builder() {
    let mut builder = SummaryBuilder::new();
    builder.add_call("malloc");
    builder.add_return();
    let summary = builder.build("f");
    assert!(summary.allocates_memory);
    assert!(!summary.frees_memory);
    assert!(!summary.multiple_returns);
    assert!(!summary.uses_goto);

    let mut builder = SummaryBuilder::new();
    builder.add_call("free");
    builder.add_return();
    builder.add_return();
    builder.add_goto();
    let summary = builder.build("g");
    assert!(summary.frees_memory);
    assert!(summary.multiple_returns);
    assert!(summary.uses_goto);
}

#[test]
fn test_side_effects_literal_names_only() {
    let mut builder = SideEffectsBuilder::new();
    builder.add_call("send");
    builder.add_call("printf");
    builder.add_call("printf");
    builder.add_call("fprintf");
    builder.add_call("xmalloc");

    let effects = builder.build();
    assert_eq!(effects.io, vec!["printf", "send"]);
    assert!(!effects.allocates_memory);
}

#[test]
fn test_directive_serialization_shape() {
    let directive = PreprocessorDirective::new(DirectiveKind::Define, "MAX_SIZE", 3)
        .with_value(Some("100".to_string()));
    let json = serde_json::to_value(&directive).unwrap();
    assert_eq!(json["type"], "define");
    assert_eq!(json["content"], "MAX_SIZE");
    assert_eq!(json["line"], 3);
    assert_eq!(json["value"], "100");

    let include = PreprocessorDirective::new(DirectiveKind::Include, "#include <stdio.h>", 1);
    let json = serde_json::to_value(&include).unwrap();
    assert!(json["value"].is_null());
}

#[test]
fn test_error_path_and_parameter_shape() {
    let json = serde_json::to_value(ErrorPath::new(7, ErrorPathKind::Goto)).unwrap();
    assert_eq!(json, serde_json::json!({"line": 7, "type": "goto"}));

    let json = serde_json::to_value(Parameter::new("int", "a")).unwrap();
    assert_eq!(json, serde_json::json!({"type": "int", "name": "a"}));
}

#[test]
fn test_analysis_result_lookup_and_sorting() {
    let mut result = AnalysisResult::new(PathBuf::from("a.c"));
    result.functions.push(FunctionInfo::new("f", "int", Vec::new(), 1, 2, "a.c"));
    result.structs.push(TypeDeclaration::new("Zeta", 1));
    result.structs.push(TypeDeclaration::new("Alpha", 9).with_end_line(12));
    result.sort_declarations();

    assert!(result.function("f").is_some());
    assert!(result.function("g").is_none());
    assert_eq!(result.structs[0].name, "Alpha");
    assert_eq!(result.structs[0].end_line, Some(12));
    assert_eq!(result.entity_count(), 3);
}

#[test]
fn test_backend_kind_parsing() {
    assert_eq!("tree-sitter".parse::<BackendKind>().unwrap(), BackendKind::TreeSitter);
    assert_eq!("tree_sitter".parse::<BackendKind>().unwrap(), BackendKind::TreeSitter);
    assert_eq!("Clang".parse::<BackendKind>().unwrap(), BackendKind::Clang);
    match "gcc".parse::<BackendKind>() {
        Err(AnalyzerError::UnsupportedBackend(name)) => assert_eq!(name, "gcc"),
        other => panic!("Expected UnsupportedBackend, got {other:?}"),
    }
}

#[test]
fn test_config_defaults() {
    let config = AnalyzerConfig::default();
    assert_eq!(config.backend, BackendKind::TreeSitter);
    assert!(config.cache_enabled);
    assert_eq!(config.max_cached_files, 32);
    assert_eq!(config.clang_arguments, vec!["-std=c11"]);
    assert!(config.libclang_path.is_none());
}

#[test]
fn test_config_from_lookup() {
    let lookup = lookup_from(&[
        (ENV_BACKEND, "clang"),
        (ENV_CACHE, "off"),
        (ENV_CACHE_SIZE, "8"),
        (ENV_CLANG_ARGS, "-std=c99  -DDEBUG"),
        (ENV_LIBCLANG_PATH, "/usr/lib/llvm-14/lib"),
    ]);
    let config = AnalyzerConfig::from_lookup(lookup).unwrap();

    assert_eq!(config.backend, BackendKind::Clang);
    assert!(!config.cache_enabled);
    assert_eq!(config.max_cached_files, 8);
    assert_eq!(config.clang_arguments, vec!["-std=c99", "-DDEBUG"]);
    assert_eq!(
        config.libclang_path.as_deref(),
        Some(Path::new("/usr/lib/llvm-14/lib"))
    );
}

#[test]
fn test_config_rejects_bad_values() {
    let result = AnalyzerConfig::from_lookup(lookup_from(&[(ENV_BACKEND, "pycparser")]));
    assert!(matches!(result, Err(AnalyzerError::UnsupportedBackend(_))));

    let result = AnalyzerConfig::from_lookup(lookup_from(&[(ENV_CACHE_SIZE, "many")]));
    assert!(matches!(result, Err(AnalyzerError::InvalidConfig(_))));

    let result = AnalyzerConfig::from_lookup(lookup_from(&[(ENV_CACHE_SIZE, "0")]));
    assert!(matches!(result, Err(AnalyzerError::InvalidConfig(_))));
}

#[test]
fn test_source_file_read_and_lines() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"int a;\r\nint b;\n").unwrap();

    let source = SourceFile::read(file.path()).unwrap();
    let lines = source.lines();
    assert_eq!(lines, vec!["int a;\r", "int b;", ""]);
    assert_eq!(source.slice(0, 3), Some("int"));
}

#[test]
fn test_source_file_errors() {
    let missing = SourceFile::read(Path::new("/definitely/not/here.c"));
    assert!(matches!(missing, Err(AnalyzerError::IoError(..))));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0x69, 0x6e, 0x74, 0xff, 0xfe]).unwrap();
    let invalid = SourceFile::read(file.path());
    assert!(matches!(invalid, Err(AnalyzerError::DecodeError(..))));
}
