//! Entity-tree queries over a libclang translation unit

use ccodetools_api::comments::doc_comment_before;
use ccodetools_api::heuristics::{is_macro_like, SideEffectsBuilder, SummaryBuilder};
use ccodetools_api::relationships::{CallGraphBuilder, DependencyBuilder};
use ccodetools_api::{
    AnalysisResult, CallGraph, DirectiveKind, ErrorPath, ErrorPathKind, FunctionDependencies,
    FunctionInfo, FunctionSummary, GlobalVariable, Parameter, PreprocessorDirective, SideEffects,
    SourceFile, SymbolOccurrences, TypeDeclaration,
};
use clang::token::TokenKind;
use clang::{Entity, EntityKind, TranslationUnit};

pub(crate) fn in_main_file(entity: &Entity) -> bool {
    entity
        .get_location()
        .map_or(false, |location| location.is_in_main_file())
}

fn line_of(entity: &Entity) -> usize {
    entity
        .get_location()
        .map_or(0, |location| location.get_file_location().line as usize)
}

/// First and last line of an entity's extent
fn line_span(entity: &Entity) -> (usize, usize) {
    match entity.get_range() {
        Some(range) => (
            range.get_start().get_file_location().line as usize,
            range.get_end().get_file_location().line as usize,
        ),
        None => {
            let line = line_of(entity);
            (line, line)
        }
    }
}

/// Byte offsets of an entity's extent in its file
fn byte_span(entity: &Entity) -> Option<(usize, usize)> {
    let range = entity.get_range()?;
    Some((
        range.get_start().get_file_location().offset as usize,
        range.get_end().get_file_location().offset as usize,
    ))
}

fn is_function_definition(entity: &Entity) -> bool {
    entity.get_kind() == EntityKind::FunctionDecl && entity.is_definition() && in_main_file(entity)
}

/// Name of a named, non-anonymous declaration
fn declared_name(entity: &Entity) -> Option<String> {
    if entity.is_anonymous() {
        return None;
    }
    entity.get_name().filter(|name| !name.is_empty())
}

/// Name of the function a call resolves to; calls through pointers resolve
/// to variables and are skipped
fn resolved_callee(call: &Entity) -> Option<String> {
    call.get_reference()
        .filter(|target| target.get_kind() == EntityKind::FunctionDecl)
        .and_then(|target| target.get_name())
}

pub(crate) fn functions(tu: &TranslationUnit, source: &SourceFile) -> Vec<FunctionInfo> {
    let lines = source.lines();
    tu.get_entity()
        .get_children()
        .iter()
        .filter(|entity| is_function_definition(entity))
        .map(|entity| function_info(entity, &lines, source))
        .collect()
}

fn function_info(entity: &Entity, lines: &[&str], source: &SourceFile) -> FunctionInfo {
    let name = entity.get_name().unwrap_or_default();
    let return_type = entity
        .get_result_type()
        .map(|ty| ty.get_display_name())
        .unwrap_or_else(|| "void".to_string());

    let mut parameters: Vec<Parameter> = entity
        .get_arguments()
        .unwrap_or_default()
        .iter()
        .map(|arg| {
            Parameter::new(
                arg.get_type()
                    .map(|ty| ty.get_display_name())
                    .unwrap_or_default(),
                arg.get_name().unwrap_or_default(),
            )
        })
        .collect();
    if entity.get_type().map_or(false, |ty| ty.is_variadic()) {
        parameters.push(Parameter::variadic());
    }

    let (start_line, end_line) = line_span(entity);
    FunctionInfo::new(
        name,
        return_type,
        parameters,
        start_line,
        end_line,
        source.path(),
    )
    .with_doc(doc_comment_before(lines, start_line))
}

/// Structs, enums and typedefs of the main file, found by full descent
pub(crate) fn collect_declarations(entity: Entity, result: &mut AnalysisResult) {
    for child in entity.get_children() {
        if in_main_file(&child) {
            let slot = match child.get_kind() {
                EntityKind::StructDecl if child.is_definition() => Some(&mut result.structs),
                EntityKind::EnumDecl if child.is_definition() => Some(&mut result.enums),
                EntityKind::TypedefDecl => Some(&mut result.typedefs),
                _ => None,
            };
            if let (Some(slot), Some(name)) = (slot, declared_name(&child)) {
                let (line, end_line) = line_span(&child);
                slot.push(TypeDeclaration::new(name, line).with_end_line(end_line));
            }
        }
        collect_declarations(child, result);
    }
}

/// Inclusion directives of the main file; content is the resolved header
/// path, or the spelled name when the header was not found
pub(crate) fn includes(tu: &TranslationUnit) -> Vec<PreprocessorDirective> {
    tu.get_entity()
        .get_children()
        .iter()
        .filter(|entity| entity.get_kind() == EntityKind::InclusionDirective)
        .filter(|entity| in_main_file(entity))
        .map(|entity| {
            let content = entity
                .get_file()
                .map(|file| file.get_path().display().to_string())
                .or_else(|| entity.get_name())
                .unwrap_or_default();
            PreprocessorDirective::new(DirectiveKind::Include, content, line_of(entity))
        })
        .collect()
}

fn find_function<'tu>(tu: &'tu TranslationUnit, name: &str) -> Option<Entity<'tu>> {
    tu.get_entity().get_children().into_iter().find(|entity| {
        is_function_definition(entity) && entity.get_name().as_deref() == Some(name)
    })
}

pub(crate) fn function_body(tu: &TranslationUnit, source: &SourceFile, name: &str) -> Option<String> {
    let body = find_function(tu, name)?
        .get_children()
        .into_iter()
        .find(|child| child.get_kind() == EntityKind::CompoundStmt)?;
    let (start, end) = byte_span(&body)?;
    source.slice(start, end).map(str::to_string)
}

pub(crate) fn call_graph(tu: &TranslationUnit) -> CallGraph {
    let mut builder = CallGraphBuilder::new();
    collect_calls(tu.get_entity(), None, &mut builder);
    builder.build()
}

fn collect_calls(entity: Entity, current: Option<&str>, builder: &mut CallGraphBuilder) {
    for child in entity.get_children() {
        if is_function_definition(&child) {
            let name = child.get_name().unwrap_or_default();
            builder.add_function(&name);
            collect_calls(child, Some(&name), builder);
            continue;
        }

        if child.get_kind() == EntityKind::CallExpr {
            if let (Some(caller), Some(callee)) = (current, resolved_callee(&child)) {
                builder.add_call(caller, &callee);
            }
        }
        collect_calls(child, current, builder);
    }
}

/// Visit every entity inside the first definition of `target`.
///
/// `active` turns on when descent enters the matching definition and off
/// when it enters any other function definition.
fn for_each_in_function<'tu, F>(tu: &'tu TranslationUnit, target: &str, visit: &mut F)
where
    F: FnMut(&Entity<'tu>),
{
    let mut claimed = false;
    walk_active(tu.get_entity(), target, false, &mut claimed, visit);
}

fn walk_active<'tu, F>(
    entity: Entity<'tu>,
    target: &str,
    active: bool,
    claimed: &mut bool,
    visit: &mut F,
) where
    F: FnMut(&Entity<'tu>),
{
    for child in entity.get_children() {
        let child_active =
            if child.get_kind() == EntityKind::FunctionDecl && child.is_definition() {
                let matches = !*claimed && child.get_name().as_deref() == Some(target);
                if matches {
                    *claimed = true;
                }
                matches
            } else {
                active
            };

        if child_active {
            visit(&child);
        }
        walk_active(child, target, child_active, claimed, visit);
    }
}

pub(crate) fn dependencies(tu: &TranslationUnit, name: &str) -> FunctionDependencies {
    let mut deps = DependencyBuilder::new();

    for_each_in_function(tu, name, &mut |entity| match entity.get_kind() {
        EntityKind::CallExpr => {
            if let Some(callee) = resolved_callee(entity) {
                deps.add_call(&callee);
            }
        }
        EntityKind::TypeRef => {
            let resolved = entity
                .get_reference()
                .and_then(|target| declared_name(&target))
                .or_else(|| entity.get_name());
            if let Some(type_name) = resolved {
                deps.add_type(&type_name);
            }
        }
        EntityKind::DeclRefExpr => {
            if let Some(identifier) = entity.get_name() {
                deps.add_identifier(&identifier);
            }
        }
        _ => {}
    });

    // Macro expansions live in the preprocessing record, not under the function
    if let Some((start, end)) = find_function(tu, name).and_then(|f| byte_span(&f)) {
        for entity in tu.get_entity().get_children() {
            if entity.get_kind() != EntityKind::MacroExpansion || !in_main_file(&entity) {
                continue;
            }
            let inside = byte_span(&entity).map_or(false, |(s, e)| s >= start && e <= end);
            if let (true, Some(macro_name)) = (inside, entity.get_name()) {
                if is_macro_like(&macro_name) {
                    deps.add_identifier(&macro_name);
                }
            }
        }
    }

    deps.build(name)
}

pub(crate) fn summary(tu: &TranslationUnit, name: &str) -> FunctionSummary {
    let mut builder = SummaryBuilder::new();
    for_each_in_function(tu, name, &mut |entity| match entity.get_kind() {
        EntityKind::CallExpr => {
            if let Some(callee) = resolved_callee(entity) {
                builder.add_call(&callee);
            }
        }
        EntityKind::ReturnStmt => builder.add_return(),
        EntityKind::GotoStmt => builder.add_goto(),
        _ => {}
    });
    builder.build(name)
}

pub(crate) fn error_paths(tu: &TranslationUnit, name: &str) -> Vec<ErrorPath> {
    let mut paths = Vec::new();
    for_each_in_function(tu, name, &mut |entity| match entity.get_kind() {
        EntityKind::ReturnStmt => paths.push(ErrorPath::new(line_of(entity), ErrorPathKind::Return)),
        EntityKind::GotoStmt => paths.push(ErrorPath::new(line_of(entity), ErrorPathKind::Goto)),
        _ => {}
    });
    paths
}

pub(crate) fn side_effects(tu: &TranslationUnit, name: &str) -> SideEffects {
    let mut builder = SideEffectsBuilder::new();
    for_each_in_function(tu, name, &mut |entity| {
        if entity.get_kind() == EntityKind::CallExpr {
            if let Some(callee) = resolved_callee(entity) {
                builder.add_call(&callee);
            }
        }
    });
    builder.build()
}

pub(crate) fn globals(tu: &TranslationUnit) -> Vec<GlobalVariable> {
    tu.get_entity()
        .get_children()
        .iter()
        .filter(|entity| entity.get_kind() == EntityKind::VarDecl && in_main_file(entity))
        .map(|entity| {
            GlobalVariable::new(
                entity.get_name().unwrap_or_default(),
                entity
                    .get_type()
                    .map(|ty| ty.get_display_name())
                    .unwrap_or_default(),
                line_of(entity),
            )
        })
        .collect()
}

/// Identifier tokens of the main file spelling `symbol`
pub(crate) fn symbol_occurrences(tu: &TranslationUnit, symbol: &str) -> SymbolOccurrences {
    let mut occurrences = SymbolOccurrences::new(symbol);

    let Some(range) = tu.get_entity().get_range() else {
        return occurrences;
    };
    for token in range.tokenize() {
        if token.get_kind() == TokenKind::Identifier && token.get_spelling() == symbol {
            occurrences.push(token.get_location().get_file_location().line as usize);
        }
    }
    occurrences
}
