//! Compilation pipeline integration tests.
//!
//! End-to-end runs of every pass over small workspaces made of a
//! definition-only `stdlib` package and an `app` package.

use xlate_ast::*;
use xlate_compiler::Compilation;
use xlate_diagnostics::{messages, CompileError};
use xlate_options::{parse_options, CompilerOptions};

/// Helper: a definition-only `stdlib` package whose `index` scope holds the
/// literal classes (not marked exported) and `Console` with a static `log`.
/// `skip` leaves one literal class out.
fn add_stdlib(comp: &mut Compilation, skip: Option<&str>) -> ClassId {
    let names = comp.options.literal_types.clone();
    let ws = &mut comp.workspace;
    let pkg = ws.add_package(&comp.options.stdlib_package, true);
    let mut classes = Vec::new();
    for (kind, name) in names.entries() {
        if skip == Some(name) {
            continue;
        }
        let generic = match kind {
            "array" | "promise" => vec![ws.intern("T")],
            "map" => vec![ws.intern("V")],
            _ => vec![],
        };
        classes.push(ws.add_class(Class::new(ws.intern(name), generic, false)));
    }

    let string = ws.intern(&names.string);
    let string_type = classes
        .iter()
        .find(|c| ws.classes[**c].name == string)
        .map(|c| ws.classes[*c].self_type);
    let msg = ws.add_param(Param::new(ws.intern("msg"), string_type));
    let void = ws.types.void_type;
    let mut log = Method::new(ws.intern("log"), vec![msg], None, void);
    log.is_static = true;
    let log = ws.add_method(log);
    let mut console = Class::new(ws.intern("Console"), vec![], true);
    console.methods.push(log);
    let console = ws.add_class(console);
    classes.push(console);

    let scope = comp.options.stdlib_scope.clone();
    let mut fb = FileBuilder::new(&mut comp.workspace, pkg, "index.ts", &scope);
    for c in classes {
        fb.class(c);
    }
    let file = fb.finish();
    comp.add_file(file).unwrap();
    console
}

/// Helper: an `app/main.ts` file importing `names` from the stdlib scope.
fn add_app(comp: &mut Compilation, names: &[&str], main: Vec<StmtId>) -> FileId {
    let ws = &mut comp.workspace;
    let pkg = ws.add_package("app", false);
    let scope = ExportScopeRef::new(ws.intern(&comp.options.stdlib_package), ws.intern(&comp.options.stdlib_scope));
    let items = names.iter().map(|n| ImportItem::Unresolved(ws.intern(n))).collect();
    let import = Import::new(&ws.names, scope, false, items, None).unwrap();
    let import = ws.add_import(import);

    let mut fb = FileBuilder::new(ws, pkg, "main.ts", "main");
    fb.import(import).main_block(Block::new(main));
    let file = fb.finish();
    comp.add_file(file).unwrap();
    file
}

// ============================================================================
// Full Pipeline
// ============================================================================

#[test]
fn test_compile_program() {
    let mut comp = Compilation::new(CompilerOptions::default());
    let console = add_stdlib(&mut comp, None);

    let ws = &mut comp.workspace;
    let one = ws.num("1");
    let two = ws.num("2");
    let sum = ws.binary(BinaryOp::Add, one, two);
    let (decl, x) = ws.var_stmt("x", None, Some(sum));
    let x_ref = ws.ident("x");
    let x_ref2 = ws.ident("x");
    let three = ws.num("3");
    let inc = ws.binary(BinaryOp::Add, x_ref2, three);
    let assign = ws.binary(BinaryOp::Assign, x_ref, inc);
    let assign_stmt = ws.expr_stmt(assign);
    let console_ref = ws.ident("Console");
    let log = ws.prop(console_ref, "log");
    let hello = ws.string("hello");
    let call = ws.call(log, vec![hello]);
    let call_stmt = ws.expr_stmt(call);
    add_app(&mut comp, &["Console"], vec![decl, assign_stmt, call_stmt]);

    let output = comp.compile().unwrap();
    let ws = &comp.workspace;
    let literals = ws.files.values().find_map(|f| f.literal_types).unwrap();

    assert_eq!(output.files, 2);
    assert_eq!(ws.variables[x].ty, Some(literals.numeric));
    assert_eq!(ws.exprs[assign].actual_type, Some(literals.numeric));
    assert_eq!(ws.exprs[call].actual_type, Some(ws.types.void_type));
    assert!(matches!(ws.exprs[call].kind, ExprKind::StaticMethodCall { .. }));
    assert_eq!(ws.classes[console].class_references, vec![console_ref]);
    assert!(ws.variables[x].mutability.unwrap().reassigned());
    assert!(output.inference.typed() > 0);
}

#[test]
fn test_literal_types_reach_every_file() {
    let mut comp = Compilation::new(CompilerOptions::default());
    add_stdlib(&mut comp, None);
    let app = add_app(&mut comp, &[], vec![]);

    comp.compile().unwrap();
    let literals = comp.workspace.files[app].literal_types.unwrap();
    let numeric = comp.workspace.types.class_decl(literals.numeric).unwrap();
    assert_eq!(comp.workspace.names.resolve(comp.workspace.classes[numeric].name), "TsNumber");
}

#[test]
fn test_custom_options() {
    let options = parse_options(r#"{ "stdlibPackage": "native", "literalTypes": { "numeric": "Num" } }"#).unwrap();
    let mut comp = Compilation::new(options);
    add_stdlib(&mut comp, None);
    let one = comp.workspace.num("1");
    let stmt = comp.workspace.expr_stmt(one);
    add_app(&mut comp, &[], vec![stmt]);

    comp.compile().unwrap();
    let ws = &comp.workspace;
    let decl = ws.types.class_decl(ws.exprs[one].actual_type.unwrap()).unwrap();
    assert_eq!(ws.names.resolve(ws.classes[decl].name), "Num");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_stdlib_fails_at_inference() {
    let mut comp = Compilation::new(CompilerOptions::default());
    let one = comp.workspace.num("1");
    let stmt = comp.workspace.expr_stmt(one);
    let pkg = comp.workspace.add_package("app", false);
    let mut fb = FileBuilder::new(&mut comp.workspace, pkg, "main.ts", "main");
    fb.main_block(Block::new(vec![stmt]));
    let file = fb.finish();
    comp.add_file(file).unwrap();

    let err = comp.compile().unwrap_err();
    assert_eq!(err, CompileError::MissingLiteralTypes { file: "app/main.ts".to_string() });
}

#[test]
fn test_missing_literal_class_fails() {
    let mut comp = Compilation::new(CompilerOptions::default());
    add_stdlib(&mut comp, Some("TsMap"));
    add_app(&mut comp, &[], vec![]);

    let err = comp.compile().unwrap_err();
    assert_eq!(err, CompileError::ExportNotFound { symbol: "stdlib.index.TsMap".to_string() });
}

#[test]
fn test_definition_only_exports_need_option() {
    let mut options = CompilerOptions::default();
    options.export_all_definition_only = false;
    let mut comp = Compilation::new(options);
    add_stdlib(&mut comp, None);
    add_app(&mut comp, &[], vec![]);

    let err = comp.compile().unwrap_err();
    assert_eq!(err, CompileError::ExportNotFound { symbol: "stdlib.index.TsBoolean".to_string() });
}

#[test]
fn test_failure_as_diagnostic() {
    let mut comp = Compilation::new(CompilerOptions::default());
    add_stdlib(&mut comp, None);
    let cond = comp.workspace.boolean(true);
    let n1 = comp.workspace.null();
    let n2 = comp.workspace.null();
    let expr = comp.workspace.conditional(cond, n1, n2);
    let stmt = comp.workspace.expr_stmt(expr);
    add_app(&mut comp, &[], vec![stmt]);

    let diag = comp.compile_to_diagnostic().unwrap_err();
    assert_eq!(diag.code, messages::UNRESOLVED_TYPE.code);
    assert!(diag.message_text.contains("app/main.ts"));
}
