//! Type inference integration tests.
//!
//! Each test builds an `app/main.ts` file that declares the literal classes
//! next to its own code, runs the resolver passes and then inference.

use xlate_ast::*;
use xlate_diagnostics::CompileError;
use xlate_infer::{infer_types, InferStats, DEFAULT_MAX_SWEEPS};
use xlate_resolver::{resolve_identifiers, resolve_imports, resolve_inheritance};

/// The literal classes of a test file.
struct Fixture {
    ws: Workspace,
    pkg: PackageId,
    classes: Vec<ClassId>,
    literals: LiteralTypes,
}

/// Helper: a workspace with `TsBoolean`, `TsNumber`, `TsString`, `RegExp`,
/// `TsArray<T>`, `TsMap<V>`, `Error` and `Promise<T>`.
fn fixture() -> Fixture {
    let mut ws = Workspace::new();
    let pkg = ws.add_package("app", false);
    let class = |ws: &mut Workspace, name: &str, generic: Option<&str>| {
        let args = generic.map(|g| vec![ws.intern(g)]).unwrap_or_default();
        let id = ws.add_class(Class::new(ws.intern(name), args, true));
        (id, ws.classes[id].self_type)
    };
    let (boolean_c, boolean) = class(&mut ws, "TsBoolean", None);
    let (numeric_c, numeric) = class(&mut ws, "TsNumber", None);
    let (string_c, string) = class(&mut ws, "TsString", None);
    let (regex_c, regex) = class(&mut ws, "RegExp", None);
    let (array_c, array) = class(&mut ws, "TsArray", Some("T"));
    let (map_c, map) = class(&mut ws, "TsMap", Some("V"));
    let (error_c, error) = class(&mut ws, "Error", None);
    let (promise_c, promise) = class(&mut ws, "Promise", Some("T"));
    Fixture {
        ws,
        pkg,
        classes: vec![boolean_c, numeric_c, string_c, regex_c, array_c, map_c, error_c, promise_c],
        literals: LiteralTypes { boolean, numeric, string, regex, array, map, error, promise },
    }
}

impl Fixture {
    /// Helper: add `app/main.ts` with the literal classes, `extra` classes and
    /// `main` as its main block, then resolve.
    fn finish(&mut self, extra: &[ClassId], main: Vec<StmtId>) -> FileId {
        self.finish_with_enums(extra, &[], main)
    }

    /// Helper: like `finish`, also declaring `enums` in the file.
    fn finish_with_enums(&mut self, extra: &[ClassId], enums: &[EnumId], main: Vec<StmtId>) -> FileId {
        let mut fb = FileBuilder::new(&mut self.ws, self.pkg, "main.ts", "main");
        for &c in self.classes.iter().chain(extra) {
            fb.class(c);
        }
        for &e in enums {
            fb.enum_decl(e);
        }
        fb.main_block(Block::new(main));
        let file = fb.finish();
        self.ws.files[file].literal_types = Some(self.literals);
        resolve_imports(&mut self.ws).unwrap();
        resolve_inheritance(&mut self.ws).unwrap();
        resolve_identifiers(&mut self.ws).unwrap();
        file
    }

    fn infer(&mut self) -> Result<InferStats> {
        infer_types(&mut self.ws, DEFAULT_MAX_SWEEPS)
    }

    fn type_of(&self, expr: ExprId) -> Option<TypeId> {
        self.ws.exprs[expr].actual_type
    }
}

/// Helper: `class Animal {}` and `class Dog extends Animal {}`.
fn animal_and_dog(ws: &mut Workspace) -> (ClassId, ClassId) {
    let animal = ws.add_class(Class::new(ws.intern("Animal"), vec![], true));
    let mut dog = Class::new(ws.intern("Dog"), vec![], true);
    dog.base_class = Some(ws.classes[animal].self_type);
    let dog = ws.add_class(dog);
    (animal, dog)
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_numeric_addition() {
    let mut fx = fixture();
    let three = fx.ws.num("3");
    let four = fx.ws.num("4");
    let sum = fx.ws.binary(BinaryOp::Add, three, four);
    let stmt = fx.ws.expr_stmt(sum);
    fx.finish(&[], vec![stmt]);

    fx.infer().unwrap();
    assert_eq!(fx.type_of(sum), Some(fx.literals.numeric));
}

#[test]
fn test_string_concatenation_and_comparison() {
    let mut fx = fixture();
    let a = fx.ws.string("a");
    let b = fx.ws.string("b");
    let concat = fx.ws.binary(BinaryOp::Add, a, b);
    let one = fx.ws.num("1");
    let two = fx.ws.num("2");
    let less = fx.ws.binary(BinaryOp::Lt, one, two);
    let s1 = fx.ws.expr_stmt(concat);
    let s2 = fx.ws.expr_stmt(less);
    fx.finish(&[], vec![s1, s2]);

    fx.infer().unwrap();
    assert_eq!(fx.type_of(concat), Some(fx.literals.string));
    assert_eq!(fx.type_of(less), Some(fx.literals.boolean));
}

#[test]
fn test_mixed_operands_are_unhandled() {
    let mut fx = fixture();
    let three = fx.ws.num("3");
    let b = fx.ws.string("b");
    let sum = fx.ws.binary(BinaryOp::Add, three, b);
    let stmt = fx.ws.expr_stmt(sum);
    fx.finish(&[], vec![stmt]);

    let err = fx.infer().unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnhandledInferenceCase { plugin: "BasicTypeInfer", ref operands, .. }
            if operands == "(TsNumber, TsString)"
    ));
}

#[test]
fn test_negation_of_boolean() {
    let mut fx = fixture();
    let t = fx.ws.boolean(true);
    let not = fx.ws.unary(UnaryOp::Not, t);
    let stmt = fx.ws.expr_stmt(not);
    fx.finish(&[], vec![stmt]);

    fx.infer().unwrap();
    assert_eq!(fx.type_of(not), Some(fx.literals.boolean));
}

#[test]
fn test_null_compared_with_class_is_boolean() {
    let mut fx = fixture();
    let (animal, _) = animal_and_dog(&mut fx.ws);
    let animal_type = fx.ws.classes[animal].self_type;
    let init = fx.ws.null();
    let (decl, _) = fx.ws.var_stmt("a", Some(animal_type), Some(init));
    let a = fx.ws.ident("a");
    let null = fx.ws.null();
    let eq = fx.ws.binary(BinaryOp::Eq, a, null);
    let stmt = fx.ws.expr_stmt(eq);
    fx.finish(&[animal], vec![decl, stmt]);

    fx.infer().unwrap();
    assert_eq!(fx.type_of(eq), Some(fx.literals.boolean));
    assert_eq!(fx.type_of(init), Some(animal_type));
}

#[test]
fn test_numeric_unary_operators() {
    let mut fx = fixture();
    let numeric = fx.literals.numeric;
    let init = fx.ws.num("0");
    let (decl, _) = fx.ws.var_stmt("n", Some(numeric), Some(init));
    let one = fx.ws.num("1");
    let minus = fx.ws.unary(UnaryOp::Minus, one);
    let n1 = fx.ws.ident("n");
    let inc = fx.ws.unary(UnaryOp::Increment, n1);
    let n2 = fx.ws.ident("n");
    let dec = fx.ws.unary(UnaryOp::Decrement, n2);
    let stmts = vec![decl, fx.ws.expr_stmt(minus), fx.ws.expr_stmt(inc), fx.ws.expr_stmt(dec)];
    fx.finish(&[], stmts);

    fx.infer().unwrap();
    assert_eq!(fx.type_of(minus), Some(numeric));
    assert_eq!(fx.type_of(inc), Some(numeric));
    assert_eq!(fx.type_of(dec), Some(numeric));
}

#[test]
fn test_not_on_numeric_is_unhandled() {
    let mut fx = fixture();
    let one = fx.ws.num("1");
    let not = fx.ws.unary(UnaryOp::Not, one);
    let stmt = fx.ws.expr_stmt(not);
    fx.finish(&[], vec![stmt]);

    let err = fx.infer().unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnhandledInferenceCase { plugin: "BasicTypeInfer", ref operands, .. }
            if operands == "(TsNumber)"
    ));
}

#[test]
fn test_minus_on_string_is_unhandled() {
    let mut fx = fixture();
    let s = fx.ws.string("s");
    let minus = fx.ws.unary(UnaryOp::Minus, s);
    let stmt = fx.ws.expr_stmt(minus);
    fx.finish(&[], vec![stmt]);

    let err = fx.infer().unwrap_err();
    assert!(matches!(err, CompileError::UnhandledInferenceCase { ref operands, .. } if operands == "(TsString)"));
}

// ============================================================================
// Enums and any
// ============================================================================

/// Helper: `enum name { members... }`.
fn enum_decl(ws: &mut Workspace, name: &str, members: &[&str]) -> EnumId {
    let values = members.iter().map(|m| ws.add_enum_member(m)).collect();
    ws.add_enum(Enum::new(ws.intern(name), values, true))
}

#[test]
fn test_same_enum_equality_is_boolean() {
    let mut fx = fixture();
    let color = enum_decl(&mut fx.ws, "Color", &["Red", "Blue"]);
    let c1 = fx.ws.ident("Color");
    let red = fx.ws.prop(c1, "Red");
    let c2 = fx.ws.ident("Color");
    let blue = fx.ws.prop(c2, "Blue");
    let eq = fx.ws.binary(BinaryOp::Eq, red, blue);
    let stmt = fx.ws.expr_stmt(eq);
    fx.finish_with_enums(&[], &[color], vec![stmt]);

    fx.infer().unwrap();
    let color_type = fx.ws.enums[color].ty;
    assert_eq!(fx.type_of(red), Some(color_type));
    assert_eq!(fx.type_of(eq), Some(fx.literals.boolean));
}

#[test]
fn test_different_enum_equality_is_unhandled() {
    let mut fx = fixture();
    let color = enum_decl(&mut fx.ws, "Color", &["Red"]);
    let size = enum_decl(&mut fx.ws, "Size", &["Big"]);
    let c = fx.ws.ident("Color");
    let red = fx.ws.prop(c, "Red");
    let s = fx.ws.ident("Size");
    let big = fx.ws.prop(s, "Big");
    let eq = fx.ws.binary(BinaryOp::Eq, red, big);
    let stmt = fx.ws.expr_stmt(eq);
    fx.finish_with_enums(&[], &[color, size], vec![stmt]);

    let err = fx.infer().unwrap_err();
    assert!(matches!(err, CompileError::UnhandledInferenceCase { ref operands, .. } if operands == "(Color, Size)"));
}

/// Helper: `let name: any = null;`.
fn any_var(ws: &mut Workspace, name: &str) -> StmtId {
    let any = ws.types.any_type;
    let init = ws.null();
    ws.var_stmt(name, Some(any), Some(init)).0
}

#[test]
fn test_any_operands() {
    let mut fx = fixture();
    let any = fx.ws.types.any_type;
    let x_decl = any_var(&mut fx.ws, "x");
    let y_decl = any_var(&mut fx.ws, "y");
    let x1 = fx.ws.ident("x");
    let one = fx.ws.num("1");
    let eq = fx.ws.binary(BinaryOp::Eq, x1, one);
    let x2 = fx.ws.ident("x");
    let y = fx.ws.ident("y");
    let sum = fx.ws.binary(BinaryOp::Add, x2, y);
    let x3 = fx.ws.ident("x");
    let minus = fx.ws.unary(UnaryOp::Minus, x3);
    let stmts = vec![x_decl, y_decl, fx.ws.expr_stmt(eq), fx.ws.expr_stmt(sum), fx.ws.expr_stmt(minus)];
    fx.finish(&[], stmts);

    fx.infer().unwrap();
    assert_eq!(fx.type_of(eq), Some(fx.literals.boolean));
    assert_eq!(fx.type_of(sum), Some(any));
    assert_eq!(fx.type_of(minus), Some(any));
}

#[test]
fn test_any_plus_numeric_is_unhandled() {
    let mut fx = fixture();
    let x_decl = any_var(&mut fx.ws, "x");
    let x = fx.ws.ident("x");
    let one = fx.ws.num("1");
    let sum = fx.ws.binary(BinaryOp::Add, x, one);
    let stmt = fx.ws.expr_stmt(sum);
    fx.finish(&[], vec![x_decl, stmt]);

    let err = fx.infer().unwrap_err();
    assert!(matches!(err, CompileError::UnhandledInferenceCase { ref operands, .. } if operands == "(any, TsNumber)"));
}

// ============================================================================
// Casts, Literals and this
// ============================================================================

#[test]
fn test_cast_and_parentheses() {
    let mut fx = fixture();
    let one = fx.ws.num("1");
    let string = fx.literals.string;
    let cast = fx.ws.alloc_expr(ExprKind::Cast { expr: one, new_type: string });
    let two = fx.ws.num("2");
    let parens = fx.ws.alloc_expr(ExprKind::Parenthesized(two));
    let stmts = vec![fx.ws.expr_stmt(cast), fx.ws.expr_stmt(parens)];
    fx.finish(&[], stmts);

    fx.infer().unwrap();
    assert_eq!(fx.type_of(cast), Some(string));
    assert_eq!(fx.type_of(one), Some(fx.literals.numeric));
    assert_eq!(fx.type_of(parens), Some(fx.literals.numeric));
}

#[test]
fn test_instanceof_is_boolean() {
    let mut fx = fixture();
    let (animal, dog) = animal_and_dog(&mut fx.ws);
    let animal_type = fx.ws.classes[animal].self_type;
    let dog_type = fx.ws.classes[dog].self_type;
    let init = fx.ws.new_object(dog_type, vec![]);
    let (decl, _) = fx.ws.var_stmt("a", Some(animal_type), Some(init));
    let a = fx.ws.ident("a");
    let check = fx.ws.alloc_expr(ExprKind::InstanceOf { expr: a, check_type: dog_type });
    let stmt = fx.ws.expr_stmt(check);
    fx.finish(&[animal, dog], vec![decl, stmt]);

    fx.infer().unwrap();
    assert_eq!(fx.type_of(check), Some(fx.literals.boolean));
}

#[test]
fn test_regex_and_template_literals() {
    let mut fx = fixture();
    let regex = fx.ws.alloc_expr(ExprKind::RegexLiteral {
        pattern: "a+".to_string(),
        modifiers: "g".to_string(),
    });
    let one = fx.ws.num("1");
    let template = fx.ws.alloc_expr(ExprKind::TemplateString(vec![
        TemplatePart::Literal("n = ".to_string()),
        TemplatePart::Expr(one),
    ]));
    let stmts = vec![fx.ws.expr_stmt(regex), fx.ws.expr_stmt(template)];
    fx.finish(&[], stmts);

    fx.infer().unwrap();
    assert_eq!(fx.type_of(regex), Some(fx.literals.regex));
    assert_eq!(fx.type_of(template), Some(fx.literals.string));
    assert_eq!(fx.type_of(one), Some(fx.literals.numeric));
}

#[test]
fn test_this_has_bare_generic_self_type() {
    let mut fx = fixture();
    let box_c = generic_box(&mut fx.ws);
    let this = fx.ws.this_expr();
    let ret = fx.ws.return_stmt(Some(this));
    let self_type = fx.ws.classes[box_c].self_type;
    let me = fx.ws.add_method(Method::new(fx.ws.intern("me"), vec![], Some(Block::new(vec![ret])), self_type));
    fx.ws.classes[box_c].methods.push(me);
    fx.finish(&[box_c], vec![]);

    fx.infer().unwrap();
    let t_name = fx.ws.intern("T");
    let t = fx.ws.types.generic(t_name);
    assert_eq!(fx.type_of(this), Some(self_type));
    assert_eq!(fx.ws.types.type_args(self_type), &[t]);
    assert!(matches!(fx.ws.exprs[this].kind, ExprKind::Reference(Reference::This(c)) if c == box_c));
}

// ============================================================================
// Conditional and Coalesce
// ============================================================================

#[test]
fn test_conditional_null_branch_takes_other_type() {
    let mut fx = fixture();
    let cond = fx.ws.boolean(true);
    let x = fx.ws.num("1");
    let null = fx.ws.null();
    let expr = fx.ws.conditional(cond, x, null);
    let stmt = fx.ws.expr_stmt(expr);
    fx.finish(&[], vec![stmt]);

    let stats = fx.infer().unwrap();
    assert_eq!(fx.type_of(expr), Some(fx.literals.numeric));
    assert_eq!(fx.type_of(null), Some(fx.literals.numeric));
    assert!(stats.sweeps >= 2);
}

#[test]
fn test_conditional_of_two_nulls_is_unresolved() {
    let mut fx = fixture();
    let cond = fx.ws.boolean(true);
    let n1 = fx.ws.null();
    let n2 = fx.ws.null();
    let expr = fx.ws.conditional(cond, n1, n2);
    let stmt = fx.ws.expr_stmt(expr);
    fx.finish(&[], vec![stmt]);

    let err = fx.infer().unwrap_err();
    assert!(matches!(err, CompileError::UnresolvedType { ref file, .. } if file == "app/main.ts"));
}

#[test]
fn test_conditional_branch_mismatch() {
    let mut fx = fixture();
    let cond = fx.ws.boolean(true);
    let x = fx.ws.num("1");
    let y = fx.ws.string("y");
    let expr = fx.ws.conditional(cond, x, y);
    let stmt = fx.ws.expr_stmt(expr);
    fx.finish(&[], vec![stmt]);

    let err = fx.infer().unwrap_err();
    assert_eq!(
        err,
        CompileError::BranchTypeMismatch {
            expr: "true ? 1 : \"y\"".to_string(),
            when_true: "TsNumber".to_string(),
            when_false: "TsString".to_string(),
        }
    );
}

#[test]
fn test_coalesce_keeps_default_type() {
    let mut fx = fixture();
    let numeric = fx.literals.numeric;
    let init = fx.ws.null();
    let (decl, _) = fx.ws.var_stmt("x", Some(numeric), Some(init));
    let x = fx.ws.ident("x");
    let one = fx.ws.num("1");
    let expr = fx.ws.coalesce(x, one);
    let stmt = fx.ws.expr_stmt(expr);
    fx.finish(&[], vec![decl, stmt]);

    fx.infer().unwrap();
    assert_eq!(fx.type_of(expr), Some(numeric));
}

#[test]
fn test_coalesce_type_mismatch() {
    let mut fx = fixture();
    let numeric = fx.literals.numeric;
    let init = fx.ws.null();
    let (decl, _) = fx.ws.var_stmt("x", Some(numeric), Some(init));
    let x = fx.ws.ident("x");
    let s = fx.ws.string("s");
    let expr = fx.ws.coalesce(x, s);
    let stmt = fx.ws.expr_stmt(expr);
    fx.finish(&[], vec![decl, stmt]);

    let err = fx.infer().unwrap_err();
    assert!(matches!(
        err,
        CompileError::CoalesceTypeMismatch { ref default, ref if_null, .. }
            if default == "TsNumber" && if_null == "TsString"
    ));
}

// ============================================================================
// Assignment
// ============================================================================

#[test]
fn test_derived_instance_assignable_to_base() {
    let mut fx = fixture();
    let (animal, dog) = animal_and_dog(&mut fx.ws);
    let animal_type = fx.ws.classes[animal].self_type;
    let dog_type = fx.ws.classes[dog].self_type;
    let init = fx.ws.null();
    let (decl, _) = fx.ws.var_stmt("a", Some(animal_type), Some(init));
    let a = fx.ws.ident("a");
    let new_dog = fx.ws.new_object(dog_type, vec![]);
    let assign = fx.ws.binary(BinaryOp::Assign, a, new_dog);
    let stmt = fx.ws.expr_stmt(assign);
    fx.finish(&[animal, dog], vec![decl, stmt]);

    fx.infer().unwrap();
    assert_eq!(fx.type_of(new_dog), Some(dog_type));
    assert_eq!(fx.type_of(assign), Some(animal_type));
}

#[test]
fn test_unrelated_assignment_is_a_mismatch() {
    let mut fx = fixture();
    let (animal, _) = animal_and_dog(&mut fx.ws);
    let car = fx.ws.add_class(Class::new(fx.ws.intern("Car"), vec![], true));
    let animal_type = fx.ws.classes[animal].self_type;
    let car_type = fx.ws.classes[car].self_type;
    let init = fx.ws.null();
    let (decl, _) = fx.ws.var_stmt("a", Some(animal_type), Some(init));
    let a = fx.ws.ident("a");
    let new_car = fx.ws.new_object(car_type, vec![]);
    let assign = fx.ws.binary(BinaryOp::Assign, a, new_car);
    let stmt = fx.ws.expr_stmt(assign);
    fx.finish(&[animal, car], vec![decl, stmt]);

    let err = fx.infer().unwrap_err();
    assert_eq!(
        err,
        CompileError::TypeMismatch {
            expr: "a = new Car()".to_string(),
            left: "Animal".to_string(),
            right: "Car".to_string(),
        }
    );
}

// ============================================================================
// Members and Calls
// ============================================================================

/// Helper: `class Box<T> { value: T; get(): T; }`.
fn generic_box(ws: &mut Workspace) -> ClassId {
    let t = ws.intern("T");
    let generic_t = ws.types.generic(t);
    let value = ws.add_field(Field::new(ws.intern("value"), generic_t, None));
    let get = ws.add_method(Method::new(ws.intern("get"), vec![], None, generic_t));
    let mut cls = Class::new(ws.intern("Box"), vec![t], true);
    cls.fields.push(value);
    cls.methods.push(get);
    ws.add_class(cls)
}

#[test]
fn test_generic_member_access_and_call() {
    let mut fx = fixture();
    let box_c = generic_box(&mut fx.ws);
    let numeric = fx.literals.numeric;
    let box_of_number = fx.ws.types.class(box_c, vec![numeric]);
    let init = fx.ws.null();
    let (decl, _) = fx.ws.var_stmt("b", Some(box_of_number), Some(init));

    let b1 = fx.ws.ident("b");
    let value = fx.ws.prop(b1, "value");
    let b2 = fx.ws.ident("b");
    let get = fx.ws.prop(b2, "get");
    let call = fx.ws.call(get, vec![]);
    let sum = fx.ws.binary(BinaryOp::Add, value, call);
    let stmt = fx.ws.expr_stmt(sum);
    fx.finish(&[box_c], vec![decl, stmt]);

    let stats = fx.infer().unwrap();
    assert_eq!(fx.type_of(value), Some(numeric));
    assert_eq!(fx.type_of(call), Some(numeric));
    assert_eq!(fx.type_of(sum), Some(numeric));
    assert!(matches!(
        fx.ws.exprs[value].kind,
        ExprKind::Reference(Reference::InstanceField { .. })
    ));
    assert!(matches!(fx.ws.exprs[call].kind, ExprKind::InstanceMethodCall { object, .. } if object == b2));
    assert_eq!(stats.typed_by.get("CallResolver"), Some(&1));
}

#[test]
fn test_unknown_member_fails() {
    let mut fx = fixture();
    let (animal, _) = animal_and_dog(&mut fx.ws);
    let animal_type = fx.ws.classes[animal].self_type;
    let init = fx.ws.null();
    let (decl, _) = fx.ws.var_stmt("a", Some(animal_type), Some(init));
    let a = fx.ws.ident("a");
    let legs = fx.ws.prop(a, "legs");
    let stmt = fx.ws.expr_stmt(legs);
    fx.finish(&[animal], vec![decl, stmt]);

    let err = fx.infer().unwrap_err();
    assert_eq!(
        err,
        CompileError::MemberNotFound { member: "legs".to_string(), owner: "Animal".to_string() }
    );
}

#[test]
fn test_lambda_call_infers_return_type() {
    let mut fx = fixture();
    let numeric = fx.literals.numeric;
    let n = fx.ws.add_param(Param::new(fx.ws.intern("n"), Some(numeric)));
    let n_ref = fx.ws.ident("n");
    let one = fx.ws.num("1");
    let body_sum = fx.ws.binary(BinaryOp::Add, n_ref, one);
    let ret = fx.ws.return_stmt(Some(body_sum));
    let lambda = fx.ws.add_lambda(Lambda::new(vec![n], Block::new(vec![ret]), None));
    let lambda_expr = fx.ws.alloc_expr(ExprKind::Lambda(lambda));
    let (decl, f) = fx.ws.var_stmt("f", None, Some(lambda_expr));
    let f_ref = fx.ws.ident("f");
    let two = fx.ws.num("2");
    let call = fx.ws.call(f_ref, vec![two]);
    let stmt = fx.ws.expr_stmt(call);
    fx.finish(&[], vec![decl, stmt]);

    fx.infer().unwrap();
    let lambda_type = fx.ws.types.lambda(vec![numeric], numeric);
    assert_eq!(fx.ws.variables[f].ty, Some(lambda_type));
    assert_eq!(fx.ws.lambdas[lambda].returns, Some(numeric));
    assert_eq!(fx.type_of(call), Some(numeric));
    assert!(matches!(fx.ws.exprs[call].kind, ExprKind::LambdaCall { .. }));
}

// ============================================================================
// Declarations and Collections
// ============================================================================

#[test]
fn test_foreach_variable_takes_element_type() {
    let mut fx = fixture();
    let one = fx.ws.num("1");
    let two = fx.ws.num("2");
    let items = fx.ws.alloc_expr(ExprKind::ArrayLiteral(vec![one, two]));
    let (decl, xs) = fx.ws.var_stmt("xs", None, Some(items));

    let x = fx.ws.add_variable(VariableDecl::new(fx.ws.intern("x"), VariableKind::Foreach, None, None));
    let x_ref = fx.ws.ident("x");
    let three = fx.ws.num("3");
    let sum = fx.ws.binary(BinaryOp::Add, x_ref, three);
    let body = fx.ws.expr_stmt(sum);
    let xs_ref = fx.ws.ident("xs");
    let foreach = fx.ws.alloc_stmt(StmtKind::Foreach { var: x, items: xs_ref, body: Block::new(vec![body]) });
    fx.finish(&[], vec![decl, foreach]);

    fx.infer().unwrap();
    let numeric = fx.literals.numeric;
    let array_class = fx.ws.types.class_decl(fx.literals.array).unwrap();
    let array_of_number = fx.ws.types.class(array_class, vec![numeric]);
    assert_eq!(fx.ws.variables[xs].ty, Some(array_of_number));
    assert_eq!(fx.ws.variables[x].ty, Some(numeric));
    assert_eq!(fx.type_of(sum), Some(numeric));
}

#[test]
fn test_empty_array_without_context_is_any() {
    let mut fx = fixture();
    let items = fx.ws.alloc_expr(ExprKind::ArrayLiteral(vec![]));
    let stmt = fx.ws.expr_stmt(items);
    fx.finish(&[], vec![stmt]);

    fx.infer().unwrap();
    let array_class = fx.ws.types.class_decl(fx.literals.array).unwrap();
    let any = fx.ws.types.any_type;
    let array_of_any = fx.ws.types.class(array_class, vec![any]);
    assert_eq!(fx.type_of(items), Some(array_of_any));
}

#[test]
fn test_missing_literal_types_fails() {
    let mut ws = Workspace::new();
    let pkg = ws.add_package("app", false);
    let one = ws.num("1");
    let stmt = ws.expr_stmt(one);
    let mut fb = FileBuilder::new(&mut ws, pkg, "main.ts", "main");
    fb.main_block(Block::new(vec![stmt]));
    fb.finish();

    let err = infer_types(&mut ws, DEFAULT_MAX_SWEEPS).unwrap_err();
    assert_eq!(err, CompileError::MissingLiteralTypes { file: "app/main.ts".to_string() });
}
