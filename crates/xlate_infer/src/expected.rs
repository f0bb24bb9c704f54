//! Contextual (expected) types.
//!
//! Before an expression's children are typed, the types its context already
//! knows are pushed down as expected types: assignment and equality operands,
//! conditional branches, the null-coalescing fallback, call arguments,
//! collection items and lambda parameters. An expected type is set once and
//! never overwritten, and an ambiguous or generic type is never pushed.

use crate::signature::bound_parameters;
use xlate_ast::{ExprId, ExprKind, LiteralTypes, TypeId, TypeKind, Workspace};

/// Set `expected` on `expr` if it has none. Returns whether anything changed.
pub fn set_expected(ws: &mut Workspace, expr: ExprId, expected: Option<TypeId>) -> bool {
    let Some(ty) = expected else {
        return false;
    };
    if ws.types.is_ambiguous(ty) || ws.types.contains_generic(ty) || ws.exprs[expr].expected_type.is_some() {
        return false;
    }
    ws.exprs[expr].expected_type = Some(ty);
    true
}

/// Push the types known at `expr` down to its direct children.
///
/// Returns the number of expected types (and lambda parameter types) set.
pub fn propagate_expected(ws: &mut Workspace, expr: ExprId, literals: &LiteralTypes) -> usize {
    let expected = ws.exprs[expr].expected_type;
    let actual = |ws: &Workspace, e: ExprId| ws.exprs[e].actual_type;
    let mut changed = 0;
    let set = |ws: &mut Workspace, e: ExprId, ty: Option<TypeId>| usize::from(set_expected(ws, e, ty));

    match ws.exprs[expr].kind.clone() {
        ExprKind::Binary { op, left, right } => {
            let (left_type, right_type) = (actual(ws, left), actual(ws, right));
            if op.is_assignment() {
                changed += set(ws, right, left_type);
            } else if op.is_equality() {
                changed += set(ws, right, left_type);
                changed += set(ws, left, right_type);
            }
        }
        ExprKind::Conditional { when_true, when_false, .. } => {
            let (true_type, false_type) = (actual(ws, when_true), actual(ws, when_false));
            changed += set(ws, when_true, expected);
            changed += set(ws, when_false, expected);
            changed += set(ws, when_false, true_type);
            changed += set(ws, when_true, false_type);
        }
        ExprKind::NullCoalesce { default_expr, expr_if_null } => {
            let default_type = actual(ws, default_expr);
            changed += set(ws, default_expr, expected);
            changed += set(ws, expr_if_null, default_type);
        }
        ExprKind::Parenthesized(inner) => changed += set(ws, inner, expected),
        ExprKind::ArrayLiteral(items) => {
            let item = expected.and_then(|t| collection_item(ws, t, literals.array));
            for i in items {
                changed += set(ws, i, item);
            }
        }
        ExprKind::MapLiteral(items) => {
            let value = expected.and_then(|t| collection_item(ws, t, literals.map));
            for (_, v) in items {
                changed += set(ws, v, value);
            }
        }
        ExprKind::New { .. }
        | ExprKind::InstanceMethodCall { .. }
        | ExprKind::StaticMethodCall { .. }
        | ExprKind::GlobalFunctionCall { .. }
        | ExprKind::LambdaCall { .. } => {
            for (arg, ty) in bound_parameters(ws, expr) {
                changed += set(ws, arg, Some(ty));
            }
        }
        ExprKind::Lambda(lambda) => {
            if let Some(TypeKind::Lambda { params, .. }) = expected.map(|t| ws.types.get(t).clone()) {
                let declared = ws.lambdas[lambda].parameters.clone();
                for (p, ty) in declared.into_iter().zip(params) {
                    if ws.params[p].ty.is_none() && !ws.types.contains_generic(ty) {
                        ws.params[p].ty = Some(ty);
                        changed += 1;
                    }
                }
            }
        }
        _ => {}
    }
    changed
}

/// Element (last generic argument) of a collection type whose declaration
/// matches the configured literal collection class.
pub fn collection_item(ws: &Workspace, ty: TypeId, literal: TypeId) -> Option<TypeId> {
    let decl = ws.types.class_decl(ty)?;
    if Some(decl) != ws.types.class_decl(literal) {
        return None;
    }
    ws.types.type_args(ty).last().copied()
}
