//! Literals, operators and local references.
//!
//! Operator results are only defined for the operand pairings listed in
//! [`BasicTypeInfer::binary_type`] and [`BasicTypeInfer::unary_type`];
//! anything else is reported as an unhandled inference case.

use crate::plugin::{InferContext, InferTypesPlugin};
use tracing::trace;
use xlate_ast::display::{expr_repr, type_repr};
use xlate_ast::relations::{is_assignable_to, types_equal};
use xlate_ast::{BinaryOp, ExprId, ExprKind, Reference, Result, TypeId, TypeKind, UnaryOp, Workspace};
use xlate_diagnostics::CompileError;

const NAME: &str = "BasicTypeInfer";

pub struct BasicTypeInfer;

impl InferTypesPlugin for BasicTypeInfer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_detect_type(&self, _ws: &Workspace, _expr: ExprId) -> bool {
        true
    }

    fn detect_type(&mut self, ctx: &mut InferContext<'_>, expr: ExprId) -> Result<bool> {
        let lit = ctx.literals;
        let ty = match ctx.ws.exprs[expr].kind.clone() {
            ExprKind::Cast { new_type, .. } => new_type,
            ExprKind::Parenthesized(inner) => return Ok(self.copy_type(ctx, expr, inner)),
            ExprKind::Reference(Reference::This(c) | Reference::StaticThis(c) | Reference::Super(c)) => {
                ctx.ws.classes[c].self_type
            }
            ExprKind::Reference(Reference::MethodParameter(p)) => match ctx.ws.params[p].ty {
                Some(t) => t,
                None => return Ok(false),
            },
            ExprKind::Reference(Reference::Variable(v)) => match ctx.ws.variables[v].ty {
                Some(t) => t,
                None => return Ok(false),
            },
            ExprKind::BooleanLiteral(_) | ExprKind::InstanceOf { .. } => lit.boolean,
            ExprKind::NumericLiteral(_) => lit.numeric,
            ExprKind::StringLiteral(_) | ExprKind::TemplateString(_) => lit.string,
            ExprKind::RegexLiteral { .. } => lit.regex,
            ExprKind::NullLiteral => match ctx.expected_type(expr) {
                Some(t) => t,
                None if ctx.relaxed => ctx.ws.types.ambiguous_type,
                None => return Ok(false),
            },
            ExprKind::Unary { op, operand, .. } => self.unary_type(ctx, expr, op, operand)?,
            ExprKind::Binary { op, left, right } => self.binary_type(ctx, expr, op, left, right)?,
            ExprKind::Conditional { when_true, when_false, .. } => {
                self.conditional_type(ctx, expr, when_true, when_false)?
            }
            ExprKind::NullCoalesce { default_expr, expr_if_null } => {
                self.coalesce_type(ctx, expr, default_expr, expr_if_null)?
            }
            _ => return Ok(false),
        };
        Ok(ctx.set_type(expr, ty))
    }
}

impl BasicTypeInfer {
    fn copy_type(&self, ctx: &mut InferContext<'_>, expr: ExprId, from: ExprId) -> bool {
        match ctx.type_of(from) {
            Some(t) => ctx.set_type(expr, t),
            None => false,
        }
    }

    fn operand_types(&self, ctx: &InferContext<'_>, expr: ExprId, operands: &[ExprId]) -> Result<Vec<TypeId>> {
        operands
            .iter()
            .map(|o| ctx.type_of(*o).ok_or_else(|| ctx.unhandled(NAME, expr, operands)))
            .collect()
    }

    fn is_literal_class(&self, ctx: &InferContext<'_>, ty: TypeId, literal: TypeId) -> bool {
        let types = &ctx.ws.types;
        matches!(types.get(ty), TypeKind::Class { .. }) && types.class_decl(ty) == types.class_decl(literal)
    }

    /// `-num`, `!bool`, `++num`, `--num`; an `any` operand stays `any`.
    fn unary_type(&self, ctx: &InferContext<'_>, expr: ExprId, op: UnaryOp, operand: ExprId) -> Result<TypeId> {
        let operand_type = self.operand_types(ctx, expr, &[operand])?[0];
        let lit = ctx.literals;
        let result = match ctx.ws.types.get(operand_type) {
            TypeKind::Any => Some(ctx.ws.types.any_type),
            TypeKind::Class { .. } => match op {
                UnaryOp::Minus | UnaryOp::Increment | UnaryOp::Decrement
                    if self.is_literal_class(ctx, operand_type, lit.numeric) =>
                {
                    Some(lit.numeric)
                }
                UnaryOp::Not if self.is_literal_class(ctx, operand_type, lit.boolean) => Some(lit.boolean),
                _ => None,
            },
            _ => None,
        };
        result.ok_or_else(|| ctx.unhandled(NAME, expr, &[operand]))
    }

    fn binary_type(
        &self,
        ctx: &InferContext<'_>,
        expr: ExprId,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    ) -> Result<TypeId> {
        let types = self.operand_types(ctx, expr, &[left, right])?;
        let (left_type, right_type) = (types[0], types[1]);
        let ws = &*ctx.ws;
        let lit = ctx.literals;

        if op == BinaryOp::Assign {
            if is_assignable_to(ws, right_type, left_type)? {
                return Ok(left_type);
            }
            return Err(CompileError::TypeMismatch {
                expr: expr_repr(ws, expr),
                left: type_repr(ws, left_type),
                right: type_repr(ws, right_type),
            });
        }

        let is_eq = op.is_equality();
        let (lk, rk) = (ws.types.get(left_type), ws.types.get(right_type));
        let result = match (lk, rk) {
            (TypeKind::Any, _) | (_, TypeKind::Any) if is_eq => Some(lit.boolean),
            (TypeKind::Class { decl: l, .. }, TypeKind::Class { decl: r, .. }) => {
                let both = |literal: TypeId| {
                    let decl = ws.types.class_decl(literal);
                    Some(*l) == decl && Some(*r) == decl
                };
                let arithmetic = matches!(
                    op,
                    BinaryOp::Sub | BinaryOp::Add | BinaryOp::SubAssign | BinaryOp::AddAssign | BinaryOp::Mod
                );
                let comparison = matches!(op, BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge);
                if both(lit.numeric) && arithmetic {
                    Some(lit.numeric)
                } else if both(lit.numeric) && comparison {
                    Some(lit.boolean)
                } else if both(lit.string) && matches!(op, BinaryOp::Add | BinaryOp::AddAssign) {
                    Some(lit.string)
                } else if both(lit.boolean) && matches!(op, BinaryOp::Or | BinaryOp::And) {
                    Some(lit.boolean)
                } else if l == r && is_eq {
                    Some(lit.boolean)
                } else {
                    None
                }
            }
            (TypeKind::Class { .. } | TypeKind::Interface { .. }, _)
                if is_eq && ws.exprs[right].is_null_literal() =>
            {
                Some(lit.boolean)
            }
            (TypeKind::Enum { decl: l }, TypeKind::Enum { decl: r }) if l == r && is_eq => Some(lit.boolean),
            (TypeKind::Any, TypeKind::Any) => Some(ws.types.any_type),
            _ => None,
        };
        trace!(op = op.as_str(), resolved = result.is_some(), "binary operator");
        result.ok_or_else(|| ctx.unhandled(NAME, expr, &[left, right]))
    }

    /// Equal branch types, or the other branch's type when one is a bare `null`.
    fn conditional_type(
        &self,
        ctx: &InferContext<'_>,
        expr: ExprId,
        when_true: ExprId,
        when_false: ExprId,
    ) -> Result<TypeId> {
        let types = self.operand_types(ctx, expr, &[when_true, when_false])?;
        let (true_type, false_type) = (types[0], types[1]);
        let ws = &*ctx.ws;
        if types_equal(true_type, false_type) {
            Ok(true_type)
        } else if ws.exprs[when_true].is_null_literal() {
            Ok(false_type)
        } else if ws.exprs[when_false].is_null_literal() {
            Ok(true_type)
        } else {
            Err(CompileError::BranchTypeMismatch {
                expr: expr_repr(ws, expr),
                when_true: type_repr(ws, true_type),
                when_false: type_repr(ws, false_type),
            })
        }
    }

    /// The fallback must be assignable to the default; the result is the default's type.
    fn coalesce_type(
        &self,
        ctx: &InferContext<'_>,
        expr: ExprId,
        default_expr: ExprId,
        expr_if_null: ExprId,
    ) -> Result<TypeId> {
        let types = self.operand_types(ctx, expr, &[default_expr, expr_if_null])?;
        let (default_type, if_null_type) = (types[0], types[1]);
        let ws = &*ctx.ws;
        if is_assignable_to(ws, if_null_type, default_type)? {
            Ok(default_type)
        } else {
            Err(CompileError::CoalesceTypeMismatch {
                expr: expr_repr(ws, expr),
                default: type_repr(ws, default_type),
                if_null: type_repr(ws, if_null_type),
            })
        }
    }
}
