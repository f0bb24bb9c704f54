//! Object construction, collection literals and lambdas.

use crate::expected::collection_item;
use crate::plugin::{InferContext, InferTypesPlugin};
use xlate_ast::{Block, ExprId, ExprKind, Result, StmtKind, TypeId, TypeKind, Workspace};

pub struct CompositeTypeInfer;

impl InferTypesPlugin for CompositeTypeInfer {
    fn name(&self) -> &'static str {
        "CompositeTypeInfer"
    }

    fn can_detect_type(&self, ws: &Workspace, expr: ExprId) -> bool {
        matches!(
            ws.exprs[expr].kind,
            ExprKind::New { .. } | ExprKind::ArrayLiteral(_) | ExprKind::MapLiteral(_) | ExprKind::Lambda(_)
        )
    }

    fn detect_type(&mut self, ctx: &mut InferContext<'_>, expr: ExprId) -> Result<bool> {
        let lit = ctx.literals;
        let expected = ctx.expected_type(expr);
        let ty = match ctx.ws.exprs[expr].kind.clone() {
            ExprKind::New { cls, .. } => Some(cls),
            ExprKind::ArrayLiteral(items) => {
                let item = items.first().map(|first| ctx.type_of(*first));
                self.collection_type(ctx, expected, lit.array, item)
            }
            ExprKind::MapLiteral(items) => {
                let value = items.first().map(|(_, first)| ctx.type_of(*first));
                self.collection_type(ctx, expected, lit.map, value)
            }
            ExprKind::Lambda(lambda) => {
                let ws = &mut *ctx.ws;
                let params: Option<Vec<TypeId>> =
                    ws.lambdas[lambda].parameters.iter().map(|p| ws.params[*p].ty).collect();
                let expected_returns = match expected.map(|t| ws.types.get(t)) {
                    Some(TypeKind::Lambda { returns, .. }) => Some(*returns),
                    _ => None,
                };
                let returns = match ws.lambdas[lambda].returns.or(expected_returns) {
                    Some(r) => Some(r),
                    None => match first_return_value(ws, &ws.lambdas[lambda].body) {
                        Some(value) => ws.exprs[value].actual_type,
                        None => Some(ws.types.void_type),
                    },
                };
                match (params, returns) {
                    (Some(params), Some(returns)) => {
                        ws.lambdas[lambda].returns.get_or_insert(returns);
                        Some(ws.types.lambda(params, returns))
                    }
                    _ => None,
                }
            }
            _ => None,
        };
        Ok(match ty {
            Some(ty) => ctx.set_type(expr, ty),
            None => false,
        })
    }
}

impl CompositeTypeInfer {
    /// The expected collection type if it matches, else one built from the
    /// first item. An empty literal without context is `any`-typed on a
    /// relaxed sweep.
    fn collection_type(
        &self,
        ctx: &mut InferContext<'_>,
        expected: Option<TypeId>,
        literal: TypeId,
        first_item: Option<Option<TypeId>>,
    ) -> Option<TypeId> {
        if let Some(t) = expected.filter(|t| collection_item(ctx.ws, *t, literal).is_some()) {
            return Some(t);
        }
        let item = match first_item {
            Some(Some(t)) => t,
            Some(None) => return None,
            None if ctx.relaxed => ctx.ws.types.any_type,
            None => return None,
        };
        let decl = ctx.ws.types.class_decl(literal)?;
        let args = match ctx.ws.types.type_args(literal).len() {
            0 => Vec::new(),
            1 => vec![item],
            _ => vec![ctx.literals.string, item],
        };
        Some(ctx.ws.types.class(decl, args))
    }
}

/// Value of the first `return <expr>` in `block`, outside nested lambdas.
fn first_return_value(ws: &Workspace, block: &Block) -> Option<ExprId> {
    block.statements.iter().find_map(|stmt| match &ws.stmts[*stmt].kind {
        StmtKind::Return(value) => *value,
        StmtKind::If { then, else_, .. } => {
            first_return_value(ws, then).or_else(|| else_.as_ref().and_then(|b| first_return_value(ws, b)))
        }
        StmtKind::While { body, .. } | StmtKind::For { body, .. } | StmtKind::Foreach { body, .. } => {
            first_return_value(ws, body)
        }
        StmtKind::Block(b) => first_return_value(ws, b),
        StmtKind::Try { try_body, catch_body, finally_body, .. } => first_return_value(ws, try_body)
            .or_else(|| catch_body.as_ref().and_then(|b| first_return_value(ws, b)))
            .or_else(|| finally_body.as_ref().and_then(|b| first_return_value(ws, b))),
        StmtKind::Expression(_)
        | StmtKind::Variable(_)
        | StmtKind::Throw(_)
        | StmtKind::Break
        | StmtKind::Continue => None,
    })
}
