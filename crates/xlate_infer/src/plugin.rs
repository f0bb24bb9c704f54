//! The plugin interface of the inference engine.

use xlate_ast::display::{expr_repr, types_repr};
use xlate_ast::{ExprId, FileId, LiteralTypes, TypeId, Workspace};
use xlate_diagnostics::CompileError;

/// State a plugin sees while typing one expression.
pub struct InferContext<'a> {
    pub ws: &'a mut Workspace,
    /// File of the code unit being swept.
    pub file: FileId,
    pub literals: LiteralTypes,
    /// Set on a sweep that lets an unconstrained `null` become ambiguous.
    pub relaxed: bool,
}

impl InferContext<'_> {
    pub fn type_of(&self, expr: ExprId) -> Option<TypeId> {
        self.ws.exprs[expr].actual_type
    }

    pub fn expected_type(&self, expr: ExprId) -> Option<TypeId> {
        self.ws.exprs[expr].expected_type
    }

    /// Assign the actual type of `expr`. Always returns `true` so a plugin
    /// can end with `Ok(ctx.set_type(..))`.
    pub fn set_type(&mut self, expr: ExprId, ty: TypeId) -> bool {
        self.ws.exprs[expr].actual_type = Some(ty);
        true
    }

    /// The error for an operator/type combination no rule covers.
    pub fn unhandled(&self, plugin: &'static str, expr: ExprId, operands: &[ExprId]) -> CompileError {
        CompileError::UnhandledInferenceCase {
            plugin,
            expr: expr_repr(self.ws, expr),
            operands: format!("({})", types_repr(self.ws, operands)),
        }
    }
}

/// One strategy of the inference pipeline.
///
/// The engine offers an untyped expression to each plugin in order. A plugin
/// whose `can_detect_type` accepts the node either types it and returns
/// `Ok(true)`, or returns `Ok(false)` to let the next plugin try. Plugins
/// may rewrite the node's kind in place (an unresolved call becomes a
/// method call) as long as they type it in the same step.
pub trait InferTypesPlugin {
    fn name(&self) -> &'static str;

    fn can_detect_type(&self, ws: &Workspace, expr: ExprId) -> bool;

    fn detect_type(&mut self, ctx: &mut InferContext<'_>, expr: ExprId) -> xlate_ast::Result<bool>;
}
