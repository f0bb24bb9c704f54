//! Call resolution.
//!
//! An unresolved call is rewritten into a static method, instance method,
//! global function or lambda call once its callee can be classified, and
//! typed in the same step. Methods are matched by name and argument count
//! on the receiver's declaration, then its ancestors. A call through an
//! `any` receiver stays unresolved and is typed `any`.

use crate::generics::{call_map, find_member};
use crate::plugin::{InferContext, InferTypesPlugin};
use crate::signature::receiver_type;
use tracing::trace;
use xlate_ast::display::type_repr;
use xlate_ast::relations::is_lambda;
use xlate_ast::{
    ExprId, ExprKind, Importable, InterfaceLike, MethodId, Reference, Result, TypeId, TypeKind, Workspace,
};
use xlate_core::Name;
use xlate_diagnostics::CompileError;

const NAME: &str = "CallResolver";

pub struct CallResolver;

enum Resolution {
    Rewritten,
    /// The callee is `any`: the call stays unresolved.
    Dynamic,
    /// The callee is not typed yet.
    Pending,
}

impl InferTypesPlugin for CallResolver {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_detect_type(&self, ws: &Workspace, expr: ExprId) -> bool {
        matches!(
            ws.exprs[expr].kind,
            ExprKind::UnresolvedCall { .. }
                | ExprKind::InstanceMethodCall { .. }
                | ExprKind::StaticMethodCall { .. }
                | ExprKind::GlobalFunctionCall { .. }
                | ExprKind::LambdaCall { .. }
        )
    }

    fn detect_type(&mut self, ctx: &mut InferContext<'_>, expr: ExprId) -> Result<bool> {
        if let ExprKind::UnresolvedCall { func, type_args, args } = ctx.ws.exprs[expr].kind.clone() {
            match self.resolve(ctx, expr, func, type_args, args)? {
                Resolution::Rewritten => {}
                Resolution::Pending => return Ok(false),
                Resolution::Dynamic => {
                    let any = ctx.ws.types.any_type;
                    if ctx.type_of(func).is_none() {
                        ctx.set_type(func, any);
                    }
                    return Ok(ctx.set_type(expr, any));
                }
            }
        }
        match call_type(ctx.ws, expr) {
            Some(ty) => Ok(ctx.set_type(expr, ty)),
            None => Ok(false),
        }
    }
}

impl CallResolver {
    fn resolve(
        &self,
        ctx: &mut InferContext<'_>,
        expr: ExprId,
        func: ExprId,
        type_args: Vec<TypeId>,
        args: Vec<ExprId>,
    ) -> Result<Resolution> {
        let ws = &mut *ctx.ws;
        let resolved = match ws.exprs[func].kind.clone() {
            ExprKind::PropertyAccess { object, name } => match ws.exprs[object].as_reference().copied() {
                Some(Reference::Class(c) | Reference::StaticThis(c)) => {
                    let Some(method) = find_method(ws, InterfaceLike::Class(c), name, args.len(), true)? else {
                        return Err(CompileError::MemberNotFound {
                            member: ws.names.resolve(name).to_string(),
                            owner: ws.symbol_id(Importable::Class(c)),
                        });
                    };
                    ExprKind::StaticMethodCall { method, type_args, args }
                }
                _ => {
                    let Some(receiver) = receiver_type(ws, object) else {
                        return Ok(Resolution::Pending);
                    };
                    if ws.types.is_any(receiver) {
                        return Ok(Resolution::Dynamic);
                    }
                    let method = match ws.interface_like_of(receiver) {
                        Some(decl) => find_method(ws, decl, name, args.len(), false)?,
                        None => None,
                    };
                    let Some(method) = method else {
                        return Err(CompileError::MemberNotFound {
                            member: ws.names.resolve(name).to_string(),
                            owner: type_repr(ws, receiver),
                        });
                    };
                    ExprKind::InstanceMethodCall { object, method, type_args, args }
                }
            },
            ExprKind::Reference(Reference::GlobalFunction(f)) => ExprKind::GlobalFunctionCall { func: f, args },
            _ => {
                let Some(callee) = ws.exprs[func].actual_type else {
                    return Ok(Resolution::Pending);
                };
                if ws.types.is_any(callee) {
                    return Ok(Resolution::Dynamic);
                }
                if !is_lambda(ws, callee) {
                    return Err(ctx.unhandled(NAME, expr, &[func]));
                }
                ExprKind::LambdaCall { lambda: func, args }
            }
        };
        trace!(?expr, "resolved call");
        ctx.ws.exprs[expr].kind = resolved;
        Ok(Resolution::Rewritten)
    }
}

/// First method named `name` accepting `argc` arguments on `decl` or its ancestors.
fn find_method(
    ws: &Workspace,
    decl: InterfaceLike,
    name: Name,
    argc: usize,
    is_static: bool,
) -> Result<Option<MethodId>> {
    let found = find_member(ws, decl, |d| {
        ws.interface_decl(d).methods().iter().copied().find(|m| {
            let method = &ws.methods[*m];
            let required = method
                .parameters
                .iter()
                .filter(|p| ws.params[**p].initializer.is_none())
                .count();
            method.name == name && method.is_static == is_static && required <= argc && argc <= method.parameters.len()
        })
    })?;
    Ok(found.map(|(_, m)| m))
}

/// Result type of a resolved call, `None` while its callee is untyped.
pub fn call_type(ws: &mut Workspace, expr: ExprId) -> Option<TypeId> {
    match ws.exprs[expr].kind.clone() {
        ExprKind::InstanceMethodCall { object, method, type_args, .. } => {
            let receiver = receiver_type(ws, object)?;
            if ws.types.is_any(receiver) {
                return Some(receiver);
            }
            let map = call_map(ws, Some(receiver), method, &type_args);
            Some(ws.types.substitute(ws.methods[method].returns, &map))
        }
        ExprKind::StaticMethodCall { method, type_args, .. } => {
            let map = call_map(ws, None, method, &type_args);
            Some(ws.types.substitute(ws.methods[method].returns, &map))
        }
        ExprKind::GlobalFunctionCall { func, .. } => Some(ws.functions[func].returns),
        ExprKind::LambdaCall { lambda, .. } => {
            let callee = ws.exprs[lambda].actual_type?;
            match ws.types.get(callee) {
                TypeKind::Lambda { returns, .. } => Some(*returns),
                TypeKind::Any => Some(callee),
                _ => None,
            }
        }
        _ => None,
    }
}
