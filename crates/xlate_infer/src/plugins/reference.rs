//! Types of references to declarations outside the local scope.

use crate::generics::member_map;
use crate::plugin::{InferContext, InferTypesPlugin};
use crate::signature::receiver_type;
use xlate_ast::{ExprId, InterfaceLike, Reference, Result, TypeId, Workspace};

pub struct ReferenceTypeInfer;

impl InferTypesPlugin for ReferenceTypeInfer {
    fn name(&self) -> &'static str {
        "ReferenceTypeInfer"
    }

    fn can_detect_type(&self, ws: &Workspace, expr: ExprId) -> bool {
        matches!(
            ws.exprs[expr].as_reference(),
            Some(
                Reference::Class(_)
                    | Reference::Enum(_)
                    | Reference::EnumMember(_)
                    | Reference::GlobalFunction(_)
                    | Reference::StaticField(_)
                    | Reference::StaticProperty(_)
                    | Reference::InstanceField { .. }
                    | Reference::InstanceProperty { .. }
            )
        )
    }

    fn detect_type(&mut self, ctx: &mut InferContext<'_>, expr: ExprId) -> Result<bool> {
        let Some(&reference) = ctx.ws.exprs[expr].as_reference() else {
            return Ok(false);
        };
        let ws = &mut *ctx.ws;
        let ty = match reference {
            Reference::Class(c) => ws.classes[c].self_type,
            Reference::Enum(e) => ws.enums[e].ty,
            Reference::EnumMember(m) => match ws.enum_members[m].parent_enum {
                Some(e) => ws.enums[e].ty,
                None => return Ok(false),
            },
            Reference::GlobalFunction(f) => {
                let any = ws.types.any_type;
                let func = &ws.functions[f];
                let params = func.parameters.iter().map(|p| ws.params[*p].ty.unwrap_or(any)).collect();
                let returns = func.returns;
                ws.types.lambda(params, returns)
            }
            Reference::StaticField(f) => ws.fields[f].ty,
            Reference::StaticProperty(p) => ws.properties[p].ty,
            Reference::InstanceField { object, field } => {
                let (ty, owner) = (ws.fields[field].ty, ws.fields[field].parent_interface);
                match instance_member_type(ws, object, ty, owner) {
                    Some(t) => t,
                    None => return Ok(false),
                }
            }
            Reference::InstanceProperty { object, property } => {
                let prop = &ws.properties[property];
                let (ty, owner) = (prop.ty, prop.parent_class.map(InterfaceLike::Class));
                match instance_member_type(ws, object, ty, owner) {
                    Some(t) => t,
                    None => return Ok(false),
                }
            }
            Reference::MethodParameter(_)
            | Reference::Variable(_)
            | Reference::This(_)
            | Reference::StaticThis(_)
            | Reference::Super(_) => return Ok(false),
        };
        Ok(ctx.set_type(expr, ty))
    }
}

/// Declared member type with the receiver's generic arguments filled in.
///
/// `None` while the receiver is untyped.
pub fn instance_member_type(
    ws: &mut Workspace,
    object: ExprId,
    declared: TypeId,
    owner: Option<InterfaceLike>,
) -> Option<TypeId> {
    let receiver = receiver_type(ws, object)?;
    if ws.types.is_any(receiver) {
        return Some(ws.types.any_type);
    }
    let Some(owner) = owner else {
        return Some(declared);
    };
    let map = member_map(ws, receiver, owner);
    Some(ws.types.substitute(declared, &map))
}

