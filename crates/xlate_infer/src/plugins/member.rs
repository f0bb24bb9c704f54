//! Member access resolution.
//!
//! `obj.name` is resolved once `obj` is typed and rewritten in place into a
//! field, property or enum member reference, which registers it in the
//! reference index. Class references (and `this` in static code) select
//! static members, enum references select enum members, anything typed as a
//! class or interface selects instance members of the declaration or its
//! ancestors.

use crate::generics::find_member;
use crate::plugin::{InferContext, InferTypesPlugin};
use crate::plugins::reference::instance_member_type;
use crate::signature::receiver_type;
use tracing::trace;
use xlate_ast::display::type_repr;
use xlate_ast::references::bind_reference;
use xlate_ast::{
    ExprId, ExprKind, FieldId, Importable, InterfaceLike, PropertyId, Reference, Result, Workspace,
};
use xlate_core::Name;
use xlate_diagnostics::CompileError;

pub struct MemberAccessResolver;

#[derive(Clone, Copy)]
enum Member {
    Field(FieldId),
    Property(PropertyId),
}

impl InferTypesPlugin for MemberAccessResolver {
    fn name(&self) -> &'static str {
        "MemberAccessResolver"
    }

    fn can_detect_type(&self, ws: &Workspace, expr: ExprId) -> bool {
        matches!(ws.exprs[expr].kind, ExprKind::PropertyAccess { .. })
    }

    fn detect_type(&mut self, ctx: &mut InferContext<'_>, expr: ExprId) -> Result<bool> {
        let ExprKind::PropertyAccess { object, name } = ctx.ws.exprs[expr].kind else {
            return Ok(false);
        };
        let ws = &mut *ctx.ws;
        let member_name = ws.names.resolve(name).to_string();

        let object_ref = ws.exprs[object].as_reference().copied();
        let ty = match object_ref {
            Some(Reference::Class(c) | Reference::StaticThis(c)) => {
                let found = find_member(ws, InterfaceLike::Class(c), |d| member_of(ws, d, name, true))?;
                let (reference, ty) = match found {
                    Some((_, Member::Field(f))) => (Reference::StaticField(f), ws.fields[f].ty),
                    Some((_, Member::Property(p))) => (Reference::StaticProperty(p), ws.properties[p].ty),
                    None => {
                        return Err(CompileError::MemberNotFound {
                            member: member_name,
                            owner: ws.symbol_id(Importable::Class(c)),
                        })
                    }
                };
                bind_reference(ws, expr, reference);
                ty
            }
            Some(Reference::Enum(e)) => {
                let member = ws.enums[e]
                    .values
                    .iter()
                    .copied()
                    .find(|m| ws.enum_members[*m].name == name);
                let Some(member) = member else {
                    return Err(CompileError::MemberNotFound {
                        member: member_name,
                        owner: ws.symbol_id(Importable::Enum(e)),
                    });
                };
                bind_reference(ws, expr, Reference::EnumMember(member));
                ws.enums[e].ty
            }
            _ => {
                let Some(receiver) = receiver_type(ws, object) else {
                    return Ok(false);
                };
                if ws.types.is_any(receiver) {
                    trace!(member = %member_name, "member access on any");
                    receiver
                } else {
                    let Some(decl) = ws.interface_like_of(receiver) else {
                        return Err(CompileError::MemberNotFound {
                            member: member_name,
                            owner: type_repr(ws, receiver),
                        });
                    };
                    let found = find_member(ws, decl, |d| member_of(ws, d, name, false))?;
                    let (reference, declared, owner) = match found {
                        Some((owner, Member::Field(field))) => {
                            (Reference::InstanceField { object, field }, ws.fields[field].ty, owner)
                        }
                        Some((owner, Member::Property(property))) => {
                            (Reference::InstanceProperty { object, property }, ws.properties[property].ty, owner)
                        }
                        None => {
                            return Err(CompileError::MemberNotFound {
                                member: member_name,
                                owner: type_repr(ws, receiver),
                            })
                        }
                    };
                    bind_reference(ws, expr, reference);
                    match instance_member_type(ws, object, declared, Some(owner)) {
                        Some(t) => t,
                        None => return Ok(false),
                    }
                }
            }
        };
        Ok(ctx.set_type(expr, ty))
    }
}

/// Field or property named `name` declared directly on `decl`.
fn member_of(ws: &Workspace, decl: InterfaceLike, name: Name, is_static: bool) -> Option<Member> {
    let field = ws
        .interface_decl(decl)
        .fields()
        .iter()
        .copied()
        .find(|f| ws.fields[*f].name == name && ws.fields[*f].is_static == is_static);
    if let Some(f) = field {
        return Some(Member::Field(f));
    }
    match decl {
        InterfaceLike::Class(c) => ws.classes[c]
            .properties
            .iter()
            .copied()
            .find(|p| ws.properties[*p].name == name && ws.properties[*p].is_static == is_static)
            .map(Member::Property),
        InterfaceLike::Interface(_) => None,
    }
}
