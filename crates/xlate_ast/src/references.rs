//! The reference index.
//!
//! Every declaration keeps the ids of the expression nodes that reference it.
//! A node is registered when it becomes a [`Reference`], and only then, so
//! each syntactic occurrence appears exactly once.

use crate::expr::{ExprKind, Reference};
use crate::ids::ExprId;
use crate::workspace::Workspace;
use tracing::trace;

/// Create a new reference node and register it with its declaration.
pub fn create_reference(ws: &mut Workspace, reference: Reference) -> ExprId {
    let id = ws.alloc_expr(ExprKind::Reference(reference));
    register(ws, id, reference);
    id
}

/// Rewrite an existing node into `reference` and register it.
///
/// Returns `false` without touching anything when the node already is a
/// reference, so resolution can be re-run safely.
pub fn bind_reference(ws: &mut Workspace, expr: ExprId, reference: Reference) -> bool {
    if matches!(ws.exprs[expr].kind, ExprKind::Reference(_)) {
        return false;
    }
    ws.exprs[expr].kind = ExprKind::Reference(reference);
    register(ws, expr, reference);
    true
}

fn register(ws: &mut Workspace, expr: ExprId, reference: Reference) {
    trace!(?expr, ?reference, "registered reference");
    references_mut(ws, reference).push(expr);
}

fn references_mut(ws: &mut Workspace, reference: Reference) -> &mut Vec<ExprId> {
    match reference {
        Reference::Class(c) => &mut ws.classes[c].class_references,
        Reference::This(c) => &mut ws.classes[c].this_references,
        Reference::StaticThis(c) => &mut ws.classes[c].static_this_references,
        Reference::Super(c) => &mut ws.classes[c].super_references,
        Reference::Enum(e) => &mut ws.enums[e].references,
        Reference::EnumMember(m) => &mut ws.enum_members[m].references,
        Reference::GlobalFunction(f) => &mut ws.functions[f].references,
        Reference::MethodParameter(p) => &mut ws.params[p].references,
        Reference::Variable(v) => &mut ws.variables[v].references,
        Reference::StaticField(f) => &mut ws.fields[f].static_references,
        Reference::InstanceField { field, .. } => &mut ws.fields[field].instance_references,
        Reference::StaticProperty(p) => &mut ws.properties[p].static_references,
        Reference::InstanceProperty { property, .. } => &mut ws.properties[property].instance_references,
    }
}

/// The list `reference` is recorded in on its declaration.
pub fn references_of(ws: &Workspace, reference: Reference) -> &[ExprId] {
    match reference {
        Reference::Class(c) => &ws.classes[c].class_references,
        Reference::This(c) => &ws.classes[c].this_references,
        Reference::StaticThis(c) => &ws.classes[c].static_this_references,
        Reference::Super(c) => &ws.classes[c].super_references,
        Reference::Enum(e) => &ws.enums[e].references,
        Reference::EnumMember(m) => &ws.enum_members[m].references,
        Reference::GlobalFunction(f) => &ws.functions[f].references,
        Reference::MethodParameter(p) => &ws.params[p].references,
        Reference::Variable(v) => &ws.variables[v].references,
        Reference::StaticField(f) => &ws.fields[f].static_references,
        Reference::InstanceField { field, .. } => &ws.fields[field].instance_references,
        Reference::StaticProperty(p) => &ws.properties[p].static_references,
        Reference::InstanceProperty { property, .. } => &ws.properties[property].instance_references,
    }
}
