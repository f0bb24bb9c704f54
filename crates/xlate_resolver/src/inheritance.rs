//! Inheritance resolution.
//!
//! Forces the flattened ancestor list of every class and interface (which
//! reports cycles) and links members to the ancestor members they implement:
//! a method records the matching interface methods and a single `overrides`
//! link, the overridden method records the override in `overridden_by`.
//! Ancestor signatures are compared as the declaration sees them, with the
//! ancestor's generic parameters replaced by the arguments it was given.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};
use xlate_ast::hierarchy::{all_base_interfaces, view_as};
use xlate_ast::relations::is_assignable_to;
use xlate_ast::types::generic_map;
use xlate_ast::{FieldId, InterfaceId, InterfaceLike, MethodId, Result, TypeId, Workspace};
use xlate_core::Name;

/// Compute ancestors and override links for the whole workspace.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve_inheritance(ws: &mut Workspace) -> Result<()> {
    let decls: Vec<InterfaceLike> = ws
        .interfaces
        .ids()
        .map(InterfaceLike::Interface)
        .chain(ws.classes.ids().map(InterfaceLike::Class))
        .collect();

    for &decl in &decls {
        all_base_interfaces(ws, decl)?;
    }

    let mut links = 0;
    for &decl in &decls {
        links += link_members(ws, decl)?;
    }
    debug!(decls = decls.len(), links, "inheritance resolved");
    Ok(())
}

fn link_members(ws: &mut Workspace, decl: InterfaceLike) -> Result<usize> {
    let ancestors = all_base_interfaces(ws, decl)?.to_vec();
    let methods = ws.interface_decl(decl).methods().to_vec();
    let fields = ws.interface_decl(decl).fields().to_vec();
    let self_type = ws.interface_decl(decl).self_type();
    let views: Vec<(InterfaceLike, FxHashMap<Name, TypeId>)> = ancestors
        .iter()
        .map(|&ancestor| (ancestor, ancestor_arguments(ws, self_type, ancestor)))
        .collect();
    let mut links = 0;

    for method in methods {
        if ws.methods[method].interface_declarations.is_some() {
            continue;
        }
        let mut interface_decls = Vec::new();
        let mut overrides = None;
        if !ws.methods[method].is_static {
            for (ancestor, view) in &views {
                let candidates = ws.interface_decl(*ancestor).methods().to_vec();
                for base in candidates {
                    if !signature_matches(ws, method, base, view)? {
                        continue;
                    }
                    if matches!(ancestor, InterfaceLike::Interface(_)) {
                        interface_decls.push(base);
                    }
                    overrides.get_or_insert(base);
                }
            }
        }
        if let Some(base) = overrides {
            trace!(?method, ?base, "linked override");
            ws.methods[base].overridden_by.push(method);
            links += 1;
        }
        let m = &mut ws.methods[method];
        m.interface_declarations = Some(interface_decls);
        m.overrides = overrides;
    }

    for field in fields {
        if ws.fields[field].interface_declarations.is_some() {
            continue;
        }
        let name = ws.fields[field].name;
        let matching: Vec<FieldId> = ancestors
            .iter()
            .filter_map(|a| match a {
                InterfaceLike::Interface(i) => Some(*i),
                InterfaceLike::Class(_) => None,
            })
            .flat_map(|i| interface_fields(ws, i))
            .filter(|f| ws.fields[*f].name == name)
            .collect();
        ws.fields[field].interface_declarations = Some(matching);
    }

    Ok(links)
}

fn interface_fields(ws: &Workspace, intf: InterfaceId) -> Vec<FieldId> {
    ws.interfaces[intf].fields.clone()
}

/// Generic parameters of `ancestor` bound by the declaration typed `self_type`.
fn ancestor_arguments(ws: &mut Workspace, self_type: TypeId, ancestor: InterfaceLike) -> FxHashMap<Name, TypeId> {
    match view_as(ws, self_type, ancestor) {
        Some(seen) => generic_map(ws.interface_decl(ancestor).type_arguments(), ws.types.type_args(seen)),
        None => FxHashMap::default(),
    }
}

/// Name, arity and type compatibility between a method and an ancestor's.
///
/// The ancestor's signature is read through `view`. Its parameter types must
/// then be assignable to the overriding parameter types, and the overriding
/// return type to its return type. An ancestor type that still mentions a
/// generic parameter matches anything.
fn signature_matches(
    ws: &mut Workspace,
    method: MethodId,
    base: MethodId,
    view: &FxHashMap<Name, TypeId>,
) -> Result<bool> {
    let (m, b) = (&ws.methods[method], &ws.methods[base]);
    if m.name != b.name || b.is_static || m.parameters.len() != b.parameters.len() {
        return Ok(false);
    }
    let params: Vec<(Option<TypeId>, Option<TypeId>)> = m
        .parameters
        .iter()
        .zip(&b.parameters)
        .map(|(mp, bp)| (ws.params[*mp].ty, ws.params[*bp].ty))
        .collect();
    let (returns, base_returns) = (m.returns, b.returns);

    for (mt, bt) in params {
        if let (Some(mt), Some(bt)) = (mt, bt) {
            let bt = ws.types.substitute(bt, view);
            if !ws.types.contains_generic(bt) && !is_assignable_to(ws, bt, mt)? {
                return Ok(false);
            }
        }
    }
    let base_returns = ws.types.substitute(base_returns, view);
    Ok(ws.types.contains_generic(base_returns) || is_assignable_to(ws, returns, base_returns)?)
}
