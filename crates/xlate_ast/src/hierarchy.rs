//! Flattened class and interface ancestors.
//!
//! Ancestors are listed breadth-first from the declaration: the direct bases
//! in declaration order (base class first), then their bases. A declaration
//! reached through two paths keeps its first position, and the declaration
//! itself is never listed. The list is computed on first demand and memoized
//! in the declaration's cache cell.

use crate::decl::InterfaceLike;
use crate::ids::TypeId;
use crate::types::generic_map;
use crate::workspace::{Result, Workspace};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use tracing::trace;
use xlate_diagnostics::CompileError;

/// All transitive ancestors of `x`, deduplicated.
pub fn all_base_interfaces(ws: &Workspace, x: InterfaceLike) -> Result<&[InterfaceLike]> {
    let cache = ws.interface_decl(x).ancestor_cache();
    let list = cache.get_or_try_init(|| collect_all_base_interfaces(ws, x))?;
    Ok(list.as_slice())
}

/// Direct bases of `x` that denote a class or an interface.
pub fn direct_bases(ws: &Workspace, x: InterfaceLike) -> Vec<InterfaceLike> {
    ws.interface_decl(x)
        .base_types()
        .into_iter()
        .filter_map(|t| ws.interface_like_of(t))
        .collect()
}

fn collect_all_base_interfaces(ws: &Workspace, x: InterfaceLike) -> Result<Vec<InterfaceLike>> {
    check_acyclic(ws, x)?;

    let mut seen = FxHashSet::default();
    seen.insert(x);
    let mut result = Vec::new();
    let mut queue: VecDeque<InterfaceLike> = direct_bases(ws, x).into();
    while let Some(next) = queue.pop_front() {
        if !seen.insert(next) {
            continue;
        }
        result.push(next);
        queue.extend(direct_bases(ws, next));
    }
    trace!(decl = %ws.interface_like_id(x), count = result.len(), "flattened ancestors");
    Ok(result)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Depth-first search for a cycle reachable from `root`.
fn check_acyclic(ws: &Workspace, root: InterfaceLike) -> Result<()> {
    fn visit(
        ws: &Workspace,
        node: InterfaceLike,
        marks: &mut FxHashMap<InterfaceLike, Mark>,
        path: &mut Vec<InterfaceLike>,
    ) -> Result<()> {
        match marks.get(&node) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => {
                let start = path.iter().position(|p| *p == node).unwrap_or(0);
                let cycle = path[start..]
                    .iter()
                    .chain(std::iter::once(&node))
                    .map(|p| ws.names.resolve(ws.interface_decl(*p).name()).to_string())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(CompileError::CyclicInheritance { cycle });
            }
            None => {}
        }
        marks.insert(node, Mark::InProgress);
        path.push(node);
        for base in direct_bases(ws, node) {
            visit(ws, base, marks, path)?;
        }
        path.pop();
        marks.insert(node, Mark::Done);
        Ok(())
    }

    visit(ws, root, &mut FxHashMap::default(), &mut Vec::new())
}

/// Whether `ancestor` is `x` or one of its flattened ancestors.
pub fn is_same_or_ancestor(ws: &Workspace, x: InterfaceLike, ancestor: InterfaceLike) -> Result<bool> {
    if x == ancestor {
        return Ok(true);
    }
    Ok(all_base_interfaces(ws, x)?.contains(&ancestor))
}

/// `ty` seen as an instance of `target`, its own declaration or an ancestor.
///
/// The declared bases are walked upwards with the generic arguments of each
/// step substituted, so `Stack<Foo>` seen as `List` (with
/// `Stack<E> extends List<E>`) is `List<Foo>`.
pub fn view_as(ws: &mut Workspace, ty: TypeId, target: InterfaceLike) -> Option<TypeId> {
    let decl = ws.interface_like_of(ty)?;
    if decl == target {
        return Some(ty);
    }
    let params = ws.interface_decl(decl).type_arguments().to_vec();
    let map = generic_map(&params, ws.types.type_args(ty));
    let bases = ws.interface_decl(decl).base_types();
    for base in bases {
        let base = ws.types.substitute(base, &map);
        if let Some(found) = view_as(ws, base, target) {
            return Some(found);
        }
    }
    None
}
