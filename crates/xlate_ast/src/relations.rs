//! Type equality and assignability.

use crate::hierarchy::all_base_interfaces;
use crate::ids::TypeId;
use crate::types::TypeKind;
use crate::workspace::{Result, Workspace};

/// Types are interned, so equality is identity.
#[inline]
pub fn types_equal(a: TypeId, b: TypeId) -> bool {
    a == b
}

/// Whether a value of type `source` may be stored where `target` is expected.
///
/// Reflexive; `any` is assignable to and from everything; a class or interface
/// type is assignable to the same declaration with pairwise assignable
/// arguments and to any of its flattened ancestors.
pub fn is_assignable_to(ws: &Workspace, source: TypeId, target: TypeId) -> Result<bool> {
    if types_equal(source, target) || ws.types.is_any(source) || ws.types.is_any(target) {
        return Ok(true);
    }

    let (Some(src), Some(tgt)) = (ws.interface_like_of(source), ws.interface_like_of(target)) else {
        return Ok(false);
    };

    if src == tgt {
        let src_args = ws.types.type_args(source);
        let tgt_args = ws.types.type_args(target);
        if src_args.len() != tgt_args.len() {
            return Ok(false);
        }
        for (s, t) in src_args.iter().zip(tgt_args) {
            if !is_assignable_to(ws, *s, *t)? {
                return Ok(false);
            }
        }
        return Ok(true);
    }

    Ok(all_base_interfaces(ws, src)?.contains(&tgt))
}

/// Whether `ty` is a lambda type.
pub fn is_lambda(ws: &Workspace, ty: TypeId) -> bool {
    matches!(ws.types.get(ty), TypeKind::Lambda { .. })
}
