//! Generic argument bookkeeping for member lookups.
//!
//! A member declared on `List<T>` and reached through a receiver of type
//! `Stack<Foo>` (where `Stack<E> extends List<E>`) sees `T = Foo`.

use rustc_hash::FxHashMap;
use xlate_ast::hierarchy::{all_base_interfaces, view_as};
use xlate_ast::types::generic_map;
use xlate_ast::{InterfaceLike, MethodId, Result, TypeId, Workspace};
use xlate_core::Name;

/// Generic parameters of `owner` bound by a receiver of type `receiver`.
pub fn member_map(ws: &mut Workspace, receiver: TypeId, owner: InterfaceLike) -> FxHashMap<Name, TypeId> {
    match view_as(ws, receiver, owner) {
        Some(seen) => generic_map(ws.interface_decl(owner).type_arguments(), ws.types.type_args(seen)),
        None => FxHashMap::default(),
    }
}

/// Receiver map extended with the explicit type arguments of a generic method call.
pub fn call_map(
    ws: &mut Workspace,
    receiver: Option<TypeId>,
    method: MethodId,
    type_args: &[TypeId],
) -> FxHashMap<Name, TypeId> {
    let mut map = match (receiver, ws.methods[method].parent_interface) {
        (Some(receiver), Some(owner)) => member_map(ws, receiver, owner),
        _ => FxHashMap::default(),
    };
    map.extend(generic_map(&ws.methods[method].type_arguments, type_args));
    map
}

/// Search `decl`, then its flattened ancestors, for the first member `find` accepts.
pub fn find_member<T>(
    ws: &Workspace,
    decl: InterfaceLike,
    mut find: impl FnMut(InterfaceLike) -> Option<T>,
) -> Result<Option<(InterfaceLike, T)>> {
    if let Some(found) = find(decl) {
        return Ok(Some((decl, found)));
    }
    for &ancestor in all_base_interfaces(ws, decl)? {
        if let Some(found) = find(ancestor) {
            return Ok(Some((ancestor, found)));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xlate_ast::Class;

    #[test]
    fn test_member_map_through_generic_base() {
        let mut ws = Workspace::new();
        let t = ws.intern("T");
        let e = ws.intern("E");
        let list = ws.add_class(Class::new(ws.intern("List"), vec![t], true));
        let mut stack = Class::new(ws.intern("Stack"), vec![e], true);
        let e_generic = ws.types.generic(e);
        stack.base_class = Some(ws.types.class(list, vec![e_generic]));
        let stack = ws.add_class(stack);
        let foo = ws.add_class(Class::new(ws.intern("Foo"), vec![], true));
        let foo_type = ws.classes[foo].self_type;

        let stack_of_foo = ws.types.class(stack, vec![foo_type]);
        let map = member_map(&mut ws, stack_of_foo, InterfaceLike::Class(list));
        assert_eq!(map.get(&t), Some(&foo_type));
        assert!(member_map(&mut ws, foo_type, InterfaceLike::Class(list)).is_empty());
    }
}
