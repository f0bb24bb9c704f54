//! Parameter types that call arguments bind to.

use crate::generics::{call_map, member_map};
use rustc_hash::FxHashMap;
use xlate_ast::{
    ConstructorId, ExprId, ExprKind, InterfaceLike, ParamId, Reference, TypeId, TypeKind, Workspace,
};

/// Type an instance call or member access is looked up on. `super` looks
/// up on the base class.
pub fn receiver_type(ws: &Workspace, object: ExprId) -> Option<TypeId> {
    match ws.exprs[object].as_reference() {
        Some(Reference::Super(c)) => ws.classes[*c].base_class,
        _ => ws.exprs[object].actual_type,
    }
}

/// Each argument of `call` paired with its substituted parameter type.
///
/// Arguments beyond the parameter list and parameters without a declared
/// type are left out.
pub fn bound_parameters(ws: &mut Workspace, call: ExprId) -> Vec<(ExprId, TypeId)> {
    let (params, args, map) = match ws.exprs[call].kind.clone() {
        ExprKind::InstanceMethodCall { object, method, type_args, args } => {
            let receiver = receiver_type(ws, object);
            let map = call_map(ws, receiver, method, &type_args);
            (declared_types(ws, &ws.methods[method].parameters), args, map)
        }
        ExprKind::StaticMethodCall { method, type_args, args } => {
            let map = call_map(ws, None, method, &type_args);
            (declared_types(ws, &ws.methods[method].parameters), args, map)
        }
        ExprKind::GlobalFunctionCall { func, args } => {
            (declared_types(ws, &ws.functions[func].parameters), args, FxHashMap::default())
        }
        ExprKind::New { cls, args } => match ws.types.class_decl(cls) {
            Some(decl) => match ws.classes[decl].constructor {
                Some(ctor) => {
                    let map = member_map(ws, cls, InterfaceLike::Class(decl));
                    (declared_types(ws, &ws.constructors[ctor].parameters), args, map)
                }
                None => return Vec::new(),
            },
            None => return Vec::new(),
        },
        ExprKind::LambdaCall { lambda, args } => match ws.exprs[lambda].actual_type.map(|t| ws.types.get(t)) {
            Some(TypeKind::Lambda { params, .. }) => {
                (params.iter().map(|p| Some(*p)).collect(), args, FxHashMap::default())
            }
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    bind(ws, args, params, &map)
}

/// Arguments of a constructor's `super(...)` call paired with the base
/// constructor's parameter types.
pub fn super_call_parameters(ws: &mut Workspace, ctor: ConstructorId) -> Vec<(ExprId, TypeId)> {
    let Some(args) = ws.constructors[ctor].super_call_args.clone() else {
        return Vec::new();
    };
    let Some(base) = ws.constructors[ctor].parent_class.and_then(|c| ws.classes[c].base_class) else {
        return Vec::new();
    };
    let Some(base_decl) = ws.types.class_decl(base) else {
        return Vec::new();
    };
    let Some(base_ctor) = ws.classes[base_decl].constructor else {
        return Vec::new();
    };
    let map = member_map(ws, base, InterfaceLike::Class(base_decl));
    let params = declared_types(ws, &ws.constructors[base_ctor].parameters);
    bind(ws, args, params, &map)
}

fn declared_types(ws: &Workspace, params: &[ParamId]) -> Vec<Option<TypeId>> {
    params.iter().map(|p| ws.params[*p].ty).collect()
}

fn bind(
    ws: &mut Workspace,
    args: Vec<ExprId>,
    params: Vec<Option<TypeId>>,
    map: &FxHashMap<xlate_core::Name, TypeId>,
) -> Vec<(ExprId, TypeId)> {
    args.into_iter()
        .zip(params)
        .filter_map(|(arg, param)| param.map(|p| (arg, ws.types.substitute(p, map))))
        .collect()
}
