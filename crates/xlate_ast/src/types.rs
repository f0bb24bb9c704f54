//! Type system representation.
//!
//! Types are interned in a [`TypeTable`] and referenced by [`TypeId`]. The
//! table hash-conses every kind, so two structurally equal types always share
//! one id and type equality is id equality.

use crate::ids::{ClassId, EnumId, InterfaceId, TypeId};
use rustc_hash::FxHashMap;
use xlate_core::{Arena, Name};

/// The specific data for each type kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Dynamically typed; assignable to and from everything.
    Any,
    /// Placeholder for an expression nothing has constrained yet.
    Ambiguous,
    /// Return type of methods that return nothing.
    Void,
    Class {
        decl: ClassId,
        type_args: Vec<TypeId>,
    },
    Interface {
        decl: InterfaceId,
        type_args: Vec<TypeId>,
    },
    Enum {
        decl: EnumId,
    },
    /// A generic type parameter such as `T`.
    Generic {
        name: Name,
    },
    /// Signature of a lambda or a function used as a value.
    Lambda {
        params: Vec<TypeId>,
        returns: TypeId,
    },
}

/// The type table stores all types and provides access by TypeId.
#[derive(Debug)]
pub struct TypeTable {
    types: Arena<TypeId, TypeKind>,
    lookup: FxHashMap<TypeKind, TypeId>,
    // Well-known types
    pub any_type: TypeId,
    pub ambiguous_type: TypeId,
    pub void_type: TypeId,
}

impl TypeTable {
    pub fn new() -> Self {
        let mut table = Self {
            types: Arena::new(),
            lookup: FxHashMap::default(),
            any_type: TypeId(0),
            ambiguous_type: TypeId(0),
            void_type: TypeId(0),
        };
        table.any_type = table.intern(TypeKind::Any);
        table.ambiguous_type = table.intern(TypeKind::Ambiguous);
        table.void_type = table.intern(TypeKind::Void);
        table
    }

    /// Return the id of `kind`, allocating it on first use.
    pub fn intern(&mut self, kind: TypeKind) -> TypeId {
        if let Some(&id) = self.lookup.get(&kind) {
            return id;
        }
        let id = self.types.alloc(kind.clone());
        self.lookup.insert(kind, id);
        id
    }

    pub fn get(&self, id: TypeId) -> &TypeKind {
        &self.types[id]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn class(&mut self, decl: ClassId, type_args: Vec<TypeId>) -> TypeId {
        self.intern(TypeKind::Class { decl, type_args })
    }

    pub fn interface(&mut self, decl: InterfaceId, type_args: Vec<TypeId>) -> TypeId {
        self.intern(TypeKind::Interface { decl, type_args })
    }

    pub fn enum_type(&mut self, decl: EnumId) -> TypeId {
        self.intern(TypeKind::Enum { decl })
    }

    pub fn generic(&mut self, name: Name) -> TypeId {
        self.intern(TypeKind::Generic { name })
    }

    pub fn lambda(&mut self, params: Vec<TypeId>, returns: TypeId) -> TypeId {
        self.intern(TypeKind::Lambda { params, returns })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_any(&self, id: TypeId) -> bool {
        id == self.any_type
    }

    pub fn is_ambiguous(&self, id: TypeId) -> bool {
        id == self.ambiguous_type
    }

    pub fn class_decl(&self, id: TypeId) -> Option<ClassId> {
        match self.get(id) {
            TypeKind::Class { decl, .. } => Some(*decl),
            _ => None,
        }
    }

    pub fn enum_decl(&self, id: TypeId) -> Option<EnumId> {
        match self.get(id) {
            TypeKind::Enum { decl } => Some(*decl),
            _ => None,
        }
    }

    /// Generic arguments of a class or interface type.
    pub fn type_args(&self, id: TypeId) -> &[TypeId] {
        match self.get(id) {
            TypeKind::Class { type_args, .. } | TypeKind::Interface { type_args, .. } => type_args,
            _ => &[],
        }
    }

    pub fn is_class_or_interface(&self, id: TypeId) -> bool {
        matches!(self.get(id), TypeKind::Class { .. } | TypeKind::Interface { .. })
    }

    /// Whether `id` mentions an unbound generic parameter.
    pub fn contains_generic(&self, id: TypeId) -> bool {
        match self.get(id) {
            TypeKind::Generic { .. } => true,
            TypeKind::Class { type_args, .. } | TypeKind::Interface { type_args, .. } => {
                type_args.iter().any(|a| self.contains_generic(*a))
            }
            TypeKind::Lambda { params, returns } => {
                params.iter().any(|p| self.contains_generic(*p)) || self.contains_generic(*returns)
            }
            TypeKind::Any | TypeKind::Ambiguous | TypeKind::Void | TypeKind::Enum { .. } => false,
        }
    }

    /// Replace generic parameters according to `map`.
    pub fn substitute(&mut self, id: TypeId, map: &FxHashMap<Name, TypeId>) -> TypeId {
        if map.is_empty() {
            return id;
        }
        match self.get(id).clone() {
            TypeKind::Generic { name } => map.get(&name).copied().unwrap_or(id),
            TypeKind::Class { decl, type_args } => {
                let args = type_args.iter().map(|a| self.substitute(*a, map)).collect();
                self.class(decl, args)
            }
            TypeKind::Interface { decl, type_args } => {
                let args = type_args.iter().map(|a| self.substitute(*a, map)).collect();
                self.interface(decl, args)
            }
            TypeKind::Lambda { params, returns } => {
                let params = params.iter().map(|p| self.substitute(*p, map)).collect();
                let returns = self.substitute(returns, map);
                self.lambda(params, returns)
            }
            TypeKind::Any | TypeKind::Ambiguous | TypeKind::Void | TypeKind::Enum { .. } => id,
        }
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the generic-parameter map pairing `params` with `args`.
///
/// Missing arguments leave their parameter unmapped.
pub fn generic_map(params: &[Name], args: &[TypeId]) -> FxHashMap<Name, TypeId> {
    params.iter().copied().zip(args.iter().copied()).collect()
}

/// The classes every literal of a file maps to.
///
/// Each field is the self type of the configured class, so `array` and `map`
/// carry their generic parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralTypes {
    pub boolean: TypeId,
    pub numeric: TypeId,
    pub string: TypeId,
    pub regex: TypeId,
    pub array: TypeId,
    pub map: TypeId,
    pub error: TypeId,
    pub promise: TypeId,
}
