//! Declarations of the symbol model.
//!
//! Declarations are created by the parser with their syntactic content set.
//! The remaining fields are filled by later stages, noted on each field:
//! parent pointers when the file is added to the workspace, reference lists by
//! identifier and member resolution, override links by the inheritance
//! resolver, mutability after inference.

use crate::ids::{
    ClassId, ConstructorId, EnumId, EnumMemberId, ExprId, FieldId, FileId, FunctionId,
    InterfaceId, LambdaId, MethodId, ParamId, PropertyId, TypeId,
};
use crate::stmt::Block;
use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use xlate_core::Name;

/// String attributes read from a declaration's documentation comment.
pub type Attributes = IndexMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

bitflags::bitflags! {
    /// How a variable-like declaration is used across the program.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MutabilityInfo: u8 {
        /// No reference to the declaration exists.
        const UNUSED     = 1 << 0;
        /// Target of an assignment, compound assignment, `++` or `--`.
        const REASSIGNED = 1 << 1;
        /// Receiver of an instance method call or of a member assignment.
        const MUTATED    = 1 << 2;
    }
}

impl MutabilityInfo {
    pub fn unused(self) -> bool {
        self.contains(Self::UNUSED)
    }

    pub fn reassigned(self) -> bool {
        self.contains(Self::REASSIGNED)
    }

    pub fn mutated(self) -> bool {
        self.contains(Self::MUTATED)
    }
}

// ============================================================================
// Uniform handles
// ============================================================================

/// A class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceLike {
    Class(ClassId),
    Interface(InterfaceId),
}

/// A declaration other files can import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Importable {
    Class(ClassId),
    Interface(InterfaceId),
    Enum(EnumId),
    Function(FunctionId),
}

/// Anything with parameters and a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodLikeId {
    Method(MethodId),
    Constructor(ConstructorId),
    Function(FunctionId),
    Lambda(LambdaId),
}

/// Shared shape of classes and interfaces.
pub trait InterfaceDecl {
    fn name(&self) -> Name;
    fn type_arguments(&self) -> &[Name];
    /// Direct bases: a class's base class first, then base interfaces.
    fn base_types(&self) -> Vec<TypeId>;
    fn fields(&self) -> &[FieldId];
    fn methods(&self) -> &[MethodId];
    fn parent_file(&self) -> Option<FileId>;
    fn self_type(&self) -> TypeId;
    fn ancestor_cache(&self) -> &OnceCell<Vec<InterfaceLike>>;
}

pub trait ClassMember {
    fn name(&self) -> Name;
    fn visibility(&self) -> Visibility;
    fn is_static(&self) -> bool;
    fn parent_interface(&self) -> Option<InterfaceLike>;
}

pub trait MethodLike {
    fn parameters(&self) -> &[ParamId];
    fn body(&self) -> Option<&Block>;
    fn throws(&self) -> bool;
}

pub trait VariableLike {
    fn name(&self) -> Name;
    /// Declared or inferred type, `None` until known.
    fn ty(&self) -> Option<TypeId>;
    fn mutability(&self) -> Option<MutabilityInfo>;
}

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone)]
pub struct Enum {
    pub name: Name,
    pub values: Vec<EnumMemberId>,
    pub is_exported: bool,
    pub leading_trivia: String,
    pub attributes: Option<Attributes>,
    /// Set when the file is added.
    pub parent_file: Option<FileId>,
    /// Set by [`Workspace::add_enum`](crate::Workspace::add_enum).
    pub ty: TypeId,
    pub references: Vec<ExprId>,
}

impl Enum {
    pub fn new(name: Name, values: Vec<EnumMemberId>, is_exported: bool) -> Self {
        Self {
            name,
            values,
            is_exported,
            leading_trivia: String::new(),
            attributes: None,
            parent_file: None,
            ty: TypeId(0),
            references: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnumMember {
    pub name: Name,
    pub parent_enum: Option<EnumId>,
    pub references: Vec<ExprId>,
}

impl EnumMember {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            parent_enum: None,
            references: Vec::new(),
        }
    }
}

// ============================================================================
// Interfaces and classes
// ============================================================================

#[derive(Debug, Clone)]
pub struct Interface {
    pub name: Name,
    pub type_arguments: Vec<Name>,
    pub base_interfaces: Vec<TypeId>,
    pub fields: Vec<FieldId>,
    pub methods: Vec<MethodId>,
    pub is_exported: bool,
    pub leading_trivia: String,
    pub attributes: Option<Attributes>,
    pub parent_file: Option<FileId>,
    /// Interface type over its own generic parameters.
    pub self_type: TypeId,
    /// Flattened ancestors, computed on first demand.
    pub ancestors: OnceCell<Vec<InterfaceLike>>,
}

impl Interface {
    pub fn new(name: Name, type_arguments: Vec<Name>, is_exported: bool) -> Self {
        Self {
            name,
            type_arguments,
            base_interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            is_exported,
            leading_trivia: String::new(),
            attributes: None,
            parent_file: None,
            self_type: TypeId(0),
            ancestors: OnceCell::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Class {
    pub name: Name,
    pub type_arguments: Vec<Name>,
    pub base_class: Option<TypeId>,
    pub base_interfaces: Vec<TypeId>,
    pub fields: Vec<FieldId>,
    pub properties: Vec<PropertyId>,
    pub constructor: Option<ConstructorId>,
    pub methods: Vec<MethodId>,
    pub is_exported: bool,
    pub leading_trivia: String,
    pub attributes: Option<Attributes>,
    pub parent_file: Option<FileId>,
    /// Class type over its own generic parameters.
    pub self_type: TypeId,
    pub ancestors: OnceCell<Vec<InterfaceLike>>,

    pub class_references: Vec<ExprId>,
    pub this_references: Vec<ExprId>,
    pub static_this_references: Vec<ExprId>,
    pub super_references: Vec<ExprId>,
}

impl Class {
    pub fn new(name: Name, type_arguments: Vec<Name>, is_exported: bool) -> Self {
        Self {
            name,
            type_arguments,
            base_class: None,
            base_interfaces: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            constructor: None,
            methods: Vec::new(),
            is_exported,
            leading_trivia: String::new(),
            attributes: None,
            parent_file: None,
            self_type: TypeId(0),
            ancestors: OnceCell::new(),
            class_references: Vec::new(),
            this_references: Vec::new(),
            static_this_references: Vec::new(),
            super_references: Vec::new(),
        }
    }
}

impl InterfaceDecl for Interface {
    fn name(&self) -> Name {
        self.name
    }
    fn type_arguments(&self) -> &[Name] {
        &self.type_arguments
    }
    fn base_types(&self) -> Vec<TypeId> {
        self.base_interfaces.clone()
    }
    fn fields(&self) -> &[FieldId] {
        &self.fields
    }
    fn methods(&self) -> &[MethodId] {
        &self.methods
    }
    fn parent_file(&self) -> Option<FileId> {
        self.parent_file
    }
    fn self_type(&self) -> TypeId {
        self.self_type
    }
    fn ancestor_cache(&self) -> &OnceCell<Vec<InterfaceLike>> {
        &self.ancestors
    }
}

impl InterfaceDecl for Class {
    fn name(&self) -> Name {
        self.name
    }
    fn type_arguments(&self) -> &[Name] {
        &self.type_arguments
    }
    fn base_types(&self) -> Vec<TypeId> {
        self.base_class
            .iter()
            .chain(self.base_interfaces.iter())
            .copied()
            .collect()
    }
    fn fields(&self) -> &[FieldId] {
        &self.fields
    }
    fn methods(&self) -> &[MethodId] {
        &self.methods
    }
    fn parent_file(&self) -> Option<FileId> {
        self.parent_file
    }
    fn self_type(&self) -> TypeId {
        self.self_type
    }
    fn ancestor_cache(&self) -> &OnceCell<Vec<InterfaceLike>> {
        &self.ancestors
    }
}

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Clone)]
pub struct Field {
    pub name: Name,
    pub ty: TypeId,
    pub initializer: Option<ExprId>,
    pub visibility: Visibility,
    pub is_static: bool,
    /// Constructor parameter this field was declared through, if any.
    pub constructor_param: Option<ParamId>,
    pub leading_trivia: String,
    pub attributes: Option<Attributes>,
    pub parent_interface: Option<InterfaceLike>,
    pub static_references: Vec<ExprId>,
    pub instance_references: Vec<ExprId>,
    /// Same-named fields of ancestor interfaces.
    pub interface_declarations: Option<Vec<FieldId>>,
    pub mutability: Option<MutabilityInfo>,
}

impl Field {
    pub fn new(name: Name, ty: TypeId, initializer: Option<ExprId>) -> Self {
        Self {
            name,
            ty,
            initializer,
            visibility: Visibility::Public,
            is_static: false,
            constructor_param: None,
            leading_trivia: String::new(),
            attributes: None,
            parent_interface: None,
            static_references: Vec::new(),
            instance_references: Vec::new(),
            interface_declarations: None,
            mutability: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Property {
    pub name: Name,
    pub ty: TypeId,
    pub getter: Option<Block>,
    pub setter: Option<Block>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub leading_trivia: String,
    pub attributes: Option<Attributes>,
    pub parent_class: Option<ClassId>,
    pub static_references: Vec<ExprId>,
    pub instance_references: Vec<ExprId>,
    pub mutability: Option<MutabilityInfo>,
}

impl Property {
    pub fn new(name: Name, ty: TypeId, getter: Option<Block>, setter: Option<Block>) -> Self {
        Self {
            name,
            ty,
            getter,
            setter,
            visibility: Visibility::Public,
            is_static: false,
            leading_trivia: String::new(),
            attributes: None,
            parent_class: None,
            static_references: Vec::new(),
            instance_references: Vec::new(),
            mutability: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: Name,
    /// Lambda parameters may leave this open until inference.
    pub ty: Option<TypeId>,
    pub initializer: Option<ExprId>,
    pub leading_trivia: String,
    pub attributes: Option<Attributes>,
    pub field_decl: Option<FieldId>,
    pub parent_method: Option<MethodLikeId>,
    pub references: Vec<ExprId>,
    pub mutability: Option<MutabilityInfo>,
}

impl Param {
    pub fn new(name: Name, ty: Option<TypeId>) -> Self {
        Self {
            name,
            ty,
            initializer: None,
            leading_trivia: String::new(),
            attributes: None,
            field_decl: None,
            parent_method: None,
            references: Vec::new(),
            mutability: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Constructor {
    pub parameters: Vec<ParamId>,
    pub body: Block,
    /// Arguments of the `super(...)` call, if the constructor makes one.
    pub super_call_args: Option<Vec<ExprId>>,
    pub throws: bool,
    pub leading_trivia: String,
    pub attributes: Option<Attributes>,
    pub parent_class: Option<ClassId>,
}

impl Constructor {
    pub fn new(parameters: Vec<ParamId>, body: Block) -> Self {
        Self {
            parameters,
            body,
            super_call_args: None,
            throws: false,
            leading_trivia: String::new(),
            attributes: None,
            parent_class: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Method {
    pub name: Name,
    pub type_arguments: Vec<Name>,
    pub parameters: Vec<ParamId>,
    /// `None` for interface methods.
    pub body: Option<Block>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub returns: TypeId,
    pub is_async: bool,
    pub throws: bool,
    pub leading_trivia: String,
    pub attributes: Option<Attributes>,
    pub parent_interface: Option<InterfaceLike>,

    /// Matching methods of ancestor interfaces.
    pub interface_declarations: Option<Vec<MethodId>>,
    /// The ancestor method this one overrides.
    pub overrides: Option<MethodId>,
    pub overridden_by: Vec<MethodId>,
}

impl Method {
    pub fn new(name: Name, parameters: Vec<ParamId>, body: Option<Block>, returns: TypeId) -> Self {
        Self {
            name,
            type_arguments: Vec::new(),
            parameters,
            body,
            visibility: Visibility::Public,
            is_static: false,
            returns,
            is_async: false,
            throws: false,
            leading_trivia: String::new(),
            attributes: None,
            parent_interface: None,
            interface_declarations: None,
            overrides: None,
            overridden_by: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GlobalFunction {
    pub name: Name,
    pub parameters: Vec<ParamId>,
    pub body: Block,
    pub returns: TypeId,
    pub is_exported: bool,
    pub throws: bool,
    pub leading_trivia: String,
    pub attributes: Option<Attributes>,
    pub parent_file: Option<FileId>,
    pub references: Vec<ExprId>,
}

impl GlobalFunction {
    pub fn new(name: Name, parameters: Vec<ParamId>, body: Block, returns: TypeId, is_exported: bool) -> Self {
        Self {
            name,
            parameters,
            body,
            returns,
            is_exported,
            throws: false,
            leading_trivia: String::new(),
            attributes: None,
            parent_file: None,
            references: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Lambda {
    pub parameters: Vec<ParamId>,
    pub body: Block,
    /// Declared return type, or the one taken from the expected type.
    pub returns: Option<TypeId>,
    pub throws: bool,
}

impl Lambda {
    pub fn new(parameters: Vec<ParamId>, body: Block, returns: Option<TypeId>) -> Self {
        Self {
            parameters,
            body,
            returns,
            throws: false,
        }
    }
}

impl MethodLike for Constructor {
    fn parameters(&self) -> &[ParamId] {
        &self.parameters
    }
    fn body(&self) -> Option<&Block> {
        Some(&self.body)
    }
    fn throws(&self) -> bool {
        self.throws
    }
}

impl MethodLike for Method {
    fn parameters(&self) -> &[ParamId] {
        &self.parameters
    }
    fn body(&self) -> Option<&Block> {
        self.body.as_ref()
    }
    fn throws(&self) -> bool {
        self.throws
    }
}

impl MethodLike for GlobalFunction {
    fn parameters(&self) -> &[ParamId] {
        &self.parameters
    }
    fn body(&self) -> Option<&Block> {
        Some(&self.body)
    }
    fn throws(&self) -> bool {
        self.throws
    }
}

impl MethodLike for Lambda {
    fn parameters(&self) -> &[ParamId] {
        &self.parameters
    }
    fn body(&self) -> Option<&Block> {
        Some(&self.body)
    }
    fn throws(&self) -> bool {
        self.throws
    }
}

impl ClassMember for Field {
    fn name(&self) -> Name {
        self.name
    }
    fn visibility(&self) -> Visibility {
        self.visibility
    }
    fn is_static(&self) -> bool {
        self.is_static
    }
    fn parent_interface(&self) -> Option<InterfaceLike> {
        self.parent_interface
    }
}

impl ClassMember for Property {
    fn name(&self) -> Name {
        self.name
    }
    fn visibility(&self) -> Visibility {
        self.visibility
    }
    fn is_static(&self) -> bool {
        self.is_static
    }
    fn parent_interface(&self) -> Option<InterfaceLike> {
        self.parent_class.map(InterfaceLike::Class)
    }
}

impl ClassMember for Method {
    fn name(&self) -> Name {
        self.name
    }
    fn visibility(&self) -> Visibility {
        self.visibility
    }
    fn is_static(&self) -> bool {
        self.is_static
    }
    fn parent_interface(&self) -> Option<InterfaceLike> {
        self.parent_interface
    }
}

// ============================================================================
// Variables
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Local,
    For,
    Foreach,
    Catch,
}

/// A local, for, foreach or catch variable.
#[derive(Debug, Clone)]
pub struct VariableDecl {
    pub name: Name,
    pub ty: Option<TypeId>,
    pub initializer: Option<ExprId>,
    pub kind: VariableKind,
    pub references: Vec<ExprId>,
    pub mutability: Option<MutabilityInfo>,
}

impl VariableDecl {
    pub fn new(name: Name, kind: VariableKind, ty: Option<TypeId>, initializer: Option<ExprId>) -> Self {
        Self {
            name,
            ty,
            initializer,
            kind,
            references: Vec::new(),
            mutability: None,
        }
    }
}

impl VariableLike for Field {
    fn name(&self) -> Name {
        self.name
    }
    fn ty(&self) -> Option<TypeId> {
        Some(self.ty)
    }
    fn mutability(&self) -> Option<MutabilityInfo> {
        self.mutability
    }
}

impl VariableLike for Property {
    fn name(&self) -> Name {
        self.name
    }
    fn ty(&self) -> Option<TypeId> {
        Some(self.ty)
    }
    fn mutability(&self) -> Option<MutabilityInfo> {
        self.mutability
    }
}

impl VariableLike for Param {
    fn name(&self) -> Name {
        self.name
    }
    fn ty(&self) -> Option<TypeId> {
        self.ty
    }
    fn mutability(&self) -> Option<MutabilityInfo> {
        self.mutability
    }
}

impl VariableLike for VariableDecl {
    fn name(&self) -> Name {
        self.name
    }
    fn ty(&self) -> Option<TypeId> {
        self.ty
    }
    fn mutability(&self) -> Option<MutabilityInfo> {
        self.mutability
    }
}
