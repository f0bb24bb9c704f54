//! Typed ids for every arena-allocated entity.

use xlate_core::define_idx;

define_idx! {
    /// Index of a package in the workspace.
    pub struct PackageId;
}
define_idx! {
    /// Index of a source file.
    pub struct FileId;
}
define_idx! {
    pub struct ImportId;
}
define_idx! {
    pub struct ClassId;
}
define_idx! {
    pub struct InterfaceId;
}
define_idx! {
    pub struct EnumId;
}
define_idx! {
    pub struct EnumMemberId;
}
define_idx! {
    /// Index of a global (file-level) function.
    pub struct FunctionId;
}
define_idx! {
    pub struct MethodId;
}
define_idx! {
    pub struct ConstructorId;
}
define_idx! {
    pub struct FieldId;
}
define_idx! {
    pub struct PropertyId;
}
define_idx! {
    /// Index of a method, constructor, function or lambda parameter.
    pub struct ParamId;
}
define_idx! {
    /// Index of a local, for, foreach or catch variable.
    pub struct VariableId;
}
define_idx! {
    pub struct LambdaId;
}
define_idx! {
    pub struct ExprId;
}
define_idx! {
    pub struct StmtId;
}
define_idx! {
    /// Index of an interned type in the [`TypeTable`](crate::types::TypeTable).
    pub struct TypeId;
}
