//! xlate_ast: The resolved symbol model of the translation compiler.
//!
//! Declarations, expressions and statements are stored in arenas owned by a
//! [`Workspace`] and addressed by typed ids. This crate also holds the type
//! system (interned types, equality, assignability), the lazily flattened
//! inheritance hierarchy and the reference index.

pub mod builder;
pub mod decl;
pub mod display;
pub mod expr;
pub mod hierarchy;
pub mod ids;
pub mod references;
pub mod relations;
pub mod stmt;
pub mod types;
pub mod visitor;
pub mod workspace;

// Re-export key types
pub use builder::FileBuilder;
pub use decl::*;
pub use expr::{BinaryOp, Expr, ExprKind, Reference, TemplatePart, UnaryOp};
pub use ids::*;
pub use stmt::{Block, Stmt, StmtKind};
pub use types::{LiteralTypes, TypeKind, TypeTable};
pub use workspace::{
    AvailableSymbol, ExportScopeRef, ExportedScope, Import, ImportItem, Package, Result,
    SourceFile, SourcePath, Workspace,
};
