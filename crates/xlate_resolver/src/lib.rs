//! xlate_resolver: Resolution passes of the translation compiler.
//!
//! The passes run in this order, each over the whole workspace:
//! import resolution, inheritance resolution, identifier resolution.
//! Mutability analysis runs last, after type inference.

pub mod identifiers;
pub mod imports;
pub mod inheritance;
pub mod mutability;
pub mod scope;

pub use identifiers::resolve_identifiers;
pub use imports::{resolve_file_imports, resolve_imports};
pub use inheritance::resolve_inheritance;
pub use mutability::fill_mutability;
pub use scope::{LocalSymbol, ScopeChain};
