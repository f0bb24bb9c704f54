//! Name interning for the compiler.
//!
//! Declaration names, export scope names and package names are interned so
//! that symbol tables compare and hash a `u32` instead of a string.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// An interned name. Comparing two `Name` values is an integer comparison.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Name(Spur);

impl Name {
    #[inline]
    fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }

    #[inline]
    fn as_spur(self) -> Spur {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.0)
    }
}

/// Shared name table.
///
/// Cloning is cheap and every clone sees the same names, so passes can hold a
/// handle while mutating the rest of the workspace.
#[derive(Clone)]
pub struct NameTable {
    rodeo: Arc<ThreadedRodeo>,
}

impl NameTable {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Intern a name, returning the existing handle if it was seen before.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        Name::from_spur(self.rodeo.get_or_intern(s))
    }

    /// Look up a name without interning it.
    #[inline]
    pub fn get(&self, s: &str) -> Option<Name> {
        self.rodeo.get(s).map(Name::from_spur)
    }

    /// Resolve a handle back to its text.
    #[inline]
    pub fn resolve(&self, name: Name) -> &str {
        self.rodeo.resolve(&name.as_spur())
    }

    /// Join names with `.`, the separator of the `<package>.<scope>.<symbol>`
    /// addressing format.
    pub fn dotted(&self, parts: &[Name]) -> String {
        parts
            .iter()
            .map(|n| self.resolve(*n))
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NameTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameTable")
            .field("len", &self.len())
            .finish()
    }
}
