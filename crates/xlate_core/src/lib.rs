//! xlate_core: Core utilities for the xlate translation compiler.
//!
//! Provides typed index arenas and string interning used throughout the
//! resolution and inference pipeline.

pub mod arena;
pub mod intern;

// Re-export commonly used types
pub use arena::{Arena, Idx};
pub use intern::{Name, NameTable};
