//! xlate_infer: Type inference for the translation compiler.
//!
//! Runs after identifier resolution. Every reachable expression receives a
//! concrete type; along the way unresolved calls and member accesses are
//! rewritten into their resolved forms. The work is split between plugins
//! implementing [`InferTypesPlugin`], driven to a fixpoint by
//! [`TypeInferrer`].

pub mod engine;
pub mod expected;
pub mod generics;
pub mod plugin;
pub mod plugins;
pub mod signature;

pub use engine::{InferStats, TypeInferrer, DEFAULT_MAX_SWEEPS};
pub use plugin::{InferContext, InferTypesPlugin};
pub use plugins::default_plugins;

use xlate_ast::{Result, Workspace};

/// Infer types over the whole workspace with the default plugin pipeline.
pub fn infer_types(ws: &mut Workspace, max_sweeps: usize) -> Result<InferStats> {
    TypeInferrer::new(max_sweeps).run(ws)
}
