//! The built-in inference plugins.

mod basic;
mod call;
mod composite;
mod member;
mod reference;

pub use basic::BasicTypeInfer;
pub use call::{call_type, CallResolver};
pub use composite::CompositeTypeInfer;
pub use member::MemberAccessResolver;
pub use reference::{instance_member_type, ReferenceTypeInfer};

use crate::plugin::InferTypesPlugin;

/// The default pipeline. Resolvers that rewrite nodes run before the
/// plugins that only type them; the catch-all basic rules run last.
pub fn default_plugins() -> Vec<Box<dyn InferTypesPlugin>> {
    vec![
        Box::new(MemberAccessResolver),
        Box::new(CallResolver),
        Box::new(ReferenceTypeInfer),
        Box::new(CompositeTypeInfer),
        Box::new(BasicTypeInfer),
    ]
}
