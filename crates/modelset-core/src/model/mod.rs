//! Runtime entity metadata consumed by the query layer.
//!
//! Models are static descriptors: which attributes exist, how each one is
//! typecast for storage, and which of them carry an index. Index maintenance
//! and persistence live outside this crate.

mod attribute;
mod entity;
mod id;

pub use attribute::{AttributeKind, AttributeModel, TypecastError};
pub use entity::{EntityKind, EntityModel};
pub use id::EntityId;

#[cfg(test)]
mod tests;
