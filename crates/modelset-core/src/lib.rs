//! Core runtime for modelset: entity models, key naming, the store boundary,
//! and the lazy query builder that translates refinements into store commands.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod error;
pub mod key;
pub mod model;
pub mod obs;
pub mod query;
pub mod store;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Separator between attribute name and operator in a range expression
/// such as `age__gte`.
pub const RANGE_EXPR_SEPARATOR: &str = "__";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{AttributeKind, AttributeModel, EntityId, EntityKind, EntityModel},
        query::{ModelSet, RangeOp, RangeValue},
        store::Direction,
        value::Value,
    };
}
