//! ## Crate layout
//! - `core`: entity models, key naming, the store boundary, the query
//!   builder, and observability.
//! - `error`: the public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module mirrors the surface used by application code that
//! builds and reads queries.

pub use modelset_core as core;

pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        config::KeyConfig,
        model::{AttributeKind, AttributeModel, EntityId, EntityKind, EntityModel},
        query::{ModelSet, QueryMode, RangeOp, RangeValue},
        store::{Direction, MemoryStore, Store as _},
        value::Value,
    };
    pub use crate::error::{Error, ErrorKind, ErrorOrigin};
}
