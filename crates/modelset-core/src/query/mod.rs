//! Query builder and the translators behind it.
//!
//! A [`ModelSet`] accumulates refinements without touching the store. On
//! every read it is translated into a [`QueryPlan`] (a short list of store
//! commands) and executed once; nothing is cached between reads.
//!
//! Translation picks exactly one [`QueryMode`]:
//! - `Range`: the first range filter becomes one sorted-set range read.
//!   Equality filters and ordering are ignored.
//! - `Equality`: equality filters become one materialized intersection,
//!   then the ordering pass.
//! - `All`: the "all identifiers" set goes straight to the ordering pass.

mod error;
mod filter;
mod order;
mod plan;
mod range;
mod resolved;
mod set;

pub use error::QueryError;
pub use order::OrderTerm;
pub use plan::{PlanOutput, QueryMode, QueryPlan, StoreCommand};
pub use range::{RangeOp, RangeValue};
pub use resolved::{ModelIter, ResolvedIds};
pub use set::ModelSet;
