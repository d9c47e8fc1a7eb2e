//! Store boundary.
//!
//! The query layer only ever talks to a key-value store through [`Store`]:
//! set primitives, sorted-set range reads, list reads, and one generic
//! sort-and-store. Each primitive is atomic on its own; sequences of
//! primitives issued by one resolution are not.

mod memory;

pub use memory::MemoryStore;

use crate::{
    error::{ErrorClass, ErrorOrigin},
    key::StoreKey,
    model::EntityId,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Element placeholder in an external sort pattern.
pub const SORT_WILDCARD: &str = "*";

/// Separates the hash key from the hash field in an external sort pattern.
pub const SORT_FIELD_MARKER: &str = "->";

///
/// Store
///
/// Primitive operations consumed by query resolution.
/// Reads of a missing key behave as reads of an empty structure.
///

pub trait Store {
    /// Whether `member` belongs to the set at `key`.
    fn sismember(&self, key: &StoreKey, member: &str) -> Result<bool, StoreError>;

    /// Cardinality of the set at `key`.
    fn scard(&self, key: &StoreKey) -> Result<usize, StoreError>;

    /// Intersect the sets at `keys` and store the result under `dest`.
    /// Returns the cardinality of the stored result.
    fn sinterstore(&self, dest: &StoreKey, keys: &[StoreKey]) -> Result<usize, StoreError>;

    /// Read members of the sorted set at `key` whose score falls in `range`.
    fn zrange_by_score(
        &self,
        key: &StoreKey,
        range: ScoreRange,
        direction: Direction,
        window: Option<Window>,
    ) -> Result<Vec<EntityId>, StoreError>;

    /// Sort the collection at `request.key` and store the result as a list.
    /// Returns the number of stored elements.
    fn sort_store(&self, request: &SortRequest) -> Result<usize, StoreError>;

    /// Length of the list at `key`.
    fn llen(&self, key: &StoreKey) -> Result<usize, StoreError>;

    /// Read the list at `key`, optionally restricted to a window.
    fn lrange(&self, key: &StoreKey, window: Option<Window>) -> Result<Vec<EntityId>, StoreError>;

    /// Element at `index` of the list at `key`.
    fn lindex(&self, key: &StoreKey, index: usize) -> Result<Option<EntityId>, StoreError>;
}

///
/// Direction
///
/// Traversal direction shared by range reads and sort-and-store.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

///
/// ScoreBound
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScoreBound {
    NegInf,
    PosInf,
    Inclusive(f64),
    Exclusive(f64),
}

impl ScoreBound {
    fn admits_above(self, score: f64) -> bool {
        match self {
            Self::NegInf => true,
            Self::PosInf => false,
            Self::Inclusive(bound) => score >= bound,
            Self::Exclusive(bound) => score > bound,
        }
    }

    fn admits_below(self, score: f64) -> bool {
        match self {
            Self::NegInf => false,
            Self::PosInf => true,
            Self::Inclusive(bound) => score <= bound,
            Self::Exclusive(bound) => score < bound,
        }
    }
}

///
/// ScoreRange
/// Score interval of a sorted-set range read.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreRange {
    pub min: ScoreBound,
    pub max: ScoreBound,
}

impl ScoreRange {
    #[must_use]
    pub const fn new(min: ScoreBound, max: ScoreBound) -> Self {
        Self { min, max }
    }

    /// Whether `score` lies within the range. An inverted range admits nothing.
    #[must_use]
    pub fn contains(&self, score: f64) -> bool {
        self.min.admits_above(score) && self.max.admits_below(score)
    }
}

///
/// Window
/// Pagination window applied store-side.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Window {
    pub offset: usize,
    pub limit: usize,
}

impl Window {
    #[must_use]
    pub const fn new(limit: usize, offset: usize) -> Self {
        Self { offset, limit }
    }

    /// Apply the window to an already-ordered sequence.
    pub(crate) fn apply<T>(window: Option<Self>, items: impl Iterator<Item = T>) -> Vec<T> {
        match window {
            Some(Self { offset, limit }) => items.skip(offset).take(limit).collect(),
            None => items.collect(),
        }
    }
}

///
/// SortMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortMode {
    /// Compare sort values as doubles.
    Numeric,
    /// Compare sort values as byte strings.
    Alpha,
}

///
/// SortRequest
/// Parameters of one sort-and-store.
///

#[derive(Clone, Debug, PartialEq)]
pub struct SortRequest {
    /// Collection to sort.
    pub key: StoreKey,
    /// External pattern fetching the sort value per element; `None` sorts
    /// by the element itself.
    pub by: Option<String>,
    pub mode: SortMode,
    pub direction: Direction,
    pub window: Option<Window>,
    /// Destination list.
    pub store: StoreKey,
}

///
/// StoreError
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("key '{key}' holds the wrong kind of value")]
    WrongType { key: String },

    #[error("sort value '{value}' for element '{element}' is not a number")]
    NotNumeric { element: String, value: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Store
    }

    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Store
    }
}
