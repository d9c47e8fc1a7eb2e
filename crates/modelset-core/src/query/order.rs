//! Ordering translation.

use crate::{
    key::{KeySpace, StoreKey},
    model::EntityModel,
    query::QueryError,
    store::{Direction, SortMode, SortRequest, Window},
};

///
/// OrderTerm
///
/// One ordering request: attribute, direction, and the comparison mode
/// the store should sort with. Built from `attr` / `-attr` tokens.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderTerm {
    pub attribute: String,
    pub direction: Direction,
    pub mode: SortMode,
}

impl OrderTerm {
    /// Parse an ordering token (`attr` or `-attr`) against the entity model.
    ///
    /// Fails when the attribute is not declared indexed.
    pub(crate) fn parse(model: &EntityModel, token: &str) -> Result<Self, QueryError> {
        let attribute = token.trim_start_matches('-');
        let direction = if token.starts_with('-') {
            Direction::Desc
        } else {
            Direction::Asc
        };

        if attribute.is_empty() || !model.is_indexed(attribute) {
            return Err(QueryError::InvalidArgument(format!(
                "order parameter should be an indexed attribute, got '{token}'"
            )));
        }

        let mode = match model.attribute(attribute) {
            Some(desc) if desc.is_sorted_numeric() => SortMode::Numeric,
            _ => SortMode::Alpha,
        };

        Ok(Self {
            attribute: attribute.to_string(),
            direction,
            mode,
        })
    }

    /// Canonical token (`attr` or `-attr`), used in materialized key names.
    #[must_use]
    pub fn token(&self) -> String {
        match self.direction {
            Direction::Asc => self.attribute.clone(),
            Direction::Desc => format!("-{}", self.attribute),
        }
    }
}

/// Translate the ordering pass over `source` into one sort-and-store.
///
/// Without ordering terms the source is materialized in identifier order.
/// With terms, only the first one is executed; later terms are accepted by
/// the builder but never compose into the result.
pub(crate) fn translate(
    keys: &KeySpace,
    source: &StoreKey,
    terms: &[OrderTerm],
    window: Option<Window>,
) -> SortRequest {
    match terms.first() {
        Some(term) => SortRequest {
            key: source.clone(),
            by: Some(keys.sort_pattern(&term.attribute)),
            mode: term.mode,
            direction: term.direction,
            window,
            store: keys.ordered(source, &term.token()),
        },
        None => SortRequest {
            key: source.clone(),
            by: None,
            mode: SortMode::Numeric,
            direction: Direction::Asc,
            window,
            store: keys.unordered(source),
        },
    }
}
