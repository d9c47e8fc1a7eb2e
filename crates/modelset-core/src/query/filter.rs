//! Equality filter translation.

use crate::{
    key::{KeySpace, StoreKey},
    model::EntityModel,
    query::QueryError,
    value::Value,
};
use std::collections::BTreeMap;

///
/// Intersection
/// One materialized intersection: `dest = sources[0] ∩ sources[1] ∩ ...`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Intersection {
    pub(crate) dest: StoreKey,
    pub(crate) sources: Vec<StoreKey>,
}

/// Translate equality filters into a single intersection of the "all" set
/// with every per-value index set.
///
/// Returns `None` when there are no filters; the caller then reads the "all"
/// set directly.
pub(crate) fn translate(
    model: &EntityModel,
    keys: &KeySpace,
    filters: &BTreeMap<String, Value>,
) -> Result<Option<Intersection>, QueryError> {
    if filters.is_empty() {
        return Ok(None);
    }

    let mut indexes = Vec::with_capacity(filters.len());
    for (attr, value) in filters {
        if !model.is_indexed(attr) {
            return Err(QueryError::not_indexed(attr, model.name));
        }

        let stored = match model.attribute(attr) {
            Some(desc) => desc.typecast_for_storage(value)?,
            None => value.to_string(),
        };
        indexes.push(keys.value(attr, &stored));
    }
    indexes.sort_unstable();

    let dest = keys.intersection(&indexes);
    let mut sources = Vec::with_capacity(indexes.len() + 1);
    sources.push(keys.all().clone());
    sources.extend(indexes);

    Ok(Some(Intersection { dest, sources }))
}
