use crate::{
    key::StoreKey,
    model::{EntityId, EntityKind},
    store::{Store, StoreError},
};
use std::{marker::PhantomData, vec};

///
/// ResolvedIds
///
/// Store-side result of one resolution. The `List` variant names a
/// materialized key that this layer never cleans up.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResolvedIds {
    /// Identifiers read directly from a sorted index.
    Scan(Vec<EntityId>),
    /// Identifiers materialized into a list by sort-and-store.
    List(StoreKey),
}

impl ResolvedIds {
    pub fn len<S: Store + ?Sized>(&self, store: &S) -> Result<usize, StoreError> {
        match self {
            Self::Scan(ids) => Ok(ids.len()),
            Self::List(key) => store.llen(key),
        }
    }

    pub fn is_empty<S: Store + ?Sized>(&self, store: &S) -> Result<bool, StoreError> {
        Ok(self.len(store)? == 0)
    }

    pub fn contains<S: Store + ?Sized>(
        &self,
        store: &S,
        id: &EntityId,
    ) -> Result<bool, StoreError> {
        match self {
            Self::Scan(ids) => Ok(ids.contains(id)),
            Self::List(key) => Ok(store.lrange(key, None)?.contains(id)),
        }
    }

    pub fn get<S: Store + ?Sized>(
        &self,
        store: &S,
        index: usize,
    ) -> Result<Option<EntityId>, StoreError> {
        match self {
            Self::Scan(ids) => Ok(ids.get(index).cloned()),
            Self::List(key) => store.lindex(key, index),
        }
    }

    /// Every identifier, in result order.
    pub fn members<S: Store + ?Sized>(self, store: &S) -> Result<Vec<EntityId>, StoreError> {
        match self {
            Self::Scan(ids) => Ok(ids),
            Self::List(key) => store.lrange(&key, None),
        }
    }
}

///
/// ModelIter
/// Hydrates identifiers into entity handles as they are consumed.
///

pub struct ModelIter<E> {
    ids: vec::IntoIter<EntityId>,
    _marker: PhantomData<fn() -> E>,
}

impl<E> ModelIter<E> {
    pub(crate) fn new(ids: Vec<EntityId>) -> Self {
        Self {
            ids: ids.into_iter(),
            _marker: PhantomData,
        }
    }
}

impl<E: EntityKind> Iterator for ModelIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        self.ids.next().map(E::hydrate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<E: EntityKind> ExactSizeIterator for ModelIter<E> {}
