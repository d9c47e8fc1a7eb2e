use crate::{
    key::KeySpace,
    model::{EntityId, attribute::AttributeModel},
    store::{Store, StoreError},
};

///
/// EntityModel
/// Minimal runtime model for one entity type.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Stable external name used as the key prefix.
    pub name: &'static str,
    /// Attribute descriptors (authoritative for typecasting).
    pub attributes: &'static [AttributeModel],
    /// Attributes that carry a store-side index.
    pub indexes: &'static [&'static str],
}

impl EntityModel {
    /// Look up an attribute descriptor by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'static AttributeModel> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Whether `name` is declared indexed on this entity.
    #[must_use]
    pub fn is_indexed(&self, name: &str) -> bool {
        self.indexes.contains(&name)
    }
}

///
/// EntityKind
///
/// An entity type the query layer can resolve identifiers for.
/// `hydrate` builds a lazy handle and must not touch the store.
///

pub trait EntityKind: Sized {
    const MODEL: &'static EntityModel;

    fn hydrate(id: EntityId) -> Self;

    /// Whether `id` currently belongs to this entity type.
    fn exists<S: Store + ?Sized>(
        store: &S,
        keys: &KeySpace,
        id: &EntityId,
    ) -> Result<bool, StoreError> {
        store.sismember(keys.all(), id)
    }
}
