use crate::{
    config::KeyConfig,
    key::{StoreKey, encode_value},
    model::EntityModel,
    store::{SORT_FIELD_MARKER, SORT_WILDCARD},
};

///
/// KeySpace
///
/// Key naming for one entity type under one key layout.
///

#[derive(Clone, Debug)]
pub struct KeySpace {
    entity: &'static str,
    config: KeyConfig,
    all: StoreKey,
}

impl KeySpace {
    #[must_use]
    pub fn new(model: &EntityModel, config: KeyConfig) -> Self {
        let all = StoreKey::from(format!(
            "{}{}{}",
            model.name, config.separator, config.all_suffix
        ));

        Self {
            entity: model.name,
            config,
            all,
        }
    }

    #[must_use]
    pub const fn entity(&self) -> &'static str {
        self.entity
    }

    #[must_use]
    pub const fn config(&self) -> &KeyConfig {
        &self.config
    }

    /// Set of every identifier of the entity type.
    #[must_use]
    pub const fn all(&self) -> &StoreKey {
        &self.all
    }

    /// Set of identifiers whose `attr` holds the typecast value `stored`.
    #[must_use]
    pub fn value(&self, attr: &str, stored: &str) -> StoreKey {
        let sep = &self.config.separator;

        StoreKey::from(format!(
            "{}{sep}{attr}{sep}{}",
            self.entity,
            encode_value(stored)
        ))
    }

    /// Sorted index of a sorted-numeric attribute.
    #[must_use]
    pub fn sorted(&self, attr: &str) -> StoreKey {
        StoreKey::from(format!("{}{}{attr}", self.entity, self.config.separator))
    }

    /// Hash holding the stored attributes of one entity.
    #[must_use]
    pub fn hash(&self, id: &str) -> StoreKey {
        StoreKey::from(format!("{}{}{id}", self.entity, self.config.separator))
    }

    /// External pattern the store uses to fetch `attr` per element while sorting.
    #[must_use]
    pub fn sort_pattern(&self, attr: &str) -> String {
        format!(
            "{}{}{SORT_WILDCARD}{SORT_FIELD_MARKER}{attr}",
            self.entity, self.config.separator
        )
    }

    /// Intersection of the "all" set with every key in `indexes`.
    ///
    /// Constituent keys are sorted and deduplicated first, so the result does
    /// not depend on filter insertion order.
    #[must_use]
    pub fn intersection(&self, indexes: &[StoreKey]) -> StoreKey {
        let mut parts: Vec<&str> = indexes.iter().map(StoreKey::as_str).collect();
        parts.sort_unstable();
        parts.dedup();

        let mut key = format!("{}{}", self.config.composite_prefix, self.all);
        for part in parts {
            key.push_str(&self.config.composite_join);
            key.push_str(part);
        }

        StoreKey::from(key)
    }

    /// List materialized from `source` ordered by `term` (`attr` or `-attr`).
    ///
    /// The direction prefix stays in the key name, so `src#age` and
    /// `src#-age` are separate lists and never overwrite each other.
    #[must_use]
    pub fn ordered(&self, source: &StoreKey, term: &str) -> StoreKey {
        StoreKey::from(format!("{source}{}{term}", self.config.order_marker))
    }

    /// List materialized from `source` in identifier order.
    #[must_use]
    pub fn unordered(&self, source: &StoreKey) -> StoreKey {
        StoreKey::from(format!("{source}{}", self.config.order_marker))
    }
}
