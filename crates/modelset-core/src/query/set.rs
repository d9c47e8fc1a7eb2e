use crate::{
    config::KeyConfig,
    key::KeySpace,
    model::{EntityId, EntityKind},
    query::{
        QueryError,
        filter,
        order::{self, OrderTerm},
        plan::{PlanOutput, QueryMode, QueryPlan, StoreCommand},
        range::{self, RangeFilter, RangeOp, RangeValue},
        resolved::{ModelIter, ResolvedIds},
    },
    store::{Store, Window},
    value::Value,
};
use std::{collections::BTreeMap, fmt, marker::PhantomData, rc::Rc};

///
/// ModelSet
///
/// Lazy, immutable query over the identifiers of one entity type.
///
/// Every refinement returns a new `ModelSet`; the receiver is left untouched
/// and unmodified state is shared between the two. Reads translate the
/// current state into a [`QueryPlan`] and execute it against the store.
///

pub struct ModelSet<'s, E: EntityKind, S: Store + ?Sized> {
    store: &'s S,
    keys: Rc<KeySpace>,
    filters: Rc<BTreeMap<String, Value>>,
    range_filters: Rc<Vec<RangeFilter>>,
    ordering: Rc<Vec<OrderTerm>>,
    window: Option<Window>,
    _marker: PhantomData<fn() -> E>,
}

impl<'s, E: EntityKind, S: Store + ?Sized> ModelSet<'s, E, S> {
    /// Bind an empty query to `store` using the default key layout.
    #[must_use]
    pub fn new(store: &'s S) -> Self {
        Self::with_config(store, KeyConfig::default())
    }

    /// Bind an empty query to `store` using a custom key layout.
    #[must_use]
    pub fn with_config(store: &'s S, config: KeyConfig) -> Self {
        Self {
            store,
            keys: Rc::new(KeySpace::new(E::MODEL, config)),
            filters: Rc::default(),
            range_filters: Rc::default(),
            ordering: Rc::default(),
            window: None,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn keys(&self) -> &KeySpace {
        &self.keys
    }

    ///
    /// REFINEMENTS
    ///

    /// Copy of the current query.
    #[must_use]
    pub fn all(&self) -> Self {
        self.clone()
    }

    /// Require `attr == value`; a second filter on the same attribute replaces
    /// the first. Index membership is checked at resolution.
    #[must_use]
    pub fn filter(&self, attr: &str, value: impl Into<Value>) -> Self {
        let mut clone = self.clone();
        Rc::make_mut(&mut clone.filters).insert(attr.to_string(), value.into());
        clone
    }

    /// Append a single-bound range filter on a sorted-numeric attribute.
    #[must_use]
    pub fn range_filter(&self, attr: &str, op: RangeOp, value: impl Into<Value>) -> Self {
        self.push_range(RangeFilter::new(attr, op, RangeValue::scalar(value)))
    }

    /// Append a closed-interval range filter (`in`).
    #[must_use]
    pub fn between(&self, attr: &str, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        self.push_range(RangeFilter::new(attr, RangeOp::In, RangeValue::pair(min, max)))
    }

    /// Append a range filter in expression form (`age__gte`). The expression
    /// is parsed at resolution.
    #[must_use]
    pub fn zfilter(&self, expr: &str, value: RangeValue) -> Self {
        self.push_range(RangeFilter {
            expr: expr.to_string(),
            value,
        })
    }

    /// Append an ordering term: `attr` ascending, `-attr` descending.
    ///
    /// Only the first ordering term takes effect at resolution.
    pub fn order(&self, token: &str) -> Result<Self, QueryError> {
        let term = OrderTerm::parse(E::MODEL, token)?;

        let mut clone = self.clone();
        Rc::make_mut(&mut clone.ordering).push(term);
        Ok(clone)
    }

    /// Set the pagination window. Limit and offset go together: supplying
    /// exactly one is rejected, supplying neither clears pagination.
    pub fn limit(&self, limit: Option<usize>, offset: Option<usize>) -> Result<Self, QueryError> {
        let window = match (limit, offset) {
            (Some(limit), Some(offset)) => Some(Window::new(limit, offset)),
            (None, None) => None,
            _ => {
                return Err(QueryError::InvalidArgument(
                    "limit and offset must be specified together".to_string(),
                ));
            }
        };

        let mut clone = self.clone();
        clone.window = window;
        Ok(clone)
    }

    /// Set the pagination window from both parts.
    #[must_use]
    pub fn page(&self, limit: usize, offset: usize) -> Self {
        let mut clone = self.clone();
        clone.window = Some(Window::new(limit, offset));
        clone
    }

    fn push_range(&self, filter: RangeFilter) -> Self {
        let mut clone = self.clone();
        Rc::make_mut(&mut clone.range_filters).push(filter);
        clone
    }

    ///
    /// TRANSLATION
    ///

    #[must_use]
    pub fn mode(&self) -> QueryMode {
        if !self.range_filters.is_empty() {
            QueryMode::Range
        } else if !self.filters.is_empty() {
            QueryMode::Equality
        } else {
            QueryMode::All
        }
    }

    /// Translate the current state into store commands without issuing them.
    pub fn explain(&self) -> Result<QueryPlan, QueryError> {
        let model = E::MODEL;
        let mode = self.mode();
        let mut commands = Vec::new();

        let output = if let Some(first) = self.range_filters.first() {
            let scan = range::translate(model, &self.keys, first, self.window)?;
            commands.push(StoreCommand::from(scan));

            PlanOutput::Scan
        } else {
            let source = match filter::translate(model, &self.keys, &self.filters)? {
                Some(intersection) => {
                    let dest = intersection.dest.clone();
                    commands.push(StoreCommand::from(intersection));
                    dest
                }
                None => self.keys.all().clone(),
            };

            let sort = order::translate(&self.keys, &source, &self.ordering, self.window);
            let list = sort.store.clone();
            commands.push(StoreCommand::SortStore(sort));

            PlanOutput::List(list)
        };

        Ok(QueryPlan {
            entity: model.name,
            mode,
            commands,
            output,
        })
    }

    /// Translate and execute once.
    pub fn resolve(&self) -> Result<ResolvedIds, QueryError> {
        self.explain()?.execute(self.store)
    }

    ///
    /// READS
    ///

    /// Number of identifiers the query currently resolves to.
    pub fn count(&self) -> Result<usize, QueryError> {
        Ok(self.resolve()?.len(self.store)?)
    }

    /// Whether `id` is part of the current result.
    pub fn contains(&self, id: &EntityId) -> Result<bool, QueryError> {
        Ok(self.resolve()?.contains(self.store, id)?)
    }

    /// Entity at position `index` of the current result.
    pub fn get(&self, index: usize) -> Result<Option<E>, QueryError> {
        let id = self.resolve()?.get(self.store, index)?;

        Ok(id.map(E::hydrate))
    }

    /// First entity of the current result.
    pub fn first(&self) -> Result<Option<E>, QueryError> {
        self.get(0)
    }

    /// Entity with identifier `id`, if the entity type holds it.
    /// Filters and pagination do not apply.
    pub fn get_by_id(&self, id: impl Into<EntityId>) -> Result<Option<E>, QueryError> {
        let id = id.into();
        if E::exists(self.store, &self.keys, &id)? {
            Ok(Some(E::hydrate(id)))
        } else {
            Ok(None)
        }
    }

    /// Every identifier of the current result, in order.
    pub fn ids(&self) -> Result<Vec<EntityId>, QueryError> {
        Ok(self.resolve()?.members(self.store)?)
    }

    /// Resolve and iterate lazily hydrated entity handles.
    ///
    /// Each call resolves again; two iterations may observe different
    /// results under concurrent writers.
    pub fn iter(&self) -> Result<ModelIter<E>, QueryError> {
        Ok(ModelIter::new(self.ids()?))
    }
}

impl<E: EntityKind, S: Store + ?Sized> Clone for ModelSet<'_, E, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            keys: Rc::clone(&self.keys),
            filters: Rc::clone(&self.filters),
            range_filters: Rc::clone(&self.range_filters),
            ordering: Rc::clone(&self.ordering),
            window: self.window,
            _marker: PhantomData,
        }
    }
}

impl<E: EntityKind, S: Store + ?Sized> fmt::Debug for ModelSet<'_, E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSet")
            .field("entity", &E::MODEL.name)
            .field("filters", &self.filters)
            .field("range_filters", &self.range_filters)
            .field("ordering", &self.ordering)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

impl<E: EntityKind, S: Store + ?Sized> fmt::Display for ModelSet<'_, E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<ModelSet {}>", E::MODEL.name)
    }
}
