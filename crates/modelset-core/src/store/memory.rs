use crate::{
    key::StoreKey,
    model::EntityId,
    store::{
        Direction, SORT_FIELD_MARKER, SORT_WILDCARD, ScoreRange, SortMode, SortRequest, Store,
        StoreError, Window,
    },
};
use std::{
    cell::RefCell,
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
};

///
/// Entry
///

#[derive(Clone, Debug)]
enum Entry {
    Set(BTreeSet<String>),
    SortedSet(BTreeMap<String, f64>),
    Hash(BTreeMap<String, String>),
    List(Vec<String>),
}

///
/// MemoryStore
///
/// Single-threaded in-memory store implementing the primitives the query
/// layer consumes, plus the writers index maintenance would use.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<BTreeMap<StoreKey, Entry>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// WRITERS
    ///

    /// Add `member` to the set at `key`. Returns false if already present.
    pub fn sadd(&self, key: &StoreKey, member: &str) -> Result<bool, StoreError> {
        let mut data = self.data.borrow_mut();
        let entry = data
            .entry(key.clone())
            .or_insert_with(|| Entry::Set(BTreeSet::new()));

        match entry {
            Entry::Set(set) => Ok(set.insert(member.to_string())),
            _ => Err(wrong_type(key)),
        }
    }

    /// Remove `member` from the set at `key`.
    pub fn srem(&self, key: &StoreKey, member: &str) -> Result<bool, StoreError> {
        let mut data = self.data.borrow_mut();
        let removed = match data.get_mut(key) {
            None => return Ok(false),
            Some(Entry::Set(set)) => set.remove(member),
            Some(_) => return Err(wrong_type(key)),
        };
        drop_if_empty(&mut data, key);

        Ok(removed)
    }

    /// Set the score of `member` in the sorted set at `key`.
    pub fn zadd(&self, key: &StoreKey, member: &str, score: f64) -> Result<(), StoreError> {
        let mut data = self.data.borrow_mut();
        let entry = data
            .entry(key.clone())
            .or_insert_with(|| Entry::SortedSet(BTreeMap::new()));

        match entry {
            Entry::SortedSet(zset) => {
                zset.insert(member.to_string(), score);
                Ok(())
            }
            _ => Err(wrong_type(key)),
        }
    }

    /// Set `field` of the hash at `key`.
    pub fn hset(&self, key: &StoreKey, field: &str, value: &str) -> Result<(), StoreError> {
        let mut data = self.data.borrow_mut();
        let entry = data
            .entry(key.clone())
            .or_insert_with(|| Entry::Hash(BTreeMap::new()));

        match entry {
            Entry::Hash(hash) => {
                hash.insert(field.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(wrong_type(key)),
        }
    }

    /// Append `value` to the list at `key`.
    pub fn rpush(&self, key: &StoreKey, value: &str) -> Result<usize, StoreError> {
        let mut data = self.data.borrow_mut();
        let entry = data
            .entry(key.clone())
            .or_insert_with(|| Entry::List(Vec::new()));

        match entry {
            Entry::List(list) => {
                list.push(value.to_string());
                Ok(list.len())
            }
            _ => Err(wrong_type(key)),
        }
    }

    /// Delete `key`. Returns whether it existed.
    pub fn del(&self, key: &StoreKey) -> bool {
        self.data.borrow_mut().remove(key).is_some()
    }

    ///
    /// INSPECTION
    ///

    #[must_use]
    pub fn contains_key(&self, key: &StoreKey) -> bool {
        self.data.borrow().contains_key(key)
    }

    /// All keys currently held, in key order.
    #[must_use]
    pub fn keys(&self) -> Vec<StoreKey> {
        self.data.borrow().keys().cloned().collect()
    }

    /// Members of the set at `key`, in lexicographic order.
    pub fn smembers(&self, key: &StoreKey) -> Result<Vec<String>, StoreError> {
        match self.data.borrow().get(key) {
            None => Ok(Vec::new()),
            Some(Entry::Set(set)) => Ok(set.iter().cloned().collect()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    ///
    /// HELPERS
    ///

    // Elements of a sortable collection: set, list, or sorted-set members.
    fn sortable_elements(&self, key: &StoreKey) -> Result<Vec<String>, StoreError> {
        match self.data.borrow().get(key) {
            None => Ok(Vec::new()),
            Some(Entry::Set(set)) => Ok(set.iter().cloned().collect()),
            Some(Entry::List(list)) => Ok(list.clone()),
            Some(Entry::SortedSet(zset)) => Ok(zset.keys().cloned().collect()),
            Some(Entry::Hash(_)) => Err(wrong_type(key)),
        }
    }

    // Resolve an external sort pattern for one element.
    // Only hash-field patterns (`prefix*->field`) resolve to a value. The
    // field marker is located in the pattern before the element is
    // substituted, so elements may themselves contain the marker.
    fn lookup_pattern(&self, pattern: &str, element: &str) -> Option<String> {
        let (key_pattern, field) = pattern.split_once(SORT_FIELD_MARKER)?;
        let hash_key = key_pattern.replacen(SORT_WILDCARD, element, 1);

        match self.data.borrow().get(&StoreKey::from(hash_key)) {
            Some(Entry::Hash(hash)) => hash.get(field).cloned(),
            _ => None,
        }
    }

    fn write_list(&self, key: &StoreKey, list: Vec<String>) {
        let mut data = self.data.borrow_mut();
        if list.is_empty() {
            data.remove(key);
        } else {
            data.insert(key.clone(), Entry::List(list));
        }
    }
}

impl Store for MemoryStore {
    fn sismember(&self, key: &StoreKey, member: &str) -> Result<bool, StoreError> {
        match self.data.borrow().get(key) {
            None => Ok(false),
            Some(Entry::Set(set)) => Ok(set.contains(member)),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn scard(&self, key: &StoreKey) -> Result<usize, StoreError> {
        match self.data.borrow().get(key) {
            None => Ok(0),
            Some(Entry::Set(set)) => Ok(set.len()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn sinterstore(&self, dest: &StoreKey, keys: &[StoreKey]) -> Result<usize, StoreError> {
        let mut result: Option<BTreeSet<String>> = None;

        for key in keys {
            let members: BTreeSet<String> = self.smembers(key)?.into_iter().collect();
            result = Some(match result {
                None => members,
                Some(acc) => acc.intersection(&members).cloned().collect(),
            });
        }

        let result = result.unwrap_or_default();
        let len = result.len();

        let mut data = self.data.borrow_mut();
        if result.is_empty() {
            data.remove(dest);
        } else {
            data.insert(dest.clone(), Entry::Set(result));
        }

        Ok(len)
    }

    fn zrange_by_score(
        &self,
        key: &StoreKey,
        range: ScoreRange,
        direction: Direction,
        window: Option<Window>,
    ) -> Result<Vec<EntityId>, StoreError> {
        let mut scored: Vec<(f64, String)> = match self.data.borrow().get(key) {
            None => return Ok(Vec::new()),
            Some(Entry::SortedSet(zset)) => zset
                .iter()
                .filter(|(_, score)| range.contains(**score))
                .map(|(member, score)| (*score, member.clone()))
                .collect(),
            Some(_) => return Err(wrong_type(key)),
        };

        scored.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        if direction == Direction::Desc {
            scored.reverse();
        }

        let members = scored.into_iter().map(|(_, member)| EntityId::from(member));

        Ok(Window::apply(window, members))
    }

    fn sort_store(&self, request: &SortRequest) -> Result<usize, StoreError> {
        let elements = self.sortable_elements(&request.key)?;

        let mut keyed: Vec<(SortValue, String)> = Vec::with_capacity(elements.len());
        for element in elements {
            let raw = match &request.by {
                Some(pattern) => self.lookup_pattern(pattern, &element),
                None => Some(element.clone()),
            };
            let value = SortValue::parse(request.mode, raw, &element)?;
            keyed.push((value, element));
        }

        keyed.sort_by(|a, b| {
            let cmp = a.0.compare(&b.0).then_with(|| a.1.cmp(&b.1));
            match request.direction {
                Direction::Asc => cmp,
                Direction::Desc => cmp.reverse(),
            }
        });

        let sorted = Window::apply(request.window, keyed.into_iter().map(|(_, e)| e));
        let len = sorted.len();
        self.write_list(&request.store, sorted);

        Ok(len)
    }

    fn llen(&self, key: &StoreKey) -> Result<usize, StoreError> {
        match self.data.borrow().get(key) {
            None => Ok(0),
            Some(Entry::List(list)) => Ok(list.len()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn lrange(&self, key: &StoreKey, window: Option<Window>) -> Result<Vec<EntityId>, StoreError> {
        match self.data.borrow().get(key) {
            None => Ok(Vec::new()),
            Some(Entry::List(list)) => Ok(Window::apply(
                window,
                list.iter().map(|id| EntityId::from(id.as_str())),
            )),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn lindex(&self, key: &StoreKey, index: usize) -> Result<Option<EntityId>, StoreError> {
        match self.data.borrow().get(key) {
            None => Ok(None),
            Some(Entry::List(list)) => Ok(list.get(index).map(|id| EntityId::from(id.as_str()))),
            Some(_) => Err(wrong_type(key)),
        }
    }
}

///
/// SortValue
///

#[derive(Debug)]
enum SortValue {
    Numeric(f64),
    Alpha(String),
}

impl SortValue {
    // Missing values sort as 0 (numeric) or the empty string (alpha).
    fn parse(mode: SortMode, raw: Option<String>, element: &str) -> Result<Self, StoreError> {
        match mode {
            SortMode::Alpha => Ok(Self::Alpha(raw.unwrap_or_default())),
            SortMode::Numeric => match raw {
                None => Ok(Self::Numeric(0.0)),
                Some(raw) => raw
                    .trim()
                    .parse::<f64>()
                    .map(Self::Numeric)
                    .map_err(|_| StoreError::NotNumeric {
                        element: element.to_string(),
                        value: raw,
                    }),
            },
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a.total_cmp(b),
            (Self::Alpha(a), Self::Alpha(b)) => a.cmp(b),
            // one request never mixes modes
            (Self::Numeric(_), Self::Alpha(_)) => Ordering::Less,
            (Self::Alpha(_), Self::Numeric(_)) => Ordering::Greater,
        }
    }
}

fn wrong_type(key: &StoreKey) -> StoreError {
    StoreError::WrongType {
        key: key.to_string(),
    }
}

fn drop_if_empty(data: &mut BTreeMap<StoreKey, Entry>, key: &StoreKey) {
    let empty = match data.get(key) {
        Some(Entry::Set(set)) => set.is_empty(),
        Some(Entry::SortedSet(zset)) => zset.is_empty(),
        Some(Entry::Hash(hash)) => hash.is_empty(),
        Some(Entry::List(list)) => list.is_empty(),
        None => false,
    };
    if empty {
        data.remove(key);
    }
}
