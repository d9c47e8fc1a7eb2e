use crate::{
    config::KeyConfig,
    key::KeySpace,
    model::{AttributeKind, AttributeModel, EntityId, EntityKind, EntityModel},
    store::MemoryStore,
    value::Value,
};

///
/// Person
/// Test entity: `age` (numeric), `city` / `name` (text), `active` (bool),
/// `nickname` declared but not indexed.
///

pub(crate) static PERSON_MODEL: EntityModel = EntityModel {
    name: "Person",
    attributes: &[
        AttributeModel::new("active", AttributeKind::Bool),
        AttributeModel::new("age", AttributeKind::Int),
        AttributeModel::new("city", AttributeKind::Text),
        AttributeModel::new("name", AttributeKind::Text),
        AttributeModel::new("nickname", AttributeKind::Text),
    ],
    indexes: &["active", "age", "city", "name"],
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Person {
    pub(crate) id: EntityId,
}

impl EntityKind for Person {
    const MODEL: &'static EntityModel = &PERSON_MODEL;

    fn hydrate(id: EntityId) -> Self {
        Self { id }
    }
}

///
/// PersonRow
///

pub(crate) struct PersonRow {
    pub(crate) id: &'static str,
    pub(crate) name: &'static str,
    pub(crate) city: &'static str,
    pub(crate) age: i64,
    pub(crate) active: bool,
}

/// Write `row` the way index maintenance would: "all" membership, equality
/// index sets, the sorted age index, and the attribute hash.
pub(crate) fn index_person(store: &MemoryStore, keys: &KeySpace, row: &PersonRow) {
    let model = &PERSON_MODEL;
    store.sadd(keys.all(), row.id).unwrap();

    let values = [
        ("active", Value::Bool(row.active)),
        ("age", Value::Int(row.age)),
        ("city", Value::from(row.city)),
        ("name", Value::from(row.name)),
    ];
    for (attr, value) in values {
        let desc = model.attribute(attr).unwrap();
        let stored = desc.typecast_for_storage(&value).unwrap();

        store.sadd(&keys.value(attr, &stored), row.id).unwrap();
        store.hset(&keys.hash(row.id), attr, &stored).unwrap();
        if desc.is_sorted_numeric() {
            let score = desc.typecast_for_score(&value).unwrap();
            store.zadd(&keys.sorted(attr), row.id, score).unwrap();
        }
    }
}

/// The three-person dataset:
/// (1, NYC, 30), (2, NYC, 40), (3, LA, 50).
pub(crate) const PEOPLE: [PersonRow; 3] = [
    PersonRow {
        id: "1",
        name: "ann",
        city: "NYC",
        age: 30,
        active: true,
    },
    PersonRow {
        id: "2",
        name: "bob",
        city: "NYC",
        age: 40,
        active: false,
    },
    PersonRow {
        id: "3",
        name: "cat",
        city: "LA",
        age: 50,
        active: true,
    },
];

pub(crate) fn person_keys() -> KeySpace {
    KeySpace::new(&PERSON_MODEL, KeyConfig::default())
}

/// A store seeded with `rows`.
pub(crate) fn seeded_store(rows: &[PersonRow]) -> MemoryStore {
    let store = MemoryStore::new();
    let keys = person_keys();
    for row in rows {
        index_person(&store, &keys, row);
    }

    store
}

pub(crate) fn ids(values: &[&str]) -> Vec<EntityId> {
    values.iter().copied().map(EntityId::from).collect()
}
