use modelset::{error::QueryErrorKind, prelude::*};

static TASK_MODEL: EntityModel = EntityModel {
    name: "Task",
    attributes: &[
        AttributeModel::new("done", AttributeKind::Bool),
        AttributeModel::new("priority", AttributeKind::Int),
        AttributeModel::new("title", AttributeKind::Text),
    ],
    indexes: &["done", "priority"],
};

#[derive(Debug)]
struct Task {
    id: EntityId,
}

impl EntityKind for Task {
    const MODEL: &'static EntityModel = &TASK_MODEL;

    fn hydrate(id: EntityId) -> Self {
        Self { id }
    }
}

fn board() -> MemoryStore {
    let store = MemoryStore::new();
    let keys = modelset::core::key::KeySpace::new(&TASK_MODEL, KeyConfig::default());

    for (id, done, priority) in [("1", "0", 2.0), ("2", "1", 5.0), ("3", "0", 9.0)] {
        store.sadd(keys.all(), id).unwrap();
        store.sadd(&keys.value("done", done), id).unwrap();
        store.sadd(&keys.value("priority", &priority.to_string()), id).unwrap();
        store.zadd(&keys.sorted("priority"), id, priority).unwrap();
        store.hset(&keys.hash(id), "priority", &priority.to_string()).unwrap();
    }

    store
}

fn open_by_priority(store: &MemoryStore) -> Result<Vec<EntityId>, Error> {
    let tasks = ModelSet::<Task, _>::new(store)
        .filter("done", false)
        .order("-priority")?;

    Ok(tasks.iter()?.map(|task| task.id).collect())
}

fn count_titled(store: &MemoryStore, title: &str) -> Result<usize, Error> {
    let tasks = ModelSet::<Task, _>::new(store).filter("title", title);

    Ok(tasks.count()?)
}

#[test]
fn prelude_covers_a_full_query() {
    let store = board();
    let open = open_by_priority(&store).unwrap();

    assert_eq!(open, vec![EntityId::from("3"), EntityId::from("1")]);
}

#[test]
fn builder_errors_convert_with_question_mark() {
    let store = board();
    let err = count_titled(&store, "x").expect_err("title is not indexed");
    assert_eq!(err.kind, ErrorKind::Query(QueryErrorKind::NotIndexed));
    assert_eq!(err.origin, ErrorOrigin::Query);
}

#[test]
fn version_is_exported() {
    assert!(!modelset::VERSION.is_empty());
}
