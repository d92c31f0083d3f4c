use bson::{doc, Bson};
use futures::future::join_all;
use pretty_assertions::assert_eq;
use strata_core::{config::MongoParams, record, Descriptor, Mapper, Model, Record, Value};
use strata_driver_mongodb::{
    FindAndModify, MongoBackend, MongoModel, Operation, UpdateOptions,
};
use tests::mem::MemConnector;

fn server() -> MongoParams {
    MongoParams {
        host: "localhost".into(),
        port: 27017,
        db: "functionaltest".into(),
        user: None,
        pass: None,
    }
}

fn backend() -> MongoBackend<MemConnector> {
    tests::init_tracing();
    MongoBackend::with_connector(MemConnector::new(), server())
}

fn users(backend: &MongoBackend<MemConnector>) -> MongoModel<MemConnector> {
    backend
        .extend(Descriptor::new("users").with_id_attribute("id"))
        .unwrap()
}

fn search_me() -> Record {
    record! { "search_column" => "search me" }
}

#[tokio::test]
async fn crud_end_to_end() {
    let backend = backend();
    let users = users(&backend);

    users.save_in_batch(tests::users()).await.unwrap();
    assert_eq!(users.get_count(None).await.unwrap(), 4);

    let found = users.find(Some(search_me()), None).await.unwrap();

    // The id attribute is stored as `_id` and comes back under that name.
    let expected: Vec<Record> = tests::users()[..2]
        .iter()
        .cloned()
        .map(|mut user| {
            if let Some(id) = user.remove("id") {
                user.insert("_id", id);
            }
            user
        })
        .collect();
    assert_eq!(tests::sorted_by(found, "_id"), expected);

    let page = users.paged_find(Some(search_me()), None, 0, 1).await.unwrap();
    assert_eq!(page.len(), 1);

    let missing = users
        .fetch(record! { "name" => "nobody" }, &[])
        .await
        .unwrap();
    assert_eq!(missing, None);

    let user = users
        .fetch(record! { "id" => 3 }, &["name"])
        .await
        .unwrap();
    assert_eq!(user, Some(record! { "_id" => 3, "name" => "ftest3" }));

    let res = users
        .update(record! { "id" => 4 }, record! { "name" => "renamed" })
        .await
        .unwrap();
    assert_eq!(res.affected, 1);
    assert_eq!(res.id, Some(Value::I64(4)));

    let user = users.fetch(record! { "id" => 4 }, &[]).await.unwrap().unwrap();
    assert_eq!(user.get("name"), Some(&Value::from("renamed")));

    let res = users.delete_object(record! { "id" => 1 }).await.unwrap();
    assert_eq!(res.affected, 1);
    assert_eq!(users.get_count(None).await.unwrap(), 3);
    assert_eq!(users.get_count(Some(search_me())).await.unwrap(), 1);

    users.delete_all().await.unwrap();
    assert_eq!(users.get_count(None).await.unwrap(), 0);
}

#[tokio::test]
async fn save_with_id_upserts() {
    let backend = backend();
    let users = users(&backend);

    let res = users
        .save(record! { "id" => 1, "name" => "ftest1" })
        .await
        .unwrap();
    assert_eq!(res.id, Some(Value::I64(1)));

    users
        .save(record! { "id" => 1, "name" => "changed" })
        .await
        .unwrap();

    let docs = backend.pool().connector().store().documents("users");
    assert_eq!(docs, vec![doc! { "_id": 1, "name": "changed" }]);

    let log = backend.pool().connector().exec_log();
    assert!(log
        .operations()
        .iter()
        .all(|op| matches!(op, Operation::Update(update) if update.upsert)));
}

#[tokio::test]
async fn save_without_id_inserts() {
    let backend = backend();
    let events = backend.extend(Descriptor::new("events")).unwrap();

    let res = events.save(record! { "kind" => "login" }).await.unwrap();
    assert_eq!(res.affected, 1);

    let Some(Value::String(id)) = res.id.clone() else {
        panic!("expected a generated id; res={res:?}");
    };
    assert_eq!(id.len(), 24);

    let event = events
        .fetch(record! { "_id" => id.as_str() }, &[])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.get("kind"), Some(&Value::from("login")));
}

#[tokio::test]
async fn array_items() {
    let backend = backend();
    let users = users(&backend);
    let me = || record! { "id" => "u1" };

    users
        .save(record! { "id" => "u1", "name" => "ftest1" })
        .await
        .unwrap();

    users
        .append_array_items(me(), record! { "tags" => vec!["1"] })
        .await
        .unwrap();
    users
        .append_array_items(me(), record! { "tags" => vec!["2", "3"] })
        .await
        .unwrap();

    let tags = |user: Option<Record>| user.and_then(|u| u.get("tags").cloned());

    let user = users.fetch(me(), &["tags"]).await.unwrap();
    assert_eq!(tags(user), Some(Value::from(vec!["1", "2", "3"])));

    users
        .append_array_items_if_not_exist(me(), record! { "tags" => vec!["3", "4"] })
        .await
        .unwrap();

    let user = users.fetch(me(), &["tags"]).await.unwrap();
    assert_eq!(tags(user), Some(Value::from(vec!["1", "2", "3", "4"])));

    users
        .remove_array_items(me(), record! { "tags" => vec!["1", "4"] })
        .await
        .unwrap();

    let log = backend.pool().connector().exec_log();
    let Some(Operation::Update(update)) = log.last() else {
        panic!("expected an update");
    };
    assert_eq!(update.filter, doc! { "_id": "u1" });
    assert_eq!(
        update.update,
        doc! { "$pull": { "tags": { "$each": ["1", "4"] } } }
    );

    let user = users.fetch(me(), &["tags"]).await.unwrap();
    assert_eq!(tags(user), Some(Value::from(vec!["2", "3"])));
}

#[tokio::test]
async fn update_requires_primary_key() {
    let backend = backend();
    let users = users(&backend);

    let err = users
        .update(record! { "name" => "ftest1" }, record! { "name" => "x" })
        .await
        .unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "configuration error: id must be defined");

    let events = backend.extend(Descriptor::new("events")).unwrap();
    let err = events
        .update(record! { "kind" => "login" }, record! { "kind" => "x" })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "configuration error: _id must be defined");

    // Nothing was sent, not even a connection opened.
    assert_eq!(backend.pool().connector().opens(), 0);
}

#[tokio::test]
async fn update_with_upsert() {
    let backend = backend();
    let users = users(&backend);

    let res = users
        .update_with(
            record! { "id" => 9 },
            record! { "name" => "created" },
            UpdateOptions {
                upsert: true,
                multi: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(res.affected, 1);
    assert_eq!(res.id, Some(Value::I64(9)));
    assert_eq!(users.get_count(None).await.unwrap(), 1);
}

#[tokio::test]
async fn raw_updates() {
    let backend = backend();
    let users = users(&backend);
    users.save_in_batch(tests::users()).await.unwrap();

    let res = users
        .update_row(
            doc! { "search_column": "search me" },
            doc! { "$set": { "flag": true } },
            false,
            true,
        )
        .await
        .unwrap();
    assert_eq!(res.affected, 2);
    assert_eq!(
        users.get_count(Some(record! { "flag" => true })).await.unwrap(),
        2
    );

    // A document without operators replaces the match whole.
    users
        .raw_update(
            doc! { "_id": 3 },
            doc! { "name": "replaced" },
            UpdateOptions::default(),
        )
        .await
        .unwrap();

    let user = users.fetch(record! { "id" => 3 }, &[]).await.unwrap();
    assert_eq!(user, Some(record! { "_id" => 3, "name" => "replaced" }));
}

#[tokio::test]
async fn find_and_modify() {
    let backend = backend();
    let counters = backend.extend(Descriptor::new("counters")).unwrap();

    counters
        .save(record! { "_id" => "visits", "seq" => 1 })
        .await
        .unwrap();

    let after = counters
        .find_and_modify(FindAndModify {
            query: doc! { "_id": "visits" },
            update: Some(doc! { "$set": { "seq": 2 } }),
            new: true,
            ..FindAndModify::default()
        })
        .await
        .unwrap();
    assert_eq!(after, Some(record! { "_id" => "visits", "seq" => 2 }));

    let removed = counters
        .find_and_modify(FindAndModify {
            query: doc! { "_id": "visits" },
            remove: true,
            ..FindAndModify::default()
        })
        .await
        .unwrap();
    assert_eq!(removed, Some(record! { "_id" => "visits", "seq" => 2 }));

    let none = counters
        .find_and_modify(FindAndModify {
            query: doc! { "_id": "visits" },
            remove: true,
            ..FindAndModify::default()
        })
        .await
        .unwrap();
    assert_eq!(none, None);
}

#[tokio::test]
async fn get_in_batch() {
    let backend = backend();
    let users = users(&backend);
    users.save_in_batch(tests::users()).await.unwrap();

    assert_eq!(users.get_in_batch(None).await.unwrap(), None);

    let found = users
        .get_in_batch(Some(vec![Value::from(2), Value::from(4)]))
        .await
        .unwrap()
        .unwrap();
    let mut ids: Vec<_> = found
        .iter()
        .filter_map(|r| r.get("_id").and_then(Value::as_i64))
        .collect();
    ids.sort();
    assert_eq!(ids, [2, 4]);

    let log = backend.pool().connector().exec_log();
    let Some(Operation::Find(find)) = log.last() else {
        panic!("expected a find");
    };
    assert_eq!(find.filter, doc! { "_id": { "$in": [2, 4] } });
    assert_eq!(find.limit, Some(2));
}

#[derive(Debug)]
struct Audit;

impl Mapper for Audit {
    fn pre_save(&self, mut record: Record) -> Record {
        record.insert("audited", true);
        record
    }

    fn pre_update(&self, mut record: Record) -> Record {
        record.insert("touched", true);
        record
    }

    fn pre_delete(&self, mut record: Record) -> Record {
        // Only ever delete archived documents.
        record.insert("archived", true);
        record
    }
}

#[tokio::test]
async fn mapper_hooks() {
    let backend = backend();
    let notes = backend
        .extend(Descriptor::new("notes").with_mapper(Audit))
        .unwrap();

    notes
        .save(record! { "_id" => "n1", "text" => "hi" })
        .await
        .unwrap();
    notes
        .update(record! { "_id" => "n1" }, record! { "text" => "hello" })
        .await
        .unwrap();

    let note = notes.fetch(record! { "_id" => "n1" }, &[]).await.unwrap();
    assert_eq!(
        note,
        Some(record! { "_id" => "n1", "text" => "hello", "audited" => true, "touched" => true })
    );

    let res = notes.delete_object(record! { "_id" => "n1" }).await.unwrap();
    assert_eq!(res.affected, 0);

    notes
        .update(record! { "_id" => "n1" }, record! { "archived" => true })
        .await
        .unwrap();
    let res = notes.delete_object(record! { "_id" => "n1" }).await.unwrap();
    assert_eq!(res.affected, 1);
}

#[tokio::test]
async fn one_connection_per_server() {
    let backend = backend();
    let users = users(&backend);
    let events = backend.clone().extend(Descriptor::new("events")).unwrap();

    let counts = join_all((0..8).map(|i| {
        let model = if i % 2 == 0 { &users } else { &events };
        model.get_count(None)
    }))
    .await;

    assert!(counts.into_iter().all(|count| count.is_ok()));
    assert_eq!(backend.pool().connector().opens(), 1);
    assert_eq!(backend.pool().len().await, 1);

    let a = users.raw_client().await.unwrap();
    let b = events.raw_client().await.unwrap();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}

#[tokio::test]
async fn failed_open_is_not_cached() {
    let backend = MongoBackend::with_connector(
        MemConnector::new(),
        MongoParams {
            host: String::new(),
            ..server()
        },
    );
    let users = users(&backend);

    assert!(users.get_count(None).await.is_err());
    assert!(users.get_count(None).await.is_err());

    assert_eq!(backend.pool().connector().opens(), 2);
    assert!(backend.pool().is_empty().await);
}

#[tokio::test]
async fn stored_values_keep_their_types() {
    let backend = backend();
    let things = backend.extend(Descriptor::new("things")).unwrap();

    things
        .save(record! {
            "_id" => "t",
            "n" => 1,
            "big" => 5_000_000_000_i64,
            "f" => 1.5,
            "none" => Value::Null,
        })
        .await
        .unwrap();

    let docs = backend.pool().connector().store().documents("things");
    assert_eq!(docs[0].get("n"), Some(&Bson::Int32(1)));
    assert_eq!(docs[0].get("big"), Some(&Bson::Int64(5_000_000_000)));
    assert_eq!(docs[0].get("none"), Some(&Bson::Null));
}
