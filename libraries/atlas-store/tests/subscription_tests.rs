/// Subscription behavior tests
/// Exercise live child queries end to end against a real store handle
use atlas_store::{ChildEvent, ChildQuery, RealtimeDb, StorePath};
use serde_json::{json, Value};

fn users() -> StorePath {
    StorePath::new().child("users")
}

fn user(updated_at: i64) -> Value {
    json!({ "name": "user", "updatedAt": updated_at })
}

async fn seed(db: &RealtimeDb, entries: &[(&str, i64)]) {
    for (key, updated_at) in entries {
        db.set(&users().child(*key), user(*updated_at)).await.unwrap();
    }
}

fn newest_page(limit: usize) -> ChildQuery {
    ChildQuery::children(users())
        .order_by_child("updatedAt")
        .limit_to_last(limit)
}

#[tokio::test]
async fn initial_snapshot_is_newest_page_in_ascending_order() {
    let db = RealtimeDb::new();
    seed(&db, &[("a", 100), ("b", 90), ("c", 80), ("d", 70)]).await;

    let mut sub = db.subscribe(newest_page(2)).await.unwrap();

    match sub.try_next().unwrap() {
        ChildEvent::Added { key, value } => {
            assert_eq!(key, "b");
            assert_eq!(value["updatedAt"], 90);
        }
        other => panic!("expected Added, got {:?}", other),
    }
    match sub.try_next().unwrap() {
        ChildEvent::Added { key, .. } => assert_eq!(key, "a"),
        other => panic!("expected Added, got {:?}", other),
    }
    assert!(sub.try_next().is_none());
}

#[tokio::test]
async fn bounded_snapshot_excludes_entries_above_the_bound() {
    let db = RealtimeDb::new();
    seed(&db, &[("a", 100), ("b", 90), ("c", 80), ("d", 70)]).await;

    let query = newest_page(2).end_at(89);
    let mut sub = db.subscribe(query).await.unwrap();

    let keys: Vec<String> = std::iter::from_fn(|| sub.try_next())
        .map(|event| event.key().to_string())
        .collect();
    assert_eq!(keys, ["d", "c"]);
}

#[tokio::test]
async fn live_write_of_new_child_is_added() {
    let db = RealtimeDb::new();
    let mut sub = db.subscribe(newest_page(25)).await.unwrap();
    assert!(sub.try_next().is_none());

    db.set(&users().child("a"), user(100)).await.unwrap();

    match sub.next().await.unwrap() {
        ChildEvent::Added { key, .. } => assert_eq!(key, "a"),
        other => panic!("expected Added, got {:?}", other),
    }
}

#[tokio::test]
async fn overwrite_of_known_child_is_changed() {
    let db = RealtimeDb::new();
    seed(&db, &[("a", 100)]).await;
    let mut sub = db.subscribe(newest_page(25)).await.unwrap();
    sub.try_next().unwrap(); // initial Added

    db.set(&users().child("a"), user(200)).await.unwrap();

    match sub.next().await.unwrap() {
        ChildEvent::Changed { key, value } => {
            assert_eq!(key, "a");
            assert_eq!(value["updatedAt"], 200);
        }
        other => panic!("expected Changed, got {:?}", other),
    }
}

#[tokio::test]
async fn delete_of_known_child_is_removed() {
    let db = RealtimeDb::new();
    seed(&db, &[("a", 100)]).await;
    let mut sub = db.subscribe(newest_page(25)).await.unwrap();
    sub.try_next().unwrap();

    db.remove(&users().child("a")).await.unwrap();

    match sub.next().await.unwrap() {
        ChildEvent::Removed { key } => assert_eq!(key, "a"),
        other => panic!("expected Removed, got {:?}", other),
    }
}

#[tokio::test]
async fn write_that_leaves_the_range_is_removed() {
    let db = RealtimeDb::new();
    seed(&db, &[("a", 50)]).await;

    let query = ChildQuery::children(users())
        .order_by_child("updatedAt")
        .end_at(100);
    let mut sub = db.subscribe(query).await.unwrap();
    sub.try_next().unwrap(); // initial Added for "a"

    // updatedAt moves above the bound: the child exits this window
    db.set(&users().child("a"), user(150)).await.unwrap();

    match sub.next().await.unwrap() {
        ChildEvent::Removed { key } => assert_eq!(key, "a"),
        other => panic!("expected Removed, got {:?}", other),
    }
}

#[tokio::test]
async fn write_above_the_bound_is_silent() {
    let db = RealtimeDb::new();
    let query = ChildQuery::children(users())
        .order_by_child("updatedAt")
        .end_at(100);
    let mut sub = db.subscribe(query).await.unwrap();

    db.set(&users().child("a"), user(150)).await.unwrap();

    assert!(sub.try_next().is_none());
}

#[tokio::test]
async fn null_tombstone_reads_as_absent_and_emits_removed() {
    let db = RealtimeDb::new();
    seed(&db, &[("a", 100)]).await;
    let mut sub = db.subscribe(newest_page(25)).await.unwrap();
    sub.try_next().unwrap();

    db.set(&users().child("a"), Value::Null).await.unwrap();

    match sub.next().await.unwrap() {
        ChildEvent::Removed { key } => assert_eq!(key, "a"),
        other => panic!("expected Removed, got {:?}", other),
    }
    assert!(db.get(&users().child("a")).await.is_none());
}

#[tokio::test]
async fn dropped_subscription_stops_receiving() {
    let db = RealtimeDb::new();
    let first = db.subscribe(newest_page(25)).await.unwrap();
    let mut second = db.subscribe(newest_page(25)).await.unwrap();
    drop(first);

    db.set(&users().child("a"), user(100)).await.unwrap();

    // the surviving watcher still gets the event
    match second.next().await.unwrap() {
        ChildEvent::Added { key, .. } => assert_eq!(key, "a"),
        other => panic!("expected Added, got {:?}", other),
    }
}

#[tokio::test]
async fn close_ends_event_streams_and_rejects_writes() {
    let db = RealtimeDb::new();
    let mut sub = db.subscribe(newest_page(25)).await.unwrap();

    db.close().await;

    assert!(sub.next().await.is_none());
    assert!(db.set(&users().child("a"), user(100)).await.is_err());
    assert!(db.subscribe(newest_page(25)).await.is_err());
}

#[tokio::test]
async fn create_key_is_increasing() {
    let db = RealtimeDb::new();
    let first = db.create_key().await.unwrap();
    let second = db.create_key().await.unwrap();
    assert!(first < second);
    assert_eq!(first.len(), 20);
}
