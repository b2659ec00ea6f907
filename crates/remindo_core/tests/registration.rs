use remindo_core::{
    KvStore, MemoryKvStore, RegisterError, StateStore, UserRecord,
};
use std::sync::Arc;

#[test]
fn register_writes_the_record_as_given() {
    let kv = Arc::new(MemoryKvStore::new());
    let mut store = StateStore::open(kv.clone());

    store
        .register_user("alice", "alice@example.com", "hunter2")
        .unwrap();
    store.flush();

    let raw = kv.get("user:alice").unwrap().unwrap();
    let record: UserRecord = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        record,
        UserRecord::new("alice", "alice@example.com", "hunter2")
    );
}

#[test]
fn duplicate_registration_fails_and_keeps_first_record() {
    let kv = Arc::new(MemoryKvStore::new());
    let mut store = StateStore::open(kv.clone());

    store
        .register_user("alice", "alice@example.com", "hunter2")
        .unwrap();

    // No flush in between: the rejection must hold even while the first
    // record's write is still in flight.
    let err = store
        .register_user("alice", "other@example.com", "different")
        .unwrap_err();
    assert_eq!(err, RegisterError::AlreadyExists("alice".to_string()));

    store.flush();
    let raw = kv.get("user:alice").unwrap().unwrap();
    let record: UserRecord = serde_json::from_str(&raw).unwrap();
    assert_eq!(record.email, "alice@example.com");
    assert_eq!(record.password, "hunter2");
}

#[test]
fn duplicate_registration_fails_across_restart() {
    let kv = Arc::new(MemoryKvStore::new());

    let mut store = StateStore::open(kv.clone());
    store
        .register_user("alice", "alice@example.com", "hunter2")
        .unwrap();
    store.flush();
    drop(store);

    let mut reopened = StateStore::open(kv);
    let err = reopened
        .register_user("alice", "other@example.com", "different")
        .unwrap_err();
    assert_eq!(err, RegisterError::AlreadyExists("alice".to_string()));
}

#[test]
fn distinct_usernames_register_independently() {
    let kv = Arc::new(MemoryKvStore::new());
    let mut store = StateStore::open(kv.clone());

    store
        .register_user("alice", "alice@example.com", "hunter2")
        .unwrap();
    store
        .register_user("bob", "bob@example.com", "swordfish")
        .unwrap();
    store.flush();

    assert!(kv.get("user:alice").unwrap().is_some());
    assert!(kv.get("user:bob").unwrap().is_some());
    assert_eq!(kv.len(), 2);
}
