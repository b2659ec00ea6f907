use remindo_core::{
    Activity, KvResult, KvStore, MemoryKvStore, StateStore, KEY_ACTIVITIES,
};
use std::sync::Arc;

#[test]
fn add_preserves_call_order_and_count() {
    let mut store = StateStore::open(Arc::new(MemoryKvStore::new()));

    for index in 0..5 {
        store.add_activity(Activity::new(format!("id-{index}"), format!("task {index}")));
    }

    let list = store.activities();
    assert_eq!(list.len(), 5);
    for (index, activity) in list.iter().enumerate() {
        assert_eq!(activity.id, format!("id-{index}"));
    }
}

#[test]
fn edit_replaces_only_the_matching_entry() {
    let mut store = StateStore::open(Arc::new(MemoryKvStore::new()));
    store.add_activity(Activity::new("a", "water plants"));
    store.add_activity(Activity::new("b", "buy milk"));
    store.add_activity(Activity::new("c", "call dentist"));

    let mut edited = Activity::new("b", "buy oat milk");
    edited.notes = Some("the good brand".to_string());
    let list = store.edit_activity(edited.clone()).to_vec();

    assert_eq!(list.len(), 3);
    assert_eq!(list[0], Activity::new("a", "water plants"));
    assert_eq!(list[1], edited);
    assert_eq!(list[2], Activity::new("c", "call dentist"));
}

#[test]
fn edit_with_unknown_id_leaves_list_unchanged() {
    let mut store = StateStore::open(Arc::new(MemoryKvStore::new()));
    store.add_activity(Activity::new("a", "water plants"));
    let before = store.activities().to_vec();

    let after = store
        .edit_activity(Activity::new("missing", "never lands"))
        .to_vec();
    assert_eq!(after, before);
}

#[test]
fn delete_removes_every_match_and_nothing_else() {
    let mut store = StateStore::open(Arc::new(MemoryKvStore::new()));
    store.add_activity(Activity::new("dup", "first"));
    store.add_activity(Activity::new("keep", "second"));
    // The store does not validate id uniqueness; delete is defined to
    // remove all matches.
    store.add_activity(Activity::new("dup", "third"));

    let list = store.delete_activity("dup").to_vec();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, "keep");
}

#[test]
fn delete_with_unknown_id_is_a_noop() {
    let mut store = StateStore::open(Arc::new(MemoryKvStore::new()));
    store.add_activity(Activity::new("a", "water plants"));

    let list = store.delete_activity("missing").to_vec();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, "a");
}

#[test]
fn reload_matches_last_in_memory_list() {
    let kv = Arc::new(MemoryKvStore::new());
    let mut store = StateStore::open(kv.clone());

    store.add_activity(Activity::new("a", "one"));
    store.add_activity(Activity::new("b", "two"));
    store.edit_activity(Activity::new("a", "one edited"));
    store.delete_activity("b");
    let expected = store.activities().to_vec();
    store.flush();

    let mut reopened = StateStore::open(kv);
    assert_eq!(reopened.load_activities(), expected.as_slice());
}

#[test]
fn malformed_snapshot_loads_as_empty_list() {
    let kv = Arc::new(MemoryKvStore::new());
    kv.set(KEY_ACTIVITIES, "{not json]").unwrap();

    let mut store = StateStore::open(kv);
    assert!(store.load_activities().is_empty());
}

struct WriteFailingKv;

impl KvStore for WriteFailingKv {
    fn get(&self, _key: &str) -> KvResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> KvResult<()> {
        Err(remindo_core::KvError::Poisoned)
    }

    fn remove(&self, _key: &str) -> KvResult<()> {
        Err(remindo_core::KvError::Poisoned)
    }
}

#[test]
fn write_failures_are_swallowed_and_memory_still_updates() {
    let mut store = StateStore::open(Arc::new(WriteFailingKv));

    store.add_activity(Activity::new("a", "still lands in memory"));
    store.login("bob");
    store.flush();

    assert_eq!(store.activities().len(), 1);
    assert!(store.session().is_logged_in);
}
