use remindo_core::kv::migrations::latest_version;
use remindo_core::{KvError, KvStore, SqliteKvStore};

#[test]
fn set_get_remove_roundtrip() {
    let kv = SqliteKvStore::open_in_memory().unwrap();

    assert_eq!(kv.get("missing").unwrap(), None);

    kv.set("isLoggedIn", "true").unwrap();
    assert_eq!(kv.get("isLoggedIn").unwrap().as_deref(), Some("true"));

    kv.remove("isLoggedIn").unwrap();
    assert_eq!(kv.get("isLoggedIn").unwrap(), None);
}

#[test]
fn set_overwrites_existing_value() {
    let kv = SqliteKvStore::open_in_memory().unwrap();

    kv.set("currentUser", "alice").unwrap();
    kv.set("currentUser", "bob").unwrap();
    assert_eq!(kv.get("currentUser").unwrap().as_deref(), Some("bob"));
}

#[test]
fn remove_on_missing_key_is_a_noop() {
    let kv = SqliteKvStore::open_in_memory().unwrap();
    kv.remove("never-written").unwrap();
}

#[test]
fn file_backed_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("remindo.sqlite3");

    {
        let kv = SqliteKvStore::open(&db_path).unwrap();
        kv.set("activities", "[]").unwrap();
    }

    let kv = SqliteKvStore::open(&db_path).unwrap();
    assert_eq!(kv.get("activities").unwrap().as_deref(), Some("[]"));
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("remindo.sqlite3");

    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
            .unwrap();
    }

    let err = SqliteKvStore::open(&db_path).unwrap_err();
    assert!(matches!(err, KvError::UnsupportedSchemaVersion { .. }));
}
