use remindo_core::{
    KvResult, KvStore, MemoryKvStore, StateStore, KEY_CURRENT_USER, KEY_IS_LOGGED_IN,
};
use std::sync::Arc;

#[test]
fn login_survives_restart() {
    let kv = Arc::new(MemoryKvStore::new());

    let mut store = StateStore::open(kv.clone());
    store.login("bob");
    assert!(store.session().is_logged_in);
    assert_eq!(store.session().current_user.as_deref(), Some("bob"));
    store.flush();

    // Simulated restart: a fresh store over the same backend.
    let mut reopened = StateStore::open(kv);
    let session = reopened.load_session();
    assert!(session.is_logged_in);
    assert_eq!(session.current_user.as_deref(), Some("bob"));
}

#[test]
fn logout_clears_user_across_restart() {
    let kv = Arc::new(MemoryKvStore::new());

    let mut store = StateStore::open(kv.clone());
    store.login("bob");
    store.logout();
    assert!(!store.session().is_logged_in);
    assert_eq!(store.session().current_user, None);
    store.flush();

    let mut reopened = StateStore::open(kv.clone());
    let session = reopened.load_session();
    assert!(!session.is_logged_in);
    assert_eq!(session.current_user, None);

    // The username key itself is gone, not merely ignored.
    assert_eq!(kv.get(KEY_CURRENT_USER).unwrap(), None);
}

#[test]
fn absent_state_defaults_to_logged_out() {
    let mut store = StateStore::open(Arc::new(MemoryKvStore::new()));
    let session = store.load_session();
    assert!(!session.is_logged_in);
    assert_eq!(session.current_user, None);
}

#[test]
fn unparseable_flag_defaults_to_logged_out() {
    let kv = Arc::new(MemoryKvStore::new());
    kv.set(KEY_IS_LOGGED_IN, "definitely").unwrap();
    kv.set(KEY_CURRENT_USER, "bob").unwrap();

    let mut store = StateStore::open(kv);
    let session = store.load_session();
    assert!(!session.is_logged_in);
    // Without the logged-in flag the stale username is reported absent.
    assert_eq!(session.current_user, None);
}

struct UnreadableKv;

impl KvStore for UnreadableKv {
    fn get(&self, _key: &str) -> KvResult<Option<String>> {
        Err(remindo_core::KvError::Poisoned)
    }

    fn set(&self, _key: &str, _value: &str) -> KvResult<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> KvResult<()> {
        Ok(())
    }
}

#[test]
fn read_errors_never_fail_the_caller() {
    let mut store = StateStore::open(Arc::new(UnreadableKv));
    let session = store.load_session();
    assert!(!session.is_logged_in);
    assert_eq!(session.current_user, None);
    assert!(store.load_activities().is_empty());
}
