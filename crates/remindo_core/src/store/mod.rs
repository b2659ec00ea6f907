//! Local state store: the single owner of session and activity state.
//!
//! # Responsibility
//! - Hold the in-memory session flag, current user and activity list.
//! - Mirror every mutation to the key-value port as a background write.
//! - Keep callers decoupled from storage details and storage failures.
//!
//! # Invariants
//! - In-memory state is updated synchronously; callers observe their own
//!   writes immediately.
//! - Shortly after a mutating call returns, the persisted snapshot is
//!   reconstructible into state equal to the in-memory one (eventual
//!   consistency; durable writes are best-effort and never block).
//! - Storage read errors degrade to defaults; write errors are logged and
//!   never surfaced. The store must not crash the hosting process.

use crate::kv::KvStore;
use crate::model::activity::Activity;
use crate::model::session::SessionState;
use crate::model::user::UserRecord;
use log::{info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

mod writer;

use writer::WriteQueue;

/// Storage key for the logged-in flag (`"true"` / `"false"`).
pub const KEY_IS_LOGGED_IN: &str = "isLoggedIn";
/// Storage key for the current username; absent while logged out.
pub const KEY_CURRENT_USER: &str = "currentUser";
/// Storage key for the serialized activity list snapshot.
pub const KEY_ACTIVITIES: &str = "activities";

/// Registration failure surfaced to the caller for user-visible messaging.
#[derive(Debug, PartialEq, Eq)]
pub enum RegisterError {
    AlreadyExists(String),
}

impl Display for RegisterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists(username) => {
                write!(f, "user already registered: {username}")
            }
        }
    }
}

impl Error for RegisterError {}

/// Session + activity state with write-behind persistence.
///
/// Single-threaded by design: callers own the store and invoke operations
/// sequentially; only the durable write happens off-thread.
pub struct StateStore {
    kv: Arc<dyn KvStore>,
    writer: WriteQueue,
    session: SessionState,
    activities: Vec<Activity>,
    /// Usernames registered through this store instance. Consulted so a
    /// duplicate registration is rejected even while the first record's
    /// write is still in flight.
    registered: BTreeSet<String>,
}

impl StateStore {
    /// Opens the store over the given backend and loads persisted state.
    ///
    /// Absent or unreadable state yields the logged-out session and an
    /// empty activity list; opening never fails the caller.
    pub fn open(kv: Arc<dyn KvStore>) -> Self {
        let writer = WriteQueue::start(Arc::clone(&kv));
        let mut store = Self {
            kv,
            writer,
            session: SessionState::logged_out(),
            activities: Vec::new(),
            registered: BTreeSet::new(),
        };
        store.load_session();
        store.load_activities();
        store
    }

    /// Current in-memory session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Current in-memory activity list, insertion order preserved.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Re-reads session state from storage, replacing the in-memory copy.
    ///
    /// Absent or unparseable values default to logged-out/absent; read
    /// errors are logged and default, never surfaced.
    pub fn load_session(&mut self) -> SessionState {
        let is_logged_in = match self.kv.get(KEY_IS_LOGGED_IN) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                warn!(
                    "event=session_load module=store status=error key={KEY_IS_LOGGED_IN} error={err}"
                );
                false
            }
        };

        let current_user = match self.kv.get(KEY_CURRENT_USER) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=session_load module=store status=error key={KEY_CURRENT_USER} error={err}"
                );
                None
            }
        };

        // A stale username without the logged-in flag is reported absent.
        self.session = SessionState {
            is_logged_in,
            current_user: if is_logged_in { current_user } else { None },
        };
        self.session.clone()
    }

    /// Re-reads the activity list from storage, replacing the in-memory
    /// copy. Absent or malformed snapshots yield an empty list.
    pub fn load_activities(&mut self) -> &[Activity] {
        self.activities = match self.kv.get(KEY_ACTIVITIES) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(list) => list,
                Err(err) => {
                    warn!("event=activities_load module=store status=error error={err}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("event=activities_load module=store status=error error={err}");
                Vec::new()
            }
        };
        &self.activities
    }

    /// Marks the session logged-in for `user` and persists both keys.
    ///
    /// Authentication is a stub: any user logs in successfully.
    pub fn login(&mut self, user: impl Into<String>) {
        let user = user.into();
        self.writer.enqueue_set(KEY_IS_LOGGED_IN, "true");
        self.writer.enqueue_set(KEY_CURRENT_USER, &user);
        self.session = SessionState::logged_in(user);
        info!("event=login module=store status=ok");
    }

    /// Marks the session logged-out, clears the current user and persists
    /// both keys. Unconditional; logging out while logged out is a no-op
    /// that still rewrites storage.
    pub fn logout(&mut self) {
        self.session = SessionState::logged_out();
        self.writer.enqueue_set(KEY_IS_LOGGED_IN, "false");
        self.writer.enqueue_remove(KEY_CURRENT_USER);
        info!("event=logout module=store status=ok");
    }

    /// Appends `activity` to the list, persists the snapshot and returns
    /// the new list. Id uniqueness is the caller's obligation and is not
    /// validated here.
    pub fn add_activity(&mut self, activity: Activity) -> &[Activity] {
        self.activities.push(activity);
        self.persist_activities();
        &self.activities
    }

    /// Replaces the first (and expected only) entry whose id matches
    /// `edited`; all other entries pass through unchanged. A missing id
    /// leaves the list unchanged and raises no error. Persists and returns
    /// the new list.
    pub fn edit_activity(&mut self, edited: Activity) -> &[Activity] {
        if let Some(slot) = self.activities.iter_mut().find(|entry| entry.id == edited.id) {
            *slot = edited;
        }
        self.persist_activities();
        &self.activities
    }

    /// Removes every entry whose id matches (a non-existent id is a
    /// no-op), persists and returns the new list.
    pub fn delete_activity(&mut self, id: &str) -> &[Activity] {
        self.activities.retain(|entry| entry.id != id);
        self.persist_activities();
        &self.activities
    }

    fn persist_activities(&self) {
        match serde_json::to_string(&self.activities) {
            Ok(snapshot) => self.writer.enqueue_set(KEY_ACTIVITIES, &snapshot),
            Err(err) => {
                warn!("event=activities_persist module=store status=error error={err}");
            }
        }
    }

    /// Registers a new user, storing the record as given (plain text).
    ///
    /// # Errors
    /// - [`RegisterError::AlreadyExists`] when a record for `username`
    ///   exists in storage or was registered through this store instance.
    pub fn register_user(
        &mut self,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), RegisterError> {
        let username = username.into();
        if self.registered.contains(&username) {
            return Err(RegisterError::AlreadyExists(username));
        }

        let key = UserRecord::storage_key(&username);
        match self.kv.get(&key) {
            Ok(Some(_)) => return Err(RegisterError::AlreadyExists(username)),
            Ok(None) => {}
            Err(err) => {
                // Unreadable is treated as absent; registration proceeds.
                warn!("event=register module=store status=error key={key} error={err}");
            }
        }

        let record = UserRecord::new(username.clone(), email, password);
        match serde_json::to_string(&record) {
            Ok(raw) => self.writer.enqueue_set(&key, &raw),
            Err(err) => {
                warn!("event=register module=store status=error key={key} error={err}");
            }
        }
        self.registered.insert(username);
        info!("event=register module=store status=ok");
        Ok(())
    }

    /// Blocks until every persistence write enqueued so far has been
    /// applied. Tests and orderly shutdown; normal callers never need it.
    pub fn flush(&self) {
        self.writer.flush();
    }
}
