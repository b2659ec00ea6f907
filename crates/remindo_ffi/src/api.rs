//! FFI use-case API for shell-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the mobile UI via FRB.
//! - Keep error semantics simple: envelope structs, no exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The process-global store is created once and reused; every call after
//!   `open_store` operates on the same in-memory state.

use once_cell::sync::OnceCell;
use remindo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Activity, SessionState, SqliteKvStore, StateStore,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const STORE_DB_FILE_NAME: &str = "remindo.sqlite3";
static STORE: OnceCell<Mutex<StateStore>> = OnceCell::new();
static STORE_DB_PATH: OnceCell<PathBuf> = OnceCell::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`; reconfiguration attempts
///   return an error message.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Session state snapshot returned to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub is_logged_in: bool,
    pub current_user: Option<String>,
}

impl From<SessionState> for SessionInfo {
    fn from(state: SessionState) -> Self {
        Self {
            is_logged_in: state.is_logged_in,
            current_user: state.current_user,
        }
    }
}

/// Activity record as exchanged with the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    /// Shell-supplied id; see [`new_activity_id`].
    pub id: String,
    pub title: String,
    pub notes: Option<String>,
    /// Unix epoch milliseconds.
    pub remind_at: Option<i64>,
}

impl From<Activity> for ActivityItem {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            title: activity.title,
            notes: activity.notes,
            remind_at: activity.remind_at,
        }
    }
}

impl From<ActivityItem> for Activity {
    fn from(item: ActivityItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            notes: item.notes,
            remind_at: item.remind_at,
        }
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Activity-list response envelope; `items` reflect the in-memory list
/// after the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityListResponse {
    pub ok: bool,
    pub items: Vec<ActivityItem>,
    pub message: String,
}

impl ActivityListResponse {
    fn success(items: Vec<ActivityItem>) -> Self {
        Self {
            ok: true,
            items,
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// Opens the process-global store at `db_path` (or a default path when
/// `None`) and loads persisted state.
///
/// # FFI contract
/// - First successful call wins; later calls reuse the existing store and
///   succeed regardless of path.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn open_store(db_path: Option<String>) -> String {
    if STORE.get().is_some() {
        return String::new();
    }

    let resolved = resolve_db_path(db_path);
    let kv = match SqliteKvStore::open(&resolved) {
        Ok(kv) => kv,
        Err(err) => return format!("store open failed at `{}`: {err}", resolved.display()),
    };

    let store = StateStore::open(Arc::new(kv));
    let _ = STORE.set(Mutex::new(store));
    log::info!(
        "event=store_open module=ffi status=ok path={}",
        resolved.display()
    );
    String::new()
}

/// Returns the current in-memory session state.
#[flutter_rust_bridge::frb(sync)]
pub fn session_info() -> SessionInfo {
    with_store(|store| store.session().clone().into()).unwrap_or(SessionInfo {
        is_logged_in: false,
        current_user: None,
    })
}

/// Re-reads session state from storage (app resume / cold start).
#[flutter_rust_bridge::frb(sync)]
pub fn reload_session() -> SessionInfo {
    with_store(|store| store.load_session().into()).unwrap_or(SessionInfo {
        is_logged_in: false,
        current_user: None,
    })
}

/// Logs the user in. Authentication is a stub: the shell validates
/// non-empty credentials, and any user logs in successfully.
#[flutter_rust_bridge::frb(sync)]
pub fn login(username: String) -> SessionInfo {
    let trimmed = username.trim().to_string();
    with_store(|store| {
        store.login(trimmed.clone());
        store.session().clone().into()
    })
    .unwrap_or(SessionInfo {
        is_logged_in: false,
        current_user: None,
    })
}

/// Logs the user out and clears the stored username.
#[flutter_rust_bridge::frb(sync)]
pub fn logout() -> SessionInfo {
    with_store(|store| {
        store.logout();
        store.session().clone().into()
    })
    .unwrap_or(SessionInfo {
        is_logged_in: false,
        current_user: None,
    })
}

/// Returns the current in-memory activity list.
#[flutter_rust_bridge::frb(sync)]
pub fn list_activities() -> ActivityListResponse {
    match with_store(|store| collect_items(store.activities())) {
        Ok(items) => ActivityListResponse::success(items),
        Err(err) => ActivityListResponse::failure(format!("list_activities failed: {err}")),
    }
}

/// Re-reads the activity list from storage.
#[flutter_rust_bridge::frb(sync)]
pub fn reload_activities() -> ActivityListResponse {
    match with_store(|store| collect_items(store.load_activities())) {
        Ok(items) => ActivityListResponse::success(items),
        Err(err) => ActivityListResponse::failure(format!("reload_activities failed: {err}")),
    }
}

/// Appends an activity and returns the new list.
#[flutter_rust_bridge::frb(sync)]
pub fn add_activity(item: ActivityItem) -> ActivityListResponse {
    match with_store(|store| collect_items(store.add_activity(item.clone().into()))) {
        Ok(items) => ActivityListResponse::success(items),
        Err(err) => ActivityListResponse::failure(format!("add_activity failed: {err}")),
    }
}

/// Replaces the entry matching `item.id` and returns the new list. An
/// unknown id leaves the list unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn edit_activity(item: ActivityItem) -> ActivityListResponse {
    match with_store(|store| collect_items(store.edit_activity(item.clone().into()))) {
        Ok(items) => ActivityListResponse::success(items),
        Err(err) => ActivityListResponse::failure(format!("edit_activity failed: {err}")),
    }
}

/// Removes every entry with the given id and returns the new list.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_activity(id: String) -> ActivityListResponse {
    match with_store(|store| collect_items(store.delete_activity(&id))) {
        Ok(items) => ActivityListResponse::success(items),
        Err(err) => ActivityListResponse::failure(format!("delete_activity failed: {err}")),
    }
}

/// Registers a new user. The shell validates non-empty fields before
/// calling; the only business failure is a duplicate username.
#[flutter_rust_bridge::frb(sync)]
pub fn register_user(username: String, email: String, password: String) -> ActionResponse {
    let trimmed = username.trim().to_string();
    let result = with_store(|store| store.register_user(trimmed.clone(), email, password));
    match result {
        Ok(Ok(())) => ActionResponse::success("User registered."),
        Ok(Err(err)) => ActionResponse::failure(err.to_string()),
        Err(err) => ActionResponse::failure(format!("register_user failed: {err}")),
    }
}

/// Fresh id for a new activity, since the core never generates ids.
#[flutter_rust_bridge::frb(sync)]
pub fn new_activity_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Blocks until every pending storage write has been applied. Called by
/// the shell on backgrounding/shutdown.
#[flutter_rust_bridge::frb(sync)]
pub fn flush_store() {
    let _ = with_store(|store| store.flush());
}

fn resolve_db_path(db_path: Option<String>) -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Some(raw) = db_path {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            if let Ok(raw) = std::env::var("REMINDO_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(f: impl FnOnce(&mut StateStore) -> T) -> Result<T, String> {
    let store = STORE
        .get()
        .ok_or_else(|| "store not opened; call open_store first".to_string())?;
    let mut guard = store.lock().map_err(|_| "store lock poisoned".to_string())?;
    Ok(f(&mut guard))
}

fn collect_items(activities: &[Activity]) -> Vec<ActivityItem> {
    activities.iter().cloned().map(ActivityItem::from).collect()
}
