//! Core domain logic for Remindo.
//! This crate is the single source of truth for session, registration and
//! activity-list state; UI shells call in through the FFI crate.

pub mod kv;
pub mod logging;
pub mod model;
pub mod store;

pub use kv::{KvError, KvResult, KvStore, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::{Activity, ActivityId};
pub use model::session::SessionState;
pub use model::user::UserRecord;
pub use store::{RegisterError, StateStore, KEY_ACTIVITIES, KEY_CURRENT_USER, KEY_IS_LOGGED_IN};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
