//! Session state held for the lifetime of an app run.
//!
//! # Invariants
//! - `current_user` is `Some` only while `is_logged_in` is true.
//! - The state is overwritten by login/logout, never deleted.

/// Logged-in flag plus the current username, persisted across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub is_logged_in: bool,
    pub current_user: Option<String>,
}

impl SessionState {
    /// The logged-out default used whenever persisted state is absent or
    /// unreadable.
    pub fn logged_out() -> Self {
        Self::default()
    }

    /// A logged-in session for the given user.
    pub fn logged_in(user: impl Into<String>) -> Self {
        Self {
            is_logged_in: true,
            current_user: Some(user.into()),
        }
    }
}
