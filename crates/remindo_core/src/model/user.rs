//! Registered-user record.
//!
//! # Invariants
//! - One record per username, stored under the `user:<username>` key.
//! - Written once at registration; the core never updates or deletes it.
//! - The password is stored exactly as given. There is no hashing and no
//!   credential verification anywhere in this system.

use serde::{Deserialize, Serialize};

/// Plain-text registration record keyed by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl UserRecord {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Storage key for this record's username.
    pub fn storage_key(username: &str) -> String {
        format!("user:{username}")
    }
}
