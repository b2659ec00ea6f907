//! Activity (reminder) domain model.
//!
//! # Responsibility
//! - Define the record behind every entry in the user's reminder list.
//!
//! # Invariants
//! - `id` is caller-supplied and expected unique within one activity list;
//!   the store neither generates nor validates it.
//! - The serialized shape is the durable snapshot format under the
//!   `activities` key, so field names must stay stable.

use serde::{Deserialize, Serialize};

/// Caller-supplied stable identifier for an activity.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ActivityId = String;

/// A single reminder/task entry in the user's activity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Identity of the entry. Uniqueness within the list is a caller
    /// obligation.
    pub id: ActivityId,
    /// Short display title.
    pub title: String,
    /// Optional free-form detail text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Optional reminder time, unix epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remind_at: Option<i64>,
}

impl Activity {
    /// Creates an activity with the caller-provided id and title.
    ///
    /// Optional fields start as `None`.
    pub fn new(id: impl Into<ActivityId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            notes: None,
            remind_at: None,
        }
    }
}
