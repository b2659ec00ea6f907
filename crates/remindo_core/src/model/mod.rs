//! Domain records persisted by the local state store.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep serialization shapes stable for the key-value snapshot format.
//!
//! # Invariants
//! - `Activity` identity is its `id` field; the core never generates ids.
//! - `UserRecord` is written once at registration and never mutated.

pub mod activity;
pub mod session;
pub mod user;
