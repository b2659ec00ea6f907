//! Key-value persistence port.
//!
//! # Responsibility
//! - Define the storage contract the state store is written against.
//! - Isolate SQLite details from store/business orchestration.
//!
//! # Invariants
//! - Keys are UTF-8 strings; values are serialized text.
//! - `set` on an existing key overwrites; `remove` on a missing key is a
//!   no-op.
//! - Implementations are `Send + Sync` so the background writer can share
//!   the backend with the foreground store.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod migrations;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Storage transport error.
///
/// Read failures are recovered locally by the store (default values); write
/// failures are logged by the writer thread and never reach the caller.
#[derive(Debug)]
pub enum KvError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The backend's interior lock was poisoned by a panicking writer.
    Poisoned,
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Poisoned => write!(f, "storage lock poisoned"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::Poisoned => None,
        }
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String-keyed durable storage contract.
///
/// The state store takes this as an injected port so it can run against the
/// SQLite backend on device and against [`MemoryKvStore`] in tests.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> KvResult<()>;
    fn remove(&self, key: &str) -> KvResult<()>;
}
