//! Local key/value slot storage.
//!
//! # Responsibility
//! - Define the `SlotStore` contract for named string slots.
//! - Provide SQLite-backed and in-memory implementations.
//! - Route change notifications between storage contexts sharing one store.
//!
//! # Invariants
//! - Slot values are opaque strings; typing happens in `cell`.
//! - A write made through one context is announced to every other context
//!   subscribed to the same key, never to the writer itself.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod context;
mod memory;
mod sqlite;

pub use context::{ChangeHub, ContextId, StorageContext, Subscription};
pub use memory::MemorySlotStore;
pub use sqlite::SqliteSlotStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a slot store backend.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Write would push the store over its byte budget.
    QuotaExceeded {
        key: String,
        requested_bytes: usize,
        quota_bytes: usize,
    },
    /// A backend lock was poisoned by a panicking writer.
    Poisoned(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::QuotaExceeded {
                key,
                requested_bytes,
                quota_bytes,
            } => write!(
                f,
                "quota exceeded writing slot `{key}`: {requested_bytes} bytes requested, {quota_bytes} allowed"
            ),
            Self::Poisoned(backend) => write!(f, "{backend} slot store lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::QuotaExceeded { .. } | Self::Poisoned(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named string slots persisted on the local device.
pub trait SlotStore: Send + Sync {
    /// Returns the raw slot value, or `None` when the slot is absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Creates or overwrites one slot.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Deletes one slot. Removing an absent slot is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Change notification delivered to other storage contexts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub old_value: Option<String>,
    /// `None` when the slot was removed.
    pub new_value: Option<String>,
}
