//! SQLite-backed slot store.
//!
//! # Responsibility
//! - Persist slots in the `slots` table of a migrated diary database.
//!
//! # Invariants
//! - Connections handed to this store must already be migrated
//!   (use `db::open_db` / `db::open_db_in_memory`).
//! - One connection is shared behind a mutex; every call is a single statement.

use super::{SlotStore, StoreError, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct SqliteSlotStore {
    conn: Mutex<Connection>,
}

impl SqliteSlotStore {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens the database file at `path`, applying migrations first.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned("sqlite"))
    }
}

impl SlotStore for SqliteSlotStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=slot_write module=store status=ok key={key} bytes={}",
            value.len()
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM slots WHERE key = ?1;", [key])?;
        debug!("event=slot_remove module=store status=ok key={key} removed={changed}");
        Ok(())
    }
}
