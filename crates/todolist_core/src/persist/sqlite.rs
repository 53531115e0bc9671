//! SQLite key/value storage backend.
//!
//! # Invariants
//! - One row per key in `storage`; writes upsert the full snapshot.
//! - The connection must come from `db::open_db*` so the schema is in place.

use super::snapshot::{decode_snapshot, encode_snapshot};
use super::{PersistResult, PersistenceAdapter};
use crate::model::item::Item;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Storage key used when none is given.
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Stores the snapshot under a key in the `storage` table.
pub struct SqliteStorage<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_key(conn, DEFAULT_STORAGE_KEY)
    }

    /// Uses a custom key, letting several lists share one database.
    pub fn with_key(conn: &'conn Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PersistenceAdapter for SqliteStorage<'_> {
    fn read(&self) -> PersistResult<Option<Vec<Item>>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => Ok(Some(decode_snapshot(&raw)?.items)),
            None => Ok(None),
        }
    }

    fn write(&mut self, items: &[Item]) -> PersistResult<()> {
        let encoded = encode_snapshot(items)?;
        self.conn.execute(
            "INSERT INTO storage (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key.as_str(), encoded.as_str()],
        )?;
        debug!(
            "event=snapshot_write module=persist backend=sqlite status=ok items={}",
            items.len()
        );
        Ok(())
    }
}
