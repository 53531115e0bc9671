//! Storage table schema.
//!
//! # Invariants
//! - `PRAGMA user_version` records the schema the file was written with.
//! - A file stamped with a newer version is never read or written.

use crate::persist::{PersistError, PersistResult};
use log::info;
use rusqlite::Connection;

/// Schema version written by this binary.
pub const STORAGE_SCHEMA_VERSION: u32 = 1;

const STORAGE_TABLE_SQL: &str = include_str!("storage.sql");

/// Creates the `storage` table when missing and stamps the schema version.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer binary.
pub fn ensure_schema(conn: &mut Connection) -> PersistResult<()> {
    let found = schema_version(conn)?;
    if found > STORAGE_SCHEMA_VERSION {
        return Err(PersistError::UnsupportedSchemaVersion {
            found,
            supported: STORAGE_SCHEMA_VERSION,
        });
    }
    if found == STORAGE_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(STORAGE_TABLE_SQL)?;
    tx.pragma_update(None, "user_version", STORAGE_SCHEMA_VERSION)?;
    tx.commit()?;
    info!("event=db_schema module=db status=ok from={found} to={STORAGE_SCHEMA_VERSION}");
    Ok(())
}

/// Reads the schema version stamped on `conn`.
pub fn schema_version(conn: &Connection) -> PersistResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}
