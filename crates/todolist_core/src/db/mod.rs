//! SQLite connections for the storage backend.
//!
//! # Invariants
//! - Connections are returned only after `schema::ensure_schema` succeeded.
//! - Busy connections wait up to five seconds before failing.

pub mod schema;

use crate::persist::{PersistError, PersistResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) a storage database file.
///
/// # Side effects
/// - Emits `db_open` events with mode, duration and status.
pub fn open_db(path: impl AsRef<Path>) -> PersistResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a throwaway in-memory storage database.
pub fn open_db_in_memory() -> PersistResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> PersistResult<Connection> {
    let started_at = Instant::now();
    let opened = connect()
        .map_err(PersistError::from)
        .and_then(|mut conn| -> PersistResult<Connection> {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            schema::ensure_schema(&mut conn)?;
            Ok(conn)
        });

    match &opened {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    opened
}
