//! Persistence boundary for list snapshots.
//!
//! # Responsibility
//! - Define the adapter contract the store writes snapshots through.
//! - Provide local storage backends (memory, JSON file, SQLite).
//!
//! # Invariants
//! - Adapters store the full item snapshot; the last write wins.
//! - Every read goes through `snapshot::decode_snapshot` validation.
//! - The undo buffer and view filter are never persisted.

use crate::model::item::Item;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod file;
pub mod memory;
pub mod snapshot;
pub mod sqlite;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type PersistResult<T> = Result<T, PersistError>;

/// Failure reading or writing a snapshot.
#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Sqlite(rusqlite::Error),
    /// SQLite file was written by a newer binary.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// Snapshot could not be serialized.
    Encode(serde_json::Error),
    /// Stored value is not a valid snapshot document.
    Malformed(String),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage io failed: {err}"),
            Self::Sqlite(err) => write!(f, "sqlite storage failed: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "storage schema version {found} is newer than supported {supported}"
            ),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::Malformed(message) => write!(f, "malformed stored snapshot: {message}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Malformed(_) => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Storage contract used by `ListStore`.
///
/// `read` is called once when a store opens; `write` after every mutation.
pub trait PersistenceAdapter {
    /// Returns the stored snapshot, or `None` when nothing was stored yet.
    fn read(&self) -> PersistResult<Option<Vec<Item>>>;

    /// Replaces the stored snapshot with `items`.
    fn write(&mut self, items: &[Item]) -> PersistResult<()>;
}

impl<P: PersistenceAdapter + ?Sized> PersistenceAdapter for Box<P> {
    fn read(&self) -> PersistResult<Option<Vec<Item>>> {
        (**self).read()
    }

    fn write(&mut self, items: &[Item]) -> PersistResult<()> {
        (**self).write(items)
    }
}
