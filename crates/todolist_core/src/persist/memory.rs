//! In-process storage slot.

use super::snapshot::{decode_snapshot, encode_snapshot};
use super::{PersistResult, PersistenceAdapter};
use crate::model::item::Item;

/// Keeps the encoded snapshot in memory.
///
/// Goes through the same codec as the durable backends, so tests observe the
/// exact stored document.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    value: Option<String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a raw stored document, as if written by an earlier session.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: Some(raw.into()),
            writes: 0,
        }
    }

    /// Returns the stored document, if any.
    pub fn raw(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Number of snapshot writes performed.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl PersistenceAdapter for MemoryStorage {
    fn read(&self) -> PersistResult<Option<Vec<Item>>> {
        match self.value.as_deref() {
            Some(raw) => Ok(Some(decode_snapshot(raw)?.items)),
            None => Ok(None),
        }
    }

    fn write(&mut self, items: &[Item]) -> PersistResult<()> {
        self.value = Some(encode_snapshot(items)?);
        self.writes += 1;
        Ok(())
    }
}
