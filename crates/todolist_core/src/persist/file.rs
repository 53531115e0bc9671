//! JSON file storage backend.
//!
//! # Invariants
//! - A missing file means nothing was stored yet.
//! - Writes replace the file via rename, so readers never see a torn file.

use super::snapshot::{decode_snapshot, encode_snapshot};
use super::{PersistResult, PersistenceAdapter};
use crate::model::item::Item;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const TEMP_SUFFIX: &str = "tmp";

/// Stores the snapshot as a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }
}

impl PersistenceAdapter for JsonFileStorage {
    fn read(&self) -> PersistResult<Option<Vec<Item>>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(decode_snapshot(&raw)?.items))
    }

    fn write(&mut self, items: &[Item]) -> PersistResult<()> {
        let encoded = encode_snapshot(items)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp_path = self.temp_path();
        fs::write(&temp_path, encoded.as_bytes())?;
        fs::rename(&temp_path, &self.path)?;
        debug!(
            "event=snapshot_write module=persist backend=file status=ok items={} bytes={}",
            items.len(),
            encoded.len()
        );
        Ok(())
    }
}
