//! Snapshot wire codec.
//!
//! # Responsibility
//! - Encode item snapshots as JSON arrays of `{id, active, completed}`.
//! - Validate stored documents before they reach the store.
//!
//! # Invariants
//! - A document must be `null` or an array; anything else is rejected whole.
//! - Individual bad records are dropped and reported, never loaded.
//! - Loaded ids are unique; later duplicates are dropped.

use super::{PersistError, PersistResult};
use crate::model::item::Item;
use log::warn;
use serde_json::Value;
use std::collections::HashSet;

/// Record dropped while decoding a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position in the stored array.
    pub index: usize,
    pub reason: String,
}

/// Decoded snapshot plus the records that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedSnapshot {
    pub items: Vec<Item>,
    pub rejected: Vec<RejectedRecord>,
}

/// Serializes a snapshot into its stored JSON form.
pub fn encode_snapshot(items: &[Item]) -> PersistResult<String> {
    serde_json::to_string(items).map_err(PersistError::Encode)
}

/// Parses and validates a stored JSON document.
///
/// # Errors
/// - `Malformed` when `raw` is not JSON or its top level is neither `null`
///   nor an array.
pub fn decode_snapshot(raw: &str) -> PersistResult<DecodedSnapshot> {
    let document: Value = serde_json::from_str(raw)
        .map_err(|err| PersistError::Malformed(format!("invalid json: {err}")))?;

    let records = match document {
        Value::Null => return Ok(DecodedSnapshot::default()),
        Value::Array(records) => records,
        other => {
            return Err(PersistError::Malformed(format!(
                "expected an array of items, found {}",
                json_kind(&other)
            )));
        }
    };

    let mut decoded = DecodedSnapshot::default();
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Item>(record) {
            Ok(item) if seen.insert(item.id) => decoded.items.push(item),
            Ok(item) => decoded.rejected.push(RejectedRecord {
                index,
                reason: format!("duplicate id {}", item.id),
            }),
            Err(err) => decoded.rejected.push(RejectedRecord {
                index,
                reason: err.to_string(),
            }),
        }
    }

    for rejected in &decoded.rejected {
        warn!(
            "event=snapshot_decode module=persist status=rejected index={} reason={}",
            rejected.index, rejected.reason
        );
    }

    Ok(decoded)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
