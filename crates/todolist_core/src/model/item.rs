//! Item domain model.
//!
//! # Responsibility
//! - Define the canonical to-do entry and its identifier.
//! - Validate records crossing the persistence boundary.
//!
//! # Invariants
//! - `id` lies in `1..=MAX_ITEM_ID` and is never reused for another item in
//!   the same list.
//! - Persisted `text` is never empty; it may only be empty transiently while
//!   an edit session is open.
//! - The wire name of `text` is `active`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Largest id a snapshot may carry: the top of the exactly representable
/// integer range of JSON numbers in browser storage (2^53 - 1).
pub const MAX_ITEM_ID: i64 = (1 << 53) - 1;

/// Stable identifier of a to-do item.
///
/// Integer valued so snapshots stay compatible with timestamp-style ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Wraps a raw id value without validation.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Validation failures for item records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Ids must be strictly positive.
    NonPositiveId(i64),
    /// Ids must not exceed `MAX_ITEM_ID`.
    IdOutOfRange(i64),
    /// Persisted text must not be empty.
    EmptyText(ItemId),
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveId(value) => write!(f, "item id must be positive, got {value}"),
            Self::IdOutOfRange(value) => {
                write!(f, "item id {value} exceeds maximum {MAX_ITEM_ID}")
            }
            Self::EmptyText(id) => write!(f, "item {id} has empty text"),
        }
    }
}

impl Error for ItemValidationError {}

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord")]
pub struct Item {
    pub id: ItemId,
    /// Serialized as `active` to match the stored snapshot schema.
    #[serde(rename = "active")]
    pub text: String,
    pub completed: bool,
}

impl Item {
    /// Creates an open (not completed) item.
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Checks the invariants required for a persisted record.
    ///
    /// # Errors
    /// - `NonPositiveId` when `id <= 0`.
    /// - `IdOutOfRange` when `id > MAX_ITEM_ID`.
    /// - `EmptyText` when `text` is empty.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.id.get() <= 0 {
            return Err(ItemValidationError::NonPositiveId(self.id.get()));
        }
        if self.id.get() > MAX_ITEM_ID {
            return Err(ItemValidationError::IdOutOfRange(self.id.get()));
        }
        if self.text.is_empty() {
            return Err(ItemValidationError::EmptyText(self.id));
        }
        Ok(())
    }

    /// Returns a copy with `completed` replaced.
    pub fn with_completed(&self, completed: bool) -> Self {
        Self {
            completed,
            ..self.clone()
        }
    }

    /// Returns a copy with `text` replaced.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }
}

/// Raw wire shape, validated into `Item` on deserialize.
#[derive(Deserialize)]
struct ItemRecord {
    id: i64,
    #[serde(alias = "text")]
    active: String,
    completed: bool,
}

impl TryFrom<ItemRecord> for Item {
    type Error = ItemValidationError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let item = Self {
            id: ItemId::new(record.id),
            text: record.active,
            completed: record.completed,
        };
        item.validate()?;
        Ok(item)
    }
}
