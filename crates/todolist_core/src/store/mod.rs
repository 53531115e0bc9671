//! List state management.
//!
//! # Responsibility
//! - Hold the item snapshot, undo buffer, filter and edit sessions.
//! - Write every committed mutation through the injected storage adapter.
//!
//! # Invariants
//! - Invalid operations are silent no-ops, never errors.
//! - Only storage failures surface as `StoreError`.

use crate::persist::PersistError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod id;
pub mod list_store;

pub use id::IdAllocator;
pub use list_store::ListStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the snapshot failed.
    Persist(PersistError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<PersistError> for StoreError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}
