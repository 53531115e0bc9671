//! Core state management for the to-do list.
//! This crate owns the list invariants; front ends only render and dispatch.

pub mod db;
pub mod logging;
pub mod model;
pub mod persist;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::filter::{Filter, ParseFilterError};
pub use model::item::{Item, ItemId, ItemValidationError, MAX_ITEM_ID};
pub use persist::snapshot::{decode_snapshot, encode_snapshot, DecodedSnapshot, RejectedRecord};
pub use persist::{
    JsonFileStorage, MemoryStorage, PersistError, PersistResult, PersistenceAdapter,
    SqliteStorage,
};
pub use store::{IdAllocator, ListStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
