//! To-do list domain model.
//!
//! # Responsibility
//! - Define the item record shared by the store, storage backends and views.
//! - Define the view-only filter predicate.
//!
//! # Invariants
//! - Every item is identified by a positive `ItemId`, unique within a list.
//! - Filters never affect persisted data.

pub mod filter;
pub mod item;
