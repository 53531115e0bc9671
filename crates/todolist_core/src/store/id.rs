//! Item id allocation.
//!
//! Ids look like epoch-millisecond timestamps so they sort by creation time,
//! but each id is at least one greater than the previous one. Two items
//! created within the same clock tick still get distinct ids. Allocation
//! stops at `MAX_ITEM_ID` instead of wrapping or repeating.

use crate::model::item::{ItemId, MAX_ITEM_ID};
use std::time::{SystemTime, UNIX_EPOCH};

/// Monotonic id source seeded from the highest id already in use.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator that never returns an id `<=` any of `existing`.
    pub fn seeded<I: IntoIterator<Item = ItemId>>(existing: I) -> Self {
        let last = existing.into_iter().map(ItemId::get).max().unwrap_or(0);
        Self { last: last.max(0) }
    }

    /// Allocates the next id using the system clock.
    ///
    /// Returns `None` once the id space is exhausted.
    pub fn next_id(&mut self) -> Option<ItemId> {
        self.next_at(now_epoch_ms())
    }

    /// Allocates the next id as if the clock read `now_ms`.
    pub fn next_at(&mut self, now_ms: i64) -> Option<ItemId> {
        let next = now_ms.max(self.last.checked_add(1)?);
        if next > MAX_ITEM_ID {
            return None;
        }
        self.last = next;
        Some(ItemId::new(next))
    }

    /// Highest id handed out or seeded so far.
    pub fn last(&self) -> i64 {
        self.last
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        // Clock before 1970: fall back to the counter alone.
        .unwrap_or(0)
}
