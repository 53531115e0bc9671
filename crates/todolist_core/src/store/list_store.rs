//! Item list store.
//!
//! # Responsibility
//! - Apply list mutations and expose derived read-only views.
//! - Track per-item edit sessions and their origin values.
//! - Persist the full item snapshot after every committed mutation.
//!
//! # Invariants
//! - Item ids are unique across `items`.
//! - `undo_buffer` grows only through `undo` and shrinks only through `redo`.
//! - Each mutation installs a fresh `Arc<[Item]>`; earlier snapshots are
//!   never modified.
//! - Storage never receives the transient empty text of an open edit.
//! - The undo buffer, filter and edit sessions live in memory only.

use super::id::IdAllocator;
use super::StoreResult;
use crate::model::filter::Filter;
use crate::model::item::{Item, ItemId};
use crate::persist::PersistenceAdapter;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::iter;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct EditSession {
    /// Text restored when an edit is committed empty.
    origin: String,
    editing: bool,
}

/// Ordered to-do list with undo/redo and injected persistence.
pub struct ListStore<P: PersistenceAdapter> {
    storage: P,
    items: Arc<[Item]>,
    undo_buffer: Vec<Item>,
    filter: Filter,
    sessions: HashMap<ItemId, EditSession>,
    ids: IdAllocator,
}

impl<P: PersistenceAdapter> ListStore<P> {
    /// Opens a store, restoring the snapshot held by `storage`.
    ///
    /// # Errors
    /// - Returns `StoreError::Persist` when the stored snapshot cannot be read.
    ///   The store refuses to start empty so stored data is not overwritten.
    pub fn open(storage: P) -> StoreResult<Self> {
        let restored = match storage.read() {
            Ok(restored) => restored,
            Err(err) => {
                error!("event=store_open module=store status=error error={err}");
                return Err(err.into());
            }
        };
        let from_storage = restored.is_some();
        let items: Vec<Item> = restored.unwrap_or_default();
        let ids = IdAllocator::seeded(items.iter().map(|item| item.id));

        info!(
            "event=store_open module=store status=ok restored={} items={}",
            from_storage,
            items.len()
        );

        Ok(Self {
            storage,
            items: items.into(),
            undo_buffer: Vec::new(),
            filter: Filter::default(),
            sessions: HashMap::new(),
            ids,
        })
    }

    /// Appends a new open item.
    ///
    /// Returns `Ok(None)` without touching storage when `text` is empty or
    /// no id above the existing ones is left.
    pub fn add(&mut self, text: &str) -> StoreResult<Option<ItemId>> {
        if text.is_empty() {
            debug!("event=item_add module=store status=noop reason=empty_text");
            return Ok(None);
        }
        let Some(id) = self.ids.next_id() else {
            warn!("event=item_add module=store status=noop reason=id_space_exhausted");
            return Ok(None);
        };

        let item = Item::new(id, text);
        let next = self.items.iter().cloned().chain(iter::once(item)).collect();
        self.commit(next, "item_add")?;
        info!("event=item_add module=store status=ok id={id}");
        Ok(Some(id))
    }

    /// Enters edit mode for `id`, recording its origin value.
    ///
    /// Returns `false` when the item does not exist.
    pub fn begin_edit(&mut self, id: ItemId) -> bool {
        let Some(current) = self.item(id).map(|item| item.text.clone()) else {
            debug!("event=edit_begin module=store status=noop reason=not_found id={id}");
            return false;
        };
        self.session_mut(id, current).editing = true;
        true
    }

    /// Replaces the text of `id` in memory.
    ///
    /// Emptiness is not checked here; `commit_edit` handles it. The change is
    /// written to storage on commit.
    pub fn edit(&mut self, id: ItemId, text: &str) -> bool {
        let Some(current) = self.item(id).map(|item| item.text.clone()) else {
            debug!("event=item_edit module=store status=noop reason=not_found id={id}");
            return false;
        };
        self.session_mut(id, current);
        self.items = self.replace_item(id, |item| item.with_text(text)).into();
        true
    }

    /// Leaves edit mode for `id` and persists the result.
    ///
    /// An empty text is reverted to the origin value; any other text becomes
    /// the origin for later sessions.
    pub fn commit_edit(&mut self, id: ItemId) -> StoreResult<bool> {
        let Some(current) = self.item(id).map(|item| item.text.clone()) else {
            debug!("event=edit_commit module=store status=noop reason=not_found id={id}");
            return Ok(false);
        };

        let session = self.session_mut(id, current.clone());
        session.editing = false;
        let reverted = current.is_empty();
        let next = if reverted {
            let origin = session.origin.clone();
            self.replace_item(id, |item| item.with_text(origin.as_str()))
        } else {
            session.origin = current;
            self.items.to_vec()
        };

        self.commit(next, "edit_commit")?;
        info!("event=edit_commit module=store status=ok id={id} reverted={reverted}");
        Ok(true)
    }

    /// Returns whether `id` is currently in edit mode.
    pub fn is_editing(&self, id: ItemId) -> bool {
        self.sessions
            .get(&id)
            .is_some_and(|session| session.editing)
    }

    /// Flips `completed` for `id`.
    pub fn toggle(&mut self, id: ItemId) -> StoreResult<bool> {
        if self.item(id).is_none() {
            debug!("event=item_toggle module=store status=noop reason=not_found id={id}");
            return Ok(false);
        }
        let next = self.replace_item(id, |item| item.with_completed(!item.completed));
        self.commit(next, "item_toggle")?;
        info!("event=item_toggle module=store status=ok id={id}");
        Ok(true)
    }

    /// Removes `id` from the list. The undo buffer is left alone.
    pub fn remove(&mut self, id: ItemId) -> StoreResult<bool> {
        if self.item(id).is_none() {
            debug!("event=item_remove module=store status=noop reason=not_found id={id}");
            return Ok(false);
        }
        let next = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        self.sessions.remove(&id);
        self.commit(next, "item_remove")?;
        info!("event=item_remove module=store status=ok id={id}");
        Ok(true)
    }

    /// Completes every item, or reopens every item when all are completed.
    ///
    /// "All completed" is vacuously true here for an empty list, which makes
    /// this a no-op since nothing can be flipped.
    pub fn toggle_all(&mut self) -> StoreResult<bool> {
        if self.items.is_empty() {
            debug!("event=toggle_all module=store status=noop reason=empty_list");
            return Ok(false);
        }
        let target = !self.items.iter().all(|item| item.completed);
        let next = self
            .items
            .iter()
            .map(|item| item.with_completed(target))
            .collect();
        self.commit(next, "toggle_all")?;
        info!(
            "event=toggle_all module=store status=ok completed={target} items={}",
            self.items.len()
        );
        Ok(true)
    }

    /// Drops every completed item, keeping the order of the rest.
    pub fn clear_completed(&mut self) -> StoreResult<bool> {
        if !self.has_completed() {
            debug!("event=clear_completed module=store status=noop reason=none_completed");
            return Ok(false);
        }
        let (cleared, kept): (Vec<Item>, Vec<Item>) =
            self.items.iter().cloned().partition(|item| item.completed);
        for item in &cleared {
            self.sessions.remove(&item.id);
        }
        self.commit(kept, "clear_completed")?;
        info!(
            "event=clear_completed module=store status=ok removed={}",
            cleared.len()
        );
        Ok(true)
    }

    /// Moves the last item onto the undo buffer.
    pub fn undo(&mut self) -> StoreResult<bool> {
        let Some((last, rest)) = self.items.split_last() else {
            debug!("event=undo module=store status=noop reason=empty_list");
            return Ok(false);
        };
        let (mut last, rest) = (last.clone(), rest.to_vec());
        // Undo closes an open edit the same way commit does.
        if let Some(session) = self.sessions.get_mut(&last.id) {
            session.editing = false;
            if last.text.is_empty() {
                last.text = session.origin.clone();
            }
        }
        let id = last.id;
        self.undo_buffer.push(last);
        self.commit(rest, "undo")?;
        info!(
            "event=undo module=store status=ok id={id} buffered={}",
            self.undo_buffer.len()
        );
        Ok(true)
    }

    /// Moves the most recently undone item back to the end of the list.
    pub fn redo(&mut self) -> StoreResult<bool> {
        let Some(item) = self.undo_buffer.pop() else {
            debug!("event=redo module=store status=noop reason=empty_buffer");
            return Ok(false);
        };
        let id = item.id;
        let next = self.items.iter().cloned().chain(iter::once(item)).collect();
        self.commit(next, "redo")?;
        info!(
            "event=redo module=store status=ok id={id} buffered={}",
            self.undo_buffer.len()
        );
        Ok(true)
    }

    /// Changes the view filter. Never persisted.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Current items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Shares the current snapshot. Later mutations do not affect it.
    pub fn snapshot(&self) -> Arc<[Item]> {
        Arc::clone(&self.items)
    }

    /// Undone items, most recent last.
    pub fn undo_buffer(&self) -> &[Item] {
        &self.undo_buffer
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items passing the current filter, in list order.
    pub fn visible_items(&self) -> impl Iterator<Item = &Item> + '_ {
        let filter = self.filter;
        self.items.iter().filter(move |item| filter.matches(item))
    }

    /// Number of items not yet completed.
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }

    /// True when the list is non-empty and every item is completed.
    ///
    /// Unlike `toggle_all`, an empty list does not count as all completed.
    pub fn all_completed(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| item.completed)
    }

    pub fn has_completed(&self) -> bool {
        self.items.iter().any(|item| item.completed)
    }

    pub fn can_undo(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undo_buffer.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn storage(&self) -> &P {
        &self.storage
    }

    pub fn into_storage(self) -> P {
        self.storage
    }

    fn session_mut(&mut self, id: ItemId, current: String) -> &mut EditSession {
        self.sessions.entry(id).or_insert_with(|| EditSession {
            origin: current,
            editing: false,
        })
    }

    fn replace_item(&self, id: ItemId, update: impl Fn(&Item) -> Item) -> Vec<Item> {
        self.items
            .iter()
            .map(|item| {
                if item.id == id {
                    update(item)
                } else {
                    item.clone()
                }
            })
            .collect()
    }

    // Items emptied by an open edit session are written with their origin text.
    fn persisted_items(&self) -> Option<Vec<Item>> {
        if !self.items.iter().any(|item| item.text.is_empty()) {
            return None;
        }
        let restored = self
            .items
            .iter()
            .map(|item| match self.sessions.get(&item.id) {
                Some(session) if item.text.is_empty() => item.with_text(session.origin.as_str()),
                _ => item.clone(),
            })
            .collect();
        Some(restored)
    }

    // In-memory state keeps the mutation even when the write fails; the next
    // successful write carries it.
    fn commit(&mut self, next: Vec<Item>, event: &str) -> StoreResult<()> {
        self.items = next.into();
        let written = match self.persisted_items() {
            Some(restored) => self.storage.write(&restored),
            None => self.storage.write(&self.items),
        };
        if let Err(err) = written {
            error!(
                "event={event} module=store status=error error_code=persist_failed error={err}"
            );
            return Err(err.into());
        }
        Ok(())
    }
}
