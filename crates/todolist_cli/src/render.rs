//! Plain-text list view.

use std::fmt::Write;
use todolist_core::{ListStore, PersistenceAdapter};

/// Renders the visible items followed by the footer line.
///
/// The footer is omitted for an empty list.
pub fn render<P: PersistenceAdapter>(store: &ListStore<P>) -> String {
    let mut out = String::new();
    for item in store.visible_items() {
        let mark = if item.completed { 'x' } else { ' ' };
        let editing = if store.is_editing(item.id) { " (editing)" } else { "" };
        let _ = writeln!(out, "{:>15} [{mark}] {}{editing}", item.id, item.text);
    }

    if store.is_empty() {
        out.push_str("nothing to do\n");
        return out;
    }

    let left = store.active_count();
    let _ = write!(
        out,
        "{left} item{} left | filter: {} | undo: {} | redo: {}",
        if left == 1 { "" } else { "s" },
        store.filter(),
        on_off(store.can_undo()),
        on_off(store.can_redo()),
    );
    if store.all_completed() {
        out.push_str(" | all completed");
    }
    if store.has_completed() {
        out.push_str(" | clear completed");
    }
    out.push('\n');
    out
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
