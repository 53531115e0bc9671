use todolist_core::{ListStore, MemoryStorage};

#[test]
fn edit_mode_toggles_with_begin_and_commit() {
    let mut store = ListStore::open(MemoryStorage::new()).unwrap();
    let id = store.add("draft").unwrap().unwrap();

    assert!(!store.is_editing(id));
    assert!(store.begin_edit(id));
    assert!(store.is_editing(id));
    assert!(store.commit_edit(id).unwrap());
    assert!(!store.is_editing(id));
}

#[test]
fn edit_changes_memory_and_commit_persists() {
    let mut store = ListStore::open(MemoryStorage::new()).unwrap();
    let id = store.add("draft").unwrap().unwrap();
    let writes = store.storage().write_count();

    store.begin_edit(id);
    assert!(store.edit(id, "final"));
    assert_eq!(store.item(id).unwrap().text, "final");
    assert_eq!(store.storage().write_count(), writes);

    store.commit_edit(id).unwrap();
    assert_eq!(store.storage().write_count(), writes + 1);
    assert!(store.storage().raw().unwrap().contains("\"active\":\"final\""));
}

#[test]
fn empty_commit_reverts_to_origin() {
    let mut store = ListStore::open(MemoryStorage::new()).unwrap();
    let id = store.add("walk dog").unwrap().unwrap();

    store.begin_edit(id);
    store.edit(id, "walk d");
    store.edit(id, "");
    assert_eq!(store.item(id).unwrap().text, "");

    store.commit_edit(id).unwrap();
    assert_eq!(store.item(id).unwrap().text, "walk dog");
}

#[test]
fn successful_commit_moves_origin_forward() {
    let mut store = ListStore::open(MemoryStorage::new()).unwrap();
    let id = store.add("v1").unwrap().unwrap();

    store.begin_edit(id);
    store.edit(id, "v2");
    store.commit_edit(id).unwrap();

    store.begin_edit(id);
    store.edit(id, "");
    store.commit_edit(id).unwrap();
    assert_eq!(store.item(id).unwrap().text, "v2");
}

#[test]
fn edit_without_begin_still_captures_origin() {
    let mut store = ListStore::open(MemoryStorage::new()).unwrap();
    let id = store.add("keep me").unwrap().unwrap();

    store.edit(id, "");
    store.commit_edit(id).unwrap();
    assert_eq!(store.item(id).unwrap().text, "keep me");
}

#[test]
fn undo_ends_edit_mode_of_popped_item() {
    let mut store = ListStore::open(MemoryStorage::new()).unwrap();
    let id = store.add("last").unwrap().unwrap();
    store.begin_edit(id);

    store.undo().unwrap();
    assert!(!store.is_editing(id));

    store.redo().unwrap();
    assert!(!store.is_editing(id));
    assert_eq!(store.item(id).unwrap().text, "last");
}

#[test]
fn undo_of_emptied_edit_restores_origin_text() {
    let mut store = ListStore::open(MemoryStorage::new()).unwrap();
    let id = store.add("keep this").unwrap().unwrap();
    store.begin_edit(id);
    store.edit(id, "");

    store.undo().unwrap();
    assert_eq!(store.undo_buffer()[0].text, "keep this");

    store.redo().unwrap();
    assert!(!store.is_editing(id));
    assert_eq!(store.item(id).unwrap().text, "keep this");
    assert!(store.storage().raw().unwrap().contains("\"active\":\"keep this\""));
}

#[test]
fn open_empty_edit_is_not_written_by_other_mutations() {
    let mut store = ListStore::open(MemoryStorage::new()).unwrap();
    let editing = store.add("origin text").unwrap().unwrap();
    let other = store.add("other").unwrap().unwrap();

    store.begin_edit(editing);
    store.edit(editing, "");
    store.toggle(other).unwrap();
    assert_eq!(store.item(editing).unwrap().text, "");

    let reopened = ListStore::open(store.into_storage()).unwrap();
    assert_eq!(reopened.item(editing).unwrap().text, "origin text");
    assert!(reopened.item(other).unwrap().completed);
}
