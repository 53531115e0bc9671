use rusqlite::Connection;
use todolist_core::db::{open_db, open_db_in_memory};
use todolist_core::{
    Item, ItemId, JsonFileStorage, ListStore, PersistError, PersistResult, PersistenceAdapter,
    SqliteStorage, StoreError,
};

#[test]
fn json_file_storage_missing_file_reads_none() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path().join("todos.json"));
    assert!(storage.read().unwrap().is_none());
}

#[test]
fn json_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("todos.json");

    let mut store = ListStore::open(JsonFileStorage::new(&path)).unwrap();
    let id = store.add("water plants").unwrap().unwrap();
    store.add("call mom").unwrap();
    store.toggle(id).unwrap();
    drop(store);

    let reopened = ListStore::open(JsonFileStorage::new(&path)).unwrap();
    assert_eq!(reopened.len(), 2);
    assert!(reopened.item(id).unwrap().completed);
    assert!(!dir.path().join("nested").join("todos.json.tmp").exists());
}

#[test]
fn json_file_store_refuses_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    std::fs::write(&path, "{broken").unwrap();

    let err = ListStore::open(JsonFileStorage::new(&path)).err().unwrap();
    assert!(matches!(err, StoreError::Persist(PersistError::Malformed(_))));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{broken");
}

#[test]
fn sqlite_storage_upserts_under_key() {
    let conn = open_db_in_memory().unwrap();
    let mut storage = SqliteStorage::new(&conn);
    assert!(storage.read().unwrap().is_none());

    storage.write(&[Item::new(ItemId::new(1), "a")]).unwrap();
    storage
        .write(&[Item::new(ItemId::new(2), "b").with_completed(true)])
        .unwrap();

    let items = storage.read().unwrap().unwrap();
    assert_eq!(items, vec![Item::new(ItemId::new(2), "b").with_completed(true)]);
    assert_eq!(row_count(&conn), 1);
}

#[test]
fn sqlite_keys_keep_lists_apart() {
    let conn = open_db_in_memory().unwrap();
    let mut work = SqliteStorage::with_key(&conn, "work");
    let home = SqliteStorage::with_key(&conn, "home");

    work.write(&[Item::new(ItemId::new(1), "report")]).unwrap();
    assert!(home.read().unwrap().is_none());
    assert_eq!(work.key(), "work");
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut store = ListStore::open(SqliteStorage::new(&conn)).unwrap();
        store.add("first").unwrap();
        store.add("second").unwrap();
        store.undo().unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = ListStore::open(SqliteStorage::new(&conn)).unwrap();
    let texts: Vec<&str> = store.items().iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, ["first"]);
}

struct FailingStorage;

impl PersistenceAdapter for FailingStorage {
    fn read(&self) -> PersistResult<Option<Vec<Item>>> {
        Ok(None)
    }

    fn write(&mut self, _items: &[Item]) -> PersistResult<()> {
        Err(PersistError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }
}

#[test]
fn write_failure_is_reported_but_memory_keeps_mutation() {
    let mut store = ListStore::open(FailingStorage).unwrap();

    let err = store.add("unsaved").unwrap_err();
    assert!(matches!(err, StoreError::Persist(PersistError::Io(_))));
    assert_eq!(store.len(), 1);
}

fn row_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM storage;", [], |row| row.get(0))
        .unwrap()
}
