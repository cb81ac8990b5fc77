//! Integration tests for persisted editor flags

use pageedit::overlay::ManualScheduler;
use pageedit::session::{
    load_flag, MemorySessionStorage, SessionStorage, SledSessionStorage, IS_EDIT_KEY,
    IS_POSITION_TOGGLED_KEY,
};
use pageedit::PageEditStore;
use std::sync::Arc;
use tempfile::TempDir;

fn store_on(storage: Arc<dyn SessionStorage>) -> PageEditStore {
    PageEditStore::new(storage, Arc::new(ManualScheduler::new()))
}

#[test]
fn test_toggle_edit_round_trip_in_memory() {
    let storage = Arc::new(MemorySessionStorage::new());
    let mut store = store_on(storage.clone());
    assert!(!store.is_edit());

    assert!(store.toggle_edit(None));
    assert!(store.is_edit());
    assert!(load_flag(storage.as_ref(), IS_EDIT_KEY, false));

    let reconstructed = store_on(storage);
    assert!(reconstructed.is_edit());
}

#[test]
fn test_flags_survive_sled_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("session");

    {
        let storage = Arc::new(SledSessionStorage::open(&path).unwrap());
        let mut store = store_on(storage.clone());
        store.toggle_edit(Some(true));
        store.toggle_position(None);
        storage.flush().unwrap();
    }

    let storage = Arc::new(SledSessionStorage::open(&path).unwrap());
    let store = store_on(storage);
    assert!(store.is_edit());
    assert!(store.is_position_toggled());
}

#[test]
fn test_corrupt_value_falls_back_to_default() {
    let storage = Arc::new(MemorySessionStorage::new());
    storage.set_raw(IS_EDIT_KEY, b"not json").unwrap();
    storage.set_raw(IS_POSITION_TOGGLED_KEY, b"\"yes\"").unwrap();

    let store = store_on(storage);
    assert!(!store.is_edit());
    assert!(!store.is_position_toggled());
}

#[test]
fn test_setting_same_value_still_writes_through() {
    let storage = Arc::new(MemorySessionStorage::new());
    let mut store = store_on(storage.clone());
    store.toggle_position(Some(false));
    assert_eq!(
        storage.get_raw(IS_POSITION_TOGGLED_KEY).unwrap(),
        Some(b"false".to_vec())
    );
}
