//! Integration tests for store reset

use pageedit::overlay::OverlayOptions;
use pageedit::session::{load_flag, IS_EDIT_KEY};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::integration::{article_tree, memory_store};

#[test]
fn test_reset_clears_derived_state() {
    let tree = article_tree();
    let (mut store, storage, _) = memory_store();
    store.set_active_context(&tree.registry, Some(tree.title)).unwrap();
    store.toggle_edit(Some(true));
    store
        .overlay()
        .show(OverlayOptions::new().message("Saving"))
        .unwrap();

    store.reset();

    assert!(store.option_map().is_empty());
    assert!(store.context_menu_options().is_empty());
    assert_eq!(store.active_context(), None);
    assert!(!store.is_edit());
    assert!(!store.overlay().is_active());
    assert_eq!(store.overlay().snapshot().message, "");
    // The persisted value is untouched.
    assert!(load_flag(storage.as_ref(), IS_EDIT_KEY, false));
}

#[test]
fn test_reset_cancels_timer_without_on_close() {
    let (mut store, _, scheduler) = memory_store();
    let closed = Arc::new(AtomicUsize::new(0));
    let counter = closed.clone();
    store
        .overlay()
        .show(OverlayOptions::new().timeout_secs(1).on_close(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

    store.reset();
    assert_eq!(scheduler.pending(), 0);
    assert_eq!(scheduler.advance(Duration::from_secs(2)), 0);
    assert_eq!(closed.load(Ordering::SeqCst), 0);
}

#[test]
fn test_store_is_usable_after_reset() {
    let tree = article_tree();
    let (mut store, _, _) = memory_store();
    store.set_active_context(&tree.registry, Some(tree.title)).unwrap();
    store.reset();

    store.set_active_context(&tree.registry, None).unwrap();
    assert!(store.option_map().is_empty());

    store.set_active_context(&tree.registry, Some(tree.sidebar)).unwrap();
    let keys: Vec<&str> = store.option_map().context_ids().collect();
    assert_eq!(keys, vec!["page", "sidebar"]);
}
