//! Integration tests for in-place reconciliation and record identity

use pageedit::menu::{MenuOption, SharedOption};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::integration::{article_tree, memory_store};

fn find(options: &[SharedOption], name: &str) -> SharedOption {
    options
        .iter()
        .find(|option| option.read().name == name)
        .cloned()
        .unwrap_or_else(|| panic!("option {name} missing"))
}

#[test]
fn test_repeated_activation_keeps_records_and_view() {
    let tree = article_tree();
    let (mut store, _, _) = memory_store();
    store.set_active_context(&tree.registry, Some(tree.title)).unwrap();
    let before = store.context_menu_options();
    let json_before = store.context_menu_json();

    store.set_active_context(&tree.registry, Some(tree.title)).unwrap();
    let after = store.context_menu_options();

    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(after.iter()) {
        assert!(Arc::ptr_eq(a, b));
    }
    assert_eq!(json_before, store.context_menu_json());
    assert_eq!(store.view_recompute_count(), 1);
}

#[test]
fn test_changed_label_is_written_in_place() {
    let label = Arc::new(parking_lot::Mutex::new("old".to_string()));
    let mut tree = article_tree();
    let source = label.clone();
    tree.registry
        .set_options_provider(tree.article, move || {
            vec![
                MenuOption::new("x").with_label(source.lock().clone()),
                MenuOption::new("y"),
            ]
        })
        .unwrap();

    let (mut store, _, _) = memory_store();
    store.set_active_context(&tree.registry, Some(tree.article)).unwrap();
    let record = find(&store.context_menu_options(), "x");
    let position = store.option_map().get("article").unwrap().get_index_of("x");

    *label.lock() = "new".to_string();
    assert!(store.set_active_context(&tree.registry, None).unwrap());

    assert_eq!(record.read().label.as_deref(), Some("new"));
    assert!(store
        .option_map()
        .is_same_record("article", "x", &record));
    assert_eq!(
        store.option_map().get("article").unwrap().get_index_of("x"),
        position
    );
}

#[test]
fn test_withdrawn_option_disappears() {
    let offer_history = Arc::new(AtomicBool::new(true));
    let mut tree = article_tree();
    let flag = offer_history.clone();
    tree.registry
        .set_options_provider(tree.page, move || {
            let mut options = vec![MenuOption::new("edit")];
            if flag.load(Ordering::SeqCst) {
                options.push(MenuOption::new("history"));
            }
            options
        })
        .unwrap();

    let (mut store, _, _) = memory_store();
    store.set_active_context(&tree.registry, Some(tree.title)).unwrap();
    assert!(store.option_map().get("page").unwrap().contains_key("history"));

    offer_history.store(false, Ordering::SeqCst);
    store.set_active_context(&tree.registry, None).unwrap();

    assert!(!store.option_map().get("page").unwrap().contains_key("history"));
    assert!(store
        .context_menu_options()
        .iter()
        .all(|option| option.read().name != "history"));
}

#[test]
fn test_peer_union_last_writer_wins_first_position_wins() {
    let mut tree = article_tree();
    let b = tree.registry.insert("b", None).unwrap();
    let c = tree.registry.insert("c", None).unwrap();
    tree.registry
        .set_menu_options(
            tree.sidebar,
            vec![MenuOption::new("shared").with_label("from sidebar")],
        )
        .unwrap();
    tree.registry
        .set_menu_options(b, vec![MenuOption::new("only-b")])
        .unwrap();
    tree.registry
        .set_menu_options(
            c,
            vec![
                MenuOption::new("shared").with_label("from c"),
                MenuOption::new("only-c"),
            ],
        )
        .unwrap();
    tree.registry.add_peer(tree.sidebar, b).unwrap();
    tree.registry.add_peer(tree.sidebar, c).unwrap();

    let (mut store, _, _) = memory_store();
    store.update_menu_options(&tree.registry, tree.sidebar).unwrap();

    let submap = store.option_map().get("sidebar").unwrap();
    let names: Vec<&str> = submap.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["shared", "only-b", "only-c"]);
    assert_eq!(
        submap["shared"].read().label.as_deref(),
        Some("from c")
    );
}

#[test]
fn test_same_name_at_two_positions_is_kept_twice() {
    let mut tree = article_tree();
    tree.registry
        .set_menu_options(tree.title, vec![MenuOption::new("edit").with_label("Edit title")])
        .unwrap();

    let (mut store, _, _) = memory_store();
    store.set_active_context(&tree.registry, Some(tree.title)).unwrap();

    let labels: Vec<Option<String>> = store
        .context_menu_options()
        .iter()
        .filter(|option| option.read().name == "edit")
        .map(|option| option.read().label.clone())
        .collect();
    assert_eq!(
        labels,
        vec![Some("Edit".to_string()), Some("Edit title".to_string())]
    );
}

#[test]
fn test_view_recomputes_once_per_change() {
    let tree = article_tree();
    let (mut store, _, _) = memory_store();
    store.set_active_context(&tree.registry, Some(tree.title)).unwrap();
    for _ in 0..5 {
        store.context_menu_options();
    }
    assert_eq!(store.view_recompute_count(), 1);

    store.set_active_context(&tree.registry, Some(tree.sidebar)).unwrap();
    for _ in 0..5 {
        store.context_menu_options();
    }
    assert_eq!(store.view_recompute_count(), 2);
}

#[test]
fn test_handlers_survive_reconciliation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut tree = article_tree();
    let counter = calls.clone();
    tree.registry
        .set_options_provider(tree.sidebar, move || {
            let counter = counter.clone();
            vec![MenuOption::new("collapse").with_handler(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })]
        })
        .unwrap();

    let (mut store, _, _) = memory_store();
    store.set_active_context(&tree.registry, Some(tree.sidebar)).unwrap();
    store.set_active_context(&tree.registry, None).unwrap();

    let record = find(&store.context_menu_options(), "collapse");
    let handler = record.read().handler.clone().unwrap();
    handler.invoke();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
