//! Integration tests for active context and trail resolution

use pageedit::context::ContextTree;
use pageedit::events::StoreEvent;
use pageedit::menu::MenuOption;
use pageedit::StoreError;

use crate::integration::{article_tree, memory_store};

fn keys(store: &pageedit::PageEditStore) -> Vec<String> {
    store
        .option_map()
        .context_ids()
        .map(str::to_string)
        .collect()
}

fn names(store: &pageedit::PageEditStore) -> Vec<String> {
    store
        .context_menu_options()
        .iter()
        .map(|option| option.read().name.clone())
        .collect()
}

#[test]
fn test_option_map_follows_trail_root_first() {
    let tree = article_tree();
    let (mut store, _, _) = memory_store();

    store.set_active_context(&tree.registry, Some(tree.title)).unwrap();

    assert_eq!(keys(&store), vec!["page", "article", "title"]);
    assert_eq!(
        names(&store),
        vec!["edit", "history", "add-section", "link"]
    );
    assert_eq!(
        store.context_trail(&tree.registry).unwrap(),
        vec!["title", "article"]
    );
}

#[test]
fn test_root_context_has_empty_trail() {
    let tree = article_tree();
    let (mut store, _, _) = memory_store();
    store.set_active_context(&tree.registry, Some(tree.page)).unwrap();

    assert!(store.context_trail(&tree.registry).unwrap().is_empty());
    assert_eq!(keys(&store), vec!["page"]);
}

#[test]
fn test_switching_branch_purges_stale_submaps() {
    let tree = article_tree();
    let (mut store, _, _) = memory_store();
    store.set_active_context(&tree.registry, Some(tree.title)).unwrap();
    store.set_active_context(&tree.registry, Some(tree.sidebar)).unwrap();

    assert_eq!(keys(&store), vec!["page", "sidebar"]);
    assert_eq!(names(&store), vec!["edit", "history", "collapse"]);
}

#[test]
fn test_refresh_picks_up_new_options_without_moving_focus() {
    let mut tree = article_tree();
    let (mut store, _, _) = memory_store();
    store.set_active_context(&tree.registry, Some(tree.title)).unwrap();

    tree.registry
        .set_menu_options(
            tree.article,
            vec![
                MenuOption::new("add-section").with_label("Add"),
                MenuOption::new("reorder"),
            ],
        )
        .unwrap();
    assert!(store.set_active_context(&tree.registry, None).unwrap());

    assert_eq!(store.active_context(), Some(tree.title));
    assert_eq!(
        names(&store),
        vec!["edit", "history", "add-section", "reorder", "link"]
    );
}

#[test]
fn test_unmounted_parent_cuts_the_trail() {
    let mut tree = article_tree();
    let (mut store, _, _) = memory_store();
    store.set_active_context(&tree.registry, Some(tree.title)).unwrap();

    tree.registry.remove(tree.article).unwrap();
    store.set_active_context(&tree.registry, None).unwrap();

    assert_eq!(keys(&store), vec!["title"]);
    assert_eq!(tree.registry.parent(tree.title), None);
}

#[test]
fn test_cyclic_tree_reports_error() {
    let mut tree = article_tree();
    tree.registry.set_parent(tree.page, Some(tree.title)).unwrap();
    let (mut store, _, _) = memory_store();

    let err = store
        .set_active_context(&tree.registry, Some(tree.title))
        .unwrap_err();
    match err {
        StoreError::CyclicContextTree { context, depth } => {
            assert_eq!(context, "title");
            assert_eq!(depth, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.option_map().is_empty());
    assert_eq!(store.active_context(), None);
}

#[test]
fn test_peers_merge_into_one_trail_entry() {
    let mut tree = article_tree();
    let mobile_title = tree
        .registry
        .insert("title-mobile", Some(tree.article))
        .unwrap();
    tree.registry
        .set_menu_options(mobile_title, vec![MenuOption::new("shorten")])
        .unwrap();
    tree.registry.add_peer(tree.title, mobile_title).unwrap();

    let (mut store, _, _) = memory_store();
    store.set_active_context(&tree.registry, Some(tree.title)).unwrap();

    assert_eq!(keys(&store), vec!["page", "article", "title"]);
    assert_eq!(
        names(&store),
        vec!["edit", "history", "add-section", "link", "shorten"]
    );
}

#[test]
fn test_focus_change_notifies_subscribers() {
    let tree = article_tree();
    let (mut store, _, _) = memory_store();
    let events = store.subscribe();

    store.set_active_context(&tree.registry, Some(tree.sidebar)).unwrap();
    let received: Vec<StoreEvent> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![
            StoreEvent::ActiveContextChanged {
                context: Some("sidebar".to_string())
            },
            StoreEvent::MenuChanged { revision: 1 },
        ]
    );
}
