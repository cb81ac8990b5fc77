//! Integration tests for Configuration System

use pageedit::config::{ConfigLoader, EditorConfig};
use pageedit::overlay::{ManualScheduler, OverlayOptions};
use pageedit::session::MemorySessionStorage;
use pageedit::{PageEditStore, StoreError};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::integration::{article_tree, with_xdg_env};

fn write(path: PathBuf, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn store_from(config: &EditorConfig) -> PageEditStore {
    PageEditStore::from_config(
        config,
        Arc::new(MemorySessionStorage::new()),
        Arc::new(ManualScheduler::new()),
    )
}

#[test]
fn test_layer_precedence() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("site");

    with_xdg_env(&test_dir, || {
        write(
            test_dir.path().join("xdg").join("pageedit").join("config.toml"),
            r#"
[store]
max_trail_depth = 10

[overlay]
message = "Global"
has_close_button = true
"#,
        );
        write(
            workspace.join("config").join("config.toml"),
            "[overlay]\nmessage = \"Workspace\"\n",
        );
        write(
            workspace.join("config").join("staging.toml"),
            "[store]\nmax_trail_depth = 30\n",
        );
        std::env::set_var("PAGEEDIT_ENV", "staging");

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.store.max_trail_depth, 30);
        assert_eq!(config.overlay.message, "Workspace");
        assert!(config.overlay.has_close_button);
        assert!(config.overlay.has_spinner);
    });
}

#[test]
fn test_environment_overrides_files() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("site");

    with_xdg_env(&test_dir, || {
        write(
            workspace.join("config").join("config.toml"),
            "[store]\nmax_trail_depth = 50\n",
        );
        std::env::set_var("PAGEEDIT__STORE__MAX_TRAIL_DEPTH", "2");
        let loaded = ConfigLoader::load(&workspace);
        std::env::remove_var("PAGEEDIT__STORE__MAX_TRAIL_DEPTH");

        let config = loaded.unwrap();
        assert_eq!(config.store.max_trail_depth, 2);

        // title -> article -> page needs three steps.
        let tree = article_tree();
        let mut store = store_from(&config);
        assert!(matches!(
            store.set_active_context(&tree.registry, Some(tree.title)),
            Err(StoreError::CyclicContextTree { depth: 2, .. })
        ));
        store.set_active_context(&tree.registry, Some(tree.article)).unwrap();
    });
}

#[test]
fn test_overlay_defaults_from_config() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("pageedit.toml");
    write(
        config_file.clone(),
        "[overlay]\nmessage = \"Please wait\"\nhas_spinner = false\n",
    );

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let store = store_from(&config);
    store.overlay().show(OverlayOptions::new()).unwrap();
    let snapshot = store.overlay().snapshot();
    assert_eq!(snapshot.message, "Please wait");
    assert!(!snapshot.has_spinner);

    store
        .overlay()
        .show(OverlayOptions::new().message("Saving"))
        .unwrap();
    assert_eq!(store.overlay().snapshot().message, "Saving");
}

#[test]
fn test_invalid_config_rejected() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("pageedit.toml");
    write(
        config_file.clone(),
        "[store]\nmax_trail_depth = 0\n\n[logging]\nformat = \"xml\"\n",
    );

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(config.ensure_valid().is_err());
}

#[test]
fn test_missing_config_file_is_error() {
    let test_dir = TempDir::new().unwrap();
    assert!(ConfigLoader::load_from_file(&test_dir.path().join("absent.toml")).is_err());
}
