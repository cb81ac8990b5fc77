//! Integration tests for the page edit store

mod config_integration;
mod overlay_timeout;
mod persistence;
mod reconcile_identity;
mod reset;
mod store_trail;

pub use test_utils::{article_tree, memory_store, with_xdg_env, ArticleTree};
