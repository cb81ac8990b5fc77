//! pageedit: Context Menu Aggregation for In-Page Editing
//!
//! Tracks which editable region is active, walks its ancestor chain,
//! reconciles the menu options every region on that chain contributes, and
//! exposes one stably ordered menu. Also persists the editor's session flags
//! and drives a blocking overlay with auto-close.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod logging;
pub mod menu;
pub mod overlay;
pub mod session;
pub mod store;

pub use context::{ContextRegistry, ContextTree, NodeKey};
pub use error::{ApiError, StorageError, StoreError};
pub use menu::{MenuOption, SharedOption};
pub use store::PageEditStore;
