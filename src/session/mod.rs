//! Session Storage
//!
//! Reload-surviving key/value capability used for the persisted editor
//! flags. The store treats it as opaque: values are JSON-encoded by the typed
//! helpers in [`flags`], and any failure on read falls back to the default.

pub mod flags;
pub mod memory;
pub mod sled_store;

pub use flags::{load_flag, save_flag, PersistentFlags, IS_EDIT_KEY, IS_POSITION_TOGGLED_KEY};
pub use memory::MemorySessionStorage;
pub use sled_store::SledSessionStorage;

use crate::error::StorageError;

/// Key/value storage scoped to the editing session's lifetime
pub trait SessionStorage: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
