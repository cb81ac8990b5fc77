//! Persisted editor flags
//!
//! Reads never fail outward: a missing, unreadable, or undecodable value
//! yields the caller's default. Write failures are logged and swallowed.

use crate::error::StorageError;
use crate::session::SessionStorage;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const IS_EDIT_KEY: &str = "isEdit";
pub const IS_POSITION_TOGGLED_KEY: &str = "isPositionToggled";

/// Read `key`, falling back to `default` on any failure.
pub fn load_flag<T: DeserializeOwned>(storage: &dyn SessionStorage, key: &str, default: T) -> T {
    let raw = match storage.get_raw(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default,
        Err(e) => {
            warn!(key, error = %e, "Failed to read session flag, using default");
            return default;
        }
    };
    match serde_json::from_slice(&raw) {
        Ok(value) => value,
        Err(e) => {
            let err = StorageError::Decode {
                key: key.to_string(),
                message: e.to_string(),
            };
            warn!(key, error = %err, "Ignoring corrupt session flag");
            default
        }
    }
}

/// Write `value` under `key`. Returns whether the write succeeded.
pub fn save_flag<T: Serialize>(storage: &dyn SessionStorage, key: &str, value: &T) -> bool {
    let encoded = match serde_json::to_vec(value) {
        Ok(encoded) => encoded,
        Err(e) => {
            let err = StorageError::Encode {
                key: key.to_string(),
                message: e.to_string(),
            };
            warn!(key, error = %err, "Failed to encode session flag");
            return false;
        }
    };
    match storage.set_raw(key, &encoded) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "Failed to persist session flag");
            false
        }
    }
}

/// Flags mirrored to session storage on every toggle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentFlags {
    pub is_edit: bool,
    pub is_position_toggled: bool,
}

impl PersistentFlags {
    /// Seed from storage, each flag defaulting to `false`.
    pub fn load(storage: &dyn SessionStorage) -> Self {
        Self {
            is_edit: load_flag(storage, IS_EDIT_KEY, false),
            is_position_toggled: load_flag(storage, IS_POSITION_TOGGLED_KEY, false),
        }
    }

    pub fn save_edit(&self, storage: &dyn SessionStorage) -> bool {
        save_flag(storage, IS_EDIT_KEY, &self.is_edit)
    }

    pub fn save_position(&self, storage: &dyn SessionStorage) -> bool {
        save_flag(storage, IS_POSITION_TOGGLED_KEY, &self.is_position_toggled)
    }
}
