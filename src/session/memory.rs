//! In-memory session storage

use crate::error::StorageError;
use crate::session::SessionStorage;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Session storage that lives as long as the process.
///
/// Share one instance (behind an `Arc`) between stores to model a page
/// reload inside a single process.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    values: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        self.values.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.write().remove(key);
        Ok(())
    }
}
