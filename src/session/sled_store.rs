//! Sled-backed session storage

use crate::error::StorageError;
use crate::session::SessionStorage;
use std::io;
use std::path::Path;

const TREE_SESSION: &str = "session_flags";

/// Session storage persisted in a sled database, surviving process restarts.
#[derive(Clone)]
pub struct SledSessionStorage {
    db: sled::Db,
    tree: sled::Tree,
}

impl SledSessionStorage {
    /// Open (or create) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path).map_err(|e| {
            StorageError::IoError(io::Error::new(
                io::ErrorKind::Other,
                format!("Failed to open sled database: {}", e),
            ))
        })?;
        Self::from_db(db)
    }

    /// Use an already opened database.
    pub fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        let tree = db.open_tree(TREE_SESSION).map_err(to_storage_io)?;
        Ok(Self { db, tree })
    }

    /// Get the underlying sled database
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.tree.flush().map_err(to_storage_io)?;
        Ok(())
    }
}

impl SessionStorage for SledSessionStorage {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let value = self.tree.get(key.as_bytes()).map_err(to_storage_io)?;
        Ok(value.map(|v| v.to_vec()))
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        self.tree
            .insert(key.as_bytes(), value)
            .map_err(to_storage_io)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.tree.remove(key.as_bytes()).map_err(to_storage_io)?;
        Ok(())
    }
}

fn to_storage_io(err: sled::Error) -> StorageError {
    StorageError::IoError(io::Error::new(io::ErrorKind::Other, err.to_string()))
}
