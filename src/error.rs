//! Error types for the page edit store.

use crate::context::NodeKey;
use thiserror::Error;

/// Storage-related errors (session flag capability)
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Failed to encode value for key {key}: {message}")]
    Encode { key: String, message: String },

    #[error("Failed to decode value for key {key}: {message}")]
    Decode { key: String, message: String },

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors raised by the context/menu engine
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Context tree is cyclic: walk from {context:?} exceeded {depth} steps or revisited a node")]
    CyclicContextTree { context: String, depth: usize },

    #[error("Context not found: {0:?}")]
    UnknownContext(NodeKey),

    #[error("Duplicate context id: {0}")]
    DuplicateContextId(String),

    #[error("No timer runtime available to schedule overlay timeout")]
    NoRuntime,
}

/// Errors surfaced by configuration, logging and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid tree description: {0}")]
    InvalidTree(String),

    #[error("Context id not found in tree: {0}")]
    ContextIdNotFound(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
