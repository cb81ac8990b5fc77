//! Configuration System
//!
//! Layered configuration for the page edit store: trail walk bounds, where
//! session flags persist, overlay defaults, and logging. Files are TOML and
//! may be overridden by `PAGEEDIT__*` environment variables.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::overlay::OverlayDefaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Store behaviour and persistence
    #[serde(default)]
    pub store: StoreConfig,

    /// Values applied to overlay fields a caller leaves unset
    #[serde(default)]
    pub overlay: OverlayDefaults,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Maximum number of nodes a trail walk may visit before the tree is
    /// treated as cyclic
    #[serde(default = "default_max_trail_depth")]
    pub max_trail_depth: usize,

    /// Sled database holding the persisted editor flags. Relative paths are
    /// resolved against the workspace root.
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
}

fn default_max_trail_depth() -> usize {
    crate::context::DEFAULT_MAX_TRAIL_DEPTH
}

/// Default location of the session database: the platform state (or local
/// data) directory, falling back to `.pageedit/session`.
pub fn default_session_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "pageedit")
        .map(|dirs| {
            dirs.state_dir()
                .unwrap_or_else(|| dirs.data_local_dir())
                .join("session")
        })
        .unwrap_or_else(|| PathBuf::from(".pageedit/session"))
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_trail_depth: default_max_trail_depth(),
            session_path: default_session_path(),
        }
    }
}

impl StoreConfig {
    /// Session path, resolved against `workspace_root` when relative.
    pub fn resolve_session_path(&self, workspace_root: &Path) -> PathBuf {
        if self.session_path.is_absolute() {
            self.session_path.clone()
        } else {
            workspace_root.join(&self.session_path)
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_trail_depth == 0 {
            return Err("max_trail_depth must be at least 1".to_string());
        }
        if self.session_path.as_os_str().is_empty() {
            return Err("Session path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Store(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Store(msg) => write!(f, "Store: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl EditorConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.store.validate() {
            errors.push(ValidationError::Store(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding every problem into one `ApiError`.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })
    }
}
