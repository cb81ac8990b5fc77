//! Config loading entry point.

use config::{ConfigError, Environment, File};
use std::path::{Path, PathBuf};

use crate::config::merge::builder_with_defaults;
use crate::config::sources::{global_file, workspace_file};
use crate::config::EditorConfig;

/// Loads [`EditorConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): built-in defaults, global config file,
    /// workspace `config/config.toml`, workspace `config/{PAGEEDIT_ENV}.toml`,
    /// `PAGEEDIT__SECTION__KEY` environment variables.
    pub fn load(workspace_root: &Path) -> Result<EditorConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        builder
            .add_source(
                Environment::with_prefix("PAGEEDIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a single file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<EditorConfig, ConfigError> {
        builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true))
            .build()?
            .try_deserialize()
    }

    /// Path of the global config file, if a config home is known.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
