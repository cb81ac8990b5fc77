//! CLI route: single route table and run context. Dispatches to the store and presentation.

use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_flags_json, format_flags_text, format_menu_json, format_menu_text, format_trail_json,
    format_trail_text,
};
use crate::config::{ConfigLoader, EditorConfig};
use crate::context::{ContextRegistry, NodeKey, TreeDescription};
use crate::error::ApiError;
use crate::overlay::ManualScheduler;
use crate::session::{MemorySessionStorage, SledSessionStorage};
use crate::store::PageEditStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: EditorConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        config.ensure_valid()?;

        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn session_path(&self) -> PathBuf {
        self.config.store.resolve_session_path(&self.workspace_root)
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Menu {
                tree,
                active,
                format,
            } => self.handle_menu(tree, active, *format),
            Commands::Trail {
                tree,
                active,
                format,
            } => self.handle_trail(tree, active, *format),
            Commands::Flags {
                edit,
                position,
                format,
            } => self.handle_flags(
                edit.map(|s| s.as_setting()),
                position.map(|s| s.as_setting()),
                *format,
            ),
        }
    }

    /// A store with throwaway session storage, for commands that only read
    /// the tree.
    fn ephemeral_store(&self) -> PageEditStore {
        PageEditStore::from_config(
            &self.config,
            Arc::new(MemorySessionStorage::new()),
            Arc::new(ManualScheduler::new()),
        )
    }

    fn load_tree(&self, path: &Path, active: &str) -> Result<(ContextRegistry, NodeKey), ApiError> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        };
        let description = TreeDescription::load(&path)?;
        let registry = ContextRegistry::from_description(&description)?;
        debug!(path = %path.display(), nodes = registry.len(), "Loaded context tree");
        let key = registry
            .key_of(active)
            .ok_or_else(|| ApiError::ContextIdNotFound(active.to_string()))?;
        Ok((registry, key))
    }

    fn handle_menu(&self, tree: &Path, active: &str, format: OutputFormat) -> Result<String, ApiError> {
        let (registry, key) = self.load_tree(tree, active)?;
        let store = self.ephemeral_store().with_active_context(&registry, key)?;
        let options = store.context_menu_options();
        info!(context = active, options = options.len(), "Resolved context menu");
        Ok(match format {
            OutputFormat::Text => format_menu_text(active, &options),
            OutputFormat::Json => format_menu_json(active, &options),
        })
    }

    fn handle_trail(&self, tree: &Path, active: &str, format: OutputFormat) -> Result<String, ApiError> {
        let (registry, key) = self.load_tree(tree, active)?;
        let store = self.ephemeral_store().with_active_context(&registry, key)?;
        let trail = store.context_trail(&registry)?;
        Ok(match format {
            OutputFormat::Text => format_trail_text(active, &trail),
            OutputFormat::Json => format_trail_json(active, &trail),
        })
    }

    fn handle_flags(
        &self,
        edit: Option<Option<bool>>,
        position: Option<Option<bool>>,
        format: OutputFormat,
    ) -> Result<String, ApiError> {
        let session_path = self.session_path();
        std::fs::create_dir_all(&session_path)
            .map_err(|e| ApiError::StorageError(crate::error::StorageError::IoError(e)))?;
        let storage = Arc::new(SledSessionStorage::open(&session_path)?);
        let mut store = PageEditStore::from_config(
            &self.config,
            storage.clone(),
            Arc::new(ManualScheduler::new()),
        );

        if let Some(setting) = edit {
            store.toggle_edit(setting);
        }
        if let Some(setting) = position {
            store.toggle_position(setting);
        }
        storage.flush()?;

        Ok(match format {
            OutputFormat::Text => {
                format_flags_text(store.is_edit(), store.is_position_toggled(), &session_path)
            }
            OutputFormat::Json => {
                format_flags_json(store.is_edit(), store.is_position_toggled(), &session_path)
            }
        })
    }
}
