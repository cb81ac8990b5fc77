//! Merge rules: defaults first, later sources override earlier ones.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

use crate::config::default_session_path;
use crate::context::DEFAULT_MAX_TRAIL_DEPTH;

/// Create a Config builder with built-in defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("store.max_trail_depth", DEFAULT_MAX_TRAIL_DEPTH as u64)?
        .set_default(
            "store.session_path",
            default_session_path().to_string_lossy().to_string(),
        )?
        .set_default("overlay.has_spinner", true)?
        .set_default("overlay.has_close_button", false)?
        .set_default("overlay.message", "")
}
