//! CLI parse: clap types for pageedit. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// pageedit CLI - inspect context menus and editor session flags
#[derive(Parser)]
#[command(name = "pageedit")]
#[command(about = "Resolve in-page edit context menus and manage editor session flags")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Activate a context and print the aggregated menu
    Menu {
        /// Tree description file (TOML, or JSON with a .json extension)
        #[arg(long)]
        tree: PathBuf,
        /// Id of the context to activate
        #[arg(long)]
        active: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the context trail from a node up to its root
    Trail {
        /// Tree description file (TOML, or JSON with a .json extension)
        #[arg(long)]
        tree: PathBuf,
        /// Id of the context to activate
        #[arg(long)]
        active: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show or change the persisted editor flags
    Flags {
        /// Edit mode
        #[arg(long, value_enum)]
        edit: Option<Switch>,
        /// Menu position toggle
        #[arg(long, value_enum)]
        position: Option<Switch>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Flag mutation requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
    Toggle,
}

impl Switch {
    /// `None` means flip.
    pub fn as_setting(self) -> Option<bool> {
        match self {
            Switch::On => Some(true),
            Switch::Off => Some(false),
            Switch::Toggle => None,
        }
    }
}
