//! pageedit CLI Binary
//!
//! Command-line front end for inspecting context menus and session flags.

use anyhow::{Context, Result};
use clap::Parser;
use pageedit::cli::{Cli, RunContext};
use pageedit::config::ConfigLoader;
use pageedit::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    if let Err(e) = run() {
        eprintln!("{:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    init_logging(Some(&logging_config)).context("Failed to initialize logging")?;

    info!("pageedit CLI starting");

    let context = RunContext::new(cli.workspace.clone(), cli.config.clone()).map_err(|e| {
        error!("Error initializing workspace: {}", e);
        anyhow::anyhow!(pageedit::cli::map_error(&e))
    })?;

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err(anyhow::anyhow!(pageedit::cli::map_error(&e)))
        }
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(&cli.workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }

    config
}
