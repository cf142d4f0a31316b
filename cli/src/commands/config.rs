//! `buildvm config`: show, read and change configuration values.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::domain::config::VALID_CONFIG_KEYS;

use clap::Subcommand;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Print one configuration value
    Get {
        /// Configuration key, e.g. readiness.timeout_secs
        key: String,
    },
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the configuration
/// file cannot be written.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Get { key } => {
            println!("{}", app.config.get(key)?);
            Ok(ExitCode::SUCCESS)
        }
        ConfigCommand::Set { key, value } => set_config(app, key, value),
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let path = app.config_store.path()?;
    if !app.output.quiet {
        println!("# {}", path.display());
    }
    for key in VALID_CONFIG_KEYS {
        app.output.kv(key, &app.config.get(key)?);
    }
    Ok(ExitCode::SUCCESS)
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<ExitCode> {
    let mut config = app.config.clone();
    config.set(key, value)?;
    app.config_store.save(&config)?;
    tracing::info!(key, value, "configuration updated");
    app.output.success(&format!("Set {key} = {value}"));
    Ok(ExitCode::SUCCESS)
}
