//! `flagrun config` — show and set configuration values.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::domain::config::{validate_config_key, validate_config_value};

use clap::Subcommand;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let config = app.config_store.load()?;
    let path = app.config_store.path()?;

    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    app.output.header("Configuration");
    app.output.kv("api.base_url", &config.api.base_url);
    app.output.kv("file        ", &path.display().to_string());
    Ok(ExitCode::SUCCESS)
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<ExitCode> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;

    let mut config = app.config_store.load()?;
    match key {
        "api.base_url" => config.api.base_url = value.to_string(),
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    app.config_store.save(&config)?;

    app.output.success(&format!("Set {key} = {value}"));
    Ok(ExitCode::SUCCESS)
}
