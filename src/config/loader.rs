use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::cli::{CliArgs, Command};
use crate::settings::CameraSettingsOverrides;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    /// Base overrides applied by `create` before any command-line overrides.
    pub overrides: CameraSettingsOverrides,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
        }
    }
}

impl Config {
    pub fn load(cli_args: &CliArgs) -> Result<Self> {
        let mut config = match cli_args.config.as_deref() {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH)?,
            None => {
                info!("No configuration file found, using built-in defaults");
                Self::default()
            }
        };

        // Override config with CLI arguments
        config.override_with_cli_args(cli_args);

        config.validate()?;

        Ok(config)
    }

    pub fn from_file(config_path: &str) -> Result<Self> {
        info!("Loading configuration from {}", config_path);

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;

        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", config_path))
    }

    fn override_with_cli_args(&mut self, args: &CliArgs) {
        if let Command::Create { pretty: true, .. } = args.command {
            self.output.pretty = true;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.output.indent > 16 {
            return Err(anyhow::anyhow!("Output indent must be at most 16 spaces"));
        }

        if let Some(name) = &self.overrides.name {
            if name.trim().is_empty() {
                return Err(anyhow::anyhow!("Override name cannot be empty"));
            }
        }

        Ok(())
    }
}
