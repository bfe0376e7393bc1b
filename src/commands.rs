//! Implementations of the `create` and `validate` subcommands.

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::cli::Kind;
use crate::config::Config;
use crate::error::{AppError, Result, SettingsError};
use crate::settings::{CameraSettings, CameraSettingsOverrides};

/// Builds settings from the configured base overrides, then the JSON
/// overrides given on the command line, then an explicit name.
pub fn create_settings(
    config: &Config,
    overrides: Option<&str>,
    name: Option<&str>,
) -> Result<CameraSettings> {
    let mut layered = config.overrides.clone();
    if let Some(json) = overrides {
        let cli_overrides: CameraSettingsOverrides = serde_json::from_str(json)?;
        debug!("Command line overrides touch {} field(s)", cli_overrides.len());
        layered = layered.merge(cli_overrides);
    }
    if let Some(name) = name {
        layered.name = Some(name.to_string());
    }

    let settings = CameraSettings::create(Some(layered));
    info!("Created settings {} ({})", settings.id(), settings.name);
    Ok(settings)
}

pub fn render(settings: &CameraSettings, config: &Config) -> Result<String> {
    if !config.output.pretty {
        return Ok(serde_json::to_string(settings)?);
    }

    let indent = " ".repeat(config.output.indent);
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    settings.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| AppError::config(format!("non UTF-8 output: {}", e)))
}

/// Parses `text` as JSON and checks it against `kind`.
pub fn validate_document(kind: Kind, text: &str) -> std::result::Result<(), SettingsError> {
    let value: Value = serde_json::from_str(text)?;
    kind.check(&value)
}

/// Validates each file (or stdin when `files` is empty) and returns the
/// number of documents checked. Fails if any document is invalid.
pub fn validate_files(kind: Kind, files: &[PathBuf]) -> Result<usize> {
    let mut invalid = 0;

    if files.is_empty() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        if !report(kind, Path::new("<stdin>"), &text) {
            invalid += 1;
        }
    } else {
        for path in files {
            let text = std::fs::read_to_string(path)?;
            if !report(kind, path, &text) {
                invalid += 1;
            }
        }
    }

    if invalid > 0 {
        return Err(AppError::InvalidDocuments(invalid));
    }
    Ok(files.len().max(1))
}

fn report(kind: Kind, path: &Path, text: &str) -> bool {
    match validate_document(kind, text) {
        Ok(()) => {
            info!("{}: valid {}", path.display(), kind);
            true
        }
        Err(e) => {
            warn!("{}: invalid {}: {}", path.display(), kind, e);
            false
        }
    }
}
