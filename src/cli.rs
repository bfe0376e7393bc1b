use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

use crate::error::SettingsError;
use crate::settings::{AfWindow, AwbGains, CameraSettings, Roi, SensorMode, Validate};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Raise log verbosity (-d debug, -dd trace)
    #[arg(long, short = 'd', action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[arg(long, global = true)]
    pub log_file: Option<String>,

    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print a new settings record built from defaults and overrides
    Create {
        /// Partial settings record as JSON, e.g. '{"width": 3840}'
        #[arg(long)]
        overrides: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        pretty: bool,
    },
    /// Check JSON documents against the settings schema
    Validate {
        #[arg(long, value_enum, default_value_t = Kind::Settings)]
        kind: Kind,

        /// Files to check; reads stdin when none are given
        files: Vec<PathBuf>,
    },
}

/// Which shape a document is validated against.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Settings,
    AwbGains,
    Roi,
    SensorMode,
    AfWindow,
}

impl Kind {
    pub fn check(self, value: &Value) -> Result<(), SettingsError> {
        match self {
            Kind::Settings => CameraSettings::from_value(value).map(|_| ()),
            Kind::AwbGains => AwbGains::from_value(value).map(|_| ()),
            Kind::Roi => Roi::from_value(value).map(|_| ()),
            Kind::SensorMode => SensorMode::from_value(value).map(|_| ()),
            Kind::AfWindow => AfWindow::from_value(value).map(|_| ()),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Settings => "settings",
            Kind::AwbGains => "awb-gains",
            Kind::Roi => "roi",
            Kind::SensorMode => "sensor-mode",
            Kind::AfWindow => "af-window",
        };
        f.write_str(name)
    }
}
