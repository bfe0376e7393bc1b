//! Camera capture and streaming settings: the data model, its defaults and
//! validators for settings decoded from untrusted storage or network input.
//!
//! This library provides:
//! - `CameraSettings` with documented defaults and overlay construction
//! - Closed enums for every categorical field, encoded as string tokens
//! - Decode-with-validation for settings and their auxiliary shapes

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod settings;

pub use config::Config;
pub use error::{AppError, Result, SettingsError};
pub use settings::{
    is_valid_af_window, is_valid_awb_gains, is_valid_camera_settings, is_valid_roi,
    is_valid_sensor_mode, AfRange, AfSpeed, AfWindow, AwbGains, CameraSettings,
    CameraSettingsOverrides, Codec, Denoise, Exposure, FocusMode, Metering, Roi, SensorMode,
    Validate, WhiteBalance,
};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging for an application embedding this library.
///
/// # Arguments
///
/// * `verbosity` - 0 for info, 1 for debug, 2 or more for trace
/// * `log_file` - Optional path to a log file. If None, logs only go to stderr.
pub fn initialize(verbosity: u8, log_file: Option<&str>) -> anyhow::Result<()> {
    logging::setup_logging(verbosity, log_file)?;
    logging::log_app_start(VERSION);
    Ok(())
}
