//! Decode-with-validation for untrusted settings input.
//!
//! Values decoded from storage or the network arrive as `serde_json::Value`.
//! [`Validate::from_value`] turns such a value into the typed struct or
//! reports the first structural problem; the `is_valid_*` functions reduce
//! that to a yes/no verdict. Checks are shape only: field presence, exact
//! JSON kind and enum membership. Ranges and cross-field coherence are left
//! to the consumer.

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::regions::{AfWindow, AwbGains, Roi, SensorMode};
use super::types::CameraSettings;
use crate::error::SettingsError;

pub trait Validate: DeserializeOwned {
    /// Name used in error messages.
    const KIND: &'static str;

    /// Fields whose values must be JSON objects when present.
    const NESTED: &'static [&'static str] = &[];

    fn from_value(value: &Value) -> Result<Self, SettingsError> {
        // serde would happily build a struct from a JSON array, so the
        // object checks come first.
        let object = value
            .as_object()
            .ok_or(SettingsError::NotAnObject(Self::KIND))?;
        for &field in Self::NESTED {
            match object.get(field) {
                Some(nested) if !nested.is_object() => {
                    return Err(SettingsError::NotAnObject(field));
                }
                _ => {}
            }
        }

        <Self as serde::Deserialize>::deserialize(value).map_err(|source| SettingsError::Decode {
            kind: Self::KIND,
            source,
        })
    }

    fn is_valid(value: &Value) -> bool {
        match Self::from_value(value) {
            Ok(_) => true,
            Err(e) => {
                debug!("Rejected {}: {}", Self::KIND, e);
                false
            }
        }
    }
}

impl Validate for CameraSettings {
    const KIND: &'static str = "camera settings";
    const NESTED: &'static [&'static str] = &["awbGains", "roi", "sensorMode", "afWindow"];
}

impl Validate for AwbGains {
    const KIND: &'static str = "AWB gains";
}

impl Validate for Roi {
    const KIND: &'static str = "ROI";
}

impl Validate for SensorMode {
    const KIND: &'static str = "sensor mode";
}

impl Validate for AfWindow {
    const KIND: &'static str = "AF window";
}

impl CameraSettings {
    /// Parses and validates a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, SettingsError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value)
    }
}

pub fn is_valid_camera_settings(value: &Value) -> bool {
    CameraSettings::is_valid(value)
}

pub fn is_valid_awb_gains(value: &Value) -> bool {
    AwbGains::is_valid(value)
}

pub fn is_valid_roi(value: &Value) -> bool {
    Roi::is_valid(value)
}

pub fn is_valid_sensor_mode(value: &Value) -> bool {
    SensorMode::is_valid(value)
}

pub fn is_valid_af_window(value: &Value) -> bool {
    AfWindow::is_valid(value)
}
