use serde::{Deserialize, Serialize};

use super::number::integer;

/// Red/blue gains applied when white balance is `custom`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AwbGains {
    pub red: f64,
    pub blue: f64,
}

impl AwbGains {
    pub fn new(red: f64, blue: f64) -> Self {
        Self { red, blue }
    }
}

/// Region of interest used for custom metering.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Roi {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Roi {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Autofocus window. Same shape as [`Roi`], kept as its own type so the
/// two regions can't be swapped by accident.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AfWindow {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl AfWindow {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Explicit sensor mode override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorMode {
    #[serde(deserialize_with = "integer")]
    pub width: i64,
    #[serde(deserialize_with = "integer")]
    pub height: i64,
    #[serde(deserialize_with = "integer")]
    pub bit_depth: i64,
    #[serde(deserialize_with = "integer")]
    pub packing: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_are_zero() {
        assert_eq!(AwbGains::default(), AwbGains::new(0.0, 0.0));
        assert_eq!(Roi::default(), Roi::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(AfWindow::default(), AfWindow::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(
            SensorMode::default(),
            SensorMode {
                width: 0,
                height: 0,
                bit_depth: 0,
                packing: 0
            }
        );
    }

    #[test]
    fn test_sensor_mode_field_names() {
        let mode = SensorMode {
            width: 4608,
            height: 2592,
            bit_depth: 10,
            packing: 1,
        };
        assert_eq!(
            serde_json::to_value(mode).unwrap(),
            json!({ "width": 4608, "height": 2592, "bitDepth": 10, "packing": 1 })
        );
    }
}
