use chrono::Utc;
use log::trace;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::domains::{AfRange, AfSpeed, Codec, Denoise, Exposure, FocusMode, Metering, WhiteBalance};
use super::number::integer;
use super::regions::{AfWindow, AwbGains, Roi, SensorMode};

pub const DEFAULT_NAME: &str = "untitled settings";
pub const DEFAULT_TEXT_OVERLAY: &str = "%Y-%m-%d %H:%M:%S - stream-cam (MediaMTX)";

/// One named configuration snapshot for a single camera/stream.
///
/// Serializes as a flat camelCase record; unset optional fields are
/// omitted. Deserializing requires every non-optional field and rejects
/// `null` for the optional ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSettings {
    id: String,
    pub name: String,

    // Capture
    #[serde(deserialize_with = "integer")]
    pub cam_id: i64,
    #[serde(deserialize_with = "integer")]
    pub width: i64,
    #[serde(deserialize_with = "integer")]
    pub height: i64,
    pub h_flip: bool,
    pub v_flip: bool,
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub sharpness: f64,
    pub exposure: Exposure,
    pub white_balance: WhiteBalance,
    pub awb_gains: AwbGains,
    pub denoise: Denoise,
    /// Microseconds, 0 lets the camera choose.
    pub shutter_speed: f64,
    pub metering: Metering,
    pub gain: f64,
    pub ev: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub roi: Option<Roi>,
    pub hdr: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub tuning_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub sensor_mode: Option<SensorMode>,
    pub fps: f64,

    // Focus
    pub focus_mode: FocusMode,
    pub af_range: AfRange,
    pub af_speed: AfSpeed,
    pub mf_lens_position: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub af_window: Option<AfWindow>,
    pub flicker_period: f64,

    // Overlay
    pub text_overlay_enable: bool,
    pub text_overlay: String,

    // Encoding
    pub codec: Codec,
    #[serde(deserialize_with = "integer")]
    pub idr_period: i64,
    /// Bits per second.
    #[serde(deserialize_with = "integer")]
    pub bitrate: i64,
    pub h264_profile: String,
    pub h264_level: String,
}

/// A missing optional field defaults to `None`; a present one must hold a
/// real value, so an explicit `null` fails to decode.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// `<uuid v4>-<unix millis>`.
fn generate_id() -> String {
    let id = format!("{}-{}", Uuid::new_v4(), Utc::now().timestamp_millis());
    trace!("Generated settings id {}", id);
    id
}

/// Partial set of field values overlaid onto the defaults by
/// [`CameraSettings::create`]. Decodes from a partial JSON or TOML table
/// using the same field names as the settings record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraSettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cam_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_flip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_flip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharpness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure: Option<Exposure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_balance: Option<WhiteBalance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awb_gains: Option<AwbGains>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denoise: Option<Denoise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutter_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metering: Option<Metering>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ev: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi: Option<Roi>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdr: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuning_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_mode: Option<SensorMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_mode: Option<FocusMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub af_range: Option<AfRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub af_speed: Option<AfSpeed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mf_lens_position: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub af_window: Option<AfWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flicker_period: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_overlay_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_overlay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<Codec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idr_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h264_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h264_level: Option<String>,
}

// Field lists shared by the overlay and merge logic. `required` fields are
// plain values on `CameraSettings`, `optional` ones are `Option`s there too.
macro_rules! overridable_fields {
    (required: [$($req:ident),* $(,)?], optional: [$($opt:ident),* $(,)?] $(,)?) => {
        impl CameraSettings {
            fn overlay(&mut self, overrides: CameraSettingsOverrides) {
                $(
                    if let Some(value) = overrides.$req {
                        self.$req = value;
                    }
                )*
                $(
                    if let Some(value) = overrides.$opt {
                        self.$opt = Some(value);
                    }
                )*
            }
        }

        impl CameraSettingsOverrides {
            /// Layers `other` on top of `self`; fields set in `other` win.
            pub fn merge(self, other: Self) -> Self {
                Self {
                    $( $req: other.$req.or(self.$req), )*
                    $( $opt: other.$opt.or(self.$opt), )*
                }
            }

            /// Number of fields this override set touches.
            pub fn len(&self) -> usize {
                let mut count = 0;
                $( count += self.$req.is_some() as usize; )*
                $( count += self.$opt.is_some() as usize; )*
                count
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }
        }
    };
}

overridable_fields! {
    required: [
        id, name, cam_id, width, height, h_flip, v_flip, brightness, contrast,
        saturation, sharpness, exposure, white_balance, awb_gains, denoise,
        shutter_speed, metering, gain, ev, hdr, fps, focus_mode, af_range,
        af_speed, mf_lens_position, flicker_period, text_overlay_enable,
        text_overlay, codec, idr_period, bitrate, h264_profile, h264_level,
    ],
    optional: [roi, tuning_file, sensor_mode, af_window],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            id: generate_id(),
            name: DEFAULT_NAME.to_string(),
            cam_id: 0,
            width: 1920,
            height: 1080,
            h_flip: true,
            v_flip: true,
            brightness: 0.0,
            contrast: 1.0,
            saturation: 1.0,
            sharpness: 1.0,
            exposure: Exposure::default(),
            white_balance: WhiteBalance::default(),
            awb_gains: AwbGains::default(),
            denoise: Denoise::default(),
            shutter_speed: 0.0,
            metering: Metering::default(),
            gain: 0.0,
            ev: -0.3,
            roi: None,
            hdr: false,
            tuning_file: None,
            sensor_mode: None,
            fps: 30.0,
            focus_mode: FocusMode::default(),
            af_range: AfRange::default(),
            af_speed: AfSpeed::default(),
            mf_lens_position: 0.0,
            af_window: None,
            flicker_period: 0.0,
            text_overlay_enable: false,
            text_overlay: DEFAULT_TEXT_OVERLAY.to_string(),
            codec: Codec::default(),
            idr_period: 60,
            bitrate: 10_000_000,
            h264_profile: "main".to_string(),
            h264_level: "4.1".to_string(),
        }
    }
}

impl CameraSettings {
    /// All defaults with a freshly generated id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with `overrides` laid over them field by field. Values are
    /// taken verbatim; nothing is checked here.
    pub fn create(overrides: Option<CameraSettingsOverrides>) -> Self {
        let mut settings = Self::default();
        if let Some(overrides) = overrides {
            settings.overlay(overrides);
        }
        settings
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_camera(mut self, cam_id: i64) -> Self {
        self.cam_id = cam_id;
        self
    }

    pub fn with_resolution(mut self, width: i64, height: i64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_flip(mut self, h_flip: bool, v_flip: bool) -> Self {
        self.h_flip = h_flip;
        self.v_flip = v_flip;
        self
    }

    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_exposure(mut self, exposure: Exposure) -> Self {
        self.exposure = exposure;
        self
    }

    pub fn with_shutter_speed(mut self, micros: f64) -> Self {
        self.shutter_speed = micros;
        self
    }

    pub fn with_white_balance(mut self, white_balance: WhiteBalance) -> Self {
        self.white_balance = white_balance;
        self
    }

    /// Switches white balance to `custom` with the given gains.
    pub fn with_awb_gains(mut self, gains: AwbGains) -> Self {
        self.white_balance = WhiteBalance::Custom;
        self.awb_gains = gains;
        self
    }

    pub fn with_denoise(mut self, denoise: Denoise) -> Self {
        self.denoise = denoise;
        self
    }

    pub fn with_metering(mut self, metering: Metering) -> Self {
        self.metering = metering;
        self
    }

    pub fn with_roi(mut self, roi: Roi) -> Self {
        self.roi = Some(roi);
        self
    }

    pub fn with_tuning_file(mut self, path: impl Into<String>) -> Self {
        self.tuning_file = Some(path.into());
        self
    }

    pub fn with_sensor_mode(mut self, sensor_mode: SensorMode) -> Self {
        self.sensor_mode = Some(sensor_mode);
        self
    }

    pub fn with_focus_mode(mut self, focus_mode: FocusMode) -> Self {
        self.focus_mode = focus_mode;
        self
    }

    /// Switches to manual focus at the given lens position.
    pub fn with_manual_focus(mut self, lens_position: f64) -> Self {
        self.focus_mode = FocusMode::Manual;
        self.mf_lens_position = lens_position;
        self
    }

    pub fn with_af_window(mut self, window: AfWindow) -> Self {
        self.af_window = Some(window);
        self
    }

    /// Enables the text overlay with the given strftime-style template.
    pub fn with_text_overlay(mut self, template: impl Into<String>) -> Self {
        self.text_overlay_enable = true;
        self.text_overlay = template.into();
        self
    }

    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_bitrate(mut self, bitrate: i64) -> Self {
        self.bitrate = bitrate;
        self
    }

    pub fn with_h264(mut self, profile: impl Into<String>, level: impl Into<String>) -> Self {
        self.h264_profile = profile.into();
        self.h264_level = level.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_default_settings() {
        let settings = CameraSettings::default();
        assert_eq!(settings.name, "untitled settings");
        assert_eq!(settings.cam_id, 0);
        assert_eq!((settings.width, settings.height), (1920, 1080));
        assert!(settings.h_flip && settings.v_flip);
        assert_eq!(settings.brightness, 0.0);
        assert_eq!(settings.contrast, 1.0);
        assert_eq!(settings.saturation, 1.0);
        assert_eq!(settings.sharpness, 1.0);
        assert_eq!(settings.exposure, Exposure::Normal);
        assert_eq!(settings.white_balance, WhiteBalance::Auto);
        assert_eq!(settings.awb_gains, AwbGains::new(0.0, 0.0));
        assert_eq!(settings.denoise, Denoise::Off);
        assert_eq!(settings.shutter_speed, 0.0);
        assert_eq!(settings.metering, Metering::Centre);
        assert_eq!(settings.gain, 0.0);
        assert_eq!(settings.ev, -0.3);
        assert_eq!(settings.roi, None);
        assert!(!settings.hdr);
        assert_eq!(settings.tuning_file, None);
        assert_eq!(settings.sensor_mode, None);
        assert_eq!(settings.fps, 30.0);
        assert_eq!(settings.focus_mode, FocusMode::Continuous);
        assert_eq!(settings.af_range, AfRange::Full);
        assert_eq!(settings.af_speed, AfSpeed::Fast);
        assert_eq!(settings.mf_lens_position, 0.0);
        assert_eq!(settings.af_window, None);
        assert_eq!(settings.flicker_period, 0.0);
        assert!(!settings.text_overlay_enable);
        assert_eq!(settings.text_overlay, "%Y-%m-%d %H:%M:%S - stream-cam (MediaMTX)");
        assert_eq!(settings.codec, Codec::Auto);
        assert_eq!(settings.idr_period, 60);
        assert_eq!(settings.bitrate, 10_000_000);
        assert_eq!(settings.h264_profile, "main");
        assert_eq!(settings.h264_level, "4.1");
    }

    #[test]
    fn test_id_format() {
        let settings = CameraSettings::new();
        let (uuid, millis) = settings.id().rsplit_once('-').unwrap();
        assert!(Uuid::parse_str(uuid).is_ok());
        assert!(millis.parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<String> = (0..1000)
            .map(|_| CameraSettings::new().id().to_string())
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_ids_are_unique_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| CameraSettings::new().id().to_string()))
            .collect();
        let ids: HashSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_create_without_overrides() {
        let settings = CameraSettings::create(None);
        let defaults = CameraSettings::default();
        assert_ne!(settings.id(), defaults.id());

        let mut created = serde_json::to_value(&settings).unwrap();
        let mut expected = serde_json::to_value(&defaults).unwrap();
        created.as_object_mut().unwrap().remove("id");
        expected.as_object_mut().unwrap().remove("id");
        assert_eq!(created, expected);
    }

    #[test]
    fn test_create_with_overrides() {
        let settings = CameraSettings::create(Some(CameraSettingsOverrides {
            width: Some(3840),
            height: Some(2160),
            codec: Some(Codec::HardwareH264),
            ..Default::default()
        }));

        assert_eq!(settings.width, 3840);
        assert_eq!(settings.height, 2160);
        assert_eq!(settings.codec, Codec::HardwareH264);
        assert_eq!(settings.fps, 30.0);
        assert_eq!(settings.focus_mode, FocusMode::Continuous);
    }

    #[test]
    fn test_create_with_optional_and_id_overrides() {
        let settings = CameraSettings::create(Some(CameraSettingsOverrides {
            id: Some("restored-id".to_string()),
            roi: Some(Roi::new(0.25, 0.25, 0.5, 0.5)),
            tuning_file: Some("/usr/share/libcamera/ipa/rpi/imx708.json".to_string()),
            ..Default::default()
        }));

        assert_eq!(settings.id(), "restored-id");
        assert_eq!(settings.roi, Some(Roi::new(0.25, 0.25, 0.5, 0.5)));
        assert_eq!(
            settings.tuning_file.as_deref(),
            Some("/usr/share/libcamera/ipa/rpi/imx708.json")
        );
        assert_eq!(settings.sensor_mode, None);
    }

    #[test]
    fn test_overrides_from_partial_json() {
        let overrides: CameraSettingsOverrides = serde_json::from_value(json!({
            "name": "porch",
            "hFlip": false,
            "whiteBalance": "daylight",
            "sensorMode": { "width": 2304, "height": 1296, "bitDepth": 10, "packing": 0 }
        }))
        .unwrap();
        assert_eq!(overrides.len(), 4);

        let settings = CameraSettings::create(Some(overrides));
        assert_eq!(settings.name, "porch");
        assert!(!settings.h_flip);
        assert!(settings.v_flip);
        assert_eq!(settings.white_balance, WhiteBalance::Daylight);
        assert_eq!(settings.sensor_mode.map(|m| m.bit_depth), Some(10));
    }

    #[test]
    fn test_overrides_reject_unknown_token() {
        let result = serde_json::from_value::<CameraSettingsOverrides>(json!({ "codec": "vp9" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_prefers_later_overrides() {
        let base = CameraSettingsOverrides {
            name: Some("base".to_string()),
            fps: Some(25.0),
            ..Default::default()
        };
        let top = CameraSettingsOverrides {
            name: Some("top".to_string()),
            hdr: Some(true),
            ..Default::default()
        };

        let merged = base.merge(top);
        assert_eq!(merged.name.as_deref(), Some("top"));
        assert_eq!(merged.fps, Some(25.0));
        assert_eq!(merged.hdr, Some(true));
        assert_eq!(merged.len(), 3);
        assert!(CameraSettingsOverrides::default().is_empty());
    }

    #[test]
    fn test_builder() {
        let settings = CameraSettings::new()
            .with_name("garage")
            .with_camera(1)
            .with_resolution(1280, 720)
            .with_flip(false, false)
            .with_fps(60.0)
            .with_awb_gains(AwbGains::new(1.5, 1.2))
            .with_manual_focus(2.5)
            .with_text_overlay("%H:%M")
            .with_codec(Codec::SoftwareH264)
            .with_h264("high", "4.2");

        assert_eq!(settings.name, "garage");
        assert_eq!(settings.cam_id, 1);
        assert_eq!((settings.width, settings.height), (1280, 720));
        assert!(!settings.h_flip && !settings.v_flip);
        assert_eq!(settings.fps, 60.0);
        assert_eq!(settings.white_balance, WhiteBalance::Custom);
        assert_eq!(settings.awb_gains.red, 1.5);
        assert_eq!(settings.focus_mode, FocusMode::Manual);
        assert_eq!(settings.mf_lens_position, 2.5);
        assert!(settings.text_overlay_enable);
        assert_eq!(settings.text_overlay, "%H:%M");
        assert_eq!(settings.codec, Codec::SoftwareH264);
        assert_eq!(settings.h264_profile, "high");
        assert_eq!(settings.h264_level, "4.2");
    }

    #[test]
    fn test_serialized_record() {
        let settings = CameraSettings::new().with_sensor_mode(SensorMode {
            width: 4608,
            height: 2592,
            bit_depth: 10,
            packing: 1,
        });
        let value = serde_json::to_value(&settings).unwrap();
        let record = value.as_object().unwrap();

        assert_eq!(record["id"], json!(settings.id()));
        assert_eq!(record["camId"], json!(0));
        assert_eq!(record["hFlip"], json!(true));
        assert_eq!(record["whiteBalance"], json!("auto"));
        assert_eq!(record["awbGains"], json!({ "red": 0.0, "blue": 0.0 }));
        assert_eq!(record["ev"], json!(-0.3));
        assert_eq!(record["h264Level"], json!("4.1"));
        assert_eq!(record["sensorMode"]["bitDepth"], json!(10));
        assert!(!record.contains_key("roi"));
        assert!(!record.contains_key("tuningFile"));
        assert!(!record.contains_key("afWindow"));
        // 33 required fields plus the one optional that is set.
        assert_eq!(record.len(), 34);
    }
}
