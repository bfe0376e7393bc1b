mod domains;
mod number;
mod regions;
mod types;
mod validate;

pub use domains::{AfRange, AfSpeed, Codec, Denoise, Exposure, FocusMode, Metering, WhiteBalance};
pub use regions::{AfWindow, AwbGains, Roi, SensorMode};
pub use types::{CameraSettings, CameraSettingsOverrides, DEFAULT_NAME, DEFAULT_TEXT_OVERLAY};
pub use validate::{
    is_valid_af_window, is_valid_awb_gains, is_valid_camera_settings, is_valid_roi,
    is_valid_sensor_mode, Validate,
};
