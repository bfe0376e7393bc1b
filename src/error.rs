use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0} document(s) failed validation")]
    InvalidDocuments(usize),
}

/// Reasons a decoded value is rejected as camera settings (or one of the
/// auxiliary shapes). Validators collapse all of these into `false`.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("expected a JSON object for {0}")]
    NotAnObject(&'static str),

    #[error("invalid {kind}: {source}")]
    Decode {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown {domain} value {value:?}")]
    UnknownVariant { domain: &'static str, value: String },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }
}

impl SettingsError {
    pub fn unknown_variant(domain: &'static str, value: impl Into<String>) -> Self {
        SettingsError::UnknownVariant {
            domain,
            value: value.into(),
        }
    }
}
