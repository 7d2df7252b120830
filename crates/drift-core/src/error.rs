//! Error types for Drift

use thiserror::Error;

/// The main error type for Drift operations
///
/// Most of the engine never fails: missing drawing contexts and unknown
/// device signals degrade silently. Errors are reserved for caller misuse
/// and for loading configuration.
#[derive(Debug, Error)]
pub enum DriftError {
    #[error("Engine already mounted: unmount before mounting again")]
    AlreadyMounted,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Image encoding error: {0}")]
    ImageError(String),
}

/// Result type alias for Drift operations
pub type Result<T> = std::result::Result<T, DriftError>;

impl From<toml::de::Error> for DriftError {
    fn from(err: toml::de::Error) -> Self {
        DriftError::TomlParseError(err.to_string())
    }
}
