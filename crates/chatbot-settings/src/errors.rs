//! Settings error types.

use thiserror::Error;

/// Errors that can occur when loading a configuration file.
///
/// [`resolve`](crate::resolve) itself never fails; these only come from the
/// file-based host path.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse JSON in the configuration file.
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The file parsed but is not a JSON object.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
