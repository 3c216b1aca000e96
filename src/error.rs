//! Error types for configuration loading and validation.

use thiserror::Error;

/// Errors raised while building a particle field.
///
/// Rendering itself never fails; these only cover the configuration surface.
#[derive(Error, Debug)]
pub enum FieldError {
    /// A configuration value is out of range.
    #[error("Invalid config value for `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Failed to read a configuration file.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse configuration JSON.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result alias for field operations.
pub type Result<T> = std::result::Result<T, FieldError>;
