//! Error types for settings resolution.

use thiserror::Error;

/// Errors that can occur while resolving settings into a configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A required top-level settings field was not supplied.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The engine reported a configuration-schema version this crate does
    /// not produce.
    #[error("configuration schema version mismatch: engine reports {reported}, expected {expected}")]
    SchemaVersionMismatch {
        /// Version reported by the engine.
        reported: u32,
        /// Version this crate builds configurations for.
        expected: u32,
    },

    /// A top-level settings value is outside its valid domain.
    #[error("invalid value for {field}: {message}")]
    InvalidSetting {
        /// The offending settings field.
        field: &'static str,
        /// Description of why the value is invalid.
        message: String,
    },

    /// A per-sensor settings value is outside its valid domain.
    #[error("invalid value for {field} on sensor '{uuid}': {message}")]
    InvalidSensorSetting {
        /// The sensor identifier the value belongs to.
        uuid: String,
        /// The offending sensor settings field.
        field: &'static str,
        /// Description of why the value is invalid.
        message: String,
    },
}

impl SettingsError {
    /// Create an invalid top-level setting error.
    pub fn invalid_setting(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field,
            message: message.into(),
        }
    }

    /// Create an invalid per-sensor setting error.
    pub fn invalid_sensor_setting(
        uuid: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidSensorSetting {
            uuid: uuid.into(),
            field,
            message: message.into(),
        }
    }
}

/// Result type for settings resolution.
pub type Result<T> = std::result::Result<T, SettingsError>;
