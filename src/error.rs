//! Error types for segmental.
//!
//! All library functions return `Result<T, SegError>` instead of panicking.
//! Validation failures and persistence failures are distinct variants so a
//! caller can tell "nothing was computed" apart from "computed but not
//! recorded" (partial success).

use thiserror::Error;

/// Result type alias for segmental operations.
pub type SegResult<T> = Result<T, SegError>;

/// Unified error type for all segmental operations.
#[derive(Debug, Error)]
pub enum SegError {
    /// Unparsable or out-of-domain input. No computation was attempted.
    #[error("Validation error: field '{field}' rejected input '{value}'")]
    Validation {
        /// Name of the offending input field.
        field: &'static str,
        /// The raw text that failed to parse or violated its domain.
        value: String,
    },

    /// Storage append/query/update/delete failure. A computed result may
    /// still exist; only the durability step failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Record id not present in storage.
    #[error("Record {0} not found")]
    RecordNotFound(i64),

    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Schema validation error.
    #[error("Validation error: {0}")]
    Schema(#[from] validator::ValidationErrors),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SegError {
    /// Create a validation error for a named input field.
    #[must_use]
    pub fn validation(field: &'static str, value: impl Into<String>) -> Self {
        Self::Validation {
            field,
            value: value.into(),
        }
    }

    /// Create a persistence error with a message.
    #[must_use]
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check whether this error means no computation was performed at all.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = SegError::validation("radius", "-2.5");
        assert!(err.is_validation());
        let msg = err.to_string();
        assert!(msg.contains("radius"));
        assert!(msg.contains("-2.5"));
    }

    #[test]
    fn test_persistence_display() {
        let err = SegError::persistence("disk full");
        assert!(!err.is_validation());
        let msg = err.to_string();
        assert!(msg.contains("Persistence error"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_config_display() {
        let err = SegError::config("workers must be >= 1");
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("workers"));
    }

    #[test]
    fn test_record_not_found_display() {
        let err = SegError::RecordNotFound(17);
        let msg = err.to_string();
        assert!(msg.contains("17"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_serialization_display() {
        let err = SegError::serialization("bad json");
        assert!(err.to_string().contains("bad json"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::other("gone");
        let err = SegError::from(io);
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_debug() {
        let err = SegError::validation("x0", "abc");
        let debug = format!("{err:?}");
        assert!(debug.contains("Validation"));
    }
}
