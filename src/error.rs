//! Error types for color-wrap operations.
//!
//! Rejected edits are not errors: the shell drops them silently. These
//! variants only surface when turning text into a [`ColorDescription`] or
//! when loading a [`PickerConfig`].
//!
//! [`ColorDescription`]: crate::description::ColorDescription
//! [`PickerConfig`]: crate::config::PickerConfig

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in color-wrap operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (config file operations).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Color description text could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_color_display() {
        let err = Error::InvalidColor("#zzz".to_string());
        assert_eq!(err.to_string(), "Invalid color: #zzz");
    }

    #[test]
    fn test_config_parse_display() {
        let err = Error::ConfigParse {
            line: 3,
            message: "unexpected key".to_string(),
        };
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("unexpected key"));
    }

    #[test]
    fn test_config_invalid_display() {
        let err = Error::ConfigInvalid {
            key: "history_capacity".to_string(),
            message: "must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("history_capacity"));
    }

    #[test]
    fn test_io_from() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
