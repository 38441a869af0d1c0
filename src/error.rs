//! Custom error types for Vantage
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The message users see when a report export fails, whatever the cause.
pub const EXPORT_FAILURE_MESSAGE: &str = "Failed to generate PDF. Please try again.";

/// The main error type for Vantage operations
#[derive(Error, Debug)]
pub enum VantageError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Validation errors for report input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Document tree could not be rendered
    #[error("Render error: {0}")]
    Render(String),

    /// A finished document could not be delivered
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Report export failed; the cause has already been logged
    #[error("{}", EXPORT_FAILURE_MESSAGE)]
    ExportFailed,

    /// Image generation service errors
    #[error("Image generation error: {0}")]
    ImageGeneration(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl VantageError {
    /// Create a "not found" error for analyzed locations
    pub fn location_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Location",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is the normalized export failure
    pub fn is_export_failure(&self) -> bool {
        matches!(self, Self::ExportFailed)
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for VantageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VantageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for VantageError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<reqwest::Error> for VantageError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Result type alias for Vantage operations
pub type VantageResult<T> = Result<T, VantageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VantageError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = VantageError::location_not_found("Main St");
        assert_eq!(err.to_string(), "Location not found: Main St");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_export_failure_message_is_stable() {
        let err = VantageError::ExportFailed;
        assert_eq!(err.to_string(), "Failed to generate PDF. Please try again.");
        assert!(err.is_export_failure());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VantageError = io_err.into();
        assert!(matches!(err, VantageError::Io(_)));
    }
}
