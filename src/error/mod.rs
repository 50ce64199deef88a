//! Error definitions
//!
//! This module provides the error type shared by every lesson in idiomkit.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for idiomkit
#[derive(Error, Debug)]
pub enum Error {
    /// A completion signal was not raised in time
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// An introduction did not match its expected text
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// A test double was configured to fail
    #[error("Mock error: {0}")]
    Mock(String),

    /// A remote call was requested
    #[error("Network error: {0}")]
    Network(String),

    /// Content could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading local files failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A fixture file does not exist
    #[error("Missing test data: {}", .0.display())]
    MissingTestData(PathBuf),

    /// Output was read before every announcement was awaited
    #[error("{0} announcement(s) still unawaited when output was read")]
    UnawaitedAnnouncements(usize),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Create an assertion failure error.
    #[must_use]
    pub fn assertion_failed(message: impl Into<String>) -> Self {
        Self::AssertionFailed(message.into())
    }

    /// Create a mock error.
    #[must_use]
    pub fn mock(message: impl Into<String>) -> Self {
        Self::Mock(message.into())
    }

    /// Create a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::Timeout(Duration::from_millis(250)).to_string(),
            "Operation timed out after 250ms"
        );
        assert_eq!(
            Error::network("no transport").to_string(),
            "Network error: no transport"
        );
        assert_eq!(
            Error::UnawaitedAnnouncements(2).to_string(),
            "2 announcement(s) still unawaited when output was read"
        );
        assert_eq!(
            Error::MissingTestData(PathBuf::from("data/manifest.json")).to_string(),
            "Missing test data: data/manifest.json"
        );
    }

    #[test]
    fn test_json_error_converts() {
        fn parse() -> Result<serde_json::Value> {
            Ok(serde_json::from_str("{not json")?)
        }

        assert!(matches!(parse(), Err(Error::Json(_))));
    }
}
