//! Error types for the rcpt-core library.
//!
//! Parsing itself never fails: missing fields are reported in-band as empty
//! strings (or `Category::Other`). These errors cover the configuration layer
//! that sits around the engine.

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file is not valid JSON or has the wrong shape.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// A keyword list that must not be empty is empty.
    #[error("keyword list '{0}' must not be empty")]
    EmptyVocabulary(&'static str),

    /// An amount range is inverted or non-positive.
    #[error("invalid range for {field}: {reason}")]
    InvalidRange { field: &'static str, reason: String },

    /// The fallback window must cover at least one line.
    #[error("fallback window must be at least 1 line")]
    InvalidWindow,
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
