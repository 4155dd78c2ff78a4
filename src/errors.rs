//! Error types for curlbridge

use thiserror::Error;

/// Main error type for curlbridge
#[derive(Error, Debug)]
pub enum CurlbridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A flag that takes a value was the last token of the command
    #[error("Missing value for flag {flag}")]
    MissingValue { flag: String },

    /// No bare (non-flag) token was found to use as the request URL
    #[error("No URL found in curl command")]
    NoUrl,

    #[error("Command must start with 'curl'")]
    NotCurlCommand,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

impl CurlbridgeError {
    pub(crate) fn missing_value(flag: &str) -> Self {
        CurlbridgeError::MissingValue { flag: flag.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, CurlbridgeError>;
