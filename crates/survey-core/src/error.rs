//! Error types for the want-survey service.

use thiserror::Error;

/// Result type alias using the survey Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for survey operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Request body could not be read or parsed as JSON
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Body parsed but is not an object with a long enough `want`
    #[error("Invalid payload")]
    InvalidPayload,

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
