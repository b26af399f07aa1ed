//! Upstream Client Errors

use thiserror::Error;

/// Errors from talking to the occupancy API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request timed out (only when a timeout is configured)
    #[error("Upstream request timed out")]
    Timeout,

    /// Could not connect to the upstream
    #[error("Upstream unavailable")]
    Unavailable,

    /// Other transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not the expected JSON
    #[error("Malformed upstream response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Map a reqwest error onto the taxonomy above
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Unavailable
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Request(e)
        }
    }
}

/// Result type for upstream calls
pub type ClientResult<T> = Result<T, ClientError>;
