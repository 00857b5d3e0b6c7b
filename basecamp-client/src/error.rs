//! Client error types

use thiserror::Error;

/// Client error type.
///
/// Every failure mode of an endpoint call lands here: transport errors,
/// non-2xx statuses, and `success: false` envelopes. `Api` carries the
/// server-supplied message whenever one was present.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server reported a failure
    #[error("{0}")]
    Api(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
