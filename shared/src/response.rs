//! API response envelope
//!
//! Every backend endpoint wraps its payload in the same structure:
//! ```json
//! {
//!     "success": true,
//!     "data": { ... },
//!     "error": { "message": "..." }
//! }
//! ```
//! `data` is present on success, `error` on failure. Transport-level
//! failures never produce an envelope at all.

use serde::{Deserialize, Serialize};

/// Error payload carried by a failed envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message from the server
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Unified API response structure.
///
/// The payload slots stay plain `Option` fields; a missing key reads as
/// `None` without any `Default` requirement on `T`, which keeps the
/// envelope usable for every payload type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody::new(message)),
        }
    }

    /// Fold the envelope into a result.
    ///
    /// A failed envelope with no error body still yields an `ErrorBody`
    /// so callers always get a message to surface.
    pub fn into_result(self) -> Result<Option<T>, ErrorBody> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .error
                .unwrap_or_else(|| ErrorBody::new("request failed")))
        }
    }
}
