//! Customer session lifecycle
//!
//! Owns the two persisted slots (bearer token and customer profile) and
//! the in-memory authenticated user. Construction is explicit: build a
//! store, hydrate a [`SessionManager`] from it on startup, and pass the
//! manager to whatever needs identity. There is no ambient singleton.

mod manager;
mod store;
mod token;

pub use manager::{CustomerAuthApi, SessionManager};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use token::token_expiry;

use thiserror::Error;

use crate::error::ClientError;

/// Session layer error type
#[derive(Debug, Error)]
pub enum SessionError {
    /// Store could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored profile could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Operation requires a signed-in customer
    #[error("Not signed in")]
    NotAuthenticated,

    /// Underlying API call failed
    #[error(transparent)]
    Client(#[from] ClientError),
}
