//! Basecamp Client - HTTP client for the booking backend
//!
//! Thin typed wrappers over the backend REST API plus the customer
//! session layer. Every endpoint method maps to exactly one request and
//! parses the standard response envelope.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use session::{
    CustomerAuthApi, FileSessionStore, MemorySessionStore, SessionError, SessionManager,
    SessionStore,
};

// Re-export shared types for convenience
pub use shared::response::{ApiResponse, ErrorBody};
