//! Shared types for the Basecamp booking platform
//!
//! Common types used by the client and booking crates: the API response
//! envelope, the currency table, and the wire models exchanged with the
//! backend.

pub mod currency;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use currency::{BASE_CURRENCY, Currency, convert, format, format_multi};
pub use response::{ApiResponse, ErrorBody};
