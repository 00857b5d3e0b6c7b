//! Data models
//!
//! Wire types exchanged with the booking backend. Field names follow the
//! backend's JSON contract (camelCase); identifiers are server-assigned
//! strings and timestamps are Unix milliseconds.

pub mod admin;
pub mod booking;
pub mod customer;
pub mod inquiry;
pub mod invoice;
pub mod notification;
pub mod payment;
pub mod trek;

// Re-exports
pub use admin::*;
pub use booking::*;
pub use customer::*;
pub use inquiry::*;
pub use invoice::*;
pub use notification::*;
pub use payment::*;
pub use trek::*;
