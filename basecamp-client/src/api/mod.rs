//! Typed endpoint wrappers
//!
//! One method per backend endpoint, grouped by resource. Methods stay
//! thin: build the request, hand the response to the envelope handling
//! in [`crate::http`].

mod admin;
mod bookings;
mod customers;
mod inquiries;
mod packages;
mod payments;
mod users;
