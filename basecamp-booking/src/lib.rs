//! Basecamp Booking - booking form orchestration
//!
//! Takes a booking form from validation through submission and payment.
//! The flow is linear per attempt: validate locally, create the booking,
//! then for online payment request an order, open the payment widget,
//! and verify the completion with the backend.

pub mod api;
pub mod error;
pub mod flow;
pub mod form;
pub mod gateway;

pub use api::BookingApi;
pub use error::{BookingError, FieldError};
pub use flow::{BookingFlow, FlowState, SubmitOutcome};
pub use form::{BookingForm, MAX_TRAVELERS, MIN_TRAVELERS};
pub use gateway::{AutoApproveGateway, CheckoutOutcome, GatewayError, PaymentGateway};
