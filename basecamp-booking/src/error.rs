//! Booking flow error types

use std::fmt;

use basecamp_client::ClientError;
use serde::Serialize;
use thiserror::Error;

use crate::gateway::GatewayError;

/// One rejected form field, reported inline next to the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Booking flow error type
#[derive(Debug, Error)]
pub enum BookingError {
    /// Submission requires a signed-in customer
    #[error("Sign in to book this trek")]
    NotAuthenticated,

    /// The form failed local validation; no request was made
    #[error("Booking details are invalid")]
    Invalid(Vec<FieldError>),

    /// A backend call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The payment widget failed
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Payment went through but the backend could not confirm it
    #[error("Payment verification failed for booking {booking_id}")]
    VerificationFailed {
        booking_id: String,
        #[source]
        source: ClientError,
    },
}

impl BookingError {
    /// Field-level errors, when the failure was local validation
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            BookingError::Invalid(errors) => errors,
            _ => &[],
        }
    }
}
