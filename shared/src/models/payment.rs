//! Payment Model

use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// Server-issued payment order consumed by the payment widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    #[serde(rename = "orderId")]
    pub id: String,
    /// Amount due, whole rupees
    pub amount: i64,
    pub currency: Currency,
    /// Public key the widget is instantiated with
    pub key_id: String,
}

/// Request a payment order for a booking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrderRequest {
    pub booking_id: String,
    pub amount: i64,
    pub currency: Currency,
}

/// Completion payload handed back by the payment widget.
///
/// Forwarded to the verification endpoint verbatim; the client never
/// inspects the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCompletion {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

/// Verification request: the widget payload plus the booking it settles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerification {
    pub booking_id: String,
    #[serde(flatten)]
    pub completion: PaymentCompletion,
}

impl PaymentVerification {
    pub fn new(booking_id: impl Into<String>, completion: PaymentCompletion) -> Self {
        Self {
            booking_id: booking_id.into(),
            completion,
        }
    }
}

/// Settlement state of a payment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Created,
    Captured,
    Failed,
}

/// Payment record as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetail {
    #[serde(rename = "paymentId")]
    pub id: String,
    pub order_id: String,
    pub booking_id: String,
    pub amount: i64,
    pub currency: Currency,
    pub status: PaymentState,
    #[serde(default)]
    pub created_at: i64,
}
