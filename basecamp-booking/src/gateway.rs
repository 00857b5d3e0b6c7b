//! Payment widget seam
//!
//! The interactive checkout is external to this crate. The flow only
//! needs to open it with a payment order and learn how it ended, so
//! that is the whole interface. Tests and demos plug in their own.

use async_trait::async_trait;
use shared::models::{PaymentCompletion, PaymentOrder};
use thiserror::Error;

/// Errors surfaced by a payment gateway implementation
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The widget reported a failed payment attempt
    #[error("Payment failed: {0}")]
    Failed(String),

    /// The widget could not be opened at all
    #[error("Payment widget unavailable: {0}")]
    Unavailable(String),
}

/// How the customer left the checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Payment went through; the payload to forward for verification
    Completed(PaymentCompletion),
    /// The customer closed the widget without paying
    Dismissed,
}

/// Interface to the interactive payment widget
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open the checkout for an order and wait for the customer
    async fn open(&self, order: &PaymentOrder) -> Result<CheckoutOutcome, GatewayError>;
}

/// Gateway that instantly approves every order.
///
/// For demos and tests; the completion payload is fabricated from the
/// order id so verification mocks can correlate it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApproveGateway;

#[async_trait]
impl PaymentGateway for AutoApproveGateway {
    async fn open(&self, order: &PaymentOrder) -> Result<CheckoutOutcome, GatewayError> {
        tracing::debug!(order = %order.id, amount = order.amount, "Auto-approving payment");
        Ok(CheckoutOutcome::Completed(PaymentCompletion {
            payment_id: format!("pay_auto_{}", order.id),
            order_id: order.id.clone(),
            signature: "auto-approved".to_string(),
        }))
    }
}
