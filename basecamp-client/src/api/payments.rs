//! Payment endpoints

use shared::models::{PaymentDetail, PaymentOrder, PaymentOrderRequest, PaymentVerification};

use crate::error::ClientResult;
use crate::http::ApiClient;

impl ApiClient {
    /// Create a payment order for a booking.
    ///
    /// Requested just-in-time before opening the payment widget; the
    /// order is not kept client-side beyond the transaction.
    pub async fn create_payment_order(
        &self,
        request: &PaymentOrderRequest,
    ) -> ClientResult<PaymentOrder> {
        self.post("/api/payments/order", request).await
    }

    /// Verify a completed widget payment against the backend
    pub async fn verify_payment(
        &self,
        request: &PaymentVerification,
    ) -> ClientResult<PaymentDetail> {
        self.post("/api/payments/verify", request).await
    }

    /// Get a payment record by id
    pub async fn payment(&self, id: &str) -> ClientResult<PaymentDetail> {
        self.get(&format!("/api/payments/{id}")).await
    }
}
