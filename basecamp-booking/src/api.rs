//! Backend seam for the booking flow

use async_trait::async_trait;
use basecamp_client::{ApiClient, ClientResult};
use shared::models::{
    Booking, BookingCreate, PaymentDetail, PaymentOrder, PaymentOrderRequest, PaymentVerification,
};

/// The slice of the backend API the booking flow depends on.
///
/// `ApiClient` implements this; tests substitute their own.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn create_booking(&self, request: &BookingCreate) -> ClientResult<Booking>;
    async fn create_payment_order(
        &self,
        request: &PaymentOrderRequest,
    ) -> ClientResult<PaymentOrder>;
    async fn verify_payment(&self, request: &PaymentVerification) -> ClientResult<PaymentDetail>;
}

#[async_trait]
impl BookingApi for ApiClient {
    async fn create_booking(&self, request: &BookingCreate) -> ClientResult<Booking> {
        ApiClient::create_booking(self, request).await
    }

    async fn create_payment_order(
        &self,
        request: &PaymentOrderRequest,
    ) -> ClientResult<PaymentOrder> {
        ApiClient::create_payment_order(self, request).await
    }

    async fn verify_payment(&self, request: &PaymentVerification) -> ClientResult<PaymentDetail> {
        ApiClient::verify_payment(self, request).await
    }
}
