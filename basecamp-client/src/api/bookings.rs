//! Booking endpoints

use shared::models::{Booking, BookingCreate, BookingExpense, BookingPayment, BookingStatus, BookingUpdate};

use crate::error::ClientResult;
use crate::http::ApiClient;

impl ApiClient {
    /// Create a booking from a submitted form
    pub async fn create_booking(&self, request: &BookingCreate) -> ClientResult<Booking> {
        self.post("/api/bookings", request).await
    }

    /// List all bookings (staff)
    pub async fn bookings(&self) -> ClientResult<Vec<Booking>> {
        self.get("/api/bookings").await
    }

    /// Get a booking by id
    pub async fn booking(&self, id: &str) -> ClientResult<Booking> {
        self.get(&format!("/api/bookings/{id}")).await
    }

    /// Update traveler details on a booking
    pub async fn update_booking(&self, id: &str, request: &BookingUpdate) -> ClientResult<Booking> {
        self.put(&format!("/api/bookings/{id}"), request).await
    }

    /// Move a booking to a new lifecycle status (staff)
    pub async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> ClientResult<Booking> {
        #[derive(serde::Serialize)]
        struct StatusUpdate {
            status: BookingStatus,
        }

        self.patch(&format!("/api/bookings/{id}/status"), &StatusUpdate { status })
            .await
    }

    /// Delete a booking (staff)
    pub async fn delete_booking(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/api/bookings/{id}")).await
    }

    /// List expense lines recorded against a booking (staff)
    pub async fn booking_expenses(&self, id: &str) -> ClientResult<Vec<BookingExpense>> {
        self.get(&format!("/api/bookings/{id}/expenses")).await
    }

    /// List payments recorded against a booking
    pub async fn booking_payments(&self, id: &str) -> ClientResult<Vec<BookingPayment>> {
        self.get(&format!("/api/bookings/{id}/payments")).await
    }
}
