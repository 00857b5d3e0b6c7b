//! Authenticated customer endpoints
//!
//! Everything under `/api/users/me` requires a bearer token; calls made
//! without one come back as `ClientError::Unauthorized`.

use shared::models::{
    Booking, CustomerProfile, InvoiceSummary, NotificationItem, ProfileUpdate, TrekPackage,
};

use crate::error::ClientResult;
use crate::http::ApiClient;

impl ApiClient {
    /// Get the signed-in customer's profile
    pub async fn profile(&self) -> ClientResult<CustomerProfile> {
        self.get("/api/users/me").await
    }

    /// Update the signed-in customer's profile.
    ///
    /// Returns the profile as the server now sees it; callers should
    /// replace their local copy with this value rather than assuming
    /// the update applied as sent.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<CustomerProfile> {
        self.put("/api/users/me", update).await
    }

    /// List the signed-in customer's bookings
    pub async fn my_bookings(&self) -> ClientResult<Vec<Booking>> {
        self.get("/api/users/me/bookings").await
    }

    /// List favorited packages
    pub async fn favorites(&self) -> ClientResult<Vec<TrekPackage>> {
        self.get("/api/users/me/favorites").await
    }

    /// Add a package to favorites
    pub async fn add_favorite(&self, package_id: &str) -> ClientResult<()> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct FavoriteRequest {
            package_id: String,
        }

        self.post_unit(
            "/api/users/me/favorites",
            &FavoriteRequest {
                package_id: package_id.to_string(),
            },
        )
        .await
    }

    /// Remove a package from favorites
    pub async fn remove_favorite(&self, package_id: &str) -> ClientResult<()> {
        self.delete(&format!("/api/users/me/favorites/{package_id}"))
            .await
    }

    /// List in-app notifications
    pub async fn notifications(&self) -> ClientResult<Vec<NotificationItem>> {
        self.get("/api/users/me/notifications").await
    }

    /// Mark a notification as read
    pub async fn mark_notification_read(&self, id: &str) -> ClientResult<NotificationItem> {
        self.patch(
            &format!("/api/users/me/notifications/{id}/read"),
            &serde_json::json!({}),
        )
        .await
    }

    /// List invoices issued to the signed-in customer
    pub async fn invoices(&self) -> ClientResult<Vec<InvoiceSummary>> {
        self.get("/api/users/me/invoices").await
    }
}
