//! Inquiry endpoints

use shared::models::{Inquiry, InquiryCreate, InquiryStatus};

use crate::error::ClientResult;
use crate::http::ApiClient;

impl ApiClient {
    /// Submit a contact-form inquiry; works without authentication
    pub async fn create_inquiry(&self, request: &InquiryCreate) -> ClientResult<Inquiry> {
        self.post("/api/inquiries", request).await
    }

    /// List all inquiries (staff)
    pub async fn inquiries(&self) -> ClientResult<Vec<Inquiry>> {
        self.get("/api/inquiries").await
    }

    /// Get an inquiry by id (staff)
    pub async fn inquiry(&self, id: &str) -> ClientResult<Inquiry> {
        self.get(&format!("/api/inquiries/{id}")).await
    }

    /// Move an inquiry to a new handling status (staff)
    pub async fn update_inquiry_status(
        &self,
        id: &str,
        status: InquiryStatus,
    ) -> ClientResult<Inquiry> {
        #[derive(serde::Serialize)]
        struct StatusUpdate {
            status: InquiryStatus,
        }

        self.patch(&format!("/api/inquiries/{id}/status"), &StatusUpdate { status })
            .await
    }
}
