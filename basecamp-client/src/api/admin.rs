//! Admin endpoints
//!
//! Staff-only surface. The admin token is returned to the caller and
//! never enters the customer session store.

use reqwest::multipart::{Form, Part};
use shared::models::{AdminAuth, TrekPackage, TrekPackageCreate, TrekPackageUpdate};

use crate::error::ClientResult;
use crate::http::ApiClient;

impl ApiClient {
    /// Sign in as staff
    pub async fn admin_login(&self, email: &str, password: &str) -> ClientResult<AdminAuth> {
        #[derive(serde::Serialize)]
        struct LoginRequest {
            email: String,
            password: String,
        }

        self.post(
            "/api/admin/login",
            &LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await
    }

    /// Create a catalog package
    pub async fn create_package(&self, request: &TrekPackageCreate) -> ClientResult<TrekPackage> {
        self.post("/api/admin/packages", request).await
    }

    /// Update a catalog package
    pub async fn update_package(
        &self,
        id: &str,
        request: &TrekPackageUpdate,
    ) -> ClientResult<TrekPackage> {
        self.put(&format!("/api/admin/packages/{id}"), request).await
    }

    /// Delete a catalog package
    pub async fn delete_package(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/api/admin/packages/{id}")).await
    }

    /// Upload a package image.
    ///
    /// Sends the bytes as a multipart part named `image`; the updated
    /// package comes back with the new image URL appended.
    pub async fn upload_package_image(
        &self,
        id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<TrekPackage> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("image", part);
        self.post_multipart(&format!("/api/admin/packages/{id}/images"), form)
            .await
    }
}
