//! Package catalog endpoints

use shared::models::TrekPackage;

use crate::error::ClientResult;
use crate::http::ApiClient;

impl ApiClient {
    /// List all packages
    pub async fn packages(&self) -> ClientResult<Vec<TrekPackage>> {
        self.get("/api/packages").await
    }

    /// Get a package by id
    pub async fn package(&self, id: &str) -> ClientResult<TrekPackage> {
        self.get(&format!("/api/packages/{id}")).await
    }

    /// Get a package by URL slug
    pub async fn package_by_slug(&self, slug: &str) -> ClientResult<TrekPackage> {
        self.get(&format!("/api/packages/slug/{slug}")).await
    }

    /// List packages in a category
    pub async fn packages_by_category(&self, category: &str) -> ClientResult<Vec<TrekPackage>> {
        self.get(&format!("/api/packages/category/{category}")).await
    }

    /// List packages carrying a tag
    pub async fn packages_by_tag(&self, tag: &str) -> ClientResult<Vec<TrekPackage>> {
        self.get(&format!("/api/packages/tag/{tag}")).await
    }
}
