//! HTTP transport for the booking backend

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::response::ApiResponse;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for the booking backend.
///
/// Cheap to clone: all clones share one connection pool and one bearer
/// token slot, so a token set after login is visible to every handle.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new API client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(config.token.clone())),
        })
    }

    /// Replace the bearer token attached to subsequent requests
    pub fn set_token(&self, token: impl Into<String>) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.into());
    }

    /// Drop the bearer token
    pub fn clear_token(&self) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    /// Get the current token
    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let mut request = self.client.get(&url);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let mut request = self.client.post(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        let mut request = self.client.put(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "PATCH");
        let mut request = self.client.patch(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request where no data payload is expected back
    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let mut request = self.client.post(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_empty(response).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");
        let mut request = self.client.delete(&url);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_empty(response).await
    }

    /// Make a multipart POST request.
    ///
    /// No content type is set here; the transport supplies the multipart
    /// boundary itself.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST multipart");
        let mut request = self.client.post(&url).multipart(form);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle an HTTP response that must carry data
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(%status, "Response received");

        if !status.is_success() {
            return Err(Self::status_error(status, &bytes));
        }

        let envelope: ApiResponse<T> = serde_json::from_slice(&bytes)?;
        match envelope.into_result() {
            Ok(Some(data)) => Ok(data),
            Ok(None) => Err(ClientError::InvalidResponse(
                "missing data field".to_string(),
            )),
            Err(err) => Err(ClientError::Api(err.message)),
        }
    }

    /// Handle an HTTP response where no data payload is expected
    async fn handle_empty(response: reqwest::Response) -> ClientResult<()> {
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(%status, "Response received");

        if !status.is_success() {
            return Err(Self::status_error(status, &bytes));
        }
        if bytes.is_empty() {
            return Ok(());
        }

        let envelope: ApiResponse<serde_json::Value> = serde_json::from_slice(&bytes)?;
        match envelope.into_result() {
            Ok(_) => Ok(()),
            Err(err) => Err(ClientError::Api(err.message)),
        }
    }

    /// Map a non-2xx status to an error, preferring the envelope message
    fn status_error(status: StatusCode, bytes: &[u8]) -> ClientError {
        let message = envelope_message(bytes);
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(
                message.unwrap_or_else(|| "resource not found".to_string()),
            ),
            _ => ClientError::Api(
                message.unwrap_or_else(|| format!("request failed with status {status}")),
            ),
        }
    }
}

/// Extract the error message from an envelope body, if there is one
fn envelope_message(bytes: &[u8]) -> Option<String> {
    let envelope: ApiResponse<serde_json::Value> = serde_json::from_slice(bytes).ok()?;
    envelope.error.map(|e| e.message)
}
