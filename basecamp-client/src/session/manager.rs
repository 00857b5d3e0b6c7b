//! Session manager
//!
//! Drives the OTP and legacy authentication flows against the backend
//! and keeps the in-memory user, the client's bearer token, and the
//! persisted slots in agreement.

use async_trait::async_trait;
use shared::models::{AuthSession, CustomerProfile, OtpChallenge, ProfileUpdate, RegisterRequest};

use super::{SessionError, SessionStore, token};
use crate::error::ClientResult;
use crate::http::ApiClient;

/// The slice of the API the session layer depends on.
///
/// `ApiClient` implements this; tests substitute their own.
#[async_trait]
pub trait CustomerAuthApi: Send + Sync {
    async fn send_registration_otp(&self, phone: &str) -> ClientResult<OtpChallenge>;
    async fn verify_registration_otp(&self, otp_id: &str, code: &str)
    -> ClientResult<AuthSession>;
    async fn send_login_otp(&self, phone: &str) -> ClientResult<OtpChallenge>;
    async fn verify_login_otp(&self, otp_id: &str, code: &str) -> ClientResult<AuthSession>;
    async fn login(&self, email: &str, password: &str) -> ClientResult<AuthSession>;
    async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthSession>;
    async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<CustomerProfile>;
    fn set_token(&self, token: &str);
    fn clear_token(&self);
}

#[async_trait]
impl CustomerAuthApi for ApiClient {
    async fn send_registration_otp(&self, phone: &str) -> ClientResult<OtpChallenge> {
        ApiClient::send_registration_otp(self, phone).await
    }

    async fn verify_registration_otp(
        &self,
        otp_id: &str,
        code: &str,
    ) -> ClientResult<AuthSession> {
        ApiClient::verify_registration_otp(self, otp_id, code).await
    }

    async fn send_login_otp(&self, phone: &str) -> ClientResult<OtpChallenge> {
        ApiClient::send_login_otp(self, phone).await
    }

    async fn verify_login_otp(&self, otp_id: &str, code: &str) -> ClientResult<AuthSession> {
        ApiClient::verify_login_otp(self, otp_id, code).await
    }

    async fn login(&self, email: &str, password: &str) -> ClientResult<AuthSession> {
        ApiClient::login(self, email, password).await
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthSession> {
        ApiClient::register(self, request).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<CustomerProfile> {
        ApiClient::update_profile(self, update).await
    }

    fn set_token(&self, token: &str) {
        ApiClient::set_token(self, token);
    }

    fn clear_token(&self) {
        ApiClient::clear_token(self);
    }
}

/// Customer session state with an explicit lifecycle.
///
/// Hydrate once on startup, pass by reference to whatever needs
/// identity, call [`SessionManager::logout`] to end the session.
pub struct SessionManager<A, S> {
    api: A,
    store: S,
    user: Option<CustomerProfile>,
}

impl<A, S> SessionManager<A, S>
where
    A: CustomerAuthApi,
    S: SessionStore,
{
    /// Restore a session from the store, if a usable one is present.
    ///
    /// An expired token clears both slots; failure to read either slot
    /// just starts the session signed out.
    pub fn hydrate(api: A, store: S) -> Self {
        let mut manager = Self {
            api,
            store,
            user: None,
        };

        if let Some(stored) = manager.store.load_token() {
            if token::is_expired(&stored) {
                tracing::info!("Stored session expired, clearing");
                if let Err(err) = manager.store.clear_token() {
                    tracing::warn!(%err, "Failed to clear expired token");
                }
                if let Err(err) = manager.store.clear_profile() {
                    tracing::warn!(%err, "Failed to clear stored profile");
                }
                return manager;
            }
            manager.api.set_token(&stored);
        }

        // The profile slot stands alone: a session signed in through a
        // token-less verification response is still restorable.
        manager.user = manager.store.load_profile();
        if let Some(user) = &manager.user {
            tracing::debug!(customer = %user.id, "Session restored");
        }

        manager
    }

    /// The signed-in customer, if any
    pub fn current_user(&self) -> Option<&CustomerProfile> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Request a registration OTP
    pub async fn send_registration_otp(&self, phone: &str) -> Result<OtpChallenge, SessionError> {
        let challenge = self.api.send_registration_otp(phone).await.map_err(|err| {
            tracing::warn!(%err, "Could not send registration OTP");
            err
        })?;
        tracing::info!(otp_id = %challenge.otp_id, "Registration OTP sent");
        Ok(challenge)
    }

    /// Verify a registration OTP and sign in as the new customer
    pub async fn verify_registration_otp(
        &mut self,
        otp_id: &str,
        code: &str,
    ) -> Result<CustomerProfile, SessionError> {
        let session = self
            .api
            .verify_registration_otp(otp_id, code)
            .await
            .map_err(|err| {
                tracing::warn!(%err, "Registration OTP rejected");
                err
            })?;
        self.install(session)
    }

    /// Request a login OTP
    pub async fn send_login_otp(&self, phone: &str) -> Result<OtpChallenge, SessionError> {
        let challenge = self.api.send_login_otp(phone).await.map_err(|err| {
            tracing::warn!(%err, "Could not send login OTP");
            err
        })?;
        tracing::info!(otp_id = %challenge.otp_id, "Login OTP sent");
        Ok(challenge)
    }

    /// Verify a login OTP and sign in
    pub async fn verify_login_otp(
        &mut self,
        otp_id: &str,
        code: &str,
    ) -> Result<CustomerProfile, SessionError> {
        let session = self.api.verify_login_otp(otp_id, code).await.map_err(|err| {
            tracing::warn!(%err, "Login OTP rejected");
            err
        })?;
        self.install(session)
    }

    /// Legacy email/password login
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<CustomerProfile, SessionError> {
        let session = self.api.login(email, password).await.map_err(|err| {
            tracing::warn!(%err, "Login failed");
            err
        })?;
        self.install(session)
    }

    /// Legacy email/password registration
    pub async fn register(
        &mut self,
        request: &RegisterRequest,
    ) -> Result<CustomerProfile, SessionError> {
        let session = self.api.register(request).await.map_err(|err| {
            tracing::warn!(%err, "Registration failed");
            err
        })?;
        self.install(session)
    }

    /// Update the signed-in customer's profile.
    ///
    /// The local copy and the store are only touched after the server
    /// acknowledges the update; a failed call leaves both unchanged.
    pub async fn update_profile(
        &mut self,
        update: &ProfileUpdate,
    ) -> Result<CustomerProfile, SessionError> {
        if self.user.is_none() {
            return Err(SessionError::NotAuthenticated);
        }

        let updated = self.api.update_profile(update).await.map_err(|err| {
            tracing::warn!(%err, "Profile update rejected");
            err
        })?;
        self.store.save_profile(&updated)?;
        self.user = Some(updated.clone());
        tracing::info!(customer = %updated.id, "Profile updated");
        Ok(updated)
    }

    /// End the session: drop the in-memory user and the client token,
    /// and clear both persisted slots.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.api.clear_token();
        self.user = None;

        // Attempt both slots even if the first fails
        let token_result = self.store.clear_token();
        let profile_result = self.store.clear_profile();
        tracing::info!("Signed out");
        token_result.and(profile_result)
    }

    fn install(&mut self, session: AuthSession) -> Result<CustomerProfile, SessionError> {
        if let Some(auth_token) = &session.token {
            self.api.set_token(auth_token);
            self.store.save_token(auth_token)?;
        }
        self.store.save_profile(&session.customer)?;
        self.user = Some(session.customer.clone());
        tracing::info!(customer = %session.customer.id, "Signed in");
        Ok(session.customer)
    }
}
