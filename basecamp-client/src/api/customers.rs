//! Customer authentication endpoints

use shared::models::{AuthSession, OtpChallenge, RegisterRequest};

use crate::error::ClientResult;
use crate::http::ApiClient;

impl ApiClient {
    /// Request a registration OTP for a phone number
    pub async fn send_registration_otp(&self, phone: &str) -> ClientResult<OtpChallenge> {
        #[derive(serde::Serialize)]
        struct PhoneRequest {
            phone: String,
        }

        self.post(
            "/api/customers/register/send-otp",
            &PhoneRequest {
                phone: phone.to_string(),
            },
        )
        .await
    }

    /// Verify a registration OTP and create the customer account
    pub async fn verify_registration_otp(
        &self,
        otp_id: &str,
        code: &str,
    ) -> ClientResult<AuthSession> {
        self.post(
            "/api/customers/register/verify-otp",
            &VerifyOtpRequest {
                otp_id: otp_id.to_string(),
                code: code.to_string(),
            },
        )
        .await
    }

    /// Request a login OTP for an existing customer
    pub async fn send_login_otp(&self, phone: &str) -> ClientResult<OtpChallenge> {
        #[derive(serde::Serialize)]
        struct PhoneRequest {
            phone: String,
        }

        self.post(
            "/api/customers/login/send-otp",
            &PhoneRequest {
                phone: phone.to_string(),
            },
        )
        .await
    }

    /// Verify a login OTP
    pub async fn verify_login_otp(&self, otp_id: &str, code: &str) -> ClientResult<AuthSession> {
        self.post(
            "/api/customers/login/verify-otp",
            &VerifyOtpRequest {
                otp_id: otp_id.to_string(),
                code: code.to_string(),
            },
        )
        .await
    }

    /// Legacy email/password login
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthSession> {
        #[derive(serde::Serialize)]
        struct LoginRequest {
            email: String,
            password: String,
        }

        self.post(
            "/api/customers/login",
            &LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await
    }

    /// Legacy email/password registration
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthSession> {
        self.post("/api/customers/register", request).await
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyOtpRequest {
    otp_id: String,
    code: String,
}
