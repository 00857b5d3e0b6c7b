//! Bearer token inspection

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Extract the `exp` claim (Unix seconds) from a JWT without verifying it.
///
/// Verification belongs to the backend; this is only used to discard
/// sessions that are known-stale before making a doomed request.
pub fn token_expiry(token: &str) -> Option<u64> {
    // JWT format: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload_bytes = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload_str = String::from_utf8(payload_bytes).ok()?;

    let payload: serde_json::Value = serde_json::from_str(&payload_str).ok()?;
    payload.get("exp")?.as_u64()
}

/// Whether a stored token is already past its expiry.
///
/// Tokens without a readable `exp` claim pass; the backend still
/// rejects them if they are stale.
pub(crate) fn is_expired(token: &str) -> bool {
    match token_expiry(token) {
        Some(exp) => (shared::util::now_millis() / 1000) as u64 > exp,
        None => false,
    }
}
