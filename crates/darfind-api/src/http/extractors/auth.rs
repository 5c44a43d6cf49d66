//! Shared-secret authentication extractor.
//!
//! The caller must send the configured secret in the `X-SECRET-KEY` header.
//! The comparison runs in constant time over the raw header bytes, so
//! secrets outside ASCII work too.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use secrecy::ExposeSecret;

use crate::http::error::AppError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const SECRET_KEY_HEADER: &str = "x-secret-key";

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized access. Invalid secret key.";

/// Authenticated request marker. Extracting this validates the secret key.
pub struct Authenticated;

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(SECRET_KEY_HEADER)
            .map(|v| v.as_bytes());

        match provided {
            Some(key) if constant_time_eq(key, state.secret_key.expose_secret().as_bytes()) =>
            {
                Ok(Authenticated)
            }
            _ => {
                tracing::debug!(present = provided.is_some(), "Rejected secret key");
                Err(AppError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()))
            }
        }
    }
}

/// Constant-time byte comparison.
///
/// Time taken is independent of how many bytes match. Length differences
/// return early.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
