//! Session cookie extractor.
//!
//! Reads the `session_id` cookie. When it is missing or empty a fresh UUID v4
//! token is issued and flagged so the handler can set the cookie on the
//! response.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session_id";

/// The caller's session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub id: String,
    /// True when the token was minted for this request.
    pub issued: bool,
}

impl SessionCookie {
    /// `Set-Cookie` value for a newly issued token; `None` for an existing one.
    pub fn set_cookie(&self) -> Option<String> {
        self.issued.then(|| {
            format!(
                "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
                self.id
            )
        })
    }
}

impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match cookie_value(&parts.headers, SESSION_COOKIE) {
            Some(id) if !id.is_empty() => Ok(Self {
                id: id.to_string(),
                issued: false,
            }),
            _ => {
                let id = Uuid::new_v4().to_string();
                tracing::debug!(session_id = %id, "Issued new session cookie");
                Ok(Self { id, issued: true })
            }
        }
    }
}

/// First value of the named cookie across all `Cookie` headers.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().trim_matches('"'))
}
