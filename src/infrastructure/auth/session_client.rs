//! HTTP client for the external identity provider's session endpoint.
//!
//! Forwards the inbound cookie header unchanged, bounded by a short deadline.
//! Every failure mode collapses to `Unauthenticated` except one: a 2xx
//! session document with no extractable user id, which is `Forbidden`.
//! Log lines carry the URL and failure reason but never the cookie value.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::Client;

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::models::{AuthConfig, Session, SessionClaims};
use crate::domain::ports::SessionVerifier;

/// `SessionVerifier` backed by the identity provider's `GET /session`.
#[derive(Debug, Clone)]
pub struct HttpSessionVerifier {
    http: Client,
    session_url: String,
    timeout: Duration,
}

impl HttpSessionVerifier {
    /// Build a verifier from the auth section of the config.
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            http: Client::new(),
            session_url: auth.session_url(),
            timeout: Duration::from_secs(auth.session_timeout_secs),
        }
    }
}

#[async_trait]
impl SessionVerifier for HttpSessionVerifier {
    async fn verify(&self, cookie_header: Option<&str>) -> ApiResult<Session> {
        let cookie = match cookie_header {
            Some(c) if !c.is_empty() => c,
            _ => return Err(ApiError::Unauthenticated),
        };

        let response = self
            .http
            .get(&self.session_url)
            .header(COOKIE, cookie)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    tracing::warn!(url = %self.session_url, "session verification timed out");
                } else {
                    tracing::warn!(url = %self.session_url, %err, "session verification request failed");
                }
                ApiError::Unauthenticated
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %self.session_url, %status, "identity provider rejected session");
            return Err(ApiError::Unauthenticated);
        }

        let payload: serde_json::Value = response.json().await.map_err(|err| {
            tracing::warn!(url = %self.session_url, %err, "session payload is not valid JSON");
            ApiError::Unauthenticated
        })?;

        // SessionClaims defaults every field, so this only fails on
        // structurally impossible documents (e.g. `user` not an object).
        let claims: SessionClaims =
            serde_json::from_value(payload.clone()).unwrap_or_default();

        let user_id = claims.user_id().ok_or(ApiError::Forbidden)?.to_string();

        Ok(Session { user_id, claims: payload })
    }
}
