//! Credential-verification port.

use async_trait::async_trait;

use crate::domain::errors::ApiResult;
use crate::domain::models::Session;

/// Validates an inbound credential and derives a stable user identifier.
///
/// Implementations are fail-closed: any doubt (missing credential, provider
/// timeout, transport failure, unparseable response) is `Unauthenticated`.
/// A session the provider vouches for but that carries no usable identity
/// claim is `Forbidden`.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Verify the raw `Cookie` header of an inbound request.
    async fn verify(&self, cookie_header: Option<&str>) -> ApiResult<Session>;
}
