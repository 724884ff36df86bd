//! Session domain model.
//!
//! A session is the transient result of verifying a credential against the
//! external identity provider. It is never stored; guarded requests are
//! revalidated every time.
//!
//! Different provider deployments put the user identifier in different claim
//! fields, so extraction runs an explicit ordered list of extractors over the
//! typed claims and takes the first non-empty hit.

use serde::{Deserialize, Serialize};

/// A validated session: the derived user identifier plus the provider's raw
/// session document, kept opaque.
#[derive(Debug, Clone)]
pub struct Session {
    /// Stable identifier the task registry keys on.
    pub user_id: String,
    /// Provider-supplied session payload, unmodified.
    pub claims: serde_json::Value,
}

/// Typed view of the identity provider's session document, limited to the
/// claim fields user-id extraction cares about. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The `user` object of the session document.
    #[serde(default)]
    pub user: Option<UserClaims>,
}

/// Claim fields that may carry a user identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserClaims {
    /// Primary id.
    #[serde(default)]
    pub id: Option<String>,
    /// Alternate id used by some provider versions.
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
    /// OIDC subject claim.
    #[serde(default)]
    pub sub: Option<String>,
    /// Last resort: the account email.
    #[serde(default)]
    pub email: Option<String>,
}

type Extractor = fn(&UserClaims) -> Option<&str>;

/// Claim fields checked for a user identifier, in priority order.
const USER_ID_EXTRACTORS: &[Extractor] = &[
    |u| u.id.as_deref(),
    |u| u.user_id.as_deref(),
    |u| u.sub.as_deref(),
    |u| u.email.as_deref(),
];

impl SessionClaims {
    /// Derive the user identifier, first non-empty claim wins.
    pub fn user_id(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        USER_ID_EXTRACTORS
            .iter()
            .filter_map(|extract| extract(user))
            .find(|id| !id.trim().is_empty())
    }
}
