//! Domain errors for the taskdeck system.
//!
//! `ApiError` is the request-level taxonomy shared by both exposure surfaces.
//! Its HTTP mapping lives here, in one place, so REST handlers and middleware
//! never hand-pick status codes. Task-not-found is deliberately NOT an error:
//! operations on an unknown id return `Option::None` and callers decide how
//! to present it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while mutating a task collection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("task text is required")]
    EmptyText,
}

/// Request-level errors, shared by the REST and MCP adapters.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No credential, or the identity provider rejected / never answered it.
    /// Fail-closed: timeouts and transport failures land here too.
    #[error("unauthenticated")]
    Unauthenticated,

    /// The identity provider vouched for the session but it carries no
    /// usable user identifier.
    #[error("forbidden: session has no usable identity claim")]
    Forbidden,

    /// Task text was empty after trimming.
    #[error(transparent)]
    InvalidTask(#[from] TaskError),

    /// Request carried an Origin outside the trusted list.
    #[error("origin not allowed")]
    OriginNotAllowed,

    /// Remote metadata fetch did not answer within its deadline.
    #[error("metadata fetch from {url} timed out")]
    MetadataTimeout { url: String },

    /// Remote metadata fetch failed in transport or returned non-2xx.
    #[error("metadata fetch from {url} failed{}", fmt_status(.status))]
    MetadataUnavailable { url: String, status: Option<u16> },

    /// Remote metadata document was not valid JSON.
    #[error("metadata from {url} is not valid JSON")]
    MetadataParseError { url: String },
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map_or_else(String::new, |s| format!(" with status {s}"))
}

/// Convenience alias for fallible request-path operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error body returned to HTTP clients.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl ApiError {
    /// Stable machine-readable code for the HTTP error body.
    ///
    /// The three metadata failures collapse to one external code; the
    /// distinction stays in logs and in the enum itself.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::InvalidTask(_) => "invalid_task",
            Self::OriginNotAllowed => "origin_not_allowed",
            Self::MetadataTimeout { .. }
            | Self::MetadataUnavailable { .. }
            | Self::MetadataParseError { .. } => "metadata_unavailable",
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::OriginNotAllowed => StatusCode::FORBIDDEN,
            Self::InvalidTask(_) => StatusCode::BAD_REQUEST,
            Self::MetadataTimeout { .. }
            | Self::MetadataUnavailable { .. }
            | Self::MetadataParseError { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_taxonomy() {
        assert_eq!(ApiError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::OriginNotAllowed.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::InvalidTask(TaskError::EmptyText).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn metadata_failures_collapse_to_one_external_code() {
        let errors = [
            ApiError::MetadataTimeout { url: "http://m".into() },
            ApiError::MetadataUnavailable { url: "http://m".into(), status: Some(500) },
            ApiError::MetadataParseError { url: "http://m".into() },
        ];
        for err in errors {
            assert_eq!(err.code(), "metadata_unavailable");
            assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn unavailable_message_includes_status_when_known() {
        let err = ApiError::MetadataUnavailable { url: "http://m".into(), status: Some(503) };
        assert!(err.to_string().contains("503"));

        let err = ApiError::MetadataUnavailable { url: "http://m".into(), status: None };
        assert!(!err.to_string().contains("status"));
    }
}
