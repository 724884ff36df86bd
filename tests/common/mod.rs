//! Shared helpers for integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use serde_json::Value;

use taskdeck::adapters::http::{build_router, AppState};
use taskdeck::domain::models::Config;

/// Config with the auth gate disabled: single-tenant fallback, permissive CORS.
pub fn open_config() -> Config {
    let mut config = Config::default();
    config.auth.enabled = false;
    config
}

/// Config with the gate enabled, pointing at a test identity provider.
pub fn gated_config(auth_base_url: &str) -> Config {
    let mut config = Config::default();
    config.auth.enabled = true;
    config.auth.base_url = auth_base_url.to_string();
    config.cors.trusted_origins = vec!["http://app.example".to_string()];
    config
}

/// Full router over fresh state for the given config.
pub fn router_for(config: Config) -> Router {
    build_router(Arc::new(AppState::new(config)))
}

/// Build a JSON request.
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a bodyless request.
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}
