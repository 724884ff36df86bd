//! Open discovery routes backed by the metadata cache.
//!
//! These proxy slow-changing documents from the remote provider; any cache
//! failure surfaces as 502 with one collapsed external code while the
//! distinct reason stays in the logs.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::adapters::http::AppState;
use crate::domain::errors::ApiResult;

/// `GET /mcp-metadata`
pub async fn mcp_metadata(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<serde_json::Value>> {
    let doc = state.metadata.fetch(&state.config.metadata.mcp_url).await?;
    Ok(Json((*doc).clone()))
}

/// `GET /.well-known/oauth-protected-resource`
///
/// Serves the same cached MCP metadata document; clients reach it at either
/// path depending on which discovery flow they implement.
pub async fn protected_resource(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<serde_json::Value>> {
    let doc = state.metadata.fetch(&state.config.metadata.mcp_url).await?;
    Ok(Json((*doc).clone()))
}

/// `GET /.well-known/oauth-authorization-server`
pub async fn authorization_server(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<serde_json::Value>> {
    let doc = state
        .metadata
        .fetch(&state.config.metadata.oauth_discovery_url)
        .await?;
    Ok(Json((*doc).clone()))
}
