//! HTTP surface: router assembly, auth gate, origin policy, serving.
//!
//! Request flow: origin check, then (for guarded routes) session resolution,
//! then the shared task operations, shaped by whichever adapter received the
//! call. Discovery routes are open. Session resolution completes before any
//! task-collection lock is taken, so no lock is held across a remote await.

pub mod mcp;
pub mod metadata_routes;
pub mod rest;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::ORIGIN;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::models::Config;
use crate::domain::ports::SessionVerifier;
use crate::infrastructure::auth::HttpSessionVerifier;
use crate::infrastructure::metadata::MetadataCache;
use crate::services::{TaskRegistry, TaskService};

/// Shared state injected into every handler.
pub struct AppState {
    /// Validated process configuration.
    pub config: Config,
    /// The four task operations over the tenant registry.
    pub tasks: TaskService,
    /// Credential verification seam.
    pub verifier: Arc<dyn SessionVerifier>,
    /// TTL cache for remote discovery documents.
    pub metadata: MetadataCache,
}

impl AppState {
    /// Build state with the production verifier and cache.
    pub fn new(config: Config) -> Self {
        let verifier = Arc::new(HttpSessionVerifier::new(&config.auth));
        let metadata = MetadataCache::with_ttl_and_timeout(
            std::time::Duration::from_secs(config.metadata.ttl_secs),
            std::time::Duration::from_secs(config.metadata.timeout_secs),
        );
        Self::with_parts(config, verifier, metadata)
    }

    /// Build state with an explicit verifier and cache; tests inject doubles
    /// here.
    pub fn with_parts(
        config: Config,
        verifier: Arc<dyn SessionVerifier>,
        metadata: MetadataCache,
    ) -> Self {
        let tasks = TaskService::new(TaskRegistry::new(config.auth.enabled));
        Self { config, tasks, verifier, metadata }
    }
}

/// The caller's tenant identity for one request.
///
/// `user_id` is `None` exactly when the auth gate is disabled and every
/// caller shares the fallback collection.
#[derive(Debug, Clone)]
pub struct Tenant {
    /// Verified user identifier, absent in single-tenant fallback mode.
    pub user_id: Option<String>,
}

impl Tenant {
    /// The user id as the task service expects it.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

/// Taskdeck HTTP server.
pub struct HttpServer {
    state: Arc<AppState>,
}

impl HttpServer {
    /// Wrap shared state.
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Start serving until the listener fails.
    pub async fn serve(self) -> anyhow::Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start serving, stopping gracefully when `shutdown` resolves.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr =
            format!("{}:{}", self.state.config.server.host, self.state.config.server.port)
                .parse()?;
        let router = build_router(self.state);

        tracing::info!("taskdeck listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

/// Assemble the full router: guarded task/MCP routes plus open discovery
/// routes, wrapped in the origin gate, CORS, and request tracing.
pub fn build_router(state: Arc<AppState>) -> Router {
    let guarded = Router::new()
        .route("/tasks", get(rest::list_tasks).post(rest::create_task))
        .route("/tasks/{id}/complete", post(rest::complete_task))
        .route("/tasks/{id}", axum::routing::delete(rest::delete_task))
        .route("/mcp", post(mcp::handle))
        .route_layer(middleware::from_fn_with_state(Arc::clone(&state), session_gate));

    let open = Router::new()
        .route("/mcp-metadata", get(metadata_routes::mcp_metadata))
        .route(
            "/.well-known/oauth-protected-resource",
            get(metadata_routes::protected_resource),
        )
        .route(
            "/.well-known/oauth-authorization-server",
            get(metadata_routes::authorization_server),
        )
        .route("/health", get(health_check));

    let cors = cors_layer(&state.config.cors.trusted_origins);

    guarded
        .merge(open)
        .with_state(Arc::clone(&state))
        .layer(middleware::from_fn_with_state(state, origin_gate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}

/// Build the CORS layer.
///
/// With a trusted-origin list, only listed origins are reflected and
/// credentials (cookies) are allowed. An empty list means permissive mode:
/// any origin, no credentials. Startup validation guarantees the list is
/// non-empty whenever the auth gate is on.
fn cors_layer(trusted_origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
    let headers = [header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE];

    if trusted_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers);
    }

    let origins: Vec<HeaderValue> = trusted_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
}

/// Reject requests whose `Origin` is outside the trusted list with 403.
///
/// Requests without an `Origin` header are same-origin or non-browser and
/// pass through. An empty list (only possible with the gate disabled) is
/// permissive.
async fn origin_gate(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let trusted = &state.config.cors.trusted_origins;
    if !trusted.is_empty() {
        if let Some(origin) = request.headers().get(ORIGIN) {
            let allowed = origin
                .to_str()
                .is_ok_and(|o| trusted.iter().any(|t| t == o));
            if !allowed {
                tracing::warn!(origin = ?origin, "rejected request from untrusted origin");
                return Err(ApiError::OriginNotAllowed);
            }
        }
    }
    Ok(next.run(request).await)
}

/// Resolve the caller's tenant identity before any task operation runs.
///
/// With the gate enabled the cookie is revalidated against the identity
/// provider on every request; failures stop here and never reach the task
/// operations. With the gate disabled the request proceeds as the shared
/// tenant.
async fn session_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let tenant = if state.config.auth.enabled {
        let cookie = request
            .headers()
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok());
        let session = state.verifier.verify(cookie).await?;
        tracing::info!(
            route = %request.uri().path(),
            method = %request.method(),
            auth = "enforced",
            user_id = %session.user_id,
            "session resolved"
        );
        Tenant { user_id: Some(session.user_id) }
    } else {
        tracing::debug!(
            route = %request.uri().path(),
            method = %request.method(),
            auth = "bypassed",
            "auth gate disabled"
        );
        Tenant { user_id: None }
    };

    request.extensions_mut().insert(tenant);
    Ok(next.run(request).await)
}
