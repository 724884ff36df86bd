//! REST handlers over the shared task operations.
//!
//! Responses are the raw task / task list as JSON. A complete or delete on an
//! unknown id answers 200 with `null`; absence is an outcome, not an error.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::adapters::http::{AppState, Tenant};
use crate::domain::errors::ApiResult;
use crate::domain::models::Task;

/// Body of `POST /tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Task text; trimmed server-side, must be non-empty.
    #[serde(default)]
    pub text: String,
}

/// `GET /tasks`
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Extension(tenant): Extension<Tenant>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list(tenant.user_id()).await?;
    Ok(Json(tasks))
}

/// `POST /tasks`
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Extension(tenant): Extension<Tenant>,
    Json(body): Json<CreateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.create(tenant.user_id(), &body.text).await?;
    Ok(Json(task))
}

/// `POST /tasks/{id}/complete`
pub async fn complete_task(
    State(state): State<Arc<AppState>>,
    Extension(tenant): Extension<Tenant>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Option<Task>>> {
    let task = state.tasks.complete(tenant.user_id(), id).await?;
    Ok(Json(task))
}

/// `DELETE /tasks/{id}`
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Extension(tenant): Extension<Tenant>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Option<Task>>> {
    let task = state.tasks.delete(tenant.user_id(), id).await?;
    Ok(Json(task))
}
