//! MCP tool server speaking JSON-RPC 2.0 over streamable HTTP.
//!
//! Exposes the four task operations as schema-described tools on `POST /mcp`.
//! The transport is stateless: one negotiated request/response exchange per
//! call, JSON responses, no server-assigned session id; whatever the client
//! opened is torn down with the connection.
//!
//! Every tool answers with a dual-shaped result: `structuredContent` for
//! machines and a short text line for an agent transcript. A complete or
//! delete on an unknown id still returns a well-formed null payload plus an
//! explanatory line, never a JSON-RPC error.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::adapters::http::{AppState, Tenant};
use crate::domain::errors::{ApiError, TaskError};
use crate::domain::models::Task;

/// Advertised MCP protocol revision.
const PROTOCOL_VERSION: &str = "2025-03-26";

/// JSON-RPC error codes used by this server.
const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const INTERNAL_ERROR: i64 = -32603;

/// `POST /mcp`
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Extension(tenant): Extension<Tenant>,
    body: String,
) -> Response {
    let request: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(err) => {
            return rpc_response(error_response(
                Value::Null,
                PARSE_ERROR,
                &format!("Parse error: {err}"),
            ));
        }
    };

    let Some(method) = request.get("method").and_then(Value::as_str) else {
        return rpc_response(error_response(
            request.get("id").cloned().unwrap_or(Value::Null),
            INVALID_REQUEST,
            "Invalid request: missing method",
        ));
    };

    // Notifications carry no id and get no body, only an acknowledgement.
    let Some(id) = request.get("id").cloned() else {
        tracing::debug!(method, "mcp notification acknowledged");
        return StatusCode::ACCEPTED.into_response();
    };

    let params = request.get("params").cloned().unwrap_or_else(|| json!({}));

    let response = match method {
        "initialize" => handle_initialize(id),
        "ping" => success_response(id, json!({})),
        "tools/list" => handle_tools_list(id),
        "tools/call" => handle_tools_call(&state, &tenant, id, &params).await,
        _ => error_response(id, METHOD_NOT_FOUND, &format!("Method not found: {method}")),
    };
    rpc_response(response)
}

fn rpc_response(body: Value) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

fn success_response(id: Value, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

fn error_response(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message }
    })
}

fn handle_initialize(id: Value) -> Value {
    let result = json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": "taskdeck",
            "version": env!("CARGO_PKG_VERSION")
        }
    });
    success_response(id, result)
}

fn task_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "text": { "type": "string" },
            "completed": { "type": "boolean" }
        },
        "required": ["id", "text", "completed"]
    })
}

fn nullable_task_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "task": { "oneOf": [task_schema(), { "type": "null" }] }
        },
        "required": ["task"]
    })
}

fn handle_tools_list(id: Value) -> Value {
    let tools = json!({
        "tools": [
            {
                "name": "createTask",
                "title": "Create a new task",
                "description": "Create a new task on the caller's task list",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "text": { "type": "string", "description": "Task text" }
                    },
                    "required": ["text"]
                },
                "outputSchema": task_schema()
            },
            {
                "name": "getTasks",
                "title": "Get all tasks",
                "description": "List the caller's tasks in insertion order",
                "inputSchema": { "type": "object", "properties": {} },
                "outputSchema": {
                    "type": "object",
                    "properties": {
                        "tasks": { "type": "array", "items": task_schema() }
                    },
                    "required": ["tasks"]
                }
            },
            {
                "name": "completeTask",
                "title": "Complete a task",
                "description": "Mark a task completed by id; idempotent",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "description": "Task id" }
                    },
                    "required": ["id"]
                },
                "outputSchema": nullable_task_schema()
            },
            {
                "name": "deleteTask",
                "title": "Delete a task",
                "description": "Remove a task by id",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "description": "Task id" }
                    },
                    "required": ["id"]
                },
                "outputSchema": nullable_task_schema()
            }
        ]
    });
    success_response(id, tools)
}

/// Dual-shaped tool result: a machine-readable payload and a human-readable
/// summary, both always populated.
struct ToolOutcome {
    structured: Value,
    summary: String,
}

impl ToolOutcome {
    fn new(structured: Value, summary: impl Into<String>) -> Self {
        Self { structured, summary: summary.into() }
    }

    fn into_result(self) -> Value {
        json!({
            "content": [ { "type": "text", "text": self.summary } ],
            "structuredContent": self.structured,
            "isError": false
        })
    }
}

/// Tool-level failure: the call ran but could not do what was asked.
fn tool_error(message: &str) -> Value {
    json!({
        "content": [ { "type": "text", "text": message } ],
        "isError": true
    })
}

async fn handle_tools_call(
    state: &Arc<AppState>,
    tenant: &Tenant,
    id: Value,
    params: &Value,
) -> Value {
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return error_response(id, INVALID_PARAMS, "tools/call requires a tool name");
    };
    let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    let result = match name {
        "createTask" => create_task(state, tenant, &args).await,
        "getTasks" => get_tasks(state, tenant).await,
        "completeTask" => complete_task(state, tenant, &args).await,
        "deleteTask" => delete_task(state, tenant, &args).await,
        _ => {
            return error_response(id, INVALID_PARAMS, &format!("Unknown tool: {name}"));
        }
    };

    match result {
        Ok(value) => success_response(id, value),
        Err(ToolCallError::InvalidParams(message)) => {
            error_response(id, INVALID_PARAMS, &message)
        }
        Err(ToolCallError::Internal(err)) => {
            tracing::error!(tool = name, %err, "tool call failed");
            error_response(id, INTERNAL_ERROR, &err.to_string())
        }
    }
}

enum ToolCallError {
    InvalidParams(String),
    Internal(ApiError),
}

impl From<ApiError> for ToolCallError {
    fn from(err: ApiError) -> Self {
        Self::Internal(err)
    }
}

fn require_id(args: &Value) -> Result<u64, ToolCallError> {
    args.get("id")
        .and_then(Value::as_u64)
        .ok_or_else(|| ToolCallError::InvalidParams("id must be a non-negative integer".into()))
}

fn task_value(task: &Task) -> Value {
    json!({ "id": task.id, "text": task.text, "completed": task.completed })
}

async fn create_task(
    state: &Arc<AppState>,
    tenant: &Tenant,
    args: &Value,
) -> Result<Value, ToolCallError> {
    let Some(text) = args.get("text").and_then(Value::as_str) else {
        return Err(ToolCallError::InvalidParams("text must be a string".into()));
    };

    match state.tasks.create(tenant.user_id(), text).await {
        Ok(task) => Ok(ToolOutcome::new(
            task_value(&task),
            format!("Created task {}: {}", task.id, task.text),
        )
        .into_result()),
        Err(ApiError::InvalidTask(TaskError::EmptyText)) => {
            Ok(tool_error("Task text is required"))
        }
        Err(err) => Err(err.into()),
    }
}

async fn get_tasks(state: &Arc<AppState>, tenant: &Tenant) -> Result<Value, ToolCallError> {
    let tasks = state.tasks.list(tenant.user_id()).await?;

    let summary = if tasks.is_empty() {
        "No tasks found".to_string()
    } else {
        tasks
            .iter()
            .map(|t| {
                let marker = if t.completed { "[x]" } else { "[ ]" };
                format!("{marker} {} (#{})", t.text, t.id)
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let structured = json!({ "tasks": tasks.iter().map(task_value).collect::<Vec<_>>() });
    Ok(ToolOutcome::new(structured, summary).into_result())
}

async fn complete_task(
    state: &Arc<AppState>,
    tenant: &Tenant,
    args: &Value,
) -> Result<Value, ToolCallError> {
    let id = require_id(args)?;

    let outcome = match state.tasks.complete(tenant.user_id(), id).await? {
        Some(task) => ToolOutcome::new(
            json!({ "task": task_value(&task) }),
            format!("Completed task {}: {}", task.id, task.text),
        ),
        None => ToolOutcome::new(
            json!({ "task": null }),
            format!("No task with id {id} exists"),
        ),
    };
    Ok(outcome.into_result())
}

async fn delete_task(
    state: &Arc<AppState>,
    tenant: &Tenant,
    args: &Value,
) -> Result<Value, ToolCallError> {
    let id = require_id(args)?;

    let outcome = match state.tasks.delete(tenant.user_id(), id).await? {
        Some(task) => ToolOutcome::new(
            json!({ "task": task_value(&task) }),
            format!("Deleted task {}: {}", task.id, task.text),
        ),
        None => ToolOutcome::new(
            json!({ "task": null }),
            format!("No task with id {id} exists"),
        ),
    };
    Ok(outcome.into_result())
}
