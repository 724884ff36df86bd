//! MCP tool-protocol tests over `POST /mcp`.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{body_json, open_config, router_for};

fn rpc_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn rpc(app: &Router, body: Value) -> Value {
    let response = app.clone().oneshot(rpc_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

async fn call_tool(app: &Router, name: &str, arguments: Value) -> Value {
    let response = rpc(
        app,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }),
    )
    .await;
    response["result"].clone()
}

#[tokio::test]
async fn initialize_negotiates_tools_capability() {
    let app = router_for(open_config());
    let response = rpc(
        &app,
        json!({"jsonrpc": "2.0", "id": 0, "method": "initialize", "params": {}}),
    )
    .await;

    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 0);
    assert!(response["result"]["protocolVersion"].is_string());
    assert!(response["result"]["capabilities"]["tools"].is_object());
    assert_eq!(response["result"]["serverInfo"]["name"], "taskdeck");
}

#[tokio::test]
async fn tools_list_advertises_the_four_operations() {
    let app = router_for(open_config());
    let response = rpc(&app, json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})).await;

    let tools = response["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["createTask", "getTasks", "completeTask", "deleteTask"]);
    for tool in tools {
        assert!(tool["inputSchema"].is_object());
        assert!(tool["outputSchema"].is_object());
    }
}

#[tokio::test]
async fn create_task_returns_dual_shaped_result() {
    let app = router_for(open_config());
    let result = call_tool(&app, "createTask", json!({"text": "buy milk"})).await;

    assert_eq!(result["isError"], false);
    assert_eq!(
        result["structuredContent"],
        json!({"id": 1, "text": "buy milk", "completed": false})
    );
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("buy milk"));
}

#[tokio::test]
async fn get_tasks_reports_empty_and_populated_lists() {
    let app = router_for(open_config());

    let result = call_tool(&app, "getTasks", json!({})).await;
    assert_eq!(result["structuredContent"], json!({"tasks": []}));
    assert_eq!(result["content"][0]["text"], "No tasks found");

    call_tool(&app, "createTask", json!({"text": "one"})).await;
    call_tool(&app, "createTask", json!({"text": "two"})).await;
    call_tool(&app, "completeTask", json!({"id": 1})).await;

    let result = call_tool(&app, "getTasks", json!({})).await;
    let tasks = result["structuredContent"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["completed"], true);
    assert_eq!(tasks[1]["completed"], false);
    let summary = result["content"][0]["text"].as_str().unwrap();
    assert!(summary.contains("[x] one"));
    assert!(summary.contains("[ ] two"));
}

#[tokio::test]
async fn complete_unknown_task_is_a_well_formed_null_result() {
    let app = router_for(open_config());
    let result = call_tool(&app, "completeTask", json!({"id": 41})).await;

    assert_eq!(result["isError"], false);
    assert_eq!(result["structuredContent"], json!({"task": null}));
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("41"));
}

#[tokio::test]
async fn delete_task_round_trip() {
    let app = router_for(open_config());
    call_tool(&app, "createTask", json!({"text": "ephemeral"})).await;

    let result = call_tool(&app, "deleteTask", json!({"id": 1})).await;
    assert_eq!(result["structuredContent"]["task"]["text"], "ephemeral");

    let result = call_tool(&app, "deleteTask", json!({"id": 1})).await;
    assert_eq!(result["structuredContent"], json!({"task": null}));
}

#[tokio::test]
async fn create_task_with_empty_text_is_a_tool_error_not_a_protocol_error() {
    let app = router_for(open_config());
    let result = call_tool(&app, "createTask", json!({"text": "   "})).await;

    assert_eq!(result["isError"], true);
    assert_eq!(result["content"][0]["text"], "Task text is required");
}

#[tokio::test]
async fn rest_and_mcp_operate_on_the_same_collection() {
    let app = router_for(open_config());

    call_tool(&app, "createTask", json!({"text": "shared"})).await;

    let response = app
        .clone()
        .oneshot(common::empty_request("GET", "/tasks"))
        .await
        .unwrap();
    let tasks = body_json(response).await;
    assert_eq!(tasks[0]["text"], "shared");
}

#[tokio::test]
async fn malformed_envelope_is_a_parse_error() {
    let app = router_for(open_config());
    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], -32700);
}

#[tokio::test]
async fn unknown_method_and_unknown_tool_are_rpc_errors() {
    let app = router_for(open_config());

    let response = rpc(&app, json!({"jsonrpc": "2.0", "id": 1, "method": "resources/list"})).await;
    assert_eq!(response["error"]["code"], -32601);

    let response = rpc(
        &app,
        json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": {"name": "dropTables", "arguments": {}}
        }),
    )
    .await;
    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn tool_call_with_wrong_argument_type_is_invalid_params() {
    let app = router_for(open_config());
    let response = rpc(
        &app,
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": "completeTask", "arguments": {"id": "one"}}
        }),
    )
    .await;
    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn notifications_are_acknowledged_without_a_body() {
    let app = router_for(open_config());
    let request = rpc_request(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}));

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}
