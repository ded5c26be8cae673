//! HTTP transport implementation.
//!
//! A single axum router serving:
//! - JSON-RPC over POST (`rpc_path`, default `/mcp`)
//! - SSE sessions (`GET /sse` + `POST /messages`, see `sse.rs`)
//! - Plain REST tool endpoints (`GET /tools`, `POST /tools/call`) for
//!   clients that cannot speak JSON-RPC or hold a stream open
//! - Health and status endpoints

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, instrument, warn};

use super::sse::{self, MESSAGES_PATH, SessionRegistry};
use super::{TransportError, TransportResult, config::HttpConfig, shutdown_signal};
use crate::core::{McpServer, server::success_result};
use crate::domains::tools::ToolError;

/// MCP protocol revision announced by the HTTP transport.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    /// Error response for a failed tool call, tagged with its kind.
    pub fn tool_error(id: Option<serde_json::Value>, err: &ToolError) -> Self {
        let kind = err.kind();
        let mut response = Self::error(id, kind.json_rpc_code(), err.to_string());
        if let Some(error) = response.error.as_mut() {
            error.data = Some(serde_json::json!({ "kind": kind }));
        }
        response
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance.
    pub(crate) server: McpServer,
    /// Open SSE sessions.
    pub(crate) sessions: SessionRegistry,
    /// Interval between SSE keep-alive comments.
    pub(crate) keep_alive: Duration,
    /// Path of the JSON-RPC endpoint (echoed by the status endpoint).
    rpc_path: String,
}

impl AppState {
    /// Create handler state for the given server and HTTP settings.
    pub fn new(server: McpServer, config: &HttpConfig) -> Self {
        Self {
            server,
            sessions: SessionRegistry::new(),
            keep_alive: Duration::from_secs(config.sse_keep_alive_secs.max(1)),
            rpc_path: config.rpc_path.clone(),
        }
    }
}

/// Build the router for the given state.
pub fn router(state: AppState, enable_cors: bool) -> Router {
    let rpc_path = state.rpc_path.clone();

    let mut app = Router::new()
        .route(&rpc_path, post(handle_rpc))
        .route("/sse", get(sse::sse_handler))
        .route(MESSAGES_PATH, post(sse::message_handler))
        .route("/tools", get(tools_list_handler))
        .route("/tools/call", post(tools_call_handler))
        .route("/health", get(health_check))
        .route("/", get(status_handler))
        .route("/status", get(status_handler))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport until Ctrl-C.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let state = AppState::new(server, &self.config);
        let sessions = state.sessions.clone();
        let app = router(state, self.config.enable_cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP + SSE, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → SSE:      GET /sse, POST {}", MESSAGES_PATH);
        info!("  → Tools:    GET /tools, POST /tools/call");
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                info!("Interrupt received, shutting down HTTP transport");
                // Open SSE streams would otherwise hold graceful shutdown forever.
                sessions.close_all();
            })
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        info!("HTTP transport finished");
        Ok(())
    }
}

/// Turn a handler panic into a generic 500, logging the cause.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("HTTP handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Internal server error" })),
    )
        .into_response()
}

/// Root and status handler - server identity plus the tool catalog.
async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "status": "running",
        "transport": "HTTP",
        "protocol": "JSON-RPC 2.0",
        "protocolVersion": PROTOCOL_VERSION,
        "endpoints": {
            "rpc": state.rpc_path,
            "sse": "/sse",
            "messages": MESSAGES_PATH,
            "tools": "/tools",
            "call": "/tools/call",
            "health": "/health"
        },
        "tools": state.server.list_tools(),
        "sseSessions": state.sessions.count()
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// `GET /tools` - the tool catalog.
async fn tools_list_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "tools": state.server.list_tools() }))
}

/// Body of `POST /tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// `POST /tools/call` - invoke a tool without JSON-RPC framing.
async fn tools_call_handler(
    State(state): State<AppState>,
    Json(request): Json<ToolCallRequest>,
) -> Response {
    info!("REST tool call: {}", request.name);

    let outcome = state
        .server
        .call_tool(&request.name, request.arguments)
        .and_then(tool_result_json);

    match outcome {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            let kind = e.kind();
            let status =
                StatusCode::from_u16(kind.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                Json(serde_json::json!({
                    "error": {
                        "kind": kind,
                        "code": kind.json_rpc_code(),
                        "message": e.to_string()
                    }
                })),
            )
                .into_response()
        }
    }
}

/// Serialize display text as an MCP tool result (`{content, isError}`).
fn tool_result_json(text: String) -> Result<serde_json::Value, ToolError> {
    serde_json::to_value(success_result(text)).map_err(|e| ToolError::internal(e.to_string()))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    tracing::Span::current().record("method", request.method.as_str());
    info!("Received JSON-RPC request: {}", request.method);

    match process_request(&state.server, request) {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Process a JSON-RPC request.
///
/// Returns `None` for notifications, which get no response.
pub fn process_request(server: &McpServer, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::invalid_request(request.id));
    }

    if request.id.is_none() || request.method.starts_with("notifications/") {
        info!("Received notification: {}", request.method);
        return None;
    }

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(server, request),
        "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),
        "tools/list" => handle_tools_list(server, request),
        "tools/call" => handle_tools_call(server, request),
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    };

    Some(response)
}

/// Handle initialize request.
fn handle_initialize(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing initialize request");

    let result = serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        },
        "instructions": crate::core::server::INSTRUCTIONS
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/list request.
fn handle_tools_list(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/list request");

    let result = serde_json::json!({
        "tools": server.list_tools()
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/call request.
fn handle_tools_call(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/call request");

    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id, "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id, "Missing tool name"),
    };

    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    match server.call_tool(&name, arguments).and_then(tool_result_json) {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::tool_error(request.id, &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use axum::body::Body;
    use http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_server() -> McpServer {
        McpServer::new(Config::default())
    }

    fn test_state() -> AppState {
        AppState::new(test_server(), &HttpConfig::default())
    }

    fn rpc(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_panic_becomes_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_process_tools_call_success() {
        let response = process_request(
            &test_server(),
            rpc("tools/call", json!({ "name": "add", "arguments": { "a": 5, "b": 3 } })),
        )
        .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(result["content"][0]["text"], "5 + 3 = 8");
        assert_eq!(result["isError"], false);
    }

    #[test]
    fn test_process_tools_call_divide_by_zero() {
        let response = process_request(
            &test_server(),
            rpc("tools/call", json!({ "name": "divide", "arguments": { "a": 1, "b": 0 } })),
        )
        .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.message, "Cannot divide by zero");
        assert_eq!(error.data.unwrap()["kind"], "InvalidArgument");
    }

    #[test]
    fn test_process_tools_call_unknown_tool() {
        let response = process_request(
            &test_server(),
            rpc("tools/call", json!({ "name": "foo", "arguments": {} })),
        )
        .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "Unknown tool: foo");
    }

    #[test]
    fn test_process_tools_call_missing_name() {
        let response =
            process_request(&test_server(), rpc("tools/call", json!({ "arguments": {} }))).unwrap();
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[test]
    fn test_process_tools_list() {
        let response = process_request(&test_server(), rpc("tools/list", json!({}))).unwrap();
        let tools = response.result.unwrap()["tools"].as_array().unwrap().len();
        assert_eq!(tools, 6);
    }

    #[test]
    fn test_process_initialize() {
        let response = process_request(&test_server(), rpc("initialize", json!({}))).unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "calculator-mcp-server");
    }

    #[test]
    fn test_process_rejects_wrong_version() {
        let mut request = rpc("tools/list", json!({}));
        request.jsonrpc = "1.0".to_string();
        let response = process_request(&test_server(), request).unwrap();
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[test]
    fn test_process_unknown_method() {
        let response = process_request(&test_server(), rpc("resources/list", json!({}))).unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn test_process_notification_has_no_response() {
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: None,
        };
        assert!(process_request(&test_server(), request).is_none());
    }

    #[test]
    fn test_process_request_without_id_is_a_notification() {
        let mut request = rpc("tools/list", json!({}));
        request.id = None;
        assert!(process_request(&test_server(), request).is_none());
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = router(test_state(), true);
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_status_endpoint_echoes_catalog() {
        let app = router(test_state(), false);
        for path in ["/", "/status"] {
            let response = app
                .clone()
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body["name"], "calculator-mcp-server");
            assert_eq!(body["tools"].as_array().unwrap().len(), 6);
            assert_eq!(body["endpoints"]["rpc"], "/mcp");
        }
    }

    #[tokio::test]
    async fn test_rpc_endpoint() {
        let app = router(test_state(), true);
        let body = json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": { "name": "power", "arguments": { "base": 2, "exponent": 3 } }
        });
        let response = app.oneshot(post_json("/mcp", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], 7);
        assert_eq!(body["result"]["content"][0]["text"], "2^3 = 8");
    }

    #[tokio::test]
    async fn test_rpc_notification_is_accepted() {
        let app = router(test_state(), true);
        let body = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
        let response = app.oneshot(post_json("/mcp", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_rest_tools_list() {
        let app = router(test_state(), true);
        let response = app
            .oneshot(Request::get("/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        let names: Vec<_> = body["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            ["add", "subtract", "multiply", "divide", "power", "sqrt"]
        );
    }

    #[tokio::test]
    async fn test_rest_tools_call_success() {
        let app = router(test_state(), true);
        let body = json!({ "name": "divide", "arguments": { "a": 10, "b": 2 } });
        let response = app.oneshot(post_json("/tools/call", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["content"][0]["text"], "10 ÷ 2 = 5");
    }

    #[tokio::test]
    async fn test_rest_tools_call_errors() {
        let app = router(test_state(), true);

        let body = json!({ "name": "sqrt", "arguments": { "number": -4 } });
        let response = app.clone().oneshot(post_json("/tools/call", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["kind"], "InvalidArgument");
        assert_eq!(
            body["error"]["message"],
            "Cannot calculate square root of negative number"
        );

        let body = json!({ "name": "foo" });
        let response = app.oneshot(post_json("/tools/call", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["kind"], "MethodNotFound");
        assert_eq!(body["error"]["message"], "Unknown tool: foo");
    }

    #[tokio::test]
    async fn test_sse_session_round_trip() {
        let state = test_state();
        let sessions = state.sessions.clone();
        let app = router(state, true);

        let response = app
            .clone()
            .oneshot(Request::get("/sse").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/event-stream"
        );
        let mut body = response.into_body();

        let frame = body.frame().await.unwrap().unwrap().into_data().unwrap();
        let text = String::from_utf8(frame.to_vec()).unwrap();
        assert!(text.starts_with("event: endpoint\n"));
        let endpoint = text
            .lines()
            .find_map(|line| line.strip_prefix("data: "))
            .unwrap()
            .to_string();
        assert!(endpoint.starts_with("/messages?sessionId="));
        assert_eq!(sessions.count(), 1);

        let message = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": "add", "arguments": { "a": 5, "b": 3 } }
        });
        let response = app.clone().oneshot(post_json(&endpoint, message)).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let frame = body.frame().await.unwrap().unwrap().into_data().unwrap();
        let text = String::from_utf8(frame.to_vec()).unwrap();
        assert!(text.starts_with("event: message\n"));
        assert!(text.contains("5 + 3 = 8"));

        drop(body);
        assert_eq!(sessions.count(), 0);

        let message = json!({ "jsonrpc": "2.0", "id": 2, "method": "ping" });
        let response = app.oneshot(post_json(&endpoint, message)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
