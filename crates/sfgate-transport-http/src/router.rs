//! Axum router for the MCP HTTP/JSON-RPC transport.
//! Routes: `POST /mcp` (requests), `GET /health` (liveness), `GET /`
//! (service descriptor), `GET /tools` (operation list).

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use sfgate_mcp::{tools, McpHandler, SERVICE_NAME};
use sfgate_protocol::{error_codes, methods, JsonRpcErrorResponse, JsonRpcRequest, RequestId};
use sfgate_salesforce::credentials::{
    LOGIN_URL_HEADER, PASSWORD_HEADER, SECURITY_TOKEN_HEADER, USERNAME_HEADER,
};

use crate::auth::{self, SecretPolicy, SECRET_HEADER};
use crate::credentials::credential_headers;

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP request dispatcher.
    pub handler: Arc<McpHandler>,
    /// Shared-secret policy for `tools/call`.
    pub policy: SecretPolicy,
}

/// Builds the axum `Router` with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_descriptor))
        .route("/health", get(handle_health))
        .route("/tools", get(handle_tools))
        .route("/mcp", post(handle_mcp))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "healthy", "service": SERVICE_NAME}))
}

async fn handle_descriptor() -> impl IntoResponse {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "MCP server exposing Salesforce query, tooling, describe and metadata operations",
        "endpoints": {
            "health": "GET /health",
            "tools": "GET /tools",
            "mcp": "POST /mcp"
        },
        "requiredHeaders": [USERNAME_HEADER, PASSWORD_HEADER, SECURITY_TOKEN_HEADER],
        "optionalHeaders": [LOGIN_URL_HEADER, SECRET_HEADER]
    }))
}

async fn handle_tools() -> impl IntoResponse {
    Json(json!({ "tools": tools::definitions() }))
}

async fn handle_mcp(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let json_val: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            return json_rpc_error(
                StatusCode::OK,
                RequestId::Null,
                error_codes::PARSE_ERROR,
                &format!("Parse error: {e}"),
            )
        }
    };

    let raw_id = RequestId::from_raw(&json_val);
    let request: JsonRpcRequest = match serde_json::from_value(json_val) {
        Ok(r) => r,
        Err(e) => {
            return json_rpc_error(
                StatusCode::OK,
                raw_id,
                error_codes::INVALID_REQUEST,
                &format!("Invalid request: {e}"),
            )
        }
    };

    if request.method == methods::TOOLS_CALL {
        if let Err(response) = check_secret(&state.policy, &headers, &request.id) {
            return response;
        }
    }

    let credentials = credential_headers(&headers);
    let output = state.handler.dispatch(&request, &credentials).await;
    encoded_response(output.to_json(), request.id)
}

/// Wraps an encoded dispatch result. Encoding failures are still JSON-RPC
/// errors, so the status stays 200.
fn encoded_response(encoded: Result<String, serde_json::Error>, id: RequestId) -> Response {
    match encoded {
        Ok(json_str) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            json_str,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode response");
            json_rpc_error(StatusCode::OK, id, error_codes::INTERNAL_ERROR, &e.to_string())
        }
    }
}

/// Applies the shared-secret policy; on failure returns the 401 response.
fn check_secret(policy: &SecretPolicy, headers: &HeaderMap, id: &RequestId) -> Result<(), Response> {
    match policy {
        SecretPolicy::Disabled => Ok(()),
        SecretPolicy::Permissive => {
            tracing::warn!("authentication is required but no secret key is configured; allowing request");
            Ok(())
        }
        SecretPolicy::Enforced(expected) => auth::validate_secret(headers, expected).map_err(|e| {
            tracing::warn!(reason = %e, "rejected tools/call");
            json_rpc_error(
                StatusCode::UNAUTHORIZED,
                id.clone(),
                error_codes::AUTH_ERROR,
                &e.to_string(),
            )
        }),
    }
}

/// Produces a JSON-RPC error response with the given id.
fn json_rpc_error(status: StatusCode, id: RequestId, code: i32, message: &str) -> Response {
    (status, Json(JsonRpcErrorResponse::error(id, code, message))).into_response()
}
