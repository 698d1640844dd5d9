//! JSON-RPC 2.0 envelope types for the gateway's `/mcp` endpoint.
//!
//! The gateway is protocol-version agnostic on input: `jsonrpc` and `id`
//! may be omitted, in which case the response carries `"2.0"` and `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// JSON-RPC protocol version written on every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version; defaults to "2.0" when absent.
    #[serde(default = "default_version")]
    pub jsonrpc: String,
    /// Request ID, echoed verbatim in the response.
    #[serde(default)]
    pub id: RequestId,
    /// Method name.
    pub method: String,
    /// Optional parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// JSON-RPC success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Request ID (matches the request).
    pub id: RequestId,
    /// Result value.
    pub result: Value,
}

/// JSON-RPC error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorResponse {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Request ID (matches the request).
    pub id: RequestId,
    /// Error details.
    pub error: JsonRpcError,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i32,
    /// Human-readable message.
    pub message: String,
    /// Optional structured data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Request ID: a number, a string, or null when the caller omitted it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric ID: integer, unsigned beyond `i64`, or fractional.
    Number(Number),
    /// String ID.
    String(String),
    /// Absent or explicit `null`.
    #[default]
    Null,
}

impl RequestId {
    /// Best-effort extraction of the `id` member from a raw JSON value.
    ///
    /// Used when the body is valid JSON but not a valid envelope, so the
    /// error response can still echo whatever id the caller sent.
    pub fn from_raw(value: &Value) -> Self {
        value
            .get("id")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}

/// Error codes used by the gateway. All are negative.
pub mod error_codes {
    /// Invalid JSON was received.
    pub const PARSE_ERROR: i32 = -32700;
    /// The JSON sent is not a valid request object.
    pub const INVALID_REQUEST: i32 = -32600;
    /// The method (or tool) does not exist.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid method parameter(s) or missing credentials.
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error, including remote Salesforce failures.
    pub const INTERNAL_ERROR: i32 = -32603;
    /// Shared-secret authentication failed.
    pub const AUTH_ERROR: i32 = -32001;
}

fn default_version() -> String {
    JSONRPC_VERSION.to_string()
}

impl JsonRpcRequest {
    /// Creates a new JSON-RPC 2.0 request.
    pub fn new(id: RequestId, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: default_version(),
            id,
            method: method.into(),
            params,
        }
    }
}

impl JsonRpcResponse {
    /// Creates a success response.
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: default_version(),
            id,
            result,
        }
    }
}

impl JsonRpcErrorResponse {
    /// Creates an error response.
    pub fn error(id: RequestId, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: default_version(),
            id,
            error: JsonRpcError {
                code,
                message: message.into(),
                data: None,
            },
        }
    }
}
