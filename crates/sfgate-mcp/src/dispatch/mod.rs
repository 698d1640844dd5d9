//! MCP method dispatch functions.
//!
//! Each sub-module handles one MCP method as a free function, keeping
//! `McpHandler` itself thin (struct + routing only).

pub(crate) mod initialize;
pub(crate) mod tools_call;
pub(crate) mod tools_list;

use serde::Serialize;

use sfgate_protocol::{error_codes, JsonRpcErrorResponse, JsonRpcResponse, RequestId};

use crate::handler::JsonRpcOutput;

/// Serializes a method result into a success envelope.
pub(crate) fn success<T: Serialize>(id: RequestId, result: T) -> JsonRpcOutput {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcOutput::Success(JsonRpcResponse::success(id, v)),
        Err(e) => failure(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}

pub(crate) fn failure(id: RequestId, code: i32, message: impl Into<String>) -> JsonRpcOutput {
    JsonRpcOutput::Error(JsonRpcErrorResponse::error(id, code, message))
}
