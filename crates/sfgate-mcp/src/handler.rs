//! MCP request handler.
//!
//! Routes a parsed JSON-RPC request to the matching dispatch function. The
//! handler holds no per-request state and is shared across connections.

use std::sync::Arc;

use sfgate_protocol::{
    error_codes, methods, JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse, RequestId,
};
use sfgate_salesforce::{CredentialHeaders, SalesforceConnector};

use crate::dispatch::{initialize, tools_call, tools_list};

/// Service name reported by `initialize` and the HTTP descriptors.
pub const SERVICE_NAME: &str = "mcp-salesforce-server";

/// Result of dispatching one request: exactly one of success or error.
#[derive(Debug, Clone)]
pub enum JsonRpcOutput {
    /// Successful result.
    Success(JsonRpcResponse),
    /// Error result.
    Error(JsonRpcErrorResponse),
}

impl JsonRpcOutput {
    /// The id echoed in this output.
    pub fn id(&self) -> &RequestId {
        match self {
            Self::Success(r) => &r.id,
            Self::Error(e) => &e.id,
        }
    }

    /// Serializes the output to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Success(r) => serde_json::to_string(r),
            Self::Error(e) => serde_json::to_string(e),
        }
    }
}

/// Dispatches MCP methods to the Salesforce operations.
#[derive(Clone)]
pub struct McpHandler {
    connector: Arc<dyn SalesforceConnector>,
    default_login_url: String,
}

impl McpHandler {
    /// Creates a handler that logs in through `connector`.
    ///
    /// `default_login_url` is used for calls without an `x-sf-login-url`.
    pub fn new(connector: Arc<dyn SalesforceConnector>, default_login_url: impl Into<String>) -> Self {
        Self {
            connector,
            default_login_url: default_login_url.into(),
        }
    }

    /// Dispatches one request. `headers` are only consulted by `tools/call`.
    pub async fn dispatch(
        &self,
        request: &JsonRpcRequest,
        headers: &CredentialHeaders,
    ) -> JsonRpcOutput {
        let id = request.id.clone();
        tracing::debug!(method = %request.method, id = ?id, "dispatching request");

        match request.method.as_str() {
            methods::INITIALIZE => initialize::handle_initialize(id),
            methods::TOOLS_LIST => tools_list::handle_tools_list(id),
            methods::TOOLS_CALL => {
                tools_call::handle_tools_call(
                    id,
                    &request.params,
                    headers,
                    self.connector.as_ref(),
                    &self.default_login_url,
                )
                .await
            }
            other => JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            )),
        }
    }
}
