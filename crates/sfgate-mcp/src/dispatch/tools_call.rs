//! Handles the `tools/call` MCP method.

use serde_json::Value;
use tracing::Instrument;

use sfgate_protocol::mcp::tools::{ToolsCallParams, ToolsCallResult};
use sfgate_protocol::{error_codes, RequestId};
use sfgate_salesforce::{CredentialHeaders, SalesforceConnector};

use super::{failure, success};
use crate::handler::JsonRpcOutput;
use crate::tools::Tool;

/// Handles the `tools/call` request.
///
/// Credentials are checked first, then the tool name and arguments; only a
/// fully valid call reaches the network.
pub(crate) async fn handle_tools_call(
    id: RequestId,
    params: &Option<Value>,
    headers: &CredentialHeaders,
    connector: &dyn SalesforceConnector,
    default_login_url: &str,
) -> JsonRpcOutput {
    let span = tracing::info_span!("tools_call", id = ?id, tool = tracing::field::Empty);
    call(id, params, headers, connector, default_login_url)
        .instrument(span)
        .await
}

async fn call(
    id: RequestId,
    params: &Option<Value>,
    headers: &CredentialHeaders,
    connector: &dyn SalesforceConnector,
    default_login_url: &str,
) -> JsonRpcOutput {
    // 1. Credentials
    let credentials = match headers.parse(default_login_url) {
        Ok(c) => c,
        Err(e) => return failure(id, error_codes::INVALID_PARAMS, e.to_string()),
    };

    // 2. Parse params
    let call_params = match params {
        Some(p) => match serde_json::from_value::<ToolsCallParams>(p.clone()) {
            Ok(cp) => cp,
            Err(e) => {
                return failure(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("invalid tools/call params: {e}"),
                );
            }
        },
        None => return failure(id, error_codes::INVALID_PARAMS, "tools/call requires params"),
    };
    tracing::Span::current().record("tool", call_params.name.as_str());

    // 3. Resolve the tool
    let Some(tool) = Tool::from_name(&call_params.name) else {
        return failure(
            id,
            error_codes::METHOD_NOT_FOUND,
            format!("Unknown tool: {}", call_params.name),
        );
    };

    // 4. Validate arguments
    let tool_call = match tool.parse_call(&call_params.arguments) {
        Ok(c) => c,
        Err(e) => return failure(id, error_codes::INVALID_PARAMS, e.to_string()),
    };

    // 5. Fresh session, then invoke
    let session = match connector.login(&credentials).await {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "Salesforce login failed");
            return failure(id, error_codes::INTERNAL_ERROR, e.to_string());
        }
    };

    let value = match tool_call.invoke(session.as_ref()).await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "Salesforce call failed");
            return failure(id, error_codes::INTERNAL_ERROR, e.to_string());
        }
    };
    tracing::debug!("tool call succeeded");

    match serde_json::to_string_pretty(&value) {
        Ok(text) => success(id, ToolsCallResult::text(text)),
        Err(e) => failure(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}
