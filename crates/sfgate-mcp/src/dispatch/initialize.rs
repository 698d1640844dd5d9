//! Handles the `initialize` MCP method.

use sfgate_protocol::mcp::initialize::{
    InitializeResult, ServerCapabilities, ServerInfo, ToolCapability, PROTOCOL_VERSION,
};
use sfgate_protocol::RequestId;

use crate::handler::{JsonRpcOutput, SERVICE_NAME};

/// Handles the `initialize` request and returns the server capabilities.
///
/// Client params are accepted as-is; the descriptor is static.
pub(crate) fn handle_initialize(id: RequestId) -> JsonRpcOutput {
    let result = InitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolCapability {}),
        },
        server_info: ServerInfo {
            name: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    super::success(id, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_id_and_announces_tools() {
        let output = handle_initialize(RequestId::String("init-1".into()));
        let JsonRpcOutput::Success(resp) = output else {
            panic!("expected success");
        };
        assert_eq!(resp.id, RequestId::String("init-1".into()));
        assert_eq!(resp.result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(resp.result["serverInfo"]["name"], SERVICE_NAME);
        assert!(resp.result["capabilities"]["tools"].is_object());
    }
}
