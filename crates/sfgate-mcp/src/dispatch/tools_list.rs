//! Handles the `tools/list` MCP method.

use sfgate_protocol::mcp::tools::ToolsListResult;
use sfgate_protocol::RequestId;

use crate::handler::JsonRpcOutput;
use crate::tools;

/// Handles the `tools/list` request.
pub(crate) fn handle_tools_list(id: RequestId) -> JsonRpcOutput {
    super::success(
        id,
        ToolsListResult {
            tools: tools::definitions(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_four_tools() {
        let JsonRpcOutput::Success(resp) = handle_tools_list(RequestId::Number(2.into())) else {
            panic!("expected success");
        };
        let tools = resp.result["tools"].as_array().expect("tools array");
        assert_eq!(tools.len(), 4);
        assert_eq!(tools[0]["name"], "query");
        assert_eq!(tools[3]["inputSchema"]["required"][1], "fullNames");
    }
}
