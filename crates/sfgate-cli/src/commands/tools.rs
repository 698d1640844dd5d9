//! `sfgate tools` command.

use clap::Args;
use serde_json::json;

use sfgate_mcp::tools;

use crate::output;

/// Print the operations exposed through `tools/list`.
#[derive(Debug, Args)]
pub struct ToolsArgs {}

/// Executes the tools command.
pub fn execute(_args: &ToolsArgs) -> anyhow::Result<()> {
    output::print_json(&json!({ "tools": tools::definitions() }))
}
