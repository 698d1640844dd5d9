//! # sfgate-mcp
//!
//! MCP method dispatch handler (APPLICATION layer).
//!
//! Provides `McpHandler` and `JsonRpcOutput` for routing JSON-RPC requests
//! to the four Salesforce operations, plus the closed `Tool` registry.

mod dispatch;
pub mod handler;
pub mod tools;

pub use handler::{JsonRpcOutput, McpHandler, SERVICE_NAME};
pub use tools::{Tool, ToolCall};
