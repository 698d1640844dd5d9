//! # sfgate-protocol
//!
//! JSON-RPC 2.0 envelopes and MCP type definitions.
//! This crate defines the wire format spoken on the gateway's `/mcp`
//! endpoint, plus the structural validator used for tool arguments.

pub mod jsonrpc;
pub mod mcp;
pub mod schema;

pub use jsonrpc::*;
pub use mcp::methods;
