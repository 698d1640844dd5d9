//! HTTP/JSON-RPC transport adapter for the gateway.
//! Exposes MCP over `POST /mcp`, plus `/health`, `/` and `/tools`.
//! `tools/call` may be gated by a shared secret in `x-secret-key`.

pub mod auth;
mod credentials;
mod error;
pub mod router;
pub mod server;

pub use auth::SecretPolicy;
pub use error::HttpTransportError;
pub use router::{build_router, AppState};
pub use server::HttpServer;
