//! HTTP server that binds an axum Router to a TCP socket.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use sfgate_mcp::McpHandler;

use crate::auth::SecretPolicy;
use crate::error::HttpTransportError;
use crate::router::{build_router, AppState};

/// Axum-based HTTP server for the gateway.
pub struct HttpServer {
    pub(crate) addr: SocketAddr,
    pub(crate) state: AppState,
}

impl HttpServer {
    /// Creates a new HTTP server.
    ///
    /// # Arguments
    ///
    /// * `handler` - shared MCP dispatcher
    /// * `addr` - address to listen on
    /// * `policy` - shared-secret policy for `tools/call`
    pub fn new(handler: Arc<McpHandler>, addr: SocketAddr, policy: SecretPolicy) -> Self {
        Self {
            addr,
            state: AppState { handler, policy },
        }
    }

    /// Starts the server and blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP bind fails or the server crashes.
    pub async fn run(self) -> Result<(), HttpTransportError> {
        let listener =
            TcpListener::bind(self.addr)
                .await
                .map_err(|e| HttpTransportError::Bind {
                    addr: self.addr.to_string(),
                    source: e,
                })?;

        if self.state.policy == SecretPolicy::Permissive {
            tracing::warn!(
                "REQUIRE_AUTH is enabled but no secret key is configured; \
                 tools/call requests will not be authenticated"
            );
        }
        tracing::info!(addr = %self.addr, policy = ?self.state.policy, "Salesforce MCP gateway ready");

        let router = build_router(self.state);
        axum::serve(listener, router)
            .await
            .map_err(|e| HttpTransportError::Serve(e.to_string()))?;

        Ok(())
    }
}
