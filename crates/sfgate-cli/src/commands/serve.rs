//! `sfgate serve` command.
//!
//! Starts the HTTP gateway and runs until Ctrl-C.

use clap::Args;

use sfgate_config::GatewayConfig;
use sfgate_transport_http::{HttpServer, SecretPolicy};

use crate::shared;

/// Start the HTTP gateway.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Bind host (overrides `server.host`).
    #[arg(long)]
    pub host: Option<String>,
    /// TCP port (overrides `server.port`).
    #[arg(long)]
    pub port: Option<u16>,
}

/// Applies command-line overrides on top of the loaded configuration.
pub fn apply_overrides(args: &ServeArgs, mut config: GatewayConfig) -> GatewayConfig {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config
}

/// Executes the serve command.
pub async fn execute(args: &ServeArgs, config: GatewayConfig) -> anyhow::Result<()> {
    let config = apply_overrides(args, config);
    let addr = config.socket_addr()?;
    let handler = shared::create_handler(&config)?;
    let policy = SecretPolicy::new(config.auth.require_auth, &config.auth.secret_key);

    let server = HttpServer::new(handler, addr, policy);
    tokio::select! {
        result = server.run() => {
            result.map_err(|e| anyhow::anyhow!("server error: {e}"))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_values() {
        let args = ServeArgs {
            host: None,
            port: Some(9090),
        };
        let config = apply_overrides(&args, GatewayConfig::default());
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
