//! Shared helpers used across CLI commands.
//!
//! Centralises loading the layered configuration and building the
//! Salesforce-backed `McpHandler`, so every command sees the same defaults.

use std::sync::Arc;

use sfgate_config::GatewayConfig;
use sfgate_mcp::McpHandler;
use sfgate_salesforce::{ClientSettings, RestConnector};

/// Loads the configuration from defaults, the optional file and env vars.
///
/// # Errors
///
/// Returns an error if a layer cannot be read or fails validation.
pub fn load_config(path: Option<&str>) -> anyhow::Result<GatewayConfig> {
    sfgate_config::load_config(path).map_err(|e| anyhow::anyhow!("{e}"))
}

/// Outbound client settings derived from `[salesforce]`.
pub fn client_settings(config: &GatewayConfig) -> ClientSettings {
    ClientSettings {
        api_version: config.salesforce.api_version.clone(),
        connect_timeout: config.salesforce.connect_timeout(),
        request_timeout: config.salesforce.request_timeout(),
    }
}

/// Creates the dispatcher backed by the REST connector.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be initialised.
pub fn create_handler(config: &GatewayConfig) -> anyhow::Result<Arc<McpHandler>> {
    let connector = RestConnector::new(client_settings(config))
        .map_err(|e| anyhow::anyhow!("Salesforce client init error: {e}"))?;
    Ok(Arc::new(McpHandler::new(
        Arc::new(connector),
        config.salesforce.default_login_url.clone(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn client_settings_follow_config() {
        let mut config = GatewayConfig::default();
        config.salesforce.api_version = "61.0".into();
        config.salesforce.connect_timeout_secs = 5;
        let settings = client_settings(&config);
        assert_eq!(settings.api_version, "61.0");
        assert_eq!(settings.connect_timeout, Duration::from_secs(5));
        assert_eq!(settings.request_timeout, Duration::from_secs(120));
    }

    #[test]
    fn create_handler_with_defaults() {
        assert!(create_handler(&GatewayConfig::default()).is_ok());
    }
}
