//! Configuration schema types.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::loader::ConfigError;

/// Top-level gateway configuration.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Shared-secret settings for `tools/call`.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Outbound Salesforce settings.
    #[serde(default)]
    pub salesforce: SalesforceConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Returns the address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAddress` if `server.host` is not an IP
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|e| ConfigError::InvalidAddress {
                addr: self.server.host.clone(),
                source: e,
            })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// A copy safe to print: the shared secret is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.auth.secret_key.is_empty() {
            copy.auth.secret_key = "********".to_string();
        }
        copy
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    #[serde(default = "default_host", deserialize_with = "lenient_string")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

/// Shared-secret configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Whether `tools/call` requires a matching `x-secret-key` header.
    #[serde(default = "default_require_auth")]
    pub require_auth: bool,
    /// The shared secret. Empty means no secret is configured.
    #[serde(default, deserialize_with = "lenient_string")]
    pub secret_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_auth: default_require_auth(),
            secret_key: String::new(),
        }
    }
}

fn default_require_auth() -> bool {
    true
}

/// Outbound Salesforce client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesforceConfig {
    /// API version for login and REST calls.
    #[serde(default = "default_api_version", deserialize_with = "lenient_string")]
    pub api_version: String,
    /// Login host used when a request carries no `x-sf-login-url`.
    #[serde(default = "default_login_url")]
    pub default_login_url: String,
    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl SalesforceConfig {
    /// Returns the connect timeout as a `Duration`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for SalesforceConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            default_login_url: default_login_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_api_version() -> String {
    "62.0".to_string()
}
fn default_login_url() -> String {
    "https://login.salesforce.com".to_string()
}
fn default_connect_timeout_secs() -> u64 {
    15
}
fn default_request_timeout_secs() -> u64 {
    120
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "sfgate_mcp=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: "plain" or "json".
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "plain".to_string()
}

/// Accepts strings, and numbers or booleans rendered as strings.
///
/// Environment values such as `SFGATE_SALESFORCE__API_VERSION=62.0` are
/// parsed as numbers before they reach the schema.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => format!("{f:?}"),
        Raw::Bool(b) => b.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_string_accepts_numbers() {
        let cfg: SalesforceConfig =
            serde_json::from_str(r#"{"api_version": 62.0}"#).expect("parse");
        assert_eq!(cfg.api_version, "62.0");
    }

    #[test]
    fn socket_addr_rejects_hostname() {
        let mut config = GatewayConfig::default();
        config.server.host = "not-an-ip".into();
        assert!(config.socket_addr().is_err());
    }
}
