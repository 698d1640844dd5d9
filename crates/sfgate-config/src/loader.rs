//! Configuration loader (file + env merge).

use std::net::AddrParseError;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use crate::schema::GatewayConfig;

/// Prefix for structured environment overrides, e.g. `SFGATE_SERVER__PORT`.
pub const ENV_PREFIX: &str = "SFGATE_";

/// Unprefixed variables accepted for compatibility with existing
/// deployments, and the config keys they set.
const LEGACY_TYPED_VARS: [(&str, &str); 2] =
    [("PORT", "server.port"), ("REQUIRE_AUTH", "auth.require_auth")];
const LEGACY_STRING_VARS: [(&str, &str); 2] =
    [("HOST", "server.host"), ("SECRET_KEY", "auth.secret_key")];

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),

    /// `server.host` is not a valid bind address.
    #[error("invalid bind address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    /// The effective configuration could not be rendered.
    #[error("failed to render configuration: {0}")]
    Render(String),
}

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if given)
/// 3. Environment variables (`SFGATE_` prefix, `__` separates sections)
/// 4. Legacy `PORT`, `HOST`, `REQUIRE_AUTH` and `SECRET_KEY`
pub fn load_config(config_path: Option<&str>) -> Result<GatewayConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(GatewayConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
    figment = merge_legacy_env(figment);

    figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))
}

fn merge_legacy_env(mut figment: Figment) -> Figment {
    let typed: Vec<&str> = LEGACY_TYPED_VARS.iter().map(|(var, _)| *var).collect();
    figment = figment.merge(Env::raw().only(&typed).map(|key| {
        let mapped = LEGACY_TYPED_VARS
            .iter()
            .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
            .map_or_else(|| key.as_str().to_string(), |(_, path)| (*path).to_string());
        mapped.into()
    }));

    // String values are read directly so secrets like "00123" keep their
    // leading zeros.
    for (var, path) in LEGACY_STRING_VARS {
        if let Ok(value) = std::env::var(var) {
            figment = figment.merge(Serialized::default(path, value));
        }
    }
    figment
}

impl GatewayConfig {
    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Render(e.to_string()))
    }
}
