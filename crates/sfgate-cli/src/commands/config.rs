//! `sfgate config` command.

use clap::Args;

use sfgate_config::GatewayConfig;

/// Print the effective configuration (secret masked).
#[derive(Debug, Args)]
pub struct ConfigArgs {}

/// Executes the config command.
pub fn execute(_args: &ConfigArgs, config: &GatewayConfig) -> anyhow::Result<()> {
    print!("{}", config.redacted().to_toml()?);
    Ok(())
}
