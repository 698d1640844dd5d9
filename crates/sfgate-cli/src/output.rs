//! Output formatting for CLI responses.

use serde_json::Value;

/// Prints a JSON value, pretty-printed, to stdout.
pub fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
