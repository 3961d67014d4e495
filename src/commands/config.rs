use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::config::Config;

/// Print the effective configuration with secrets hidden.
pub fn run(config: &Config) -> Result<()> {
    let path = Config::config_path()?;
    let contents =
        toml::to_string_pretty(&config.redacted()).context("Failed to serialize configuration")?;

    println!("{}", format!("# {}", path.display()).dimmed());
    println!("{}", contents.trim_end());

    Ok(())
}
