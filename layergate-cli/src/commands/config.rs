use anyhow::{Context, Result};
use layergate_core::EvaluatorConfig;
use std::path::Path;

/// Print the effective configuration as TOML
pub fn run(path: &Path) -> Result<()> {
    log::debug!("Loading configuration from {}", path.display());
    let config = EvaluatorConfig::load_from(path)?;
    print!("{}", render(&config)?);
    Ok(())
}

fn render(config: &EvaluatorConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to render configuration")
}
