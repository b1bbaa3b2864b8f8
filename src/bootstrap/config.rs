//! # Configuration Loader
//!
//! Reads a TOML file and maps it onto the `AppConfig` DTO. Validation of
//! individual values belongs to `AppConfig::from_toml`; this module only
//! reports I/O and parse errors with context.

use std::path::Path;

use anyhow::Context;
use cb_core::config::AppConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
/// - A permission value is not recognized (mapping error)
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Load the file when a path was given, otherwise use defaults.
pub fn resolve_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => Ok(AppConfig::default()),
    }
}
