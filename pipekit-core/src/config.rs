//! Configuration file support
//!
//! Both tools accept `-c/--config FILE`. The format is chosen by extension:
//! `.json` is read with serde_json, `.yaml` and `.yml` with serde_yaml.
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::pipeline::PipelineOptions;
use crate::report::ReportOptions;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            _ => anyhow::bail!(
                "unsupported config file format: {} (expected .json, .yaml, or .yml)",
                path.display()
            ),
        }
    }
}

/// Parse config content in the given format
pub fn parse_config<T: DeserializeOwned>(content: &str, format: ConfigFormat) -> Result<T> {
    let value = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(value)
}

/// Load and deserialize a config file, dispatching on its extension
pub fn load_config_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    parse_config(&content, format)
        .with_context(|| format!("failed to parse config file: {}", path.display()))
}

/// Load and validate a pipeline config file
pub fn load_pipeline_config(path: &Path) -> Result<PipelineOptions> {
    let config: PipelineOptions = load_config_file(path)?;
    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;
    log::debug!("loaded pipeline config from {}", path.display());
    Ok(config)
}

/// Load and validate a report config file
pub fn load_report_config(path: &Path) -> Result<ReportOptions> {
    let config: ReportOptions = load_config_file(path)?;
    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;
    log::debug!("loaded report config from {}", path.display());
    Ok(config)
}
