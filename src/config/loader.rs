//! Configuration loading from disk or memory.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProberConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::error::join_errors;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

impl ProberConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ProberConfig = toml::from_str(content)?;
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProberConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = ProberConfig::from_toml_str(&content)?;

    tracing::debug!(path = %path.display(), servers = config.catalog().len(), "Prober configuration loaded");
    Ok(config)
}
