use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::filter::FilterLimits;

use super::cli::CliConfig;
use super::constants::{CONFIG_FILE_NAME, DEFAULT_MAX_FILTER_JSON_BYTES, DEFAULT_MAX_FILTERS};

/// Limits section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LimitsFileConfig {
    pub max_filters: Option<usize>,
    pub max_json_bytes: Option<usize>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub limits: Option<LimitsFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }
}

/// Resolved filter engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub limits: FilterLimits,
}

impl FilterConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Local directory config OR CLI-specified config path
    /// 3. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading filter configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let path = if let Some(ref path) = cli.config {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.clone())
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        let file_config = match path {
            Some(path) => {
                let config = FileConfig::load_from_file(&path)?;
                config.warn_unknown_fields();
                config
            }
            None => FileConfig::default(),
        };

        Self::from_layers(file_config, cli)
    }

    fn from_layers(file_config: FileConfig, cli: &CliConfig) -> Result<Self> {
        let file_limits = file_config.limits.unwrap_or_default();

        let max_filters = cli
            .max_filters
            .or(file_limits.max_filters)
            .unwrap_or(DEFAULT_MAX_FILTERS);
        let max_json_bytes = cli
            .max_filter_json_bytes
            .or(file_limits.max_json_bytes)
            .unwrap_or(DEFAULT_MAX_FILTER_JSON_BYTES);

        if max_filters == 0 {
            anyhow::bail!("limits.max_filters must be greater than 0");
        }
        if max_json_bytes == 0 {
            anyhow::bail!("limits.max_json_bytes must be greater than 0");
        }

        let config = Self {
            limits: FilterLimits {
                max_filters,
                max_json_bytes,
            },
        };
        tracing::debug!(
            max_filters = config.limits.max_filters,
            max_json_bytes = config.limits.max_json_bytes,
            "Filter configuration loaded"
        );
        Ok(config)
    }
}
