use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Settings read from `loterica.toml`. A missing file means defaults;
/// command-line flags override file values.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. "warn" or "loterica=debug"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Currency symbol shown in table and chart headers
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Width in characters of the longest chart bar
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_chart_width() -> usize {
    40
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            currency: default_currency(),
            chart_width: default_chart_width(),
        }
    }
}

impl Config {
    /// Load the config file at `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if config.display.chart_width == 0 {
            anyhow::bail!("display.chart_width must be at least 1");
        }
        Ok(config)
    }
}
