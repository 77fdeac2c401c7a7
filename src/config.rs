use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{CycleParameters, DEFAULT_CYCLE_LENGTH_DAYS};
use crate::validation;

/// Top-level configuration, read from an optional TOML file.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Cycle defaults.
    #[serde(default)]
    pub cycle: CycleToml,

    /// History store settings.
    #[serde(default)]
    pub history: HistoryToml,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CycleToml {
    #[serde(default = "default_cycle_length")]
    pub default_length_days: i64,
}

impl Default for CycleToml {
    fn default() -> Self {
        Self {
            default_length_days: default_cycle_length(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HistoryToml {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Overrides the per-user data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

impl Default for HistoryToml {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: None,
            max_records: default_max_records(),
        }
    }
}

fn default_cycle_length() -> i64 {
    DEFAULT_CYCLE_LENGTH_DAYS
}
fn default_true() -> bool {
    true
}
fn default_max_records() -> usize {
    100
}

impl Config {
    /// Parse and validate configuration text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("invalid config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn cycle_parameters(&self) -> CycleParameters {
        CycleParameters {
            cycle_length_days: self.cycle.default_length_days,
        }
    }

    fn validate(&self) -> Result<()> {
        validation::validate_cycle(&self.cycle_parameters())
            .context("[cycle].default_length_days")?;
        if self.history.max_records == 0 {
            anyhow::bail!("[history].max_records must be at least 1");
        }
        Ok(())
    }
}
