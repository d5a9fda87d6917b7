//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Built-in defaults
//! 2. Config file (~/.extdeck/config.yaml, or an explicit path)
//! 3. Environment variables (EXTDECK_* prefix)
//! 4. CLI flags (handled by caller)

use super::CatalogConfig;
use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::env;
use std::fs;
use tracing::debug;

const CONFIG_FILE: &str = "config.yaml";
const ENV_DEBOUNCE_MS: &str = "EXTDECK_DEBOUNCE_MS";
const ENV_LANGUAGES: &str = "EXTDECK_LANGUAGES";

/// Configuration hierarchy loader
pub struct ConfigLoader {
    /// Config file to read, if any
    config_path: Option<Utf8PathBuf>,

    /// Fail when the config file is missing
    required: bool,
}

impl ConfigLoader {
    /// Loader reading the standard config file, if present
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            required: false,
        }
    }

    /// Loader reading an explicit config file, which must exist
    pub fn with_path(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            required: true,
        }
    }

    /// Standard config location (~/.extdeck/config.yaml)
    fn default_config_path() -> Option<Utf8PathBuf> {
        let home = dirs::home_dir()?;
        let home = Utf8PathBuf::from_path_buf(home).ok()?;
        Some(home.join(".extdeck").join(CONFIG_FILE))
    }

    /// Load configuration with hierarchical precedence
    pub fn load(&self) -> Result<CatalogConfig> {
        let mut config = CatalogConfig::default();

        match &self.config_path {
            Some(path) if path.exists() => {
                debug!("Loading catalog config from {}", path);
                config = Self::load_yaml_file(path)?;
            }
            Some(path) if self.required => {
                return Err(Error::config_not_found(path.as_str()));
            }
            _ => {}
        }

        Self::apply_env_overrides(config)
    }

    fn load_yaml_file(path: &Utf8Path) -> Result<CatalogConfig> {
        let content = fs::read_to_string(path)?;
        let config: CatalogConfig = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Apply EXTDECK_* environment overrides
    fn apply_env_overrides(mut config: CatalogConfig) -> Result<CatalogConfig> {
        if let Ok(value) = env::var(ENV_DEBOUNCE_MS) {
            config.debounce_ms = value.trim().parse().map_err(|_| {
                Error::invalid_config(format!(
                    "{} must be a number of milliseconds, got '{}'",
                    ENV_DEBOUNCE_MS, value
                ))
            })?;
        }

        if let Ok(value) = env::var(ENV_LANGUAGES) {
            config.enabled_languages = value
                .split(',')
                .map(str::trim)
                .filter(|lang| !lang.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
