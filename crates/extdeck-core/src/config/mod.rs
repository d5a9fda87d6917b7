//! Catalog configuration

mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Default coalescing window for catalog source bursts
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Runtime settings for catalog reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Debounce window applied to source emissions, in milliseconds
    pub debounce_ms: u64,

    /// Language tags whose available extensions are listed
    pub enabled_languages: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            enabled_languages: vec!["all".to_string(), "en".to_string()],
        }
    }
}

impl CatalogConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn language_set(&self) -> BTreeSet<String> {
        self.enabled_languages.iter().cloned().collect()
    }
}
