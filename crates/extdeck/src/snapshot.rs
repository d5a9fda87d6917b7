//! Snapshot files fed to the catalog
//!
//! A snapshot holds one value for each catalog source:
//!
//! ```yaml
//! installed:
//!   - package_name: eu.ext.alpha
//!     display_name: Alpha
//!     state: installed
//!     has_update: true
//! untrusted: []
//! available:
//!   - package_name: eu.ext.beta
//!     display_name: Beta
//!     language: en
//!     state: available
//! ```

use anyhow::{bail, Context, Result};
use camino::Utf8Path;
use extdeck_catalog::CatalogSources;
use extdeck_core::types::ExtensionRecord;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Contents of a snapshot file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotFile {
    pub installed: Vec<ExtensionRecord>,
    pub untrusted: Vec<ExtensionRecord>,
    pub available: Vec<ExtensionRecord>,
}

impl SnapshotFile {
    /// Read a snapshot, choosing JSON or YAML by file extension
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file {}", path))?;

        let snapshot = match path.extension() {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
        .with_context(|| format!("Invalid snapshot file {}", path))?;

        debug!(
            path = %path,
            installed = snapshot.installed.len(),
            untrusted = snapshot.untrusted.len(),
            available = snapshot.available.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let snapshot: Self = serde_yaml_ng::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Every record must sit in the list matching its state
    fn validate(&self) -> Result<()> {
        let lists: [(&str, &[ExtensionRecord], fn(&ExtensionRecord) -> bool); 3] = [
            ("installed", &self.installed, ExtensionRecord::is_installed),
            ("untrusted", &self.untrusted, ExtensionRecord::is_untrusted),
            ("available", &self.available, ExtensionRecord::is_available),
        ];

        for (list, records, belongs) in lists {
            if let Some(record) = records.iter().find(|r| !belongs(r)) {
                bail!(
                    "'{}' is listed under {} but has a different state",
                    record.package_name,
                    list
                );
            }
        }
        Ok(())
    }

    /// One-shot sources that each emit this snapshot once and end
    pub fn into_sources(self) -> CatalogSources {
        CatalogSources::new(
            stream::iter([Ok(self.installed)]).boxed(),
            stream::iter([Ok(self.untrusted)]).boxed(),
            stream::iter([Ok(self.available)]).boxed(),
        )
    }
}
