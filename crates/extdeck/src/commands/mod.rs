//! CLI command implementations

pub mod config;
pub mod filter;
pub mod install;
pub mod list;

use anyhow::{anyhow, Context, Result};
use camino::Utf8Path;
use extdeck_catalog::{
    CatalogEngine, ExtensionManager, PresentationLoop, StaticLanguages, ViewUpdate,
};
use extdeck_core::types::Catalog;
use extdeck_core::{CatalogConfig, ConfigLoader};
use std::sync::Arc;
use tracing::debug;

use crate::cli::SnapshotArgs;
use crate::snapshot::SnapshotFile;

/// Load config from `path` or the default location
pub(crate) fn load_config(path: Option<&Utf8Path>) -> Result<CatalogConfig> {
    let loader = match path {
        Some(path) => ConfigLoader::with_path(path.to_path_buf()),
        None => ConfigLoader::new(),
    };
    loader.load().context("Failed to load configuration")
}

/// Start an engine over the snapshot named in `args`
pub(crate) fn start_engine(
    args: &SnapshotArgs,
    config_path: Option<&Utf8Path>,
    manager: Arc<dyn ExtensionManager>,
) -> Result<(CatalogEngine, PresentationLoop)> {
    let mut config = load_config(config_path)?;
    if !args.languages.is_empty() {
        config.enabled_languages = args.languages.clone();
    }
    debug!(languages = ?config.enabled_languages, "Using languages");

    let snapshot = SnapshotFile::load(&args.snapshot)?;
    let languages = Arc::new(StaticLanguages::new(config.enabled_languages.clone()));

    Ok(CatalogEngine::start(
        snapshot.into_sources(),
        manager,
        languages,
        &config,
    ))
}

/// Wait for the first merged catalog
pub(crate) async fn first_catalog(presentation: &mut PresentationLoop) -> Result<Arc<Catalog>> {
    while let Some(update) = presentation.recv().await {
        match update {
            ViewUpdate::CatalogChanged(catalog) => return Ok(catalog),
            ViewUpdate::CatalogFailed(error) => {
                return Err(anyhow!("Catalog reconciliation failed: {}", error))
            }
            ViewUpdate::ItemProgressChanged(_) => {}
        }
    }
    Err(anyhow!("Catalog closed before publishing"))
}

/// Print the catalog as JSON or as grouped tables
pub(crate) fn print_catalog(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        let json =
            serde_json::to_string_pretty(catalog).context("Failed to serialize catalog to JSON")?;
        println!("{}", json);
    } else if catalog.is_empty() {
        crate::output::warn("No extensions found matching criteria");
    } else {
        crate::output::catalog(catalog);
    }
    Ok(())
}
