//! Install command
//!
//! Runs a simulated install through the dispatcher and renders the
//! per-item progress updates the catalog publishes for it.

use anyhow::{bail, Context, Result};
use camino::Utf8Path;
use extdeck_catalog::CatalogView;
use extdeck_core::types::{Catalog, InstallStep, PresentationItem};
use extdeck_core::Error;
use std::sync::Arc;
use std::time::Duration;

use super::{first_catalog, start_engine};
use crate::cli::InstallArgs;
use crate::manager::SimulatedManager;
use crate::output;

/// Prints progress patches for the package being installed
struct ProgressView {
    package: String,
}

impl CatalogView for ProgressView {
    fn on_catalog_changed(&mut self, catalog: Arc<Catalog>) {
        if let Some(item) = catalog.find(&self.package) {
            output::info(&format!(
                "{} is in group '{}'",
                self.package,
                item.header.label()
            ));
        }
    }

    fn on_item_progress_changed(&mut self, item: PresentationItem) {
        if item.package_name() != self.package {
            return;
        }
        if let Some(step) = item.install_step {
            output::kv(&item.record.display_name, &step.to_string());
        }
    }

    fn on_catalog_failed(&mut self, error: &Error) {
        output::warn(&format!("Catalog stopped updating: {}", error));
    }
}

pub(crate) async fn run(args: InstallArgs, config: Option<&Utf8Path>) -> Result<()> {
    let manager =
        Arc::new(SimulatedManager::new(Duration::from_millis(args.step_ms)).failing(args.fail));
    let (engine, mut presentation) = start_engine(&args.source, config, manager)?;

    let catalog = first_catalog(&mut presentation).await?;
    let Some(item) = catalog.find(&args.package) else {
        bail!("Extension '{}' is not listed in the catalog", args.package);
    };

    let handle = if item.record.is_available() {
        engine.dispatcher().install(&item.record)
    } else {
        engine.dispatcher().update(&item.record)
    }
    .with_context(|| format!("Cannot install '{}'", args.package))?;

    output::header(&format!("Installing {}", item.record.display_name));
    let mut view = ProgressView {
        package: args.package.clone(),
    };

    let finished = handle.finished();
    tokio::pin!(finished);
    let last = loop {
        tokio::select! {
            last = &mut finished => break last,
            Some(update) = presentation.recv() => update.apply_to(&mut view),
        }
    };
    presentation.drain(&mut view);
    engine.shutdown();

    match last {
        Some(InstallStep::Installed) => {
            output::success(&format!("{} installed", args.package));
            Ok(())
        }
        Some(InstallStep::Error) => {
            output::error(&format!("{} failed to install", args.package));
            bail!("Install of '{}' ended with an error", args.package)
        }
        other => bail!(
            "Install of '{}' stopped at {}",
            args.package,
            other.map_or_else(|| "start".to_string(), |step| step.to_string())
        ),
    }
}
