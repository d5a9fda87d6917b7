//! Install, update, uninstall and trust operations
//!
//! Install and update run as background tasks that follow the manager's
//! step stream. Each step is written to the [`InstallTracker`] and, when
//! the package is in the last published catalog, pushed to the view as a
//! single-item patch. The full list is left alone until the sources report
//! the installed state and the pipeline re-merges.

use crate::cache::CatalogCache;
use crate::merger;
use crate::presenter::ViewSender;
use crate::source::{ExtensionManager, InstallStepStream};
use crate::tracker::{InstallTracker, TrackerGuard};
use extdeck_core::types::{Catalog, ExtensionRecord, InstallStep, PresentationItem};
use extdeck_core::{Error, Result};
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Entry point for user-initiated extension operations
pub struct OperationDispatcher {
    manager: Arc<dyn ExtensionManager>,
    tracker: Arc<InstallTracker>,
    cache: Arc<CatalogCache>,
    view: ViewSender,
}

impl OperationDispatcher {
    pub fn new(
        manager: Arc<dyn ExtensionManager>,
        tracker: Arc<InstallTracker>,
        cache: Arc<CatalogCache>,
        view: ViewSender,
    ) -> Self {
        Self {
            manager,
            tracker,
            cache,
            view,
        }
    }

    /// Install an available extension
    pub fn install(&self, extension: &ExtensionRecord) -> Result<InstallHandle> {
        if !extension.is_available() {
            warn!(package = %extension.package_name, "Rejected install of non-available extension");
            return Err(Error::invalid_operation(format!(
                "{} is not an available extension",
                extension.package_name
            )));
        }

        info!(package = %extension.package_name, "Installing extension");
        let steps = self.manager.install_extension(extension);
        Ok(self.follow(&extension.package_name, steps))
    }

    /// Update an installed extension
    pub fn update(&self, extension: &ExtensionRecord) -> Result<InstallHandle> {
        if !extension.is_installed() {
            warn!(package = %extension.package_name, "Rejected update of non-installed extension");
            return Err(Error::invalid_operation(format!(
                "{} is not an installed extension",
                extension.package_name
            )));
        }

        info!(package = %extension.package_name, "Updating extension");
        let steps = self.manager.update_extension(extension);
        Ok(self.follow(&extension.package_name, steps))
    }

    /// Request removal of a package
    pub fn uninstall(&self, package_name: &str) {
        info!(package = %package_name, "Uninstalling extension");
        self.manager.uninstall_extension(package_name);
    }

    /// Trust a signature. The untrusted extension moves to the installed
    /// group when the sources next report it.
    pub fn trust(&self, signature_hash: &str) {
        info!(signature = %signature_hash, "Trusting extension signature");
        self.manager.trust_signature(signature_hash);
    }

    /// Ask the manager to refetch the available catalog
    pub fn refresh_available(&self) {
        debug!("Requesting available extensions refresh");
        self.manager.find_available_extensions();
    }

    /// Filter the last published catalog by display name
    pub fn filter(&self, query: &str) -> Catalog {
        match self.cache.latest() {
            Some(catalog) => merger::filter(&catalog, query),
            None => Catalog::default(),
        }
    }

    /// Spawn the task that mirrors a step stream into the tracker and view
    fn follow(&self, package_name: &str, mut steps: InstallStepStream) -> InstallHandle {
        let package_name = package_name.to_string();
        let tracker = self.tracker.clone();
        let cache = self.cache.clone();
        let view = self.view.clone();
        let task_package = package_name.clone();

        let task = tokio::spawn(async move {
            let _guard = TrackerGuard::new(tracker.clone(), task_package.clone());
            let mut last = None;

            while let Some(step) = steps.next().await {
                tracker.set(&task_package, step);
                last = Some(step);

                if let Some(item) = progress_item(cache.latest().as_deref(), &task_package, step) {
                    view.item_progress_changed(item);
                }

                if step.is_terminal() {
                    break;
                }
            }

            match last {
                Some(InstallStep::Installed) => {
                    info!(package = %task_package, "Extension installed")
                }
                Some(InstallStep::Error) => {
                    warn!(package = %task_package, "Extension install failed")
                }
                _ => debug!(package = %task_package, last_step = ?last, "Install stream ended"),
            }
            last
        });

        InstallHandle { package_name, task }
    }
}

/// Item patch for a progress step, if the package is currently listed
///
/// The terminal `Installed` step is not pushed: the next full catalog
/// replaces the item anyway.
fn progress_item(
    catalog: Option<&Catalog>,
    package_name: &str,
    step: InstallStep,
) -> Option<PresentationItem> {
    if step == InstallStep::Installed {
        return None;
    }

    let item = catalog?.find(package_name);
    if item.is_none() {
        debug!(package = %package_name, step = %step, "Progress for unlisted package ignored");
    }
    item.map(|item| item.with_step(step))
}

/// A running install or update
#[derive(Debug)]
pub struct InstallHandle {
    package_name: String,
    task: JoinHandle<Option<InstallStep>>,
}

impl InstallHandle {
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Stop following the operation; its tracker entry is released
    pub fn cancel(&self) {
        debug!(package = %self.package_name, "Cancelling install");
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the operation to end
    ///
    /// Returns the last step seen, or None if the operation was cancelled
    /// or produced no steps.
    pub async fn finished(self) -> Option<InstallStep> {
        self.task.await.ok().flatten()
    }
}
