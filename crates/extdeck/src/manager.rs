//! Extension manager used by the CLI
//!
//! Nothing is installed for real. Installs and updates walk through the
//! usual steps with a fixed delay so progress can be observed.

use extdeck_catalog::{ExtensionManager, InstallStepStream};
use extdeck_core::types::{ExtensionRecord, InstallStep};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct SimulatedManager {
    step_delay: Duration,
    fail: bool,
}

impl SimulatedManager {
    pub fn new(step_delay: Duration) -> Self {
        Self {
            step_delay,
            fail: false,
        }
    }

    /// End every install with [`InstallStep::Error`] instead of success
    pub fn failing(mut self, fail: bool) -> Self {
        self.fail = fail;
        self
    }

    fn steps(&self) -> InstallStepStream {
        let last = if self.fail {
            InstallStep::Error
        } else {
            InstallStep::Installed
        };
        let delay = self.step_delay;

        stream::iter([
            InstallStep::Pending,
            InstallStep::Downloading,
            InstallStep::Installing,
            last,
        ])
        .then(move |step| async move {
            tokio::time::sleep(delay).await;
            step
        })
        .boxed()
    }
}

impl ExtensionManager for SimulatedManager {
    fn install_extension(&self, extension: &ExtensionRecord) -> InstallStepStream {
        info!(package = %extension.package_name, "Simulating install");
        self.steps()
    }

    fn update_extension(&self, extension: &ExtensionRecord) -> InstallStepStream {
        info!(package = %extension.package_name, "Simulating update");
        self.steps()
    }

    fn uninstall_extension(&self, package_name: &str) {
        info!(package = %package_name, "Uninstall requested");
    }

    fn trust_signature(&self, signature_hash: &str) {
        info!(signature = %signature_hash, "Trust requested");
    }

    fn find_available_extensions(&self) {
        info!("Available catalog refresh requested");
    }
}
