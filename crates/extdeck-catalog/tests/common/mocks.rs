//! Mock implementations for testing
//!
//! Provides controllable stand-ins for the catalog's collaborators so tests
//! can drive source snapshots and install steps one event at a time.

#![allow(dead_code)]

use extdeck_catalog::{
    CatalogSources, ExtensionManager, InstallStepStream, PresentationLoop, ViewUpdate,
};
use extdeck_core::types::{Catalog, ExtensionRecord, InstallStep, PresentationItem};
use extdeck_core::Error;
use futures::channel::mpsc;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type SnapshotSender = mpsc::UnboundedSender<anyhow::Result<Vec<ExtensionRecord>>>;

/// Test-side handles for the three catalog sources
pub struct SourceFeeds {
    pub installed: SnapshotSender,
    pub untrusted: SnapshotSender,
    pub available: SnapshotSender,
}

impl SourceFeeds {
    pub fn new() -> (Self, CatalogSources) {
        let (installed, installed_rx) = mpsc::unbounded();
        let (untrusted, untrusted_rx) = mpsc::unbounded();
        let (available, available_rx) = mpsc::unbounded();

        (
            Self {
                installed,
                untrusted,
                available,
            },
            CatalogSources::new(
                installed_rx.boxed(),
                untrusted_rx.boxed(),
                available_rx.boxed(),
            ),
        )
    }

    pub fn send_installed(&self, records: Vec<ExtensionRecord>) {
        let _ = self.installed.unbounded_send(Ok(records));
    }

    pub fn send_untrusted(&self, records: Vec<ExtensionRecord>) {
        let _ = self.untrusted.unbounded_send(Ok(records));
    }

    pub fn send_available(&self, records: Vec<ExtensionRecord>) {
        let _ = self.available.unbounded_send(Ok(records));
    }

    pub fn fail_available(&self, message: &str) {
        let _ = self
            .available
            .unbounded_send(Err(anyhow::anyhow!(message.to_string())));
    }

    /// True once the pipeline has dropped every subscription
    pub fn all_closed(&self) -> bool {
        self.installed.is_closed() && self.untrusted.is_closed() && self.available.is_closed()
    }
}

/// Call recorded by [`ScriptedManager`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerCall {
    Install(String),
    Update(String),
    Uninstall(String),
    Trust(String),
    FindAvailable,
}

/// Extension manager whose install streams are fed by the test
#[derive(Default)]
pub struct ScriptedManager {
    scripts: Mutex<HashMap<String, mpsc::UnboundedReceiver<InstallStep>>>,
    calls: Mutex<Vec<ManagerCall>>,
}

impl ScriptedManager {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register the step feed for the next install/update of `package`
    pub fn script(&self, package: &str) -> mpsc::UnboundedSender<InstallStep> {
        let (tx, rx) = mpsc::unbounded();
        self.scripts.lock().unwrap().insert(package.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<ManagerCall> {
        self.calls.lock().unwrap().clone()
    }

    fn take_script(&self, package: &str) -> InstallStepStream {
        match self.scripts.lock().unwrap().remove(package) {
            Some(rx) => rx.boxed(),
            None => futures::stream::empty().boxed(),
        }
    }

    fn record(&self, call: ManagerCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ExtensionManager for ScriptedManager {
    fn install_extension(&self, extension: &ExtensionRecord) -> InstallStepStream {
        self.record(ManagerCall::Install(extension.package_name.clone()));
        self.take_script(&extension.package_name)
    }

    fn update_extension(&self, extension: &ExtensionRecord) -> InstallStepStream {
        self.record(ManagerCall::Update(extension.package_name.clone()));
        self.take_script(&extension.package_name)
    }

    fn uninstall_extension(&self, package_name: &str) {
        self.record(ManagerCall::Uninstall(package_name.to_string()));
    }

    fn trust_signature(&self, signature_hash: &str) {
        self.record(ManagerCall::Trust(signature_hash.to_string()));
    }

    fn find_available_extensions(&self) {
        self.record(ManagerCall::FindAvailable);
    }
}

/// Wait for the next full catalog, failing on any other update
pub async fn next_catalog(presentation: &mut PresentationLoop) -> Arc<Catalog> {
    match presentation.recv().await {
        Some(ViewUpdate::CatalogChanged(catalog)) => catalog,
        other => panic!("expected catalog update, got {:?}", other),
    }
}

/// Wait for the next item progress patch, failing on any other update
pub async fn next_progress(presentation: &mut PresentationLoop) -> PresentationItem {
    match presentation.recv().await {
        Some(ViewUpdate::ItemProgressChanged(item)) => item,
        other => panic!("expected progress update, got {:?}", other),
    }
}

/// Wait for a failure report, failing on any other update
pub async fn next_failure(presentation: &mut PresentationLoop) -> Arc<Error> {
    match presentation.recv().await {
        Some(ViewUpdate::CatalogFailed(error)) => error,
        other => panic!("expected failure, got {:?}", other),
    }
}

/// Let time pass and assert nothing was queued for the view
pub async fn assert_quiet(presentation: &mut PresentationLoop) {
    tokio::time::sleep(Duration::from_secs(1)).await;
    if let Some(update) = presentation.try_recv() {
        panic!("unexpected view update: {:?}", update);
    }
}
