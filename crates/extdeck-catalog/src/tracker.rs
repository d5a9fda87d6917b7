//! Per-package install progress
//!
//! The tracker is the only mutable state shared between install tasks and
//! the reconciliation pipeline. Every access goes through a single mutex so
//! a merge never observes a half-applied update.

use extdeck_core::types::InstallStep;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Current install step for every package with an operation in flight
#[derive(Debug, Default)]
pub struct InstallTracker {
    steps: Mutex<HashMap<String, InstallStep>>,
}

impl InstallTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, InstallStep>> {
        self.steps.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the latest step for a package
    pub fn set(&self, package_name: &str, step: InstallStep) {
        trace!(package = %package_name, step = %step, "install step");
        self.lock().insert(package_name.to_string(), step);
    }

    /// Forget a package, returning its last step
    pub fn remove(&self, package_name: &str) -> Option<InstallStep> {
        self.lock().remove(package_name)
    }

    pub fn get(&self, package_name: &str) -> Option<InstallStep> {
        self.lock().get(package_name).copied()
    }

    pub fn contains(&self, package_name: &str) -> bool {
        self.lock().contains_key(package_name)
    }

    /// Copy of all in-flight steps, used when merging
    pub fn snapshot(&self) -> HashMap<String, InstallStep> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Removes a package from the tracker when dropped
///
/// Held by an install task for its whole lifetime, so the entry goes away
/// on completion, failure and task cancellation alike.
#[derive(Debug)]
pub struct TrackerGuard {
    tracker: Arc<InstallTracker>,
    package_name: String,
}

impl TrackerGuard {
    pub fn new(tracker: Arc<InstallTracker>, package_name: impl Into<String>) -> Self {
        Self {
            tracker,
            package_name: package_name.into(),
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }
}

impl Drop for TrackerGuard {
    fn drop(&mut self) {
        if let Some(step) = self.tracker.remove(&self.package_name) {
            trace!(package = %self.package_name, last_step = %step, "released tracker entry");
        }
    }
}
