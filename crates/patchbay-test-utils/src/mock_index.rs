// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock package index for entry-point discovery.
//!
//! `MockPackageIndex` simulates installing and uninstalling packages between
//! queries and counts how often it is queried, which is how tests observe
//! that discovery is lazy and never memoized.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use patchbay_core::{EntryPoint, PackageIndex, PatchbayError, PluginObject};
use patchbay_plugin::ENTRYPOINT_GROUP;

use crate::stub::StubPlugin;

#[derive(Debug, Clone)]
struct Package {
    group: String,
    entry_point: EntryPoint,
    object: StubPlugin,
}

/// An in-memory package index.
#[derive(Debug, Default)]
pub struct MockPackageIndex {
    packages: Mutex<Vec<Package>>,
    failure: Mutex<Option<String>>,
    queries: AtomicUsize,
    loads: AtomicUsize,
}

impl MockPackageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a package advertising `name` under the default plugin group.
    pub fn install(&self, name: &str, dist_version: &str, object: StubPlugin) {
        self.install_in_group(ENTRYPOINT_GROUP, name, dist_version, object);
    }

    /// Install a package advertising `name` under `group`.
    pub fn install_in_group(
        &self,
        group: &str,
        name: &str,
        dist_version: &str,
        object: StubPlugin,
    ) {
        let package = Package {
            group: group.to_string(),
            entry_point: EntryPoint {
                name: name.to_string(),
                dist_version: dist_version.to_string(),
                reference: format!("{name}:plugin"),
            },
            object,
        };
        self.packages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(package);
    }

    /// Remove every package advertising `name`.
    pub fn uninstall(&self, name: &str) {
        self.packages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|package| package.entry_point.name != name);
    }

    /// Make subsequent queries fail with `message`, or succeed again with `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = message.map(str::to_string);
    }

    /// Number of `entry_points` queries so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Number of `load` calls so far.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl PackageIndex for MockPackageIndex {
    fn entry_points(&self, group: &str) -> Result<Vec<EntryPoint>, PatchbayError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(PatchbayError::Discovery {
                message,
                source: None,
            });
        }
        Ok(self
            .packages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|package| package.group == group)
            .map(|package| package.entry_point.clone())
            .collect())
    }

    fn load(&self, entry_point: &EntryPoint) -> Result<Box<dyn PluginObject>, PatchbayError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.packages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|package| package.entry_point == *entry_point)
            .map(|package| Box::new(package.object.clone()) as Box<dyn PluginObject>)
            .ok_or_else(|| PatchbayError::Discovery {
                message: format!("entry point '{}' is no longer installed", entry_point.name),
                source: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_and_uninstall_between_queries() {
        let index = MockPackageIndex::new();
        index.install("demo", "1.0.0", StubPlugin::new());
        assert_eq!(index.entry_points(ENTRYPOINT_GROUP).unwrap().len(), 1);

        index.uninstall("demo");
        assert!(index.entry_points(ENTRYPOINT_GROUP).unwrap().is_empty());
        assert_eq!(index.queries(), 2);
    }

    #[test]
    fn groups_are_isolated() {
        let index = MockPackageIndex::new();
        index.install_in_group("other.v1", "demo", "1.0.0", StubPlugin::new());
        assert!(index.entry_points(ENTRYPOINT_GROUP).unwrap().is_empty());
    }

    #[test]
    fn failure_is_reported_as_discovery_error() {
        let index = MockPackageIndex::new();
        index.set_failure(Some("index offline"));
        let err = index.entry_points(ENTRYPOINT_GROUP).unwrap_err();
        assert!(matches!(err, PatchbayError::Discovery { .. }));
        index.set_failure(None);
        assert!(index.entry_points(ENTRYPOINT_GROUP).is_ok());
    }
}
