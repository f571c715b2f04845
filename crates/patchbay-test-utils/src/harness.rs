// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for registry integration testing.
//!
//! `TestHarness` assembles a catalog over mock collaborators, a registry
//! cache over that catalog, and a mutable configuration. Tests install
//! plugins through the builder, then drive enable/disable and registry
//! queries through the harness.

use std::sync::Arc;

use patchbay_config::{Config, PLUGINS_KEY};
use patchbay_core::PatchbayError;
use patchbay_plugin::{
    EntrypointSource, OfficialSource, PluginCatalog, PluginRegistry, RegistryCache,
};

use crate::mock_index::MockPackageIndex;
use crate::mock_loader::MockModuleLoader;
use crate::stub::StubPlugin;

/// Builder for creating test environments with pre-installed plugins.
#[derive(Debug, Default)]
pub struct TestHarnessBuilder {
    official: Vec<(String, Option<StubPlugin>)>,
    entrypoints: Vec<(String, String, StubPlugin)>,
    enabled: Option<Vec<String>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Register `name` as an official plugin backed by `stub`.
    pub fn official(mut self, name: impl Into<String>, stub: StubPlugin) -> Self {
        self.official.push((name.into(), Some(stub)));
        self
    }

    /// Register `name` as an official plugin whose module does not exist.
    pub fn official_missing(mut self, name: impl Into<String>) -> Self {
        self.official.push((name.into(), None));
        self
    }

    /// Install an entry-point package advertising `name`.
    pub fn entrypoint(
        mut self,
        name: impl Into<String>,
        dist_version: impl Into<String>,
        stub: StubPlugin,
    ) -> Self {
        self.entrypoints
            .push((name.into(), dist_version.into(), stub));
        self
    }

    /// Start with `names` under the enabled-plugins key.
    pub fn enabled<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enabled = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Build the harness, registering and installing every plugin.
    pub fn build(self) -> TestHarness {
        let loader = Arc::new(MockModuleLoader::new());
        let index = Arc::new(MockPackageIndex::new());

        let official = OfficialSource::new(loader.clone());
        for (name, stub) in self.official {
            if let Some(stub) = stub {
                loader.insert(official.module_path(&name), stub);
            }
            official.register(name);
        }
        for (name, dist_version, stub) in self.entrypoints {
            index.install(&name, &dist_version, stub);
        }

        let catalog = Arc::new(PluginCatalog::new(
            official,
            EntrypointSource::new(index.clone()),
        ));
        let cache = RegistryCache::new(catalog.clone());

        let mut config = Config::new();
        if let Some(enabled) = self.enabled {
            config.set(PLUGINS_KEY, serde_json::json!(enabled));
        }

        TestHarness {
            catalog,
            cache,
            loader,
            index,
            config,
        }
    }
}

/// A complete registry stack over mock collaborators.
#[derive(Debug)]
pub struct TestHarness {
    pub catalog: Arc<PluginCatalog>,
    pub cache: RegistryCache,
    pub loader: Arc<MockModuleLoader>,
    pub index: Arc<MockPackageIndex>,
    pub config: Config,
}

impl TestHarness {
    /// Create a builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Enable `name` in the harness configuration.
    pub fn enable(&mut self, name: &str) -> Result<(), PatchbayError> {
        patchbay_plugin::enable(&self.catalog, &mut self.config, name)
    }

    /// Disable `name` in the harness configuration.
    pub fn disable(&mut self, name: &str) -> Result<(), PatchbayError> {
        patchbay_plugin::disable(&mut self.config, name)
    }

    /// The registry for the current harness configuration.
    pub fn registry(&self) -> Result<Arc<PluginRegistry>, PatchbayError> {
        self.cache.instance(&self.config)
    }

    /// Enabled-plugin names, as stored in the configuration.
    pub fn enabled_names(&self) -> Vec<String> {
        self.config
            .enabled_plugins()
            .map(|names| names.into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
