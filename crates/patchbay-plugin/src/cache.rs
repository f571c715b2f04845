// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry cache keyed by configuration snapshot.
//!
//! One registry is current at a time. [`RegistryCache::instance`] reuses it
//! while the caller's configuration is deep-equal to the snapshot it was built
//! from, and rebuilds otherwise. Rebuilds are serialized by a mutex and
//! published with an atomic pointer swap, so readers only ever observe a
//! fully built registry.

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwapOption;
use patchbay_config::Config;
use patchbay_core::PatchbayError;
use tracing::{debug, info};

use crate::catalog::PluginCatalog;
use crate::descriptor::PluginDescriptor;
use crate::registry::PluginRegistry;

/// Owned handle to the current plugin registry.
pub struct RegistryCache {
    catalog: Arc<PluginCatalog>,
    current: ArcSwapOption<PluginRegistry>,
    rebuild: Mutex<()>,
}

impl RegistryCache {
    /// Create an empty cache over `catalog`.
    pub fn new(catalog: Arc<PluginCatalog>) -> Self {
        Self {
            catalog,
            current: ArcSwapOption::empty(),
            rebuild: Mutex::new(()),
        }
    }

    pub fn catalog(&self) -> &Arc<PluginCatalog> {
        &self.catalog
    }

    /// The registry for `config`, rebuilding it if the cached snapshot differs.
    ///
    /// A failed rebuild leaves the previous registry in place.
    pub fn instance(&self, config: &Config) -> Result<Arc<PluginRegistry>, PatchbayError> {
        if let Some(registry) = self.matching(config) {
            debug!("plugin registry cache hit");
            return Ok(registry);
        }

        let _guard = self.rebuild.lock().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have rebuilt for the same snapshot while we waited.
        if let Some(registry) = self.matching(config) {
            return Ok(registry);
        }

        let registry = Arc::new(PluginRegistry::build(&self.catalog, config)?);
        info!(enabled = registry.len(), "plugin registry rebuilt");
        self.current.store(Some(Arc::clone(&registry)));
        Ok(registry)
    }

    /// The current registry, whatever configuration it was built from.
    pub fn current(&self) -> Option<Arc<PluginRegistry>> {
        self.current.load_full()
    }

    /// Drop the cached registry so the next query rebuilds.
    pub fn invalidate(&self) {
        self.current.store(None);
    }

    /// Reset to the uninitialized state: drop the cached registry and every
    /// official registration.
    ///
    /// Intended for test isolation.
    pub fn clear(&self) {
        self.invalidate();
        self.catalog.official().clear();
    }

    /// Enabled plugins for `config`.
    pub fn enabled(&self, config: &Config) -> Result<Vec<PluginDescriptor>, PatchbayError> {
        Ok(self.instance(config)?.iter_enabled().cloned().collect())
    }

    /// `(plugin, content)` pairs for `patch_name`, sorted by plugin name.
    pub fn patches(
        &self,
        config: &Config,
        patch_name: &str,
    ) -> Result<Vec<(String, String)>, PatchbayError> {
        Ok(self
            .instance(config)?
            .iter_patches(patch_name)
            .map(|(plugin, content)| (plugin.to_string(), content.to_string()))
            .collect())
    }

    /// `(plugin, services)` pairs for `hook_name`, in discovery order.
    pub fn hooks(
        &self,
        config: &Config,
        hook_name: &str,
    ) -> Result<Vec<(String, Vec<String>)>, PatchbayError> {
        Ok(self
            .instance(config)?
            .iter_hooks(hook_name)
            .map(|(plugin, services)| (plugin.to_string(), services.to_vec()))
            .collect())
    }

    /// `(plugin, templates root)` pairs, in discovery order.
    pub fn template_roots(
        &self,
        config: &Config,
    ) -> Result<Vec<(String, std::path::PathBuf)>, PatchbayError> {
        Ok(self
            .instance(config)?
            .iter_template_roots()
            .map(|(plugin, root)| (plugin.to_string(), root.to_path_buf()))
            .collect())
    }

    fn matching(&self, config: &Config) -> Option<Arc<PluginRegistry>> {
        self.current
            .load_full()
            .filter(|registry| registry.config() == config)
    }
}

impl std::fmt::Debug for RegistryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryCache")
            .field("catalog", &self.catalog)
            .field("cached", &self.current.load().is_some())
            .finish()
    }
}
