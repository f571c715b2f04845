// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregated view of the plugins enabled by one configuration snapshot.
//!
//! The `PluginRegistry` merges patches, hooks and template roots contributed
//! by every enabled plugin. It is immutable once built; a different
//! configuration needs a new registry (see [`RegistryCache`](crate::cache::RegistryCache)).

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use patchbay_config::Config;
use patchbay_core::{PatchbayError, PluginCommand};
use tracing::debug;

use crate::catalog::PluginCatalog;
use crate::descriptor::PluginDescriptor;

/// Enabled-plugin aggregation for one configuration snapshot.
#[derive(Debug, Clone)]
pub struct PluginRegistry {
    config: Config,
    enabled: Vec<PluginDescriptor>,
    /// patch name -> plugin name -> content; inner map keeps plugin names sorted.
    patches: HashMap<String, BTreeMap<String, String>>,
    /// hook name -> (plugin name, services) in discovery order.
    hooks: HashMap<String, Vec<(String, Vec<String>)>>,
    template_roots: Vec<(String, PathBuf)>,
}

impl PluginRegistry {
    /// Build the registry for `config`.
    ///
    /// The configuration is deep-copied so later in-place mutation of the
    /// caller's value does not alter what this registry was built from.
    /// Either every enabled plugin is aggregated or the first discovery error
    /// is returned.
    pub fn build(catalog: &PluginCatalog, config: &Config) -> Result<Self, PatchbayError> {
        let config = config.clone();
        let wanted: HashSet<String> = config
            .enabled_plugins()?
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut registry = Self {
            config,
            enabled: Vec::new(),
            patches: HashMap::new(),
            hooks: HashMap::new(),
            template_roots: Vec::new(),
        };

        for item in catalog.iter_installed() {
            let descriptor = item?;
            if wanted.contains(descriptor.name()) {
                registry.add(descriptor);
            }
        }

        debug!(
            enabled = registry.enabled.len(),
            patches = registry.patches.len(),
            hooks = registry.hooks.len(),
            "plugin registry built"
        );
        Ok(registry)
    }

    fn add(&mut self, descriptor: PluginDescriptor) {
        let plugin = descriptor.name().to_string();

        for (patch_name, content) in descriptor.patches() {
            self.patches
                .entry(patch_name.clone())
                .or_default()
                .insert(plugin.clone(), content.clone());
        }

        for (hook_name, services) in descriptor.hooks() {
            self.hooks
                .entry(hook_name.clone())
                .or_default()
                .push((plugin.clone(), services.clone()));
        }

        if let Some(root) = descriptor.templates_root()
            && !root.as_os_str().is_empty()
        {
            self.template_roots.push((plugin, root.to_path_buf()));
        }

        self.enabled.push(descriptor);
    }

    /// The configuration snapshot this registry was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Enabled plugins, in discovery order.
    pub fn iter_enabled(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.enabled.iter()
    }

    /// `(plugin, content)` pairs for `patch_name`, sorted by plugin name.
    ///
    /// Template rendering relies on this order for deterministic output when
    /// several plugins patch the same extension point.
    pub fn iter_patches<'a>(
        &'a self,
        patch_name: &str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + use<'a> {
        self.patches
            .get(patch_name)
            .into_iter()
            .flat_map(|by_plugin| by_plugin.iter().map(|(p, c)| (p.as_str(), c.as_str())))
    }

    /// Concatenate every contribution to `patch_name`, joined by `separator`.
    pub fn render_patch(&self, patch_name: &str, separator: &str) -> String {
        self.iter_patches(patch_name)
            .map(|(_, content)| content)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// `(plugin, services)` pairs for `hook_name`, in discovery order.
    pub fn iter_hooks<'a>(
        &'a self,
        hook_name: &str,
    ) -> impl Iterator<Item = (&'a str, &'a [String])> + use<'a> {
        self.hooks
            .get(hook_name)
            .into_iter()
            .flat_map(|entries| entries.iter().map(|(p, s)| (p.as_str(), s.as_slice())))
    }

    /// `(plugin, templates root)` pairs, in discovery order.
    pub fn iter_template_roots(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.template_roots
            .iter()
            .map(|(plugin, root)| (plugin.as_str(), root.as_path()))
    }

    /// `(plugin, command)` pairs for enabled plugins that contribute one.
    pub fn iter_commands(&self) -> impl Iterator<Item = (&str, &PluginCommand)> {
        self.enabled
            .iter()
            .filter_map(|d| d.command().map(|command| (d.name(), command)))
    }

    /// Names of every patch with at least one contribution, sorted.
    pub fn patch_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.patches.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of every hook with at least one contribution, sorted.
    pub fn hook_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}
