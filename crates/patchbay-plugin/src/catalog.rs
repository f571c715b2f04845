// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog of every installed plugin, regardless of configuration.
//!
//! Official registrations are drawn first, then entry-point discoveries.
//! A name yielded once is never yielded again, so an official plugin always
//! shadows a same-named third-party package.

use std::collections::HashSet;

use patchbay_core::PatchbayError;
use tracing::warn;

use crate::descriptor::PluginDescriptor;
use crate::source::{EntrypointSource, OfficialSource, PluginSource};

/// All installed plugins, merged across sources.
#[derive(Debug)]
pub struct PluginCatalog {
    official: OfficialSource,
    entrypoints: EntrypointSource,
}

impl PluginCatalog {
    pub fn new(official: OfficialSource, entrypoints: EntrypointSource) -> Self {
        Self {
            official,
            entrypoints,
        }
    }

    /// The officially registered source, for bootstrap registration.
    pub fn official(&self) -> &OfficialSource {
        &self.official
    }

    pub fn entrypoints(&self) -> &EntrypointSource {
        &self.entrypoints
    }

    /// Sources in priority order.
    fn sources(&self) -> [&dyn PluginSource; 2] {
        [&self.official, &self.entrypoints]
    }

    /// Lazily iterate installed plugins, deduplicated by name.
    ///
    /// Every call starts a fresh discovery pass. Load failures are yielded in
    /// place and do not stop the caller from pulling further items.
    pub fn iter_installed(
        &self,
    ) -> impl Iterator<Item = Result<PluginDescriptor, PatchbayError>> + '_ {
        let mut seen = HashSet::new();
        self.sources()
            .into_iter()
            .flat_map(|source| source.iter_installed())
            .filter(move |item| match item {
                Ok(descriptor) => {
                    if seen.insert(descriptor.name().to_string()) {
                        true
                    } else {
                        warn!(
                            plugin = %descriptor.name(),
                            origin = %descriptor.origin(),
                            "plugin shadowed by an earlier source with the same name"
                        );
                        false
                    }
                }
                Err(_) => true,
            })
    }

    /// Names of every installed plugin, in discovery order.
    pub fn installed_names(&self) -> Result<Vec<String>, PatchbayError> {
        self.iter_installed()
            .map(|item| item.map(|descriptor| descriptor.name().to_string()))
            .collect()
    }

    /// True iff `name` is installed.
    ///
    /// Performs a full discovery pass; nothing is indexed between calls, so
    /// packages installed since the previous call are seen.
    pub fn is_installed(&self, name: &str) -> Result<bool, PatchbayError> {
        Ok(self.installed_names()?.iter().any(|installed| installed == name))
    }

    /// Look up a single installed plugin by name.
    pub fn get(&self, name: &str) -> Result<Option<PluginDescriptor>, PatchbayError> {
        for item in self.iter_installed() {
            let descriptor = item?;
            if descriptor.name() == name {
                return Ok(Some(descriptor));
            }
        }
        Ok(None)
    }

    /// Installed plugins whose name contains `query` (case-insensitive).
    ///
    /// An empty query returns every installed plugin.
    pub fn search(&self, query: &str) -> Result<Vec<PluginDescriptor>, PatchbayError> {
        let query_lower = query.to_lowercase();
        self.iter_installed()
            .filter(|item| match item {
                Ok(descriptor) => descriptor.name().to_lowercase().contains(&query_lower),
                Err(_) => true,
            })
            .collect()
    }
}
