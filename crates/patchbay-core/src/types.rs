// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared value types used by plugins, sources and the configuration store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A single configuration value. Configuration is schemaless, so values are
/// kept as JSON-like trees.
pub type ConfigValue = serde_json::Value;

/// Mapping of configuration key to value.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// Mapping of patch name to the content a single plugin contributes under it.
pub type PatchMap = BTreeMap<String, String>;

/// Mapping of hook name to the ordered services a single plugin runs for it.
pub type HookMap = BTreeMap<String, Vec<String>>;

/// The `config` attribute of a plugin.
///
/// Keys are unprefixed; consumers compute the namespaced key with the
/// owning plugin's `config_key`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    /// New keys added to the global configuration if absent.
    #[serde(default)]
    pub add: ConfigMap,

    /// Values that fill in keys the user has not set.
    #[serde(default)]
    pub set: ConfigMap,

    /// Default values exposed alongside the global defaults.
    #[serde(default)]
    pub defaults: ConfigMap,
}

impl PluginConfig {
    /// Returns true if the plugin contributes no configuration at all.
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.set.is_empty() && self.defaults.is_empty()
    }
}

/// The installation mechanism a plugin was discovered through.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PluginOrigin {
    /// Explicitly registered at startup and loaded from a conventional module path.
    Official,
    /// Discovered through the package index entry-point group.
    Entrypoint,
}
