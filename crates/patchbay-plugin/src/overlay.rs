// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Merge plugin-contributed configuration into the global configuration.

use patchbay_config::Config;
use patchbay_core::PatchbayError;
use tracing::debug;

use crate::cache::RegistryCache;
use crate::registry::PluginRegistry;

/// Apply every enabled plugin's `config` attribute.
///
/// For each enabled plugin, in registry order:
/// - `add` entries are inserted under the namespaced key if absent;
/// - `defaults` entries are written to `defaults` under the namespaced key;
/// - `set` entries are inserted under the namespaced key if absent.
///
/// Values already present in `config` always win.
pub fn apply_overlays(registry: &PluginRegistry, config: &mut Config, defaults: &mut Config) {
    for plugin in registry.iter_enabled() {
        let mut added = 0usize;

        for (key, value) in plugin.config_add() {
            let key = plugin.config_key(key);
            if !config.contains_key(&key) {
                config.set(key, value.clone());
                added += 1;
            }
        }

        for (key, value) in plugin.config_defaults() {
            defaults.set(plugin.config_key(key), value.clone());
        }

        for (key, value) in plugin.config_set() {
            let key = plugin.config_key(key);
            if !config.contains_key(&key) {
                config.set(key, value.clone());
                added += 1;
            }
        }

        debug!(
            plugin = %plugin.name(),
            added,
            defaults = plugin.config_defaults().len(),
            "plugin configuration applied"
        );
    }
}

/// Resolve the registry for `config` and apply its overlays.
///
/// The registry is looked up before `config` is modified; the next cache
/// query with the modified configuration rebuilds.
pub fn load_plugin_config(
    cache: &RegistryCache,
    config: &mut Config,
    defaults: &mut Config,
) -> Result<(), PatchbayError> {
    let registry = cache.instance(config)?;
    apply_overlays(&registry, config, defaults);
    Ok(())
}
