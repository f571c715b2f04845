// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enable/disable helpers for the configuration's enabled-plugin list.

use patchbay_config::{Config, PLUGINS_KEY};
use patchbay_core::{ConfigValue, PatchbayError};
use tracing::info;

use crate::catalog::PluginCatalog;

/// Add `name` to the enabled list.
///
/// Fails with [`PatchbayError::NotInstalled`] if the catalog does not provide
/// `name`, leaving `config` untouched. Enabling an already enabled plugin is
/// a no-op. The list is created if absent and kept sorted.
pub fn enable(
    catalog: &PluginCatalog,
    config: &mut Config,
    name: &str,
) -> Result<(), PatchbayError> {
    if !catalog.is_installed(name)? {
        return Err(PatchbayError::NotInstalled {
            name: name.to_string(),
        });
    }
    if config.enabled_plugins()?.contains(&name) {
        return Ok(());
    }

    let plugins = config.plugins_entry()?;
    plugins.push(ConfigValue::from(name));
    plugins.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
    info!(plugin = %name, "plugin enabled");
    Ok(())
}

/// Remove every occurrence of `name` from the enabled list.
///
/// Unlike [`enable`], this requires the [`PLUGINS_KEY`] entry to exist and
/// fails with [`PatchbayError::MissingKey`] otherwise.
pub fn disable(config: &mut Config, name: &str) -> Result<(), PatchbayError> {
    let plugins = config
        .plugins_mut()?
        .ok_or_else(|| PatchbayError::MissingKey {
            key: PLUGINS_KEY.to_string(),
        })?;
    let before = plugins.len();
    plugins.retain(|entry| entry.as_str() != Some(name));
    if plugins.len() != before {
        info!(plugin = %name, "plugin disabled");
    }
    Ok(())
}

/// True iff `name` is listed under [`PLUGINS_KEY`].
///
/// A missing or malformed list enables nothing.
pub fn is_enabled(config: &Config, name: &str) -> bool {
    config
        .enabled_plugins()
        .map(|names| names.contains(&name))
        .unwrap_or(false)
}
