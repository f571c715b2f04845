// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only views of what enabled plugins contribute.

use patchbay_config::Config;
use patchbay_core::{ConfigValue, PatchbayError};

use crate::app::App;

/// Run `patchbay patches NAME`.
pub fn run_patches(
    app: &App,
    config: &Config,
    name: &str,
    separator: &str,
) -> Result<(), PatchbayError> {
    let registry = app.cache.instance(config)?;
    let rendered = registry.render_patch(name, separator);
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

/// Run `patchbay hooks NAME`: one `plugin: service service..` line per plugin.
pub fn run_hooks(app: &App, config: &Config, name: &str) -> Result<(), PatchbayError> {
    let registry = app.cache.instance(config)?;
    for (plugin, services) in registry.iter_hooks(name) {
        println!("{plugin}: {}", services.join(" "));
    }
    Ok(())
}

/// Run `patchbay config printvalue KEY`.
///
/// Looks the key up in the configuration with plugin overlays applied, then
/// in plugin defaults.
pub fn run_printvalue(app: &App, config: Config, key: &str) -> Result<(), PatchbayError> {
    let (config, defaults) = app.resolve_config(config)?;
    let value = config
        .get(key)
        .or_else(|| defaults.get(key))
        .ok_or_else(|| PatchbayError::MissingKey {
            key: key.to_string(),
        })?;
    println!("{}", format_value(value));
    Ok(())
}

/// Strings print bare; everything else prints as JSON.
fn format_value(value: &ConfigValue) -> String {
    match value {
        ConfigValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
