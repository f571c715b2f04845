// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `patchbay plugins` command implementations and plugin command dispatch.

use patchbay_config::Config;
use patchbay_core::PatchbayError;
use patchbay_plugin::{PluginDescriptor, disable, enable, is_enabled};

use crate::app::App;

/// Run `patchbay plugins list`.
///
/// Prints one line per installed plugin, enabled or not.
pub fn run_list(app: &App, config: &Config) -> Result<(), PatchbayError> {
    let mut rows = Vec::new();
    for item in app.catalog.iter_installed() {
        let descriptor = item?;
        rows.push(format_row(&descriptor, is_enabled(config, descriptor.name())));
    }
    if rows.is_empty() {
        println!("No plugins installed.");
    }
    for row in rows {
        println!("{row}");
    }
    Ok(())
}

fn format_row(descriptor: &PluginDescriptor, enabled: bool) -> String {
    let status = if enabled { "enabled" } else { "installed" };
    format!(
        "{:<24} {:<12} {:<10} {}",
        descriptor.name(),
        descriptor.version().unwrap_or("unknown"),
        status,
        descriptor.origin()
    )
}

/// Run `patchbay plugins enable NAME..`.
///
/// Every name is checked before the configuration is written, so one
/// unknown name leaves the file untouched.
pub fn run_enable(app: &App, names: &[String]) -> Result<(), PatchbayError> {
    let mut config = app.load_config_file()?;
    for name in names {
        enable(&app.catalog, &mut config, name)?;
    }
    app.save_config(&config)?;
    for name in names {
        println!("Plugin {name} enabled");
    }
    Ok(())
}

/// Run `patchbay plugins disable NAME..`.
pub fn run_disable(app: &App, names: &[String]) -> Result<(), PatchbayError> {
    let mut config = app.load_config_file()?;
    let mut disabled = Vec::new();
    for name in names {
        if is_enabled(&config, name) {
            disabled.push(name.as_str());
        }
        disable(&mut config, name)?;
    }
    app.save_config(&config)?;
    for name in disabled {
        println!("Plugin {name} disabled");
    }
    Ok(())
}

/// Run `patchbay plugins printroot NAME`.
pub fn run_printroot(app: &App, name: &str) -> Result<(), PatchbayError> {
    let descriptor = app
        .catalog
        .get(name)?
        .ok_or_else(|| PatchbayError::NotInstalled {
            name: name.to_string(),
        })?;
    match descriptor.templates_root() {
        Some(root) => println!("{}", root.display()),
        None => println!(),
    }
    Ok(())
}

/// Run `patchbay <plugin> [ARGS..]` through an enabled plugin's command.
pub fn run_external(app: &App, config: &Config, args: &[String]) -> Result<(), PatchbayError> {
    let Some((name, rest)) = args.split_first() else {
        return Err(PatchbayError::Internal("no command given".to_string()));
    };
    let registry = app.cache.instance(config)?;
    let mut available = Vec::new();
    for (plugin, command) in registry.iter_commands() {
        if plugin == name.as_str() {
            return command.run(rest);
        }
        available.push(plugin);
    }
    let hint = if available.is_empty() {
        "no enabled plugin provides a command".to_string()
    } else {
        format!("enabled plugin commands: {}", available.join(", "))
    };
    Err(PatchbayError::Config(format!(
        "unrecognized command `{name}` ({hint})"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchbay_core::{PluginObject, PluginOrigin};

    struct Bare;
    impl PluginObject for Bare {}

    #[test]
    fn row_shows_status_and_origin() {
        let descriptor = PluginDescriptor::from_object(
            "mfe",
            Some("1.2.0".to_string()),
            PluginOrigin::Entrypoint,
            &Bare,
        )
        .unwrap();
        let row = format_row(&descriptor, true);
        assert!(row.starts_with("mfe "));
        assert!(row.contains("1.2.0"));
        assert!(row.contains("enabled"));
        assert!(row.ends_with("entrypoint"));
        assert!(format_row(&descriptor, false).contains("installed"));
    }

    #[test]
    fn row_marks_missing_version() {
        let descriptor =
            PluginDescriptor::from_object("legacy", None, PluginOrigin::Official, &Bare).unwrap();
        assert!(format_row(&descriptor, false).contains("unknown"));
    }
}
