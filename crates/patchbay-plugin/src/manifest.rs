// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest parsing from `plugin.toml` files.
//!
//! A manifest describes a filesystem-installed plugin: its identity, the
//! entry-point group it advertises, and its config, patches, hooks,
//! templates and command contributions.

use std::path::{Path, PathBuf};
use std::process::Command;

use patchbay_core::{
    Attr, HookMap, PatchMap, PatchbayError, PluginCommand, PluginConfig, PluginObject,
};
use serde::{Deserialize, Serialize};

use crate::source::ENTRYPOINT_GROUP;

/// Parsed plugin manifest. Relative paths are already resolved against the
/// manifest's directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Unique name of the plugin (e.g., "mfe", "discovery").
    pub name: String,
    /// Semantic version string.
    pub version: String,
    /// Human-readable description.
    pub description: Option<String>,
    /// Entry-point group the plugin advertises.
    pub entry_point: String,
    /// Root directory of the plugin's templates.
    pub templates: Option<PathBuf>,
    /// Directory holding one file per patch, named after the patch.
    pub patches_dir: Option<PathBuf>,
    /// Configuration contributions.
    pub config: PluginConfig,
    /// Inline patches.
    pub patches: PatchMap,
    /// Lifecycle hooks.
    pub hooks: HookMap,
    /// Command-line entry point.
    pub command: Option<CommandSpec>,
}

/// The `[command]` section: an external program run with the user's arguments appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    #[serde(default)]
    pub about: String,
    pub exec: Vec<String>,
}

/// Intermediate TOML deserialization struct for `plugin.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginManifestFile {
    plugin: PluginSection,
    #[serde(default)]
    config: PluginConfig,
    #[serde(default)]
    patches: PatchMap,
    #[serde(default)]
    hooks: HookMap,
    command: Option<CommandSpec>,
}

/// The `[plugin]` section of a `plugin.toml` file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginSection {
    name: String,
    version: String,
    description: Option<String>,
    entry_point: Option<String>,
    templates: Option<PathBuf>,
    patches_dir: Option<PathBuf>,
}

/// Parse a plugin manifest from TOML content.
///
/// `path` is the manifest's location, used for error messages and to
/// resolve relative directories. Validates that the name is a non-empty
/// identifier (it becomes a config key prefix), that the version is valid
/// semver, and that a declared command has a program to run.
pub fn parse_plugin_manifest(
    toml_content: &str,
    path: &Path,
) -> Result<PluginManifest, PatchbayError> {
    let invalid = |message: String| PatchbayError::Manifest {
        path: path.to_path_buf(),
        message,
    };

    let file: PluginManifestFile =
        toml::from_str(toml_content).map_err(|e| invalid(e.to_string()))?;
    let section = file.plugin;

    if section.name.is_empty() {
        return Err(invalid("name must not be empty".to_string()));
    }
    if !section
        .name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(invalid(format!(
            "name `{}` may only contain ASCII letters, digits, '-' and '_'",
            section.name
        )));
    }

    if section.version.is_empty() {
        return Err(invalid("version must not be empty".to_string()));
    }
    semver::Version::parse(&section.version)
        .map_err(|e| invalid(format!("version `{}` is not valid semver: {e}", section.version)))?;

    if let Some(command) = &file.command
        && command.exec.is_empty()
    {
        return Err(invalid("command.exec must name a program".to_string()));
    }

    let base = path.parent().unwrap_or_else(|| Path::new("."));

    Ok(PluginManifest {
        name: section.name,
        version: section.version,
        description: section.description,
        entry_point: section
            .entry_point
            .unwrap_or_else(|| ENTRYPOINT_GROUP.to_string()),
        templates: section.templates.map(|dir| base.join(dir)),
        patches_dir: section.patches_dir.map(|dir| base.join(dir)),
        config: file.config,
        patches: file.patches,
        hooks: file.hooks,
        command: file.command,
    })
}

/// Read and parse the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<PluginManifest, PatchbayError> {
    let content = std::fs::read_to_string(path).map_err(|e| PatchbayError::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_plugin_manifest(&content, path)
}

/// Read every regular, non-hidden file in `dir` as a patch named after the file.
pub fn read_patches_dir(dir: &Path) -> Result<PatchMap, PatchbayError> {
    let unreadable = |e: std::io::Error| PatchbayError::Manifest {
        path: dir.to_path_buf(),
        message: format!("cannot read patches: {e}"),
    };

    let mut patches = PatchMap::new();
    for entry in std::fs::read_dir(dir).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') || !path.is_file() {
            continue;
        }
        let content = std::fs::read_to_string(&path).map_err(unreadable)?;
        patches.insert(name.to_string(), content);
    }
    Ok(patches)
}

/// A plugin object backed by a parsed manifest.
#[derive(Debug, Clone)]
pub struct ManifestPlugin {
    manifest: PluginManifest,
}

impl ManifestPlugin {
    pub fn new(manifest: PluginManifest) -> Self {
        Self { manifest }
    }

    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }
}

impl PluginObject for ManifestPlugin {
    fn config(&self) -> Option<Attr<PluginConfig>> {
        (!self.manifest.config.is_empty()).then(|| self.manifest.config.clone().into())
    }

    fn patches(&self) -> Option<Attr<PatchMap>> {
        let inline = self.manifest.patches.clone();
        match self.manifest.patches_dir.clone() {
            // Patch files are read when the descriptor is built, not at parse time.
            Some(dir) => Some(Attr::lazy(move || {
                let mut patches = inline;
                patches.extend(read_patches_dir(&dir)?);
                Ok(patches)
            })),
            None if inline.is_empty() => None,
            None => Some(inline.into()),
        }
    }

    fn hooks(&self) -> Option<Attr<HookMap>> {
        (!self.manifest.hooks.is_empty()).then(|| self.manifest.hooks.clone().into())
    }

    fn templates(&self) -> Option<Attr<PathBuf>> {
        self.manifest.templates.clone().map(Attr::Value)
    }

    fn command(&self) -> Option<PluginCommand> {
        let spec = self.manifest.command.clone()?;
        let about = if spec.about.is_empty() {
            format!("Run the {} plugin command", self.manifest.name)
        } else {
            spec.about.clone()
        };
        Some(PluginCommand::new(about, move |args| run_exec(&spec.exec, args)))
    }

    fn version(&self) -> Option<String> {
        Some(self.manifest.version.clone())
    }
}

fn run_exec(exec: &[String], args: &[String]) -> Result<(), PatchbayError> {
    let (program, fixed) = exec
        .split_first()
        .ok_or_else(|| PatchbayError::Internal("plugin command has no program".to_string()))?;
    let status = Command::new(program)
        .args(fixed)
        .args(args)
        .status()
        .map_err(|e| PatchbayError::Internal(format!("failed to run `{program}`: {e}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(PatchbayError::Internal(format!("`{program}` exited with {status}")))
    }
}
