// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary project roots with filesystem-installed plugins.

use std::path::{Path, PathBuf};

use patchbay_core::PatchbayError;
use patchbay_plugin::MANIFEST_FILENAME;
use tempfile::TempDir;

/// A temporary project root laid out the way the CLI expects:
/// `<root>/plugins/<dir>/plugin.toml` for entry-point plugins and
/// `<root>/official/<prefix><name>/plugin.toml` for official ones.
///
/// The directory is removed when the fixture is dropped.
#[derive(Debug)]
pub struct PluginDirFixture {
    dir: TempDir,
}

impl PluginDirFixture {
    pub fn new() -> Result<Self, PatchbayError> {
        let dir = TempDir::new().map_err(|e| PatchbayError::Internal(e.to_string()))?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.root().join("plugins")
    }

    pub fn official_dir(&self) -> PathBuf {
        self.root().join("official")
    }

    /// Write `<root>/plugins/<dir>/plugin.toml`, returning the plugin directory.
    pub fn add_plugin(&self, dir: &str, manifest: &str) -> Result<PathBuf, PatchbayError> {
        write_manifest(&self.plugins_dir().join(dir), manifest)
    }

    /// Write `<root>/official/<package>/plugin.toml`, returning the plugin directory.
    pub fn add_official(&self, package: &str, manifest: &str) -> Result<PathBuf, PatchbayError> {
        write_manifest(&self.official_dir().join(package), manifest)
    }

    /// Write `<root>/config.toml`.
    pub fn write_config(&self, content: &str) -> Result<PathBuf, PatchbayError> {
        let path = self.root().join("config.toml");
        std::fs::write(&path, content).map_err(|e| PatchbayError::Internal(e.to_string()))?;
        Ok(path)
    }

    /// Minimal manifest body for `name` at `version`.
    pub fn manifest(name: &str, version: &str) -> String {
        format!("[plugin]\nname = \"{name}\"\nversion = \"{version}\"\n")
    }
}

fn write_manifest(plugin_dir: &Path, manifest: &str) -> Result<PathBuf, PatchbayError> {
    let io = |e: std::io::Error| PatchbayError::Internal(e.to_string());
    std::fs::create_dir_all(plugin_dir).map_err(io)?;
    std::fs::write(plugin_dir.join(MANIFEST_FILENAME), manifest).map_err(io)?;
    Ok(plugin_dir.to_path_buf())
}
