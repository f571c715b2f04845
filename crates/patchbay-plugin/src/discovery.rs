// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem-backed collaborators.
//!
//! [`DirectoryIndex`] treats every `<root>/<dir>/plugin.toml` as an installed
//! package advertising one entry point. [`DirectoryModuleLoader`] resolves
//! official module paths to manifests under a single directory.

use std::path::{Path, PathBuf};

use patchbay_core::{EntryPoint, ModuleLoader, PackageIndex, PatchbayError, PluginObject};
use tracing::{debug, warn};

use crate::manifest::{ManifestPlugin, load_manifest};

/// File name every plugin directory must contain.
pub const MANIFEST_FILENAME: &str = "plugin.toml";

/// Package index over one or more plugin directories.
///
/// Holds no state beyond its roots: every query rescans the filesystem, so
/// plugins added or removed between two queries are reflected immediately.
#[derive(Debug, Clone, Default)]
pub struct DirectoryIndex {
    roots: Vec<PathBuf>,
}

impl DirectoryIndex {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Manifest paths directly under `root`, sorted by directory name.
    fn manifests_in(root: &Path) -> Result<Vec<PathBuf>, PatchbayError> {
        let entries = match std::fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(PatchbayError::Discovery {
                    message: format!("cannot read plugin directory {}", root.display()),
                    source: Some(Box::new(e)),
                });
            }
        };

        let mut manifests: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path().join(MANIFEST_FILENAME))
            .filter(|path| path.is_file())
            .collect();
        manifests.sort();
        Ok(manifests)
    }
}

impl PackageIndex for DirectoryIndex {
    fn entry_points(&self, group: &str) -> Result<Vec<EntryPoint>, PatchbayError> {
        let mut entry_points = Vec::new();
        for root in &self.roots {
            for path in Self::manifests_in(root)? {
                let manifest = match load_manifest(&path) {
                    Ok(manifest) => manifest,
                    Err(e) => {
                        warn!(
                            path = %path.display(),
                            error = %e,
                            "skipping unreadable plugin manifest"
                        );
                        continue;
                    }
                };
                if manifest.entry_point != group {
                    continue;
                }
                entry_points.push(EntryPoint {
                    name: manifest.name,
                    dist_version: manifest.version,
                    reference: path.display().to_string(),
                });
            }
        }
        debug!(group, count = entry_points.len(), "plugin directories scanned");
        Ok(entry_points)
    }

    fn load(&self, entry_point: &EntryPoint) -> Result<Box<dyn PluginObject>, PatchbayError> {
        let manifest = load_manifest(Path::new(&entry_point.reference))?;
        Ok(Box::new(ManifestPlugin::new(manifest)))
    }
}

/// Resolves `"<package>.plugin"` module paths to `<root>/<package>/plugin.toml`.
#[derive(Debug, Clone)]
pub struct DirectoryModuleLoader {
    root: PathBuf,
}

impl DirectoryModuleLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ModuleLoader for DirectoryModuleLoader {
    fn load_module(&self, module_path: &str) -> Result<Box<dyn PluginObject>, PatchbayError> {
        let package = module_path
            .strip_suffix(".plugin")
            .ok_or_else(|| PatchbayError::module_load(module_path, "not a plugin module path"))?;
        let path = self.root.join(package).join(MANIFEST_FILENAME);
        if !path.is_file() {
            return Err(PatchbayError::module_load(
                module_path,
                format!("No module named '{module_path}'"),
            ));
        }
        let manifest =
            load_manifest(&path).map_err(|e| PatchbayError::module_load(module_path, e))?;
        Ok(Box::new(ManifestPlugin::new(manifest)))
    }
}

/// Names of the official plugins laid out under `dir`.
///
/// Every `<dir>/<prefix><name>/plugin.toml` yields `<name>`, sorted. A missing
/// directory has no official plugins.
pub fn official_names(dir: &Path, prefix: &str) -> Result<Vec<String>, PatchbayError> {
    let mut names: Vec<String> = DirectoryIndex::manifests_in(dir)?
        .iter()
        .filter_map(|manifest| manifest.parent()?.file_name()?.to_str())
        .filter_map(|package| package.strip_prefix(prefix))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    names.sort();
    Ok(names)
}
