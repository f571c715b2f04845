// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits for turning installed plugins into loaded objects.

use crate::error::PatchbayError;
use crate::traits::plugin::PluginObject;

/// Loads a plugin module from its conventional module path.
///
/// Used by the officially registered source, which derives the path from the
/// registered plugin name.
pub trait ModuleLoader: Send + Sync {
    /// Load the module at `module_path` (e.g. `patchbaydemo.plugin`).
    ///
    /// Returns [`PatchbayError::ModuleLoad`] if the module cannot be located.
    fn load_module(&self, module_path: &str) -> Result<Box<dyn PluginObject>, PatchbayError>;
}

/// An installed package advertising a plugin under an entry-point group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// Plugin name the entry point is registered under.
    pub name: String,
    /// Version of the distribution that owns the entry point.
    pub dist_version: String,
    /// Opaque reference the index knows how to load.
    pub reference: String,
}

/// Host package-metadata system.
///
/// Every call to [`entry_points`](PackageIndex::entry_points) is a fresh query,
/// so implementations must reflect packages installed or removed since the
/// previous call.
pub trait PackageIndex: Send + Sync {
    /// All installed entry points advertised under `group`.
    fn entry_points(&self, group: &str) -> Result<Vec<EntryPoint>, PatchbayError>;

    /// Load the object an entry point refers to.
    fn load(&self, entry_point: &EntryPoint) -> Result<Box<dyn PluginObject>, PatchbayError>;
}
