// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin discovery, aggregation and enable/disable management.
//!
//! Plugins are discovered through two sources (official registrations and
//! entry-point packages), normalized into [`PluginDescriptor`]s, and merged
//! into a [`PluginRegistry`] for the plugins a configuration enables. The
//! [`RegistryCache`] keeps one registry current per configuration snapshot.

pub mod cache;
pub mod catalog;
pub mod descriptor;
pub mod discovery;
pub mod manifest;
pub mod overlay;
pub mod registry;
pub mod source;
pub mod toggle;

pub use cache::RegistryCache;
pub use catalog::PluginCatalog;
pub use descriptor::{PluginDescriptor, config_key};
pub use discovery::{DirectoryIndex, DirectoryModuleLoader, MANIFEST_FILENAME, official_names};
pub use manifest::{
    CommandSpec, ManifestPlugin, PluginManifest, load_manifest, parse_plugin_manifest,
};
pub use overlay::{apply_overlays, load_plugin_config};
pub use registry::PluginRegistry;
pub use source::{
    DescriptorIter, ENTRYPOINT_GROUP, EntrypointSource, OFFICIAL_MODULE_PREFIX, OfficialSource,
    PluginSource,
};
pub use toggle::{disable, enable, is_enabled};
