// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin sources: the installation mechanisms plugins are discovered through.
//!
//! Two sources exist. [`OfficialSource`] holds names registered explicitly at
//! startup and loads each from a conventional module path.
//! [`EntrypointSource`] queries the package index for every package
//! advertising the plugin entry-point group.

use std::sync::{Arc, PoisonError, RwLock};

use patchbay_core::{EntryPoint, ModuleLoader, PackageIndex, PatchbayError, PluginOrigin};
use tracing::debug;

use crate::descriptor::PluginDescriptor;

/// Entry-point group advertised by installable plugin packages.
///
/// Versioned so a future stable plugin API can move to `v1` alongside it.
pub const ENTRYPOINT_GROUP: &str = "patchbay.plugin.v0";

/// Prefix of the module path official plugins are loaded from.
pub const OFFICIAL_MODULE_PREFIX: &str = "patchbay";

/// Lazy sequence of descriptors produced by a source.
pub type DescriptorIter<'a> =
    Box<dyn Iterator<Item = Result<PluginDescriptor, PatchbayError>> + 'a>;

/// A mechanism through which plugins are installed.
pub trait PluginSource: Send + Sync {
    /// The origin stamped on every descriptor this source yields.
    fn origin(&self) -> PluginOrigin;

    /// Lazily load every plugin installed through this source.
    ///
    /// Nothing is loaded until the iterator is advanced, and each call starts
    /// a fresh discovery pass.
    fn iter_installed(&self) -> DescriptorIter<'_>;
}

/// Officially registered plugins.
///
/// Registration is an explicit, append-only bootstrap step. Each registered
/// name is loaded from `"<prefix><name>.plugin"` when iterated; a module
/// that cannot be located fails the iteration with
/// [`PatchbayError::ModuleLoad`]. A module without a version is still
/// installed, with no version on its descriptor.
pub struct OfficialSource {
    installed: RwLock<Vec<String>>,
    loader: Arc<dyn ModuleLoader>,
    prefix: String,
}

impl OfficialSource {
    /// Create a source with no registrations, using the default module prefix.
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self {
            installed: RwLock::new(Vec::new()),
            loader,
            prefix: OFFICIAL_MODULE_PREFIX.to_string(),
        }
    }

    /// Override the module path prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Append a plugin name to the registrations.
    pub fn register(&self, name: impl Into<String>) {
        let name = name.into();
        debug!(plugin = %name, "official plugin registered");
        self.installed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(name);
    }

    /// Registered names, in registration order.
    pub fn registered(&self) -> Vec<String> {
        self.installed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop every registration.
    pub fn clear(&self) {
        self.installed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Conventional module path for `name`.
    pub fn module_path(&self, name: &str) -> String {
        format!("{}{}.plugin", self.prefix, name)
    }

    fn load(&self, name: &str) -> Result<PluginDescriptor, PatchbayError> {
        let module_path = self.module_path(name);
        let module = self.loader.load_module(&module_path)?;
        // The version is informational only; a module without one still loads.
        PluginDescriptor::from_object(
            name,
            module.version(),
            PluginOrigin::Official,
            module.as_ref(),
        )
    }
}

impl PluginSource for OfficialSource {
    fn origin(&self) -> PluginOrigin {
        PluginOrigin::Official
    }

    fn iter_installed(&self) -> DescriptorIter<'_> {
        let names = self.registered();
        Box::new(names.into_iter().map(move |name| self.load(&name)))
    }
}

impl std::fmt::Debug for OfficialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfficialSource")
            .field("installed", &self.registered())
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// Plugins discovered through the package index.
pub struct EntrypointSource {
    index: Arc<dyn PackageIndex>,
    group: String,
}

impl EntrypointSource {
    /// Discover plugins advertised under [`ENTRYPOINT_GROUP`].
    pub fn new(index: Arc<dyn PackageIndex>) -> Self {
        Self::with_group(index, ENTRYPOINT_GROUP)
    }

    /// Discover plugins advertised under a custom group.
    pub fn with_group(index: Arc<dyn PackageIndex>, group: impl Into<String>) -> Self {
        Self {
            index,
            group: group.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    fn load(&self, entry_point: &EntryPoint) -> Result<PluginDescriptor, PatchbayError> {
        debug!(
            plugin = %entry_point.name,
            reference = %entry_point.reference,
            "loading entry point"
        );
        let object = self.index.load(entry_point)?;
        PluginDescriptor::from_object(
            &entry_point.name,
            Some(entry_point.dist_version.clone()),
            PluginOrigin::Entrypoint,
            object.as_ref(),
        )
    }
}

impl PluginSource for EntrypointSource {
    fn origin(&self) -> PluginOrigin {
        PluginOrigin::Entrypoint
    }

    fn iter_installed(&self) -> DescriptorIter<'_> {
        // The index is queried on first pull, not when the iterator is created.
        let query = std::iter::once_with(move || self.index.entry_points(&self.group));
        Box::new(query.flat_map(move |result| {
            let items: DescriptorIter<'_> = match result {
                Ok(entry_points) => {
                    Box::new(entry_points.into_iter().map(move |ep| self.load(&ep)))
                }
                Err(err) => Box::new(std::iter::once(Err(err))),
            };
            items
        }))
    }
}

impl std::fmt::Debug for EntrypointSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntrypointSource")
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}
