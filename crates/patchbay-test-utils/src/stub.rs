// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configurable in-memory plugin object.
//!
//! `StubPlugin` implements `PluginObject` from builder-set attributes. In lazy
//! mode every attribute is handed out as a producer that bumps a shared
//! counter, so tests can assert how often attributes were resolved.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use patchbay_core::{
    Attr, ConfigValue, HookMap, PatchMap, PatchbayError, PluginCommand, PluginConfig,
    PluginObject,
};

/// A plugin object whose attributes are set by the test.
#[derive(Debug, Clone, Default)]
pub struct StubPlugin {
    version: Option<String>,
    config: Option<PluginConfig>,
    patches: Option<PatchMap>,
    hooks: Option<HookMap>,
    templates: Option<PathBuf>,
    command: Option<PluginCommand>,
    lazy: bool,
    failure: Option<String>,
    resolutions: Arc<AtomicUsize>,
}

impl StubPlugin {
    /// A plugin with no attributes and version `0.1.0`.
    pub fn new() -> Self {
        Self::default().with_version("0.1.0")
    }

    /// A plugin with no attributes at all, not even a version.
    pub fn bare() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_patch(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.patches
            .get_or_insert_with(PatchMap::new)
            .insert(name.into(), content.into());
        self
    }

    pub fn with_hook<I, S>(mut self, name: impl Into<String>, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hooks
            .get_or_insert_with(HookMap::new)
            .insert(name.into(), services.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_config_add(
        mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Self {
        self.config
            .get_or_insert_with(PluginConfig::default)
            .add
            .insert(key.into(), value.into());
        self
    }

    pub fn with_config_set(
        mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Self {
        self.config
            .get_or_insert_with(PluginConfig::default)
            .set
            .insert(key.into(), value.into());
        self
    }

    pub fn with_config_default(
        mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Self {
        self.config
            .get_or_insert_with(PluginConfig::default)
            .defaults
            .insert(key.into(), value.into());
        self
    }

    pub fn with_templates(mut self, root: impl Into<PathBuf>) -> Self {
        self.templates = Some(root.into());
        self
    }

    pub fn with_command(mut self, command: PluginCommand) -> Self {
        self.command = Some(command);
        self
    }

    /// Hand attributes out as lazy producers instead of plain values.
    pub fn lazy(mut self) -> Self {
        self.lazy = true;
        self
    }

    /// Make every lazy producer fail with `message`. Implies [`lazy`](Self::lazy).
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.lazy = true;
        self.failure = Some(message.into());
        self
    }

    /// Number of lazy producers invoked so far, across every clone.
    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }

    fn attr<T: Send + 'static>(&self, value: Option<T>) -> Option<Attr<T>> {
        let value = value?;
        if !self.lazy {
            return Some(Attr::Value(value));
        }
        let counter = Arc::clone(&self.resolutions);
        let failure = self.failure.clone();
        Some(Attr::lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            match failure {
                Some(message) => Err(PatchbayError::Internal(message)),
                None => Ok(value),
            }
        }))
    }
}

impl PluginObject for StubPlugin {
    fn config(&self) -> Option<Attr<PluginConfig>> {
        self.attr(self.config.clone())
    }

    fn patches(&self) -> Option<Attr<PatchMap>> {
        self.attr(self.patches.clone())
    }

    fn hooks(&self) -> Option<Attr<HookMap>> {
        self.attr(self.hooks.clone())
    }

    fn templates(&self) -> Option<Attr<PathBuf>> {
        self.attr(self.templates.clone())
    }

    fn command(&self) -> Option<PluginCommand> {
        self.command.clone()
    }

    fn version(&self) -> Option<String> {
        self.version.clone()
    }
}
