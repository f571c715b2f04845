// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The capability interface a loaded plugin object exposes.
//!
//! Every attribute is optional. Absence is the normal case for a minimal
//! plugin, so all methods default to `None`.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::PatchbayError;
use crate::types::{HookMap, PatchMap, PluginConfig};

/// Deferred attribute producer, invoked with no arguments.
pub type LazyAttr<T> = Box<dyn FnOnce() -> Result<T, PatchbayError> + Send>;

/// An attribute value, either given directly or produced on demand.
///
/// Lazy attributes are resolved exactly once, when the plugin descriptor is
/// built. They are never invoked again afterwards.
pub enum Attr<T> {
    Value(T),
    Lazy(LazyAttr<T>),
}

impl<T> Attr<T> {
    /// Wrap a zero-argument producer.
    pub fn lazy<F>(producer: F) -> Self
    where
        F: FnOnce() -> Result<T, PatchbayError> + Send + 'static,
    {
        Attr::Lazy(Box::new(producer))
    }

    /// Consume the attribute, invoking the producer if there is one.
    pub fn resolve(self) -> Result<T, PatchbayError> {
        match self {
            Attr::Value(value) => Ok(value),
            Attr::Lazy(producer) => producer(),
        }
    }
}

impl<T> From<T> for Attr<T> {
    fn from(value: T) -> Self {
        Attr::Value(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Attr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Attr::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

type CommandFn = dyn Fn(&[String]) -> Result<(), PatchbayError> + Send + Sync;

/// Opaque command-line entry point contributed by a plugin.
///
/// Stored as-is on the descriptor and never invoked by the registry itself.
#[derive(Clone)]
pub struct PluginCommand {
    about: String,
    run: Arc<CommandFn>,
}

impl PluginCommand {
    pub fn new<F>(about: impl Into<String>, run: F) -> Self
    where
        F: Fn(&[String]) -> Result<(), PatchbayError> + Send + Sync + 'static,
    {
        Self {
            about: about.into(),
            run: Arc::new(run),
        }
    }

    /// One-line description shown in command listings.
    pub fn about(&self) -> &str {
        &self.about
    }

    /// Run the command with the remaining command-line arguments.
    pub fn run(&self, args: &[String]) -> Result<(), PatchbayError> {
        (self.run)(args)
    }
}

impl fmt::Debug for PluginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginCommand")
            .field("about", &self.about)
            .finish_non_exhaustive()
    }
}

/// A loaded plugin object.
///
/// Implementations are produced by a [`ModuleLoader`](crate::traits::ModuleLoader)
/// or a [`PackageIndex`](crate::traits::PackageIndex) and are consumed once to
/// build an immutable descriptor.
pub trait PluginObject: Send + Sync {
    /// Configuration contributed under the plugin's key namespace.
    fn config(&self) -> Option<Attr<PluginConfig>> {
        None
    }

    /// Template patches, keyed by patch name.
    fn patches(&self) -> Option<Attr<PatchMap>> {
        None
    }

    /// Lifecycle hooks, keyed by hook name.
    fn hooks(&self) -> Option<Attr<HookMap>> {
        None
    }

    /// Root directory of the plugin's own templates.
    fn templates(&self) -> Option<Attr<PathBuf>> {
        None
    }

    /// Command-line entry point, surfaced as a subcommand named after the plugin.
    fn command(&self) -> Option<PluginCommand> {
        None
    }

    /// Module-level version attribute.
    fn version(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn value_attr_resolves_to_itself() {
        let attr: Attr<u32> = 7.into();
        assert_eq!(attr.resolve().unwrap(), 7);
    }

    #[test]
    fn lazy_attr_invokes_producer_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let attr = Attr::lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(String::from("resolved"))
        });
        assert_eq!(attr.resolve().unwrap(), "resolved");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn lazy_attr_propagates_errors() {
        let attr: Attr<PatchMap> =
            Attr::lazy(|| Err(PatchbayError::module_load("demo.plugin", "boom")));
        let err = attr.resolve().unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn default_plugin_object_exposes_nothing() {
        struct Empty;
        impl PluginObject for Empty {}

        let plugin = Empty;
        assert!(plugin.config().is_none());
        assert!(plugin.patches().is_none());
        assert!(plugin.hooks().is_none());
        assert!(plugin.templates().is_none());
        assert!(plugin.command().is_none());
        assert!(plugin.version().is_none());
    }

    #[test]
    fn command_runs_callback_with_args() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let command = PluginCommand::new("demo", move |args| {
            counter.store(args.len(), Ordering::SeqCst);
            Ok(())
        });
        command
            .run(&["a".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(command.about(), "demo");
    }
}
