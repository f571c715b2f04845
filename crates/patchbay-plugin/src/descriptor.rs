// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalized, immutable view of one installed plugin.
//!
//! A `PluginDescriptor` is built once from a loaded [`PluginObject`]. Every
//! lazy attribute is resolved during construction and never re-invoked.

use std::path::{Path, PathBuf};

use patchbay_core::{
    ConfigMap, HookMap, PatchMap, PatchbayError, PluginCommand, PluginConfig, PluginObject,
    PluginOrigin,
};
use tracing::debug;

/// Everything one plugin contributes, independent of how it was discovered.
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    name: String,
    version: Option<String>,
    origin: PluginOrigin,
    config: PluginConfig,
    patches: PatchMap,
    hooks: HookMap,
    templates_root: Option<PathBuf>,
    command: Option<PluginCommand>,
}

impl PluginDescriptor {
    /// Build a descriptor from a loaded plugin object.
    ///
    /// Absent attributes become empty mappings (or no templates root), and an
    /// absent version stays absent. Lazy attributes are invoked here, exactly
    /// once; a failing producer is reported as a [`PatchbayError::ModuleLoad`]
    /// against `name`.
    pub fn from_object(
        name: impl Into<String>,
        version: Option<String>,
        origin: PluginOrigin,
        object: &dyn PluginObject,
    ) -> Result<Self, PatchbayError> {
        let name = name.into();

        let config = resolve(&name, object.config())?.unwrap_or_default();
        let patches = resolve(&name, object.patches())?.unwrap_or_default();
        let hooks = resolve(&name, object.hooks())?.unwrap_or_default();
        let templates_root = resolve(&name, object.templates())?;
        let command = object.command();

        debug!(
            plugin = %name,
            %origin,
            patches = patches.len(),
            hooks = hooks.len(),
            "plugin descriptor resolved"
        );

        Ok(Self {
            name,
            version,
            origin,
            config,
            patches,
            hooks,
            templates_root,
            command,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Informational version string (distribution or module version).
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn origin(&self) -> PluginOrigin {
        self.origin
    }

    /// Namespaced configuration key: the upper-cased plugin name, an
    /// underscore, then `key`.
    pub fn config_key(&self, key: &str) -> String {
        config_key(&self.name, key)
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn config_add(&self) -> &ConfigMap {
        &self.config.add
    }

    pub fn config_set(&self) -> &ConfigMap {
        &self.config.set
    }

    pub fn config_defaults(&self) -> &ConfigMap {
        &self.config.defaults
    }

    pub fn patches(&self) -> &PatchMap {
        &self.patches
    }

    pub fn hooks(&self) -> &HookMap {
        &self.hooks
    }

    pub fn templates_root(&self) -> Option<&Path> {
        self.templates_root.as_deref()
    }

    pub fn command(&self) -> Option<&PluginCommand> {
        self.command.as_ref()
    }
}

/// Namespaced configuration key for `plugin_name`.
pub fn config_key(plugin_name: &str, key: &str) -> String {
    format!("{}_{}", plugin_name.to_uppercase(), key)
}

fn resolve<T>(
    name: &str,
    attr: Option<patchbay_core::Attr<T>>,
) -> Result<Option<T>, PatchbayError> {
    attr.map(|a| a.resolve())
        .transpose()
        .map_err(|e| match e {
            err @ PatchbayError::ModuleLoad { .. } => err,
            other => PatchbayError::module_load(name, other),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchbay_core::{Attr, ConfigValue};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Minimal;
    impl PluginObject for Minimal {}

    struct Full {
        calls: Arc<AtomicUsize>,
    }

    impl PluginObject for Full {
        fn config(&self) -> Option<Attr<PluginConfig>> {
            let mut config = PluginConfig::default();
            config.add.insert("SECRET".into(), "s3cr3t".into());
            config.defaults.insert("HOST".into(), "localhost".into());
            Some(config.into())
        }

        fn patches(&self) -> Option<Attr<PatchMap>> {
            let calls = self.calls.clone();
            Some(Attr::lazy(move || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(PatchMap::from([("p1".to_string(), "content".to_string())]))
            }))
        }

        fn hooks(&self) -> Option<Attr<HookMap>> {
            let services = vec!["mysql".to_string(), "lms".to_string()];
            Some(HookMap::from([("init".to_string(), services)]).into())
        }

        fn templates(&self) -> Option<Attr<PathBuf>> {
            Some(PathBuf::from("/opt/full/templates").into())
        }

        fn command(&self) -> Option<PluginCommand> {
            Some(PluginCommand::new("full plugin", |_| Ok(())))
        }
    }

    #[test]
    fn minimal_plugin_gets_empty_contributions() {
        let desc =
            PluginDescriptor::from_object("minimal", None, PluginOrigin::Entrypoint, &Minimal)
                .unwrap();
        assert_eq!(desc.name(), "minimal");
        assert_eq!(desc.version(), None);
        assert!(desc.config().is_empty());
        assert!(desc.patches().is_empty());
        assert!(desc.hooks().is_empty());
        assert!(desc.templates_root().is_none());
        assert!(desc.command().is_none());
    }

    #[test]
    fn full_plugin_resolves_every_attribute_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let plugin = Full {
            calls: calls.clone(),
        };
        let desc = PluginDescriptor::from_object(
            "full",
            Some("2.0.0".to_string()),
            PluginOrigin::Official,
            &plugin,
        )
        .unwrap();
        assert_eq!(desc.version(), Some("2.0.0"));

        assert_eq!(
            desc.patches().get("p1").map(String::as_str),
            Some("content")
        );
        assert_eq!(desc.hooks()["init"], vec!["mysql", "lms"]);
        assert_eq!(
            desc.config_add().get("SECRET"),
            Some(&ConfigValue::from("s3cr3t"))
        );
        assert_eq!(
            desc.config_defaults().get("HOST"),
            Some(&ConfigValue::from("localhost"))
        );
        assert!(desc.config_set().is_empty());
        assert_eq!(
            desc.templates_root(),
            Some(Path::new("/opt/full/templates"))
        );
        assert_eq!(desc.command().map(|c| c.about()), Some("full plugin"));

        // Reading the descriptor again never re-invokes the producer.
        let _ = desc.patches();
        let _ = desc.clone().patches();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failing_lazy_attribute_is_module_load_error() {
        struct Broken;
        impl PluginObject for Broken {
            fn hooks(&self) -> Option<Attr<HookMap>> {
                Some(Attr::lazy(|| Err(PatchbayError::Internal("disk gone".into()))))
            }
        }

        let err = PluginDescriptor::from_object("broken", None, PluginOrigin::Entrypoint, &Broken)
            .unwrap_err();
        assert!(matches!(err, PatchbayError::ModuleLoad { ref module, .. } if module == "broken"));
        assert!(err.to_string().contains("disk gone"));
    }

    #[test]
    fn config_key_uppercases_plugin_name() {
        let desc =
            PluginDescriptor::from_object("myPlugin", None, PluginOrigin::Entrypoint, &Minimal)
                .unwrap();
        assert_eq!(desc.config_key("HOST"), "MYPLUGIN_HOST");
        assert_eq!(config_key("mfe", "DOCKER_IMAGE"), "MFE_DOCKER_IMAGE");
    }
}
