// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process bootstrap: the catalog and registry cache every command runs against.

use std::sync::Arc;

use patchbay_config::{Config, ConfigError, Settings};
use patchbay_core::PatchbayError;
use patchbay_plugin::{
    DirectoryIndex, DirectoryModuleLoader, EntrypointSource, OFFICIAL_MODULE_PREFIX,
    OfficialSource, PluginCatalog, RegistryCache, load_plugin_config, official_names,
};
use tracing::debug;

/// Everything a command needs, built once at startup.
#[derive(Debug)]
pub struct App {
    pub settings: Settings,
    pub catalog: Arc<PluginCatalog>,
    pub cache: RegistryCache,
}

impl App {
    /// Register official plugins found under the official directory and
    /// index the plugin directories.
    pub fn new(settings: Settings) -> Result<Self, PatchbayError> {
        let loader = DirectoryModuleLoader::new(&settings.official_dir);
        let official = OfficialSource::new(Arc::new(loader));
        for name in official_names(&settings.official_dir, OFFICIAL_MODULE_PREFIX)? {
            official.register(name);
        }
        debug!(
            official = official.registered().len(),
            plugin_dirs = settings.plugin_dirs.len(),
            "plugin sources ready"
        );

        let index = DirectoryIndex::new(settings.plugin_dirs.clone());
        let catalog = Arc::new(PluginCatalog::new(
            official,
            EntrypointSource::new(Arc::new(index)),
        ));
        let cache = RegistryCache::new(catalog.clone());

        Ok(Self {
            settings,
            catalog,
            cache,
        })
    }

    /// The project configuration file alone, without environment overrides.
    pub fn load_config_file(&self) -> Result<Config, PatchbayError> {
        patchbay_config::load_config_file(&self.settings.config_path())
            .map_err(|e| PatchbayError::Config(e.to_string()))
    }

    pub fn save_config(&self, config: &Config) -> Result<(), PatchbayError> {
        patchbay_config::save_config(&self.settings.config_path(), config)
    }

    /// `config` with every enabled plugin's overlays applied, plus the
    /// plugin defaults that sit underneath it.
    pub fn resolve_config(&self, mut config: Config) -> Result<(Config, Config), PatchbayError> {
        let mut defaults = Config::new();
        load_plugin_config(&self.cache, &mut config, &mut defaults)?;
        Ok((config, defaults))
    }

    /// Print `err` to stderr, with a suggestion for misspelled plugin names.
    pub fn report(&self, err: &PatchbayError) {
        match err {
            PatchbayError::NotInstalled { name } => {
                let installed = self.catalog.installed_names().unwrap_or_default();
                let installed: Vec<&str> = installed.iter().map(String::as_str).collect();
                patchbay_config::render_errors(&[ConfigError::unknown_plugin(name, &installed)]);
            }
            other => eprintln!("patchbay: {other}"),
        }
    }
}
