// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model for Patchbay.
//!
//! The configuration is a schemaless mapping from upper-case keys to values.
//! The only key the registry owns is [`PLUGINS_KEY`]; plugin-contributed keys
//! live under `PLUGINNAME_KEY` namespaces.

use std::path::PathBuf;

use patchbay_core::{ConfigMap, ConfigValue, PatchbayError};
use serde::{Deserialize, Serialize};

/// Key holding the sorted list of enabled plugin names.
pub const PLUGINS_KEY: &str = "PLUGINS";

/// A configuration snapshot.
///
/// `Clone` is a deep copy and `PartialEq` is deep equality, which is what the
/// registry cache compares against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(ConfigMap);

impl Config {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigValue> {
        self.0.get_mut(key)
    }

    /// Insert a value, returning the previous one.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.0.iter()
    }

    /// Borrow the underlying mapping.
    pub fn as_map(&self) -> &ConfigMap {
        &self.0
    }

    /// Names listed under [`PLUGINS_KEY`], in stored order.
    ///
    /// A missing key is an empty list. A value that is not a list of strings
    /// is a [`PatchbayError::Config`] error.
    pub fn enabled_plugins(&self) -> Result<Vec<&str>, PatchbayError> {
        match self.0.get(PLUGINS_KEY) {
            None => Ok(Vec::new()),
            Some(value) => plugin_names(value),
        }
    }

    /// Mutable access to the [`PLUGINS_KEY`] list, if present.
    pub fn plugins_mut(&mut self) -> Result<Option<&mut Vec<ConfigValue>>, PatchbayError> {
        match self.0.get_mut(PLUGINS_KEY) {
            None => Ok(None),
            Some(ConfigValue::Array(items)) => Ok(Some(items)),
            Some(other) => Err(not_a_list(other)),
        }
    }

    /// Mutable access to the [`PLUGINS_KEY`] list, creating it if absent.
    pub fn plugins_entry(&mut self) -> Result<&mut Vec<ConfigValue>, PatchbayError> {
        let value = self
            .0
            .entry(PLUGINS_KEY.to_string())
            .or_insert_with(|| ConfigValue::Array(Vec::new()));
        match value {
            ConfigValue::Array(items) => Ok(items),
            other => Err(not_a_list(other)),
        }
    }
}

impl From<ConfigMap> for Config {
    fn from(map: ConfigMap) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, ConfigValue)> for Config {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn plugin_names(value: &ConfigValue) -> Result<Vec<&str>, PatchbayError> {
    let ConfigValue::Array(items) = value else {
        return Err(not_a_list(value));
    };
    items
        .iter()
        .map(|item| {
            item.as_str().ok_or_else(|| {
                PatchbayError::Config(format!(
                    "{PLUGINS_KEY} entries must be strings, found `{item}`"
                ))
            })
        })
        .collect()
}

fn not_a_list(value: &ConfigValue) -> PatchbayError {
    PatchbayError::Config(format!(
        "{PLUGINS_KEY} must be a list of plugin names, found `{value}`"
    ))
}

/// Process-level settings: where the project lives and where plugins are
/// installed.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Project root holding `config.toml`.
    pub root: PathBuf,

    /// Directories scanned for entry-point plugins (`*/plugin.toml`).
    pub plugin_dirs: Vec<PathBuf>,

    /// Directory holding officially registered plugin modules.
    pub official_dir: PathBuf,

    /// Logging level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Settings {
    /// Settings rooted at `root`, with plugin directories under it and under
    /// the XDG data directory.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut plugin_dirs = vec![root.join("plugins")];
        if let Some(data_dir) = dirs::data_dir() {
            plugin_dirs.push(data_dir.join("patchbay/plugins"));
        }
        Self {
            official_dir: root.join("official"),
            plugin_dirs,
            root,
            log_level: default_log_level(),
        }
    }

    /// Path of the project configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(crate::loader::CONFIG_FILENAME)
    }
}

impl Default for Settings {
    fn default() -> Self {
        let root = dirs::data_dir()
            .map(|d| d.join("patchbay"))
            .unwrap_or_else(|| PathBuf::from(".patchbay"));
        Self::for_root(root)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
