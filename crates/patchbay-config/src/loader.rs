// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merges `<root>/config.toml` with environment variable overrides via the
//! `PATCHBAY_` prefix, and writes configurations back as TOML.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use patchbay_core::PatchbayError;
use tracing::debug;

use crate::model::Config;

/// Name of the project configuration file under the project root.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "PATCHBAY_";

/// Load the project configuration under `root` with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults (an empty mapping)
/// 2. `<root>/config.toml`
/// 3. `PATCHBAY_*` environment variables
pub fn load_config(root: &Path) -> Result<Config, figment::Error> {
    build_figment(root).extract()
}

/// Load configuration from a TOML string only (no file or env lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<Config, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<Config, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Load only the file at `path`, without environment overrides.
///
/// This is what gets written back after enabling or disabling plugins, so
/// environment values are never persisted. A missing file is an empty
/// configuration.
pub fn load_config_file(path: &Path) -> Result<Config, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment(root: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(root.join(CONFIG_FILENAME)))
        .merge(env_provider())
}

/// Write `config` to `path` as TOML, creating parent directories.
pub fn save_config(path: &Path, config: &Config) -> Result<(), PatchbayError> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| PatchbayError::Config(format!("cannot serialize configuration: {e}")))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            PatchbayError::Config(format!("cannot create {}: {e}", parent.display()))
        })?;
    }
    std::fs::write(path, content)
        .map_err(|e| PatchbayError::Config(format!("cannot write {}: {e}", path.display())))?;
    debug!(path = %path.display(), keys = config.len(), "configuration saved");
    Ok(())
}

/// Environment provider for `PATCHBAY_*` overrides.
///
/// Keys keep their case so `PATCHBAY_PLUGINS` maps to `PLUGINS` and
/// `PATCHBAY_MYPLUGIN_HOST` maps to `MYPLUGIN_HOST`. Keys are never split on
/// underscores because plugin namespaces are themselves underscore-joined.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).lowercase(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PLUGINS_KEY;
    use serde_json::json;

    #[test]
    fn empty_string_loads_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn keys_keep_their_case() {
        let config = load_config_from_str(
            r#"
PLUGINS = ["alpha"]
ALPHA_HOST = "example.com"
"#,
        )
        .unwrap();
        assert_eq!(config.get(PLUGINS_KEY), Some(&json!(["alpha"])));
        assert_eq!(config.get("ALPHA_HOST"), Some(&json!("example.com")));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILENAME);

        let mut config = Config::new();
        config.set(PLUGINS_KEY, json!(["alpha", "beta"]));
        config.set("ALPHA_PORT", json!(8080));
        save_config(&path, &config).unwrap();

        let loaded = load_config_from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_file(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn null_values_cannot_be_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        config.set("NOTHING", json!(null));
        let err = save_config(&dir.path().join(CONFIG_FILENAME), &config).unwrap_err();
        assert!(matches!(err, PatchbayError::Config(_)));
    }
}
