// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! The configuration is schemaless, so only the keys Patchbay owns are
//! checked here.

use crate::diagnostic::ConfigError;
use crate::model::{Config, PLUGINS_KEY};
use patchbay_core::ConfigValue;

/// Validate a loaded configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &Config) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match config.get(PLUGINS_KEY) {
        None => {}
        Some(ConfigValue::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(name) if name.trim().is_empty() => {
                        errors.push(ConfigError::Validation {
                            message: format!("{PLUGINS_KEY}[{i}] must not be empty"),
                        });
                    }
                    Some(_) => {}
                    None => errors.push(ConfigError::InvalidType {
                        key: format!("{PLUGINS_KEY}[{i}]"),
                        detail: format!("found `{item}`"),
                        expected: "a plugin name string".to_string(),
                    }),
                }
            }
        }
        Some(other) => errors.push(ConfigError::InvalidType {
            key: PLUGINS_KEY.to_string(),
            detail: format!("found `{other}`"),
            expected: "a list of plugin names".to_string(),
        }),
    }

    for key in config.as_map().keys() {
        if key.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "configuration keys must not be empty".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_config_validates() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn plugin_list_validates() {
        let mut config = Config::new();
        config.set(PLUGINS_KEY, json!(["alpha", "beta"]));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn scalar_plugins_fails_validation() {
        let mut config = Config::new();
        config.set(PLUGINS_KEY, json!("alpha"));
        let errors = validate_config(&config).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key == PLUGINS_KEY))
        );
    }

    #[test]
    fn collects_every_bad_entry() {
        let mut config = Config::new();
        config.set(PLUGINS_KEY, json!(["", 5, "ok"]));
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("PLUGINS[0]"))
        ));
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key == "PLUGINS[1]"))
        );
    }
}
