// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Patchbay.
//!
//! Provides the schemaless [`Config`] mapping the plugin registry reads and
//! mutates, layered TOML + environment loading, validation of the keys
//! Patchbay owns, and miette diagnostic rendering.
//!
//! # Usage
//!
//! ```no_run
//! use patchbay_config::load_and_validate;
//!
//! let config = load_and_validate(std::path::Path::new(".")).expect("config errors");
//! println!("enabled: {:?}", config.enabled_plugins());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{
    load_config, load_config_file, load_config_from_path, load_config_from_str, save_config,
};
pub use model::{Config, PLUGINS_KEY, Settings};

/// Load the configuration under `root` and validate it.
///
/// 1. Loads config from `<root>/config.toml` + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to miette diagnostics
pub fn load_and_validate(root: &Path) -> Result<Config, Vec<ConfigError>> {
    match loader::load_config(root) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

/// Load configuration from a specific TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<Config, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}
