// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Patchbay plugin registry.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across plugin discovery, aggregation and
/// configuration mutation.
#[derive(Debug, Error)]
pub enum PatchbayError {
    /// A plugin was requested by name but no installed source provides it.
    #[error("plugin '{name}' is not installed.")]
    NotInstalled { name: String },

    /// The backing module of an officially registered plugin could not be
    /// loaded, or one of its lazily-resolved attributes failed.
    #[error("failed to load plugin module '{module}': {message}")]
    ModuleLoad { module: String, message: String },

    /// A configuration key required by the operation is absent.
    #[error("missing configuration key `{key}`")]
    MissingKey { key: String },

    /// A configuration value has an unexpected shape.
    #[error("configuration error: {0}")]
    Config(String),

    /// A `plugin.toml` manifest could not be parsed or validated.
    #[error("invalid plugin manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// The package index could not be queried.
    #[error("plugin discovery failed: {message}")]
    Discovery {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PatchbayError {
    /// Shorthand for a [`PatchbayError::ModuleLoad`] error.
    pub fn module_load(module: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::ModuleLoad {
            module: module.into(),
            message: message.to_string(),
        }
    }
}
