// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Patchbay plugin registry.
//!
//! This crate provides the error taxonomy, shared value types, and the
//! traits through which plugin objects and their loaders plug into the
//! registry. Discovery and aggregation live in `patchbay-plugin`.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PatchbayError;
pub use types::{ConfigMap, ConfigValue, HookMap, PatchMap, PluginConfig, PluginOrigin};

pub use traits::{
    Attr, EntryPoint, LazyAttr, ModuleLoader, PackageIndex, PluginCommand, PluginObject,
};
