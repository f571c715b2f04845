// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin object and loader traits.

pub mod loader;
pub mod plugin;

pub use loader::{EntryPoint, ModuleLoader, PackageIndex};
pub use plugin::{Attr, LazyAttr, PluginCommand, PluginObject};
