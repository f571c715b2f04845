// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Patchbay integration tests.
//!
//! Provides in-memory plugin collaborators and a harness that wires them into
//! a catalog and registry cache, so registry behavior can be tested without
//! touching the filesystem.
//!
//! # Components
//!
//! - [`StubPlugin`] - Configurable plugin object with a lazy-resolution counter
//! - [`MockModuleLoader`] - Module loader backed by a map of stubs
//! - [`MockPackageIndex`] - Package index with install/uninstall and query counting
//! - [`TestHarness`] - Catalog, cache and configuration assembled from the above
//! - [`PluginDirFixture`] - Temporary plugin directories with `plugin.toml` files

pub mod fixture;
pub mod harness;
pub mod mock_index;
pub mod mock_loader;
pub mod stub;

pub use fixture::PluginDirFixture;
pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_index::MockPackageIndex;
pub use mock_loader::MockModuleLoader;
pub use stub::StubPlugin;
