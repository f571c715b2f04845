// SPDX-FileCopyrightText: 2026 Patchbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock module loader for officially registered plugins.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use patchbay_core::{ModuleLoader, PatchbayError, PluginObject};

use crate::stub::StubPlugin;

/// A module loader that serves stubs from an in-memory map.
///
/// Unknown module paths fail the way a missing module would.
#[derive(Debug, Default)]
pub struct MockModuleLoader {
    modules: Mutex<HashMap<String, StubPlugin>>,
    loads: AtomicUsize,
}

impl MockModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `stub` loadable from `module_path`.
    pub fn insert(&self, module_path: impl Into<String>, stub: StubPlugin) {
        self.modules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(module_path.into(), stub);
    }

    /// Make `module_path` unloadable again.
    pub fn remove(&self, module_path: &str) {
        self.modules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(module_path);
    }

    /// Number of `load_module` calls so far, successful or not.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ModuleLoader for MockModuleLoader {
    fn load_module(&self, module_path: &str) -> Result<Box<dyn PluginObject>, PatchbayError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let modules = self.modules.lock().unwrap_or_else(PoisonError::into_inner);
        match modules.get(module_path) {
            Some(stub) => Ok(Box::new(stub.clone())),
            None => Err(PatchbayError::module_load(
                module_path,
                format!("No module named '{module_path}'"),
            )),
        }
    }
}
