// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Completion flags in `window.localStorage`.

use guideme_engine::{FlagStore, StoreError};
use tracing::warn;
use web_sys::Storage;

/// [`FlagStore`] backed by `localStorage`. Set flags hold the string `"true"`.
///
/// Pages where storage is disabled get a store that never reports a flag and
/// fails every write, so run-once tours simply run every time.
#[derive(Debug)]
pub struct LocalStorageFlags {
    storage: Option<Storage>,
}

impl LocalStorageFlags {
    /// The current window's `localStorage`.
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage unavailable; tour completion will not persist");
        }
        Self { storage }
    }

    /// Forget `key`.
    pub fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("no localStorage".into()))
    }
}

impl Default for LocalStorageFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl FlagStore for LocalStorageFlags {
    fn is_set(&self, key: &str) -> bool {
        self.storage
            .as_ref()
            .and_then(|s| s.get_item(key).ok().flatten())
            .is_some_and(|value| !value.is_empty())
    }

    fn set(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, "true")
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }
}
