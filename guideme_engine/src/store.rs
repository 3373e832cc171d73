// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Durable completion flags.
//!
//! A flag store is a string-keyed set of booleans. The engine reads one key when a
//! run-once tour starts and writes it when that tour ends. Keys follow
//! [`Options::completion_key`](crate::Options::completion_key).

use alloc::borrow::ToOwned;
use alloc::string::String;
#[cfg(feature = "std")]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::fs;
#[cfg(feature = "std")]
use std::path::{Path, PathBuf};

use hashbrown::HashSet;

use crate::error::StoreError;

/// A string-keyed boolean flag store.
pub trait FlagStore {
    /// Whether `key` has been set.
    fn is_set(&self, key: &str) -> bool;

    /// Set `key`.
    fn set(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Flags kept in memory for the lifetime of the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryFlags {
    set: HashSet<String>,
}

impl MemoryFlags {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with `keys` already set.
    pub fn with_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            set: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl FlagStore for MemoryFlags {
    fn is_set(&self, key: &str) -> bool {
        self.set.contains(key)
    }

    fn set(&mut self, key: &str) -> Result<(), StoreError> {
        self.set.insert(key.to_owned());
        Ok(())
    }
}

/// Flags persisted as a JSON object in a file, rewritten on every change.
///
/// A missing file is an empty store; the file is created on the first write.
/// A flag only counts as set once the file holding it has been written.
#[cfg(feature = "std")]
#[derive(Clone, Debug)]
pub struct JsonFileFlags {
    path: PathBuf,
    flags: BTreeMap<String, bool>,
}

#[cfg(feature = "std")]
impl JsonFileFlags {
    /// Open the store at `path`, loading existing flags.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let flags = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, flags })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(feature = "std")]
impl FlagStore for JsonFileFlags {
    fn is_set(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    fn set(&mut self, key: &str) -> Result<(), StoreError> {
        if self.is_set(key) {
            return Ok(());
        }
        let mut flags = self.flags.clone();
        flags.insert(key.to_owned(), true);
        let bytes = serde_json::to_vec_pretty(&flags)?;
        fs::write(&self.path, bytes)?;
        self.flags = flags;
        Ok(())
    }
}
