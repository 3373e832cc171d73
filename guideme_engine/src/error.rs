// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised at the configuration and storage seams.
//!
//! Engine operations never return these: they are reported by the parsing helpers
//! and by [`FlagStore`](crate::store::FlagStore) implementations, and the engine
//! turns storage failures into warnings.

use alloc::string::String;
#[cfg(feature = "std")]
use std::io;

use thiserror::Error;

/// Problems found while reading steps, hints or options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An entry has an empty or whitespace-only target selector.
    #[error("entry {index} has a blank target selector")]
    BlankSelector {
        /// Position of the entry in its list.
        index: usize,
    },
    /// The JSON input could not be decoded.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of a durable flag store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[cfg(feature = "std")]
    #[error("flag store I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The backing file does not hold a JSON object of flags.
    #[error("flag store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The host storage is missing or refused the operation.
    #[error("flag store unavailable: {0}")]
    Unavailable(String),
}
