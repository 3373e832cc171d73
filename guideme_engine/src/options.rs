// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Prefix of the durable completion flag key.
pub const COMPLETION_KEY_PREFIX: &str = "guideme_tour";

/// Tour id used when the caller does not pick one.
pub const DEFAULT_TOUR_ID: &str = "default-tour";

/// Engine options.
///
/// JSON field names are camelCase and every field is optional:
///
/// ```rust
/// use guideme_engine::Options;
///
/// let options = Options::from_json(r#"{ "runOnce": true, "tourId": "dashboard-v1" }"#).unwrap();
/// assert!(options.persist_hints);
/// assert_eq!(options.completion_key(), "guideme_tour_dashboard-v1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Whether a hint stays clickable after it has been opened.
    pub persist_hints: bool,
    /// Whether a completed or skipped tour is suppressed on later starts.
    pub run_once: bool,
    /// Namespace of the durable completion flag.
    pub tour_id: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            persist_hints: true,
            run_once: false,
            tour_id: DEFAULT_TOUR_ID.to_owned(),
        }
    }
}

impl Options {
    /// Parse options from a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Key of the durable completion flag for this tour.
    pub fn completion_key(&self) -> String {
        format!("{COMPLETION_KEY_PREFIX}_{}", self.tour_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert!(options.persist_hints);
        assert!(!options.run_once);
        assert_eq!(options.completion_key(), "guideme_tour_default-tour");
    }

    #[test]
    fn empty_object_matches_defaults() {
        assert_eq!(Options::from_json("{}").unwrap(), Options::default());
    }

    #[test]
    fn camel_case_fields() {
        let options =
            Options::from_json(r#"{ "persistHints": false, "runOnce": true, "tourId": "t1" }"#)
                .unwrap();
        assert!(!options.persist_hints);
        assert!(options.run_once);
        assert_eq!(options.completion_key(), "guideme_tour_t1");
    }

    #[test]
    fn wrong_types_are_rejected() {
        let err = Options::from_json(r#"{ "runOnce": "yes" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
