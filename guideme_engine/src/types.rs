// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tour steps and hints.

use alloc::string::String;
use alloc::vec::Vec;

use guideme_placement::Side;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One entry of a tour, or (as [`Hint`]) one independently addressable hint.
///
/// The JSON shape matches the browser API:
///
/// ```rust
/// use guideme_engine::parse_steps;
/// use guideme_placement::Side;
///
/// let steps = parse_steps(r##"[
///     { "element": "#sidebar", "title": "Navigation", "position": "right" },
///     { "element": "#header", "description": "Profile and settings." }
/// ]"##).unwrap();
///
/// assert_eq!(steps[0].position, Side::Right);
/// assert_eq!(steps[1].position, Side::Bottom);
/// assert_eq!(steps[1].title, "");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Selector identifying the host element this entry points at.
    pub element: String,
    /// Popover title.
    #[serde(default)]
    pub title: String,
    /// Popover body text.
    #[serde(default)]
    pub description: String,
    /// Preferred side of the popover. Unknown names fall back to bottom.
    #[serde(default, with = "side_name")]
    pub position: Side,
}

/// A hint has the same shape as a tour step; its identity is its list position.
pub type Hint = Step;

impl Step {
    /// Create an entry targeting `element`, placed below it.
    pub fn new(
        element: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            element: element.into(),
            title: title.into(),
            description: description.into(),
            position: Side::Bottom,
        }
    }

    /// Set the preferred popover side.
    #[must_use]
    pub fn with_position(mut self, position: Side) -> Self {
        self.position = position;
        self
    }

    /// Check the parts of this entry that can be checked without a document.
    ///
    /// `index` is the entry's position in its list and is echoed in the error.
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.element.trim().is_empty() {
            return Err(ConfigError::BlankSelector { index });
        }
        Ok(())
    }
}

/// Parse a JSON array of steps or hints.
pub fn parse_steps(json: &str) -> Result<Vec<Step>, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

mod side_name {
    use alloc::string::String;

    use guideme_placement::Side;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(side: &Side, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(side.as_str())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Side, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name.map_or(Side::Bottom, |name| Side::parse(&name)))
    }
}
