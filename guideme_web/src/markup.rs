// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class names, data attributes and click classification for the DOM overlay.
//!
//! Every node an engine creates carries `data-guideme-instance` with the engine's
//! instance number and `data-guideme-part` naming its role. Beacons additionally
//! carry `data-guideme-beacon` with their hint index, and popover controls carry
//! `data-action`. Click classification only looks at these attributes, so it is
//! independent of the DOM and is tested natively.
//!
//! The page supplies the stylesheet. It is expected to show `.guideme-popover`
//! only while it has the [`ACTIVE_CLASS`], and to position the frame, popover and
//! beacons absolutely in document coordinates.

use guideme_engine::router::{ClickTarget, Control};

/// Class of the highlight frame.
pub const FRAME_CLASS: &str = "guideme-highlight-helper";
/// Class of the popover.
pub const POPOVER_CLASS: &str = "guideme-popover";
/// Class of a hint beacon.
pub const BEACON_CLASS: &str = "guideme-hint-beacon";
/// Class toggled on the popover while it is shown.
pub const ACTIVE_CLASS: &str = "active";

/// Instance number of the engine owning a node.
pub const INSTANCE_ATTR: &str = "data-guideme-instance";
/// Role of an engine node: [`PART_FRAME`], [`PART_POPOVER`] or [`PART_BEACON`].
pub const PART_ATTR: &str = "data-guideme-part";
/// Hint index of a beacon.
pub const BEACON_ATTR: &str = "data-guideme-beacon";
/// Popover control name.
pub const ACTION_ATTR: &str = "data-action";

/// [`PART_ATTR`] value of the highlight frame.
pub const PART_FRAME: &str = "frame";
/// [`PART_ATTR`] value of the popover.
pub const PART_POPOVER: &str = "popover";
/// [`PART_ATTR`] value of a beacon.
pub const PART_BEACON: &str = "beacon";

/// Inner markup of the popover. Text is filled in through `textContent`.
pub const POPOVER_HTML: &str = r#"
<div class="guideme-header">
  <h3 class="guideme-title"></h3>
  <button class="guideme-close" data-action="close" aria-label="Close">&times;</button>
</div>
<div class="guideme-body"></div>
<div class="guideme-footer">
  <span class="guideme-steps-count"></span>
  <div class="guideme-buttons">
    <button class="guideme-btn guideme-btn-text" data-action="skip">Skip</button>
    <button class="guideme-btn guideme-btn-secondary" data-action="prev">Prev</button>
    <button class="guideme-btn guideme-btn-primary" data-action="next">Next</button>
  </div>
</div>
"#;

/// The GuideMe attributes of one element on a click's path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeTags {
    /// Value of [`INSTANCE_ATTR`].
    pub instance: Option<String>,
    /// Value of [`PART_ATTR`].
    pub part: Option<String>,
    /// Value of [`BEACON_ATTR`].
    pub beacon: Option<String>,
    /// Value of [`ACTION_ATTR`].
    pub action: Option<String>,
}

impl NodeTags {
    fn is_untagged(&self) -> bool {
        self.instance.is_none() && self.part.is_none() && self.action.is_none()
    }
}

/// Map a `data-action` value to a popover control.
pub fn control_from_action(action: &str) -> Option<Control> {
    match action {
        "close" => Some(Control::Close),
        "skip" => Some(Control::Skip),
        "prev" => Some(Control::Prev),
        "next" => Some(Control::Next),
        _ => None,
    }
}

/// Classify a click for engine `instance`.
///
/// `path` lists the tags of the clicked element and then each ancestor, innermost
/// first. The first engine-owned node decides: a beacon, or a popover in which
/// the innermost recognized action picks the control. Nodes of other instances
/// count as outside, except their beacons, which are reported as
/// [`ClickTarget::OtherBeacon`].
pub fn classify<I>(instance: &str, path: I) -> ClickTarget
where
    I: IntoIterator<Item = NodeTags>,
{
    let mut control = None;
    for tags in path {
        if tags.is_untagged() {
            continue;
        }
        let own = tags.instance.as_deref() == Some(instance);
        match tags.part.as_deref() {
            Some(PART_BEACON) if own => {
                return tags
                    .beacon
                    .as_deref()
                    .and_then(|index| index.parse().ok())
                    .map_or(ClickTarget::Outside, ClickTarget::Beacon);
            }
            Some(PART_BEACON) => return ClickTarget::OtherBeacon,
            Some(PART_POPOVER) if own => {
                return control.map_or(ClickTarget::Popover, ClickTarget::Control);
            }
            Some(PART_POPOVER | PART_FRAME) => return ClickTarget::Outside,
            _ => {}
        }
        if control.is_none() {
            control = tags.action.as_deref().and_then(control_from_action);
        }
    }
    ClickTarget::Outside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(instance: &str, part: &str) -> NodeTags {
        NodeTags {
            instance: Some(instance.into()),
            part: Some(part.into()),
            ..NodeTags::default()
        }
    }

    fn beacon(instance: &str, index: &str) -> NodeTags {
        NodeTags {
            beacon: Some(index.into()),
            ..node(instance, PART_BEACON)
        }
    }

    fn button(action: &str) -> NodeTags {
        NodeTags {
            action: Some(action.into()),
            ..NodeTags::default()
        }
    }

    fn plain() -> NodeTags {
        NodeTags::default()
    }

    #[test]
    fn untagged_paths_are_outside() {
        assert_eq!(classify("1", [plain(), plain()]), ClickTarget::Outside);
        assert_eq!(classify("1", Vec::<NodeTags>::new()), ClickTarget::Outside);
    }

    #[test]
    fn own_beacons_report_their_index() {
        assert_eq!(classify("1", [beacon("1", "3"), plain()]), ClickTarget::Beacon(3));
        assert_eq!(classify("1", [beacon("2", "3")]), ClickTarget::OtherBeacon);
        assert_eq!(classify("1", [beacon("1", "x")]), ClickTarget::Outside);
    }

    #[test]
    fn popover_controls() {
        let path = |action| [plain(), button(action), plain(), node("1", PART_POPOVER), plain()];
        assert_eq!(classify("1", path("next")), ClickTarget::Control(Control::Next));
        assert_eq!(classify("1", path("prev")), ClickTarget::Control(Control::Prev));
        assert_eq!(classify("1", path("skip")), ClickTarget::Control(Control::Skip));
        assert_eq!(classify("1", path("close")), ClickTarget::Control(Control::Close));
        assert_eq!(classify("1", path("unknown")), ClickTarget::Popover);
        assert_eq!(
            classify("1", [plain(), node("1", PART_POPOVER)]),
            ClickTarget::Popover
        );
    }

    #[test]
    fn other_instances_popovers_are_outside() {
        let path = [button("next"), node("2", PART_POPOVER)];
        assert_eq!(classify("1", path), ClickTarget::Outside);
    }

    #[test]
    fn actions_outside_any_popover_are_ignored() {
        assert_eq!(classify("1", [button("next"), plain()]), ClickTarget::Outside);
    }

    #[test]
    fn action_names() {
        assert_eq!(control_from_action("close"), Some(Control::Close));
        assert_eq!(control_from_action("Next"), None);
    }
}
