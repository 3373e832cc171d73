// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document contract between the engine and the page it guides.
//!
//! The engine never talks to a DOM directly. A [`Host`] resolves selectors to
//! target elements, measures them, and owns the nodes the engine renders into:
//! one highlight frame, one popover, and any number of hint beacons.
//!
//! Measurements are synchronous. The engine writes popover content first and
//! measures the popover afterwards in the same call, so hosts must report sizes
//! that reflect the most recent write.

use core::fmt;

use kurbo::{Point, Rect, Size, Vec2};

bitflags::bitflags! {
    /// Popover controls that are visible for the current content.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Controls: u8 {
        /// The "i of N" step counter.
        const COUNTER = 0b0000_0001;
        /// The skip button.
        const SKIP    = 0b0000_0010;
        /// The previous-step button.
        const PREV    = 0b0000_0100;
        /// The primary button ("Next", "Done" or "Got it").
        const NEXT    = 0b0000_1000;
        /// The close button in the header.
        const CLOSE   = 0b0001_0000;
    }
}

impl Controls {
    /// Controls shown for a tour step.
    pub const TOUR: Self = Self::all();
    /// Controls shown for an open hint.
    pub const HINT: Self = Self::NEXT.union(Self::CLOSE);
}

/// Step position shown in the popover footer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Counter {
    /// One-based position of the current step.
    pub current: usize,
    /// Number of steps in the tour.
    pub total: usize,
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.current, self.total)
    }
}

/// Everything the popover displays for one step or hint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopoverContent<'a> {
    /// Header title.
    pub title: &'a str,
    /// Body text.
    pub body: &'a str,
    /// Step counter; `None` when [`Controls::COUNTER`] is not shown.
    pub counter: Option<Counter>,
    /// Visible controls.
    pub controls: Controls,
    /// Whether the previous-step button accepts clicks.
    pub prev_enabled: bool,
    /// Label of the primary button.
    pub primary_label: &'static str,
}

/// Where the popover goes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PopoverPlacement {
    /// Top-left corner at this document-space point.
    At(Point),
    /// Centered in the viewport, used when the target cannot be found.
    Centered,
}

/// A document the engine can guide the user through.
///
/// Implementations own every node the engine creates. The engine calls
/// [`Host::mount_overlay`] once when it is constructed and
/// [`Host::unmount_overlay`] when it is destroyed.
pub trait Host {
    /// A resolved host element.
    type Target: Clone + fmt::Debug;
    /// An engine-owned hint marker node.
    type Beacon: fmt::Debug;

    /// Find the element addressed by `selector`.
    fn resolve(&self, selector: &str) -> Option<Self::Target>;

    /// Bounding rectangle of `target` relative to the viewport.
    fn client_rect(&self, target: &Self::Target) -> Rect;

    /// Current document scroll offset.
    fn scroll_offset(&self) -> Vec2;

    /// Current viewport size.
    fn viewport_size(&self) -> Size;

    /// Scroll the document so `target` sits in the middle of the viewport.
    fn scroll_into_view(&mut self, target: &Self::Target);

    /// Create the highlight frame and popover nodes.
    fn mount_overlay(&mut self);

    /// Remove the highlight frame and popover nodes.
    fn unmount_overlay(&mut self);

    /// Show the highlight frame over `rect` (document coordinates).
    fn show_frame(&mut self, rect: Rect);

    /// Hide the highlight frame.
    fn hide_frame(&mut self);

    /// Replace the popover's text and control state.
    fn write_popover(&mut self, content: &PopoverContent<'_>);

    /// Size of the popover as currently laid out.
    fn popover_size(&self) -> Size;

    /// Position and show the popover.
    fn place_popover(&mut self, placement: PopoverPlacement);

    /// Hide the popover.
    fn hide_popover(&mut self);

    /// Create a beacon for hint `index` with its top-left corner at `origin`.
    ///
    /// Clicks on the beacon must reach the engine as
    /// [`ClickTarget::Beacon`](crate::router::ClickTarget::Beacon) with the same index.
    /// Returns `None` if the node could not be created.
    fn create_beacon(&mut self, index: usize, origin: Point) -> Option<Self::Beacon>;

    /// Hide a beacon without removing it.
    fn hide_beacon(&mut self, beacon: &Self::Beacon);

    /// Remove a beacon from the document.
    fn remove_beacon(&mut self, beacon: Self::Beacon);
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn counter_reads_as_position_of_total() {
        let counter = Counter {
            current: 2,
            total: 5,
        };
        assert_eq!(counter.to_string(), "2 of 5");
    }

    #[test]
    fn hint_controls_are_a_subset_of_tour_controls() {
        assert!(Controls::TOUR.contains(Controls::HINT));
        assert!(!Controls::HINT.contains(Controls::PREV));
        assert!(!Controls::HINT.contains(Controls::COUNTER));
    }
}
