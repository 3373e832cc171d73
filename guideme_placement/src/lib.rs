// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GuideMe Placement: geometry for highlight frames, popovers and hint beacons.
//!
//! Every function in this crate is pure. Inputs are the target's bounding rectangle
//! as reported by the host (relative to the viewport, like `getBoundingClientRect`),
//! the current scroll offset of the document, and, for popovers, the measured
//! popover size. Outputs are in absolute document coordinates, so a host must
//! recompute placement after any resize or scroll instead of nudging old results.
//!
//! ## Popover placement
//!
//! The popover sits [`SPACING`] units away from the target on the preferred [`Side`]
//! and is centered on the other axis. The horizontal coordinate is then clamped so
//! the popover keeps an [`EDGE_MARGIN`] from both viewport edges. The vertical
//! coordinate is never clamped: a popover for a target near the top or bottom of
//! the page may run off screen.
//!
//! ```rust
//! use kurbo::{Point, Rect, Size, Vec2};
//! use guideme_placement::{Side, popover_origin};
//!
//! let target = Rect::from_origin_size((100.0, 100.0), (50.0, 20.0));
//! let popover = Size::new(200.0, 80.0);
//!
//! let origin = popover_origin(target, Vec2::ZERO, popover, Side::Bottom, 1024.0);
//! assert_eq!(origin, Point::new(25.0, 135.0));
//! ```
//!
//! ## Highlight frame and beacons
//!
//! - [`frame_rect`] wraps the target with [`FRAME_PADDING`] on every side.
//! - [`beacon_origin`] anchors a hint beacon [`BEACON_OFFSET`] up and left of the
//!   target's top-left corner.
//!
//! ## Viewport helpers
//!
//! [`centered_scroll`] and [`centered_in_viewport`] cover the parts of placement a
//! browser normally does itself (`scrollIntoView({block: "center"})` and CSS
//! centering), for hosts that simulate a document.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for `kurbo`'s float math.
//!
//! This crate is `no_std`.

#![no_std]

mod viewport;

pub use viewport::{centered_in_viewport, centered_scroll};

use core::fmt;

use kurbo::{Point, Rect, Size, Vec2};

/// Gap between the target and the popover on the preferred side.
pub const SPACING: f64 = 15.0;

/// Padding between the target and the highlight frame on every side.
pub const FRAME_PADDING: f64 = 5.0;

/// Minimum distance kept between the popover and the left/right viewport edges.
pub const EDGE_MARGIN: f64 = 10.0;

/// Distance a hint beacon sits up and left of its target's top-left corner.
pub const BEACON_OFFSET: f64 = 10.0;

/// Side of the target on which the popover is placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the target, horizontally centered.
    Top,
    /// Below the target, horizontally centered.
    #[default]
    Bottom,
    /// Before the target, vertically centered.
    Left,
    /// After the target, vertically centered.
    Right,
}

impl Side {
    /// Parse a side name such as `"top"`.
    ///
    /// Names are matched exactly. Anything that is not one of the four lowercase
    /// names, including `"Top"` or `" left"`, falls back to [`Side::Bottom`].
    pub fn parse(name: &str) -> Self {
        match name {
            "top" => Self::Top,
            "left" => Self::Left,
            "right" => Self::Right,
            _ => Self::Bottom,
        }
    }

    /// The lowercase name of this side.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translate a viewport-relative rectangle into document coordinates.
pub fn document_rect(client: Rect, scroll: Vec2) -> Rect {
    client + scroll
}

/// Document-space rectangle of the highlight frame around `client`.
///
/// The frame is the target grown by [`FRAME_PADDING`] on each side, so it is
/// `2 * FRAME_PADDING` wider and taller than the target.
pub fn frame_rect(client: Rect, scroll: Vec2) -> Rect {
    document_rect(client, scroll).inflate(FRAME_PADDING, FRAME_PADDING)
}

/// Document-space top-left corner of the popover.
///
/// `client` is the target's viewport-relative rectangle, `popover` the measured
/// popover size and `viewport_width` the width used for the horizontal clamp.
pub fn popover_origin(
    client: Rect,
    scroll: Vec2,
    popover: Size,
    side: Side,
    viewport_width: f64,
) -> Point {
    let target = document_rect(client, scroll);
    let center = target.center();

    let (left, top) = match side {
        Side::Top => (
            center.x - popover.width / 2.0,
            target.y0 - popover.height - SPACING,
        ),
        Side::Bottom => (center.x - popover.width / 2.0, target.y1 + SPACING),
        Side::Left => (
            target.x0 - popover.width - SPACING,
            center.y - popover.height / 2.0,
        ),
        Side::Right => (target.x1 + SPACING, center.y - popover.height / 2.0),
    };

    Point::new(clamp_left(left, popover.width, viewport_width), top)
}

/// Keep a popover of `popover_width` inside the horizontal viewport margins.
///
/// The left margin is applied first and the right margin second, so when the
/// popover is wider than the viewport minus both margins the right edge wins.
pub fn clamp_left(left: f64, popover_width: f64, viewport_width: f64) -> f64 {
    let mut left = left.max(EDGE_MARGIN);
    let max_left = viewport_width - popover_width - EDGE_MARGIN;
    if left > max_left {
        left = max_left;
    }
    left
}

/// Document-space origin of the hint beacon for `client`.
pub fn beacon_origin(client: Rect, scroll: Vec2) -> Point {
    let target = document_rect(client, scroll);
    Point::new(target.x0 - BEACON_OFFSET, target.y0 - BEACON_OFFSET)
}
