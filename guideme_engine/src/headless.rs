// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simulated document for hosts without a DOM.
//!
//! [`HeadlessPage`] keeps named element rectangles in document space plus a
//! viewport and scroll offset, and records everything the engine renders into it.
//! It backs the engine's tests and the demos, and works as a host for native
//! front ends that lay out their own widgets and only need the guidance logic.
//!
//! ```rust
//! use guideme_engine::{Engine, HeadlessPage, MemoryFlags, Options, Step};
//! use kurbo::{Rect, Size};
//!
//! let page = HeadlessPage::new(Size::new(1024.0, 768.0))
//!     .with_element("#a", Rect::from_origin_size((100.0, 100.0), (50.0, 20.0)));
//! let steps = vec![Step::new("#a", "First", "The first thing.")];
//!
//! let mut engine = Engine::new(page, MemoryFlags::new(), steps, Options::default());
//! engine.start(false);
//!
//! let popover = &engine.host().overlay().unwrap().popover;
//! assert_eq!(popover.counter.as_deref(), Some("1 of 1"));
//! assert_eq!(popover.primary_label, "Done");
//! ```

use alloc::borrow::ToOwned;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use guideme_placement::centered_in_viewport;
use kurbo::{Point, Rect, Size, Vec2};

use crate::host::{Controls, Host, PopoverContent, PopoverPlacement};
use crate::router::ClickTarget;

/// Popover size reported until [`HeadlessPage::set_popover_size`] or
/// [`HeadlessPage::set_popover_measure`] is called.
pub const DEFAULT_POPOVER_SIZE: Size = Size::new(300.0, 150.0);

/// Side length of the square hit area of a beacon.
pub const BEACON_SIZE: f64 = 20.0;

/// Handle of a beacon created by a [`HeadlessPage`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BeaconId(u64);

/// A beacon as rendered into the page.
#[derive(Clone, Debug, PartialEq)]
pub struct BeaconView {
    /// Handle returned to the engine.
    pub id: BeaconId,
    /// Hint index the beacon opens.
    pub index: usize,
    /// Document-space top-left corner.
    pub origin: Point,
    /// Whether the beacon is shown.
    pub visible: bool,
}

/// The popover as rendered into the page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopoverView {
    /// Whether the popover is shown.
    pub visible: bool,
    /// Header title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Counter text, when the counter is shown.
    pub counter: Option<String>,
    /// Visible controls.
    pub controls: Controls,
    /// Whether the previous-step button is enabled.
    pub prev_enabled: bool,
    /// Label of the primary button.
    pub primary_label: String,
    /// Last placement.
    pub placement: Option<PopoverPlacement>,
}

/// The singleton frame and popover.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayView {
    /// Document-space frame rectangle while the frame is shown.
    pub frame: Option<Rect>,
    /// Popover state.
    pub popover: PopoverView,
}

/// A simulated document.
#[derive(Clone, Debug)]
pub struct HeadlessPage {
    elements: BTreeMap<String, Rect>,
    viewport: Size,
    content: Option<Size>,
    scroll: Vec2,
    popover_size: Size,
    measure: Option<fn(&PopoverView) -> Size>,
    overlay: Option<OverlayView>,
    overlay_mounts: usize,
    beacons: Vec<BeaconView>,
    next_beacon: u64,
}

impl HeadlessPage {
    /// An empty page with the given viewport.
    pub fn new(viewport: Size) -> Self {
        Self {
            elements: BTreeMap::new(),
            viewport,
            content: None,
            scroll: Vec2::ZERO,
            popover_size: DEFAULT_POPOVER_SIZE,
            measure: None,
            overlay: None,
            overlay_mounts: 0,
            beacons: Vec::new(),
            next_beacon: 0,
        }
    }

    /// Add an element addressed by `selector` at a document-space rectangle.
    #[must_use]
    pub fn with_element(mut self, selector: impl Into<String>, rect: Rect) -> Self {
        self.insert_element(selector, rect);
        self
    }

    /// Fix the scrollable content size instead of deriving it from the elements.
    #[must_use]
    pub fn with_content_size(mut self, content: Size) -> Self {
        self.content = Some(content);
        self
    }

    /// Add or move an element.
    pub fn insert_element(&mut self, selector: impl Into<String>, rect: Rect) {
        self.elements.insert(selector.into(), rect);
    }

    /// Remove an element, as if the page had dropped it.
    pub fn remove_element(&mut self, selector: &str) -> Option<Rect> {
        self.elements.remove(selector)
    }

    /// Change the viewport size. Call [`Engine::handle`](crate::Engine::handle)
    /// with [`Event::Resize`](crate::router::Event::Resize) afterwards.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Set the scroll offset.
    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.scroll = scroll;
    }

    /// Set the size the popover reports when measured.
    pub fn set_popover_size(&mut self, size: Size) {
        self.popover_size = size;
        self.measure = None;
    }

    /// Measure the popover from its current content, like a browser laying out text.
    ///
    /// `measure` sees the popover as last written. It replaces any fixed size.
    pub fn set_popover_measure(&mut self, measure: fn(&PopoverView) -> Size) {
        self.measure = Some(measure);
    }

    /// Scrollable content size: the fixed size, or the extent of all elements and the viewport.
    pub fn content_size(&self) -> Size {
        if let Some(content) = self.content {
            return content;
        }
        self.elements.values().fold(self.viewport, |size, rect| {
            Size::new(size.width.max(rect.x1), size.height.max(rect.y1))
        })
    }

    /// The frame and popover, while mounted.
    pub fn overlay(&self) -> Option<&OverlayView> {
        self.overlay.as_ref()
    }

    /// How many times the overlay has been mounted.
    pub fn overlay_mounts(&self) -> usize {
        self.overlay_mounts
    }

    /// Live beacons in creation order.
    pub fn beacons(&self) -> &[BeaconView] {
        &self.beacons
    }

    /// Total number of beacons ever created.
    pub fn beacons_created(&self) -> u64 {
        self.next_beacon
    }

    /// Document-space rectangle of the popover while it is shown.
    pub fn popover_rect(&self) -> Option<Rect> {
        let popover = &self.overlay.as_ref()?.popover;
        if !popover.visible {
            return None;
        }
        let size = Host::popover_size(self);
        let origin = match popover.placement? {
            PopoverPlacement::At(origin) => origin,
            PopoverPlacement::Centered => centered_in_viewport(size, self.viewport) + self.scroll,
        };
        Some(Rect::from_origin_size(origin, size))
    }

    /// Classify a click at a document-space point.
    ///
    /// Visible beacons are on top, then the popover. Controls are not laid out, so
    /// any point inside the popover reports [`ClickTarget::Popover`].
    pub fn hit_test(&self, point: Point) -> ClickTarget {
        let beacon = self.beacons.iter().rev().find(|b| {
            b.visible && Rect::from_origin_size(b.origin, (BEACON_SIZE, BEACON_SIZE)).contains(point)
        });
        if let Some(beacon) = beacon {
            return ClickTarget::Beacon(beacon.index);
        }
        if self.popover_rect().is_some_and(|r| r.contains(point)) {
            return ClickTarget::Popover;
        }
        ClickTarget::Outside
    }
}

impl Host for HeadlessPage {
    type Target = String;
    type Beacon = BeaconId;

    fn resolve(&self, selector: &str) -> Option<String> {
        self.elements
            .contains_key(selector)
            .then(|| selector.to_owned())
    }

    fn client_rect(&self, target: &String) -> Rect {
        self.elements
            .get(target)
            .map_or(Rect::ZERO, |rect| *rect - self.scroll)
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn scroll_into_view(&mut self, target: &String) {
        if let Some(rect) = self.elements.get(target) {
            self.scroll = guideme_placement::centered_scroll(
                *rect,
                self.scroll,
                self.viewport,
                self.content_size(),
            );
        }
    }

    fn mount_overlay(&mut self) {
        if self.overlay.is_none() {
            self.overlay = Some(OverlayView::default());
            self.overlay_mounts += 1;
        }
    }

    fn unmount_overlay(&mut self) {
        self.overlay = None;
    }

    fn show_frame(&mut self, rect: Rect) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.frame = Some(rect);
        }
    }

    fn hide_frame(&mut self) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.frame = None;
        }
    }

    fn write_popover(&mut self, content: &PopoverContent<'_>) {
        if let Some(overlay) = self.overlay.as_mut() {
            let popover = &mut overlay.popover;
            popover.title = content.title.to_owned();
            popover.body = content.body.to_owned();
            popover.counter = content.counter.map(|c| c.to_string());
            popover.controls = content.controls;
            popover.prev_enabled = content.prev_enabled;
            popover.primary_label = content.primary_label.to_owned();
        }
    }

    fn popover_size(&self) -> Size {
        match (self.measure, self.overlay.as_ref()) {
            (Some(measure), Some(overlay)) => measure(&overlay.popover),
            _ => self.popover_size,
        }
    }

    fn place_popover(&mut self, placement: PopoverPlacement) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.popover.placement = Some(placement);
            overlay.popover.visible = true;
        }
    }

    fn hide_popover(&mut self) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.popover.visible = false;
        }
    }

    fn create_beacon(&mut self, index: usize, origin: Point) -> Option<BeaconId> {
        let id = BeaconId(self.next_beacon);
        self.next_beacon += 1;
        self.beacons.push(BeaconView {
            id,
            index,
            origin,
            visible: true,
        });
        Some(id)
    }

    fn hide_beacon(&mut self, beacon: &BeaconId) {
        if let Some(view) = self.beacons.iter_mut().find(|b| b.id == *beacon) {
            view.visible = false;
        }
    }

    fn remove_beacon(&mut self, beacon: BeaconId) {
        self.beacons.retain(|b| b.id != beacon);
    }
}
