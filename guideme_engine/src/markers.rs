// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hint beacons: one marker per hint, rebuilt wholesale whenever layout may have changed.
//!
//! Beacon positions are only valid for the layout they were computed in, so the
//! registry never patches individual beacons. [`MarkerRegistry::render`] removes
//! every beacon and creates a fresh set. The slot list always has one entry per
//! hint; `None` means no beacon exists for that index right now, either because
//! its target could not be found or because the hint was dismissed.

use alloc::vec::Vec;

use guideme_placement::beacon_origin;
use hashbrown::HashSet;
use smallvec::SmallVec;
use tracing::warn;

use crate::host::Host;
use crate::types::Hint;

/// Hint list, beacon slots and the set of dismissed hints.
#[derive(Debug)]
pub struct MarkerRegistry<B> {
    hints: Vec<Hint>,
    beacons: SmallVec<[Option<B>; 4]>,
    dismissed: HashSet<usize>,
}

impl<B> Default for MarkerRegistry<B> {
    fn default() -> Self {
        Self {
            hints: Vec::new(),
            beacons: SmallVec::new(),
            dismissed: HashSet::new(),
        }
    }
}

impl<B> MarkerRegistry<B> {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered hints.
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// The hint at `index`.
    pub fn hint(&self, index: usize) -> Option<&Hint> {
        self.hints.get(index)
    }

    /// Number of registered hints.
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    /// Whether no hints are registered.
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    /// Beacon slots, one per hint.
    pub fn slots(&self) -> &[Option<B>] {
        &self.beacons
    }

    /// The beacon for hint `index`, if one exists.
    pub fn beacon(&self, index: usize) -> Option<&B> {
        self.beacons.get(index).and_then(Option::as_ref)
    }

    /// Whether hint `index` was opened while hints are not persistent.
    pub fn is_dismissed(&self, index: usize) -> bool {
        self.dismissed.contains(&index)
    }

    /// Whether hint `index` currently has a live, clickable beacon.
    pub fn has_beacon(&self, index: usize) -> bool {
        self.beacon(index).is_some() && !self.is_dismissed(index)
    }

    /// Replace the hint list, forget all dismissals and rebuild the beacons.
    pub(crate) fn replace<H>(&mut self, host: &mut H, hints: Vec<Hint>)
    where
        H: Host<Beacon = B>,
    {
        self.hints = hints;
        self.dismissed.clear();
        self.render(host);
    }

    /// Remove every beacon and create one for each live hint at its current position.
    pub(crate) fn render<H>(&mut self, host: &mut H)
    where
        H: Host<Beacon = B>,
    {
        self.clear(host);

        let scroll = host.scroll_offset();
        for (index, hint) in self.hints.iter().enumerate() {
            if self.dismissed.contains(&index) {
                self.beacons.push(None);
                continue;
            }
            let Some(target) = host.resolve(&hint.element) else {
                warn!(index, selector = %hint.element, "hint target not found; no beacon");
                self.beacons.push(None);
                continue;
            };
            let origin = beacon_origin(host.client_rect(&target), scroll);
            let beacon = host.create_beacon(index, origin);
            if beacon.is_none() {
                warn!(index, selector = %hint.element, "host could not create a beacon");
            }
            self.beacons.push(beacon);
        }
    }

    /// Record hint `index` as dismissed and hide its beacon.
    pub(crate) fn dismiss<H>(&mut self, host: &mut H, index: usize)
    where
        H: Host<Beacon = B>,
    {
        self.dismissed.insert(index);
        if let Some(beacon) = self.beacons.get(index).and_then(Option::as_ref) {
            host.hide_beacon(beacon);
        }
    }

    /// Remove every beacon from the document.
    pub(crate) fn clear<H>(&mut self, host: &mut H)
    where
        H: Host<Beacon = B>,
    {
        for beacon in self.beacons.drain(..).flatten() {
            host.remove_beacon(beacon);
        }
    }
}
