// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session state: which mode the engine is in, where it is, and whether it is showing anything.
//!
//! [`Session`] only records transitions. It never touches the document; the
//! [`Engine`](crate::Engine) asks it what to do and then renders the result.
//!
//! ```rust
//! use guideme_engine::session::{Advance, Session, State};
//!
//! let mut session = Session::new();
//! session.begin_tour();
//! assert_eq!(session.state(), State::TourStep(0));
//!
//! assert_eq!(session.advance(2), Advance::Moved(1));
//! assert_eq!(session.advance(2), Advance::Finished);
//! ```

/// Interaction mode of the shared popover and highlight frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Linear walkthrough over the step list.
    #[default]
    Tour,
    /// A single hint opened from its beacon.
    Hint,
}

/// Observable state of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum State {
    /// Nothing is shown.
    Idle,
    /// The tour is showing the step at this index.
    TourStep(usize),
    /// The hint at this index is open.
    HintOpen(usize),
}

/// Result of asking the session to move forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the step at this index.
    Moved(usize),
    /// Already on the last step: the tour is complete and should exit.
    Finished,
    /// Not in an active tour; nothing changes.
    Ignored,
}

/// Transient session state owned by one engine.
#[derive(Clone, Debug, Default)]
pub struct Session {
    mode: Mode,
    index: usize,
    hint: usize,
    active: bool,
}

impl Session {
    /// An idle session in tour mode at index 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> State {
        match (self.active, self.mode) {
            (false, _) => State::Idle,
            (true, Mode::Tour) => State::TourStep(self.index),
            (true, Mode::Hint) => State::HintOpen(self.hint),
        }
    }

    /// Last entered mode. It is kept while idle.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether anything is currently shown.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Index of the current (or last shown) tour step.
    pub fn current_step(&self) -> usize {
        self.index
    }

    /// Whether the session is showing a tour step.
    pub fn in_tour(&self) -> bool {
        self.active && self.mode == Mode::Tour
    }

    /// Whether the session is showing a hint.
    pub fn in_hint(&self) -> bool {
        self.active && self.mode == Mode::Hint
    }

    /// Enter the tour at its first step.
    pub fn begin_tour(&mut self) {
        self.mode = Mode::Tour;
        self.index = 0;
        self.active = true;
    }

    /// Move one step forward in a tour of `len` steps.
    pub fn advance(&mut self, len: usize) -> Advance {
        if !self.in_tour() {
            return Advance::Ignored;
        }
        if self.index + 1 < len {
            self.index += 1;
            Advance::Moved(self.index)
        } else {
            Advance::Finished
        }
    }

    /// Move one step back. Returns the new index, or `None` at the first step or outside a tour.
    pub fn retreat(&mut self) -> Option<usize> {
        if !self.in_tour() || self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.index)
    }

    /// Open the hint at `index`, leaving whatever was shown before.
    pub fn open_hint(&mut self, index: usize) {
        self.mode = Mode::Hint;
        self.hint = index;
        self.active = true;
    }

    /// Stop showing anything. Returns the mode that was active, or `None` if already idle.
    pub fn close(&mut self) -> Option<Mode> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(self.mode)
    }
}
