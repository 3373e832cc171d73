// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event routing: turns viewport, keyboard and click input into engine commands.
//!
//! Hosts translate their native events into [`Event`] values and hand them to
//! [`Engine::handle`](crate::Engine::handle). Routing itself is a pure function of
//! the event and the [`Session`], so the rules can be checked without a document:
//!
//! | Event | Condition | Command |
//! |---|---|---|
//! | resize | active | [`Command::Relayout`] |
//! | `ArrowRight` / `ArrowLeft` | in a tour | [`Command::Next`] / [`Command::Prev`] |
//! | `Escape` | active | [`Command::Skip`] |
//! | beacon click | always | [`Command::ShowHint`], propagation stopped |
//! | close / skip control | active | [`Command::Skip`] |
//! | prev control | in a tour | [`Command::Prev`] |
//! | primary control | in a tour / in a hint | [`Command::Next`] / [`Command::Skip`] |
//! | click outside popover and beacons | in a hint | [`Command::Skip`] |
//!
//! Outside clicks never end a tour: tour navigation is explicit.

use crate::session::Session;

/// Input delivered by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The viewport changed size.
    Resize,
    /// A key was pressed.
    Key(Key),
    /// Something in the document was clicked.
    Click(ClickTarget),
}

/// Keys the engine reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `ArrowLeft`.
    ArrowLeft,
    /// `ArrowRight`.
    ArrowRight,
    /// `Escape`.
    Escape,
    /// Any other key.
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// What a click landed on, as classified by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    /// A beacon owned by this engine, for the hint at this index.
    Beacon(usize),
    /// A beacon owned by another engine instance.
    OtherBeacon,
    /// A control inside this engine's popover.
    Control(Control),
    /// This engine's popover, outside any control.
    Popover,
    /// Anything else.
    Outside,
}

/// Popover controls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// Header close button.
    Close,
    /// Footer skip button.
    Skip,
    /// Footer previous button.
    Prev,
    /// Footer primary button.
    Next,
}

/// Engine action selected for an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Advance the tour.
    Next,
    /// Go back one tour step.
    Prev,
    /// Leave the current mode.
    Skip,
    /// Open the hint at this index.
    ShowHint(usize),
    /// Recompute every position.
    Relayout,
}

/// Whether the host should let the native event continue propagating.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Let the event propagate.
    Continue,
    /// Stop propagation.
    Stop,
}

/// Routing decision for one event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// Command to run, if any.
    pub command: Option<Command>,
    /// Propagation decision for the host.
    pub outcome: Outcome,
}

impl Route {
    const IGNORE: Self = Self {
        command: None,
        outcome: Outcome::Continue,
    };

    const fn run(command: Command) -> Self {
        Self {
            command: Some(command),
            outcome: Outcome::Continue,
        }
    }
}

/// Decide what `event` means for `session`.
pub fn route(event: &Event, session: &Session) -> Route {
    match *event {
        Event::Resize if session.is_active() => Route::run(Command::Relayout),
        Event::Resize => Route::IGNORE,
        Event::Key(key) => route_key(key, session),
        Event::Click(target) => route_click(target, session),
    }
}

fn route_key(key: Key, session: &Session) -> Route {
    match key {
        Key::Escape if session.is_active() => Route::run(Command::Skip),
        Key::ArrowRight if session.in_tour() => Route::run(Command::Next),
        Key::ArrowLeft if session.in_tour() => Route::run(Command::Prev),
        _ => Route::IGNORE,
    }
}

fn route_click(target: ClickTarget, session: &Session) -> Route {
    match target {
        ClickTarget::Beacon(index) => Route {
            command: Some(Command::ShowHint(index)),
            outcome: Outcome::Stop,
        },
        ClickTarget::Control(control) if session.is_active() => match control {
            Control::Close | Control::Skip => Route::run(Command::Skip),
            Control::Prev if session.in_tour() => Route::run(Command::Prev),
            Control::Prev => Route::IGNORE,
            Control::Next if session.in_tour() => Route::run(Command::Next),
            Control::Next => Route::run(Command::Skip),
        },
        ClickTarget::Outside if session.in_hint() => Route::run(Command::Skip),
        ClickTarget::Control(_)
        | ClickTarget::OtherBeacon
        | ClickTarget::Popover
        | ClickTarget::Outside => Route::IGNORE,
    }
}
