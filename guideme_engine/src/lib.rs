// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GuideMe Engine: guided tours and contextual hints over any document.
//!
//! ## Overview
//!
//! An [`Engine`] walks the user through an ordered list of [`Step`]s (a *tour*) and
//! keeps a set of independently openable [`Hint`]s, each marked by a small *beacon*
//! next to its target. Both modes share one highlight frame and one popover.
//!
//! The engine does not know about browsers. Everything it needs from a page goes
//! through the [`Host`](host::Host) trait: resolving selectors, measuring rectangles,
//! scrolling, and owning the frame, popover and beacon nodes. Placement math lives in
//! [`guideme_placement`]. Completion of run-once tours is remembered in a
//! [`FlagStore`](store::FlagStore).
//!
//! ## Layering
//!
//! - [`session`]: the state machine (`Idle`, `TourStep(i)`, `HintOpen(j)`).
//! - [`router`]: a pure mapping from host events to engine commands.
//! - [`markers`]: hint list, beacon slots and dismissals.
//! - [`Engine`]: runs commands against a host and renders the result.
//! - [`headless`]: a simulated document implementing [`Host`](host::Host).
//!
//! ## Workflow
//!
//! 1) Build a host (for example [`HeadlessPage`], or the DOM host in `guideme_web`).
//! 2) Create an [`Engine`] with steps and [`Options`]; this mounts the overlay.
//! 3) Call [`Engine::start`] and [`Engine::add_hints`] from application code.
//! 4) Feed native input to [`Engine::handle`] as [`router::Event`] values and honor
//!    the returned [`router::Outcome`].
//! 5) Call [`Engine::destroy`] when the page goes away.
//!
//! ```rust
//! use guideme_engine::router::{ClickTarget, Event, Key};
//! use guideme_engine::session::State;
//! use guideme_engine::{Engine, HeadlessPage, MemoryFlags, Options, Step};
//! use kurbo::{Rect, Size};
//!
//! let page = HeadlessPage::new(Size::new(1280.0, 800.0))
//!     .with_element("#search", Rect::from_origin_size((400.0, 20.0), (300.0, 32.0)))
//!     .with_element("#inbox", Rect::from_origin_size((20.0, 120.0), (200.0, 400.0)));
//! let options = Options { run_once: true, ..Options::default() };
//! let mut engine = Engine::new(page, MemoryFlags::new(), Vec::new(), options);
//!
//! engine.add_hints(vec![
//!     Step::new("#search", "Search", "Find anything."),
//!     Step::new("#inbox", "", "New messages land here."),
//! ]);
//! engine.handle(&Event::Click(ClickTarget::Beacon(1)));
//! assert_eq!(engine.state(), State::HintOpen(1));
//!
//! engine.handle(&Event::Key(Key::Escape));
//! assert_eq!(engine.state(), State::Idle);
//! ```
//!
//! ## Logging
//!
//! The engine reports through [`tracing`]: missing targets and store failures at
//! `warn`, tour exits and the run-once gate at `info`, ignored calls at `debug`.
//!
//! ## Features
//!
//! - `std` (enabled by default): use `std` in dependencies and provide
//!   [`JsonFileFlags`].
//! - `libm`: `no_std` float support for `kurbo`. Without `std`, enable it.
//!
//! This crate is `no_std` and uses `alloc`.

// Test builds link std for the log-capturing test harness.
#![cfg_attr(not(test), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod headless;
pub mod host;
pub mod markers;
pub mod router;
pub mod session;
pub mod store;

mod engine;
mod error;
mod options;
mod types;

pub use engine::{Engine, ExitReason};
pub use error::{ConfigError, StoreError};
pub use headless::HeadlessPage;
pub use options::{COMPLETION_KEY_PREFIX, DEFAULT_TOUR_ID, Options};
#[cfg(feature = "std")]
pub use store::JsonFileFlags;
pub use store::{FlagStore, MemoryFlags};
pub use types::{Hint, Step, parse_steps};
