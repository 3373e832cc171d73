// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GuideMe Web: the browser host for the GuideMe engine.
//!
//! On `wasm32` this crate provides:
//!
//! - `DomHost`, a [`Host`](guideme_engine::host::Host) that renders the highlight
//!   frame, popover and beacons into `document.body`.
//! - `Subscription`, the window and document listeners that feed one engine.
//! - `LocalStorageFlags`, a [`FlagStore`](guideme_engine::FlagStore) on `localStorage`.
//! - `GuideMe`, the class exported to JavaScript through `wasm-bindgen`:
//!
//! ```js
//! import init, { GuideMe } from "./pkg/guideme_web.js";
//!
//! await init();
//! const guide = new GuideMe(JSON.stringify([
//!   { element: "#sidebar", title: "Navigation", description: "Everything lives here.", position: "right" },
//! ]), JSON.stringify({ runOnce: true, tourId: "dashboard-v1" }));
//! guide.start();
//! ```
//!
//! Each `GuideMe` gets its own instance number. Its nodes are tagged with it and
//! its click listener only reacts to its own popover and beacons, so several
//! instances can share a page. The [`markup`] module, which holds those tags and
//! the click classification, is available on every target.
//!
//! Diagnostics go through `tracing`; install a subscriber in the embedding
//! application to see them.

pub mod markup;

#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod subscription;

#[cfg(target_arch = "wasm32")]
pub use bindings::GuideMe;
#[cfg(target_arch = "wasm32")]
pub use dom::DomHost;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageFlags;
#[cfg(target_arch = "wasm32")]
pub use subscription::{DomEngine, Subscription};
