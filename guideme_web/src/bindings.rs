// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `wasm-bindgen` exports: the `GuideMe` class.

use core::fmt::Display;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use guideme_engine::session::State;
use guideme_engine::{Engine, Options, parse_steps};
use tracing::debug;
use wasm_bindgen::prelude::*;

use crate::dom::DomHost;
use crate::storage::LocalStorageFlags;
use crate::subscription::{DomEngine, Subscription};

static NEXT_INSTANCE: AtomicU32 = AtomicU32::new(0);

fn to_js(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A guided tour and hint set on the current page.
///
/// ```js
/// const guide = new GuideMe(JSON.stringify(steps), JSON.stringify({ runOnce: true }));
/// guide.addHints(JSON.stringify(hints));
/// guide.start();
/// ```
#[wasm_bindgen]
#[derive(Debug)]
pub struct GuideMe {
    engine: Rc<RefCell<DomEngine>>,
    subscription: Option<Subscription>,
}

#[wasm_bindgen]
impl GuideMe {
    /// Create an engine from a JSON array of steps and an optional JSON options object.
    ///
    /// The overlay is mounted and listeners are attached immediately.
    #[wasm_bindgen(constructor)]
    pub fn new(steps_json: &str, options_json: Option<String>) -> Result<Self, JsValue> {
        let steps = parse_steps(steps_json).map_err(to_js)?;
        let options = options_json
            .as_deref()
            .map(Options::from_json)
            .transpose()
            .map_err(to_js)?
            .unwrap_or_default();

        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        let host = DomHost::new(instance)?;
        let engine = Engine::new(host, LocalStorageFlags::new(), steps, options);
        let engine = Rc::new(RefCell::new(engine));
        let subscription = Subscription::attach(&engine, &instance.to_string())?;
        Ok(Self {
            engine,
            subscription: Some(subscription),
        })
    }

    /// Start the tour. Returns whether it started.
    pub fn start(&self, force: Option<bool>) -> bool {
        self.with_engine("start", |e| e.start(force.unwrap_or(false)))
            .unwrap_or(false)
    }

    /// Replace the hints with a JSON array and rebuild their beacons.
    #[wasm_bindgen(js_name = addHints)]
    pub fn add_hints(&self, hints_json: &str) -> Result<(), JsValue> {
        let hints = parse_steps(hints_json).map_err(to_js)?;
        self.with_engine("addHints", |e| e.add_hints(hints));
        Ok(())
    }

    /// Show the next tour step, or finish the tour.
    pub fn next(&self) {
        self.with_engine("next", Engine::next);
    }

    /// Show the previous tour step.
    pub fn prev(&self) {
        self.with_engine("prev", Engine::prev);
    }

    /// Leave the current tour or hint.
    pub fn skip(&self) {
        self.with_engine("skip", Engine::skip);
    }

    /// Open a hint as if its beacon was clicked. Returns whether it opened.
    #[wasm_bindgen(js_name = showHint)]
    pub fn show_hint(&self, index: usize) -> bool {
        self.with_engine("showHint", |e| e.show_hint(index))
            .unwrap_or(false)
    }

    /// Recompute positions after a layout change the window did not report.
    pub fn refresh(&self) {
        self.with_engine("refresh", Engine::relayout);
    }

    /// Detach listeners, remove every node and disable this instance.
    pub fn destroy(&mut self) {
        self.subscription = None;
        self.with_engine("destroy", Engine::destroy);
    }

    /// `"idle"`, `"tour"` or `"hint"`.
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        let state = self.engine.try_borrow().map(|e| e.state());
        let mode = match state {
            Ok(State::TourStep(_)) => "tour",
            Ok(State::HintOpen(_)) => "hint",
            Ok(State::Idle) | Err(_) => "idle",
        };
        mode.to_owned()
    }

    /// Index of the current tour step, or of the open hint.
    #[wasm_bindgen(getter)]
    pub fn index(&self) -> Option<usize> {
        match self.engine.try_borrow().ok()?.state() {
            State::TourStep(index) | State::HintOpen(index) => Some(index),
            State::Idle => None,
        }
    }
}

impl GuideMe {
    fn with_engine<R>(&self, call: &'static str, f: impl FnOnce(&mut DomEngine) -> R) -> Option<R> {
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => Some(f(&mut engine)),
            Err(_) => {
                debug!(call, "engine busy; call ignored");
                None
            }
        }
    }
}
