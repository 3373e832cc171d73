// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document and window listeners feeding one engine.

use core::fmt;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use guideme_engine::Engine;
use guideme_engine::router::{Event as EngineEvent, Key, Outcome};
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, EventTarget, KeyboardEvent};

use crate::dom::DomHost;
use crate::markup::{ACTION_ATTR, BEACON_ATTR, INSTANCE_ATTR, NodeTags, PART_ATTR, classify};
use crate::storage::LocalStorageFlags;

/// The engine type driven by the browser bindings.
pub type DomEngine = Engine<DomHost, LocalStorageFlags>;

struct Listener {
    target: EventTarget,
    kind: &'static str,
    capture: bool,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach<F>(
        target: &EventTarget,
        kind: &'static str,
        capture: bool,
        callback: F,
    ) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback_and_bool(
            kind,
            callback.as_ref().unchecked_ref(),
            capture,
        )?;
        Ok(Self {
            target: target.clone(),
            kind,
            capture,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            self.kind,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

/// Window `resize`, document `keydown` and capture-phase document `click`
/// listeners for one engine. Dropping the subscription removes them.
///
/// Listeners hold a weak reference, so they never keep the engine alive.
pub struct Subscription {
    listeners: Vec<Listener>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<_> = self.listeners.iter().map(|l| l.kind).collect();
        f.debug_struct("Subscription")
            .field("listeners", &kinds)
            .finish()
    }
}

impl Subscription {
    /// Attach listeners that forward input to `engine`.
    ///
    /// Clicks are classified against nodes tagged with `instance` only.
    pub fn attach(engine: &Rc<RefCell<DomEngine>>, instance: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let resize = {
            let engine = Rc::downgrade(engine);
            Listener::attach(&window, "resize", false, move |_| {
                dispatch(&engine, &EngineEvent::Resize);
            })?
        };

        let keydown = {
            let engine = Rc::downgrade(engine);
            Listener::attach(&document, "keydown", false, move |event: Event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                    return;
                };
                dispatch(&engine, &EngineEvent::Key(Key::from_name(&key)));
            })?
        };

        let click = {
            let engine = Rc::downgrade(engine);
            let instance = instance.to_owned();
            Listener::attach(&document, "click", true, move |event: Event| {
                let target = classify(&instance, path_tags(&event));
                if dispatch(&engine, &EngineEvent::Click(target)) == Outcome::Stop {
                    event.stop_propagation();
                }
            })?
        };

        Ok(Self {
            listeners: vec![resize, keydown, click],
        })
    }
}

fn dispatch(engine: &Weak<RefCell<DomEngine>>, event: &EngineEvent) -> Outcome {
    let Some(engine) = engine.upgrade() else {
        return Outcome::Continue;
    };
    match engine.try_borrow_mut() {
        Ok(mut engine) => engine.handle(event),
        Err(_) => {
            debug!(?event, "engine busy; event ignored");
            Outcome::Continue
        }
    }
}

fn path_tags(event: &Event) -> impl Iterator<Item = NodeTags> {
    let start = event.target().and_then(|t| t.dyn_into::<Element>().ok());
    std::iter::successors(start, |element| element.parent_element()).map(|element| NodeTags {
        instance: element.get_attribute(INSTANCE_ATTR),
        part: element.get_attribute(PART_ATTR),
        beacon: element.get_attribute(BEACON_ATTR),
        action: element.get_attribute(ACTION_ATTR),
    })
}
