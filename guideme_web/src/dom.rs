// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Host`] implementation over the live DOM.

use core::fmt;

use guideme_engine::host::{Controls, Host, PopoverContent, PopoverPlacement};
use kurbo::{Point, Rect, Size, Vec2};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use crate::markup::{
    ACTIVE_CLASS, BEACON_ATTR, BEACON_CLASS, FRAME_CLASS, INSTANCE_ATTR, PART_ATTR, PART_BEACON,
    PART_FRAME, PART_POPOVER, POPOVER_CLASS, POPOVER_HTML,
};

struct PopoverNodes {
    root: HtmlElement,
    title: Element,
    body: Element,
    counter: HtmlElement,
    close: HtmlElement,
    skip: HtmlElement,
    prev: HtmlButtonElement,
    next: HtmlElement,
}

struct Overlay {
    frame: HtmlElement,
    popover: PopoverNodes,
}

/// The page's document, guided by one engine instance.
///
/// Nodes created here are appended to `body` and tagged with the instance number,
/// so several engines can share a page.
pub struct DomHost {
    window: Window,
    document: Document,
    instance: String,
    overlay: Option<Overlay>,
}

impl fmt::Debug for DomHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomHost")
            .field("instance", &self.instance)
            .field("mounted", &self.overlay.is_some())
            .finish_non_exhaustive()
    }
}

impl DomHost {
    /// A host for the current window, tagging its nodes with `instance`.
    pub fn new(instance: u32) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        Ok(Self {
            window,
            document,
            instance: instance.to_string(),
            overlay: None,
        })
    }

    /// Instance tag written to [`INSTANCE_ATTR`].
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// The popover root, while mounted.
    pub fn popover_element(&self) -> Option<&HtmlElement> {
        self.overlay.as_ref().map(|o| &o.popover.root)
    }

    /// The highlight frame, while mounted.
    pub fn frame_element(&self) -> Option<&HtmlElement> {
        self.overlay.as_ref().map(|o| &o.frame)
    }

    fn body(&self) -> Result<HtmlElement, JsValue> {
        self.document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))
    }

    fn create(&self, class: &str, part: &str) -> Result<HtmlElement, JsValue> {
        let element = self.document.create_element("div")?;
        element.set_class_name(class);
        element.set_attribute(INSTANCE_ATTR, &self.instance)?;
        element.set_attribute(PART_ATTR, part)?;
        element.dyn_into::<HtmlElement>().map_err(JsValue::from)
    }

    fn try_mount(&mut self) -> Result<(), JsValue> {
        if self.overlay.is_some() {
            return Ok(());
        }
        let body = self.body()?;

        let frame = self.create(FRAME_CLASS, PART_FRAME)?;
        let root = self.create(POPOVER_CLASS, PART_POPOVER)?;
        root.set_inner_html(POPOVER_HTML);
        let popover = PopoverNodes {
            title: find(&root, ".guideme-title")?,
            body: find(&root, ".guideme-body")?,
            counter: find(&root, ".guideme-steps-count")?,
            close: find(&root, "[data-action=\"close\"]")?,
            skip: find(&root, "[data-action=\"skip\"]")?,
            prev: find(&root, "[data-action=\"prev\"]")?,
            next: find(&root, "[data-action=\"next\"]")?,
            root,
        };

        body.append_child(&frame)?;
        body.append_child(&popover.root)?;
        self.overlay = Some(Overlay { frame, popover });
        Ok(())
    }

    fn try_create_beacon(&self, index: usize, origin: Point) -> Result<HtmlElement, JsValue> {
        let beacon = self.create(BEACON_CLASS, PART_BEACON)?;
        beacon.set_attribute(BEACON_ATTR, &index.to_string())?;
        set_styles(
            &beacon,
            &[("top", px(origin.y).as_str()), ("left", px(origin.x).as_str())],
        );
        self.body()?.append_child(&beacon)?;
        Ok(beacon)
    }
}

impl Host for DomHost {
    type Target = Element;
    type Beacon = HtmlElement;

    fn resolve(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                debug!(selector, ?err, "selector rejected by the document");
                None
            }
        }
    }

    fn client_rect(&self, target: &Element) -> Rect {
        let r = target.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn scroll_offset(&self) -> Vec2 {
        Vec2::new(
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        )
    }

    fn viewport_size(&self) -> Size {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Size::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn scroll_into_view(&mut self, target: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn mount_overlay(&mut self) {
        if let Err(err) = self.try_mount() {
            warn!(instance = %self.instance, ?err, "could not mount the overlay");
        }
    }

    fn unmount_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            overlay.frame.remove();
            overlay.popover.root.remove();
        }
    }

    fn show_frame(&mut self, rect: Rect) {
        let Some(overlay) = &self.overlay else { return };
        set_styles(
            &overlay.frame,
            &[
                ("top", px(rect.y0).as_str()),
                ("left", px(rect.x0).as_str()),
                ("width", px(rect.width()).as_str()),
                ("height", px(rect.height()).as_str()),
                ("opacity", "1"),
            ],
        );
    }

    fn hide_frame(&mut self) {
        let Some(overlay) = &self.overlay else { return };
        set_styles(&overlay.frame, &[("opacity", "0")]);
    }

    fn write_popover(&mut self, content: &PopoverContent<'_>) {
        let Some(overlay) = &self.overlay else { return };
        let p = &overlay.popover;
        p.title.set_text_content(Some(content.title));
        p.body.set_text_content(Some(content.body));

        let counter = content.counter.map(|c| c.to_string()).unwrap_or_default();
        p.counter.set_text_content(Some(&counter));
        show_if(&p.counter, content.controls.contains(Controls::COUNTER), "block");
        show_if(&p.skip, content.controls.contains(Controls::SKIP), "inline-block");
        show_if(&p.prev, content.controls.contains(Controls::PREV), "inline-block");
        show_if(&p.next, content.controls.contains(Controls::NEXT), "inline-block");
        show_if(&p.close, content.controls.contains(Controls::CLOSE), "inline-block");
        p.prev.set_disabled(!content.prev_enabled);
        p.next.set_text_content(Some(content.primary_label));
    }

    fn popover_size(&self) -> Size {
        let Some(overlay) = &self.overlay else {
            return Size::ZERO;
        };
        let root = &overlay.popover.root;
        let classes = root.class_list();
        let shown = classes.contains(ACTIVE_CLASS);
        // A hidden popover has no box; lay it out invisibly to measure it.
        if !shown {
            set_styles(root, &[("visibility", "hidden")]);
            let _ = classes.add_1(ACTIVE_CLASS);
        }
        let r = root.get_bounding_client_rect();
        if !shown {
            let _ = classes.remove_1(ACTIVE_CLASS);
            let _ = root.style().remove_property("visibility");
        }
        Size::new(r.width(), r.height())
    }

    fn place_popover(&mut self, placement: PopoverPlacement) {
        let Some(overlay) = &self.overlay else { return };
        let root = &overlay.popover.root;
        match placement {
            PopoverPlacement::At(origin) => {
                set_styles(
                    root,
                    &[("top", px(origin.y).as_str()), ("left", px(origin.x).as_str())],
                );
                let _ = root.style().remove_property("transform");
            }
            PopoverPlacement::Centered => set_styles(
                root,
                &[
                    ("top", "50%"),
                    ("left", "50%"),
                    ("transform", "translate(-50%, -50%)"),
                ],
            ),
        }
        if let Err(err) = root.class_list().add_1(ACTIVE_CLASS) {
            debug!(?err, "could not show the popover");
        }
    }

    fn hide_popover(&mut self) {
        let Some(overlay) = &self.overlay else { return };
        if let Err(err) = overlay.popover.root.class_list().remove_1(ACTIVE_CLASS) {
            debug!(?err, "could not hide the popover");
        }
    }

    fn create_beacon(&mut self, index: usize, origin: Point) -> Option<HtmlElement> {
        match self.try_create_beacon(index, origin) {
            Ok(beacon) => Some(beacon),
            Err(err) => {
                warn!(index, ?err, "could not create a beacon");
                None
            }
        }
    }

    fn hide_beacon(&mut self, beacon: &HtmlElement) {
        set_styles(beacon, &[("display", "none")]);
    }

    fn remove_beacon(&mut self, beacon: HtmlElement) {
        beacon.remove();
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        self.unmount_overlay();
    }
}

fn find<T: JsCast>(root: &Element, selector: &str) -> Result<T, JsValue> {
    root.query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("popover markup lacks {selector}")))?
        .dyn_into::<T>()
        .map_err(JsValue::from)
}

fn px(value: f64) -> String {
    format!("{value}px")
}

fn show_if(element: &HtmlElement, visible: bool, display: &str) {
    set_styles(element, &[("display", if visible { display } else { "none" })]);
}

fn set_styles(element: &HtmlElement, properties: &[(&str, &str)]) {
    let style = element.style();
    for (name, value) in properties {
        if let Err(err) = style.set_property(name, value) {
            debug!(name, value, ?err, "style rejected");
        }
    }
}
