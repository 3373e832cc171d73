// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine: one tour, one hint set, one popover and one highlight frame.

use alloc::vec::Vec;
use core::fmt;

use guideme_placement::{frame_rect, popover_origin};
use tracing::{debug, info, warn};

use crate::host::{Controls, Counter, Host, PopoverContent, PopoverPlacement};
use crate::markers::MarkerRegistry;
use crate::options::Options;
use crate::router::{Command, Event, Outcome, route};
use crate::session::{Advance, Mode, Session, State};
use crate::store::FlagStore;
use crate::types::{Hint, Step};

const HINT_TITLE: &str = "Hint";
const LABEL_NEXT: &str = "Next";
const LABEL_DONE: &str = "Done";
const LABEL_GOT_IT: &str = "Got it";

/// Why the session went back to idle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExitReason {
    /// The tour advanced past its last step.
    Completed,
    /// The tour was left before its end.
    Skipped,
    /// An open hint was closed.
    Dismissed,
}

impl ExitReason {
    /// Lowercase name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Skipped => "skipped",
            Self::Dismissed => "dismissed",
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guided tour and hint engine over a [`Host`] document and a [`FlagStore`].
///
/// The engine owns its host, so the overlay nodes it mounts live exactly as long
/// as the engine (or until [`Engine::destroy`]). None of its operations fail:
/// missing targets degrade the presentation and store errors are logged.
///
/// ```rust
/// use guideme_engine::{Engine, HeadlessPage, MemoryFlags, Options, Step};
/// use guideme_engine::session::State;
/// use kurbo::{Rect, Size};
///
/// let page = HeadlessPage::new(Size::new(1024.0, 768.0))
///     .with_element("#a", Rect::from_origin_size((40.0, 40.0), (80.0, 30.0)))
///     .with_element("#b", Rect::from_origin_size((40.0, 400.0), (80.0, 30.0)));
/// let steps = vec![
///     Step::new("#a", "One", "First stop."),
///     Step::new("#b", "Two", "Second stop."),
/// ];
///
/// let mut engine = Engine::new(page, MemoryFlags::new(), steps, Options::default());
/// assert!(engine.start(false));
/// engine.next();
/// assert_eq!(engine.state(), State::TourStep(1));
/// engine.next();
/// assert_eq!(engine.state(), State::Idle);
/// ```
#[derive(Debug)]
pub struct Engine<H: Host, S: FlagStore> {
    host: H,
    store: S,
    steps: Vec<Step>,
    options: Options,
    session: Session,
    markers: MarkerRegistry<H::Beacon>,
    destroyed: bool,
}

impl<H: Host, S: FlagStore> Engine<H, S> {
    /// Create an engine and mount its overlay into `host`.
    ///
    /// Steps with blank selectors are kept and logged; they always take the
    /// centered fallback when shown.
    pub fn new(mut host: H, store: S, steps: Vec<Step>, options: Options) -> Self {
        warn_invalid("tour step", &steps);
        host.mount_overlay();
        Self {
            host,
            store,
            steps,
            options,
            session: Session::new(),
            markers: MarkerRegistry::new(),
            destroyed: false,
        }
    }

    /// Start the tour at its first step.
    ///
    /// Returns `false` without changing anything when there are no steps, or when
    /// the tour is run-once, already completed and `force` is not set.
    pub fn start(&mut self, force: bool) -> bool {
        if self.ignored("start") || self.steps.is_empty() {
            return false;
        }
        if self.options.run_once && !force {
            let key = self.options.completion_key();
            if self.store.is_set(&key) {
                info!(tour_id = %self.options.tour_id, "tour already completed; not starting");
                return false;
            }
        }
        self.session.begin_tour();
        self.show_step(0);
        true
    }

    /// Replace the hint list and rebuild every beacon.
    ///
    /// Dismissed hints become available again. An open hint is closed first,
    /// since its index may now name a different hint.
    pub fn add_hints(&mut self, hints: Vec<Hint>) {
        if self.ignored("add_hints") {
            return;
        }
        warn_invalid("hint", &hints);
        if self.session.in_hint() {
            self.exit(ExitReason::Dismissed);
        }
        self.markers.replace(&mut self.host, hints);
    }

    /// Show the next step, or complete the tour from its last step.
    pub fn next(&mut self) {
        if self.ignored("next") {
            return;
        }
        match self.session.advance(self.steps.len()) {
            Advance::Moved(index) => self.show_step(index),
            Advance::Finished => self.exit(ExitReason::Completed),
            Advance::Ignored => debug!("next ignored outside a tour"),
        }
    }

    /// Show the previous step. Does nothing on the first step.
    pub fn prev(&mut self) {
        if self.ignored("prev") {
            return;
        }
        if let Some(index) = self.session.retreat() {
            self.show_step(index);
        }
    }

    /// Leave the current tour or hint.
    ///
    /// Leaving a run-once tour records it as completed. Calling this while idle
    /// does nothing.
    pub fn skip(&mut self) {
        if self.ignored("skip") {
            return;
        }
        match self.session.mode() {
            _ if !self.session.is_active() => debug!("skip ignored while idle"),
            Mode::Tour => self.exit(ExitReason::Skipped),
            Mode::Hint => self.exit(ExitReason::Dismissed),
        }
    }

    /// Open hint `index` from its beacon, replacing whatever is shown.
    ///
    /// Returns `false` when the hint has no live beacon: unknown index, target
    /// missing at the last render, or already dismissed.
    pub fn show_hint(&mut self, index: usize) -> bool {
        if self.ignored("show_hint") {
            return false;
        }
        if !self.markers.has_beacon(index) {
            debug!(index, "hint has no live beacon");
            return false;
        }
        self.session.open_hint(index);
        if !self.options.persist_hints {
            self.markers.dismiss(&mut self.host, index);
        }

        let Some(hint) = self.markers.hint(index) else {
            return false;
        };
        let content = PopoverContent {
            title: if hint.title.is_empty() {
                HINT_TITLE
            } else {
                &hint.title
            },
            body: &hint.description,
            counter: None,
            controls: Controls::HINT,
            prev_enabled: false,
            primary_label: LABEL_GOT_IT,
        };
        if !present(&mut self.host, hint, &content, false) {
            warn!(index, selector = %hint.element, "hint target not found; centering popover");
        }
        true
    }

    /// Route a host event and run the resulting command.
    ///
    /// The returned [`Outcome`] tells the host whether to stop propagation of the
    /// native event.
    pub fn handle(&mut self, event: &Event) -> Outcome {
        if self.ignored("handle") {
            return Outcome::Continue;
        }
        let route = route(event, &self.session);
        match route.command {
            Some(Command::Next) => self.next(),
            Some(Command::Prev) => self.prev(),
            Some(Command::Skip) => self.skip(),
            Some(Command::ShowHint(index)) => {
                self.show_hint(index);
            }
            Some(Command::Relayout) => self.relayout(),
            None => {}
        }
        route.outcome
    }

    /// Recompute every position after the layout changed.
    ///
    /// The current tour step is placed again and all beacons are rebuilt.
    pub fn relayout(&mut self) {
        if self.ignored("relayout") {
            return;
        }
        if self.session.in_tour() {
            self.show_step(self.session.current_step());
        }
        self.markers.render(&mut self.host);
    }

    /// Hide everything, remove all beacons and unmount the overlay.
    ///
    /// Every later call on this engine is ignored.
    pub fn destroy(&mut self) {
        if self.ignored("destroy") {
            return;
        }
        self.session.close();
        self.markers.clear(&mut self.host);
        self.host.unmount_overlay();
        self.destroyed = true;
    }

    /// Current session state.
    pub fn state(&self) -> State {
        self.session.state()
    }

    /// Session details.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Tour steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Hints and their beacons.
    pub fn markers(&self) -> &MarkerRegistry<H::Beacon> {
        &self.markers
    }

    /// Engine options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The document.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the document, for hosts that change layout between events.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The completion flag store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether [`Engine::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn ignored(&self, call: &'static str) -> bool {
        if self.destroyed {
            debug!(call, "engine destroyed; call ignored");
        }
        self.destroyed
    }

    fn show_step(&mut self, index: usize) {
        let Some(step) = self.steps.get(index) else {
            return;
        };
        let last = index + 1 == self.steps.len();
        let content = PopoverContent {
            title: &step.title,
            body: &step.description,
            counter: Some(Counter {
                current: index + 1,
                total: self.steps.len(),
            }),
            controls: Controls::TOUR,
            prev_enabled: index > 0,
            primary_label: if last { LABEL_DONE } else { LABEL_NEXT },
        };
        if !present(&mut self.host, step, &content, true) {
            warn!(index, selector = %step.element, "tour target not found; centering popover");
        }
    }

    fn exit(&mut self, reason: ExitReason) {
        let Some(mode) = self.session.close() else {
            return;
        };
        if mode == Mode::Tour && self.options.run_once {
            let key = self.options.completion_key();
            if let Err(err) = self.store.set(&key) {
                warn!(%key, %err, "could not record tour completion");
            }
        }
        self.host.hide_frame();
        self.host.hide_popover();
        match mode {
            Mode::Tour => info!(tour_id = %self.options.tour_id, %reason, "tour ended"),
            Mode::Hint => debug!(%reason, "hint closed"),
        }
    }
}

/// Write `content` and place the popover against `anchor`'s target.
///
/// Returns `false` when the target cannot be resolved; the frame is then hidden
/// and the popover centered in the viewport.
fn present<H: Host>(
    host: &mut H,
    anchor: &Step,
    content: &PopoverContent<'_>,
    scroll_into_view: bool,
) -> bool {
    host.write_popover(content);
    let Some(target) = host.resolve(&anchor.element) else {
        host.hide_frame();
        host.place_popover(PopoverPlacement::Centered);
        return false;
    };
    let scroll = host.scroll_offset();
    let client = host.client_rect(&target);
    host.show_frame(frame_rect(client, scroll));
    let origin = popover_origin(
        client,
        scroll,
        host.popover_size(),
        anchor.position,
        host.viewport_size().width,
    );
    host.place_popover(PopoverPlacement::At(origin));
    if scroll_into_view {
        host.scroll_into_view(&target);
    }
    true
}

fn warn_invalid(kind: &'static str, entries: &[Step]) {
    for (index, entry) in entries.iter().enumerate() {
        if let Err(err) = entry.validate(index) {
            warn!(kind, %err, "entry will fall back to a centered popover");
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use guideme_placement::Side;
    use kurbo::{Point, Rect, Size, Vec2};
    use tracing_test::traced_test;

    use super::*;
    use crate::error::StoreError;
    use crate::headless::{DEFAULT_POPOVER_SIZE, HeadlessPage};
    use crate::router::{ClickTarget, Control, Key};
    use crate::store::MemoryFlags;

    const VIEWPORT: Size = Size::new(1024.0, 768.0);

    fn page() -> HeadlessPage {
        HeadlessPage::new(VIEWPORT)
            .with_element("#a", Rect::from_origin_size((100.0, 100.0), (200.0, 50.0)))
            .with_element("#b", Rect::from_origin_size((100.0, 1500.0), (200.0, 50.0)))
            .with_element("#c", Rect::from_origin_size((600.0, 300.0), (100.0, 40.0)))
            .with_content_size(Size::new(1024.0, 3000.0))
    }

    fn steps() -> Vec<Step> {
        vec![
            Step::new("#a", "Alpha", "First."),
            Step::new("#b", "Beta", "Second.").with_position(Side::Top),
            Step::new("#c", "Gamma", "Third.").with_position(Side::Right),
        ]
    }

    fn hints() -> Vec<Hint> {
        vec![
            Step::new("#a", "", "Untitled hint."),
            Step::new("#c", "Charts", "Drag to zoom.").with_position(Side::Left),
        ]
    }

    fn run_once(tour_id: &str) -> Options {
        Options {
            run_once: true,
            tour_id: tour_id.into(),
            ..Options::default()
        }
    }

    fn engine(options: Options) -> Engine<HeadlessPage, MemoryFlags> {
        Engine::new(page(), MemoryFlags::new(), steps(), options)
    }

    fn popover(engine: &Engine<HeadlessPage, MemoryFlags>) -> &crate::headless::PopoverView {
        &engine.host().overlay().unwrap().popover
    }

    fn frame(engine: &Engine<HeadlessPage, MemoryFlags>) -> Option<Rect> {
        engine.host().overlay().unwrap().frame
    }

    #[test]
    fn construction_mounts_one_overlay() {
        let engine = engine(Options::default());
        assert_eq!(engine.host().overlay_mounts(), 1);
        assert_eq!(engine.state(), State::Idle);
        assert!(!popover(&engine).visible);
    }

    #[test]
    fn start_shows_first_step() {
        let mut engine = engine(Options::default());
        assert!(engine.start(false));
        assert_eq!(engine.state(), State::TourStep(0));

        let popover = popover(&engine);
        assert!(popover.visible);
        assert_eq!(popover.title, "Alpha");
        assert_eq!(popover.body, "First.");
        assert_eq!(popover.counter.as_deref(), Some("1 of 3"));
        assert_eq!(popover.controls, Controls::TOUR);
        assert!(!popover.prev_enabled);
        assert_eq!(popover.primary_label, "Next");
        assert_eq!(
            frame(&engine),
            Some(Rect::from_origin_size((95.0, 95.0), (210.0, 60.0)))
        );
    }

    #[test]
    fn popover_is_placed_below_and_clamped() {
        let mut engine = engine(Options::default());
        engine.start(false);
        // Centered on #a would start at 200 - 150 = 50, below it at 150 + 15.
        assert_eq!(
            popover(&engine).placement,
            Some(PopoverPlacement::At(Point::new(50.0, 165.0)))
        );
    }

    #[test]
    fn start_with_no_steps_is_a_silent_no_op() {
        let mut engine = Engine::new(page(), MemoryFlags::new(), Vec::new(), Options::default());
        assert!(!engine.start(true));
        assert_eq!(engine.state(), State::Idle);
        engine.next();
        engine.prev();
        engine.skip();
        assert_eq!(engine.state(), State::Idle);
    }

    #[test]
    fn navigation_updates_counter_and_labels() {
        let mut engine = engine(Options::default());
        engine.start(false);
        engine.next();
        assert_eq!(engine.state(), State::TourStep(1));
        assert!(popover(&engine).prev_enabled);
        assert_eq!(popover(&engine).counter.as_deref(), Some("2 of 3"));

        engine.next();
        assert_eq!(popover(&engine).primary_label, "Done");

        engine.prev();
        engine.prev();
        assert_eq!(engine.state(), State::TourStep(0));
        engine.prev();
        assert_eq!(engine.state(), State::TourStep(0), "prev at the first step is a no-op");
    }

    #[test]
    fn step_scrolls_target_to_viewport_center() {
        let mut engine = engine(Options::default());
        engine.start(false);
        engine.next();
        // #b spans 1500..1550; centered means 1525 - 384.
        assert_eq!(engine.host().scroll_offset(), Vec2::new(0.0, 1141.0));
        // Placement was computed before scrolling, in document space.
        let top = 1500.0 - DEFAULT_POPOVER_SIZE.height - 15.0;
        assert_eq!(
            popover(&engine).placement,
            Some(PopoverPlacement::At(Point::new(50.0, top)))
        );
    }

    #[test]
    fn popover_is_measured_after_its_content_is_written() {
        let mut page = page();
        // Long bodies wrap onto more lines, so the popover grows.
        page.set_popover_measure(|popover| {
            Size::new(300.0, if popover.body.len() > 20 { 240.0 } else { 80.0 })
        });
        let steps = vec![
            Step::new("#a", "Short", "Brief."),
            Step::new("#b", "Long", "A description long enough to wrap.").with_position(Side::Top),
            Step::new("#c", "Short", "Brief.").with_position(Side::Top),
        ];
        let mut engine = Engine::new(page, MemoryFlags::new(), steps, Options::default());
        engine.start(false);

        engine.next();
        // Above #b using the long body's height, not the short one shown before.
        assert_eq!(
            popover(&engine).placement,
            Some(PopoverPlacement::At(Point::new(50.0, 1500.0 - 240.0 - 15.0)))
        );

        engine.next();
        assert_eq!(
            popover(&engine).placement,
            Some(PopoverPlacement::At(Point::new(500.0, 300.0 - 80.0 - 15.0)))
        );
    }

    #[test]
    fn next_on_last_step_completes() {
        let mut engine = engine(run_once("t0"));
        engine.start(false);
        engine.next();
        engine.next();
        engine.next();
        assert_eq!(engine.state(), State::Idle);
        assert!(!popover(&engine).visible);
        assert!(frame(&engine).is_none());
        assert!(engine.store().is_set("guideme_tour_t0"));
    }

    #[test]
    fn completing_without_run_once_records_nothing() {
        let mut engine = engine(Options {
            tour_id: "t0".into(),
            ..Options::default()
        });
        engine.start(false);
        engine.next();
        engine.next();
        engine.next();
        assert_eq!(engine.state(), State::Idle);
        assert!(!engine.store().is_set("guideme_tour_t0"));
        assert!(engine.start(false));
    }

    #[test]
    fn run_once_gate() {
        let store = MemoryFlags::with_keys(["guideme_tour_x"]);
        let mut engine = Engine::new(page(), store, steps(), run_once("x"));
        assert!(!engine.start(false));
        assert_eq!(engine.state(), State::Idle);
        assert!(engine.start(true));
        assert_eq!(engine.state(), State::TourStep(0));
    }

    #[test]
    fn without_run_once_nothing_is_recorded() {
        let mut engine = engine(Options {
            tour_id: "t".into(),
            ..Options::default()
        });
        engine.start(false);
        engine.skip();
        assert!(!engine.store().is_set("guideme_tour_t"));
        assert!(engine.start(false));
    }

    #[test]
    fn end_to_end_run_once_tour() {
        let page = page();
        let steps = vec![
            Step::new("#a", "A", "First."),
            Step::new("#b", "B", "Second."),
        ];
        let mut engine = Engine::new(page, MemoryFlags::new(), steps, run_once("t1"));
        assert!(engine.start(false));
        engine.next();
        engine.next();
        engine.skip();

        assert_eq!(engine.state(), State::Idle);
        assert!(engine.store().is_set("guideme_tour_t1"));
        assert!(!engine.start(false));
        assert_eq!(engine.state(), State::Idle);
    }

    #[test]
    fn skip_twice_is_harmless() {
        let mut engine = engine(Options::default());
        engine.start(false);
        engine.skip();
        engine.skip();
        assert_eq!(engine.state(), State::Idle);
    }

    #[traced_test]
    #[test]
    fn missing_tour_target_centers_popover() {
        let steps = vec![Step::new("#gone", "Lost", "Nowhere.")];
        let mut engine = Engine::new(page(), MemoryFlags::new(), steps, Options::default());
        engine.start(false);

        assert_eq!(engine.state(), State::TourStep(0));
        assert!(frame(&engine).is_none());
        assert_eq!(popover(&engine).placement, Some(PopoverPlacement::Centered));
        assert!(popover(&engine).visible);
        assert!(logs_contain("tour target not found"));
    }

    #[traced_test]
    #[test]
    fn blank_selectors_are_reported() {
        let steps = vec![Step::new("  ", "Blank", "")];
        let mut engine = Engine::new(page(), MemoryFlags::new(), steps, Options::default());
        assert!(logs_contain("blank target selector"));
        engine.start(false);
        assert_eq!(popover(&engine).placement, Some(PopoverPlacement::Centered));
    }

    #[test]
    fn hints_render_beacons() {
        let mut engine = engine(Options::default());
        engine.add_hints(hints());
        let origins: Vec<Point> = engine.host().beacons().iter().map(|b| b.origin).collect();
        assert_eq!(origins, vec![Point::new(90.0, 90.0), Point::new(590.0, 290.0)]);
        assert_eq!(engine.state(), State::Idle);
    }

    #[test]
    fn hint_popover_content() {
        let mut engine = engine(Options::default());
        engine.add_hints(hints());
        assert!(engine.show_hint(0));
        assert_eq!(engine.state(), State::HintOpen(0));

        let popover = popover(&engine);
        assert_eq!(popover.title, "Hint");
        assert_eq!(popover.body, "Untitled hint.");
        assert_eq!(popover.counter, None);
        assert_eq!(popover.controls, Controls::HINT);
        assert_eq!(popover.primary_label, "Got it");
        assert!(frame(&engine).is_some());
        assert_eq!(engine.host().scroll_offset(), Vec2::ZERO, "hints do not scroll");
    }

    #[test]
    fn hint_replaces_tour_without_recording_it() {
        let mut engine = engine(run_once("mixed"));
        engine.add_hints(hints());
        engine.start(false);
        assert!(engine.show_hint(1));
        assert_eq!(engine.state(), State::HintOpen(1));

        engine.skip();
        assert_eq!(engine.state(), State::Idle);
        assert!(!engine.store().is_set("guideme_tour_mixed"));
    }

    #[test]
    fn non_persistent_hints_are_dismissed_on_open() {
        let mut engine = engine(Options {
            persist_hints: false,
            ..Options::default()
        });
        engine.add_hints(hints());
        assert!(engine.show_hint(0));
        assert!(engine.markers().is_dismissed(0));
        assert!(!engine.host().beacons()[0].visible);

        engine.skip();
        assert!(!engine.show_hint(0), "dismissed beacon cannot reopen");
        assert_eq!(
            engine.handle(&Event::Click(ClickTarget::Beacon(0))),
            Outcome::Stop
        );
        assert_eq!(engine.state(), State::Idle);

        engine.handle(&Event::Resize);
        engine.relayout();
        assert!(engine.markers().beacon(0).is_none());

        engine.add_hints(hints());
        assert!(engine.show_hint(0), "re-registering clears dismissals");
    }

    #[test]
    fn persistent_hints_reopen() {
        let mut engine = engine(Options::default());
        engine.add_hints(hints());
        assert!(engine.show_hint(1));
        engine.skip();
        assert!(engine.show_hint(1));
    }

    #[test]
    fn unknown_hint_index_is_ignored() {
        let mut engine = engine(Options::default());
        engine.add_hints(hints());
        assert!(!engine.show_hint(7));
        assert_eq!(engine.state(), State::Idle);
    }

    #[traced_test]
    #[test]
    fn hint_target_removed_after_render_centers_popover() {
        let mut engine = engine(Options::default());
        engine.add_hints(hints());
        engine.host_mut().remove_element("#c");
        assert!(engine.show_hint(1));
        assert!(frame(&engine).is_none());
        assert_eq!(popover(&engine).placement, Some(PopoverPlacement::Centered));
        assert!(logs_contain("hint target not found"));
    }

    #[test]
    fn outside_click_closes_hint_only() {
        let mut engine = engine(Options::default());
        engine.add_hints(hints());
        engine.start(false);
        engine.handle(&Event::Click(ClickTarget::Outside));
        assert_eq!(engine.state(), State::TourStep(0));

        engine.show_hint(0);
        engine.handle(&Event::Click(ClickTarget::Popover));
        assert_eq!(engine.state(), State::HintOpen(0));
        engine.handle(&Event::Click(ClickTarget::Outside));
        assert_eq!(engine.state(), State::Idle);
    }

    #[test]
    fn keyboard_drives_the_tour() {
        let mut engine = engine(Options::default());
        engine.start(false);
        engine.handle(&Event::Key(Key::ArrowRight));
        engine.handle(&Event::Key(Key::ArrowRight));
        assert_eq!(engine.state(), State::TourStep(2));
        engine.handle(&Event::Key(Key::ArrowLeft));
        assert_eq!(engine.state(), State::TourStep(1));
        engine.handle(&Event::Key(Key::Escape));
        assert_eq!(engine.state(), State::Idle);
    }

    #[test]
    fn popover_controls() {
        let mut engine = engine(Options::default());
        engine.add_hints(hints());
        let click = |c| Event::Click(ClickTarget::Control(c));

        engine.start(false);
        engine.handle(&click(Control::Next));
        engine.handle(&click(Control::Prev));
        assert_eq!(engine.state(), State::TourStep(0));
        engine.handle(&click(Control::Close));
        assert_eq!(engine.state(), State::Idle);

        engine.handle(&Event::Click(ClickTarget::Beacon(1)));
        assert_eq!(engine.state(), State::HintOpen(1));
        engine.handle(&click(Control::Next));
        assert_eq!(engine.state(), State::Idle, "\"Got it\" closes the hint");
    }

    #[test]
    fn resize_recomputes_positions() {
        let mut engine = engine(Options::default());
        engine.add_hints(hints());
        engine.start(false);
        engine.next();
        engine.next();

        engine.host_mut().insert_element("#c", Rect::from_origin_size((200.0, 300.0), (100.0, 40.0)));
        engine.host_mut().set_viewport(Size::new(600.0, 768.0));
        engine.handle(&Event::Resize);

        assert_eq!(
            frame(&engine),
            Some(Rect::from_origin_size((195.0, 295.0), (110.0, 50.0)))
        );
        // Right of #c is 315, but a 300-wide popover must end 10 before 600.
        match popover(&engine).placement {
            Some(PopoverPlacement::At(p)) => assert_eq!(p.x, 290.0),
            other => panic!("unexpected placement {other:?}"),
        }
        assert_eq!(engine.host().beacons()[1].origin, Point::new(190.0, 290.0));
    }

    #[test]
    fn resize_while_idle_changes_nothing() {
        let mut engine = engine(Options::default());
        engine.add_hints(hints());
        let created = engine.host().beacons_created();
        engine.handle(&Event::Resize);
        assert_eq!(engine.host().beacons_created(), created);
    }

    #[test]
    fn adding_hints_closes_an_open_hint() {
        let mut engine = engine(Options::default());
        engine.add_hints(hints());
        engine.show_hint(1);
        engine.add_hints(vec![Step::new("#a", "Only", "")]);
        assert_eq!(engine.state(), State::Idle);
        assert_eq!(engine.markers().len(), 1);
        assert_eq!(engine.host().beacons().len(), 1);
    }

    #[test]
    fn destroy_tears_everything_down() {
        let mut engine = engine(Options::default());
        engine.add_hints(hints());
        engine.start(false);
        engine.destroy();

        assert!(engine.is_destroyed());
        assert_eq!(engine.state(), State::Idle);
        assert!(engine.host().overlay().is_none());
        assert!(engine.host().beacons().is_empty());

        assert!(!engine.start(true));
        assert!(!engine.show_hint(0));
        engine.add_hints(hints());
        assert!(engine.host().beacons().is_empty());
        assert_eq!(
            engine.handle(&Event::Click(ClickTarget::Beacon(0))),
            Outcome::Continue
        );
    }

    struct FailingStore;

    impl FlagStore for FailingStore {
        fn is_set(&self, _: &str) -> bool {
            false
        }

        fn set(&mut self, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".into()))
        }
    }

    #[traced_test]
    #[test]
    fn store_failures_are_logged_not_raised() {
        let mut engine = Engine::new(page(), FailingStore, steps(), run_once("t"));
        engine.start(false);
        engine.skip();
        assert_eq!(engine.state(), State::Idle);
        assert!(logs_contain("could not record tour completion"));
    }
}
