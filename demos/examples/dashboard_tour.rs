// Copyright 2026 the GuideMe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A dashboard walkthrough on a simulated page.
//!
//! This example shows:
//! - steps, hints and options loaded from the same JSON the browser API takes,
//! - a run-once tour whose completion survives between runs in a JSON file,
//! - non-persistent hints that disappear once opened,
//! - clicks located on the page with `HeadlessPage::hit_test` and routed through the engine.
//!
//! Run:
//! - `cargo run -p guideme_demos --example dashboard_tour`
//! - `RUST_LOG=debug cargo run -p guideme_demos --example dashboard_tour -- /tmp/flags.json`

use guideme_engine::host::Host;
use guideme_engine::router::{ClickTarget, Event, Key};
use guideme_engine::{
    Engine, FlagStore, HeadlessPage, JsonFileFlags, Options, Step, parse_steps,
};
use kurbo::{Point, Rect, Size, Vec2};
use tracing_subscriber::EnvFilter;

const STEPS: &str = r##"[
  { "element": "#sidebar", "title": "Navigation",
    "description": "Use the sidebar to navigate between different sections of the dashboard.",
    "position": "right" },
  { "element": "#nav-analytics", "title": "Analytics",
    "description": "Check your daily stats here.", "position": "right" },
  { "element": "#header", "title": "Header",
    "description": "Manage your profile and settings from the top bar.", "position": "bottom" },
  { "element": "#widget-sales", "title": "Sales Widget",
    "description": "View your current sales performance.", "position": "top" },
  { "element": "#start-tour-btn", "title": "Help",
    "description": "Click here anytime to restart this tour.", "position": "left" }
]"##;

const HINTS: &str = r##"[
  { "element": "#widget-users", "title": "Active Users",
    "description": "This number updates in real-time.", "position": "top" },
  { "element": "#widget-revenue", "title": "Revenue",
    "description": "Revenue is calculated before tax.", "position": "top" }
]"##;

const OPTIONS: &str = r#"{ "persistHints": false, "runOnce": true, "tourId": "dashboard-v1" }"#;

fn dashboard() -> HeadlessPage {
    let rect = |x: f64, y: f64, w: f64, h: f64| Rect::from_origin_size((x, y), (w, h));
    HeadlessPage::new(Size::new(1280.0, 720.0))
        .with_element("#sidebar", rect(0.0, 0.0, 240.0, 1400.0))
        .with_element("#nav-analytics", rect(16.0, 180.0, 208.0, 40.0))
        .with_element("#header", rect(240.0, 0.0, 1040.0, 64.0))
        .with_element("#start-tour-btn", rect(1120.0, 14.0, 140.0, 36.0))
        .with_element("#widget-sales", rect(272.0, 900.0, 300.0, 160.0))
        .with_element("#widget-users", rect(604.0, 900.0, 300.0, 160.0))
        .with_element("#widget-revenue", rect(936.0, 900.0, 300.0, 160.0))
}

fn describe<S: FlagStore>(engine: &Engine<HeadlessPage, S>) {
    let page = engine.host();
    let Some(overlay) = page.overlay() else {
        println!("  (overlay unmounted)");
        return;
    };
    let popover = &overlay.popover;
    if !popover.visible {
        println!("  state {:?}, popover hidden", engine.state());
        return;
    }
    println!(
        "  state {:?}: {:?} [{}] primary {:?}",
        engine.state(),
        popover.title,
        popover.counter.as_deref().unwrap_or("-"),
        popover.primary_label,
    );
    if let Some(rect) = page.popover_rect() {
        println!("    popover at ({:.0}, {:.0})", rect.x0, rect.y0);
    }
    if let Some(frame) = overlay.frame {
        println!(
            "    frame {:.0}x{:.0} at ({:.0}, {:.0}), scroll y {:.0}",
            frame.width(),
            frame.height(),
            frame.x0,
            frame.y0,
            page.scroll_offset().y,
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .map_or_else(|| std::env::temp_dir().join("guideme-dashboard.json"), Into::into);
    let store = JsonFileFlags::open(&path)?;
    println!("completion flags in {}", store.path().display());

    let steps: Vec<Step> = parse_steps(STEPS)?;
    let hints = parse_steps(HINTS)?;
    let options = Options::from_json(OPTIONS)?;

    let mut engine = Engine::new(dashboard(), store, steps, options);
    engine.add_hints(hints);
    println!("{} beacons placed", engine.host().beacons().len());

    println!("start():");
    if !engine.start(false) {
        println!("  already completed; forcing it like the help button does");
        engine.start(true);
    }
    describe(&engine);

    println!("ArrowRight x2, ArrowLeft:");
    engine.handle(&Event::Key(Key::ArrowRight));
    engine.handle(&Event::Key(Key::ArrowRight));
    engine.handle(&Event::Key(Key::ArrowLeft));
    describe(&engine);

    println!("next() to the end:");
    while engine.session().in_tour() {
        engine.next();
        describe(&engine);
    }

    let beacon = engine.host().beacons()[0].origin + Vec2::new(5.0, 5.0);
    println!("click at {beacon:?}:");
    let target = engine.host().hit_test(beacon);
    engine.handle(&Event::Click(target));
    describe(&engine);

    println!("click on an empty spot:");
    let target = engine.host().hit_test(Point::new(700.0, 400.0));
    assert_eq!(target, ClickTarget::Outside);
    engine.handle(&Event::Click(target));
    describe(&engine);

    println!("the same beacon again:");
    let target = engine.host().hit_test(beacon);
    engine.handle(&Event::Click(target));
    describe(&engine);

    engine.destroy();
    println!(
        "destroyed; tour recorded as completed: {}",
        engine.store().is_set(&engine.options().completion_key())
    );
    Ok(())
}
