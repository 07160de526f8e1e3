// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-viewport filtering and grab capture.
//!
//! A viewport clips a wide content strip and carries a self-collide filter,
//! so the strip only hovers while the pointer is inside the viewport. A
//! slider knob then grabs the mouse; while the grab is held the knob keeps
//! receiving updates even with the pointer far outside it.
//!
//! Run:
//! - `cargo run -p hoverlay_demos --example hover_scroll_filter`

use hoverlay_dispatch::engine::Engine;
use hoverlay_dispatch::types::{FilterPolicy, IndicatorId, IndicatorKind, NullHandler};
use hoverlay_tree::{LocalWidget, Tree, WidgetId};
use kurbo::{Point, Rect};

fn widget(bounds: Rect) -> LocalWidget {
    LocalWidget {
        local_bounds: bounds,
        ..Default::default()
    }
}

fn main() {
    let mut tree = Tree::new();
    let root = tree.insert(None, widget(Rect::new(0.0, 0.0, 640.0, 480.0)));

    let mut clipped = widget(Rect::new(0.0, 0.0, 200.0, 100.0));
    clipped.local_clip = Some(Rect::new(0.0, 0.0, 200.0, 100.0).to_rounded_rect(0.0));
    let viewport = tree.insert(Some(root), clipped);
    let strip = tree.insert(Some(viewport), widget(Rect::new(0.0, 0.0, 800.0, 100.0)));

    let knob = tree.insert(Some(root), widget(Rect::new(300.0, 300.0, 340.0, 340.0)));
    tree.commit();

    let mut engine: Engine<WidgetId> = Engine::new();
    engine.set_filter(viewport, FilterPolicy::SelfCollide);
    let mut handler = NullHandler;
    let mouse = IndicatorId(1);

    // Inside the viewport the strip hovers; to its right (where the
    // unclipped strip would extend) the filter withholds descent.
    let _ = engine.sample_move(
        mouse,
        IndicatorKind::Grabbable,
        Point::new(100.0, 50.0),
        &tree,
        &mut handler,
    );
    println!("inside viewport : strip hovered = {}", engine.is_hovered(&strip));
    assert!(engine.is_hovered(&strip));

    let _ = engine.sample_move(
        mouse,
        IndicatorKind::Grabbable,
        Point::new(400.0, 50.0),
        &tree,
        &mut handler,
    );
    println!("beside viewport : strip hovered = {}", engine.is_hovered(&strip));
    assert!(!engine.is_hovered(&strip));

    // Drag the knob: grab, move far away, and watch it stay hovered.
    let _ = engine.sample_move(
        mouse,
        IndicatorKind::Grabbable,
        Point::new(320.0, 320.0),
        &tree,
        &mut handler,
    );
    engine.grab(mouse, knob);
    let _ = engine.sample_move(
        mouse,
        IndicatorKind::Grabbable,
        Point::new(50.0, 450.0),
        &tree,
        &mut handler,
    );
    println!("mid-drag        : knob hovered = {}", engine.is_hovered(&knob));
    assert!(engine.is_hovered(&knob));

    engine.release(mouse, &knob);
    let _ = engine.sample_move(
        mouse,
        IndicatorKind::Grabbable,
        Point::new(50.0, 450.0),
        &tree,
        &mut handler,
    );
    println!("after release   : knob hovered = {}", engine.is_hovered(&knob));
    assert!(!engine.is_hovered(&knob));
}
