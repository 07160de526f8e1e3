// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enter/update/leave dispatch over a hand-rolled picker.
//!
//! This example feeds three samples through the engine — settle on a
//! nested stack, cross to a disjoint sibling, then end the indicator —
//! and prints the notifications each sample produced.
//!
//! Run:
//! - `cargo run -p hoverlay_demos --example hover_basics`

use hoverlay_dispatch::engine::Engine;
use hoverlay_dispatch::types::{Descend, HoverPicker, IndicatorId, IndicatorKind, NullHandler};
use kurbo::{Point, Rect};

/// A fixed scene: a root pane holding a card, which holds a button, plus a
/// disjoint sidebar. Ids double as labels.
struct Scene;

const ROOT: (u32, Rect) = (0, Rect::new(0.0, 0.0, 640.0, 480.0));
const CARD: (u32, Rect) = (1, Rect::new(40.0, 40.0, 360.0, 300.0));
const BUTTON: (u32, Rect) = (2, Rect::new(60.0, 60.0, 200.0, 110.0));
const SIDEBAR: (u32, Rect) = (3, Rect::new(420.0, 0.0, 640.0, 480.0));

impl HoverPicker<u32> for Scene {
    fn pick(&self, point: Point, _gate: &mut dyn FnMut(&u32) -> Descend) -> Vec<u32> {
        // Deepest first, the way a tree walker emits hits.
        [BUTTON, CARD, SIDEBAR, ROOT]
            .iter()
            .filter(|(_, r)| r.contains(point))
            .map(|(id, _)| *id)
            .collect()
    }
}

fn main() {
    let mut engine: Engine<u32> = Engine::new();
    let mut handler = NullHandler;
    let mouse = IndicatorId(1);

    let out = engine.sample_move(
        mouse,
        IndicatorKind::Grabbable,
        Point::new(100.0, 80.0),
        &Scene,
        &mut handler,
    );
    println!("== Over the button ==");
    for d in &out.dispatches {
        println!("  {:?} widget {}", d.phase, d.widget);
    }
    println!("  hovered stack: {:?}", engine.hovered_by(mouse));

    let out = engine.sample_move(
        mouse,
        IndicatorKind::Grabbable,
        Point::new(500.0, 200.0),
        &Scene,
        &mut handler,
    );
    println!("== Crossed to the sidebar ==");
    for d in &out.dispatches {
        println!("  {:?} widget {}", d.phase, d.widget);
    }

    let out = engine.sample_end(mouse, &mut handler);
    println!("== Indicator gone ==");
    for d in &out.dispatches {
        println!("  {:?} widget {}", d.phase, d.widget);
    }
    assert!(engine.hovered_by(mouse).is_empty());
}
