// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two indicators over a committed widget tree.
//!
//! Builds a small tree, commits world geometry, and drives the engine with
//! the tree as picker (via the `tree_adapter` feature). A mouse and a
//! stylus hover different branches at the same time; the engine keeps their
//! stacks independent while the per-widget hovered flag aggregates both.
//!
//! Run:
//! - `cargo run -p hoverlay_demos --example hover_widget_tree`

use hoverlay_dispatch::engine::Engine;
use hoverlay_dispatch::types::{HoverHandler, IndicatorId, IndicatorKind};
use hoverlay_tree::{LocalWidget, Tree, WidgetId};
use kurbo::{Point, Rect};

struct Printer;

impl HoverHandler<WidgetId> for Printer {
    type Error = std::convert::Infallible;

    fn on_hover_enter(
        &mut self,
        indicator: IndicatorId,
        widget: &WidgetId,
        point: Point,
    ) -> Result<(), Self::Error> {
        println!("  {indicator:?} enter {widget:?} at {point:?}");
        Ok(())
    }

    fn on_hover_leave(
        &mut self,
        indicator: IndicatorId,
        widget: &WidgetId,
    ) -> Result<(), Self::Error> {
        println!("  {indicator:?} leave {widget:?}");
        Ok(())
    }
}

fn widget(bounds: Rect) -> LocalWidget {
    LocalWidget {
        local_bounds: bounds,
        ..Default::default()
    }
}

fn main() {
    let mut tree = Tree::new();
    let root = tree.insert(None, widget(Rect::new(0.0, 0.0, 640.0, 480.0)));
    let left = tree.insert(Some(root), widget(Rect::new(0.0, 0.0, 320.0, 480.0)));
    let button = tree.insert(Some(left), widget(Rect::new(40.0, 40.0, 280.0, 120.0)));
    let right = tree.insert(Some(root), widget(Rect::new(320.0, 0.0, 640.0, 480.0)));
    tree.commit();

    let mut engine: Engine<WidgetId> = Engine::new();
    let mut handler = Printer;
    let mouse = IndicatorId(1);
    let stylus = IndicatorId(2);

    println!("== Mouse over the left button ==");
    let _ = engine.sample_move(
        mouse,
        IndicatorKind::Grabbable,
        Point::new(100.0, 80.0),
        &tree,
        &mut handler,
    );

    println!("== Stylus over the right pane ==");
    let _ = engine.sample_move(
        stylus,
        IndicatorKind::HoverOnly,
        Point::new(500.0, 200.0),
        &tree,
        &mut handler,
    );

    println!(
        "root hovered by {} indicator(s); button by {}",
        engine.indicator_count(&root),
        engine.indicator_count(&button),
    );
    assert_eq!(engine.indicator_count(&root), 2);

    println!("== Stylus leaves the surface ==");
    let _ = engine.sample_end(stylus, &mut handler);
    assert_eq!(engine.indicator_count(&root), 1);
    assert!(engine.is_hovered(&button));
}
