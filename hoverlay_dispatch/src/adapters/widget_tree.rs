// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picker adapter for the Hoverlay widget tree.
//!
//! ## Feature
//!
//! Enable with `tree_adapter`.
//!
//! ## Notes
//!
//! With this adapter a committed [`Tree`] plugs directly into
//! [`Engine::sample_move`](crate::engine::Engine::sample_move) as the
//! picker. [`Descend::IfCollides`] verdicts are resolved against the
//! container's own clipped world region via [`Tree::contains_point`], so a
//! self-collide scroll container admits its children only while the point
//! is inside its viewport.

use alloc::vec::Vec;

use hoverlay_tree::{Tree, WalkFilter, WidgetId};
use kurbo::Point;

use crate::types::{Descend, HoverPicker};

impl HoverPicker<WidgetId> for Tree {
    fn pick(&self, point: Point, gate: &mut dyn FnMut(&WidgetId) -> Descend) -> Vec<WidgetId> {
        let filter = WalkFilter {
            visible_only: true,
            hoverable_only: true,
        };
        self.hovered_at_point_with(point, filter, &mut |id| match gate(&id) {
            Descend::Allow => true,
            Descend::Block => false,
            Descend::IfCollides => self.contains_point(id, point),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use crate::engine::Engine;
    use crate::types::{FilterPolicy, HoverPhase, IndicatorId, IndicatorKind, NullHandler};
    use hoverlay_tree::LocalWidget;
    use kurbo::Rect;

    fn widget(bounds: Rect) -> LocalWidget {
        LocalWidget {
            local_bounds: bounds,
            ..Default::default()
        }
    }

    #[test]
    fn tree_drives_the_engine() {
        let mut tree = Tree::new();
        let root = tree.insert(None, widget(Rect::new(0.0, 0.0, 400.0, 400.0)));
        let panel = tree.insert(Some(root), widget(Rect::new(0.0, 0.0, 200.0, 200.0)));
        let button = tree.insert(Some(panel), widget(Rect::new(50.0, 50.0, 150.0, 150.0)));
        tree.commit();

        let mut engine: Engine<WidgetId> = Engine::new();
        let mut h = NullHandler;
        let out = engine.sample_move(
            IndicatorId(1),
            IndicatorKind::Grabbable,
            Point::new(100.0, 100.0),
            &tree,
            &mut h,
        );
        let order: Vec<WidgetId> = out.dispatches.iter().map(|d| d.widget).collect();
        assert_eq!(order, vec![button, panel, root]);
        assert!(
            out.dispatches.iter().all(|d| d.phase == HoverPhase::Enter),
            "first sample enters everything"
        );
    }

    #[test]
    fn self_collide_container_respects_its_clip() {
        let mut tree = Tree::new();
        let root = tree.insert(None, widget(Rect::new(0.0, 0.0, 400.0, 400.0)));
        // A viewport whose child extends past the right edge; the clip keeps
        // the child's visible region inside the viewport.
        let mut viewport = widget(Rect::new(0.0, 0.0, 100.0, 100.0));
        viewport.local_clip = Some(Rect::new(0.0, 0.0, 100.0, 100.0).to_rounded_rect(0.0));
        let viewport = tree.insert(Some(root), viewport);
        let content = tree.insert(Some(viewport), widget(Rect::new(0.0, 0.0, 300.0, 100.0)));
        tree.commit();

        let mut engine: Engine<WidgetId> = Engine::new();
        engine.set_filter(viewport, FilterPolicy::SelfCollide);
        let mut h = NullHandler;

        // Inside the viewport: content hovers.
        let _ = engine.sample_move(
            IndicatorId(1),
            IndicatorKind::HoverOnly,
            Point::new(50.0, 50.0),
            &tree,
            &mut h,
        );
        assert!(engine.hovered_by(IndicatorId(1)).contains(&content));

        // Outside the viewport (where unclipped content would extend): the
        // gate refuses descent and the content leaves.
        let out = engine.sample_move(
            IndicatorId(1),
            IndicatorKind::HoverOnly,
            Point::new(200.0, 50.0),
            &tree,
            &mut h,
        );
        assert!(
            out.dispatches
                .iter()
                .any(|d| d.phase == HoverPhase::Leave && d.widget == content)
        );
        assert!(!engine.hovered_by(IndicatorId(1)).contains(&content));
    }

    #[test]
    fn grab_bypass_reaches_clipped_children() {
        let mut tree = Tree::new();
        let root = tree.insert(None, widget(Rect::new(0.0, 0.0, 400.0, 400.0)));
        let panel = tree.insert(Some(root), widget(Rect::new(0.0, 0.0, 200.0, 200.0)));
        let knob = tree.insert(Some(panel), widget(Rect::new(50.0, 50.0, 150.0, 150.0)));
        tree.commit();

        let mut engine: Engine<WidgetId> = Engine::new();
        engine.set_filter(panel, FilterPolicy::Block);
        let mut h = NullHandler;
        let ind = IndicatorId(1);

        let _ = engine.sample_move(
            ind,
            IndicatorKind::Grabbable,
            Point::new(100.0, 100.0),
            &tree,
            &mut h,
        );
        assert!(!engine.hovered_by(ind).contains(&knob));

        engine.grab(ind, panel);
        let _ = engine.sample_move(
            ind,
            IndicatorKind::Grabbable,
            Point::new(100.0, 100.0),
            &tree,
            &mut h,
        );
        assert!(engine.hovered_by(ind).contains(&knob));
    }
}
