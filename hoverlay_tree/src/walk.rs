// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover hit walking: the ordered containment stack for a point.
//!
//! ## Ordering
//!
//! The walk yields widgets in reverse paint order: at every widget, children
//! are visited before the widget itself, and siblings are visited from
//! topmost to bottommost (descending `z_index`, newest id first on ties, and
//! otherwise the reverse of insertion order). The first yielded widget is
//! therefore the deepest, topmost match, and ancestors follow their
//! descendants, which matches click/touch hit-testing expectations.
//!
//! ## Descend gate
//!
//! The `_with` variant consults a caller-supplied gate once per widget that
//! has children, before descending. Returning `false` skips the entire child
//! subtree for this query; the gated widget itself is still tested. A hover
//! engine uses this hook to apply per-container collision filters and grab
//! bypasses without this crate knowing about indicators at all.

use alloc::vec::Vec;
use kurbo::Point;

use crate::tree::Tree;
use crate::types::{WidgetFlags, WidgetId};

/// Filters applied during hover walking.
#[derive(Clone, Copy, Debug, Default)]
pub struct WalkFilter {
    /// If true, only consider widgets marked [`WidgetFlags::VISIBLE`].
    /// Invisible widgets prune their whole subtree.
    pub visible_only: bool,
    /// If true, only yield widgets marked [`WidgetFlags::HOVERABLE`].
    /// Non-hoverable widgets are skipped individually; their children are
    /// still walked.
    pub hoverable_only: bool,
}

impl Tree {
    /// All widgets whose visible region contains `pt`, topmost first.
    ///
    /// Equivalent to [`Tree::hovered_at_point_with`] with a gate that always
    /// descends. Requires a prior [`Tree::commit`].
    pub fn hovered_at_point(&self, pt: Point, filter: WalkFilter) -> Vec<WidgetId> {
        self.hovered_at_point_with(pt, filter, &mut |_| true)
    }

    /// All widgets whose visible region contains `pt`, topmost first, with a
    /// per-container descend gate.
    ///
    /// A widget appears at most once. A point outside everything yields an
    /// empty vector.
    pub fn hovered_at_point_with(
        &self,
        pt: Point,
        filter: WalkFilter,
        gate: &mut dyn FnMut(WidgetId) -> bool,
    ) -> Vec<WidgetId> {
        let mut out = Vec::new();
        for root in self.roots_top_down() {
            self.walk_recursive(root, pt, filter, gate, &mut out);
        }
        out
    }

    fn walk_recursive(
        &self,
        id: WidgetId,
        pt: Point,
        filter: WalkFilter,
        gate: &mut dyn FnMut(WidgetId) -> bool,
        out: &mut Vec<WidgetId>,
    ) {
        let flags = self.flags(id);
        if filter.visible_only && !flags.contains(WidgetFlags::VISIBLE) {
            return;
        }
        let children = self.children_of(id);
        if !children.is_empty() && gate(id) {
            for child in self.top_down(children) {
                self.walk_recursive(child, pt, filter, gate, out);
            }
        }
        if filter.hoverable_only && !flags.contains(WidgetFlags::HOVERABLE) {
            return;
        }
        if self.contains_point(id, pt) {
            out.push(id);
        }
    }

    /// Siblings in reverse paint order: descending z, then newest id first.
    fn top_down(&self, children: &[WidgetId]) -> Vec<WidgetId> {
        let mut kids: Vec<WidgetId> = children.iter().rev().copied().collect();
        // Stable sort keeps the reversed insertion order within equal z; the
        // explicit newness check only matters across slot reuse.
        kids.sort_by(|&a, &b| {
            let za = self.z_index(a).unwrap_or(0);
            let zb = self.z_index(b).unwrap_or(0);
            zb.cmp(&za).then_with(|| {
                if Self::id_is_newer(a, b) {
                    core::cmp::Ordering::Less
                } else if Self::id_is_newer(b, a) {
                    core::cmp::Ordering::Greater
                } else {
                    core::cmp::Ordering::Equal
                }
            })
        });
        kids
    }

    fn roots_top_down(&self) -> Vec<WidgetId> {
        self.top_down(&self.roots())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use crate::types::LocalWidget;
    use kurbo::{Rect, RoundedRect};

    fn local(x0: f64, y0: f64, x1: f64, y1: f64, z: i32) -> LocalWidget {
        LocalWidget {
            local_bounds: Rect::new(x0, y0, x1, y1),
            z_index: z,
            ..Default::default()
        }
    }

    #[test]
    fn overlap_yields_child_then_ancestor() {
        let mut tree = Tree::new();
        let root = tree.insert(None, local(0.0, 0.0, 400.0, 400.0, 0));
        let a = tree.insert(Some(root), local(50.0, 50.0, 150.0, 150.0, 0));
        tree.commit();

        let stack = tree.hovered_at_point(Point::new(100.0, 100.0), WalkFilter::default());
        assert_eq!(stack, vec![a, root], "inner topmost first, ancestor after");
    }

    #[test]
    fn siblings_topmost_first_by_z() {
        let mut tree = Tree::new();
        let root = tree.insert(None, local(0.0, 0.0, 400.0, 400.0, 0));
        let low = tree.insert(Some(root), local(50.0, 50.0, 150.0, 150.0, 0));
        let high = tree.insert(Some(root), local(50.0, 50.0, 150.0, 150.0, 10));
        tree.commit();

        let stack = tree.hovered_at_point(Point::new(100.0, 100.0), WalkFilter::default());
        assert_eq!(stack, vec![high, low, root]);
    }

    #[test]
    fn equal_z_later_inserted_is_topmost() {
        let mut tree = Tree::new();
        let root = tree.insert(None, local(0.0, 0.0, 400.0, 400.0, 0));
        let first = tree.insert(Some(root), local(50.0, 50.0, 150.0, 150.0, 5));
        let second = tree.insert(Some(root), local(50.0, 50.0, 150.0, 150.0, 5));
        tree.commit();

        let stack = tree.hovered_at_point(Point::new(100.0, 100.0), WalkFilter::default());
        assert_eq!(stack, vec![second, first, root]);
    }

    #[test]
    fn point_outside_everything_is_empty() {
        let mut tree = Tree::new();
        let _root = tree.insert(None, local(0.0, 0.0, 100.0, 100.0, 0));
        tree.commit();
        let stack = tree.hovered_at_point(Point::new(500.0, 500.0), WalkFilter::default());
        assert!(stack.is_empty());
    }

    #[test]
    fn clipped_child_never_matches() {
        let mut tree = Tree::new();
        let root = tree.insert(None, local(0.0, 0.0, 400.0, 400.0, 0));
        // Scroll-viewport-style container with a tight clip.
        let viewport = tree.insert(Some(root), local(0.0, 0.0, 400.0, 400.0, 0));
        tree.set_local_clip(
            viewport,
            Some(RoundedRect::from_rect(
                Rect::new(0.0, 0.0, 100.0, 100.0),
                0.0,
            )),
        );
        // Child extends well past the viewport clip.
        let row = tree.insert(Some(viewport), local(0.0, 150.0, 400.0, 200.0, 0));
        tree.commit();

        // Inside the row's raw bounds but outside the viewport's clip window.
        let stack = tree.hovered_at_point(Point::new(50.0, 175.0), WalkFilter::default());
        assert!(!stack.contains(&row), "clipped child must never match");
        assert_eq!(stack, vec![root]);
    }

    #[test]
    fn invisible_subtree_is_pruned() {
        let mut tree = Tree::new();
        let root = tree.insert(None, local(0.0, 0.0, 400.0, 400.0, 0));
        let hidden = tree.insert(Some(root), local(0.0, 0.0, 400.0, 400.0, 1));
        let child = tree.insert(Some(hidden), local(0.0, 0.0, 400.0, 400.0, 0));
        tree.set_flags(hidden, WidgetFlags::HOVERABLE);
        tree.commit();

        let filter = WalkFilter {
            visible_only: true,
            hoverable_only: true,
        };
        let stack = tree.hovered_at_point(Point::new(50.0, 50.0), filter);
        assert!(!stack.contains(&hidden));
        assert!(
            !stack.contains(&child),
            "children of an invisible widget are excluded"
        );
        assert_eq!(stack, vec![root]);
    }

    #[test]
    fn gate_skips_subtree_but_not_container() {
        let mut tree = Tree::new();
        let root = tree.insert(None, local(0.0, 0.0, 400.0, 400.0, 0));
        let panel = tree.insert(Some(root), local(0.0, 0.0, 200.0, 200.0, 1));
        let inner = tree.insert(Some(panel), local(0.0, 0.0, 200.0, 200.0, 0));
        tree.commit();

        let blocked = panel;
        let stack = tree.hovered_at_point_with(
            Point::new(50.0, 50.0),
            WalkFilter::default(),
            &mut |id| id != blocked,
        );
        assert!(!stack.contains(&inner), "gated subtree must be skipped");
        assert_eq!(stack, vec![panel, root]);
    }

    #[test]
    fn non_hoverable_is_skipped_children_still_walked() {
        let mut tree = Tree::new();
        let root = tree.insert(None, local(0.0, 0.0, 400.0, 400.0, 0));
        let decor = tree.insert(Some(root), local(0.0, 0.0, 200.0, 200.0, 1));
        let button = tree.insert(Some(decor), local(10.0, 10.0, 90.0, 90.0, 0));
        tree.set_flags(decor, WidgetFlags::VISIBLE);
        tree.commit();

        let filter = WalkFilter {
            visible_only: true,
            hoverable_only: true,
        };
        let stack = tree.hovered_at_point(Point::new(50.0, 50.0), filter);
        assert_eq!(stack, vec![button, root]);
    }
}
