// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, committed world geometry.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect, RoundedRect, Shape};

use crate::types::{LocalWidget, WidgetFlags, WidgetId};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level widget tree.
pub struct Tree {
    widgets: Vec<Option<Widget>>, // slots
    generations: Vec<u32>,        // last generation per slot (persists across frees)
    pub(crate) free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.widgets.len();
        let alive = self.widgets.iter().filter(|w| w.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("widgets_total", &total)
            .field("widgets_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default)]
struct WorldWidget {
    world_transform: Affine,
    world_bounds: Rect, // AABB of transformed local bounds, intersected with world_clip
    world_clip: Option<Rect>,
}

#[derive(Clone, Debug)]
pub(crate) struct Widget {
    generation: u32,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>, // insertion order = paint order within equal z
    local: LocalWidget,
    world: WorldWidget,
}

impl Widget {
    fn new(generation: u32, local: LocalWidget) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            world: WorldWidget::default(),
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            widgets: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new widget as a child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<WidgetId>, local: LocalWidget) -> WidgetId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.widgets[idx] = Some(Widget::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "WidgetId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.widgets.push(Some(Widget::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "WidgetId uses 32-bit indices by design."
            )]
            ((self.widgets.len() - 1) as u32, generation)
        };
        let id = WidgetId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a widget (and its subtree) from the tree.
    pub fn remove(&mut self, id: WidgetId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.widget(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.widget(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.widgets[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` under `new_parent` (or make it a root).
    ///
    /// The widget moves to the end of the new parent's paint order.
    pub fn reparent(&mut self, id: WidgetId, new_parent: Option<WidgetId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.widget(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Update local transform.
    pub fn set_local_transform(&mut self, id: WidgetId, tf: Affine) {
        if let Some(w) = self.widget_opt_mut(id) {
            w.local.local_transform = tf;
        }
    }

    /// Update local clip.
    pub fn set_local_clip(&mut self, id: WidgetId, clip: Option<RoundedRect>) {
        if let Some(w) = self.widget_opt_mut(id) {
            w.local.local_clip = clip;
        }
    }

    /// Update z index.
    pub fn set_z_index(&mut self, id: WidgetId, z: i32) {
        if let Some(w) = self.widget_opt_mut(id) {
            w.local.z_index = z;
        }
    }

    /// Update local bounds.
    pub fn set_local_bounds(&mut self, id: WidgetId, bounds: Rect) {
        if let Some(w) = self.widget_opt_mut(id) {
            w.local.local_bounds = bounds;
        }
    }

    /// Update widget flags.
    pub fn set_flags(&mut self, id: WidgetId, flags: WidgetFlags) {
        if let Some(w) = self.widget_opt_mut(id) {
            w.local.flags = flags;
        }
    }

    /// Access a widget; panics if `id` is stale.
    pub(crate) fn widget(&self, id: WidgetId) -> &Widget {
        self.widgets[id.idx()].as_ref().expect("dangling WidgetId")
    }

    /// Access a widget mutably; panics if `id` is stale.
    pub(crate) fn widget_mut(&mut self, id: WidgetId) -> &mut Widget {
        self.widgets[id.idx()].as_mut().expect("dangling WidgetId")
    }

    /// Recompute world transforms, clips, and bounds for the whole tree.
    ///
    /// Ancestor clips are propagated down and folded into each widget's world
    /// bounds, so containment queries after a commit are clip-aware without
    /// any per-query ancestor walk.
    pub fn commit(&mut self) {
        for root in self.roots() {
            self.update_world_recursive(root, Affine::IDENTITY, None);
        }
    }

    /// Whether a world-space point lies inside the widget's visible, clipped region.
    ///
    /// This is the boundary query behind hover walking and collision filters.
    /// Returns `false` for stale ids, invisible widgets, and degenerate
    /// (zero-area) regions. Ancestor clipping is honored because clips are
    /// folded into world bounds at [`Tree::commit`].
    pub fn contains_point(&self, id: WidgetId, pt: Point) -> bool {
        let Some(w) = self.widget_opt(id) else {
            return false;
        };
        if !w.local.flags.contains(WidgetFlags::VISIBLE) {
            return false;
        }
        let b = w.world.world_bounds;
        if b.width() <= 0.0 || b.height() <= 0.0 {
            return false;
        }
        if !b.contains(pt) {
            return false;
        }
        // Precise check against an own rounded clip, where cheap.
        if let Some(clip) = w.local.local_clip {
            let local_pt = w.world.world_transform.inverse() * pt;
            if !clip.contains(local_pt) {
                return false;
            }
        }
        true
    }

    /// Returns true if `id` refers to a live widget.
    ///
    /// A `WidgetId` is live if its slot exists and its generation matches the
    /// current generation stored in that slot. See [`WidgetId`] docs for the
    /// generational semantics.
    pub fn is_alive(&self, id: WidgetId) -> bool {
        self.widgets
            .get(id.idx())
            .and_then(|w| w.as_ref())
            .map(|w| w.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns the z-index of a widget if the identifier is live.
    pub fn z_index(&self, id: WidgetId) -> Option<i32> {
        self.widget_opt(id).map(|w| w.local.z_index)
    }

    /// Returns the parent of a widget if the identifier is live.
    pub fn parent_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.widget_opt(id).and_then(|w| w.parent)
    }

    /// Returns the children of a widget in paint order (back to front).
    pub fn children_of(&self, id: WidgetId) -> &[WidgetId] {
        self.widget_opt(id).map(|w| &w.children[..]).unwrap_or(&[])
    }

    /// Returns the committed world bounds (clipped AABB) if the identifier is live.
    pub fn world_bounds(&self, id: WidgetId) -> Option<Rect> {
        self.widget_opt(id).map(|w| w.world.world_bounds)
    }

    /// Root widgets in insertion order.
    pub(crate) fn roots(&self) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .enumerate()
            .filter_map(|(i, w)| match w {
                Some(w) if w.parent.is_none() =>
                {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "WidgetId uses 32-bit indices by design."
                    )]
                    Some(WidgetId::new(i as u32, w.generation))
                }
                _ => None,
            })
            .collect()
    }

    // --- internals ---

    #[inline]
    pub(crate) fn id_is_newer(a: WidgetId, b: WidgetId) -> bool {
        (a.1 > b.1) || (a.1 == b.1 && a.0 > b.0)
    }

    pub(crate) fn widget_opt(&self, id: WidgetId) -> Option<&Widget> {
        let w = self.widgets.get(id.idx())?.as_ref()?;
        if w.generation != id.1 {
            return None;
        }
        Some(w)
    }

    fn widget_opt_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        let w = self.widgets.get_mut(id.idx())?.as_mut()?;
        if w.generation != id.1 {
            return None;
        }
        Some(w)
    }

    pub(crate) fn flags(&self, id: WidgetId) -> WidgetFlags {
        self.widget_opt(id)
            .map(|w| w.local.flags)
            .unwrap_or(WidgetFlags::empty())
    }

    fn link_parent(&mut self, id: WidgetId, parent: WidgetId) {
        let parent_widget = self.widget_mut(parent);
        parent_widget.children.push(id);
        self.widget_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: WidgetId, parent: WidgetId) {
        let p = self.widget_mut(parent);
        p.children.retain(|c| *c != id);
        self.widget_mut(id).parent = None;
    }

    fn update_world_recursive(
        &mut self,
        id: WidgetId,
        parent_tf: Affine,
        parent_clip: Option<Rect>,
    ) {
        let (child_ids, world_transform, world_clip) = {
            let w = self.widget_mut(id);
            w.world.world_transform = parent_tf * w.local.local_transform;
            let mut world_bounds = w
                .world
                .world_transform
                .transform_rect_bbox(w.local.local_bounds);
            let world_clip = w
                .local
                .local_clip
                .map(|rr| w.world.world_transform.transform_rect_bbox(rr.rect()))
                .or(parent_clip);
            if let Some(c) = world_clip {
                world_bounds = world_bounds.intersect(c);
            }
            w.world.world_bounds = world_bounds;
            w.world.world_clip = world_clip;
            (w.children.clone(), w.world.world_transform, world_clip)
        };

        for child in child_ids {
            self.update_world_recursive(child, world_transform, world_clip);
        }
    }
}
