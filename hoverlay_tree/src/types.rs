// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the widget tree: identifiers, flags, and local geometry.

use kurbo::{Affine, Rect, RoundedRect};

/// Identifier for a widget in the tree.
///
/// This is a small, copyable handle that stays stable across updates but
/// becomes invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `WidgetId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `WidgetId`.
///
/// ### Newer
///
/// A `WidgetId` is considered newer than another when it has a higher generation.
/// If generations are equal, the one with the higher slot index is considered newer.
/// This total order is used only for deterministic sibling ordering in
/// [hover walking](crate::Tree::hovered_at_point) when z-indices tie.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `WidgetId` still refers to a live widget.
/// Stale `WidgetId`s never alias a different live widget because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WidgetId(pub(crate) u32, pub(crate) u32);

impl WidgetId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Widget flags controlling visibility and hover participation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WidgetFlags: u8 {
        /// Widget is visible. An invisible widget excludes its whole subtree
        /// from hover walking.
        const VISIBLE   = 0b0000_0001;
        /// Widget participates in hover hit walking. A non-hoverable widget
        /// is skipped individually; its children are still considered.
        const HOVERABLE = 0b0000_0010;
    }
}

impl Default for WidgetFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::HOVERABLE
    }
}

/// Local geometry for a widget.
#[derive(Clone, Debug)]
pub struct LocalWidget {
    /// Local (untransformed) bounds. For non-axis-aligned content, use a conservative AABB.
    pub local_bounds: Rect,
    /// Local transform relative to parent space.
    pub local_transform: Affine,
    /// Optional local clip (rounded-rect). Its AABB bounds descendants' world
    /// bounds; the precise rounded shape is checked where cheap.
    pub local_clip: Option<RoundedRect>,
    /// Z-order within parent stacking context. Higher is drawn on top and
    /// visited first during hover walking.
    pub z_index: i32,
    /// Visibility and hover flags.
    pub flags: WidgetFlags,
}

impl Default for LocalWidget {
    fn default() -> Self {
        Self {
            local_bounds: Rect::ZERO,
            local_transform: Affine::IDENTITY,
            local_clip: None,
            z_index: 0,
            flags: WidgetFlags::default(),
        }
    }
}
