// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hoverlay Tree: a Kurbo-native widget box tree with hover hit walking.
//!
//! Hoverlay Tree is the geometry half of a hover-dispatch stack. It represents
//! a hierarchy of widgets with local bounds, transforms, optional clips,
//! z-order, and flags, and answers the two questions a hover engine asks:
//!
//! - *Which widgets does this world-space point cover?*
//!   [`Tree::hovered_at_point`] returns the full containment stack in reverse
//!   paint order (topmost descendant first, outer ancestors after), honoring
//!   visibility, ancestor clips, and an optional per-container descend gate.
//! - *Does this point lie inside one specific widget's visible region?*
//!   [`Tree::contains_point`] is the clip-aware boundary query the gate and
//!   collision filters resolve against.
//!
//! Geometry is resolved in a batched [`Tree::commit`] step: world transforms
//! are composed parent-to-child and ancestor clips are folded into each
//! widget's world bounds, so a child scrolled outside a clipping viewport is
//! never matched even though its raw bounds contain the point.
//!
//! ## Not a layout engine
//!
//! This crate does not measure or arrange anything. Upstream code computes
//! positions and sizes with whatever layout system it likes and mirrors the
//! results into this tree; hover dispatch then reads the committed geometry.
//!
//! ## Minimal usage
//!
//! ```
//! use hoverlay_tree::{Tree, LocalWidget, WalkFilter};
//! use kurbo::{Point, Rect};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(
//!     None,
//!     LocalWidget { local_bounds: Rect::new(0.0, 0.0, 200.0, 200.0), ..Default::default() },
//! );
//! let child = tree.insert(
//!     Some(root),
//!     LocalWidget { local_bounds: Rect::new(10.0, 10.0, 60.0, 60.0), ..Default::default() },
//! );
//! tree.commit();
//!
//! // The point covers both the child and the root; child (topmost) first.
//! let stack = tree.hovered_at_point(Point::new(25.0, 25.0), WalkFilter::default());
//! assert_eq!(stack, vec![child, root]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;
mod walk;

pub use tree::Tree;
pub use types::{LocalWidget, WidgetFlags, WidgetId};
pub use walk::WalkFilter;
