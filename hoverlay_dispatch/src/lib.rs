// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=hoverlay_dispatch --heading-base-level=0

//! Hoverlay Dispatch: a deterministic, `no_std` hover dispatch engine for
//! multiple indicators.
//!
//! ## Overview
//!
//! This crate turns per-indicator position samples into enter/update/leave
//! notifications over a widget hierarchy. It does not perform hit testing
//! itself; instead it drives a [`HoverPicker`](crate::types::HoverPicker)
//! (for example the Hoverlay widget tree, via the `tree_adapter` feature)
//! and diffs the resulting hovered stack against the stored previous stack.
//!
//! ## Indicators
//!
//! Every sample names an [`IndicatorId`](crate::types::IndicatorId) and its
//! [`IndicatorKind`](crate::types::IndicatorKind). Indicators are tracked
//! independently; a mouse and a hovering stylus each maintain their own
//! hovered stack, and a widget's aggregate hovered flag is the union
//! ([`Engine::is_hovered`](crate::engine::Engine::is_hovered)).
//!
//! ## Ordering
//!
//! Per sample, leaves are delivered first in the previous stack's
//! topmost-first order, then enters and updates in the current stack's
//! topmost-first order. Per (indicator, widget) pair notifications are
//! bracketed: one enter, any number of updates, one leave.
//!
//! ## Grabs and filters
//!
//! A widget may capture a grab-capable indicator with
//! [`Engine::grab`](crate::engine::Engine::grab); while held, the widget
//! stays in that indicator's hovered stack regardless of position and
//! bypasses any [`FilterPolicy`](crate::types::FilterPolicy) attached to it.
//! Filter policies gate descent into a container's children (always, never,
//! or only while the position collides with the container itself); they
//! never fabricate geometry for descendants.
//!
//! ## Workflow
//!
//! 1) Build or adapt a picker — anything that can produce the topmost-first
//!    hovered stack for a point, consulting the engine's per-container gate.
//! 2) Feed samples — [`Engine::sample_move`](crate::engine::Engine::sample_move)
//!    per position report, [`Engine::sample_end`](crate::engine::Engine::sample_end)
//!    when the indicator disappears, [`Engine::clear`](crate::engine::Engine::clear)
//!    on teardown.
//! 3) Handle — implement [`HoverHandler`](crate::types::HoverHandler) on
//!    your dispatcher. A handler error is captured as a
//!    [`Fault`](crate::types::Fault) and never disturbs the rest of the
//!    sample's dispatch; the store transition is committed first, so the
//!    engine's view stays consistent.
//!
//! ```
//! use hoverlay_dispatch::engine::Engine;
//! use hoverlay_dispatch::types::{
//!     Descend, HoverPicker, IndicatorId, IndicatorKind, NullHandler,
//! };
//! use kurbo::{Point, Rect};
//!
//! /// A one-widget scene: id 0 covers the unit square.
//! struct Unit;
//!
//! impl HoverPicker<u32> for Unit {
//!     fn pick(&self, point: Point, _gate: &mut dyn FnMut(&u32) -> Descend) -> Vec<u32> {
//!         if Rect::new(0.0, 0.0, 1.0, 1.0).contains(point) {
//!             vec![0]
//!         } else {
//!             vec![]
//!         }
//!     }
//! }
//!
//! let mut engine: Engine<u32> = Engine::new();
//! let mut handler = NullHandler;
//! let ind = IndicatorId(1);
//! let out = engine.sample_move(
//!     ind,
//!     IndicatorKind::Grabbable,
//!     Point::new(0.5, 0.5),
//!     &Unit,
//!     &mut handler,
//! );
//! assert_eq!(out.dispatches.len(), 1);
//! assert!(engine.is_hovered(&0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod engine;
pub mod store;
pub mod types;
