// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for hover dispatch: indicators, phases, policies, and the
//! widget-facing protocol traits.
//!
//! ## Overview
//!
//! These types describe the hover protocol and its inputs/outputs.
//! They are referenced by the [`engine`](crate::engine) and implemented by
//! downstream toolkits: [`HoverPicker`] is the seam to a hit-walking widget
//! tree, [`HoverHandler`] the seam to widget event handlers.

use alloc::vec::Vec;

use kurbo::Point;

/// Identity of a hover indicator (a positional input device: mouse cursor,
/// hovering stylus, and similar).
///
/// An indicator comes into existence on its first
/// [`sample_move`](crate::engine::Engine::sample_move) and is discarded by
/// [`sample_end`](crate::engine::Engine::sample_end) when the device
/// disappears. The value itself is opaque to the engine.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct IndicatorId(pub u64);

/// What a hover indicator is capable of.
///
/// Reported with every movement sample; the engine remembers the most recent
/// value per indicator.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IndicatorKind {
    /// A source that only ever hovers. It can never be grabbed;
    /// [`Engine::grab`](crate::engine::Engine::grab) is a no-op for it.
    HoverOnly,
    /// A source that a widget may capture with
    /// [`Engine::grab`](crate::engine::Engine::grab), keeping the widget in
    /// the indicator's hovered set regardless of position until released.
    Grabbable,
}

/// Phase of a hover notification.
///
/// Per (indicator, widget) pair, notifications are always bracketed:
/// one `Enter`, zero or more `Update`s, one `Leave`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HoverPhase {
    /// The widget joined the indicator's hovered set on this sample.
    Enter,
    /// The widget was already hovered and remains so; carries the fresh position.
    Update,
    /// The widget left the hovered set (or the indicator disappeared).
    Leave,
}

/// A single hover notification, as delivered to a [`HoverHandler`].
///
/// Produced by [`Engine::sample_move`](crate::engine::Engine::sample_move)
/// and [`Engine::sample_end`](crate::engine::Engine::sample_end) in dispatch
/// order: all leaves for the sample first (previous topmost-first order),
/// then enters/updates in the picker's topmost-first order.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverDispatch<K> {
    /// Notification phase.
    pub phase: HoverPhase,
    /// The indicator this notification belongs to.
    pub indicator: IndicatorId,
    /// The widget being notified.
    pub widget: K,
    /// World-space position for `Enter`/`Update`; `None` for `Leave`.
    pub point: Option<Point>,
}

/// A handler fault captured during dispatch.
///
/// Faults are isolated per widget: the store transition that triggered the
/// notification is committed before the handler runs, and the remaining
/// notifications of the sample are still delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fault<K, E> {
    /// Indicator whose notification faulted.
    pub indicator: IndicatorId,
    /// Widget whose handler faulted.
    pub widget: K,
    /// Phase that was being delivered.
    pub phase: HoverPhase,
    /// The handler's error.
    pub error: E,
}

/// Everything one position sample (or disappearance) produced.
#[derive(Clone, Debug)]
pub struct SampleOutcome<K, E> {
    /// Notifications in delivery order.
    pub dispatches: Vec<HoverDispatch<K>>,
    /// Handler faults, in the order they occurred. Empty on the happy path.
    pub faults: Vec<Fault<K, E>>,
}

impl<K, E> Default for SampleOutcome<K, E> {
    fn default() -> Self {
        Self {
            dispatches: Vec::new(),
            faults: Vec::new(),
        }
    }
}

/// Per-container policy gating whether descendants are considered for hover
/// hit walking on a given sample.
///
/// Attached to a container via
/// [`Engine::set_filter`](crate::engine::Engine::set_filter). A grab of the
/// sampling indicator by the container bypasses the policy unconditionally,
/// so drag-style interactions keep flowing while the pointer is visually
/// outside the container. The policy gates descent only; it never fabricates
/// geometry for the descendants themselves.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum FilterPolicy {
    /// Always descend (pure pass-through container). The behavior of a
    /// container with no policy attached.
    #[default]
    PassThrough,
    /// Descend only if the indicator's position collides with the
    /// container's own visible (clipped) region. The classic scroll-viewport
    /// policy: children scrolled out of view never hover.
    SelfCollide,
    /// Never descend (except under grab bypass).
    Block,
}

/// Verdict handed to the picker for one container.
///
/// The engine resolves grabs and [`FilterPolicy`] into a `Descend`; the
/// picker resolves [`Descend::IfCollides`] against real geometry, since only
/// it knows the container's boundary.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Descend {
    /// Walk into the container's children.
    Allow,
    /// Skip the container's entire child subtree for this sample.
    Block,
    /// Walk into the children only if the sample position collides with the
    /// container's own visible region.
    IfCollides,
}

/// The narrow seam to a hit-walking widget tree.
///
/// Given a world-space point, produce the widgets whose visible region
/// contains it, topmost (deepest, last-painted) first, consulting `gate`
/// once per container before descending into its children.
pub trait HoverPicker<K> {
    /// The ordered hovered stack for `point`.
    fn pick(&self, point: Point, gate: &mut dyn FnMut(&K) -> Descend) -> Vec<K>;
}

/// Widget-facing hover protocol: the three notifications a hovered widget
/// receives, with a typed error for handler faults.
///
/// All methods default to `Ok(())`, so a handler implements only what it
/// observes. Handlers are invoked after the corresponding store transition
/// has been committed; returning `Err` reports a [`Fault`] upward without
/// disturbing the rest of the sample's dispatch.
pub trait HoverHandler<K> {
    /// Error type reported in [`Fault`]s.
    type Error;

    /// The indicator started hovering the widget.
    fn on_hover_enter(
        &mut self,
        indicator: IndicatorId,
        widget: &K,
        point: Point,
    ) -> Result<(), Self::Error> {
        let _ = (indicator, widget, point);
        Ok(())
    }

    /// The indicator moved while still hovering the widget.
    fn on_hover_update(
        &mut self,
        indicator: IndicatorId,
        widget: &K,
        point: Point,
    ) -> Result<(), Self::Error> {
        let _ = (indicator, widget, point);
        Ok(())
    }

    /// The indicator stopped hovering the widget (moved off or disappeared).
    fn on_hover_leave(&mut self, indicator: IndicatorId, widget: &K) -> Result<(), Self::Error> {
        let _ = (indicator, widget);
        Ok(())
    }
}

/// A handler that observes nothing. Useful when only the returned
/// [`SampleOutcome::dispatches`] sequence is of interest.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullHandler;

impl<K> HoverHandler<K> for NullHandler {
    type Error = core::convert::Infallible;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_policy_default_is_pass_through() {
        assert_eq!(FilterPolicy::default(), FilterPolicy::PassThrough);
    }

    #[test]
    fn null_handler_accepts_everything() {
        let mut h = NullHandler;
        let ind = IndicatorId(1);
        let w = 7_u32;
        assert!(h.on_hover_enter(ind, &w, Point::new(0.0, 0.0)).is_ok());
        assert!(h.on_hover_update(ind, &w, Point::new(1.0, 1.0)).is_ok());
        assert!(HoverHandler::<u32>::on_hover_leave(&mut h, ind, &w).is_ok());
    }
}
