// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover dispatch engine implementation.
//!
//! ## Overview
//!
//! The engine turns raw indicator position samples into the widget-facing
//! enter/update/leave protocol. Per sample it runs the picker to obtain the
//! current hovered stack, diffs it against the stored previous stack, and
//! delivers notifications:
//!
//! - leaves first, in the previous stack's topmost-first order;
//! - then one pass over the current stack, topmost first, emitting an enter
//!   for new widgets and an update (with the fresh position) for retained
//!   ones.
//!
//! ## Grabs
//!
//! A widget may capture a [`Grabbable`](crate::types::IndicatorKind)
//! indicator. While the grab is held, the widget bypasses any collision
//! filter attached to it and is retained in the indicator's hovered stack
//! regardless of position (receiving updates instead of a leave). Grabs are
//! released explicitly or implicitly when the indicator disappears.
//!
//! ## Failure semantics
//!
//! Each notification's store transition is committed before the handler
//! runs, and a faulting handler never aborts the rest of the sample's
//! dispatch; faults are collected into the returned
//! [`SampleOutcome`](crate::types::SampleOutcome).
//!
//! ## Lifecycle
//!
//! Construct one engine per logical input surface, feed it samples from the
//! host loop, and call [`Engine::clear`] on teardown. There is no implicit
//! global instance; anything that wants to query hover state is handed the
//! engine (or reads the flags it maintains).

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Point;
use smallvec::SmallVec;

use core::hash::Hash;

use crate::store::HoverStore;
use crate::types::{
    Descend, Fault, FilterPolicy, HoverDispatch, HoverHandler, HoverPhase, HoverPicker,
    IndicatorId, IndicatorKind, SampleOutcome,
};

/// Multi-indicator hover dispatch engine.
///
/// ## Usage
///
/// - Construct with [`Engine::new`].
/// - Optionally attach [`FilterPolicy`] values to container widgets with
///   [`Engine::set_filter`].
/// - Feed it one call per position sample: [`Engine::sample_move`] for
///   movement, [`Engine::sample_end`] when the indicator disappears.
/// - Widgets capture an indicator with [`Engine::grab`] and release it with
///   [`Engine::release`]; both degrade to no-ops when stale.
///
/// Samples are processed to completion one at a time on the caller's thread;
/// the store is only ever mutated here, so reading hover state between
/// samples never races.
pub struct Engine<K: Copy + Eq + Hash> {
    store: HoverStore<K>,
    // Insertion order is preserved per indicator so release/regrab behaves
    // deterministically.
    grabs: HashMap<IndicatorId, SmallVec<[K; 2]>>,
    filters: HashMap<K, FilterPolicy>,
    kinds: HashMap<IndicatorId, IndicatorKind>,
}

impl<K: Copy + Eq + Hash> core::fmt::Debug for Engine<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("indicators", &self.kinds.len())
            .field("grabs", &self.grabs.len())
            .field("filters", &self.filters.len())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Hash> Default for Engine<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> Engine<K> {
    /// Create an engine with no tracked indicators and no filters.
    pub fn new() -> Self {
        Self {
            store: HoverStore::new(),
            grabs: HashMap::new(),
            filters: HashMap::new(),
            kinds: HashMap::new(),
        }
    }

    /// Attach a collision-filter policy to a container widget.
    ///
    /// Replaces any previous policy. Takes effect on the next sample; if the
    /// new policy withholds descent, descendants hovered so far leave on
    /// that sample (the hovered stack is recomputed from scratch every
    /// time).
    pub fn set_filter(&mut self, container: K, policy: FilterPolicy) {
        self.filters.insert(container, policy);
    }

    /// Detach the collision-filter policy from a container widget.
    pub fn clear_filter(&mut self, container: &K) {
        self.filters.remove(container);
    }

    /// Capture `indicator` for `widget`.
    ///
    /// No-op when the indicator is unknown, hover-only, or already grabbed
    /// by this widget. Several widgets may hold a grab on the same
    /// indicator at once.
    pub fn grab(&mut self, indicator: IndicatorId, widget: K) {
        if self.kinds.get(&indicator) != Some(&IndicatorKind::Grabbable) {
            return;
        }
        let held = self.grabs.entry(indicator).or_default();
        if !held.contains(&widget) {
            held.push(widget);
        }
    }

    /// Release a grab. No-op when the pair is not currently grabbed.
    pub fn release(&mut self, indicator: IndicatorId, widget: &K) {
        if let Some(held) = self.grabs.get_mut(&indicator) {
            held.retain(|w| w != widget);
            if held.is_empty() {
                self.grabs.remove(&indicator);
            }
        }
    }

    /// Whether `widget` currently holds a grab on `indicator`.
    pub fn is_grabbed_by(&self, indicator: IndicatorId, widget: &K) -> bool {
        self.grabs
            .get(&indicator)
            .is_some_and(|held| held.contains(widget))
    }

    /// The widgets hovered by `indicator`, topmost first.
    pub fn hovered_by(&self, indicator: IndicatorId) -> &[K] {
        self.store.hovered_by(indicator)
    }

    /// Whether at least one indicator currently hovers `widget`.
    pub fn is_hovered(&self, widget: &K) -> bool {
        self.store.is_hovered(widget)
    }

    /// How many indicators currently hover `widget`.
    pub fn indicator_count(&self, widget: &K) -> u32 {
        self.store.indicator_count(widget)
    }

    /// The most recently sampled kind of an indicator, if it is tracked.
    pub fn indicator_kind(&self, indicator: IndicatorId) -> Option<IndicatorKind> {
        self.kinds.get(&indicator).copied()
    }

    /// Process one movement sample for `indicator` at `point`.
    ///
    /// The first sample for an id creates the indicator. Returns the
    /// notifications delivered and any handler faults; see the module docs
    /// for ordering and failure semantics.
    pub fn sample_move<P, H>(
        &mut self,
        indicator: IndicatorId,
        kind: IndicatorKind,
        point: Point,
        picker: &P,
        handler: &mut H,
    ) -> SampleOutcome<K, H::Error>
    where
        P: HoverPicker<K> + ?Sized,
        H: HoverHandler<K>,
    {
        self.kinds.insert(indicator, kind);
        self.store.track(indicator);

        // Resolve grabs and filter policies into descend verdicts; the
        // picker resolves `IfCollides` against its own geometry.
        let held = self.grabs.get(&indicator);
        let filters = &self.filters;
        let mut gate = |container: &K| -> Descend {
            if held.is_some_and(|g| g.contains(container)) {
                return Descend::Allow;
            }
            match filters.get(container).copied().unwrap_or_default() {
                FilterPolicy::PassThrough => Descend::Allow,
                FilterPolicy::SelfCollide => Descend::IfCollides,
                FilterPolicy::Block => Descend::Block,
            }
        };
        let mut current = picker.pick(point, &mut gate);

        // A captured indicator keeps reaching its grabbing widgets even when
        // the position no longer collides; retain them at the outermost end.
        if let Some(held) = held {
            for w in held {
                if !current.contains(w) {
                    current.push(*w);
                }
            }
        }

        self.dispatch_diff(indicator, &current, Some(point), handler)
    }

    /// Process the disappearance of `indicator`.
    ///
    /// Diffs against the empty set (forcing a leave on everything the
    /// indicator hovered, topmost first), then discards all of its tracked
    /// state including grabs it was captured by. Calling this for an
    /// unknown or already-ended indicator is a no-op.
    pub fn sample_end<H>(
        &mut self,
        indicator: IndicatorId,
        handler: &mut H,
    ) -> SampleOutcome<K, H::Error>
    where
        H: HoverHandler<K>,
    {
        if !self.store.tracks(indicator) && !self.kinds.contains_key(&indicator) {
            return SampleOutcome::default();
        }
        let out = self.dispatch_diff(indicator, &[], None, handler);
        self.store.drop_indicator(indicator);
        self.kinds.remove(&indicator);
        self.grabs.remove(&indicator);
        out
    }

    /// Teardown: end every tracked indicator.
    ///
    /// Equivalent to [`Engine::sample_end`] for each indicator in turn;
    /// afterwards the engine holds no indicator state at all. Filters stay
    /// attached.
    pub fn clear<H>(&mut self, handler: &mut H) -> SampleOutcome<K, H::Error>
    where
        H: HoverHandler<K>,
    {
        // Every tracked indicator has a store entry (sample_move tracks it
        // on first sight), so the store is the authoritative list here.
        let tracked: Vec<IndicatorId> = self.store.indicators().collect();
        let mut out = SampleOutcome::default();
        for indicator in tracked {
            let mut one = self.sample_end(indicator, handler);
            out.dispatches.append(&mut one.dispatches);
            out.faults.append(&mut one.faults);
        }
        out
    }

    /// Diff `current` against the stored stack for `indicator` and deliver
    /// the resulting notifications.
    ///
    /// Every store transition is committed before its handler call, so the
    /// relation stays consistent even when a handler faults.
    fn dispatch_diff<H>(
        &mut self,
        indicator: IndicatorId,
        current: &[K],
        point: Option<Point>,
        handler: &mut H,
    ) -> SampleOutcome<K, H::Error>
    where
        H: HoverHandler<K>,
    {
        let previous: Vec<K> = self.store.hovered_by(indicator).to_vec();
        let mut out = SampleOutcome::default();

        // Leaves first, previous topmost-first order.
        for w in &previous {
            if current.contains(w) {
                continue;
            }
            self.store.remove(indicator, w);
            out.dispatches.push(HoverDispatch {
                phase: HoverPhase::Leave,
                indicator,
                widget: *w,
                point: None,
            });
            if let Err(error) = handler.on_hover_leave(indicator, w) {
                out.faults.push(Fault {
                    indicator,
                    widget: *w,
                    phase: HoverPhase::Leave,
                    error,
                });
            }
        }

        // Then enters and updates in the current stack's topmost-first order.
        for w in current {
            let retained = previous.contains(w);
            let phase = if retained {
                HoverPhase::Update
            } else {
                self.store.insert(indicator, *w);
                HoverPhase::Enter
            };
            // Leave diffs (`current` empty) never reach this loop, so a
            // position is always available here.
            let Some(point) = point else {
                debug_assert!(false, "enter/update dispatched without a position");
                continue;
            };
            out.dispatches.push(HoverDispatch {
                phase,
                indicator,
                widget: *w,
                point: Some(point),
            });
            let result = if retained {
                handler.on_hover_update(indicator, w, point)
            } else {
                handler.on_hover_enter(indicator, w, point)
            };
            if let Err(error) = result {
                out.faults.push(Fault {
                    indicator,
                    widget: *w,
                    phase,
                    error,
                });
            }
        }

        self.store.set_order(indicator, current);
        out
    }
}
