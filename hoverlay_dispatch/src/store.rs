// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state store: which widgets each indicator currently hovers.
//!
//! The store is the single source of truth for the hover relation. A pair
//! `(indicator, widget)` is present here if and only if an enter has been
//! dispatched for it and the matching leave has not. The
//! [engine](crate::engine) owns the store and is its only writer; widgets
//! and application code read it at any time through the engine's accessors.
//!
//! Alongside the per-indicator sequences, the store keeps one refcount per
//! widget counting the indicators hovering it. That refcount is the
//! aggregate `hovered` flag for widgets that do not care about per-indicator
//! granularity.

use hashbrown::HashMap;
use smallvec::SmallVec;

use core::hash::Hash;

use crate::types::IndicatorId;

// Hovered stacks are shallow (a handful of nested widgets); keep them inline.
type HoverSeq<K> = SmallVec<[K; 8]>;

/// Per-indicator hovered sequences plus per-widget indicator refcounts.
///
/// Sequences are kept in the walker's topmost-first order.
#[derive(Clone, Debug)]
pub struct HoverStore<K: Copy + Eq + Hash> {
    by_indicator: HashMap<IndicatorId, HoverSeq<K>>,
    refs: HashMap<K, u32>,
}

impl<K: Copy + Eq + Hash> Default for HoverStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> HoverStore<K> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            by_indicator: HashMap::new(),
            refs: HashMap::new(),
        }
    }

    /// The widgets hovered by `indicator`, topmost first.
    pub fn hovered_by(&self, indicator: IndicatorId) -> &[K] {
        self.by_indicator
            .get(&indicator)
            .map(|seq| &seq[..])
            .unwrap_or(&[])
    }

    /// Whether `indicator` currently hovers `widget`.
    pub fn contains(&self, indicator: IndicatorId, widget: &K) -> bool {
        self.hovered_by(indicator).contains(widget)
    }

    /// Whether at least one indicator currently hovers `widget`.
    pub fn is_hovered(&self, widget: &K) -> bool {
        self.indicator_count(widget) > 0
    }

    /// How many indicators currently hover `widget`.
    pub fn indicator_count(&self, widget: &K) -> u32 {
        self.refs.get(widget).copied().unwrap_or(0)
    }

    /// All tracked indicators, including those with an empty sequence.
    pub fn indicators(&self) -> impl Iterator<Item = IndicatorId> + '_ {
        self.by_indicator.keys().copied()
    }

    /// Ensure the indicator exists in the relation, with an empty sequence
    /// if it was unknown.
    pub(crate) fn track(&mut self, indicator: IndicatorId) {
        self.by_indicator.entry(indicator).or_default();
    }

    /// Commit `(indicator, widget)` into the relation.
    ///
    /// Appends to the end of the indicator's sequence; the engine fixes up
    /// ordering with [`HoverStore::set_order`] once the sample's dispatch is
    /// complete. Returns `false` (and changes nothing) if already present.
    pub(crate) fn insert(&mut self, indicator: IndicatorId, widget: K) -> bool {
        let seq = self.by_indicator.entry(indicator).or_default();
        if seq.contains(&widget) {
            return false;
        }
        seq.push(widget);
        *self.refs.entry(widget).or_insert(0) += 1;
        true
    }

    /// Remove `(indicator, widget)` from the relation.
    ///
    /// Returns `false` (and changes nothing) if the pair was not present.
    pub(crate) fn remove(&mut self, indicator: IndicatorId, widget: &K) -> bool {
        let Some(seq) = self.by_indicator.get_mut(&indicator) else {
            return false;
        };
        let Some(pos) = seq.iter().position(|w| w == widget) else {
            return false;
        };
        seq.remove(pos);
        if let Some(n) = self.refs.get_mut(widget) {
            *n -= 1;
            if *n == 0 {
                self.refs.remove(widget);
            }
        }
        true
    }

    /// Replace the indicator's sequence order without touching membership.
    ///
    /// `order` must contain exactly the widgets currently stored for the
    /// indicator; refcounts are unaffected.
    pub(crate) fn set_order(&mut self, indicator: IndicatorId, order: &[K]) {
        if let Some(seq) = self.by_indicator.get_mut(&indicator) {
            debug_assert_eq!(seq.len(), order.len(), "set_order must preserve membership");
            debug_assert!(
                order.iter().all(|w| seq.contains(w)),
                "set_order must preserve membership"
            );
            seq.clear();
            seq.extend_from_slice(order);
        }
    }

    /// Forget the indicator entirely. Its sequence must already be empty.
    pub(crate) fn drop_indicator(&mut self, indicator: IndicatorId) {
        let seq = self.by_indicator.remove(&indicator);
        debug_assert!(
            seq.map(|s| s.is_empty()).unwrap_or(true),
            "indicator dropped with live hover entries"
        );
    }

    /// Whether the store tracks the indicator at all (even with an empty
    /// sequence).
    pub(crate) fn tracks(&self, indicator: IndicatorId) -> bool {
        self.by_indicator.contains_key(&indicator)
    }
}
