// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking and hit-priority selection.
//!
//! ## Usage
//!
//! 1) Ask the [`HitSource`](crate::types::HitSource) collaborator for the
//!    rendered ids under the pointer.
//! 2) Rank them with [`pick_topmost`]: the topmost point feature wins, and
//!    only when no point is hit does the topmost line or polygon win. Points
//!    draw above linear features by convention (`layer + 0.5`), so this
//!    matches what the user sees.
//! 3) Feed the winner into [`HoverState::update`] to get the enter/leave
//!    transitions since the previous frame.
//!
//! ## Minimal example
//!
//! ```
//! use waypoint_session::hover::{HoverEvent, HoverState};
//! use waypoint_model::FeatureId;
//! # fn demo(a: FeatureId, b: FeatureId) {
//! let mut h = HoverState::new();
//! assert_eq!(h.update(Some(a)), vec![HoverEvent::Enter(a)]);
//! assert_eq!(
//!     h.update(Some(b)),
//!     vec![HoverEvent::Leave(a), HoverEvent::Enter(b)]
//! );
//! # }
//! ```

use alloc::vec::Vec;

use waypoint_model::{FeatureFlags, FeatureId, FeatureStore};

/// A hover transition event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent {
    /// Pointer entered the feature.
    Enter(FeatureId),
    /// Pointer left the feature.
    Leave(FeatureId),
}

/// Tracks the hovered feature and computes enter/leave transitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState {
    current: Option<FeatureId>,
}

impl HoverState {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// The currently hovered feature, if any.
    pub fn current(&self) -> Option<FeatureId> {
        self.current
    }

    /// Clear the hover, returning the leave event if something was hovered.
    pub fn clear(&mut self) -> Vec<HoverEvent> {
        let mut out = Vec::new();
        if let Some(old) = self.current.take() {
            out.push(HoverEvent::Leave(old));
        }
        out
    }

    /// Update to a new hovered feature, returning leave-then-enter
    /// transitions. No events when the hover is unchanged.
    pub fn update(&mut self, new: Option<FeatureId>) -> Vec<HoverEvent> {
        if self.current == new {
            return Vec::new();
        }
        let mut out = Vec::new();
        if let Some(old) = self.current {
            out.push(HoverEvent::Leave(old));
        }
        if let Some(n) = new {
            out.push(HoverEvent::Enter(n));
        }
        self.current = new;
        out
    }
}

/// Rank hit candidates: the topmost point wins; otherwise the topmost
/// non-point feature.
///
/// "Topmost" orders by [`draw_order`](FeatureStore::draw_order); equal orders
/// break toward the newer id (higher generation, then higher slot), which
/// keeps the result deterministic when features exactly overlap. Ids that are
/// stale, invisible, or not pickable are skipped.
pub fn pick_topmost(store: &FeatureStore, ids: &[FeatureId]) -> Option<FeatureId> {
    let mut best_point: Option<(FeatureId, f64)> = None;
    let mut best_other: Option<(FeatureId, f64)> = None;
    for &id in ids {
        let Some(flags) = store.flags(id) else {
            continue;
        };
        if !flags.contains(FeatureFlags::VISIBLE) || !flags.contains(FeatureFlags::PICKABLE) {
            continue;
        }
        let Some(order) = store.draw_order(id) else {
            continue;
        };
        let slot = if store.is_point(id) {
            &mut best_point
        } else {
            &mut best_other
        };
        let better = match slot {
            None => true,
            Some((bid, border)) => {
                order > *border || (order == *border && id.to_bits() > bid.to_bits())
            }
        };
        if better {
            *slot = Some((id, order));
        }
    }
    best_point.or(best_other).map(|(id, _)| id)
}
