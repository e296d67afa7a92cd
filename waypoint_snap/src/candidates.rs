// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap candidate collection.
//!
//! Rebuilt per interaction frame: a linear scan over the store's cached
//! bounding boxes keeps every feature whose geometry intersects the current
//! viewport. Off-screen geometry is never a snap target, which bounds both
//! the candidate set and the per-frame cost of the snap scan.
//!
//! The feature currently being drawn is excluded from the candidate feature
//! list (a feature cannot snap to itself while under construction), but its
//! already-committed vertices are force-included as individually snappable
//! vertex positions, even off-screen, so closing a polygon onto its own
//! start point works. The trailing provisional vertices that track the live
//! cursor are trimmed first.

use alloc::vec::Vec;
use kurbo::{Point, Rect};

use waypoint_model::{FeatureFlags, FeatureId, FeatureStore};

/// The feature currently under construction, if any.
#[derive(Copy, Clone, Debug)]
pub struct Drawing {
    /// Feature to exclude from candidate features.
    pub feature: FeatureId,
    /// Number of trailing cursor-tracking vertices to trim from the
    /// force-included vertex positions.
    pub provisional: usize,
}

/// Viewport-filtered snap candidates for one interaction frame.
#[derive(Clone, Debug, Default)]
pub struct SnapList {
    /// Features whose geometry (points, segments) is eligible as a snap target.
    pub features: Vec<FeatureId>,
    /// Individually snappable vertex positions; also the guide-alignment
    /// inputs. Includes the committed vertices of the feature under
    /// construction.
    pub vertices: Vec<(FeatureId, Point)>,
}

impl SnapList {
    /// Collect candidates from `store` for the given viewport bounds
    /// (lon/lat degrees, from unprojecting the screen corners).
    pub fn collect(store: &FeatureStore, viewport: Rect, drawing: Option<Drawing>) -> Self {
        let mut list = Self::default();
        for id in store.iter() {
            if let Some(d) = drawing
                && d.feature == id
            {
                continue;
            }
            if !store
                .flags(id)
                .is_some_and(|f| f.contains(FeatureFlags::VISIBLE))
            {
                continue;
            }
            let Some(bbox) = store.bounds(id) else {
                continue;
            };
            if !rects_intersect(bbox, viewport) {
                continue;
            }
            list.features.push(id);
            for v in store.vertices_of(id) {
                if let Some(pos) = store.position(v) {
                    list.push_vertex(v, pos);
                }
            }
        }
        if let Some(d) = drawing {
            let committed = store.vertices_of(d.feature);
            let keep = committed.len().saturating_sub(d.provisional);
            for &v in &committed[..keep] {
                if let Some(pos) = store.position(v) {
                    list.push_vertex(v, pos);
                }
            }
        }
        list
    }

    fn push_vertex(&mut self, id: FeatureId, pos: Point) {
        if !self.vertices.iter().any(|(v, _)| *v == id) {
            self.vertices.push((id, pos));
        }
    }
}

fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}
