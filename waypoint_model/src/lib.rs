// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=waypoint_model --heading-base-level=0

//! Waypoint Model: the geometry model of a vector map editor.
//!
//! Waypoint Model owns the features of an editing session (points, lines,
//! and polygons over a tiled basemap) and keeps them topologically
//! consistent while vertices are added, moved, merged, and removed.
//!
//! - Features live in a central [`FeatureStore`] arena keyed by generational
//!   [`FeatureId`]s; linear features hold non-owning id references to their
//!   vertex points.
//! - A vertex can be shared by any number of features. The store maintains
//!   the bound-features relation in both directions, so dragging one point
//!   updates every feature that references it.
//! - Derived geometry (emitted coordinates, bounding boxes) is recomputed
//!   synchronously inside every mutator; there is no lazily observable stale
//!   state between calls.
//! - Degenerate removals are reported as [`Action`] values instead of
//!   silently shrinking a feature below its minimum vertex count.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use waypoint_model::{Action, FeatureStore, Style, VertexPath};
//!
//! let mut store = FeatureStore::new();
//! let a = store.insert_point(Point::new(0.0, 0.0), 4.0, Style::default());
//! let b = store.insert_point(Point::new(1.0, 0.0), 4.0, Style::default());
//! let line = store.insert_line(&[a, b], 2.0, Style::default());
//!
//! // Dragging a shared vertex recomputes the line's cached geometry.
//! store.drag_point(a, Point::new(0.0, 1.0));
//! assert_eq!(store.bounds(line).unwrap().y1, 1.0);
//!
//! // A two-vertex line refuses to shrink; the caller must delete it.
//! assert_eq!(store.remove_vertex(line, a), Action::DeleteFeature);
//! store.remove_feature(line);
//! assert!(!store.is_alive(line));
//!
//! // Paths address vertices without borrowing the store.
//! let _ = VertexPath::at(0);
//! ```
//!
//! The snapping engine (`waypoint_snap`) and the editing session
//! (`waypoint_session`) build on this crate; the rendering collaborator
//! consumes [`FeatureStore::take_damage`] plus, with the `serde` feature, the
//! GeoJSON wire structs in [`geojson`].

#![no_std]

extern crate alloc;

pub mod damage;
pub mod feature;
#[cfg(feature = "serde")]
pub mod geojson;
pub mod store;
pub mod types;

pub use damage::GeometryDamage;
pub use feature::{Coords, FeatureKind, LineData, PointData, PolygonData};
pub use store::FeatureStore;
pub use types::{Action, FeatureFlags, FeatureId, ParsePathError, Style, VertexPath};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use kurbo::Point;

    // End-to-end sanity over the re-exported API surface.
    #[test]
    fn build_mutate_and_tear_down() {
        let mut store = FeatureStore::new();
        let pts: Vec<FeatureId> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .iter()
            .map(|&(x, y)| store.insert_point(Point::new(x, y), 4.0, Style::default()))
            .collect();
        let poly = store.insert_polygon(&[pts.clone()], Style::default());
        let line = store.insert_line(&[pts[0], pts[2]], 2.0, Style::default());

        // pts[0] is shared by the polygon and the line.
        assert_eq!(store.bound_features(pts[0]).map(<[_]>::len), Some(2));

        store.drag_point(pts[0], Point::new(-0.5, -0.5));
        assert_eq!(store.bounds(poly).unwrap().x0, -0.5);
        assert_eq!(store.bounds(line).unwrap().x0, -0.5);

        store.remove_feature(poly);
        assert!(store.is_alive(pts[0]), "line still binds it");
        assert!(!store.is_alive(pts[1]), "polygon-only vertex released");
        store.remove_feature(line);
        assert!(store.iter().next().is_none());
    }
}
