// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=waypoint_snap --heading-base-level=0

//! Waypoint Snap: the snapping engine of the map editor.
//!
//! Snapping corrects a dragged or drawn cursor position so it lands exactly
//! on nearby geometry (an existing vertex, a point feature, or the interior
//! of a segment), producing topologically clean data instead of near-misses.
//!
//! Two pieces:
//!
//! - [`SnapList`]: the per-frame candidate set. A linear scan keeps every
//!   feature whose cached bounding box intersects the viewport; the feature
//!   under construction is excluded but its committed vertices stay
//!   snappable (that is how a polygon closes onto its own start point).
//! - [`try_snap_point`]: picks the globally nearest candidate, gates it by a
//!   screen-space pixel radius (so the apparent snap distance is the same at
//!   every zoom level), and prefers exact vertex alignment over mid-segment
//!   points within a geographic priority distance.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use waypoint_model::{FeatureStore, Style};
//! use waypoint_snap::{SnapConfig, SnapList, try_snap_point};
//!
//! let mut store = FeatureStore::new();
//! let _target = store.insert_point(Point::new(0.001, 0.0), 4.0, Style::default());
//!
//! let viewport = Rect::new(-0.01, -0.01, 0.01, 0.01);
//! let list = SnapList::collect(&store, viewport, None);
//! let snap = try_snap_point(
//!     &store,
//!     Point::new(0.00102, 0.0),
//!     &list,
//!     18.0,
//!     &SnapConfig::default(),
//! );
//! assert!(snap.is_some());
//! ```
//!
//! Distances are planar equirectangular meters with a cosine-latitude
//! longitude scale; there is no antimeridian handling, matching the tiled
//! basemap the editor draws over. See [`units`] for the conversions.

#![no_std]

extern crate alloc;

pub mod candidates;
pub mod snap;
pub mod units;

pub use candidates::{Drawing, SnapList};
pub use snap::{Snap, SnapConfig, align_to_guides, try_snap_point};
pub use units::meters_per_pixel;
