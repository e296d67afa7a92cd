// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The snapping algorithm.
//!
//! ## Overview
//!
//! Given a cursor position and a [`SnapList`], [`try_snap_point`] finds the
//! globally nearest candidate (an isolated point, a snappable vertex, or the
//! projection onto some feature's segment) and applies two gates:
//!
//! 1. **Screen-space radius**: the winning distance, converted to pixels via
//!    the latitude- and zoom-dependent meters-per-pixel factor, must be
//!    within [`SnapConfig::radius_px`]. This keeps the apparent snap radius
//!    visually constant across zoom levels.
//! 2. **Vertex priority**: a segment winner whose projected point lies within
//!    [`SnapConfig::vertex_priority`] degrees of the nearer segment endpoint
//!    is reported as a vertex snap at that endpoint instead. Exact vertex
//!    alignment is always preferred over an arbitrary mid-segment point when
//!    the cursor is geographically close to a vertex. The optional midpoint
//!    target is evaluated by the same rule.
//!
//! Polygons snap per ring (holes are independent boundaries) and the closing
//! segment participates; its path wraps via
//! [`FeatureStore::increment_path`](waypoint_model::FeatureStore::increment_path).

use kurbo::Point;

use waypoint_model::{Coords, FeatureId, FeatureKind, FeatureStore, VertexPath};

use crate::candidates::SnapList;
use crate::units::{distance_deg, distance_m, lon_scale, meters_per_pixel, project_onto_segment};

/// Tuning for the snapping algorithm.
#[derive(Clone, Debug)]
pub struct SnapConfig {
    /// Screen-space snap radius in pixels.
    pub radius_px: f64,
    /// Geographic distance (degrees) within which a segment snap upgrades to
    /// the nearer endpoint.
    pub vertex_priority: f64,
    /// Also evaluate segment midpoints with the vertex-priority rule.
    pub midpoints: bool,
    /// Clamp near-misses onto the lon/lat axes of candidate vertices.
    pub guides: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            radius_px: 10.0,
            vertex_priority: 0.0025,
            midpoints: false,
            guides: false,
        }
    }
}

/// A successful snap.
#[derive(Clone, Debug, PartialEq)]
pub enum Snap {
    /// Landed on an isolated point feature or a snappable vertex.
    Point {
        /// The point feature snapped to.
        feature: FeatureId,
        /// Its position.
        position: Point,
    },
    /// Landed on a segment endpoint of a linear feature.
    SegmentVertex {
        /// The linear feature snapped to.
        feature: FeatureId,
        /// Path of the endpoint vertex within the feature.
        path: VertexPath,
        /// The endpoint vertex.
        vertex: FeatureId,
        /// Its position.
        position: Point,
    },
    /// Landed on the interior of a segment.
    Segment {
        /// The linear feature snapped to.
        feature: FeatureId,
        /// Path of the segment (its starting vertex).
        path: VertexPath,
        /// The projected position on the segment.
        position: Point,
    },
}

impl Snap {
    /// The corrected cursor position.
    pub fn position(&self) -> Point {
        match self {
            Self::Point { position, .. }
            | Self::SegmentVertex { position, .. }
            | Self::Segment { position, .. } => *position,
        }
    }
}

enum Candidate {
    Point {
        feature: FeatureId,
        position: Point,
    },
    Segment {
        feature: FeatureId,
        path: VertexPath,
        start: Point,
        end: Point,
        position: Point,
    },
}

/// Snap `cursor` against the candidate list, or return `None` when nothing
/// lies within the screen-space radius at the given zoom.
pub fn try_snap_point(
    store: &FeatureStore,
    cursor: Point,
    list: &SnapList,
    zoom: f64,
    config: &SnapConfig,
) -> Option<Snap> {
    let scale = lon_scale(cursor.y);
    let mut best: Option<(f64, Candidate)> = None;
    let consider = |dist: f64, candidate: Candidate, best: &mut Option<(f64, Candidate)>| {
        if best.as_ref().is_none_or(|(d, _)| dist < *d) {
            *best = Some((dist, candidate));
        }
    };

    for &feature in &list.features {
        match store.kind(feature) {
            Some(FeatureKind::Point(p)) => {
                let dist = distance_m(cursor, p.position, scale);
                consider(
                    dist,
                    Candidate::Point {
                        feature,
                        position: p.position,
                    },
                    &mut best,
                );
            }
            Some(FeatureKind::Line(_)) => {
                if let Some(Coords::Line(pts)) = store.coords(feature) {
                    for (i, pair) in pts.windows(2).enumerate() {
                        let (position, dist) =
                            project_onto_segment(cursor, pair[0], pair[1], scale);
                        #[allow(
                            clippy::cast_possible_truncation,
                            reason = "Vertex counts fit u32 by construction."
                        )]
                        let path = VertexPath::at(i as u32);
                        consider(
                            dist,
                            Candidate::Segment {
                                feature,
                                path,
                                start: pair[0],
                                end: pair[1],
                                position,
                            },
                            &mut best,
                        );
                    }
                }
            }
            Some(FeatureKind::Polygon(_)) => {
                if let Some(Coords::Polygon(rings)) = store.coords(feature) {
                    // Each ring is emitted closed, so consecutive pairs cover
                    // the closing segment as well; holes snap independently.
                    for (ri, ring) in rings.iter().enumerate() {
                        for (i, pair) in ring.windows(2).enumerate() {
                            let (position, dist) =
                                project_onto_segment(cursor, pair[0], pair[1], scale);
                            #[allow(
                                clippy::cast_possible_truncation,
                                reason = "Ring sizes fit u32 by construction."
                            )]
                            let path = VertexPath::in_ring(ri as u32, i as u32);
                            consider(
                                dist,
                                Candidate::Segment {
                                    feature,
                                    path,
                                    start: pair[0],
                                    end: pair[1],
                                    position,
                                },
                                &mut best,
                            );
                        }
                    }
                }
            }
            None => {}
        }
    }

    for &(vertex, position) in &list.vertices {
        let dist = distance_m(cursor, position, scale);
        consider(
            dist,
            Candidate::Point {
                feature: vertex,
                position,
            },
            &mut best,
        );
    }

    let (dist, winner) = best?;
    if dist > config.radius_px * meters_per_pixel(cursor.y, zoom) {
        return None;
    }

    match winner {
        Candidate::Point { feature, position } => Some(Snap::Point { feature, position }),
        Candidate::Segment {
            feature,
            path,
            start,
            end,
            position,
        } => Some(resolve_segment(
            store, feature, path, start, end, position, config,
        )),
    }
}

/// Apply the vertex-priority rule to a winning segment.
fn resolve_segment(
    store: &FeatureStore,
    feature: FeatureId,
    path: VertexPath,
    start: Point,
    end: Point,
    position: Point,
    config: &SnapConfig,
) -> Snap {
    let d_start = distance_deg(position, start);
    let d_end = distance_deg(position, end);
    let midpoint = Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
    let d_mid = if config.midpoints {
        distance_deg(position, midpoint)
    } else {
        f64::INFINITY
    };

    let nearest = d_start.min(d_end).min(d_mid);
    if nearest > config.vertex_priority {
        return Snap::Segment {
            feature,
            path,
            position,
        };
    }
    if d_mid <= d_start && d_mid <= d_end {
        // The midpoint is not a model vertex; report a segment snap there.
        return Snap::Segment {
            feature,
            path,
            position: midpoint,
        };
    }
    let (vertex_path, vertex_pos) = if d_start <= d_end {
        (Some(path), start)
    } else {
        (store.increment_path(feature, path), end)
    };
    match vertex_path.and_then(|vp| store.vertex(feature, vp).map(|v| (vp, v))) {
        Some((vp, vertex)) => Snap::SegmentVertex {
            feature,
            path: vp,
            vertex,
            position: vertex_pos,
        },
        // Path resolution can only fail on a stale candidate list; degrade
        // to the plain segment snap rather than inventing a vertex.
        None => Snap::Segment {
            feature,
            path,
            position,
        },
    }
}

/// Clamp a near-miss cursor onto the lon/lat axes of candidate vertices.
///
/// Returns the axis-aligned position when some guide point's longitude or
/// latitude lies within the screen-space radius; each axis clamps
/// independently to its nearest guide. `None` when guides are disabled or
/// nothing is close enough.
pub fn align_to_guides(
    cursor: Point,
    list: &SnapList,
    zoom: f64,
    config: &SnapConfig,
) -> Option<Point> {
    if !config.guides {
        return None;
    }
    let radius_m = config.radius_px * meters_per_pixel(cursor.y, zoom);
    let max_lat = radius_m / crate::units::METERS_PER_DEGREE;
    let scale = lon_scale(cursor.y);
    let max_lon = if scale > 0.0 { max_lat / scale } else { max_lat };

    let mut lon: Option<(f64, f64)> = None; // (|delta|, guide lon)
    let mut lat: Option<(f64, f64)> = None;
    for &(_, g) in &list.vertices {
        let dx = (cursor.x - g.x).abs();
        if dx <= max_lon && lon.is_none_or(|(d, _)| dx < d) {
            lon = Some((dx, g.x));
        }
        let dy = (cursor.y - g.y).abs();
        if dy <= max_lat && lat.is_none_or(|(d, _)| dy < d) {
            lat = Some((dy, g.y));
        }
    }
    if lon.is_none() && lat.is_none() {
        return None;
    }
    Some(Point::new(
        lon.map_or(cursor.x, |(_, x)| x),
        lat.map_or(cursor.y, |(_, y)| y),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::{Drawing, SnapList};
    use alloc::vec;
    use kurbo::Rect;
    use waypoint_model::Style;

    const WORLD: Rect = Rect::new(-180.0, -90.0, 180.0, 90.0);

    fn pt(store: &mut FeatureStore, x: f64, y: f64) -> FeatureId {
        store.insert_point(Point::new(x, y), 4.0, Style::default())
    }

    #[test]
    fn snaps_to_nearest_point_feature() {
        let mut store = FeatureStore::new();
        let near = pt(&mut store, 0.0001, 0.0);
        let _far = pt(&mut store, 0.5, 0.5);
        let list = SnapList::collect(&store, WORLD, None);
        // ~11m offset; the 10px radius covers ~12m at zoom 17.
        let snap = try_snap_point(
            &store,
            Point::new(0.0, 0.0),
            &list,
            17.0,
            &SnapConfig::default(),
        )
        .unwrap();
        assert_eq!(
            snap,
            Snap::Point {
                feature: near,
                position: Point::new(0.0001, 0.0)
            }
        );
    }

    #[test]
    fn rejects_outside_screen_radius() {
        let mut store = FeatureStore::new();
        let _p = pt(&mut store, 0.1, 0.0); // ~11km away
        let list = SnapList::collect(&store, WORLD, None);
        let snap = try_snap_point(
            &store,
            Point::new(0.0, 0.0),
            &list,
            18.0,
            &SnapConfig::default(),
        );
        assert_eq!(snap, None);
    }

    #[test]
    fn segment_vertex_priority_scenario() {
        let mut store = FeatureStore::new();
        let a = pt(&mut store, 0.0, 0.0);
        let b = pt(&mut store, 0.05, 0.0);
        let l = store.insert_line(&[a, b], 2.0, Style::default());
        let list = SnapList {
            features: vec![l],
            vertices: vec![],
        };
        // 0.001° along the segment from endpoint a, well inside the default
        // vertex priority distance of 0.0025°; the midpoint is 0.024° away.
        let cursor = Point::new(0.001, 0.00002);
        let snap = try_snap_point(&store, cursor, &list, 18.0, &SnapConfig::default()).unwrap();
        assert_eq!(
            snap,
            Snap::SegmentVertex {
                feature: l,
                path: VertexPath::at(0),
                vertex: a,
                position: Point::new(0.0, 0.0),
            }
        );
    }

    #[test]
    fn far_endpoint_uses_incremented_path() {
        let mut store = FeatureStore::new();
        let a = pt(&mut store, 0.0, 0.0);
        let b = pt(&mut store, 0.05, 0.0);
        let l = store.insert_line(&[a, b], 2.0, Style::default());
        let list = SnapList {
            features: vec![l],
            vertices: vec![],
        };
        let cursor = Point::new(0.049, 0.00002);
        let snap = try_snap_point(&store, cursor, &list, 18.0, &SnapConfig::default()).unwrap();
        assert_eq!(
            snap,
            Snap::SegmentVertex {
                feature: l,
                path: VertexPath::at(1),
                vertex: b,
                position: Point::new(0.05, 0.0),
            }
        );
    }

    #[test]
    fn mid_segment_reports_segment_snap() {
        let mut store = FeatureStore::new();
        let a = pt(&mut store, 0.0, 0.0);
        let b = pt(&mut store, 0.05, 0.0);
        let l = store.insert_line(&[a, b], 2.0, Style::default());
        let list = SnapList {
            features: vec![l],
            vertices: vec![],
        };
        let cursor = Point::new(0.025, 0.00002);
        let snap = try_snap_point(&store, cursor, &list, 18.0, &SnapConfig::default()).unwrap();
        match snap {
            Snap::Segment { feature, path, position } => {
                assert_eq!(feature, l);
                assert_eq!(path, VertexPath::at(0));
                assert!((position.x - 0.025).abs() < 1e-12);
                assert_eq!(position.y, 0.0);
            }
            other => panic!("expected a segment snap, got {other:?}"),
        }
    }

    #[test]
    fn midpoint_option_snaps_to_midpoint() {
        let mut store = FeatureStore::new();
        let a = pt(&mut store, 0.0, 0.0);
        let b = pt(&mut store, 0.004, 0.0);
        let l = store.insert_line(&[a, b], 2.0, Style::default());
        let list = SnapList {
            features: vec![l],
            vertices: vec![],
        };
        let config = SnapConfig {
            midpoints: true,
            ..SnapConfig::default()
        };
        let cursor = Point::new(0.0021, 0.00002);
        let snap = try_snap_point(&store, cursor, &list, 18.0, &config).unwrap();
        assert_eq!(
            snap,
            Snap::Segment {
                feature: l,
                path: VertexPath::at(0),
                position: Point::new(0.002, 0.0),
            }
        );
    }

    #[test]
    fn polygon_closing_segment_is_snappable() {
        let mut store = FeatureStore::new();
        let a = pt(&mut store, 0.0, 0.0);
        let b = pt(&mut store, 0.02, 0.0);
        let c = pt(&mut store, 0.02, 0.02);
        let d = pt(&mut store, 0.0, 0.02);
        let poly = store.insert_polygon(&[vec![a, b, c, d]], Style::default());
        let list = SnapList {
            features: vec![poly],
            vertices: vec![],
        };
        // Near the middle of the closing segment d–a (the lon 0 edge).
        let cursor = Point::new(0.00002, 0.01);
        let snap = try_snap_point(&store, cursor, &list, 18.0, &SnapConfig::default()).unwrap();
        match snap {
            Snap::Segment { feature, path, .. } => {
                assert_eq!(feature, poly);
                assert_eq!(path, VertexPath::in_ring(0, 3));
            }
            other => panic!("expected the closing segment, got {other:?}"),
        }
    }

    #[test]
    fn drawing_can_close_onto_its_own_start() {
        let mut store = FeatureStore::new();
        let a = pt(&mut store, 0.0, 0.0);
        let b = pt(&mut store, 0.02, 0.0);
        let c = pt(&mut store, 0.02, 0.02);
        let cursor_v = pt(&mut store, 0.001, 0.001);
        let poly = store.insert_polygon(&[vec![a, b, c, cursor_v]], Style::default());
        let list = SnapList::collect(
            &store,
            WORLD,
            Some(Drawing {
                feature: poly,
                provisional: 1,
            }),
        );
        let snap = try_snap_point(
            &store,
            Point::new(0.00003, 0.0),
            &list,
            18.0,
            &SnapConfig::default(),
        )
        .unwrap();
        assert_eq!(
            snap,
            Snap::Point {
                feature: a,
                position: Point::new(0.0, 0.0)
            }
        );
    }

    // Same screen-space offset must snap (or not) independent of zoom.
    #[test]
    fn snap_radius_is_zoom_consistent() {
        for &(px, expect) in &[(8.0, true), (12.0, false)] {
            for &zoom in &[10.0, 11.0, 15.0] {
                let mut store = FeatureStore::new();
                let target = pt(&mut store, 0.0, 0.0);
                let offset_deg =
                    px * meters_per_pixel(0.0, zoom) / crate::units::METERS_PER_DEGREE;
                let list = SnapList::collect(&store, WORLD, None);
                let snap = try_snap_point(
                    &store,
                    Point::new(offset_deg, 0.0),
                    &list,
                    zoom,
                    &SnapConfig::default(),
                );
                assert_eq!(
                    snap.is_some(),
                    expect,
                    "{px}px offset at zoom {zoom} (target {target:?})"
                );
            }
        }
    }

    #[test]
    fn guides_clamp_each_axis_independently() {
        let mut store = FeatureStore::new();
        let _g = pt(&mut store, 0.01, 0.02);
        let list = SnapList::collect(&store, WORLD, None);
        let config = SnapConfig {
            guides: true,
            ..SnapConfig::default()
        };
        // Slightly off the guide's longitude at high zoom.
        let mpp_deg = meters_per_pixel(0.0, 19.0) / crate::units::METERS_PER_DEGREE;
        let cursor = Point::new(0.01 + 2.0 * mpp_deg, 0.1);
        let aligned = align_to_guides(cursor, &list, 19.0, &config).unwrap();
        assert_eq!(aligned, Point::new(0.01, 0.1), "lon clamps, lat is free");
        let off = SnapConfig::default();
        assert_eq!(align_to_guides(cursor, &list, 19.0, &off), None);
    }
}
