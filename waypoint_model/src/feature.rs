// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feature records: kind-specific data and the derived geometry cache.
//!
//! A feature is a closed tagged variant over the three kinds the editor
//! knows ([`Point`](FeatureKind::Point), [`Line`](FeatureKind::Line),
//! [`Polygon`](FeatureKind::Polygon)) plus shared display properties. Linear
//! kinds hold *non-owning* [`FeatureId`] references to their vertex points;
//! the [store](crate::FeatureStore) owns every record and maintains the
//! inverse bound-features relation.
//!
//! Derived geometry (emitted coordinates and the bounding box) is recomputed
//! synchronously inside every mutator, never lazily, so a record's cache is
//! always consistent with its vertex list between store calls.

use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::types::{FeatureFlags, FeatureId, Style};

/// Kind-specific data for a point feature (marker or shared vertex).
#[derive(Clone, Debug)]
pub struct PointData {
    /// Position as (longitude, latitude) degrees.
    pub position: Point,
    /// Display radius in pixels.
    pub radius: f64,
}

/// Kind-specific data for a polyline.
#[derive(Clone, Debug)]
pub struct LineData {
    pub(crate) vertices: Vec<FeatureId>,
    /// Stroke width in pixels.
    pub width: f64,
    /// Informational direction flag; `true` renders the line back-to-front.
    pub reversed: bool,
}

impl LineData {
    /// The ordered vertex references. Never fewer than two.
    pub fn vertices(&self) -> &[FeatureId] {
        &self.vertices
    }
}

/// Kind-specific data for a polygon.
#[derive(Clone, Debug)]
pub struct PolygonData {
    pub(crate) rings: Vec<Vec<FeatureId>>,
}

impl PolygonData {
    /// The rings, outer boundary first. Every ring has at least three vertices,
    /// and the stored lists do not repeat the first vertex.
    pub fn rings(&self) -> &[Vec<FeatureId>] {
        &self.rings
    }
}

/// The closed set of feature kinds.
///
/// Geometry operations dispatch over this via pattern matching; there is no
/// open trait hierarchy to extend.
#[derive(Clone, Debug)]
pub enum FeatureKind {
    /// A point: free-standing marker, shared vertex, or both at once.
    Point(PointData),
    /// An open polyline of at least two vertices.
    Line(LineData),
    /// A polygon of one or more rings; ring 0 is the outer boundary, the rest are holes.
    Polygon(PolygonData),
}

/// Emitted coordinate arrays, mirroring the GeoJSON geometry shapes.
///
/// Polygon rings are closed on emission: the first coordinate is repeated at
/// the end, even though the stored vertex lists do not repeat it.
#[derive(Clone, Debug, PartialEq)]
pub enum Coords {
    /// A single position.
    Point(Point),
    /// An open coordinate sequence.
    Line(Vec<Point>),
    /// Closed rings, outer boundary first.
    Polygon(Vec<Vec<Point>>),
}

#[derive(Clone, Debug)]
pub(crate) struct Feature {
    pub(crate) generation: u32,
    pub(crate) style: Style,
    pub(crate) flags: FeatureFlags,
    pub(crate) kind: FeatureKind,
    /// Features that reference this point as a vertex. Always empty for
    /// linear kinds; maintained exclusively by store mutators.
    pub(crate) bound: Vec<FeatureId>,
    pub(crate) coords: Coords,
    pub(crate) bbox: Rect,
}

impl Feature {
    pub(crate) fn new(generation: u32, style: Style, flags: FeatureFlags, kind: FeatureKind) -> Self {
        Self {
            generation,
            style,
            flags,
            kind,
            bound: Vec::new(),
            // Placeholder until the store's first recompute, which runs
            // before the record is observable.
            coords: Coords::Point(Point::ZERO),
            bbox: Rect::ZERO,
        }
    }

    /// Whether `vertex` occurs anywhere in this feature's vertex lists.
    pub(crate) fn contains_vertex(&self, vertex: FeatureId) -> bool {
        match &self.kind {
            FeatureKind::Point(_) => false,
            FeatureKind::Line(l) => l.vertices.contains(&vertex),
            FeatureKind::Polygon(p) => p.rings.iter().any(|r| r.contains(&vertex)),
        }
    }

    /// Effective draw order: points sit half a layer above linear features.
    pub(crate) fn draw_order(&self) -> f64 {
        let base = f64::from(self.style.layer);
        match self.kind {
            FeatureKind::Point(_) => base + 0.5,
            _ => base,
        }
    }
}

/// Grow `acc` to cover `p`, treating a zero-area rect seeded from the first
/// point as a valid starting box.
pub(crate) fn union_pt(acc: Rect, p: Point) -> Rect {
    Rect::new(
        acc.x0.min(p.x),
        acc.y0.min(p.y),
        acc.x1.max(p.x),
        acc.y1.max(p.y),
    )
}

pub(crate) fn bbox_of(points: &[Point]) -> Rect {
    let mut it = points.iter();
    let first = match it.next() {
        Some(p) => Rect::new(p.x, p.y, p.x, p.y),
        None => return Rect::ZERO,
    };
    it.fold(first, |acc, p| union_pt(acc, *p))
}
