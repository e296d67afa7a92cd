// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The feature store: arena, vertex binding, and mutation operations.
//!
//! ## Overview
//!
//! All features live in one slot arena keyed by generational [`FeatureId`]s.
//! Linear features reference their vertices by id; each point record carries
//! the inverse relation (the features bound to it). Both directions are
//! maintained exclusively by the mutators on [`FeatureStore`], so after every
//! call the two stay symmetric: a point is in a feature's vertex list if and
//! only if that feature is in the point's bound set.
//!
//! ## Mutation contract
//!
//! - Constructors fail fast (panic) on malformed input: too few vertices,
//!   duplicate vertices, stale ids. These are defects in the calling code.
//! - `can_*` predicates guard the topology-sensitive mutators. Calling a
//!   mutator when its guard would fail is a silent no-op, never a panic.
//! - Removals and replacements that would push a feature below its minimum
//!   vertex count leave the feature untouched and report the required
//!   follow-up through [`Action`].
//! - Every mutator recomputes derived geometry (emitted coordinates and
//!   bounding box) synchronously before returning and records render damage;
//!   there is no observable stale state between calls.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};

use crate::damage::GeometryDamage;
use crate::feature::{Coords, Feature, FeatureKind, LineData, PointData, PolygonData, bbox_of, union_pt};
use crate::types::{Action, FeatureFlags, FeatureId, Style, VertexPath};

/// Arena and registry for every feature of an editing session.
#[derive(Default)]
pub struct FeatureStore {
    slots: Vec<Option<Feature>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    damage: GeometryDamage,
}

impl core::fmt::Debug for FeatureStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("FeatureStore")
            .field("slots_total", &total)
            .field("slots_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl FeatureStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // --- construction ---

    /// Insert a point feature at `position` with the given display radius.
    pub fn insert_point(&mut self, position: Point, radius: f64, style: Style) -> FeatureId {
        let id = self.alloc(
            style,
            FeatureFlags::default(),
            FeatureKind::Point(PointData { position, radius }),
        );
        self.recompute(id);
        id
    }

    /// Insert a line over existing point features.
    ///
    /// Panics if fewer than two vertices are given, a vertex repeats, or any
    /// id is stale or not a point.
    pub fn insert_line(&mut self, vertices: &[FeatureId], width: f64, style: Style) -> FeatureId {
        assert!(vertices.len() >= 2, "a line needs at least two vertices");
        self.check_vertex_ids(vertices);
        assert!(
            no_duplicates(vertices),
            "a feature may not reference the same vertex twice"
        );
        let id = self.alloc(
            style,
            FeatureFlags::default(),
            FeatureKind::Line(LineData {
                vertices: vertices.to_vec(),
                width,
                reversed: false,
            }),
        );
        for &v in vertices {
            self.bind(v, id);
        }
        self.recompute(id);
        id
    }

    /// Insert a polygon over existing point features; ring 0 is the outer
    /// boundary, further rings are holes.
    ///
    /// Panics if there is no ring, any ring has fewer than three vertices, a
    /// vertex repeats anywhere in the polygon, or any id is stale or not a
    /// point.
    pub fn insert_polygon(&mut self, rings: &[Vec<FeatureId>], style: Style) -> FeatureId {
        assert!(!rings.is_empty(), "a polygon needs an outer ring");
        for ring in rings {
            assert!(ring.len() >= 3, "a polygon ring needs at least three vertices");
            self.check_vertex_ids(ring);
        }
        let all: Vec<FeatureId> = rings.iter().flatten().copied().collect();
        assert!(
            no_duplicates(&all),
            "a feature may not reference the same vertex twice"
        );
        let id = self.alloc(
            style,
            FeatureFlags::default(),
            FeatureKind::Polygon(PolygonData {
                rings: rings.to_vec(),
            }),
        );
        for v in all {
            self.bind(v, id);
        }
        self.recompute(id);
        id
    }

    // --- vertex mutation ---

    /// Whether `vertex` may be appended to an end of `feature` at `path`.
    ///
    /// Appending is valid at the start (`index == 0`) or past the end
    /// (`index >= len`) of a line or of the addressed polygon ring. A vertex
    /// already present anywhere in the feature is refused: a feature never
    /// snaps onto its own vertex list, though sharing across features is fine.
    pub fn can_append_vertex(&self, feature: FeatureId, vertex: FeatureId, path: VertexPath) -> bool {
        let Some(f) = self.get(feature) else {
            return false;
        };
        if !self.is_point(vertex) || f.contains_vertex(vertex) {
            return false;
        }
        match &f.kind {
            FeatureKind::Point(_) => false,
            FeatureKind::Line(l) => {
                path.ring == 0 && (path.index == 0 || path.index as usize >= l.vertices.len())
            }
            FeatureKind::Polygon(p) => p
                .rings
                .get(path.ring as usize)
                .is_some_and(|r| path.index == 0 || path.index as usize >= r.len()),
        }
    }

    /// Append `vertex` at an end of `feature`. No-op when
    /// [`can_append_vertex`](Self::can_append_vertex) is false.
    pub fn append_vertex(&mut self, feature: FeatureId, vertex: FeatureId, path: VertexPath) {
        if !self.can_append_vertex(feature, vertex, path) {
            return;
        }
        let f = self.get_mut(feature).expect("liveness checked by guard");
        match &mut f.kind {
            FeatureKind::Line(l) => {
                if path.index == 0 {
                    l.vertices.insert(0, vertex);
                } else {
                    l.vertices.push(vertex);
                }
            }
            FeatureKind::Polygon(p) => {
                let ring = &mut p.rings[path.ring as usize];
                if path.index == 0 {
                    ring.insert(0, vertex);
                } else {
                    ring.push(vertex);
                }
            }
            FeatureKind::Point(_) => unreachable!("guard rejects point features"),
        }
        self.bind(vertex, feature);
        self.recompute(feature);
    }

    /// Whether `vertex` may be inserted into the interior of `feature` after
    /// the vertex at `path`.
    ///
    /// Inserting after the last vertex of an open line is not an insert (that
    /// is an append) and is refused; inserting after the last vertex of a
    /// ring lands on the closing segment and is fine.
    pub fn can_insert_vertex(&self, feature: FeatureId, vertex: FeatureId, path: VertexPath) -> bool {
        let Some(f) = self.get(feature) else {
            return false;
        };
        if !self.is_point(vertex) || f.contains_vertex(vertex) {
            return false;
        }
        match &f.kind {
            FeatureKind::Point(_) => false,
            FeatureKind::Line(l) => {
                path.ring == 0 && (path.index as usize) < l.vertices.len() - 1
            }
            FeatureKind::Polygon(p) => p
                .rings
                .get(path.ring as usize)
                .is_some_and(|r| (path.index as usize) < r.len()),
        }
    }

    /// Insert `vertex` after the vertex at `path`. No-op when
    /// [`can_insert_vertex`](Self::can_insert_vertex) is false.
    pub fn insert_vertex_after(&mut self, feature: FeatureId, vertex: FeatureId, path: VertexPath) {
        if !self.can_insert_vertex(feature, vertex, path) {
            return;
        }
        let f = self.get_mut(feature).expect("liveness checked by guard");
        let at = path.index as usize + 1;
        match &mut f.kind {
            FeatureKind::Line(l) => l.vertices.insert(at, vertex),
            FeatureKind::Polygon(p) => p.rings[path.ring as usize].insert(at, vertex),
            FeatureKind::Point(_) => unreachable!("guard rejects point features"),
        }
        self.bind(vertex, feature);
        self.recompute(feature);
    }

    /// Remove `vertex` from `feature`, reporting any required follow-up.
    ///
    /// A line of two vertices and a polygon whose outer ring has three are
    /// not trimmed below their minimum: the vertex list is left untouched and
    /// [`Action::DeleteFeature`] is returned. An interior ring of three is
    /// dropped whole, returning its vertices in [`Action::DeleteRing`].
    pub fn remove_vertex(&mut self, feature: FeatureId, vertex: FeatureId) -> Action {
        enum Plan {
            Line(usize),
            Ring(usize, usize),
            DropRing(usize),
        }
        let plan = {
            let Some(f) = self.get(feature) else {
                return Action::Nothing;
            };
            match &f.kind {
                FeatureKind::Point(_) => return Action::Nothing,
                FeatureKind::Line(l) => {
                    let Some(pos) = l.vertices.iter().position(|v| *v == vertex) else {
                        return Action::Nothing;
                    };
                    if l.vertices.len() <= 2 {
                        return Action::DeleteFeature;
                    }
                    Plan::Line(pos)
                }
                FeatureKind::Polygon(p) => {
                    let Some((ring, pos)) = p
                        .rings
                        .iter()
                        .enumerate()
                        .find_map(|(ri, r)| {
                            r.iter().position(|v| *v == vertex).map(|pos| (ri, pos))
                        })
                    else {
                        return Action::Nothing;
                    };
                    if p.rings[ring].len() > 3 {
                        Plan::Ring(ring, pos)
                    } else if ring == 0 {
                        return Action::DeleteFeature;
                    } else {
                        Plan::DropRing(ring)
                    }
                }
            }
        };
        match plan {
            Plan::Line(pos) => {
                if let Some(FeatureKind::Line(l)) = self.get_mut(feature).map(|f| &mut f.kind) {
                    l.vertices.remove(pos);
                }
                self.unbind(vertex, feature);
                self.recompute(feature);
                Action::Nothing
            }
            Plan::Ring(ring, pos) => {
                if let Some(FeatureKind::Polygon(p)) = self.get_mut(feature).map(|f| &mut f.kind) {
                    p.rings[ring].remove(pos);
                }
                self.unbind(vertex, feature);
                self.recompute(feature);
                Action::Nothing
            }
            Plan::DropRing(ring) => {
                let points = match self.get_mut(feature).map(|f| &mut f.kind) {
                    Some(FeatureKind::Polygon(p)) => p.rings.remove(ring),
                    _ => unreachable!("plan built from a polygon"),
                };
                for &v in &points {
                    self.unbind(v, feature);
                }
                self.recompute(feature);
                Action::DeleteRing(points)
            }
        }
    }

    /// Rebind every occurrence of `old` in `feature` to `new`.
    ///
    /// Used when a drag lands one vertex on another. Replacing with a vertex
    /// the feature already contains collapses the duplicate instead (it
    /// reduces to removing `old`, with the same minimum-count policy), so a
    /// degenerate zero-length segment is never created.
    pub fn replace_vertex(&mut self, feature: FeatureId, new: FeatureId, old: FeatureId) -> Action {
        if new == old || !self.is_point(new) {
            return Action::Nothing;
        }
        {
            let Some(f) = self.get(feature) else {
                return Action::Nothing;
            };
            if !f.contains_vertex(old) {
                return Action::Nothing;
            }
            if f.contains_vertex(new) {
                return self.remove_vertex(feature, old);
            }
        }
        let f = self.get_mut(feature).expect("liveness checked above");
        match &mut f.kind {
            FeatureKind::Line(l) => {
                for v in &mut l.vertices {
                    if *v == old {
                        *v = new;
                    }
                }
            }
            FeatureKind::Polygon(p) => {
                for ring in &mut p.rings {
                    for v in ring {
                        if *v == old {
                            *v = new;
                        }
                    }
                }
            }
            FeatureKind::Point(_) => unreachable!("contains_vertex is false for points"),
        }
        self.unbind(old, feature);
        self.bind(new, feature);
        self.recompute(feature);
        Action::Nothing
    }

    /// Merge point `remove` into point `keep`: every feature bound to
    /// `remove` is rebound to `keep`, then `remove` is
    /// [released](Self::release_point).
    ///
    /// Returns the features whose replacement reported a follow-up; the
    /// caller handles those and releases `remove` again afterwards (a
    /// feature awaiting deletion still binds it until then).
    pub fn merge_points(&mut self, keep: FeatureId, remove: FeatureId) -> Vec<(FeatureId, Action)> {
        if keep == remove || !self.is_point(keep) || !self.is_point(remove) {
            return Vec::new();
        }
        let bound = self
            .get(remove)
            .map(|f| f.bound.clone())
            .unwrap_or_default();
        let mut followups = Vec::new();
        for feature in bound {
            match self.replace_vertex(feature, keep, remove) {
                Action::Nothing => {}
                action => followups.push((feature, action)),
            }
        }
        let _ = self.release_point(remove);
        followups
    }

    /// Move a point and recompute every feature bound to it.
    ///
    /// The per-feature recompute is idempotent: repeating it without an
    /// intervening structural change yields identical coordinates and bounds.
    pub fn drag_point(&mut self, id: FeatureId, position: Point) {
        let Some(f) = self.get_mut(id) else {
            return;
        };
        let FeatureKind::Point(p) = &mut f.kind else {
            return;
        };
        p.position = position;
        let bound = f.bound.clone();
        self.recompute(id);
        for feature in bound {
            self.recompute(feature);
        }
    }

    /// Translate a feature by `delta` degrees, moving every vertex it binds
    /// (shared vertices drag their other features along).
    pub fn translate_feature(&mut self, id: FeatureId, delta: Vec2) {
        for v in self.vertices_of(id) {
            if let Some(pos) = self.position(v) {
                self.drag_point(v, pos + delta);
            }
        }
        if self.is_point(id)
            && let Some(pos) = self.position(id)
        {
            self.drag_point(id, pos + delta);
        }
    }

    // --- lifecycle ---

    /// Delete a feature.
    ///
    /// Linear features unbind all their vertices; vertices left with no
    /// bound feature are deleted unless they are `STANDALONE` markers. A
    /// point still bound to features merely loses its `STANDALONE` flag and
    /// lives on as a plain shared vertex.
    pub fn remove_feature(&mut self, id: FeatureId) {
        let Some(f) = self.get(id) else {
            return;
        };
        match &f.kind {
            FeatureKind::Point(_) => {
                if f.bound.is_empty() {
                    self.remove_record(id);
                } else if let Some(f) = self.get_mut(id) {
                    f.flags.remove(FeatureFlags::STANDALONE);
                    self.damage.record_updated(id);
                }
            }
            FeatureKind::Line(l) => {
                let vertices = l.vertices.clone();
                self.remove_record(id);
                for v in vertices {
                    self.unbind(v, id);
                    let _ = self.release_point(v);
                }
            }
            FeatureKind::Polygon(p) => {
                let vertices: Vec<FeatureId> = p.rings.iter().flatten().copied().collect();
                self.remove_record(id);
                for v in vertices {
                    self.unbind(v, id);
                    let _ = self.release_point(v);
                }
            }
        }
    }

    /// Delete a point if nothing binds it and it is not a standalone marker.
    /// Returns whether the point was deleted.
    pub fn release_point(&mut self, id: FeatureId) -> bool {
        let Some(f) = self.get(id) else {
            return false;
        };
        if !matches!(f.kind, FeatureKind::Point(_))
            || !f.bound.is_empty()
            || f.flags.contains(FeatureFlags::STANDALONE)
        {
            return false;
        }
        self.remove_record(id);
        true
    }

    // --- path resolution ---

    /// Resolve a vertex by path.
    pub fn vertex(&self, feature: FeatureId, path: VertexPath) -> Option<FeatureId> {
        let f = self.get(feature)?;
        match &f.kind {
            FeatureKind::Point(_) => None,
            FeatureKind::Line(l) => {
                if path.ring != 0 {
                    return None;
                }
                l.vertices.get(path.index as usize).copied()
            }
            FeatureKind::Polygon(p) => p
                .rings
                .get(path.ring as usize)?
                .get(path.index as usize)
                .copied(),
        }
    }

    /// The next path along the sequence: wraps past the last index for
    /// polygon rings, runs off the end (`None`) for open lines.
    pub fn increment_path(&self, feature: FeatureId, path: VertexPath) -> Option<VertexPath> {
        let f = self.get(feature)?;
        match &f.kind {
            FeatureKind::Point(_) => None,
            FeatureKind::Line(l) => {
                if path.ring != 0 {
                    return None;
                }
                let next = path.index as usize + 1;
                (next < l.vertices.len()).then(|| VertexPath::at(path.index + 1))
            }
            FeatureKind::Polygon(p) => {
                let ring = p.rings.get(path.ring as usize)?;
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "Ring lengths fit u32 by construction."
                )]
                let len = ring.len() as u32;
                (path.index < len).then(|| VertexPath::in_ring(path.ring, (path.index + 1) % len))
            }
        }
    }

    /// Both endpoints of the segment starting at `path`, closing segment of a
    /// ring included.
    pub fn segment_vertices(
        &self,
        feature: FeatureId,
        path: VertexPath,
    ) -> Option<(FeatureId, FeatureId)> {
        let a = self.vertex(feature, path)?;
        let b = self.vertex(feature, self.increment_path(feature, path)?)?;
        Some((a, b))
    }

    // --- queries ---

    /// Whether `id` refers to a live feature.
    pub fn is_alive(&self, id: FeatureId) -> bool {
        self.get(id).is_some()
    }

    /// Whether `id` is a live point feature.
    pub fn is_point(&self, id: FeatureId) -> bool {
        self.get(id)
            .is_some_and(|f| matches!(f.kind, FeatureKind::Point(_)))
    }

    /// Kind-specific data of a live feature.
    pub fn kind(&self, id: FeatureId) -> Option<&FeatureKind> {
        self.get(id).map(|f| &f.kind)
    }

    /// Position of a live point feature.
    pub fn position(&self, id: FeatureId) -> Option<Point> {
        match &self.get(id)?.kind {
            FeatureKind::Point(p) => Some(p.position),
            _ => None,
        }
    }

    /// Emitted coordinates (rings closed for polygons).
    pub fn coords(&self, id: FeatureId) -> Option<&Coords> {
        self.get(id).map(|f| &f.coords)
    }

    /// Cached bounding box.
    pub fn bounds(&self, id: FeatureId) -> Option<Rect> {
        self.get(id).map(|f| f.bbox)
    }

    /// Features bound to a point (empty for linear features).
    pub fn bound_features(&self, id: FeatureId) -> Option<&[FeatureId]> {
        self.get(id).map(|f| f.bound.as_slice())
    }

    /// Effective draw order: `layer` for linear features, `layer + 0.5` for
    /// points, which therefore draw above lines and polygons of their layer.
    pub fn draw_order(&self, id: FeatureId) -> Option<f64> {
        self.get(id).map(Feature::draw_order)
    }

    /// Style of a live feature.
    pub fn style(&self, id: FeatureId) -> Option<&Style> {
        self.get(id).map(|f| &f.style)
    }

    /// Replace a feature's style.
    pub fn set_style(&mut self, id: FeatureId, style: Style) {
        if let Some(f) = self.get_mut(id) {
            f.style = style;
            self.damage.record_updated(id);
        }
    }

    /// Flags of a live feature.
    pub fn flags(&self, id: FeatureId) -> Option<FeatureFlags> {
        self.get(id).map(|f| f.flags)
    }

    /// Replace a feature's flags.
    pub fn set_flags(&mut self, id: FeatureId, flags: FeatureFlags) {
        if let Some(f) = self.get_mut(id) {
            f.flags = flags;
            self.damage.record_updated(id);
        }
    }

    /// Vertex count of a line (`ring == 0`) or polygon ring.
    pub fn vertex_count(&self, id: FeatureId, ring: u32) -> Option<usize> {
        match &self.get(id)?.kind {
            FeatureKind::Point(_) => None,
            FeatureKind::Line(l) => (ring == 0).then_some(l.vertices.len()),
            FeatureKind::Polygon(p) => p.rings.get(ring as usize).map(Vec::len),
        }
    }

    /// Every vertex id a feature references, in sequence order (empty for
    /// points).
    pub fn vertices_of(&self, id: FeatureId) -> Vec<FeatureId> {
        match self.get(id).map(|f| &f.kind) {
            Some(FeatureKind::Line(l)) => l.vertices.clone(),
            Some(FeatureKind::Polygon(p)) => p.rings.iter().flatten().copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Iterate over all live feature ids.
    pub fn iter(&self) -> impl Iterator<Item = FeatureId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.as_ref().map(|f| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "FeatureId uses 32-bit indices by design."
                )]
                FeatureId::new(i as u32, f.generation)
            })
        })
    }

    /// Number of live features.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when no features are alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain the batched render damage accumulated since the last call.
    pub fn take_damage(&mut self) -> GeometryDamage {
        core::mem::take(&mut self.damage)
    }

    // --- internals ---

    fn alloc(&mut self, style: Style, flags: FeatureFlags, kind: FeatureKind) -> FeatureId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Feature::new(generation, style, flags, kind));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Feature::new(generation, style, flags, kind)));
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "FeatureId uses 32-bit indices by design."
        )]
        FeatureId::new(idx as u32, generation)
    }

    fn remove_record(&mut self, id: FeatureId) {
        if let Some(slot) = self.slots.get_mut(id.idx())
            && slot.as_ref().is_some_and(|f| f.generation == id.1)
        {
            *slot = None;
            self.free_list.push(id.idx());
            self.damage.record_removed(id);
        }
    }

    fn get(&self, id: FeatureId) -> Option<&Feature> {
        let f = self.slots.get(id.idx())?.as_ref()?;
        (f.generation == id.1).then_some(f)
    }

    fn get_mut(&mut self, id: FeatureId) -> Option<&mut Feature> {
        let f = self.slots.get_mut(id.idx())?.as_mut()?;
        (f.generation == id.1).then_some(f)
    }

    fn check_vertex_ids(&self, vertices: &[FeatureId]) {
        for &v in vertices {
            assert!(self.is_point(v), "vertex ids must refer to live points");
        }
    }

    fn bind(&mut self, vertex: FeatureId, feature: FeatureId) {
        let v = self.get_mut(vertex).expect("dangling vertex FeatureId");
        if !v.bound.contains(&feature) {
            v.bound.push(feature);
        }
    }

    fn unbind(&mut self, vertex: FeatureId, feature: FeatureId) {
        if let Some(v) = self.get_mut(vertex) {
            v.bound.retain(|f| *f != feature);
        }
    }

    /// Recompute emitted coordinates and bounding box from the vertex list.
    fn recompute(&mut self, id: FeatureId) {
        let Some(f) = self.get(id) else {
            return;
        };
        let (coords, bbox) = match &f.kind {
            FeatureKind::Point(p) => (
                Coords::Point(p.position),
                Rect::new(p.position.x, p.position.y, p.position.x, p.position.y),
            ),
            FeatureKind::Line(l) => {
                let pts: Vec<Point> = l.vertices.iter().map(|v| self.point_of(*v)).collect();
                let bbox = bbox_of(&pts);
                (Coords::Line(pts), bbox)
            }
            FeatureKind::Polygon(p) => {
                let mut rings = Vec::with_capacity(p.rings.len());
                let mut bbox: Option<Rect> = None;
                for ring in &p.rings {
                    let mut pts: Vec<Point> = ring.iter().map(|v| self.point_of(*v)).collect();
                    for pt in &pts {
                        bbox = Some(match bbox {
                            Some(b) => union_pt(b, *pt),
                            None => Rect::new(pt.x, pt.y, pt.x, pt.y),
                        });
                    }
                    // GeoJSON closure: emit the first vertex again at the end.
                    if let Some(first) = pts.first().copied() {
                        pts.push(first);
                    }
                    rings.push(pts);
                }
                (Coords::Polygon(rings), bbox.unwrap_or(Rect::ZERO))
            }
        };
        let f = self.get_mut(id).expect("liveness checked above");
        f.coords = coords;
        f.bbox = bbox;
        self.damage.record_updated(id);
    }

    fn point_of(&self, id: FeatureId) -> Point {
        self.position(id).expect("dangling vertex FeatureId")
    }
}

fn no_duplicates(ids: &[FeatureId]) -> bool {
    ids.iter()
        .enumerate()
        .all(|(i, id)| !ids[..i].contains(id))
}
