// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editing session state machine.
//!
//! ## Overview
//!
//! [`EditSession`] turns pointer events and UI commands into geometry-model
//! mutations. Everything runs synchronously on the caller's thread in
//! dispatch order: a pointer-move snap computation always completes before
//! the next event is processed, so stale snap state is never applied over a
//! newer cursor position. The store has exactly one writer, this session,
//! and a concurrent host must keep it that way by confining the session to
//! one task.
//!
//! ## States
//!
//! - Idle (select): hover tracking and hit-testing.
//! - Dragging a vertex: per-frame snap against everything except the dragged
//!   point and the features it belongs to; release merges onto a snapped
//!   vertex or welds into a snapped segment.
//! - Dragging a whole feature: translate every vertex, no snapping.
//! - Drawing point / line / polygon: committed vertices accumulate behind a
//!   provisional cursor-tracking vertex; a polygon closes by clicking its
//!   first vertex, a line finishes on [`Command::ConfirmDraw`].
//!
//! Cancelling ([`Command::Cancel`]) restores committed state: a dragged
//! vertex springs back to its origin, a drawing is discarded without
//! touching shared geometry.

use alloc::vec::Vec;
use kurbo::{Point, Rect};

use waypoint_model::{
    Action, FeatureFlags, FeatureId, FeatureStore, Style, VertexPath,
};
use waypoint_snap::{Drawing, Snap, SnapConfig, SnapList, align_to_guides, try_snap_point};

use crate::hover::{HoverState, pick_topmost};
use crate::types::{Command, HitSource, SessionEvent, Tool, Viewport};

/// Display radius for vertices created while drawing.
const VERTEX_RADIUS: f64 = 4.0;
/// Display radius for standalone markers.
const MARKER_RADIUS: f64 = 6.0;
/// Stroke width for freshly drawn lines.
const DEFAULT_WIDTH: f64 = 2.0;

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
enum DrawKind {
    Line,
    Polygon,
}

impl DrawKind {
    fn min_vertices(self) -> usize {
        match self {
            Self::Line => 2,
            Self::Polygon => 3,
        }
    }
}

#[derive(Clone, Debug)]
struct DrawState {
    kind: DrawKind,
    /// Vertices fixed by clicks, in order.
    committed: Vec<FeatureId>,
    /// Created once `committed` reaches the kind's minimum.
    feature: Option<FeatureId>,
    /// Trailing vertex that tracks the live cursor.
    provisional: Option<FeatureId>,
}

impl DrawState {
    fn new(kind: DrawKind) -> Self {
        Self {
            kind,
            committed: Vec::new(),
            feature: None,
            provisional: None,
        }
    }
}

#[derive(Clone, Debug)]
enum State {
    Idle,
    DraggingVertex {
        point: FeatureId,
        origin: Point,
        last_snap: Option<Snap>,
    },
    DraggingFeature {
        feature: FeatureId,
        start: Point,
        last: Point,
    },
    Drawing(DrawState),
}

/// The editing session: owns the feature store and drives it from pointer
/// events and commands.
///
/// Generic over the [`Viewport`] and [`HitSource`] collaborators so hosts and
/// tests can plug in their own view state and picking.
pub struct EditSession<V: Viewport, H: HitSource> {
    store: FeatureStore,
    viewport: V,
    hits: H,
    config: SnapConfig,
    tool: Tool,
    state: State,
    selection: Option<FeatureId>,
    hover: HoverState,
}

impl<V: Viewport, H: HitSource> core::fmt::Debug for EditSession<V, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EditSession")
            .field("store", &self.store)
            .field("tool", &self.tool)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl<V: Viewport, H: HitSource> EditSession<V, H> {
    /// Create a session with an empty store.
    pub fn new(viewport: V, hits: H) -> Self {
        Self::with_store(FeatureStore::new(), viewport, hits)
    }

    /// Create a session over an existing store (e.g. loaded map data).
    pub fn with_store(store: FeatureStore, viewport: V, hits: H) -> Self {
        Self {
            store,
            viewport,
            hits,
            config: SnapConfig::default(),
            tool: Tool::Select,
            state: State::Idle,
            selection: None,
            hover: HoverState::new(),
        }
    }

    /// The geometry model.
    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    /// Mutable access to the geometry model, e.g. to drain damage.
    pub fn store_mut(&mut self) -> &mut FeatureStore {
        &mut self.store
    }

    /// The active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// The selected feature, if any.
    pub fn selection(&self) -> Option<FeatureId> {
        self.selection
    }

    /// Snap tuning.
    pub fn snap_config(&self) -> &SnapConfig {
        &self.config
    }

    /// Replace the snap tuning.
    pub fn set_snap_config(&mut self, config: SnapConfig) {
        self.config = config;
    }

    // --- pointer events ---

    /// Handle a pointer press at a screen position.
    pub fn pointer_down(&mut self, screen: Point) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        match self.tool {
            Tool::Select => self.select_down(screen, &mut events),
            Tool::DrawPoint => self.draw_point_down(screen, &mut events),
            Tool::DrawLine | Tool::DrawPolygon => self.draw_linear_down(screen, &mut events),
        }
        events
    }

    /// Handle a pointer move at a screen position.
    pub fn pointer_move(&mut self, screen: Point) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let state = core::mem::replace(&mut self.state, State::Idle);
        self.state = match state {
            State::Idle => {
                if self.tool == Tool::Select {
                    let hit = pick_topmost(&self.store, &self.hits.features_at(screen));
                    if !self.hover.update(hit).is_empty() {
                        events.push(SessionEvent::HoverChanged(hit));
                    }
                }
                State::Idle
            }
            State::DraggingVertex { point, origin, .. } => {
                let geo = self.viewport.unproject(screen);
                let list = self.drag_candidates(point);
                let zoom = self.viewport.zoom();
                let snap = try_snap_point(&self.store, geo, &list, zoom, &self.config);
                let position = match &snap {
                    Some(s) => s.position(),
                    None => align_to_guides(geo, &list, zoom, &self.config).unwrap_or(geo),
                };
                self.store.drag_point(point, position);
                State::DraggingVertex {
                    point,
                    origin,
                    last_snap: snap,
                }
            }
            State::DraggingFeature {
                feature,
                start,
                last,
            } => {
                let geo = self.viewport.unproject(screen);
                self.store.translate_feature(feature, geo - last);
                State::DraggingFeature {
                    feature,
                    start,
                    last: geo,
                }
            }
            State::Drawing(draw) => {
                let geo = self.viewport.unproject(screen);
                let (_, position) = self.draw_snap(&draw, geo);
                if let Some(p) = draw.provisional {
                    self.store.drag_point(p, position);
                }
                State::Drawing(draw)
            }
        };
        events
    }

    /// Handle a pointer release.
    pub fn pointer_up(&mut self, _screen: Point) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        match core::mem::replace(&mut self.state, State::Idle) {
            State::DraggingVertex {
                point, last_snap, ..
            } => match last_snap {
                Some(Snap::Point {
                    feature: target, ..
                })
                | Some(Snap::SegmentVertex { vertex: target, .. })
                    if target != point =>
                {
                    self.merge_into(target, point, &mut events);
                }
                Some(Snap::Segment { feature, path, .. }) => {
                    // Weld: the dragged vertex splits the snapped segment and
                    // becomes shared between both features.
                    self.store.insert_vertex_after(feature, point, path);
                }
                _ => {}
            },
            State::DraggingFeature { .. } => {}
            // Drawing advances on presses, not releases.
            other => self.state = other,
        }
        events
    }

    // --- commands ---

    /// Handle a discrete UI command.
    pub fn handle_command(&mut self, command: Command) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        match command {
            Command::SelectTool(tool) => {
                self.abort_interaction(&mut events);
                self.tool = tool;
            }
            Command::DeleteSelection => {
                if let Some(id) = self.selection {
                    self.delete_feature(id, &mut events);
                }
            }
            Command::ConfirmDraw => {
                if let State::Drawing(d) = core::mem::replace(&mut self.state, State::Idle) {
                    if d.feature.is_some() {
                        self.finish_draw(d, &mut events);
                    } else {
                        self.cancel_draw(d, &mut events);
                    }
                }
            }
            Command::Cancel => self.abort_interaction(&mut events),
        }
        events
    }

    // --- select tool ---

    fn select_down(&mut self, screen: Point, events: &mut Vec<SessionEvent>) {
        if !matches!(self.state, State::Idle) {
            return;
        }
        match pick_topmost(&self.store, &self.hits.features_at(screen)) {
            Some(id) if self.store.is_point(id) => {
                if let Some(origin) = self.store.position(id) {
                    self.state = State::DraggingVertex {
                        point: id,
                        origin,
                        last_snap: None,
                    };
                    self.set_selection(Some(id), events);
                }
            }
            Some(id) => {
                let geo = self.viewport.unproject(screen);
                self.state = State::DraggingFeature {
                    feature: id,
                    start: geo,
                    last: geo,
                };
                self.set_selection(Some(id), events);
            }
            None => self.set_selection(None, events),
        }
    }

    fn merge_into(
        &mut self,
        target: FeatureId,
        dragged: FeatureId,
        events: &mut Vec<SessionEvent>,
    ) {
        // A merged marker stays a marker: the flag moves to the survivor.
        if let (Some(df), Some(tf)) = (self.store.flags(dragged), self.store.flags(target))
            && df.contains(FeatureFlags::STANDALONE)
        {
            self.store.set_flags(target, tf | FeatureFlags::STANDALONE);
            self.store.set_flags(dragged, df - FeatureFlags::STANDALONE);
        }
        for (feature, action) in self.store.merge_points(target, dragged) {
            self.apply_action(feature, action);
        }
        let _ = self.store.release_point(dragged);
        if self.selection == Some(dragged) {
            self.selection = Some(target);
            events.push(SessionEvent::SelectionChanged(Some(target)));
        }
    }

    fn delete_feature(&mut self, id: FeatureId, events: &mut Vec<SessionEvent>) {
        if self.store.is_point(id) {
            // Pull the point out of every feature that binds it, then drop it.
            let bound = self
                .store
                .bound_features(id)
                .map(<[_]>::to_vec)
                .unwrap_or_default();
            for feature in bound {
                let action = self.store.remove_vertex(feature, id);
                self.apply_action(feature, action);
            }
        }
        self.store.remove_feature(id);
        if self.hover.current() == Some(id) {
            let _ = self.hover.clear();
            events.push(SessionEvent::HoverChanged(None));
        }
        self.set_selection(None, events);
    }

    fn apply_action(&mut self, feature: FeatureId, action: Action) {
        match action {
            Action::Nothing => {}
            Action::DeleteFeature => self.store.remove_feature(feature),
            Action::DeleteRing(points) => {
                for p in points {
                    let _ = self.store.release_point(p);
                }
            }
        }
    }

    // --- draw tools ---

    fn draw_point_down(&mut self, screen: Point, events: &mut Vec<SessionEvent>) {
        let geo = self.viewport.unproject(screen);
        let list = SnapList::collect(&self.store, self.viewport_bounds(), None);
        let zoom = self.viewport.zoom();
        let snap = try_snap_point(&self.store, geo, &list, zoom, &self.config);
        let id = match snap {
            Some(Snap::Point { feature, .. }) | Some(Snap::SegmentVertex { vertex: feature, .. }) => {
                // Promote the existing vertex to a marker instead of stacking
                // a second point on the same spot.
                if let Some(flags) = self.store.flags(feature) {
                    self.store
                        .set_flags(feature, flags | FeatureFlags::STANDALONE);
                }
                feature
            }
            Some(Snap::Segment {
                feature,
                path,
                position,
            }) => {
                let v = self.new_marker(position);
                self.store.insert_vertex_after(feature, v, path);
                v
            }
            None => {
                let position = align_to_guides(geo, &list, zoom, &self.config).unwrap_or(geo);
                self.new_marker(position)
            }
        };
        events.push(SessionEvent::DrawFinished(id));
        self.set_selection(Some(id), events);
    }

    fn draw_linear_down(&mut self, screen: Point, events: &mut Vec<SessionEvent>) {
        let kind = if self.tool == Tool::DrawLine {
            DrawKind::Line
        } else {
            DrawKind::Polygon
        };
        let geo = self.viewport.unproject(screen);
        let mut draw = match core::mem::replace(&mut self.state, State::Idle) {
            State::Drawing(d) => d,
            _ => DrawState::new(kind),
        };
        let (snap, position) = self.draw_snap(&draw, geo);

        match snap {
            Some(Snap::Point { feature: p, .. }) | Some(Snap::SegmentVertex { vertex: p, .. }) => {
                if draw.kind == DrawKind::Polygon
                    && draw.committed.first() == Some(&p)
                    && draw.committed.len() >= DrawKind::Polygon.min_vertices()
                {
                    // Clicking the first vertex closes the ring.
                    self.finish_draw(draw, events);
                    return;
                }
                if draw.committed.contains(&p) {
                    // Re-using a committed vertex would degenerate the
                    // sequence; ignore the click.
                    self.state = State::Drawing(draw);
                    return;
                }
                self.commit_existing(&mut draw, p, position);
            }
            Some(Snap::Segment {
                feature,
                path,
                position,
            }) => {
                let v = self
                    .store
                    .insert_point(position, VERTEX_RADIUS, Style::default());
                // Weld into the snapped feature's segment as a shared vertex.
                self.store.insert_vertex_after(feature, v, path);
                self.commit_existing(&mut draw, v, position);
            }
            None => self.commit_new(&mut draw, position),
        }
        self.state = State::Drawing(draw);
    }

    /// Commit a click onto an existing point: the provisional cursor vertex
    /// (if any) is rebound to it and released.
    fn commit_existing(&mut self, draw: &mut DrawState, p: FeatureId, position: Point) {
        if let Some(prov) = draw.provisional.take() {
            if let Some(f) = draw.feature {
                let _ = self.store.replace_vertex(f, p, prov);
            }
            let _ = self.store.release_point(prov);
        }
        draw.committed.push(p);
        self.after_commit(draw, position);
    }

    /// Commit a click at a free position: the provisional vertex freezes
    /// there (or a fresh point is created before the feature exists).
    fn commit_new(&mut self, draw: &mut DrawState, position: Point) {
        match draw.provisional.take() {
            Some(p) => {
                self.store.drag_point(p, position);
                draw.committed.push(p);
            }
            None => {
                let v = self
                    .store
                    .insert_point(position, VERTEX_RADIUS, Style::default());
                draw.committed.push(v);
            }
        }
        self.after_commit(draw, position);
    }

    fn after_commit(&mut self, draw: &mut DrawState, position: Point) {
        if draw.feature.is_none() && draw.committed.len() == draw.kind.min_vertices() {
            let f = match draw.kind {
                DrawKind::Line => {
                    self.store
                        .insert_line(&draw.committed, DEFAULT_WIDTH, Style::default())
                }
                DrawKind::Polygon => self
                    .store
                    .insert_polygon(&[draw.committed.clone()], Style::default()),
            };
            draw.feature = Some(f);
        }
        if let Some(f) = draw.feature {
            // Fresh provisional vertex tracking the cursor from here on.
            let v = self
                .store
                .insert_point(position, VERTEX_RADIUS, Style::default());
            self.store.append_vertex(f, v, append_path(&self.store, f));
            draw.provisional = Some(v);
        }
    }

    fn finish_draw(&mut self, mut draw: DrawState, events: &mut Vec<SessionEvent>) {
        let Some(f) = draw.feature else {
            self.cancel_draw(draw, events);
            return;
        };
        if let Some(p) = draw.provisional.take() {
            // The feature holds committed + provisional, which is strictly
            // above the minimum, so this removal never degenerates.
            match self.store.remove_vertex(f, p) {
                Action::Nothing => {
                    let _ = self.store.release_point(p);
                }
                action => self.apply_action(f, action),
            }
        }
        self.state = State::Idle;
        events.push(SessionEvent::DrawFinished(f));
        self.set_selection(Some(f), events);
    }

    fn cancel_draw(&mut self, draw: DrawState, events: &mut Vec<SessionEvent>) {
        if let Some(f) = draw.feature {
            // Cascades to the drawn vertices; shared or standalone points
            // survive untouched.
            self.store.remove_feature(f);
        } else {
            for v in draw.committed {
                let _ = self.store.release_point(v);
            }
            if let Some(p) = draw.provisional {
                let _ = self.store.release_point(p);
            }
        }
        self.state = State::Idle;
        events.push(SessionEvent::DrawCancelled);
    }

    /// Cancel whatever interaction is in flight, restoring committed state.
    fn abort_interaction(&mut self, events: &mut Vec<SessionEvent>) {
        match core::mem::replace(&mut self.state, State::Idle) {
            State::Idle => {}
            State::DraggingVertex { point, origin, .. } => {
                self.store.drag_point(point, origin);
            }
            State::DraggingFeature {
                feature,
                start,
                last,
            } => {
                self.store.translate_feature(feature, start - last);
            }
            State::Drawing(d) => self.cancel_draw(d, events),
        }
    }

    // --- snapping plumbing ---

    /// Viewport bounds in lon/lat degrees from the four screen corners.
    fn viewport_bounds(&self) -> Rect {
        let (w, h) = self.viewport.screen_size();
        let corners = [
            self.viewport.unproject(Point::ZERO),
            self.viewport.unproject(Point::new(w, 0.0)),
            self.viewport.unproject(Point::new(0.0, h)),
            self.viewport.unproject(Point::new(w, h)),
        ];
        let mut r = Rect::new(corners[0].x, corners[0].y, corners[0].x, corners[0].y);
        for p in &corners[1..] {
            r = Rect::new(r.x0.min(p.x), r.y0.min(p.y), r.x1.max(p.x), r.y1.max(p.y));
        }
        r
    }

    /// Candidates for a vertex drag: everything except the dragged point and
    /// the features it belongs to, which all follow the pointer. Their other
    /// vertices stay snappable, so dropping onto a neighbor collapses the
    /// segment via the merge path.
    fn drag_candidates(&self, point: FeatureId) -> SnapList {
        let mut list = SnapList::collect(&self.store, self.viewport_bounds(), None);
        let bound = self
            .store
            .bound_features(point)
            .map(<[_]>::to_vec)
            .unwrap_or_default();
        list.features.retain(|f| *f != point && !bound.contains(f));
        list.vertices.retain(|(v, _)| *v != point);
        list
    }

    /// Candidates and corrected position for a draw gesture.
    fn draw_snap(&self, draw: &DrawState, geo: Point) -> (Option<Snap>, Point) {
        let drawing = draw.feature.map(|f| Drawing {
            feature: f,
            provisional: usize::from(draw.provisional.is_some()),
        });
        let mut list = SnapList::collect(&self.store, self.viewport_bounds(), drawing);
        if let Some(p) = draw.provisional {
            // The cursor vertex is a point feature too; it must never be its
            // own snap target.
            list.features.retain(|f| *f != p);
            list.vertices.retain(|(v, _)| *v != p);
        }
        let zoom = self.viewport.zoom();
        let snap = try_snap_point(&self.store, geo, &list, zoom, &self.config);
        let position = match &snap {
            Some(s) => s.position(),
            None => align_to_guides(geo, &list, zoom, &self.config).unwrap_or(geo),
        };
        (snap, position)
    }

    fn new_marker(&mut self, position: Point) -> FeatureId {
        let id = self
            .store
            .insert_point(position, MARKER_RADIUS, Style::default());
        let flags = self.store.flags(id).unwrap_or_default() | FeatureFlags::STANDALONE;
        self.store.set_flags(id, flags);
        id
    }

    fn set_selection(&mut self, selection: Option<FeatureId>, events: &mut Vec<SessionEvent>) {
        if self.selection != selection {
            self.selection = selection;
            events.push(SessionEvent::SelectionChanged(selection));
        }
    }
}

/// Any index at or past the end appends; the store normalizes it.
fn append_path(store: &FeatureStore, feature: FeatureId) -> VertexPath {
    let n = store.vertex_count(feature, 0).unwrap_or(0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Vertex counts fit u32 by construction."
    )]
    VertexPath::at(n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use waypoint_model::{Coords, FeatureKind};
    use waypoint_snap::meters_per_pixel;
    use waypoint_snap::units::METERS_PER_DEGREE;

    /// Linear viewport: screen pixels map to degrees at the true
    /// meters-per-pixel scale for the configured zoom (equator).
    struct TestView {
        zoom: f64,
    }

    impl TestView {
        fn scale(&self) -> f64 {
            meters_per_pixel(0.0, self.zoom) / METERS_PER_DEGREE
        }

        /// Screen position that unprojects to the given lon/lat.
        fn project(&self, geo: Point) -> Point {
            Point::new(geo.x / self.scale(), geo.y / self.scale())
        }
    }

    impl Viewport for TestView {
        fn zoom(&self) -> f64 {
            self.zoom
        }
        fn unproject(&self, screen: Point) -> Point {
            Point::new(screen.x * self.scale(), screen.y * self.scale())
        }
        fn screen_size(&self) -> (f64, f64) {
            (800.0, 600.0)
        }
    }

    /// Scriptable hit source shared with the test body.
    #[derive(Clone, Default)]
    struct TestHits(Rc<RefCell<Vec<FeatureId>>>);

    impl TestHits {
        fn set(&self, ids: &[FeatureId]) {
            *self.0.borrow_mut() = ids.to_vec();
        }
    }

    impl HitSource for TestHits {
        fn features_at(&self, _screen: Point) -> Vec<FeatureId> {
            self.0.borrow().clone()
        }
    }

    fn session(zoom: f64) -> (EditSession<TestView, TestHits>, TestHits) {
        let hits = TestHits::default();
        let s = EditSession::new(TestView { zoom }, hits.clone());
        (s, hits)
    }

    #[test]
    fn draw_line_and_confirm() {
        let (mut s, _) = session(12.0);
        let _ = s.handle_command(Command::SelectTool(Tool::DrawLine));
        let view = TestView { zoom: 12.0 };
        for geo in [
            Point::new(0.01, 0.01),
            Point::new(0.05, 0.01),
            Point::new(0.05, 0.05),
        ] {
            let screen = view.project(geo);
            let _ = s.pointer_move(screen);
            let _ = s.pointer_down(screen);
        }
        let events = s.handle_command(Command::ConfirmDraw);
        let finished = events.iter().find_map(|e| match e {
            SessionEvent::DrawFinished(id) => Some(*id),
            _ => None,
        });
        let line = finished.expect("confirm finishes the line");
        assert_eq!(s.store().vertex_count(line, 0), Some(3));
        let Some(Coords::Line(pts)) = s.store().coords(line) else {
            panic!("expected line coords");
        };
        assert!((pts[0].x - 0.01).abs() < 1e-9);
        assert!((pts[2].y - 0.05).abs() < 1e-9);
        // No provisional vertex left behind.
        assert_eq!(s.store().len(), 4, "three vertices plus the line");
    }

    #[test]
    fn draw_polygon_closes_on_first_vertex() {
        let (mut s, _) = session(12.0);
        let _ = s.handle_command(Command::SelectTool(Tool::DrawPolygon));
        let view = TestView { zoom: 12.0 };
        let corners = [
            Point::new(0.01, 0.01),
            Point::new(0.08, 0.01),
            Point::new(0.08, 0.08),
        ];
        for geo in corners {
            let screen = view.project(geo);
            let _ = s.pointer_move(screen);
            let _ = s.pointer_down(screen);
        }
        // Click exactly on the first vertex to close.
        let close = view.project(corners[0]);
        let _ = s.pointer_move(close);
        let events = s.pointer_down(close);
        let poly = events
            .iter()
            .find_map(|e| match e {
                SessionEvent::DrawFinished(id) => Some(*id),
                _ => None,
            })
            .expect("closing click finishes the polygon");
        let Some(Coords::Polygon(rings)) = s.store().coords(poly) else {
            panic!("expected polygon coords");
        };
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4, "three vertices, closed on the wire");
        assert_eq!(rings[0][0], rings[0][3]);
    }

    #[test]
    fn drag_vertex_snaps_and_merges() {
        let (mut s, hits) = session(12.0);
        let view = TestView { zoom: 12.0 };
        let store = s.store_mut();
        let a = store.insert_point(Point::new(0.01, 0.01), 4.0, Style::default());
        let c = store.insert_point(Point::new(0.2, 0.2), 4.0, Style::default());
        let line = store.insert_line(&[a, c], 2.0, Style::default());
        let target = store.insert_point(Point::new(0.03, 0.01), 4.0, Style::default());

        hits.set(&[a]);
        let _ = s.pointer_down(view.project(Point::new(0.01, 0.01)));
        // Drop exactly on the target point.
        let _ = s.pointer_move(view.project(Point::new(0.03, 0.01)));
        let _ = s.pointer_up(view.project(Point::new(0.03, 0.01)));

        assert!(!s.store().is_alive(a), "dragged vertex merged away");
        assert_eq!(
            s.store().vertex(line, VertexPath::at(0)),
            Some(target),
            "line rebound to the merge target"
        );
        assert_eq!(s.selection(), Some(target));
    }

    #[test]
    fn drag_release_on_segment_welds_vertex_in() {
        let (mut s, hits) = session(12.0);
        let view = TestView { zoom: 12.0 };
        let store = s.store_mut();
        let a = store.insert_point(Point::new(0.0, 0.0), 4.0, Style::default());
        let b = store.insert_point(Point::new(0.2, 0.0), 4.0, Style::default());
        let line = store.insert_line(&[a, b], 2.0, Style::default());
        let marker = store.insert_point(Point::new(0.1, 0.05), 6.0, Style::default());

        hits.set(&[marker]);
        let _ = s.pointer_down(view.project(Point::new(0.1, 0.05)));
        // A couple of pixels off the segment interior, far from both endpoints.
        let drop = Point::new(0.1, 2.0 * view.scale());
        let _ = s.pointer_move(view.project(drop));
        let _ = s.pointer_up(view.project(drop));

        assert_eq!(s.store().vertex_count(line, 0), Some(3));
        assert_eq!(s.store().vertex(line, VertexPath::at(1)), Some(marker));
        let pos = s.store().position(marker).unwrap();
        assert_eq!(pos.y, 0.0, "snapped onto the segment");
    }

    #[test]
    fn cancel_restores_dragged_vertex() {
        let (mut s, hits) = session(12.0);
        let view = TestView { zoom: 12.0 };
        let a = s
            .store_mut()
            .insert_point(Point::new(0.05, 0.05), 4.0, Style::default());
        hits.set(&[a]);
        let _ = s.pointer_down(view.project(Point::new(0.05, 0.05)));
        let _ = s.pointer_move(view.project(Point::new(0.09, 0.09)));
        assert!((s.store().position(a).unwrap().x - 0.09).abs() < 1e-9);
        let _ = s.handle_command(Command::Cancel);
        assert_eq!(s.store().position(a).unwrap(), Point::new(0.05, 0.05));
    }

    #[test]
    fn cancel_discards_drawing_but_keeps_shared_points() {
        let (mut s, _) = session(12.0);
        let view = TestView { zoom: 12.0 };
        let existing = s
            .store_mut()
            .insert_point(Point::new(0.02, 0.02), 4.0, Style::default());
        let marker_flags = s.store().flags(existing).unwrap() | FeatureFlags::STANDALONE;
        s.store_mut().set_flags(existing, marker_flags);

        let _ = s.handle_command(Command::SelectTool(Tool::DrawLine));
        // First click snaps onto the existing marker, second is free.
        let _ = s.pointer_down(view.project(Point::new(0.02, 0.02)));
        let _ = s.pointer_down(view.project(Point::new(0.06, 0.02)));
        let events = s.handle_command(Command::Cancel);
        assert!(events.contains(&SessionEvent::DrawCancelled));
        assert!(s.store().is_alive(existing), "marker survives the cancel");
        assert_eq!(s.store().len(), 1, "everything drawn is discarded");
    }

    #[test]
    fn delete_selection_cascades() {
        let (mut s, hits) = session(12.0);
        let view = TestView { zoom: 12.0 };
        let store = s.store_mut();
        let a = store.insert_point(Point::new(0.01, 0.01), 4.0, Style::default());
        let b = store.insert_point(Point::new(0.05, 0.01), 4.0, Style::default());
        let line = store.insert_line(&[a, b], 2.0, Style::default());

        hits.set(&[line]);
        let _ = s.pointer_down(view.project(Point::new(0.03, 0.01)));
        let _ = s.pointer_up(view.project(Point::new(0.03, 0.01)));
        assert_eq!(s.selection(), Some(line));
        let events = s.handle_command(Command::DeleteSelection);
        assert!(events.contains(&SessionEvent::SelectionChanged(None)));
        assert!(!s.store().is_alive(line));
        assert!(!s.store().is_alive(a), "exclusive vertices deleted too");
        assert!(s.store().is_empty());
    }

    #[test]
    fn deleting_a_vertex_of_a_minimal_line_deletes_the_line() {
        let (mut s, hits) = session(12.0);
        let view = TestView { zoom: 12.0 };
        let store = s.store_mut();
        let a = store.insert_point(Point::new(0.01, 0.01), 4.0, Style::default());
        let b = store.insert_point(Point::new(0.05, 0.01), 4.0, Style::default());
        let line = store.insert_line(&[a, b], 2.0, Style::default());

        hits.set(&[a]);
        let _ = s.pointer_down(view.project(Point::new(0.01, 0.01)));
        let _ = s.pointer_up(view.project(Point::new(0.01, 0.01)));
        let _ = s.handle_command(Command::DeleteSelection);
        assert!(!s.store().is_alive(a));
        assert!(!s.store().is_alive(line), "line below minimum goes with it");
        assert!(!s.store().is_alive(b), "orphaned plain vertex released");
    }

    #[test]
    fn hover_reports_topmost_point() {
        let (mut s, hits) = session(12.0);
        let store = s.store_mut();
        let a = store.insert_point(Point::new(0.01, 0.01), 4.0, Style::default());
        let b = store.insert_point(Point::new(0.05, 0.01), 4.0, Style::default());
        let line = store.insert_line(&[a, b], 2.0, Style::default());

        hits.set(&[line, a]);
        let events = s.pointer_move(Point::new(10.0, 10.0));
        assert_eq!(events, vec![SessionEvent::HoverChanged(Some(a))]);
        hits.set(&[line]);
        let events = s.pointer_move(Point::new(12.0, 10.0));
        assert_eq!(events, vec![SessionEvent::HoverChanged(Some(line))]);
        hits.set(&[]);
        let events = s.pointer_move(Point::new(400.0, 400.0));
        assert_eq!(events, vec![SessionEvent::HoverChanged(None)]);
    }

    #[test]
    fn switching_tools_cancels_drawing() {
        let (mut s, _) = session(12.0);
        let view = TestView { zoom: 12.0 };
        let _ = s.handle_command(Command::SelectTool(Tool::DrawLine));
        let _ = s.pointer_down(view.project(Point::new(0.01, 0.01)));
        let events = s.handle_command(Command::SelectTool(Tool::Select));
        assert!(events.contains(&SessionEvent::DrawCancelled));
        assert!(s.store().is_empty());
        assert_eq!(s.tool(), Tool::Select);
    }

    #[test]
    fn draw_point_places_standalone_marker() {
        let (mut s, _) = session(12.0);
        let view = TestView { zoom: 12.0 };
        let _ = s.handle_command(Command::SelectTool(Tool::DrawPoint));
        let events = s.pointer_down(view.project(Point::new(0.04, 0.04)));
        let id = events
            .iter()
            .find_map(|e| match e {
                SessionEvent::DrawFinished(id) => Some(*id),
                _ => None,
            })
            .expect("marker placed");
        assert!(matches!(s.store().kind(id), Some(FeatureKind::Point(_))));
        assert!(
            s.store()
                .flags(id)
                .unwrap()
                .contains(FeatureFlags::STANDALONE)
        );
    }

    #[test]
    fn drawing_welds_onto_existing_segment() {
        let (mut s, _) = session(12.0);
        let view = TestView { zoom: 12.0 };
        let store = s.store_mut();
        let a = store.insert_point(Point::new(0.0, 0.0), 4.0, Style::default());
        let b = store.insert_point(Point::new(0.2, 0.0), 4.0, Style::default());
        let other = store.insert_line(&[a, b], 2.0, Style::default());

        let _ = s.handle_command(Command::SelectTool(Tool::DrawLine));
        // First click lands a couple of pixels off the middle of the other
        // line's segment; it must weld a shared vertex into it.
        let near_mid = Point::new(0.1, 2.0 * view.scale());
        let _ = s.pointer_down(view.project(near_mid));
        let _ = s.pointer_down(view.project(Point::new(0.1, 0.08)));
        let events = s.handle_command(Command::ConfirmDraw);
        let line = events
            .iter()
            .find_map(|e| match e {
                SessionEvent::DrawFinished(id) => Some(*id),
                _ => None,
            })
            .expect("line finished");
        assert_eq!(s.store().vertex_count(other, 0), Some(3), "segment split");
        let shared = s.store().vertex(other, VertexPath::at(1)).unwrap();
        assert_eq!(s.store().vertex(line, VertexPath::at(0)), Some(shared));
        assert_eq!(
            s.store().bound_features(shared).map(<[_]>::len),
            Some(2),
            "vertex shared by both lines"
        );
    }
}
