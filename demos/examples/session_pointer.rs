// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive the editing session with synthetic pointer events.
//!
//! Draws a triangle with the polygon tool, closing it by clicking the first
//! vertex, then prints the session events and the resulting damage.
//!
//! Run:
//! - `cargo run -p waypoint_demos --example session_pointer`

use kurbo::Point;
use waypoint_model::FeatureId;
use waypoint_session::{Command, EditSession, HitSource, SessionEvent, Tool, Viewport};

const ZOOM: f64 = 14.0;
/// Degrees per screen pixel at the equator for `ZOOM`.
const SCALE: f64 = 360.0 / (256.0 * (1 << 14) as f64);

struct View;

impl Viewport for View {
    fn zoom(&self) -> f64 {
        ZOOM
    }
    fn unproject(&self, screen: Point) -> Point {
        Point::new(screen.x * SCALE, screen.y * SCALE)
    }
    fn screen_size(&self) -> (f64, f64) {
        (1024.0, 768.0)
    }
}

struct NoHits;

impl HitSource for NoHits {
    fn features_at(&self, _screen: Point) -> Vec<FeatureId> {
        Vec::new()
    }
}

fn main() {
    let mut session = EditSession::new(View, NoHits);
    let mut log: Vec<SessionEvent> = Vec::new();

    log.extend(session.handle_command(Command::SelectTool(Tool::DrawPolygon)));
    for screen in [
        Point::new(100.0, 100.0),
        Point::new(300.0, 100.0),
        Point::new(200.0, 260.0),
    ] {
        log.extend(session.pointer_move(screen));
        log.extend(session.pointer_down(screen));
    }
    // Click the first corner again: the ring closes.
    log.extend(session.pointer_move(Point::new(100.0, 100.0)));
    log.extend(session.pointer_down(Point::new(100.0, 100.0)));

    println!("== Events ==");
    for ev in &log {
        println!("  {ev:?}");
    }

    let damage = session.store_mut().take_damage();
    println!("== Damage ==");
    println!("  updated: {} features", damage.updated.len());
    println!("  removed: {} features", damage.removed.len());

    if let Some(SessionEvent::DrawFinished(id)) = log
        .iter()
        .find(|e| matches!(e, SessionEvent::DrawFinished(_)))
    {
        println!("== Polygon ==");
        println!("  bounds: {:?}", session.store().bounds(*id));
    }
}
