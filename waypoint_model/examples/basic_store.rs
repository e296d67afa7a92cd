// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Waypoint Model: build features, drag a shared vertex, drain damage.

use kurbo::Point;
use waypoint_model::{FeatureStore, Style};

fn main() {
    let mut store = FeatureStore::new();
    let a = store.insert_point(Point::new(13.38, 52.52), 4.0, Style::default());
    let b = store.insert_point(Point::new(13.40, 52.51), 4.0, Style::default());
    let c = store.insert_point(Point::new(13.42, 52.53), 4.0, Style::default());
    let line = store.insert_line(&[a, b, c], 2.0, Style::default());
    let _ = store.take_damage();

    // Drag the middle vertex; the line recomputes synchronously.
    store.drag_point(b, Point::new(13.41, 52.50));
    let dmg = store.take_damage();
    println!("updated={:?} removed={:?}", dmg.updated, dmg.removed);
    println!("line bounds: {:?}", store.bounds(line));
}
