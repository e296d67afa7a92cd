// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap a dragged point onto existing geometry and print the wire features.
//!
//! Run:
//! - `cargo run -p waypoint_demos --example draw_and_snap`

use kurbo::{Point, Rect};
use waypoint_model::{FeatureStore, Style, geojson};
use waypoint_snap::{Snap, SnapConfig, SnapList, try_snap_point};

fn main() {
    let mut store = FeatureStore::new();

    // A short street and a nearby marker.
    let a = store.insert_point(Point::new(13.3800, 52.5200), 4.0, Style::default());
    let b = store.insert_point(Point::new(13.3830, 52.5200), 4.0, Style::default());
    let c = store.insert_point(Point::new(13.3830, 52.5215), 4.0, Style::default());
    let street = store.insert_line(&[a, b, c], 2.0, Style::default());

    let viewport = Rect::new(13.37, 52.51, 13.39, 52.53);
    let list = SnapList::collect(&store, viewport, None);

    // A cursor a hair off the first segment, far from its endpoints.
    let cursor = Point::new(13.3815, 52.52001);
    let config = SnapConfig {
        vertex_priority: 0.0005,
        ..SnapConfig::default()
    };
    match try_snap_point(&store, cursor, &list, 17.0, &config) {
        Some(Snap::Segment { path, position, .. }) => {
            println!("segment snap at path {path}: {position:?}");
        }
        Some(other) => println!("snapped: {other:?}"),
        None => println!("no snap within radius"),
    }

    let wire = geojson::wire_feature(&store, street).unwrap();
    println!("{}", serde_json::to_string_pretty(&wire).unwrap());
}
