// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GeoJSON-shaped wire structs for the rendering collaborator.
//!
//! Each feature serializes to a `Feature` object (`type` / `geometry` /
//! `properties` / `id`). The rendering layer keys its visual layers by the
//! packed id plus fixed suffixes (for example `"-highlight"`, `"-border"`);
//! nothing else about the wire format is load-bearing, and no other
//! persistence format exists in this crate.
//!
//! Available with the `serde` feature.

use alloc::string::String;
use alloc::vec::Vec;
use serde::Serialize;

use crate::feature::{Coords, FeatureKind};
use crate::store::FeatureStore;
use crate::types::FeatureId;

/// GeoJSON geometry variants emitted by this model.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A single position.
    Point {
        /// `[lon, lat]` in degrees.
        coordinates: [f64; 2],
    },
    /// An open coordinate sequence.
    LineString {
        /// Positions in order.
        coordinates: Vec<[f64; 2]>,
    },
    /// Closed rings; the first position of each ring repeats at its end.
    Polygon {
        /// Outer boundary first, then holes.
        coordinates: Vec<Vec<[f64; 2]>>,
    },
}

/// Display properties carried on the wire.
#[derive(Clone, Debug, Serialize)]
pub struct Properties {
    /// CSS-style color.
    pub color: String,
    /// Draw-order layer.
    pub layer: i32,
    /// Point display radius in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Line stroke width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Line direction flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reversed: Option<bool>,
}

/// A GeoJSON `Feature` object.
#[derive(Clone, Debug, Serialize)]
pub struct WireFeature {
    /// Always `"Feature"`.
    #[serde(rename = "type")]
    pub feature_type: &'static str,
    /// Packed [`FeatureId::to_bits`].
    pub id: u64,
    /// The geometry, shaped per kind.
    pub geometry: Geometry,
    /// Display properties.
    pub properties: Properties,
}

/// Build the wire representation of a live feature.
pub fn wire_feature(store: &FeatureStore, id: FeatureId) -> Option<WireFeature> {
    let style = store.style(id)?;
    let coords = store.coords(id)?;
    let geometry = match coords {
        Coords::Point(p) => Geometry::Point {
            coordinates: [p.x, p.y],
        },
        Coords::Line(pts) => Geometry::LineString {
            coordinates: pts.iter().map(|p| [p.x, p.y]).collect(),
        },
        Coords::Polygon(rings) => Geometry::Polygon {
            coordinates: rings
                .iter()
                .map(|r| r.iter().map(|p| [p.x, p.y]).collect())
                .collect(),
        },
    };
    let mut properties = Properties {
        color: style.color.clone(),
        layer: style.layer,
        radius: None,
        width: None,
        reversed: None,
    };
    match store.kind(id)? {
        FeatureKind::Point(p) => properties.radius = Some(p.radius),
        FeatureKind::Line(l) => {
            properties.width = Some(l.width);
            properties.reversed = Some(l.reversed);
        }
        FeatureKind::Polygon(_) => {}
    }
    Some(WireFeature {
        feature_type: "Feature",
        id: id.to_bits(),
        geometry,
        properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Style;
    use alloc::vec;
    use kurbo::Point;

    #[test]
    fn line_feature_shape() {
        let mut store = FeatureStore::new();
        let a = store.insert_point(Point::new(0.0, 0.0), 4.0, Style::default());
        let b = store.insert_point(Point::new(1.0, 0.5), 4.0, Style::default());
        let l = store.insert_line(&[a, b], 3.0, Style::default());
        let wire = wire_feature(&store, l).unwrap();
        let v = serde_json::to_value(&wire).unwrap();
        assert_eq!(v["type"], "Feature");
        assert_eq!(v["id"], l.to_bits());
        assert_eq!(v["geometry"]["type"], "LineString");
        assert_eq!(
            v["geometry"]["coordinates"],
            serde_json::json!([[0.0, 0.0], [1.0, 0.5]])
        );
        assert_eq!(v["properties"]["width"], 3.0);
        assert!(v["properties"].get("radius").is_none());
    }

    #[test]
    fn polygon_rings_are_closed_on_the_wire() {
        let mut store = FeatureStore::new();
        let a = store.insert_point(Point::new(0.0, 0.0), 4.0, Style::default());
        let b = store.insert_point(Point::new(2.0, 0.0), 4.0, Style::default());
        let c = store.insert_point(Point::new(1.0, 2.0), 4.0, Style::default());
        let p = store.insert_polygon(&[vec![a, b, c]], Style::default());
        let v = serde_json::to_value(wire_feature(&store, p).unwrap()).unwrap();
        let ring = v["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], ring[3]);
    }

    #[test]
    fn point_feature_carries_radius() {
        let mut store = FeatureStore::new();
        let a = store.insert_point(Point::new(7.0, -3.0), 6.0, Style::default());
        let v = serde_json::to_value(wire_feature(&store, a).unwrap()).unwrap();
        assert_eq!(v["geometry"]["type"], "Point");
        assert_eq!(v["geometry"]["coordinates"], serde_json::json!([7.0, -3.0]));
        assert_eq!(v["properties"]["radius"], 6.0);
    }
}
