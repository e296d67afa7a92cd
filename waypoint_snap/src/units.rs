// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unit conversions and planar geometry for snapping.
//!
//! Coordinates are (longitude, latitude) degrees with a deliberately flat
//! treatment of the earth: longitudes are scaled by the cosine of a reference
//! latitude and no antimeridian handling is attempted. That matches the web
//! mercator tile pyramid the editor draws over, where
//! `metersPerPixel = C · cos(lat) / 2^(zoom + 8)` for earth circumference `C`.

use kurbo::Point;

/// Earth circumference in meters at the equator (WGS84-ish).
pub const EARTH_CIRCUMFERENCE: f64 = 40_075_017.0;

/// Meters per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE: f64 = EARTH_CIRCUMFERENCE / 360.0;

/// Ground meters covered by one screen pixel at `latitude` (degrees) and
/// `zoom` (web mercator zoom level, 256px base tiles).
pub fn meters_per_pixel(latitude: f64, zoom: f64) -> f64 {
    EARTH_CIRCUMFERENCE * cos(latitude.to_radians()) / exp2(zoom + 8.0)
}

/// Longitude scale factor at a reference latitude in degrees.
pub fn lon_scale(latitude: f64) -> f64 {
    cos(latitude.to_radians())
}

/// Planar distance in meters between two lon/lat points, with longitude
/// scaled by `lon_scale` (see [`lon_scale`]).
pub fn distance_m(a: Point, b: Point, lon_scale: f64) -> f64 {
    let dx = (a.x - b.x) * lon_scale * METERS_PER_DEGREE;
    let dy = (a.y - b.y) * METERS_PER_DEGREE;
    sqrt(dx * dx + dy * dy)
}

/// Unscaled planar distance in degrees. Used for the vertex-priority gate,
/// which the editor expresses directly in degrees.
pub fn distance_deg(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    sqrt(dx * dx + dy * dy)
}

/// Project `p` onto the segment `a`–`b` and return the closest point on the
/// segment (in lon/lat degrees) with its distance to `p` in meters.
///
/// The projection runs in the cosine-scaled planar space so the returned
/// point is the metric-nearest one, then the parameter is applied back in
/// degree space (lerping in degrees is consistent with that space).
pub fn project_onto_segment(p: Point, a: Point, b: Point, lon_scale: f64) -> (Point, f64) {
    let ax = a.x * lon_scale;
    let ay = a.y;
    let bx = b.x * lon_scale;
    let by = b.y;
    let px = p.x * lon_scale;
    let py = p.y;

    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let closest = Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
    (closest, distance_m(p, closest, lon_scale))
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("waypoint_snap requires either the `std` or `libm` feature");

#[cfg(feature = "std")]
#[inline]
pub(crate) fn cos(x: f64) -> f64 {
    x.cos()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn cos(x: f64) -> f64 {
    libm::cos(x)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn exp2(x: f64) -> f64 {
    x.exp2()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn exp2(x: f64) -> f64 {
    libm::exp2(x)
}
