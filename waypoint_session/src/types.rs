// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the editing session: tools, commands, outward events, and
//! the collaborator traits.
//!
//! ## Overview
//!
//! The session is deliberately narrow at its seams. It pulls the current view
//! state through [`Viewport`] and rendered hit candidates through
//! [`HitSource`]; everything it wants the host to know flows back as
//! [`SessionEvent`] values returned from each pointer or command call, in
//! dispatch order. Rendering updates travel separately through
//! [`FeatureStore::take_damage`](waypoint_model::FeatureStore::take_damage).

use alloc::vec::Vec;
use kurbo::Point;

use waypoint_model::FeatureId;

/// The active editing tool.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tool {
    /// Hover, select, and drag existing features.
    Select,
    /// Place standalone point markers.
    DrawPoint,
    /// Draw a polyline, one vertex per click.
    DrawLine,
    /// Draw a polygon outer ring; closes on its first vertex.
    DrawPolygon,
}

/// Discrete commands from the UI collaborator.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// Switch tools. Cancels any drawing in progress first.
    SelectTool(Tool),
    /// Delete the selected feature (a selected point is also removed from
    /// every feature that binds it).
    DeleteSelection,
    /// Finish the line or polygon being drawn, if it is valid.
    ConfirmDraw,
    /// Abort the current drag or drawing, restoring committed state.
    Cancel,
}

/// Notifications for the host, returned in order from each session call.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// The hovered feature changed (None when the pointer left all features).
    HoverChanged(Option<FeatureId>),
    /// The selection changed.
    SelectionChanged(Option<FeatureId>),
    /// A draw gesture produced a finished feature.
    DrawFinished(FeatureId),
    /// The drawing in progress was discarded.
    DrawCancelled,
}

/// View state collaborator: zoom and screen/geo conversion.
///
/// `unproject` maps screen pixels to (longitude, latitude) degrees. The
/// session unprojects the four viewport corners each interaction frame to
/// bound the snap candidate scan.
pub trait Viewport {
    /// Current web mercator zoom level.
    fn zoom(&self) -> f64;
    /// Convert a screen-space point to lon/lat degrees.
    fn unproject(&self, screen: Point) -> Point;
    /// Viewport size in pixels.
    fn screen_size(&self) -> (f64, f64);
}

/// Hit-testing collaborator.
///
/// Picking is delegated to the rendering layer, which knows what is actually
/// on screen; the session applies the point-over-line-over-polygon priority
/// to whatever comes back.
pub trait HitSource {
    /// Rendered feature ids under a screen-space point, in any order.
    fn features_at(&self, screen: Point) -> Vec<FeatureId>;
}
