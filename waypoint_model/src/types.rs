// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the geometry model: feature identifiers, flags, style,
//! vertex paths, and follow-up actions.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// Identifier for a feature in the [store](crate::FeatureStore).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `FeatureId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `FeatureId`.
///
/// Stale `FeatureId`s never alias a different live feature because the generation must match.
/// Use [`FeatureStore::is_alive`](crate::FeatureStore::is_alive) to check liveness.
///
/// Vertex identity is reference-based: two points at the same coordinate are
/// distinct entities unless explicitly merged
/// (see [`FeatureStore::merge_points`](crate::FeatureStore::merge_points)).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FeatureId(pub(crate) u32, pub(crate) u32);

impl FeatureId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Pack this id into a `u64` for wire use (GeoJSON `id` field, render layer keys).
    pub const fn to_bits(self) -> u64 {
        ((self.1 as u64) << 32) | self.0 as u64
    }

    /// Reconstruct an id from its packed form. The result may be stale.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The two halves were packed from u32 values."
    )]
    pub const fn from_bits(bits: u64) -> Self {
        Self((bits & 0xFFFF_FFFF) as u32, (bits >> 32) as u32)
    }
}

bitflags::bitflags! {
    /// Feature flags controlling visibility, picking, and lifecycle.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FeatureFlags: u8 {
        /// Feature is visible (rendered and eligible as a snap candidate).
        const VISIBLE    = 0b0000_0001;
        /// Feature is pickable (participates in hit testing).
        const PICKABLE   = 0b0000_0010;
        /// Point was placed as a marker in its own right, not only as a vertex.
        /// Standalone points survive the deletion of features that bind them.
        const STANDALONE = 0b0000_0100;
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Display properties shared by every feature kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// CSS-style color string consumed by the rendering layer.
    pub color: String,
    /// Draw-order layer. Points render at `layer + 0.5`, above linear features
    /// on the same layer; see [`FeatureStore::draw_order`](crate::FeatureStore::draw_order).
    pub layer: i32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: String::from("#3388ff"),
            layer: 0,
        }
    }
}

/// Address of a vertex or segment inside a feature.
///
/// For a [`LineString`](crate::FeatureKind::Line), `ring` is always `0` and
/// `index` addresses a vertex (or the segment starting at it). For a
/// [`Polygon`](crate::FeatureKind::Polygon), `ring` selects the ring
/// (`0` is the outer boundary, others are holes).
///
/// Paths let snap targets be referenced without holding borrows into the
/// store; resolve them with
/// [`FeatureStore::vertex`](crate::FeatureStore::vertex),
/// [`FeatureStore::segment_vertices`](crate::FeatureStore::segment_vertices), and
/// [`FeatureStore::increment_path`](crate::FeatureStore::increment_path).
///
/// The string form used by UI layers is `"index"` for lines and
/// `"ring.index"` for polygons; [`FromStr`] accepts both.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VertexPath {
    /// Ring index; `0` for lines and outer polygon boundaries.
    pub ring: u32,
    /// Vertex index within the ring or line.
    pub index: u32,
}

impl VertexPath {
    /// Path to a vertex of a line (ring `0`).
    pub const fn at(index: u32) -> Self {
        Self { ring: 0, index }
    }

    /// Path to a vertex of a polygon ring.
    pub const fn in_ring(ring: u32, index: u32) -> Self {
        Self { ring, index }
    }
}

impl fmt::Display for VertexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ring == 0 {
            write!(f, "{}", self.index)
        } else {
            write!(f, "{}.{}", self.ring, self.index)
        }
    }
}

/// Error returned when parsing a [`VertexPath`] from its string form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParsePathError;

impl fmt::Display for ParsePathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected \"index\" or \"ring.index\"")
    }
}

impl FromStr for VertexPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((ring, index)) => Ok(Self {
                ring: ring.parse().map_err(|_| ParsePathError)?,
                index: index.parse().map_err(|_| ParsePathError)?,
            }),
            None => Ok(Self {
                ring: 0,
                index: s.parse().map_err(|_| ParsePathError)?,
            }),
        }
    }
}

/// Follow-up required from the caller after a structural mutation.
///
/// The store trims its own vertex lists but never decides feature lifetime on
/// behalf of the editing session; when a removal or replacement would push a
/// feature below its minimum vertex count, the mutation is left undone and the
/// required follow-up is reported here instead.
#[must_use = "degenerate removals require caller follow-up"]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// The mutation was handled locally (or was a no-op); nothing further is required.
    Nothing,
    /// The feature fell below its minimum vertex count. The caller must delete
    /// it with [`FeatureStore::remove_feature`](crate::FeatureStore::remove_feature);
    /// the vertex list was not partially mutated.
    DeleteFeature,
    /// An interior ring fell below three vertices and was dropped. The listed
    /// vertices were unbound from the polygon; release each with
    /// [`FeatureStore::release_point`](crate::FeatureStore::release_point)
    /// to delete those that nothing else binds.
    DeleteRing(Vec<FeatureId>),
}
