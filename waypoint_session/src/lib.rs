// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=waypoint_session --heading-base-level=0

//! Waypoint Session: the pointer-driven editing session of the map editor.
//!
//! ## Overview
//!
//! This crate turns pointer events and discrete UI commands into mutations of
//! the geometry model, using the snapping engine to keep drawn and dragged
//! vertices topologically clean. It performs no rendering and no hit testing
//! of its own: the host supplies view state through the
//! [`Viewport`](crate::types::Viewport) trait and rendered pick results
//! through [`HitSource`](crate::types::HitSource), and consumes the ordered
//! [`SessionEvent`](crate::types::SessionEvent) sequences each call returns,
//! the same shape as a responder chain emitting a dispatch sequence.
//!
//! ## Interaction model
//!
//! - **Select**: hover follows the topmost point (or, failing that, the
//!   topmost line/polygon) under the pointer. Pressing on a point starts a
//!   vertex drag; pressing on a linear feature drags the whole feature.
//! - **Vertex drag**: every frame rebuilds the viewport-bounded snap
//!   candidates and corrects the cursor. Releasing on another point merges
//!   the two (all bindings move to the survivor); releasing on a segment
//!   welds the vertex into it as a shared vertex.
//! - **Draw point/line/polygon**: clicks commit vertices, snapped onto
//!   existing geometry where close enough, behind a provisional vertex that
//!   tracks the live cursor. A polygon closes by clicking its first vertex;
//!   a line finishes on [`Command::ConfirmDraw`](crate::types::Command).
//!   Cancelling discards everything drawn without touching shared geometry.
//!
//! All of it runs synchronously on the caller's thread, in event dispatch
//! order; the feature store has exactly one writer.
//!
//! ## Workflow
//!
//! 1) Feed pointer events into [`EditSession::pointer_down`] /
//!    [`pointer_move`](EditSession::pointer_move) /
//!    [`pointer_up`](EditSession::pointer_up) and commands into
//!    [`handle_command`](EditSession::handle_command).
//! 2) Dispatch the returned [`SessionEvent`](crate::types::SessionEvent)s to
//!    side panels and tool UI.
//! 3) Drain render damage with
//!    [`FeatureStore::take_damage`](waypoint_model::FeatureStore::take_damage)
//!    and re-render the listed features.

#![no_std]

extern crate alloc;

pub mod hover;
pub mod session;
pub mod types;

pub use hover::{HoverEvent, HoverState, pick_topmost};
pub use session::EditSession;
pub use types::{Command, HitSource, SessionEvent, Tool, Viewport};
