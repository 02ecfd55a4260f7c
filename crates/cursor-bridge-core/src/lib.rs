//! # cursor-bridge-core
//!
//! Pointer-position arbitration for one relative pointing device driving a
//! cursor across two display surfaces: a *primary* surface and an *external*
//! surface attached to one of the primary's edges.
//!
//! This crate has zero dependencies on OS APIs, UI frameworks, or logging.
//! The host application owns the event loop, the lock/unlock gate and the
//! rendering of the cursor glyph; it calls into this crate once per motion
//! sample.
//!
//! # Architecture overview
//!
//! ```text
//! (primary size, external size, edge) ──► Arrangement::resolve ──► Arrangement
//!                                                                      │
//! (dx, dy) + primary bounds ──────────► MotionTracker::update ◄───────┘
//!                                              │
//!                                              ▼
//!                               PointerState { logical_position, visible_surface }
//! ```
//!
//! The logical position is always expressed in primary-surface coordinates;
//! [`PointerState::cursor_on`] derives the surface-local position a renderer
//! needs.

pub mod domain;

pub use domain::arrangement::{Arrangement, Edge, ParseEdgeError};
pub use domain::geometry::{Point, Rect, Size};
pub use domain::tracker::{MotionTracker, PointerState, Surface, MOTION_SENSITIVITY};
