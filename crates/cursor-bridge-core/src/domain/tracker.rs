//! Pointer motion tracker: turns relative motion deltas into a cursor position
//! and decides which surface shows the cursor.
//!
//! # Coordinate model
//!
//! The tracker keeps a single *logical position* in primary-surface
//! coordinates, even while the cursor is shown on the external surface.  The
//! external surface's own local position is derived on demand by subtracting
//! the arrangement's origin (see [`PointerState::cursor_on`]).
//!
//! # Arbitration rules
//!
//! For each delta the tracker computes a candidate position and then, in
//! order:
//!
//! 1. Candidate on the primary surface: accept it, cursor on primary.
//! 2. No external surface: clamp to the primary bounds.
//! 3. Candidate on the external surface: accept it, cursor on external.
//! 4. Cursor was already on the external surface: clamp within the external
//!    bounds, so overshooting its outer edge does not snap back to primary.
//! 5. Anything else (the gap beside the primary with no surface behind it):
//!    clamp to the primary bounds.
//!
//! Rule 4 depends on the previously visible surface.  Without it a cursor
//! pushed past the far edge of the external surface would be clamped into the
//! primary and jitter between the two surfaces on successive frames.

use serde::{Deserialize, Serialize};

use super::arrangement::Arrangement;
use super::geometry::{Point, Rect};

/// Scale applied to raw device deltas before they move the cursor.
pub const MOTION_SENSITIVITY: f64 = 2.0 / 3.0;

/// One of the two display surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Primary,
    External,
}

/// Snapshot of the tracked pointer.
///
/// `visible_surface` names the only surface with a visible cursor; `None`
/// means both cursors are hidden (pointer not locked, or not yet moved).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerState {
    /// Position in primary-surface coordinates.
    pub logical_position: Point,
    pub visible_surface: Option<Surface>,
}

impl PointerState {
    /// Returns the cursor position local to `surface`, or `None` when that
    /// surface does not currently show the cursor.
    ///
    /// The external position requires the arrangement to translate the
    /// logical position; without one the external cursor is always hidden.
    pub fn cursor_on(&self, surface: Surface, arrangement: Option<&Arrangement>) -> Option<Point> {
        if self.visible_surface != Some(surface) {
            return None;
        }
        match surface {
            Surface::Primary => Some(self.logical_position),
            Surface::External => {
                arrangement.map(|a| a.to_external_local(self.logical_position))
            }
        }
    }
}

/// Owns the [`PointerState`] and advances it one motion sample at a time.
#[derive(Debug, Clone, Default)]
pub struct MotionTracker {
    state: PointerState,
}

impl MotionTracker {
    /// Creates a tracker at (0, 0) with both cursors hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker at `position` with both cursors hidden.
    pub fn starting_at(position: Point) -> Self {
        Self {
            state: PointerState {
                logical_position: position,
                visible_surface: None,
            },
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Hides both cursors while keeping the logical position.
    pub fn hide(&mut self) {
        self.state.visible_surface = None;
    }

    /// Records an absolute position without showing a cursor.
    ///
    /// Used while the pointer is not locked and the host reports where its
    /// own pointer is, so that locking resumes from the same spot.
    pub fn place(&mut self, position: Point) {
        self.state = PointerState {
            logical_position: position,
            visible_surface: None,
        };
    }

    /// Applies one relative motion sample.
    ///
    /// `dy` uses the device's sign convention (positive is "up"), which is
    /// the opposite of the top-down surface coordinates, so it is subtracted.
    /// `primary_bounds` is supplied on every call because the primary surface
    /// can be resized or rotated between samples; `arrangement` is `None`
    /// when no external surface is connected.
    pub fn update(
        &mut self,
        dx: f64,
        dy: f64,
        primary_bounds: Rect,
        arrangement: Option<&Arrangement>,
    ) -> PointerState {
        let last = self.state.logical_position;
        let candidate = Point::new(
            last.x + dx * MOTION_SENSITIVITY,
            last.y - dy * MOTION_SENSITIVITY,
        );

        self.state = if primary_bounds.contains(candidate) {
            on_primary(candidate)
        } else {
            match arrangement {
                None => on_primary(primary_bounds.clamp(candidate)),
                Some(arrangement) => {
                    let external = arrangement.external_bounds;
                    if external.contains(candidate) {
                        on_external(candidate)
                    } else if self.state.visible_surface == Some(Surface::External) {
                        // Clamp in external-local space, then translate back.
                        let local = arrangement.to_external_local(candidate);
                        let clamped = Rect::from_size(external.size).clamp(local);
                        on_external(arrangement.from_external_local(clamped))
                    } else {
                        on_primary(primary_bounds.clamp(candidate))
                    }
                }
            }
        };

        self.state
    }
}

fn on_primary(position: Point) -> PointerState {
    PointerState {
        logical_position: position,
        visible_surface: Some(Surface::Primary),
    }
}

fn on_external(position: Point) -> PointerState {
    PointerState {
        logical_position: position,
        visible_surface: Some(Surface::External),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
