//! PointerSession: the host-owned context around the motion tracker.
//!
//! The session replaces what would otherwise be ambient global state (the
//! current arrangement, the external surface, the lock flag).  It owns:
//!
//! - the [`MotionTracker`] and therefore the current [`PointerState`],
//! - the primary surface size (resizes and rotations land here),
//! - the preferred [`Edge`] and, while one is connected, the external size,
//! - the resolved [`Arrangement`], rebuilt wholesale whenever any of its
//!   inputs change,
//! - the "pointer locked" gate: motion only moves the drawn cursor while the
//!   pointer is locked to the host.
//!
//! Every method takes `&mut self`, so callers that share a session across
//! tasks must serialise access (the binary does so with a single consumer of
//! an event queue).

use cursor_bridge_core::{
    Arrangement, Edge, MotionTracker, Point, PointerState, Rect, Size, Surface,
};
use tracing::{debug, info};

/// Mutable pointer context for one primary surface and at most one external
/// surface.
#[derive(Debug, Clone)]
pub struct PointerSession {
    tracker: MotionTracker,
    primary_size: Size,
    edge: Edge,
    external_size: Option<Size>,
    arrangement: Option<Arrangement>,
    locked: bool,
}

impl PointerSession {
    /// Creates an unlocked session with no external surface connected.
    ///
    /// The pointer starts at the centre of the primary surface, hidden.
    pub fn new(primary_size: Size, edge: Edge) -> Self {
        Self {
            tracker: MotionTracker::starting_at(Point::new(
                primary_size.width / 2.0,
                primary_size.height / 2.0,
            )),
            primary_size,
            edge,
            external_size: None,
            arrangement: None,
            locked: false,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn state(&self) -> PointerState {
        self.tracker.state()
    }

    pub fn arrangement(&self) -> Option<&Arrangement> {
        self.arrangement.as_ref()
    }

    pub fn primary_bounds(&self) -> Rect {
        Rect::from_size(self.primary_size)
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_external_connected(&self) -> bool {
        self.external_size.is_some()
    }

    // ── Surface lifecycle ─────────────────────────────────────────────────────

    /// Registers a newly connected external surface of `size`.
    ///
    /// A second connect replaces the first; there is only ever one external
    /// surface.
    pub fn connect_external(&mut self, size: Size) {
        info!(
            "external surface connected ({}x{}) at {} edge",
            size.width, size.height, self.edge
        );
        self.external_size = Some(size);
        self.rebuild_arrangement();
    }

    /// Forgets the external surface and its arrangement.
    ///
    /// If the cursor was shown there it is hidden; the next motion sample
    /// clamps it back onto the primary surface.
    pub fn disconnect_external(&mut self) {
        if self.external_size.take().is_none() {
            return;
        }
        info!("external surface disconnected");
        self.arrangement = None;
        if self.state().visible_surface == Some(Surface::External) {
            self.tracker.hide();
        }
    }

    /// Applies a new primary surface size (resize or rotation).
    pub fn resize_primary(&mut self, size: Size) {
        debug!("primary surface resized to {}x{}", size.width, size.height);
        self.primary_size = size;
        self.rebuild_arrangement();
    }

    /// Moves the external surface to another edge of the primary.
    pub fn set_edge(&mut self, edge: Edge) {
        debug!("external edge set to {edge}");
        self.edge = edge;
        self.rebuild_arrangement();
    }

    /// Resolves a fresh arrangement from the current sizes and edge.
    ///
    /// A cursor left outside the bounds of the surface it is shown on is
    /// hidden; the next motion sample places it again.
    fn rebuild_arrangement(&mut self) {
        self.arrangement = self
            .external_size
            .map(|external| Arrangement::resolve(self.primary_size, external, self.edge));

        let state = self.tracker.state();
        let contained = match state.visible_surface {
            None => true,
            Some(Surface::Primary) => self.primary_bounds().contains(state.logical_position),
            Some(Surface::External) => self
                .arrangement
                .map(|a| a.external_bounds.contains(state.logical_position))
                .unwrap_or(false),
        };
        if !contained {
            debug!("cursor no longer inside its surface; hiding until next motion");
            self.tracker.hide();
        }
    }

    // ── Pointer gate ──────────────────────────────────────────────────────────

    /// Locks or unlocks the pointer.
    ///
    /// Unlocking hides the cursor on both surfaces; the logical position is
    /// kept so that re-locking resumes from the same spot.
    pub fn set_locked(&mut self, locked: bool) {
        if self.locked == locked {
            return;
        }
        info!("pointer {}", if locked { "locked" } else { "unlocked" });
        self.locked = locked;
        if !locked {
            self.tracker.hide();
        }
    }

    /// Records the host pointer's absolute position while unlocked.
    ///
    /// Ignored while locked: the tracker is then the only source of truth.
    pub fn hover(&mut self, position: Point) {
        if !self.locked {
            self.tracker.place(position);
        }
    }

    // ── Motion ────────────────────────────────────────────────────────────────

    /// Feeds one relative motion sample through the tracker.
    ///
    /// Returns `None` without touching the tracker when the pointer is not
    /// locked or when the sample carries no motion at all.
    pub fn handle_motion(&mut self, dx: f64, dy: f64) -> Option<PointerState> {
        if !self.locked || (dx == 0.0 && dy == 0.0) {
            return None;
        }
        let bounds = self.primary_bounds();
        let before = self.tracker.state().visible_surface;
        let state = self.tracker.update(dx, dy, bounds, self.arrangement.as_ref());
        if state.visible_surface != before {
            debug!(
                "cursor now on {:?} at ({:.2}, {:.2})",
                state.visible_surface, state.logical_position.x, state.logical_position.y
            );
        }
        Some(state)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
