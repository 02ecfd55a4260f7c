//! Control activation for a locked pointer.
//!
//! While the pointer is locked the host's native pointer never reaches the UI,
//! so button presses have to be turned into control activations by hand.  The
//! rules follow the familiar push-button behaviour:
//!
//! - press over a control: the control goes *down*;
//! - release over the same control: *up inside* (the control fires);
//! - release anywhere else: *up outside* (the press is cancelled).
//!
//! Hit-testing itself belongs to the presentation layer and is reached
//! through the [`HitTester`] trait.

use std::fmt;

use cursor_bridge_core::{Arrangement, Point, PointerState, Surface};
use tracing::debug;

/// Identifier of an interactive control on one of the surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlId(pub String);

impl ControlId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Finds the topmost interactive control under a surface-local point.
///
/// Implemented by the presentation layer; tests use a mock.
#[cfg_attr(test, mockall::automock)]
pub trait HitTester: Send + Sync {
    /// Returns the control at `local` on `surface`, if any.
    fn hit_test(&self, surface: Surface, local: Point) -> Option<ControlId>;
}

/// A control state change produced by a button event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The button went down over the control.
    Down(ControlId),
    /// The button was released over the same control it went down on.
    UpInside(ControlId),
    /// The button was released somewhere else.
    UpOutside(ControlId),
}

impl Activation {
    pub fn control(&self) -> &ControlId {
        match self {
            Activation::Down(id) | Activation::UpInside(id) | Activation::UpOutside(id) => id,
        }
    }
}

/// Tracks the control currently held down between press and release.
#[derive(Debug, Default)]
pub struct ControlActivator {
    pressed: Option<ControlId>,
}

impl ControlActivator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the control currently held down, if any.
    pub fn pressed(&self) -> Option<&ControlId> {
        self.pressed.as_ref()
    }

    /// Forgets any held control without firing it.
    pub fn reset(&mut self) {
        self.pressed = None;
    }

    /// Handles a primary-button change at the current pointer state.
    ///
    /// Returns `None` when a press lands on empty space or a hidden cursor,
    /// or when a release has no matching press.  Every press replaces the
    /// held control, and every release clears it: a release while the cursor
    /// is hidden cancels the held control with `UpOutside`.
    pub fn button_changed(
        &mut self,
        pressed: bool,
        state: &PointerState,
        arrangement: Option<&Arrangement>,
        hit_tester: &dyn HitTester,
    ) -> Option<Activation> {
        let activation = if pressed {
            self.pressed = None;
            let id = control_under_cursor(state, arrangement, hit_tester)?;
            self.pressed = Some(id.clone());
            Activation::Down(id)
        } else {
            let held = self.pressed.take()?;
            if control_under_cursor(state, arrangement, hit_tester).as_ref() == Some(&held) {
                Activation::UpInside(held)
            } else {
                Activation::UpOutside(held)
            }
        };

        debug!("{activation:?} at {:?}", state.visible_surface);
        Some(activation)
    }
}

fn control_under_cursor(
    state: &PointerState,
    arrangement: Option<&Arrangement>,
    hit_tester: &dyn HitTester,
) -> Option<ControlId> {
    let surface = state.visible_surface?;
    let local = state.cursor_on(surface, arrangement)?;
    hit_tester.hit_test(surface, local)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
