//! Presentation glue for the headless host.
//!
//! - [`LogPresenter`] stands in for the two cursor views: it reports every
//!   show/hide through `tracing` and remembers where each cursor is drawn.
//! - [`ConfiguredHitTester`] resolves controls from the `[[controls]]`
//!   entries of the config file.

use std::sync::Mutex;

use cursor_bridge_core::{Point, Rect, Surface};
use tracing::{debug, trace};

use crate::application::activate_controls::{ControlId, HitTester};
use crate::application::route_motion::CursorPresenter;
use crate::infrastructure::storage::config::ControlEntry;

// ── LogPresenter ──────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Drawn {
    primary: Option<Point>,
    external: Option<Point>,
}

impl Drawn {
    fn slot(&mut self, surface: Surface) -> &mut Option<Point> {
        match surface {
            Surface::Primary => &mut self.primary,
            Surface::External => &mut self.external,
        }
    }
}

/// A [`CursorPresenter`] that logs cursor placement.
#[derive(Debug, Default)]
pub struct LogPresenter {
    drawn: Mutex<Drawn>,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the cursor is currently drawn on `surface`, if it is shown.
    pub fn position(&self, surface: Surface) -> Option<Point> {
        match self.drawn.lock() {
            Ok(mut drawn) => *drawn.slot(surface),
            Err(_) => None,
        }
    }
}

impl CursorPresenter for LogPresenter {
    fn show_cursor(&self, surface: Surface, local: Point) {
        trace!("{surface:?} cursor at ({:.2}, {:.2})", local.x, local.y);
        if let Ok(mut drawn) = self.drawn.lock() {
            *drawn.slot(surface) = Some(local);
        }
    }

    fn hide_cursor(&self, surface: Surface) {
        if let Ok(mut drawn) = self.drawn.lock() {
            if drawn.slot(surface).take().is_some() {
                debug!("{surface:?} cursor hidden");
            }
        }
    }
}

// ── ConfiguredHitTester ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Control {
    id: ControlId,
    surface: Surface,
    bounds: Rect,
}

/// A [`HitTester`] over a fixed list of rectangular controls.
///
/// Controls declared later sit on top of earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredHitTester {
    controls: Vec<Control>,
}

impl ConfiguredHitTester {
    pub fn from_entries(entries: &[ControlEntry]) -> Self {
        Self {
            controls: entries
                .iter()
                .map(|entry| Control {
                    id: ControlId::new(entry.id.clone()),
                    surface: entry.surface,
                    bounds: entry.bounds(),
                })
                .collect(),
        }
    }

    /// Ids of the controls that unlock the pointer when activated.
    pub fn unlock_controls(entries: &[ControlEntry]) -> Vec<ControlId> {
        entries
            .iter()
            .filter(|entry| entry.unlocks_pointer)
            .map(|entry| ControlId::new(entry.id.clone()))
            .collect()
    }
}

impl HitTester for ConfiguredHitTester {
    fn hit_test(&self, surface: Surface, local: Point) -> Option<ControlId> {
        self.controls
            .iter()
            .rev()
            .find(|c| c.surface == surface && c.bounds.contains(local))
            .map(|c| c.id.clone())
    }
}
