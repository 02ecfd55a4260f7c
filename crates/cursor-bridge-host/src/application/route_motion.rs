//! RouteMotionUseCase: applies host events to the pointer session and keeps
//! the drawn cursors in sync.
//!
//! This use case is the single consumer of the host's event queue.  Each
//! [`HostEvent`] updates the [`PointerSession`], after which the cursor is
//! re-rendered through the [`CursorPresenter`]: shown on the visible surface
//! at its surface-local position, hidden everywhere else.
//!
//! # Architecture
//!
//! The use case depends only on traits (`CursorPresenter`, `HitTester`) and
//! on the session.  Infrastructure implementations are injected at
//! construction time, so the whole event flow is unit-testable with
//! recording doubles.

use std::sync::Arc;

use cursor_bridge_core::{Point, Size, Surface};
use tracing::info;

use crate::application::activate_controls::{Activation, ControlActivator, ControlId, HitTester};
use crate::application::session::PointerSession;
use crate::infrastructure::input_source::HostEvent;

/// Draws (or removes) the software cursor on a surface.
///
/// Coordinates are surface-local.  The infrastructure implementation logs;
/// test implementations record calls.
pub trait CursorPresenter: Send + Sync {
    /// Shows the cursor on `surface` at `local`.
    fn show_cursor(&self, surface: Surface, local: Point);

    /// Hides the cursor on `surface`.
    fn hide_cursor(&self, surface: Surface);
}

/// The Route Motion use case.
pub struct RouteMotionUseCase {
    session: PointerSession,
    activator: ControlActivator,
    presenter: Arc<dyn CursorPresenter>,
    hit_tester: Arc<dyn HitTester>,
    /// Controls whose activation releases the pointer lock.
    unlock_controls: Vec<ControlId>,
}

impl RouteMotionUseCase {
    pub fn new(
        session: PointerSession,
        presenter: Arc<dyn CursorPresenter>,
        hit_tester: Arc<dyn HitTester>,
        unlock_controls: Vec<ControlId>,
    ) -> Self {
        Self {
            session,
            activator: ControlActivator::new(),
            presenter,
            hit_tester,
            unlock_controls,
        }
    }

    pub fn session(&self) -> &PointerSession {
        &self.session
    }

    /// Applies one host event.
    ///
    /// Returns the control activation produced by a button event, if any.
    pub fn handle_event(&mut self, event: HostEvent) -> Option<Activation> {
        match event {
            HostEvent::Motion { dx, dy } => {
                if self.session.handle_motion(dx, dy).is_some() {
                    self.render();
                }
                None
            }
            HostEvent::Button { pressed } => self.handle_button(pressed),
            HostEvent::Lock { locked } => {
                self.session.set_locked(locked);
                if !locked {
                    self.activator.reset();
                }
                self.render();
                None
            }
            HostEvent::ExternalConnected { width, height } => {
                self.session.connect_external(Size::new(width, height));
                self.render();
                None
            }
            HostEvent::ExternalDisconnected => {
                if self.session.is_external_connected() {
                    self.presenter.hide_cursor(Surface::External);
                }
                self.session.disconnect_external();
                self.render();
                None
            }
            HostEvent::PrimaryResized { width, height } => {
                self.session.resize_primary(Size::new(width, height));
                self.render();
                None
            }
            HostEvent::EdgeChanged { edge } => {
                self.session.set_edge(edge);
                self.render();
                None
            }
            HostEvent::Hover { x, y } => {
                self.session.hover(Point::new(x, y));
                None
            }
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn handle_button(&mut self, pressed: bool) -> Option<Activation> {
        // Unlocked presses belong to the host's native pointer.
        if !self.session.is_locked() {
            return None;
        }
        let state = self.session.state();
        let activation = self.activator.button_changed(
            pressed,
            &state,
            self.session.arrangement(),
            self.hit_tester.as_ref(),
        )?;

        if let Activation::UpInside(id) = &activation {
            if self.unlock_controls.contains(id) {
                info!("control '{id}' released the pointer");
                self.session.set_locked(false);
                self.render();
            }
        }
        Some(activation)
    }

    /// Shows the cursor on its visible surface and hides it on the other.
    ///
    /// The external surface is only addressed while an arrangement exists.
    fn render(&self) {
        let state = self.session.state();
        let arrangement = self.session.arrangement();
        let has_external = arrangement.is_some();

        match state.visible_surface {
            Some(surface) => {
                if let Some(local) = state.cursor_on(surface, arrangement) {
                    self.presenter.show_cursor(surface, local);
                }
                match surface {
                    Surface::Primary if has_external => {
                        self.presenter.hide_cursor(Surface::External)
                    }
                    Surface::Primary => {}
                    Surface::External => self.presenter.hide_cursor(Surface::Primary),
                }
            }
            None => {
                self.presenter.hide_cursor(Surface::Primary);
                if has_external {
                    self.presenter.hide_cursor(Surface::External);
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::activate_controls::MockHitTester;
    use cursor_bridge_core::Edge;
    use std::sync::Mutex;

    // ── Test doubles ──────────────────────────────────────────────────────────

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Show(Surface, Point),
        Hide(Surface),
    }

    #[derive(Default)]
    struct RecordingPresenter {
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingPresenter {
        fn take(&self) -> Vec<Call> {
            std::mem::take(&mut *self.calls.lock().unwrap())
        }
    }

    impl CursorPresenter for RecordingPresenter {
        fn show_cursor(&self, surface: Surface, local: Point) {
            self.calls.lock().unwrap().push(Call::Show(surface, local));
        }

        fn hide_cursor(&self, surface: Surface) {
            self.calls.lock().unwrap().push(Call::Hide(surface));
        }
    }

    fn empty_hit_tester() -> Arc<dyn HitTester> {
        let mut mock = MockHitTester::new();
        mock.expect_hit_test().returning(|_, _| None);
        Arc::new(mock)
    }

    fn unlock_button_everywhere() -> Arc<dyn HitTester> {
        let mut mock = MockHitTester::new();
        mock.expect_hit_test()
            .returning(|_, _| Some(ControlId::new("unlock")));
        Arc::new(mock)
    }

    fn build(hit_tester: Arc<dyn HitTester>) -> (RouteMotionUseCase, Arc<RecordingPresenter>) {
        let presenter = Arc::new(RecordingPresenter::default());
        let session = PointerSession::new(Size::new(1024.0, 768.0), Edge::Trailing);
        let uc = RouteMotionUseCase::new(
            session,
            presenter.clone(),
            hit_tester,
            vec![ControlId::new("unlock")],
        );
        (uc, presenter)
    }

    // ── Motion ────────────────────────────────────────────────────────────────

    #[test]
    fn test_motion_while_unlocked_renders_nothing() {
        let (mut uc, presenter) = build(empty_hit_tester());

        uc.handle_event(HostEvent::Motion { dx: 3.0, dy: 0.0 });

        assert!(presenter.take().is_empty());
    }

    #[test]
    fn test_motion_on_primary_without_external_only_addresses_primary() {
        // Arrange
        let (mut uc, presenter) = build(empty_hit_tester());
        uc.handle_event(HostEvent::Lock { locked: true });
        presenter.take();

        // Act
        uc.handle_event(HostEvent::Motion { dx: 3.0, dy: 3.0 });

        // Assert
        assert_eq!(
            presenter.take(),
            vec![Call::Show(Surface::Primary, Point::new(514.0, 382.0))]
        );
    }

    #[test]
    fn test_crossing_to_external_shows_there_and_hides_primary() {
        // Arrange
        let (mut uc, presenter) = build(empty_hit_tester());
        uc.handle_event(HostEvent::Hover { x: 1020.0, y: 400.0 });
        uc.handle_event(HostEvent::ExternalConnected {
            width: 800.0,
            height: 600.0,
        });
        uc.handle_event(HostEvent::Lock { locked: true });
        presenter.take();

        // Act: 30 * 2/3 = 20 points to the right.
        uc.handle_event(HostEvent::Motion { dx: 30.0, dy: 0.0 });

        // Assert: logical (1040, 400) is external-local (16, 316).
        assert_eq!(
            presenter.take(),
            vec![
                Call::Show(Surface::External, Point::new(16.0, 316.0)),
                Call::Hide(Surface::Primary),
            ]
        );
    }

    #[test]
    fn test_zero_motion_does_not_render() {
        let (mut uc, presenter) = build(empty_hit_tester());
        uc.handle_event(HostEvent::Lock { locked: true });
        presenter.take();

        uc.handle_event(HostEvent::Motion { dx: 0.0, dy: 0.0 });

        assert!(presenter.take().is_empty());
    }

    // ── Lock gate ─────────────────────────────────────────────────────────────

    #[test]
    fn test_unlock_hides_both_cursors() {
        let (mut uc, presenter) = build(empty_hit_tester());
        uc.handle_event(HostEvent::ExternalConnected {
            width: 800.0,
            height: 600.0,
        });
        uc.handle_event(HostEvent::Lock { locked: true });
        uc.handle_event(HostEvent::Motion { dx: 3.0, dy: 0.0 });
        presenter.take();

        uc.handle_event(HostEvent::Lock { locked: false });

        assert_eq!(
            presenter.take(),
            vec![Call::Hide(Surface::Primary), Call::Hide(Surface::External)]
        );
        assert!(!uc.session().is_locked());
    }

    // ── Buttons ───────────────────────────────────────────────────────────────

    #[test]
    fn test_button_while_unlocked_is_ignored() {
        let mut mock = MockHitTester::new();
        mock.expect_hit_test().never();
        let (mut uc, _presenter) = build(Arc::new(mock));

        assert_eq!(uc.handle_event(HostEvent::Button { pressed: true }), None);
    }

    #[test]
    fn test_press_and_release_on_unlock_control_releases_pointer() {
        // Arrange
        let (mut uc, presenter) = build(unlock_button_everywhere());
        uc.handle_event(HostEvent::Lock { locked: true });
        uc.handle_event(HostEvent::Motion { dx: 3.0, dy: 0.0 });

        // Act
        let down = uc.handle_event(HostEvent::Button { pressed: true });
        presenter.take();
        let up = uc.handle_event(HostEvent::Button { pressed: false });

        // Assert
        assert_eq!(down, Some(Activation::Down(ControlId::new("unlock"))));
        assert_eq!(up, Some(Activation::UpInside(ControlId::new("unlock"))));
        assert!(!uc.session().is_locked());
        assert_eq!(presenter.take(), vec![Call::Hide(Surface::Primary)]);
    }

    #[test]
    fn test_up_inside_on_ordinary_control_keeps_lock() {
        let mut mock = MockHitTester::new();
        mock.expect_hit_test()
            .returning(|_, _| Some(ControlId::new("settings")));
        let (mut uc, _presenter) = build(Arc::new(mock));
        uc.handle_event(HostEvent::Lock { locked: true });
        uc.handle_event(HostEvent::Motion { dx: 3.0, dy: 0.0 });

        uc.handle_event(HostEvent::Button { pressed: true });
        let up = uc.handle_event(HostEvent::Button { pressed: false });

        assert_eq!(up, Some(Activation::UpInside(ControlId::new("settings"))));
        assert!(uc.session().is_locked());
    }

    #[test]
    fn test_unlock_between_press_and_release_cancels_press() {
        let (mut uc, _presenter) = build(unlock_button_everywhere());
        uc.handle_event(HostEvent::Lock { locked: true });
        uc.handle_event(HostEvent::Motion { dx: 3.0, dy: 0.0 });
        uc.handle_event(HostEvent::Button { pressed: true });

        uc.handle_event(HostEvent::Lock { locked: false });
        uc.handle_event(HostEvent::Lock { locked: true });
        uc.handle_event(HostEvent::Motion { dx: 3.0, dy: 0.0 });
        let up = uc.handle_event(HostEvent::Button { pressed: false });

        assert_eq!(up, None);
    }

    #[test]
    fn test_release_after_resize_hid_cursor_cancels_press_and_keeps_lock() {
        // Arrange: the unlock control covers the bottom strip of the primary.
        let mut mock = MockHitTester::new();
        mock.expect_hit_test()
            .returning(|_, p| (p.y >= 650.0).then(|| ControlId::new("unlock")));
        let (mut uc, _presenter) = build(Arc::new(mock));
        uc.handle_event(HostEvent::Hover { x: 500.0, y: 700.0 });
        uc.handle_event(HostEvent::Lock { locked: true });
        uc.handle_event(HostEvent::Motion { dx: 1.5, dy: 0.0 });
        let down = uc.handle_event(HostEvent::Button { pressed: true });

        // Act: shrinking the primary leaves the cursor outside and hides it.
        uc.handle_event(HostEvent::PrimaryResized {
            width: 768.0,
            height: 600.0,
        });
        let up = uc.handle_event(HostEvent::Button { pressed: false });

        // Assert
        assert_eq!(down, Some(Activation::Down(ControlId::new("unlock"))));
        assert_eq!(uc.session().state().visible_surface, None);
        assert_eq!(up, Some(Activation::UpOutside(ControlId::new("unlock"))));
        assert!(uc.session().is_locked());
    }

    #[test]
    fn test_stale_press_never_fires_after_press_on_empty_space() {
        // Arrange
        let mut mock = MockHitTester::new();
        mock.expect_hit_test()
            .returning(|_, p| (p.y >= 650.0).then(|| ControlId::new("unlock")));
        let (mut uc, _presenter) = build(Arc::new(mock));
        uc.handle_event(HostEvent::Hover { x: 500.0, y: 700.0 });
        uc.handle_event(HostEvent::Lock { locked: true });
        uc.handle_event(HostEvent::Motion { dx: 1.5, dy: 0.0 });
        uc.handle_event(HostEvent::Button { pressed: true });
        uc.handle_event(HostEvent::PrimaryResized {
            width: 768.0,
            height: 600.0,
        });

        // Act: press on empty space at the clamped bottom edge, then go back
        // to the original size and release over the control.
        uc.handle_event(HostEvent::Motion { dx: 1.5, dy: 0.0 });
        let press = uc.handle_event(HostEvent::Button { pressed: true });
        uc.handle_event(HostEvent::PrimaryResized {
            width: 1024.0,
            height: 768.0,
        });
        uc.handle_event(HostEvent::Motion { dx: 0.0, dy: -150.0 });
        let release = uc.handle_event(HostEvent::Button { pressed: false });

        // Assert
        assert_eq!(press, None);
        assert_eq!(release, None);
        assert!(uc.session().is_locked());
    }

    // ── Surface lifecycle ─────────────────────────────────────────────────────

    #[test]
    fn test_disconnect_while_on_external_hides_external_then_everything() {
        // Arrange
        let (mut uc, presenter) = build(empty_hit_tester());
        uc.handle_event(HostEvent::Hover { x: 1020.0, y: 400.0 });
        uc.handle_event(HostEvent::ExternalConnected {
            width: 800.0,
            height: 600.0,
        });
        uc.handle_event(HostEvent::Lock { locked: true });
        uc.handle_event(HostEvent::Motion { dx: 30.0, dy: 0.0 });
        presenter.take();

        // Act
        uc.handle_event(HostEvent::ExternalDisconnected);

        // Assert
        assert_eq!(
            presenter.take(),
            vec![Call::Hide(Surface::External), Call::Hide(Surface::Primary)]
        );
        assert!(uc.session().arrangement().is_none());
    }

    #[test]
    fn test_edge_change_re_renders_with_new_arrangement() {
        let (mut uc, presenter) = build(empty_hit_tester());
        uc.handle_event(HostEvent::ExternalConnected {
            width: 800.0,
            height: 600.0,
        });
        uc.handle_event(HostEvent::Lock { locked: true });
        uc.handle_event(HostEvent::Motion { dx: 3.0, dy: 0.0 });
        presenter.take();

        uc.handle_event(HostEvent::EdgeChanged { edge: Edge::Bottom });

        assert_eq!(
            presenter.take(),
            vec![
                Call::Show(Surface::Primary, Point::new(514.0, 384.0)),
                Call::Hide(Surface::External),
            ]
        );
        assert_eq!(uc.session().edge(), Edge::Bottom);
    }

    #[test]
    fn test_hover_does_not_render() {
        let (mut uc, presenter) = build(empty_hit_tester());

        uc.handle_event(HostEvent::Hover { x: 5.0, y: 5.0 });

        assert!(presenter.take().is_empty());
        assert_eq!(uc.session().state().logical_position, Point::new(5.0, 5.0));
    }
}
