//! Wiring between configuration, input sources and the routing use case.
//!
//! Sources deliver events on a `std::sync::mpsc` channel from their own
//! thread.  [`forward_events`] moves them onto a Tokio channel so that a
//! single async consumer ([`pump_events`]) can apply them in order.

use std::sync::{mpsc as std_mpsc, Arc};
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::application::activate_controls::Activation;
use crate::application::route_motion::{CursorPresenter, RouteMotionUseCase};
use crate::application::session::PointerSession;
use crate::infrastructure::input_source::{HostEvent, SourceError};
use crate::infrastructure::presenter::ConfiguredHitTester;
use crate::infrastructure::storage::config::{AppConfig, ConfigError};

/// Capacity of the Tokio side of the event queue.
const EVENT_QUEUE_CAPACITY: usize = 256;

/// Builds the routing use case described by `config`.
///
/// Connects the external surface when its size is configured and locks the
/// pointer when `start_locked` is set.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDimension`] for unusable surface sizes.
pub fn build_use_case(
    config: &AppConfig,
    presenter: Arc<dyn CursorPresenter>,
) -> Result<RouteMotionUseCase, ConfigError> {
    let primary = config.display.primary_size()?;
    let mut session = PointerSession::new(primary, config.display.external_edge);
    if let Some(external) = config.display.external_size()? {
        session.connect_external(external);
    }

    let hit_tester = Arc::new(ConfiguredHitTester::from_entries(&config.controls));
    let unlock_controls = ConfiguredHitTester::unlock_controls(&config.controls);
    let mut use_case = RouteMotionUseCase::new(session, presenter, hit_tester, unlock_controls);

    if config.host.start_locked {
        use_case.handle_event(HostEvent::Lock { locked: true });
    }
    Ok(use_case)
}

/// Forwards events from a source's blocking channel onto a Tokio channel.
///
/// Runs on a plain thread outside the blocking pool; runtime shutdown does
/// not wait for it.  The returned receiver closes once the source's channel
/// closes.
///
/// # Errors
///
/// Returns [`SourceError::Spawn`] if the forwarding thread cannot be started.
pub fn forward_events(
    source: std_mpsc::Receiver<HostEvent>,
) -> Result<mpsc::Receiver<HostEvent>, SourceError> {
    let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    thread::Builder::new()
        .name("event-forward".to_string())
        .spawn(move || {
            while let Ok(event) = source.recv() {
                if tx.blocking_send(event).is_err() {
                    break;
                }
            }
            debug!("input source channel closed");
        })
        .map_err(SourceError::Spawn)?;
    Ok(rx)
}

/// Applies every queued event to `use_case` until the channel closes.
///
/// Returns the number of events applied.
pub async fn pump_events(
    use_case: &mut RouteMotionUseCase,
    events: &mut mpsc::Receiver<HostEvent>,
) -> usize {
    let mut applied = 0;
    while let Some(event) = events.recv().await {
        if let Some(activation) = use_case.handle_event(event) {
            report(&activation);
        }
        applied += 1;
    }
    applied
}

fn report(activation: &Activation) {
    match activation {
        Activation::UpInside(id) => info!("control '{id}' activated"),
        other => debug!("{other:?}"),
    }
}
