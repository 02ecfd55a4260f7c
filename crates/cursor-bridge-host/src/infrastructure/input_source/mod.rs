//! Input sources feeding the host's event queue.
//!
//! A source runs on its own thread and pushes [`HostEvent`]s into an `mpsc`
//! channel.  Exactly one consumer drains the channel, so motion samples,
//! button changes and surface connect/disconnect notifications are applied
//! strictly in arrival order and never race each other.
//!
//! # Testability
//!
//! The [`InputSource`] trait lets tests inject synthetic events through
//! [`mock::MockInputSource`] without a real device or script.

use std::sync::mpsc;

use cursor_bridge_core::Edge;

pub mod mock;
pub mod script;

/// One event delivered by the host platform.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Relative motion from the pointing device.  Positive `dy` is "up".
    Motion { dx: f64, dy: f64 },
    /// The primary button changed state.
    Button { pressed: bool },
    /// The pointer was locked to (or released from) the host.
    Lock { locked: bool },
    /// An external surface of the given size was connected.
    ExternalConnected { width: f64, height: f64 },
    /// The external surface went away.
    ExternalDisconnected,
    /// The primary surface changed size (window resize or rotation).
    PrimaryResized { width: f64, height: f64 },
    /// The external surface should be attached to another edge.
    EdgeChanged { edge: Edge },
    /// Absolute position of the host's own pointer while unlocked, in primary
    /// coordinates.
    Hover { x: f64, y: f64 },
}

/// Error type for input source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("input source has already been started")]
    AlreadyStarted,
    #[error("input source is not running")]
    NotRunning,
    #[error("failed to spawn input thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Trait abstracting event production.
pub trait InputSource: Send {
    /// Starts the source and returns a receiver for its events.
    fn start(&self) -> Result<mpsc::Receiver<HostEvent>, SourceError>;
    /// Stops the source; the receiver sees the channel close.
    fn stop(&self);
}
