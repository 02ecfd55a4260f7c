//! In-memory input source for tests.
//!
//! Events are pushed straight into the channel handed out by `start()`, with
//! no script or reader thread in between.  The source counts what it
//! delivered so tests can check that a consumer saw every event.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    mpsc::{self, Sender},
    Mutex,
};

use super::{HostEvent, InputSource, SourceError};

/// An [`InputSource`] fed by the test itself.
#[derive(Default)]
pub struct MockInputSource {
    sender: Mutex<Option<Sender<HostEvent>>>,
    delivered: AtomicUsize,
}

impl MockInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers one event to the consumer.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotRunning`] before `start()`, after `stop()`,
    /// or once the receiver has been dropped.
    pub fn inject_event(&self, event: HostEvent) -> Result<(), SourceError> {
        let guard = self.sender.lock().map_err(|_| SourceError::NotRunning)?;
        let sender = guard.as_ref().ok_or(SourceError::NotRunning)?;
        sender.send(event).map_err(|_| SourceError::NotRunning)?;
        self.delivered.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Delivers `events` in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// See [`MockInputSource::inject_event`].
    pub fn inject_all(
        &self,
        events: impl IntoIterator<Item = HostEvent>,
    ) -> Result<(), SourceError> {
        events
            .into_iter()
            .try_for_each(|event| self.inject_event(event))
    }

    /// Number of events delivered so far.
    pub fn delivered(&self) -> usize {
        self.delivered.load(Ordering::Relaxed)
    }
}

impl InputSource for MockInputSource {
    fn start(&self) -> Result<mpsc::Receiver<HostEvent>, SourceError> {
        let mut guard = self.sender.lock().map_err(|_| SourceError::AlreadyStarted)?;
        if guard.is_some() {
            return Err(SourceError::AlreadyStarted);
        }
        let (tx, rx) = mpsc::channel();
        *guard = Some(tx);
        Ok(rx)
    }

    fn stop(&self) {
        if let Ok(mut guard) = self.sender.lock() {
            guard.take();
        }
    }
}
