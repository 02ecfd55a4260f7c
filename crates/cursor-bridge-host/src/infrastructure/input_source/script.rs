//! Line-oriented script source.
//!
//! Replays host events from any [`BufRead`] (stdin, a file, an in-memory
//! buffer).  One command per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! connect 800 600     # external surface connected
//! lock
//! move 12 0           # relative motion, positive dy is "up"
//! press
//! release
//! edge bottom
//! resize 768 1024
//! hover 100 200       # host pointer position while unlocked
//! unlock
//! disconnect
//! ```
//!
//! Malformed lines are logged and skipped; they never stop the replay.

use std::io::BufRead;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc, Arc, Mutex,
};
use std::thread;

use cursor_bridge_core::{Edge, ParseEdgeError};
use thiserror::Error;
use tracing::{debug, warn};

use super::{HostEvent, InputSource, SourceError};

/// A malformed script line.
#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' expects {expected} argument(s), got {found}")]
    WrongArity {
        line: usize,
        command: String,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: '{value}' is not a number")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: surface dimension {value} must be positive")]
    InvalidDimension { line: usize, value: f64 },

    #[error("line {line}: {source}")]
    InvalidEdge {
        line: usize,
        #[source]
        source: ParseEdgeError,
    },
}

/// Parses one script line into an event.
///
/// `line` is the 1-based line number used in error messages.  Returns
/// `Ok(None)` for blank lines and comments.
pub fn parse_line(line: usize, text: &str) -> Result<Option<HostEvent>, ScriptError> {
    let content = match text.split_once('#') {
        Some((before, _)) => before,
        None => text,
    };
    let mut words = content.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let arity = |expected: usize| -> Result<(), ScriptError> {
        if args.len() == expected {
            Ok(())
        } else {
            Err(ScriptError::WrongArity {
                line,
                command: command.to_string(),
                expected,
                found: args.len(),
            })
        }
    };
    let number = |value: &str| -> Result<f64, ScriptError> {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ScriptError::InvalidNumber {
                line,
                value: value.to_string(),
            })
    };
    let dimension = |value: &str| -> Result<f64, ScriptError> {
        let parsed = number(value)?;
        if parsed > 0.0 {
            Ok(parsed)
        } else {
            Err(ScriptError::InvalidDimension {
                line,
                value: parsed,
            })
        }
    };

    let event = match command.to_ascii_lowercase().as_str() {
        "move" => {
            arity(2)?;
            HostEvent::Motion {
                dx: number(args[0])?,
                dy: number(args[1])?,
            }
        }
        "press" => {
            arity(0)?;
            HostEvent::Button { pressed: true }
        }
        "release" => {
            arity(0)?;
            HostEvent::Button { pressed: false }
        }
        "lock" => {
            arity(0)?;
            HostEvent::Lock { locked: true }
        }
        "unlock" => {
            arity(0)?;
            HostEvent::Lock { locked: false }
        }
        "connect" => {
            arity(2)?;
            HostEvent::ExternalConnected {
                width: dimension(args[0])?,
                height: dimension(args[1])?,
            }
        }
        "disconnect" => {
            arity(0)?;
            HostEvent::ExternalDisconnected
        }
        "resize" => {
            arity(2)?;
            HostEvent::PrimaryResized {
                width: dimension(args[0])?,
                height: dimension(args[1])?,
            }
        }
        "edge" => {
            arity(1)?;
            let edge = args[0]
                .parse::<Edge>()
                .map_err(|source| ScriptError::InvalidEdge { line, source })?;
            HostEvent::EdgeChanged { edge }
        }
        "hover" => {
            arity(2)?;
            HostEvent::Hover {
                x: number(args[0])?,
                y: number(args[1])?,
            }
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: command.to_string(),
            })
        }
    };
    Ok(Some(event))
}

/// Replays a script on a background thread.
pub struct ScriptInputSource<R> {
    reader: Mutex<Option<R>>,
    running: Arc<AtomicBool>,
}

impl<R> ScriptInputSource<R>
where
    R: BufRead + Send + 'static,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(Some(reader)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<R> InputSource for ScriptInputSource<R>
where
    R: BufRead + Send + 'static,
{
    fn start(&self) -> Result<mpsc::Receiver<HostEvent>, SourceError> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| SourceError::AlreadyStarted)?
            .take()
            .ok_or(SourceError::AlreadyStarted)?;
        let (tx, rx) = mpsc::channel();
        let running = Arc::clone(&self.running);
        running.store(true, Ordering::Relaxed);

        thread::Builder::new()
            .name("script-input".to_string())
            .spawn(move || {
                for (index, line) in reader.lines().enumerate() {
                    if !running.load(Ordering::Relaxed) {
                        debug!("script source stopped");
                        break;
                    }
                    let text = match line {
                        Ok(text) => text,
                        Err(e) => {
                            warn!("script read failed: {e}");
                            break;
                        }
                    };
                    match parse_line(index + 1, &text) {
                        Ok(Some(event)) => {
                            if tx.send(event).is_err() {
                                // Consumer is gone.
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => warn!("skipping script line: {e}"),
                    }
                }
                running.store(false, Ordering::Relaxed);
            })
            .map_err(SourceError::Spawn)?;

        Ok(rx)
    }

    fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }
}
