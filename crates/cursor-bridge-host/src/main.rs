//! cursor-bridge host entry point.
//!
//! Usage: `cursor-bridge-host [SCRIPT]`
//!
//! Replays host events from `SCRIPT` (or stdin when omitted) through the
//! pointer session and logs where the cursor is drawn.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()              -- platform config file or defaults
//!  └─ build_use_case()           -- session, arrangement, controls
//!  └─ ScriptInputSource          (reader thread)
//!       └─ forward_events()      (std mpsc -> tokio mpsc)
//!            └─ pump_events()    (single Tokio consumer)
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cursor_bridge_host::infrastructure::input_source::{script::ScriptInputSource, InputSource};
use cursor_bridge_host::infrastructure::presenter::LogPresenter;
use cursor_bridge_host::infrastructure::runtime::{build_use_case, forward_events, pump_events};
use cursor_bridge_host::infrastructure::storage::config::{load_config, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = load_config();
    let log_level = loaded
        .as_ref()
        .map(|cfg| cfg.host.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // `RUST_LOG` wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&log_level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("using default configuration: {e}");
            AppConfig::default()
        }
    };

    info!("cursor-bridge host starting");

    let presenter = Arc::new(LogPresenter::new());
    let mut use_case =
        build_use_case(&config, presenter).context("invalid display configuration")?;

    let reader: Box<dyn BufRead + Send> = match std::env::args_os().nth(1) {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("cannot open script {}", path.to_string_lossy()))?;
            info!("replaying script {}", path.to_string_lossy());
            Box::new(BufReader::new(file))
        }
        None => {
            info!("reading events from stdin");
            Box::new(BufReader::new(std::io::stdin()))
        }
    };
    let source = ScriptInputSource::new(reader);
    let mut events = forward_events(source.start()?)?;

    tokio::select! {
        applied = pump_events(&mut use_case, &mut events) => {
            info!("input finished after {applied} events");
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!("ctrl-c handler failed: {e}");
            }
            info!("shutdown signal received");
        }
    }
    source.stop();

    let state = use_case.session().state();
    info!(
        "final cursor: {:?} at ({:.2}, {:.2})",
        state.visible_surface, state.logical_position.x, state.logical_position.y
    );
    info!("cursor-bridge host stopped");
    Ok(())
}
