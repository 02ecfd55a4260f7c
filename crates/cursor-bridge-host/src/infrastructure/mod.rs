//! Infrastructure layer for the host.
//!
//! Contains the adapters around the application layer: input sources,
//! presentation glue, configuration storage and the runtime wiring.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `cursor_bridge_core`, but the domain crate never imports it.

pub mod input_source;
pub mod presenter;
pub mod runtime;
pub mod storage;
