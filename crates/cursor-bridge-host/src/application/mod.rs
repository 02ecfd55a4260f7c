//! Application layer use cases for the host.
//!
//! Use cases here orchestrate the core domain types and depend only on
//! traits for anything that touches the outside world (drawing cursors,
//! hit-testing controls).
//!
//! # Sub-modules
//!
//! - **`session`** – The pointer context: tracker, surface sizes, resolved
//!   arrangement and the lock gate.
//!
//! - **`activate_controls`** – Turns button presses of the locked pointer into
//!   control activations.
//!
//! - **`route_motion`** – Consumes host events, updates the session and keeps
//!   the drawn cursors in sync.  Runs once per event.

pub mod activate_controls;
pub mod route_motion;
pub mod session;
