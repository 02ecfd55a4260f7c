//! Domain layer: pure pointer-arbitration logic.
//!
//! Nothing in this module touches the OS, the file system, a UI framework or
//! the logging stack.  Each operation is a deterministic function of its
//! inputs (plus the tracker's own state), which keeps it trivially testable.
//!
//! - **`geometry`**    – `Point`, `Size` and `Rect` with inclusive containment
//!   and clamping.
//! - **`arrangement`** – `Edge` and the `Arrangement` resolver that places the
//!   external surface against the primary.
//! - **`tracker`**     – `MotionTracker`, which turns relative motion deltas
//!   into a `PointerState`.

pub mod arrangement;
pub mod geometry;
pub mod tracker;
