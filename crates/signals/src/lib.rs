//! # Kestrel Signal Fusion
//!
//! Turns a rolling bar window into at most one directional trade signal
//! per analysis cycle.
//!
//! ## Architectural Principles
//!
//! - **Pure logic crate:** no gateway, no clock, no I/O. The engine hands
//!   in bars and the current time-of-day; this crate answers with a
//!   `Signal` or nothing.
//! - **Two-point predicates:** every condition is evaluated from the last
//!   TWO points of an indicator series so it captures direction/slope,
//!   never a single-point level.
//! - **Explicit staging:** snapshot computation and fusion return explicit
//!   results; the risk gate is applied by the engine afterwards.

pub mod error;
pub mod fusion;
pub mod snapshot;

pub use error::SignalError;
pub use fusion::{fuse, trend_hint};
pub use snapshot::{IndicatorSnapshot, MIN_BARS};
