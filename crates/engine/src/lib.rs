//! # Kestrel Engine Crate
//!
//! The orchestrator: one supervised polling loop per instrument, each
//! running the same fetch-analyze-gate-submit cycle against the shared
//! gateway.
//!
//! ## Architectural Principles
//!
//! - **One engine, one instrument:** engines never coordinate with each
//!   other; account-wide limits are the risk gate's job.
//! - **Staged outcomes:** every cycle ends in an explicit
//!   [`CycleOutcome`] or [`CycleError`], so the loop's reaction (normal
//!   poll, extended backoff) is decided by data, not by control flow.
//! - **Cooperative shutdown:** a stop request flips a shared flag; the
//!   engine finishes its current cycle and exits at the boundary.

pub mod engine;
pub mod error;
pub mod supervisor;

pub use engine::{CycleOutcome, EngineState, StrategyEngine};
pub use error::{CycleError, EngineError};
pub use supervisor::Supervisor;
