//! # Kestrel Executor Crate
//!
//! The bridge between an approved signal and the broker.
//!
//! ## Architectural Principles
//!
//! - **Geometry first:** bracket prices are pure arithmetic over the
//!   quote, the ATR and the symbol metadata, kept separate from the async
//!   submission path so they can be tested exactly.
//! - **Rejection is data:** a broker "no" flows back as an inspectable
//!   `OrderResult`, never as an error.

pub mod bracket;
pub mod error;
pub mod placer;

pub use bracket::{BracketPrices, SL_ATR_MULTIPLIER, bracket_prices};
pub use error::ExecutorError;
pub use placer::OrderPlacer;
