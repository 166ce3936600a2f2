//! # Kestrel Events Crate
//!
//! Side-channel notifications flowing up from the engines: analysis
//! progress, confirmed signals, order confirmations and rejections. These
//! feed whatever front end is attached (a log panel, a terminal printer, a
//! future WebSocket transport) without the engines knowing or caring.

pub mod bus;
pub mod messages;

pub use bus::{EventBus, EventReceiver};
pub use messages::EngineEvent;
