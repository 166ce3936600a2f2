use core_types::Direction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A notification from one instrument's engine.
///
/// Every variant carries the instrument symbol, which doubles as the
/// display channel identifier: a front end shows each instrument's
/// messages in its own panel.
///
/// The `#[serde(tag = "type", content = "payload")]` attribute serializes
/// the enum into a tagged JSON object that is easy for a front end to
/// dispatch on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum EngineEvent {
    /// An engine's polling loop has started.
    EngineStarted { symbol: String },
    /// An engine's polling loop has exited after a stop request.
    EngineStopped { symbol: String },
    /// A new analysis cycle began fetching data.
    AnalysisStarted { symbol: String },
    /// A trend was detected but has not yet cleared the vote threshold.
    TrendDetected { symbol: String, direction: Direction },
    /// The vote threshold, volume filter, and trading window all passed.
    SignalConfirmed {
        symbol: String,
        direction: Direction,
        conditions_met: usize,
    },
    /// The risk gate vetoed an otherwise-confirmed signal.
    RiskVetoed { symbol: String, reason: String },
    /// A bracket order was accepted by the broker.
    OrderPlaced {
        symbol: String,
        direction: Direction,
        ticket: u64,
        price: Decimal,
        stop_loss: Decimal,
        take_profit: Decimal,
    },
    /// The broker rejected the order.
    OrderRejected { symbol: String, reason: String },
    /// A cycle aborted; the loop keeps running.
    CycleFailed { symbol: String, error: String },
}

impl EngineEvent {
    /// The instrument this event belongs to.
    pub fn symbol(&self) -> &str {
        match self {
            EngineEvent::EngineStarted { symbol }
            | EngineEvent::EngineStopped { symbol }
            | EngineEvent::AnalysisStarted { symbol }
            | EngineEvent::TrendDetected { symbol, .. }
            | EngineEvent::SignalConfirmed { symbol, .. }
            | EngineEvent::RiskVetoed { symbol, .. }
            | EngineEvent::OrderPlaced { symbol, .. }
            | EngineEvent::OrderRejected { symbol, .. }
            | EngineEvent::CycleFailed { symbol, .. } => symbol,
        }
    }
}
