use crate::enums::{Direction, TradeMode};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single OHLCV price bar.
///
/// Bars arrive from the market-data gateway as an ordered sequence
/// (oldest first) and are immutable once read; every analysis cycle
/// fetches a fresh window rather than mutating an old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// The current top-of-book quote for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub bid: Decimal,
    pub ask: Decimal,
}

/// Static trading metadata for a symbol, as reported by the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolInfo {
    /// The minimum price increment (one "point").
    pub point: Decimal,
    /// Number of decimal digits in quoted prices.
    pub digits: u32,
    pub trade_mode: TradeMode,
    /// Whether the symbol is visible/selected in the terminal.
    pub visible: bool,
}

/// A snapshot of the account's balance and equity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub balance: Decimal,
    pub equity: Decimal,
}

/// Account-level state the risk gate evaluates. Read fresh from the
/// gateway every cycle; never cached across cycles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskContext {
    /// Open positions across the whole account, not just one symbol.
    pub open_positions: usize,
    pub account: AccountSnapshot,
}

/// A directional trade signal produced by the fusion engine.
///
/// Ephemeral: produced at most once per analysis cycle and consumed
/// immediately by the risk gate and order constructor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub direction: Direction,
    /// How many of the six technical conditions voted for this direction.
    pub conditions_met: usize,
    pub timestamp: DateTime<Utc>,
}

/// A fully-specified bracket order ready for submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub client_order_id: Uuid,
    pub symbol: String,
    pub direction: Direction,
    pub volume: Decimal,
    /// Market entry price (ask for long, bid for short).
    pub price: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    /// Maximum tolerated price deviation, in points.
    pub deviation: u32,
    /// Identifying comment attached to the order at the broker.
    pub tag: String,
}

/// The gateway's verdict on a submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    pub accepted: bool,
    /// Broker-assigned ticket, present when the order was accepted.
    pub ticket: Option<u64>,
    /// Broker-provided rejection reason, present when it was not.
    pub reason: Option<String>,
}

impl OrderResult {
    pub fn accepted(ticket: u64) -> Self {
        Self {
            accepted: true,
            ticket: Some(ticket),
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            ticket: None,
            reason: Some(reason.into()),
        }
    }
}
