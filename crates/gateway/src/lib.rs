//! # Kestrel Gateway Crate
//!
//! The seam between the strategy engine and the broker/market-data
//! backend. The engine only ever talks to the `TradeGateway` trait, so the
//! underlying implementation (a live broker bridge, the paper gateway, or
//! a scripted test double) can be swapped out without touching any
//! strategy code.
//!
//! Order rejection is NOT a transport error: a broker that answers "no"
//! returns `Ok(OrderResult { accepted: false, .. })`. `GatewayError` is
//! reserved for the call itself failing.

use async_trait::async_trait;
use core_types::{AccountSnapshot, Bar, OrderRequest, OrderResult, Quote, SymbolInfo, Timeframe};

pub mod error;
pub mod sim;

pub use error::GatewayError;
pub use sim::SimulatedGateway;

/// The generic, abstract interface to a trade-execution/market-data
/// gateway.
#[async_trait]
pub trait TradeGateway: Send + Sync {
    /// Fetches the most recent `count` bars, oldest first. May return
    /// fewer than requested; the caller decides whether that is enough.
    async fn fetch_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Bar>, GatewayError>;

    /// The current top-of-book quote.
    async fn quote(&self, symbol: &str) -> Result<Quote, GatewayError>;

    /// Static symbol metadata (tick size, digits, trade mode, visibility).
    async fn symbol_info(&self, symbol: &str) -> Result<SymbolInfo, GatewayError>;

    /// The account's current balance and equity.
    async fn account(&self) -> Result<AccountSnapshot, GatewayError>;

    /// Open positions across the whole account, all instruments included.
    async fn open_position_count(&self) -> Result<usize, GatewayError>;

    /// Submits a market bracket order. A broker-side rejection is an
    /// `Ok` result with `accepted == false`.
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResult, GatewayError>;
}
