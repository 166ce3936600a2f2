//! Turns an approved signal into a live bracket order.

use crate::bracket::{BracketPrices, bracket_prices};
use crate::error::ExecutorError;
use configuration::StrategyConfig;
use core_types::{OrderRequest, OrderResult, Signal};
use gateway::TradeGateway;
use std::sync::Arc;
use uuid::Uuid;

/// Submits bracket orders through the gateway.
///
/// The placer re-reads the symbol and the quote at submission time, so a
/// symbol that went stale between analysis and execution is caught here
/// rather than at the broker.
pub struct OrderPlacer {
    gateway: Arc<dyn TradeGateway>,
    deviation_points: u32,
    tag: String,
}

impl OrderPlacer {
    pub fn new(gateway: Arc<dyn TradeGateway>, deviation_points: u32, tag: String) -> Self {
        Self {
            gateway,
            deviation_points,
            tag,
        }
    }

    /// Builds and submits one order for the given signal.
    ///
    /// A broker rejection comes back as `Ok` with `accepted == false`;
    /// `Err` means the order never reached the broker.
    pub async fn place(
        &self,
        config: &StrategyConfig,
        signal: &Signal,
        atr: f64,
    ) -> Result<(OrderResult, BracketPrices), ExecutorError> {
        let info = self.gateway.symbol_info(&config.symbol).await?;
        if !info.visible {
            return Err(ExecutorError::SymbolNotVisible(config.symbol.clone()));
        }
        if !info.trade_mode.allows_opening() {
            return Err(ExecutorError::SymbolNotTradeable(config.symbol.clone()));
        }

        let quote = self.gateway.quote(&config.symbol).await?;
        let bracket = bracket_prices(
            signal.direction,
            &quote,
            atr,
            &info,
            config.risk.min_rr_ratio,
        )?;

        let request = OrderRequest {
            client_order_id: Uuid::new_v4(),
            symbol: config.symbol.clone(),
            direction: signal.direction,
            volume: config.lot,
            price: bracket.entry,
            stop_loss: bracket.stop_loss,
            take_profit: bracket.take_profit,
            deviation: self.deviation_points,
            tag: self.tag.clone(),
        };

        let result = self.gateway.submit_order(&request).await?;
        Ok((result, bracket))
    }
}
