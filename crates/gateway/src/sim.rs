//! A paper trading gateway with a deterministic synthetic price path.
//!
//! Used by the binary's dry-run mode and by integration tests that need a
//! full gateway without a broker connection. Every call mutates a single
//! book-keeping struct behind an async mutex, so the gateway can be shared
//! across engine tasks exactly like a live implementation would be.

use crate::error::GatewayError;
use crate::TradeGateway;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use core_types::{
    AccountSnapshot, Bar, OrderRequest, OrderResult, Quote, SymbolInfo, Timeframe, TradeMode,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use tokio::sync::Mutex;

struct SimSymbol {
    info: SymbolInfo,
    /// Last generated close, kept as f64 for the random walk.
    price: f64,
    spread_points: u32,
    history: Vec<Bar>,
    /// Largest window ever requested; history is trimmed to this length.
    max_window: usize,
    next_timestamp: DateTime<Utc>,
}

struct Book {
    rng: StdRng,
    symbols: HashMap<String, SimSymbol>,
    account: AccountSnapshot,
    open_positions: usize,
    next_ticket: u64,
}

pub struct SimulatedGateway {
    book: Mutex<Book>,
}

impl SimulatedGateway {
    pub fn new(seed: u64) -> Self {
        Self {
            book: Mutex::new(Book {
                rng: StdRng::seed_from_u64(seed),
                symbols: HashMap::new(),
                account: AccountSnapshot {
                    balance: dec!(10000),
                    equity: dec!(10000),
                },
                open_positions: 0,
                next_ticket: 1,
            }),
        }
    }

    /// Registers a tradable symbol with its starting price and tick size.
    pub async fn add_symbol(&self, symbol: &str, start_price: f64, point: Decimal, digits: u32) {
        let mut book = self.book.lock().await;
        book.symbols.insert(
            symbol.to_string(),
            SimSymbol {
                info: SymbolInfo {
                    point,
                    digits,
                    trade_mode: TradeMode::Full,
                    visible: true,
                },
                price: start_price,
                spread_points: 2,
                history: Vec::new(),
                max_window: 0,
                next_timestamp: Utc::now(),
            },
        );
    }

    /// Overrides the account figures, e.g. to exercise drawdown vetoes.
    pub async fn set_account(&self, balance: Decimal, equity: Decimal) {
        let mut book = self.book.lock().await;
        book.account = AccountSnapshot { balance, equity };
    }

    fn generate_bar(rng: &mut StdRng, sym: &mut SimSymbol, timeframe: Timeframe) -> Bar {
        let open = sym.price;
        let drift: f64 = rng.gen_range(-0.002..0.002);
        let close = open * (1.0 + drift);
        let wick: f64 = rng.gen_range(0.0..0.001);
        let high = open.max(close) * (1.0 + wick);
        let low = open.min(close) * (1.0 - wick);
        let volume: u32 = rng.gen_range(100..2500);

        sym.price = close;
        let timestamp = sym.next_timestamp;
        sym.next_timestamp += Duration::seconds(timeframe.bar_seconds() as i64);

        let digits = sym.info.digits;
        Bar {
            timestamp,
            open: to_price(open, digits),
            high: to_price(high, digits),
            low: to_price(low, digits),
            close: to_price(close, digits),
            volume: Decimal::from(volume),
        }
    }
}

/// Converts a finite walk value into a broker-precision price.
fn to_price(x: f64, digits: u32) -> Decimal {
    Decimal::from_f64_retain(x)
        .map(|d| d.round_dp(digits))
        .unwrap_or(Decimal::ZERO)
}

#[async_trait]
impl TradeGateway for SimulatedGateway {
    async fn fetch_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Bar>, GatewayError> {
        let mut book = self.book.lock().await;
        let Book { rng, symbols, .. } = &mut *book;
        let sym = symbols
            .get_mut(symbol)
            .ok_or_else(|| GatewayError::UnknownSymbol(symbol.to_string()))?;

        // Always advance by one bar so consecutive cycles see fresh data,
        // then backfill until the requested window exists.
        let bar = Self::generate_bar(rng, sym, timeframe);
        sym.history.push(bar);
        while sym.history.len() < count {
            let bar = Self::generate_bar(rng, sym, timeframe);
            sym.history.push(bar);
        }

        let start = sym.history.len() - count;
        let window = sym.history[start..].to_vec();

        // Keep only what the widest caller could still ask for, so a long
        // run does not accumulate bars without bound.
        sym.max_window = sym.max_window.max(count);
        let excess = sym.history.len().saturating_sub(sym.max_window);
        sym.history.drain(..excess);

        Ok(window)
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, GatewayError> {
        let book = self.book.lock().await;
        let sym = book
            .symbols
            .get(symbol)
            .ok_or_else(|| GatewayError::UnknownSymbol(symbol.to_string()))?;
        let bid = to_price(sym.price, sym.info.digits);
        let ask = bid + Decimal::from(sym.spread_points) * sym.info.point;
        Ok(Quote { bid, ask })
    }

    async fn symbol_info(&self, symbol: &str) -> Result<SymbolInfo, GatewayError> {
        let book = self.book.lock().await;
        book.symbols
            .get(symbol)
            .map(|s| s.info.clone())
            .ok_or_else(|| GatewayError::UnknownSymbol(symbol.to_string()))
    }

    async fn account(&self) -> Result<AccountSnapshot, GatewayError> {
        Ok(self.book.lock().await.account)
    }

    async fn open_position_count(&self) -> Result<usize, GatewayError> {
        Ok(self.book.lock().await.open_positions)
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResult, GatewayError> {
        let mut book = self.book.lock().await;
        let Some(sym) = book.symbols.get(&order.symbol) else {
            return Err(GatewayError::UnknownSymbol(order.symbol.clone()));
        };
        if !sym.info.visible || !sym.info.trade_mode.allows_opening() {
            return Ok(OrderResult::rejected("symbol is not tradable"));
        }
        if order.volume <= Decimal::ZERO {
            return Ok(OrderResult::rejected("invalid volume"));
        }

        let ticket = book.next_ticket;
        book.next_ticket += 1;
        book.open_positions += 1;
        Ok(OrderResult::accepted(ticket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Direction;
    use uuid::Uuid;

    async fn gateway() -> SimulatedGateway {
        let gw = SimulatedGateway::new(7);
        gw.add_symbol("EURUSD", 1.1000, dec!(0.0001), 5).await;
        gw
    }

    fn order(symbol: &str, volume: Decimal) -> OrderRequest {
        OrderRequest {
            client_order_id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            direction: Direction::Long,
            volume,
            price: dec!(1.1),
            stop_loss: dec!(1.09),
            take_profit: dec!(1.12),
            deviation: 10,
            tag: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn bars_are_ordered_and_fresh_each_fetch() {
        let gw = gateway().await;
        let first = gw.fetch_bars("EURUSD", Timeframe::M5, 50).await.unwrap();
        assert_eq!(first.len(), 50);
        for w in first.windows(2) {
            assert!(w[0].timestamp < w[1].timestamp);
            assert!(w[0].low <= w[0].high);
        }

        let second = gw.fetch_bars("EURUSD", Timeframe::M5, 50).await.unwrap();
        assert_ne!(
            first.last().unwrap().timestamp,
            second.last().unwrap().timestamp
        );
    }

    #[tokio::test]
    async fn unknown_symbol_is_an_error() {
        let gw = gateway().await;
        assert!(gw.fetch_bars("XAUUSD", Timeframe::M5, 10).await.is_err());
        assert!(gw.quote("XAUUSD").await.is_err());
    }

    #[tokio::test]
    async fn quote_has_positive_spread() {
        let gw = gateway().await;
        let q = gw.quote("EURUSD").await.unwrap();
        assert!(q.ask > q.bid);
    }

    #[tokio::test]
    async fn accepted_orders_get_increasing_tickets() {
        let gw = gateway().await;
        let a = gw.submit_order(&order("EURUSD", dec!(0.1))).await.unwrap();
        let b = gw.submit_order(&order("EURUSD", dec!(0.1))).await.unwrap();
        assert!(a.accepted && b.accepted);
        assert!(b.ticket.unwrap() > a.ticket.unwrap());
        assert_eq!(gw.open_position_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn zero_volume_is_rejected_not_an_error() {
        let gw = gateway().await;
        let res = gw.submit_order(&order("EURUSD", dec!(0))).await.unwrap();
        assert!(!res.accepted);
        assert!(res.reason.is_some());
    }

    #[tokio::test]
    async fn history_stays_bounded_across_many_fetches() {
        let gw = gateway().await;
        for _ in 0..25 {
            let bars = gw.fetch_bars("EURUSD", Timeframe::M5, 50).await.unwrap();
            assert_eq!(bars.len(), 50);
        }
        let book = gw.book.lock().await;
        assert!(book.symbols["EURUSD"].history.len() <= 50);
    }

    #[tokio::test]
    async fn trimming_respects_the_widest_window_seen() {
        let gw = gateway().await;
        gw.fetch_bars("EURUSD", Timeframe::M5, 80).await.unwrap();
        // A narrower request must not shrink the retained history below
        // what an 80-bar caller would need next cycle.
        let narrow = gw.fetch_bars("EURUSD", Timeframe::M5, 20).await.unwrap();
        assert_eq!(narrow.len(), 20);
        let wide = gw.fetch_bars("EURUSD", Timeframe::M5, 80).await.unwrap();
        assert_eq!(wide.len(), 80);
        for w in wide.windows(2) {
            assert!(w[0].timestamp < w[1].timestamp);
        }
    }

    #[tokio::test]
    async fn same_seed_reproduces_the_same_path() {
        let a = SimulatedGateway::new(42);
        a.add_symbol("EURUSD", 1.1, dec!(0.0001), 5).await;
        let b = SimulatedGateway::new(42);
        b.add_symbol("EURUSD", 1.1, dec!(0.0001), 5).await;

        let bars_a = a.fetch_bars("EURUSD", Timeframe::M5, 20).await.unwrap();
        let bars_b = b.fetch_bars("EURUSD", Timeframe::M5, 20).await.unwrap();
        let closes_a: Vec<_> = bars_a.iter().map(|b| b.close).collect();
        let closes_b: Vec<_> = bars_b.iter().map(|b| b.close).collect();
        assert_eq!(closes_a, closes_b);
    }
}
