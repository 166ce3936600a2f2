//! ATR-proportional bracket construction.
//!
//! The stop distance is a fixed multiple of the latest ATR expressed in
//! points; the target distance stretches that by the configured minimum
//! reward-to-risk ratio, so every bracket clears the ratio by design of
//! its geometry. All three prices are rounded to the symbol's quoted
//! precision before they leave this module.

use crate::error::ExecutorError;
use core_types::{Direction, Quote, SymbolInfo};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Stop distance in ATR units.
pub const SL_ATR_MULTIPLIER: Decimal = dec!(1.5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPrices {
    pub entry: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
}

/// Builds the entry/stop/target triple for one order.
///
/// Longs enter at the ask, shorts at the bid. Distances scale with the
/// ATR and the symbol's point size.
pub fn bracket_prices(
    direction: Direction,
    quote: &Quote,
    atr: f64,
    info: &SymbolInfo,
    min_rr_ratio: f64,
) -> Result<BracketPrices, ExecutorError> {
    if !atr.is_finite() || atr <= 0.0 {
        return Err(ExecutorError::InvalidAtr(atr));
    }
    let atr = Decimal::from_f64_retain(atr).ok_or(ExecutorError::InvalidAtr(f64::NAN))?;
    let rr = Decimal::from_f64_retain(min_rr_ratio)
        .ok_or(ExecutorError::InvalidAtr(min_rr_ratio))?;

    let sl_distance = atr * SL_ATR_MULTIPLIER * info.point;
    let tp_distance = sl_distance * rr;

    let (entry, stop_loss, take_profit) = match direction {
        Direction::Long => (quote.ask, quote.ask - sl_distance, quote.ask + tp_distance),
        Direction::Short => (quote.bid, quote.bid + sl_distance, quote.bid - tp_distance),
    };

    Ok(BracketPrices {
        entry: entry.round_dp(info.digits),
        stop_loss: stop_loss.round_dp(info.digits),
        take_profit: take_profit.round_dp(info.digits),
    })
}
