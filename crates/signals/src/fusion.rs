//! Weighted condition voting over an indicator snapshot.
//!
//! Six independent technical checks per direction; a signal fires when at
//! least [`VOTE_THRESHOLD`] agree AND volume is elevated AND the clock is
//! inside the favorable trading window. Long is always evaluated first:
//! once a long signal fires, the short side is not evaluated at all in
//! that cycle.

use crate::snapshot::IndicatorSnapshot;
use chrono::{DateTime, NaiveTime, Utc};
use configuration::StrategyConfig;
use core_types::{Direction, Signal};

/// Minimum number of agreeing conditions out of six.
pub const VOTE_THRESHOLD: usize = 2;

const STOCH_OVERSOLD: f64 = 20.0;
const STOCH_OVERBOUGHT: f64 = 80.0;

/// Fast EMA above medium, price above fast, fast rising.
fn trend_up(s: &IndicatorSnapshot) -> bool {
    s.ema_fast[1] > s.ema_medium[1] && s.close[1] > s.ema_fast[1] && s.ema_fast[1] > s.ema_fast[0]
}

fn trend_down(s: &IndicatorSnapshot) -> bool {
    s.ema_fast[1] < s.ema_medium[1] && s.close[1] < s.ema_fast[1] && s.ema_fast[1] < s.ema_fast[0]
}

fn macd_bullish(s: &IndicatorSnapshot) -> bool {
    s.macd[1] > s.macd_signal[1] && s.macd[1] > s.macd[0]
}

fn macd_bearish(s: &IndicatorSnapshot) -> bool {
    s.macd[1] < s.macd_signal[1] && s.macd[1] < s.macd[0]
}

fn rsi_oversold_rising(s: &IndicatorSnapshot, config: &StrategyConfig) -> bool {
    s.rsi[1] < config.strategy.rsi_oversold && s.rsi[1] > s.rsi[0]
}

fn rsi_overbought_falling(s: &IndicatorSnapshot, config: &StrategyConfig) -> bool {
    s.rsi[1] > config.strategy.rsi_overbought && s.rsi[1] < s.rsi[0]
}

fn stoch_rising_from_oversold(s: &IndicatorSnapshot) -> bool {
    s.stoch_k[1] < STOCH_OVERSOLD && s.stoch_k[1] > s.stoch_k[0]
}

fn stoch_falling_from_overbought(s: &IndicatorSnapshot) -> bool {
    s.stoch_k[1] > STOCH_OVERBOUGHT && s.stoch_k[1] < s.stoch_k[0]
}

/// The six buy conditions, in the order they are reported.
fn buy_votes(s: &IndicatorSnapshot, config: &StrategyConfig) -> usize {
    [
        trend_up(s),
        macd_bullish(s),
        rsi_oversold_rising(s, config),
        s.close[1] < s.bb_lower,
        stoch_rising_from_oversold(s),
        s.momentum > 0.0,
    ]
    .iter()
    .filter(|&&v| v)
    .count()
}

/// The structural mirror of the buy set.
fn sell_votes(s: &IndicatorSnapshot, config: &StrategyConfig) -> usize {
    [
        trend_down(s),
        macd_bearish(s),
        rsi_overbought_falling(s, config),
        s.close[1] > s.bb_upper,
        stoch_falling_from_overbought(s),
        s.momentum < 0.0,
    ]
    .iter()
    .filter(|&&v| v)
    .count()
}

/// A plain trend reading, published as a progress notification before the
/// full vote is tallied.
pub fn trend_hint(s: &IndicatorSnapshot) -> Option<Direction> {
    if trend_up(s) {
        Some(Direction::Long)
    } else if trend_down(s) {
        Some(Direction::Short)
    } else {
        None
    }
}

/// Produces at most one directional signal for this cycle.
///
/// The risk gate is applied by the caller after fusion; this function only
/// answers the technical question.
pub fn fuse(
    snapshot: &IndicatorSnapshot,
    time_of_day: NaiveTime,
    now: DateTime<Utc>,
    config: &StrategyConfig,
) -> Option<Signal> {
    let volume_high = snapshot.volume_ratio > config.strategy.volume_ratio_threshold;
    if !volume_high || !config.in_trading_window(time_of_day) {
        return None;
    }

    let longs = buy_votes(snapshot, config);
    if longs >= VOTE_THRESHOLD {
        return Some(Signal {
            direction: Direction::Long,
            conditions_met: longs,
            timestamp: now,
        });
    }

    let shorts = sell_votes(snapshot, config);
    if shorts >= VOTE_THRESHOLD {
        return Some(Signal {
            direction: Direction::Short,
            conditions_met: shorts,
            timestamp: now,
        });
    }

    None
}
