//! Per-cycle indicator readings.
//!
//! An `IndicatorSnapshot` holds the last one or two points of every
//! indicator the fusion engine votes on, plus the volume ratio. It is
//! derived fresh from each cycle's bar window and never persisted.

use crate::error::SignalError;
use configuration::StrategyConfig;
use core_types::Bar;
use indicators::{atr, bollinger, ema, macd, momentum, rsi, stochastic};
use rust_decimal::prelude::ToPrimitive;

/// Callers must provide at least this many bars before asking for a
/// snapshot; shorter windows abort the analysis cycle. Shared with the
/// configuration validator so an undersized window is caught at load
/// time, not on every cycle.
pub const MIN_BARS: usize = configuration::MIN_BAR_WINDOW;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    /// Close of the previous and the latest bar.
    pub close: [f64; 2],
    pub ema_fast: [f64; 2],
    pub ema_medium: [f64; 2],
    pub ema_slow: [f64; 2],
    pub macd: [f64; 2],
    pub macd_signal: [f64; 2],
    pub rsi: [f64; 2],
    pub bb_upper: f64,
    pub bb_lower: f64,
    pub stoch_k: [f64; 2],
    /// Latest Average True Range, used for bracket sizing downstream.
    pub atr: f64,
    pub momentum: f64,
    /// Latest volume divided by its moving average.
    pub volume_ratio: f64,
}

impl IndicatorSnapshot {
    /// Computes every indicator over the window and extracts the decision
    /// points. Fails if the window is too short or if any decision point
    /// came out non-finite.
    pub fn compute(bars: &[Bar], config: &StrategyConfig) -> Result<Self, SignalError> {
        if bars.len() < MIN_BARS {
            return Err(SignalError::InsufficientBars {
                required: MIN_BARS,
                actual: bars.len(),
            });
        }

        let close = decimals_to_f64(bars, |b| b.close)?;
        let high = decimals_to_f64(bars, |b| b.high)?;
        let low = decimals_to_f64(bars, |b| b.low)?;
        let volume = decimals_to_f64(bars, |b| b.volume)?;

        let s = &config.strategy;
        let ema_fast = ema(&close, s.ema_fast)?;
        let ema_medium = ema(&close, s.ema_medium)?;
        let ema_slow = ema(&close, s.ema_slow)?;
        let (macd_line, signal_line) = macd(&close, s.macd_fast, s.macd_slow, s.macd_signal)?;
        let rsi_series = rsi(&close, s.rsi_period)?;
        let (bb_upper, _, bb_lower) = bollinger(&close, s.bb_period, s.bb_deviation)?;
        let (stoch_k, _) = stochastic(
            &high,
            &low,
            &close,
            s.stoch_period,
            s.stoch_k_smooth,
            s.stoch_d_smooth,
        )?;
        let atr_series = atr(&high, &low, &close, s.atr_period)?;
        let momentum_series = momentum(&close, s.momentum_period)?;

        let ma_window = &volume[volume.len() - s.volume_ma_period.min(volume.len())..];
        let volume_ma = ma_window.iter().sum::<f64>() / ma_window.len() as f64;
        let volume_ratio = volume[volume.len() - 1] / volume_ma;

        let snapshot = Self {
            close: last_two(&close),
            ema_fast: last_two(&ema_fast),
            ema_medium: last_two(&ema_medium),
            ema_slow: last_two(&ema_slow),
            macd: last_two(&macd_line),
            macd_signal: last_two(&signal_line),
            rsi: last_two(&rsi_series),
            bb_upper: last(&bb_upper),
            bb_lower: last(&bb_lower),
            stoch_k: last_two(&stoch_k),
            atr: last(&atr_series),
            momentum: last(&momentum_series),
            volume_ratio,
        };
        snapshot.check_finite()?;
        Ok(snapshot)
    }

    /// NaN/inf in any decision point invalidates the whole snapshot; the
    /// cycle aborts rather than trade on garbage.
    fn check_finite(&self) -> Result<(), SignalError> {
        let points = [
            ("close", &self.close[..]),
            ("ema_fast", &self.ema_fast[..]),
            ("ema_medium", &self.ema_medium[..]),
            ("ema_slow", &self.ema_slow[..]),
            ("macd", &self.macd[..]),
            ("macd_signal", &self.macd_signal[..]),
            ("rsi", &self.rsi[..]),
            ("bb_upper", std::slice::from_ref(&self.bb_upper)),
            ("bb_lower", std::slice::from_ref(&self.bb_lower)),
            ("stoch_k", &self.stoch_k[..]),
            ("atr", std::slice::from_ref(&self.atr)),
            ("momentum", std::slice::from_ref(&self.momentum)),
            ("volume_ratio", std::slice::from_ref(&self.volume_ratio)),
        ];
        for (name, values) in points {
            if values.iter().any(|v| !v.is_finite()) {
                return Err(SignalError::InvalidIndicatorState(name.to_string()));
            }
        }
        Ok(())
    }
}

fn decimals_to_f64(
    bars: &[Bar],
    field: impl Fn(&Bar) -> rust_decimal::Decimal,
) -> Result<Vec<f64>, SignalError> {
    bars.iter()
        .map(|b| {
            field(b)
                .to_f64()
                .ok_or_else(|| SignalError::InvalidIndicatorState("bar price".to_string()))
        })
        .collect()
}

fn last(series: &[f64]) -> f64 {
    series[series.len() - 1]
}

fn last_two(series: &[f64]) -> [f64; 2] {
    [series[series.len() - 2], series[series.len() - 1]]
}
