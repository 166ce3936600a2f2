//! Moving Average Convergence Divergence.
//!
//! MACD line = EMA(series, fast) − EMA(series, slow); the signal line is an
//! EMA of the MACD line itself. Both lines are returned, aligned to the
//! input.

use crate::ema::ema;
use crate::error::IndicatorError;

pub fn macd(
    series: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<(Vec<f64>, Vec<f64>), IndicatorError> {
    let ema_fast = ema(series, fast)?;
    let ema_slow = ema(series, slow)?;

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema(&macd_line, signal)?;
    Ok((macd_line, signal_line))
}
