//! Stochastic oscillator %K/%D.
//!
//! Raw %K = 100 × (close − rolling-min(low)) / (rolling-max(high) −
//! rolling-min(low)), smoothed by a `k_smooth`-wide moving average; %D is
//! a `d_smooth`-wide moving average of the smoothed %K. NaN warmup
//! prefixes accumulate through each smoothing stage.

use crate::error::{require_len, require_period, IndicatorError};
use crate::window::{rolling_max, rolling_mean, rolling_min};

pub fn stochastic(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
    k_smooth: usize,
    d_smooth: usize,
) -> Result<(Vec<f64>, Vec<f64>), IndicatorError> {
    require_period(period)?;
    require_period(k_smooth)?;
    require_period(d_smooth)?;
    // Each smoothing stage consumes another (window - 1) samples of warmup.
    let required = period + k_smooth + d_smooth - 2;
    require_len(close.len().min(high.len()).min(low.len()), required)?;

    let low_min = rolling_min(low, period);
    let high_max = rolling_max(high, period);

    let raw_k: Vec<f64> = close
        .iter()
        .zip(high_max.iter().zip(&low_min))
        .map(|(c, (hi, lo))| 100.0 * (c - lo) / (hi - lo))
        .collect();

    let k = rolling_mean(&raw_k, k_smooth);
    let d = rolling_mean(&k, d_smooth);
    Ok((k, d))
}
