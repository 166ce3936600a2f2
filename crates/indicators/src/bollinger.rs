//! Bollinger Bands: a simple moving average with bands at ± k sample
//! standard deviations. Returned as (upper, middle, lower), each aligned
//! to the input with a NaN warmup prefix.

use crate::error::{require_len, require_period, IndicatorError};
use crate::window::{rolling_mean, rolling_std};

pub fn bollinger(
    series: &[f64],
    period: usize,
    deviation: f64,
) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), IndicatorError> {
    require_period(period)?;
    require_len(series.len(), period)?;

    let middle = rolling_mean(series, period);
    let std = rolling_std(series, period);

    let upper: Vec<f64> = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| m + deviation * s)
        .collect();
    let lower: Vec<f64> = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| m - deviation * s)
        .collect();

    Ok((upper, middle, lower))
}
