//! Average True Range: rolling mean of the true range.
//!
//! True range = max(high − low, |high − prevClose|, |low − prevClose|);
//! the first bar has no previous close, so its true range is just
//! high − low. Output has a NaN warmup prefix of `period − 1`.

use crate::error::{require_len, require_period, IndicatorError};
use crate::window::rolling_mean;

pub fn atr(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
) -> Result<Vec<f64>, IndicatorError> {
    require_period(period)?;
    let len = high.len().min(low.len()).min(close.len());
    require_len(len, period)?;

    let mut tr = Vec::with_capacity(len);
    tr.push(high[0] - low[0]);
    for i in 1..len {
        let range = high[i] - low[i];
        let vs_prev_high = (high[i] - close[i - 1]).abs();
        let vs_prev_low = (low[i] - close[i - 1]).abs();
        tr.push(range.max(vs_prev_high).max(vs_prev_low));
    }

    Ok(rolling_mean(&tr, period))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atr_is_non_negative_where_valid() {
        let close: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 1.3).sin() * 6.0)
            .collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.5).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.5).collect();

        let out = atr(&high, &low, &close, 10).unwrap();
        for v in out.iter().filter(|v| !v.is_nan()) {
            assert!(*v >= 0.0);
        }
    }

    #[test]
    fn constant_range_yields_that_range() {
        // Flat closes with a fixed 2.0 bar range: every TR is 2.0.
        let close = [100.0; 20];
        let high = [101.0; 20];
        let low = [99.0; 20];
        let out = atr(&high, &low, &close, 10).unwrap();
        assert!((out[19] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn gap_counts_against_previous_close() {
        // Second bar gaps far above the first close; TR must use the gap.
        let high = [101.0, 111.0, 111.5];
        let low = [99.0, 110.0, 110.5];
        let close = [100.0, 110.5, 111.0];
        let out = atr(&high, &low, &close, 1).unwrap();
        // TR[1] = max(1.0, |111-100|, |110-100|) = 11.0
        assert!((out[1] - 11.0).abs() < 1e-12);
    }

    #[test]
    fn warmup_prefix_is_nan() {
        let close = [100.0; 15];
        let high = [101.0; 15];
        let low = [99.0; 15];
        let out = atr(&high, &low, &close, 10).unwrap();
        for i in 0..9 {
            assert!(out[i].is_nan());
        }
        assert!(!out[9].is_nan());
    }

    #[test]
    fn too_short_input_fails_fast() {
        let data = [1.0; 5];
        assert!(atr(&data, &data, &data, 10).is_err());
    }
}
