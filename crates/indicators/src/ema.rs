//! Exponential Moving Average.
//!
//! Smoothing factor α = 2/(period+1), seeded from the first value so the
//! series is defined from index 0 with no look-ahead:
//! EMA[0] = x[0], EMA[i] = α·x[i] + (1-α)·EMA[i-1].

use crate::error::{require_len, require_period, IndicatorError};

pub fn ema(series: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    require_period(period)?;
    require_len(series.len(), period)?;

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(series.len());
    let mut prev = series[0];
    out.push(prev);

    for &x in &series[1..] {
        prev = alpha * x + (1.0 - alpha) * prev;
        out.push(prev);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_from_first_value() {
        let out = ema(&[10.0, 20.0, 30.0], 3).unwrap();
        assert!((out[0] - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn recursion_matches_definition() {
        let series = [10.0, 20.0, 30.0, 40.0, 50.0];
        let period = 3;
        let alpha = 2.0 / 4.0;

        let out = ema(&series, period).unwrap();

        let mut expected = series[0];
        for i in 1..series.len() {
            expected = alpha * series[i] + (1.0 - alpha) * expected;
            assert!((out[i] - expected).abs() < 1e-12, "mismatch at {i}");
        }
    }

    #[test]
    fn constant_series_stays_constant() {
        let out = ema(&[100.0; 10], 4).unwrap();
        assert!(out.iter().all(|v| (v - 100.0).abs() < f64::EPSILON));
    }

    #[test]
    fn output_is_aligned_to_input() {
        let out = ema(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn too_short_input_fails_fast() {
        let err = ema(&[1.0, 2.0], 5).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                required: 5,
                actual: 2
            }
        );
    }

    #[test]
    fn zero_period_is_rejected() {
        assert_eq!(ema(&[1.0, 2.0], 0).unwrap_err(), IndicatorError::ZeroPeriod);
    }
}
