//! Relative Strength Index over a simple trailing average of gains and
//! losses.
//!
//! Deliberately NOT Wilder's exponential smoothing: average gain and loss
//! are plain moving averages over the trailing `period` price changes.
//! This changes signal timing materially versus the textbook RSI and is
//! part of the strategy's tuned behavior, so it must stay as is.
//!
//! The output is aligned to the differenced series (input length − 1).
//! The first `period − 1` entries, where no full window exists, are the
//! neutral 50.

use crate::error::{require_len, require_period, IndicatorError};

const NEUTRAL: f64 = 50.0;
const LOSS_FLOOR: f64 = 1e-6;

pub fn rsi(series: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    require_period(period)?;
    // Need at least `period` price changes, i.e. period + 1 samples.
    require_len(series.len(), period + 1)?;

    let mut gains = Vec::with_capacity(series.len() - 1);
    let mut losses = Vec::with_capacity(series.len() - 1);
    for w in series.windows(2) {
        let delta = w[1] - w[0];
        gains.push(if delta > 0.0 { delta } else { 0.0 });
        losses.push(if delta < 0.0 { -delta } else { 0.0 });
    }

    let mut out = vec![NEUTRAL; period - 1];
    for i in (period - 1)..gains.len() {
        let avg_gain: f64 = gains[i + 1 - period..=i].iter().sum::<f64>() / period as f64;
        let mut avg_loss: f64 = losses[i + 1 - period..=i].iter().sum::<f64>() / period as f64;
        if avg_loss == 0.0 {
            avg_loss = LOSS_FLOOR;
        }
        let rs = avg_gain / avg_loss;
        out.push(100.0 - 100.0 / (1.0 + rs));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_length_is_input_minus_one() {
        let series: Vec<f64> = (0..30).map(|i| 100.0 + (i % 5) as f64).collect();
        let out = rsi(&series, 14).unwrap();
        assert_eq!(out.len(), series.len() - 1);
    }

    #[test]
    fn warmup_entries_are_neutral() {
        let series: Vec<f64> = (0..30).map(|i| 100.0 + (i % 5) as f64).collect();
        let out = rsi(&series, 14).unwrap();
        for i in 0..13 {
            assert!((out[i] - 50.0).abs() < f64::EPSILON, "entry {i} not neutral");
        }
    }

    #[test]
    fn monotonic_rise_drives_rsi_toward_100() {
        let series: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&series, 14).unwrap();
        // All gains, floored loss: RS is enormous, RSI essentially 100.
        assert!(*out.last().unwrap() > 99.9);
    }

    #[test]
    fn monotonic_fall_drives_rsi_toward_0() {
        let series: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let out = rsi(&series, 14).unwrap();
        assert!(*out.last().unwrap() < 0.1);
    }

    #[test]
    fn all_outputs_within_bounds() {
        let series: Vec<f64> = (0..60)
            .map(|i| 100.0 + ((i * 7) % 11) as f64 - 5.0)
            .collect();
        let out = rsi(&series, 14).unwrap();
        for v in out {
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }

    #[test]
    fn simple_average_not_wilder() {
        // Hand-computed with a plain 3-sample average of gains/losses.
        // Deltas of [1, -2, 3, -1]: gains [1, 0, 3, 0], losses [0, 2, 0, 1].
        let series = [10.0, 11.0, 9.0, 12.0, 11.0];
        let out = rsi(&series, 3).unwrap();
        assert_eq!(out.len(), 4);
        assert!((out[0] - 50.0).abs() < f64::EPSILON);
        assert!((out[1] - 50.0).abs() < f64::EPSILON);

        // Window [1, 0, 3] vs [0, 2, 0]: RS = (4/3)/(2/3) = 2.
        let expected_2 = 100.0 - 100.0 / (1.0 + 2.0);
        assert!((out[2] - expected_2).abs() < 1e-9);

        // Window [0, 3, 0] vs [2, 0, 1]: RS = 1.
        assert!((out[3] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn requires_period_plus_one_samples() {
        let err = rsi(&[1.0; 14], 14).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                required: 15,
                actual: 14
            }
        );
    }
}
