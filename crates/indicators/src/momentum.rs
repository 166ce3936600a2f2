//! Momentum: value[i] − value[i − period].
//!
//! Entries before index `period` are flat-filled with the value at index
//! `period` rather than left undefined, so slope checks near the start of
//! a window see a constant rather than garbage.

use crate::error::{require_len, require_period, IndicatorError};

pub fn momentum(series: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    require_period(period)?;
    require_len(series.len(), period + 1)?;

    let mut out = vec![0.0; series.len()];
    for i in period..series.len() {
        out[i] = series[i] - series[i - period];
    }
    let fill = out[period];
    for v in out.iter_mut().take(period) {
        *v = fill;
    }

    Ok(out)
}
