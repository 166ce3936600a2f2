//! Rolling-window helpers shared by the indicator implementations.
//!
//! All helpers return a vector the same length as the input with the first
//! `window - 1` entries set to NaN. A NaN anywhere inside a window
//! propagates into that window's output, matching how the smoothed
//! stochastic lines inherit the warmup of their raw %K input.

/// Rolling arithmetic mean.
pub(crate) fn rolling_mean(series: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(series, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Rolling sample standard deviation (n-1 divisor).
pub(crate) fn rolling_std(series: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(series, window, |w| {
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let var = w.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (w.len() - 1) as f64;
        var.sqrt()
    })
}

/// Rolling minimum.
pub(crate) fn rolling_min(series: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(series, window, |w| w.iter().copied().fold(f64::NAN, nan_min))
}

/// Rolling maximum.
pub(crate) fn rolling_max(series: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(series, window, |w| w.iter().copied().fold(f64::NAN, nan_max))
}

fn rolling_apply(series: &[f64], window: usize, f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    debug_assert!(window >= 1);
    let mut out = vec![f64::NAN; series.len()];
    if window > series.len() {
        return out;
    }
    for i in (window - 1)..series.len() {
        let slice = &series[i + 1 - window..=i];
        // Any NaN inside the window poisons the output point.
        if slice.iter().any(|x| x.is_nan()) {
            continue;
        }
        out[i] = f(slice);
    }
    out
}

fn nan_min(acc: f64, x: f64) -> f64 {
    if acc.is_nan() || x < acc { x } else { acc }
}

fn nan_max(acc: f64, x: f64) -> f64 {
    if acc.is_nan() || x > acc { x } else { acc }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_pads_warmup_with_nan() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!((out[2] - 2.0).abs() < f64::EPSILON);
        assert!((out[3] - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn std_is_sample_std() {
        // Sample std of [2, 4, 4, 4, 5, 5, 7, 9] over the full window.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let out = rolling_std(&data, 8);
        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((out[7] - expected).abs() < 1e-12);
    }

    #[test]
    fn min_max_track_the_window() {
        let data = [5.0, 1.0, 4.0, 2.0, 8.0];
        let mins = rolling_min(&data, 3);
        let maxs = rolling_max(&data, 3);
        assert!((mins[2] - 1.0).abs() < f64::EPSILON);
        assert!((maxs[2] - 5.0).abs() < f64::EPSILON);
        assert!((mins[4] - 2.0).abs() < f64::EPSILON);
        assert!((maxs[4] - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn nan_input_poisons_only_overlapping_windows() {
        let data = [1.0, f64::NAN, 3.0, 4.0, 5.0];
        let out = rolling_mean(&data, 2);
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
        assert!((out[3] - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn window_longer_than_series_is_all_nan() {
        let out = rolling_mean(&[1.0, 2.0], 5);
        assert!(out.iter().all(|x| x.is_nan()));
    }
}
