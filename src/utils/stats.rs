//! Statistical utility functions.

use statrs::distribution::{ContinuousCDF, Normal};

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample autocorrelation at the given lag.
///
/// Returns `None` for series shorter than `lag + 1` or with zero variance.
pub fn autocorrelation(values: &[f64], lag: usize) -> Option<f64> {
    let n = values.len();
    if lag == 0 || n <= lag {
        return None;
    }
    let m = mean(values);
    let denom: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    if denom == 0.0 {
        return None;
    }
    let num: f64 = values
        .iter()
        .skip(lag)
        .zip(values.iter())
        .map(|(curr, prev)| (curr - m) * (prev - m))
        .sum();
    Some(num / denom)
}

/// Two-sided p-value of a z statistic under the standard normal.
pub fn normal_p_value(z: f64) -> Option<f64> {
    if !z.is_finite() {
        return None;
    }
    let normal = Normal::new(0.0, 1.0).ok()?;
    Some(2.0 * (1.0 - normal.cdf(z.abs())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_of_empty_slice_is_nan() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn autocorrelation_of_alternating_series_is_negative() {
        let acf = autocorrelation(&[1.0, -1.0, 1.0, -1.0, 1.0, -1.0], 1).unwrap();
        assert!(acf < -0.8);
    }

    #[test]
    fn autocorrelation_undefined_cases() {
        assert!(autocorrelation(&[1.0], 1).is_none());
        assert!(autocorrelation(&[2.0, 2.0, 2.0], 1).is_none());
        assert!(autocorrelation(&[1.0, 2.0, 3.0], 0).is_none());
    }

    #[test]
    fn normal_p_value_matches_known_quantiles() {
        assert_relative_eq!(normal_p_value(1.959964).unwrap(), 0.05, epsilon = 1e-5);
        assert_relative_eq!(normal_p_value(0.0).unwrap(), 1.0, epsilon = 1e-12);
        assert!(normal_p_value(f64::NAN).is_none());
    }
}
