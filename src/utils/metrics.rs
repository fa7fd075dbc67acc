//! Training-set accuracy measures.

use crate::error::{Result, SweepError};
use crate::utils::stats::{autocorrelation, mean};

/// In-sample accuracy of a fitted model.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingAccuracy {
    /// Mean Error
    pub me: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Percentage Error (None if zeros in actual)
    pub mpe: Option<f64>,
    /// Mean Absolute Percentage Error (None if zeros in actual)
    pub mape: Option<f64>,
    /// Mean Absolute Scaled Error (None if insufficient data)
    pub mase: Option<f64>,
    /// Lag-1 autocorrelation of the residuals
    pub acf1: Option<f64>,
}

/// Calculate accuracy measures from actual values and residuals.
///
/// Positions where either the actual value or the residual is missing
/// (NaN) are skipped, so fits with undefined leading residuals still
/// produce measures.
///
/// # Arguments
/// * `actual` - Observed training values
/// * `residuals` - Residuals (actual - fitted), aligned with `actual`
/// * `seasonal_period` - Lag of the naive forecast used to scale MASE
pub fn training_accuracy(
    actual: &[f64],
    residuals: &[f64],
    seasonal_period: usize,
) -> Result<TrainingAccuracy> {
    if actual.len() != residuals.len() {
        return Err(SweepError::DimensionMismatch {
            expected: actual.len(),
            got: residuals.len(),
        });
    }

    let pairs: Vec<(f64, f64)> = actual
        .iter()
        .zip(residuals.iter())
        .filter(|(a, r)| a.is_finite() && r.is_finite())
        .map(|(&a, &r)| (a, r))
        .collect();
    if pairs.is_empty() {
        return Err(SweepError::EmptyData);
    }

    let errors: Vec<f64> = pairs.iter().map(|&(_, r)| r).collect();
    let n = errors.len() as f64;

    let me = mean(&errors);
    let rmse = (errors.iter().map(|e| e * e).sum::<f64>() / n).sqrt();
    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;

    // Percentage errors only if no zeros in actual
    let (mpe, mape) = if pairs.iter().any(|&(a, _)| a == 0.0) {
        (None, None)
    } else {
        let pe: Vec<f64> = pairs.iter().map(|&(a, r)| 100.0 * r / a).collect();
        (
            Some(mean(&pe)),
            Some(pe.iter().map(|p| p.abs()).sum::<f64>() / n),
        )
    };

    let mase = naive_scale(actual, seasonal_period.max(1)).map(|scale| mae / scale);
    let acf1 = autocorrelation(&errors, 1);

    Ok(TrainingAccuracy {
        me,
        rmse,
        mae,
        mpe,
        mape,
        mase,
        acf1,
    })
}

/// MAE of the in-sample (seasonal) naive forecast.
fn naive_scale(actual: &[f64], period: usize) -> Option<f64> {
    if actual.len() <= period {
        return None;
    }

    let diffs: Vec<f64> = actual
        .iter()
        .skip(period)
        .zip(actual.iter())
        .map(|(curr, prev)| (curr - prev).abs())
        .filter(|d| d.is_finite())
        .collect();
    if diffs.is_empty() {
        return None;
    }

    let scale = mean(&diffs);
    if scale == 0.0 {
        return None;
    }
    Some(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_fit_has_zero_error() {
        let acc = training_accuracy(&[1.0, 2.0, 3.0, 4.0], &[0.0; 4], 1).unwrap();
        assert_relative_eq!(acc.me, 0.0);
        assert_relative_eq!(acc.rmse, 0.0);
        assert_relative_eq!(acc.mae, 0.0);
        assert_relative_eq!(acc.mase.unwrap(), 0.0);
        assert!(acc.acf1.is_none());
    }

    #[test]
    fn known_values() {
        let actual = [10.0, 12.0, 14.0, 16.0, 18.0];
        let residuals = [1.0, -1.0, 1.0, -1.0, 2.0];
        let acc = training_accuracy(&actual, &residuals, 1).unwrap();

        assert_relative_eq!(acc.me, 0.4, epsilon = 1e-12);
        assert_relative_eq!(acc.mae, 1.2, epsilon = 1e-12);
        assert_relative_eq!(acc.rmse, (8.0_f64 / 5.0).sqrt(), epsilon = 1e-12);
        // naive scale is 2.0
        assert_relative_eq!(acc.mase.unwrap(), 0.6, epsilon = 1e-12);

        let expected_mpe =
            (100.0 / 10.0 - 100.0 / 12.0 + 100.0 / 14.0 - 100.0 / 16.0 + 200.0 / 18.0) / 5.0;
        assert_relative_eq!(acc.mpe.unwrap(), expected_mpe, epsilon = 1e-12);
        assert!(acc.mape.unwrap() > acc.mpe.unwrap());
    }

    #[test]
    fn percentage_errors_undefined_with_zero_actuals() {
        let acc = training_accuracy(&[0.0, 1.0, 2.0], &[0.1, 0.1, 0.1], 1).unwrap();
        assert!(acc.mpe.is_none());
        assert!(acc.mape.is_none());
    }

    #[test]
    fn missing_residuals_are_skipped() {
        let acc = training_accuracy(&[1.0, 2.0, 3.0], &[f64::NAN, 0.5, 0.5], 1).unwrap();
        assert_relative_eq!(acc.me, 0.5);
    }

    #[test]
    fn mase_requires_more_than_one_season() {
        let acc = training_accuracy(&[1.0, 2.0, 3.0, 4.0], &[0.1; 4], 4).unwrap();
        assert!(acc.mase.is_none());
    }

    #[test]
    fn dimension_mismatch_and_empty() {
        assert!(matches!(
            training_accuracy(&[1.0, 2.0], &[1.0], 1),
            Err(SweepError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            training_accuracy(&[], &[], 1),
            Err(SweepError::EmptyData)
        ));
        assert!(matches!(
            training_accuracy(&[f64::NAN], &[1.0], 1),
            Err(SweepError::EmptyData)
        ));
    }
}
