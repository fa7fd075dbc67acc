//! In-sample data shared by every fitted model snapshot.

use crate::core::TimeSeries;
use crate::error::{Result, SweepError};

/// Training series with the model's fitted values and residuals.
///
/// Fitted values may be shorter than the series when the model produces
/// no fit for the first observations; they then align with the end of
/// the series.
#[derive(Debug, Clone, PartialEq)]
pub struct InSample {
    series: TimeSeries,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl InSample {
    pub fn new(series: TimeSeries) -> Self {
        Self {
            series,
            fitted: None,
            residuals: None,
        }
    }

    pub fn with_fitted(mut self, fitted: Vec<f64>) -> Self {
        self.fitted = Some(fitted);
        self
    }

    pub fn with_residuals(mut self, residuals: Vec<f64>) -> Self {
        self.residuals = Some(residuals);
        self
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn fitted(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    pub fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    /// Fitted values and residuals of equal length.
    ///
    /// A missing half is derived from the tail of the training series.
    pub(crate) fn resolved(&self, class: &str) -> Result<(Vec<f64>, Vec<f64>)> {
        let actual = self.series.values();
        match (&self.fitted, &self.residuals) {
            (Some(fitted), Some(residuals)) => {
                if fitted.len() != residuals.len() {
                    return Err(SweepError::malformed(format!(
                        "{class}: {} fitted values but {} residuals",
                        fitted.len(),
                        residuals.len()
                    )));
                }
                Ok((fitted.clone(), residuals.clone()))
            }
            (Some(fitted), None) => {
                let tail = self.tail(fitted.len(), class)?;
                let residuals = tail.iter().zip(fitted).map(|(a, f)| a - f).collect();
                Ok((fitted.clone(), residuals))
            }
            (None, Some(residuals)) => {
                let tail = self.tail(residuals.len(), class)?;
                let fitted = tail.iter().zip(residuals).map(|(a, r)| a - r).collect();
                Ok((fitted, residuals.clone()))
            }
            (None, None) if actual.is_empty() => Err(SweepError::malformed(format!(
                "{class}: no training data"
            ))),
            (None, None) => Err(SweepError::malformed(format!(
                "{class}: neither fitted values nor residuals present"
            ))),
        }
    }

    /// Last `count` training values.
    pub(crate) fn tail(&self, count: usize, class: &str) -> Result<&[f64]> {
        let actual = self.series.values();
        if count > actual.len() {
            return Err(SweepError::malformed(format!(
                "{class}: {count} fitted values for a series of length {}",
                actual.len()
            )));
        }
        Ok(&actual[actual.len() - count..])
    }
}

/// Builder methods and accessors for the in-sample part of a fit.
macro_rules! impl_in_sample {
    ($fit:ty) => {
        impl $fit {
            /// Attach in-sample fitted values.
            pub fn with_fitted(mut self, fitted: Vec<f64>) -> Self {
                self.data = self.data.with_fitted(fitted);
                self
            }

            /// Attach residuals (actual - fitted).
            pub fn with_residuals(mut self, residuals: Vec<f64>) -> Self {
                self.data = self.data.with_residuals(residuals);
                self
            }

            /// Training series.
            pub fn series(&self) -> &$crate::core::TimeSeries {
                self.data.series()
            }

            pub fn in_sample(&self) -> &$crate::models::InSample {
                &self.data
            }
        }
    };
}

pub(crate) use impl_in_sample;
