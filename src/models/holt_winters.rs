//! Holt-Winters fit snapshot.

use super::fit::impl_in_sample;
use super::{Coefficient, InSample};
use crate::core::TimeSeries;
use crate::error::{Result, SweepError};

/// Type of seasonal component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoltWintersSeasonal {
    /// No seasonal component (exponential smoothing or Holt's method).
    None,
    /// Additive seasonality: y_t = l_t + b_t + s_t + e_t
    #[default]
    Additive,
    /// Multiplicative seasonality: y_t = (l_t + b_t) * s_t + e_t
    Multiplicative,
}

/// Fitted Holt-Winters filter.
///
/// Fitted values start after the initialization window, so they are
/// shorter than the training series.
#[derive(Debug, Clone, PartialEq)]
pub struct HoltWintersFit {
    seasonal: HoltWintersSeasonal,
    /// Level smoothing parameter.
    alpha: f64,
    /// Trend smoothing parameter (None = trend disabled).
    beta: Option<f64>,
    /// Seasonal smoothing parameter (None = season disabled).
    gamma: Option<f64>,
    /// Final level.
    a: f64,
    /// Final trend.
    b: Option<f64>,
    /// Final seasonal coefficients.
    s: Vec<f64>,
    /// Sum of squared one-step errors.
    sse: f64,
    data: InSample,
}

impl_in_sample!(HoltWintersFit);

impl HoltWintersFit {
    pub fn new(series: TimeSeries, alpha: f64, level: f64, sse: f64) -> Self {
        Self {
            seasonal: HoltWintersSeasonal::None,
            alpha,
            beta: None,
            gamma: None,
            a: level,
            b: None,
            s: Vec::new(),
            sse,
            data: InSample::new(series),
        }
    }

    /// Enable the trend with smoothing `beta` and final slope `b`.
    pub fn with_trend(mut self, beta: f64, b: f64) -> Self {
        self.beta = Some(beta);
        self.b = Some(b);
        self
    }

    /// Enable the season with smoothing `gamma` and final coefficients.
    pub fn with_season(mut self, seasonal: HoltWintersSeasonal, gamma: f64, s: Vec<f64>) -> Self {
        self.seasonal = seasonal;
        self.gamma = Some(gamma);
        self.s = s;
        self
    }

    pub fn seasonal(&self) -> HoltWintersSeasonal {
        self.seasonal
    }

    pub fn sse(&self) -> f64 {
        self.sse
    }

    /// Residual standard deviation, `sqrt(SSE / n)` over the `n` fitted values.
    pub fn sigma(&self) -> Result<Option<f64>> {
        let (fitted, _) = self.data.resolved("HoltWinters")?;
        if fitted.is_empty() || !self.sse.is_finite() || self.sse < 0.0 {
            return Ok(None);
        }
        Ok(Some((self.sse / fitted.len() as f64).sqrt()))
    }

    pub fn description(&self) -> String {
        let kind = match self.seasonal {
            HoltWintersSeasonal::None if self.beta.is_some() => "trend",
            HoltWintersSeasonal::None => "level",
            HoltWintersSeasonal::Additive => "additive",
            HoltWintersSeasonal::Multiplicative => "multiplicative",
        };
        format!("HoltWinters({kind})")
    }

    /// `alpha`, `beta`, `gamma`, then `a`, `b`, `s1..sm`.
    pub(crate) fn parameters(&self) -> Result<Vec<Coefficient>> {
        let seasonal = self.seasonal != HoltWintersSeasonal::None;
        if seasonal && (self.gamma.is_none() || self.s.is_empty()) {
            return Err(SweepError::malformed(
                "HoltWinters: seasonal filter without seasonal coefficients",
            ));
        }

        let mut params = vec![Coefficient::new("alpha", self.alpha)];
        if let Some(beta) = self.beta {
            params.push(Coefficient::new("beta", beta));
        }
        if let Some(gamma) = self.gamma {
            params.push(Coefficient::new("gamma", gamma));
        }
        params.push(Coefficient::new("a", self.a));
        if let Some(b) = self.b {
            params.push(Coefficient::new("b", b));
        }
        params.extend(
            self.s
                .iter()
                .enumerate()
                .map(|(i, &s)| Coefficient::new(format!("s{}", i + 1), s)),
        );
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_list_smoothing_then_coefficients() {
        let fit = HoltWintersFit::new(TimeSeries::new(vec![1.0; 8]), 0.4, 10.0, 3.5)
            .with_trend(0.2, 0.5)
            .with_season(HoltWintersSeasonal::Additive, 0.3, vec![1.0, -1.0, 0.5, -0.5]);
        let names: Vec<_> = fit.parameters().unwrap().into_iter().map(|c| c.term).collect();
        assert_eq!(
            names,
            vec!["alpha", "beta", "gamma", "a", "b", "s1", "s2", "s3", "s4"]
        );
        assert_eq!(fit.description(), "HoltWinters(additive)");
    }

    #[test]
    fn sigma_divides_sse_by_fitted_count() {
        let fit = HoltWintersFit::new(TimeSeries::new(vec![1.0; 6]), 0.4, 1.0, 16.0)
            .with_fitted(vec![1.0; 4]);
        assert_eq!(fit.sigma().unwrap(), Some(2.0));

        let unfit = HoltWintersFit::new(TimeSeries::new(vec![1.0; 6]), 0.4, 1.0, f64::NAN)
            .with_fitted(vec![1.0; 4]);
        assert_eq!(unfit.sigma().unwrap(), None);
    }

    #[test]
    fn level_only_filter() {
        let fit = HoltWintersFit::new(TimeSeries::new(vec![1.0; 4]), 0.4, 1.0, 0.1);
        assert_eq!(fit.parameters().unwrap().len(), 2);
        assert_eq!(fit.description(), "HoltWinters(level)");
    }

    #[test]
    fn seasonal_without_coefficients_is_malformed() {
        let fit = HoltWintersFit::new(TimeSeries::new(vec![1.0; 4]), 0.4, 1.0, 0.1)
            .with_season(HoltWintersSeasonal::Multiplicative, 0.2, vec![]);
        assert!(matches!(fit.parameters(), Err(SweepError::MalformedInput(_))));
    }
}
