//! ARIMA (Autoregressive Integrated Moving Average) fit snapshot.

use super::fit::impl_in_sample;
use super::{Coefficient, InSample};
use crate::core::TimeSeries;
use crate::error::{Result, SweepError};
use std::fmt;

/// ARIMA model order, including the optional seasonal part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArimaOrder {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
    /// Seasonal AR order (P)
    pub seasonal_p: usize,
    /// Seasonal differencing order (D)
    pub seasonal_d: usize,
    /// Seasonal MA order (Q)
    pub seasonal_q: usize,
    /// Seasonal period (m)
    pub period: usize,
}

impl ArimaOrder {
    /// Create a non-seasonal order.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self {
            p,
            d,
            q,
            ..Self::default()
        }
    }

    /// Add a seasonal part `(P, D, Q)[m]`.
    pub fn with_seasonal(mut self, p: usize, d: usize, q: usize, period: usize) -> Self {
        self.seasonal_p = p;
        self.seasonal_d = d;
        self.seasonal_q = q;
        self.period = period;
        self
    }

    pub fn is_seasonal(&self) -> bool {
        self.period > 1 && (self.seasonal_p + self.seasonal_d + self.seasonal_q) > 0
    }

    /// Number of ARMA coefficients implied by the order.
    pub fn num_arma_terms(&self) -> usize {
        self.p + self.q + self.seasonal_p + self.seasonal_q
    }
}

impl fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)?;
        if self.is_seasonal() {
            write!(
                f,
                "({},{},{})[{}]",
                self.seasonal_p, self.seasonal_d, self.seasonal_q, self.period
            )?;
        }
        Ok(())
    }
}

/// Fitted ARIMA model.
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaFit {
    order: ArimaOrder,
    /// Coefficients in estimation order.
    coefficients: Vec<Coefficient>,
    /// Standard errors aligned with `coefficients`.
    std_errors: Option<Vec<f64>>,
    /// Innovation variance.
    sigma2: f64,
    log_likelihood: Option<f64>,
    aic: Option<f64>,
    aicc: Option<f64>,
    bic: Option<f64>,
    data: InSample,
}

impl_in_sample!(ArimaFit);

impl ArimaFit {
    /// Create a fit with no coefficients yet.
    pub fn new(order: ArimaOrder, series: TimeSeries, sigma2: f64) -> Self {
        Self {
            order,
            coefficients: Vec::new(),
            std_errors: None,
            sigma2,
            log_likelihood: None,
            aic: None,
            aicc: None,
            bic: None,
            data: InSample::new(series),
        }
    }

    fn push_numbered(mut self, prefix: &str, values: &[f64]) -> Self {
        self.coefficients.extend(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| Coefficient::new(format!("{prefix}{}", i + 1), v)),
        );
        self
    }

    /// AR coefficients, named `ar1..arp`.
    pub fn with_ar(self, ar: &[f64]) -> Self {
        self.push_numbered("ar", ar)
    }

    /// MA coefficients, named `ma1..maq`.
    pub fn with_ma(self, ma: &[f64]) -> Self {
        self.push_numbered("ma", ma)
    }

    /// Seasonal AR coefficients, named `sar1..`.
    pub fn with_seasonal_ar(self, sar: &[f64]) -> Self {
        self.push_numbered("sar", sar)
    }

    /// Seasonal MA coefficients, named `sma1..`.
    pub fn with_seasonal_ma(self, sma: &[f64]) -> Self {
        self.push_numbered("sma", sma)
    }

    pub fn with_intercept(mut self, intercept: f64) -> Self {
        self.coefficients.push(Coefficient::new("intercept", intercept));
        self
    }

    pub fn with_drift(mut self, drift: f64) -> Self {
        self.coefficients.push(Coefficient::new("drift", drift));
        self
    }

    /// Any other named coefficient, e.g. a regressor.
    pub fn with_coefficient(mut self, coefficient: Coefficient) -> Self {
        self.coefficients.push(coefficient);
        self
    }

    /// Standard errors in coefficient order (square roots of the
    /// diagonal of the coefficient covariance matrix).
    pub fn with_std_errors(mut self, std_errors: Vec<f64>) -> Self {
        self.std_errors = Some(std_errors);
        self
    }

    pub fn with_information_criteria(
        mut self,
        log_likelihood: f64,
        aic: f64,
        aicc: Option<f64>,
        bic: f64,
    ) -> Self {
        self.log_likelihood = Some(log_likelihood);
        self.aic = Some(aic);
        self.aicc = aicc;
        self.bic = Some(bic);
        self
    }

    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    pub fn log_likelihood(&self) -> Option<f64> {
        self.log_likelihood
    }

    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    pub fn aicc(&self) -> Option<f64> {
        self.aicc
    }

    pub fn bic(&self) -> Option<f64> {
        self.bic
    }

    pub fn coefficients(&self) -> &[Coefficient] {
        &self.coefficients
    }

    /// Coefficients with standard errors merged in.
    pub(crate) fn terms(&self) -> Result<Vec<Coefficient>> {
        let Some(std_errors) = &self.std_errors else {
            return Ok(self.coefficients.clone());
        };
        if std_errors.len() != self.coefficients.len() {
            return Err(SweepError::malformed(format!(
                "Arima: {} standard errors for {} coefficients",
                std_errors.len(),
                self.coefficients.len()
            )));
        }
        Ok(self
            .coefficients
            .iter()
            .zip(std_errors)
            .map(|(c, &se)| Coefficient {
                std_error: se.is_finite().then_some(se),
                ..c.clone()
            })
            .collect())
    }

    fn has_term(&self, term: &str) -> bool {
        self.coefficients.iter().any(|c| c.term == term)
    }

    /// Human-readable model description, e.g. `ARIMA(2,0,1) with non-zero mean`.
    pub fn description(&self) -> String {
        let base = self.order.to_string();
        if self.has_term("drift") {
            format!("{base} with drift")
        } else if self.has_term("intercept") {
            format!("{base} with non-zero mean")
        } else if self.order.d == 0 && self.order.seasonal_d == 0 {
            format!("{base} with zero mean")
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit() -> ArimaFit {
        ArimaFit::new(
            ArimaOrder::new(2, 0, 1),
            TimeSeries::new(vec![1.0, 2.0, 3.0]),
            0.5,
        )
        .with_ar(&[0.5, -0.2])
        .with_ma(&[0.3])
    }

    #[test]
    fn numbered_terms_follow_order() {
        let terms: Vec<_> = fit().coefficients().iter().map(|c| c.term.clone()).collect();
        assert_eq!(terms, vec!["ar1", "ar2", "ma1"]);
    }

    #[test]
    fn description_reflects_mean_terms() {
        assert_eq!(fit().description(), "ARIMA(2,0,1) with zero mean");
        assert_eq!(
            fit().with_intercept(10.0).description(),
            "ARIMA(2,0,1) with non-zero mean"
        );

        let seasonal = ArimaFit::new(
            ArimaOrder::new(0, 1, 1).with_seasonal(0, 1, 1, 12),
            TimeSeries::new(vec![]),
            1.0,
        );
        assert_eq!(seasonal.description(), "ARIMA(0,1,1)(0,1,1)[12]");
        assert_eq!(
            seasonal.with_drift(0.1).description(),
            "ARIMA(0,1,1)(0,1,1)[12] with drift"
        );
    }

    #[test]
    fn std_errors_merge_into_terms() {
        let terms = fit().with_std_errors(vec![0.1, f64::NAN, 0.2]).terms().unwrap();
        assert_eq!(terms[0].std_error, Some(0.1));
        assert_eq!(terms[1].std_error, None);
        assert_eq!(terms[2].std_error, Some(0.2));
    }

    #[test]
    fn std_error_count_must_match() {
        let result = fit().with_std_errors(vec![0.1]).terms();
        assert!(matches!(result, Err(SweepError::MalformedInput(_))));
    }

    #[test]
    fn order_counts_arma_terms() {
        let order = ArimaOrder::new(2, 1, 1).with_seasonal(1, 0, 1, 4);
        assert_eq!(order.num_arma_terms(), 5);
        assert!(order.is_seasonal());
        assert!(!ArimaOrder::new(1, 0, 0).is_seasonal());
    }
}
