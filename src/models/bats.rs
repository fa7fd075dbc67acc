//! BATS and TBATS fit snapshots.
//!
//! Both share one struct: BATS carries one `gamma` per seasonal period,
//! TBATS carries a cosine and a sine smoothing parameter per period plus
//! the number of Fourier harmonics.

use super::fit::impl_in_sample;
use super::{Coefficient, InSample, StateComponents};
use crate::core::TimeSeries;
use crate::error::{Result, SweepError};

/// Fitted BATS/TBATS model.
#[derive(Debug, Clone, PartialEq)]
pub struct BatsFit {
    trigonometric: bool,
    /// Box-Cox lambda (None = no transformation).
    lambda: Option<f64>,
    /// Level smoothing parameter.
    alpha: f64,
    /// Trend smoothing parameter (None = no trend).
    beta: Option<f64>,
    /// Damping parameter (None = undamped).
    damping: Option<f64>,
    /// BATS seasonal smoothing, one per period.
    gamma: Vec<f64>,
    /// TBATS cosine smoothing, one per period.
    gamma_one: Vec<f64>,
    /// TBATS sine smoothing, one per period.
    gamma_two: Vec<f64>,
    ar: Vec<f64>,
    ma: Vec<f64>,
    seasonal_periods: Vec<f64>,
    /// Fourier harmonics per period (TBATS only).
    fourier_k: Vec<usize>,
    variance: f64,
    likelihood: Option<f64>,
    aic: Option<f64>,
    states: Option<StateComponents>,
    data: InSample,
}

impl_in_sample!(BatsFit);

impl BatsFit {
    fn base(trigonometric: bool, alpha: f64, variance: f64, series: TimeSeries) -> Self {
        Self {
            trigonometric,
            lambda: None,
            alpha,
            beta: None,
            damping: None,
            gamma: Vec::new(),
            gamma_one: Vec::new(),
            gamma_two: Vec::new(),
            ar: Vec::new(),
            ma: Vec::new(),
            seasonal_periods: Vec::new(),
            fourier_k: Vec::new(),
            variance,
            likelihood: None,
            aic: None,
            states: None,
            data: InSample::new(series),
        }
    }

    pub fn bats(series: TimeSeries, alpha: f64, variance: f64) -> Self {
        Self::base(false, alpha, variance, series)
    }

    pub fn tbats(series: TimeSeries, alpha: f64, variance: f64) -> Self {
        Self::base(true, alpha, variance, series)
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = Some(lambda);
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    pub fn with_damping(mut self, phi: f64) -> Self {
        self.damping = Some(phi);
        self
    }

    /// BATS seasonal smoothing parameters.
    pub fn with_gamma(mut self, gamma: Vec<f64>) -> Self {
        self.gamma = gamma;
        self
    }

    /// TBATS cosine and sine smoothing parameters.
    pub fn with_trig_gamma(mut self, gamma_one: Vec<f64>, gamma_two: Vec<f64>) -> Self {
        self.gamma_one = gamma_one;
        self.gamma_two = gamma_two;
        self
    }

    pub fn with_arma(mut self, ar: Vec<f64>, ma: Vec<f64>) -> Self {
        self.ar = ar;
        self.ma = ma;
        self
    }

    /// Seasonal periods and, for TBATS, the harmonics per period.
    pub fn with_seasonal_periods(mut self, periods: Vec<f64>, fourier_k: Vec<usize>) -> Self {
        self.seasonal_periods = periods;
        self.fourier_k = fourier_k;
        self
    }

    pub fn with_likelihood(mut self, likelihood: f64, aic: f64) -> Self {
        self.likelihood = Some(likelihood);
        self.aic = Some(aic);
        self
    }

    pub fn with_states(mut self, states: StateComponents) -> Self {
        self.states = Some(states);
        self
    }

    pub fn is_trigonometric(&self) -> bool {
        self.trigonometric
    }

    pub fn lambda(&self) -> Option<f64> {
        self.lambda
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn likelihood(&self) -> Option<f64> {
        self.likelihood
    }

    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    pub fn states(&self) -> Option<&StateComponents> {
        self.states.as_ref()
    }

    fn class(&self) -> &'static str {
        if self.trigonometric {
            "tbats"
        } else {
            "bats"
        }
    }

    /// Description in the usual `BATS(omega, {p,q}, phi, {m})` form.
    pub fn description(&self) -> String {
        let omega = self
            .lambda
            .map(|l| format!("{}", (l * 1000.0).round() / 1000.0))
            .unwrap_or_else(|| "1".to_string());
        let phi = self
            .damping
            .map(|d| format!("{}", (d * 1000.0).round() / 1000.0))
            .unwrap_or_else(|| "-".to_string());
        let seasons = if self.seasonal_periods.is_empty() {
            "-".to_string()
        } else if self.trigonometric {
            let parts: Vec<String> = self
                .seasonal_periods
                .iter()
                .zip(self.fourier_k.iter())
                .map(|(m, k)| format!("<{m},{k}>"))
                .collect();
            format!("{{{}}}", parts.join(", "))
        } else {
            let parts: Vec<String> = self.seasonal_periods.iter().map(|m| m.to_string()).collect();
            format!("{{{}}}", parts.join(","))
        };
        let name = if self.trigonometric { "TBATS" } else { "BATS" };
        format!(
            "{name}({omega}, {{{},{}}}, {phi}, {seasons})",
            self.ar.len(),
            self.ma.len()
        )
    }

    /// Estimated parameters; absent ones produce no row.
    pub(crate) fn parameters(&self) -> Result<Vec<Coefficient>> {
        let periods = self.seasonal_periods.len();
        let gamma_lengths: Vec<usize> = if self.trigonometric {
            vec![self.gamma_one.len(), self.gamma_two.len()]
        } else {
            vec![self.gamma.len()]
        };
        if gamma_lengths.iter().any(|&len| len != 0 && len != periods) {
            return Err(SweepError::malformed(format!(
                "{}: smoothing parameters do not match {periods} seasonal periods",
                self.class()
            )));
        }
        if self.trigonometric && self.fourier_k.len() != periods {
            return Err(SweepError::malformed(format!(
                "tbats: {} harmonic counts for {periods} seasonal periods",
                self.fourier_k.len()
            )));
        }

        let mut params = Vec::new();
        let mut push = |name: &str, values: &[f64]| match values {
            [] => {}
            [single] => params.push(Coefficient::new(name, *single)),
            many => params.extend(
                many.iter()
                    .enumerate()
                    .map(|(i, &v)| Coefficient::new(format!("{name}{}", i + 1), v)),
            ),
        };

        push("lambda", self.lambda.as_slice());
        push("alpha", &[self.alpha]);
        push("beta", self.beta.as_slice());
        push("damping.parameter", self.damping.as_slice());
        if self.trigonometric {
            push("gamma.one.values", &self.gamma_one);
            push("gamma.two.values", &self.gamma_two);
        } else {
            push("gamma.values", &self.gamma);
        }
        push("ar.coefficients", &self.ar);
        push("ma.coefficients", &self.ma);
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> TimeSeries {
        TimeSeries::new(vec![1.0, 2.0, 3.0])
    }

    #[test]
    fn bats_description_and_parameters() {
        let fit = BatsFit::bats(series(), 0.8, 2.0)
            .with_lambda(0.1234)
            .with_gamma(vec![0.01])
            .with_seasonal_periods(vec![12.0], vec![]);
        assert_eq!(fit.description(), "BATS(0.123, {0,0}, -, {12})");

        let names: Vec<_> = fit.parameters().unwrap().into_iter().map(|c| c.term).collect();
        assert_eq!(names, vec!["lambda", "alpha", "gamma.values"]);
    }

    #[test]
    fn tbats_expands_multi_valued_parameters() {
        let fit = BatsFit::tbats(series(), 0.5, 1.0)
            .with_beta(0.1)
            .with_damping(0.95)
            .with_trig_gamma(vec![0.01, 0.02], vec![0.03, 0.04])
            .with_arma(vec![0.4], vec![])
            .with_seasonal_periods(vec![7.0, 365.25], vec![2, 5]);

        assert_eq!(
            fit.description(),
            "TBATS(1, {1,0}, 0.95, {<7,2>, <365.25,5>})"
        );

        let names: Vec<_> = fit.parameters().unwrap().into_iter().map(|c| c.term).collect();
        assert_eq!(
            names,
            vec![
                "alpha",
                "beta",
                "damping.parameter",
                "gamma.one.values1",
                "gamma.one.values2",
                "gamma.two.values1",
                "gamma.two.values2",
                "ar.coefficients",
            ]
        );
    }

    #[test]
    fn mismatched_gamma_is_malformed() {
        let fit = BatsFit::bats(series(), 0.5, 1.0)
            .with_gamma(vec![0.1, 0.2])
            .with_seasonal_periods(vec![12.0], vec![]);
        assert!(matches!(fit.parameters(), Err(SweepError::MalformedInput(_))));
    }
}
