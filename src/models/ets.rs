//! ETS (Error-Trend-Seasonal) state-space fit snapshot.

use super::fit::impl_in_sample;
use super::{Coefficient, InSample, StateComponents};
use crate::core::TimeSeries;
use crate::error::{Result, SweepError};

/// Error component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorType {
    /// Additive errors
    #[default]
    Additive,
    /// Multiplicative errors
    Multiplicative,
}

/// Trend component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendType {
    /// No trend
    #[default]
    None,
    /// Additive trend
    Additive,
    /// Additive damped trend
    AdditiveDamped,
    /// Multiplicative trend
    Multiplicative,
    /// Multiplicative damped trend
    MultiplicativeDamped,
}

/// Seasonal component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonalType {
    /// No seasonality
    #[default]
    None,
    /// Additive seasonality
    Additive,
    /// Multiplicative seasonality
    Multiplicative,
}

/// ETS model specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ETSSpec {
    pub error: ErrorType,
    pub trend: TrendType,
    pub seasonal: SeasonalType,
}

impl ETSSpec {
    /// Create a new ETS specification.
    pub fn new(error: ErrorType, trend: TrendType, seasonal: SeasonalType) -> Self {
        Self {
            error,
            trend,
            seasonal,
        }
    }

    /// ETS(A,N,N) - Simple exponential smoothing with additive errors.
    pub fn ann() -> Self {
        Self::new(ErrorType::Additive, TrendType::None, SeasonalType::None)
    }

    /// ETS(A,A,N) - Holt's linear method with additive errors.
    pub fn aan() -> Self {
        Self::new(ErrorType::Additive, TrendType::Additive, SeasonalType::None)
    }

    /// ETS(A,A,A) - Holt-Winters additive.
    pub fn aaa() -> Self {
        Self::new(
            ErrorType::Additive,
            TrendType::Additive,
            SeasonalType::Additive,
        )
    }

    /// Parse a method string such as `ETS(M,Ad,A)`.
    pub fn parse(method: &str) -> Result<Self> {
        let inner = method
            .trim()
            .strip_prefix("ETS(")
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(|| SweepError::malformed(format!("not an ETS method string: '{method}'")))?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let [e, t, s] = parts.as_slice() else {
            return Err(SweepError::malformed(format!(
                "ETS method needs three components: '{method}'"
            )));
        };

        let error = match *e {
            "A" => ErrorType::Additive,
            "M" => ErrorType::Multiplicative,
            other => return Err(SweepError::malformed(format!("unknown ETS error '{other}'"))),
        };
        let trend = match *t {
            "N" => TrendType::None,
            "A" => TrendType::Additive,
            "Ad" => TrendType::AdditiveDamped,
            "M" => TrendType::Multiplicative,
            "Md" => TrendType::MultiplicativeDamped,
            other => return Err(SweepError::malformed(format!("unknown ETS trend '{other}'"))),
        };
        let seasonal = match *s {
            "N" => SeasonalType::None,
            "A" => SeasonalType::Additive,
            "M" => SeasonalType::Multiplicative,
            other => {
                return Err(SweepError::malformed(format!(
                    "unknown ETS season '{other}'"
                )))
            }
        };
        Ok(Self::new(error, trend, seasonal))
    }

    /// Get a short name for this specification.
    pub fn short_name(&self) -> String {
        let e = match self.error {
            ErrorType::Additive => "A",
            ErrorType::Multiplicative => "M",
        };
        let t = match self.trend {
            TrendType::None => "N",
            TrendType::Additive => "A",
            TrendType::AdditiveDamped => "Ad",
            TrendType::Multiplicative => "M",
            TrendType::MultiplicativeDamped => "Md",
        };
        let s = match self.seasonal {
            SeasonalType::None => "N",
            SeasonalType::Additive => "A",
            SeasonalType::Multiplicative => "M",
        };
        format!("ETS({},{},{})", e, t, s)
    }

    /// Check if this model has a trend component.
    pub fn has_trend(&self) -> bool {
        !matches!(self.trend, TrendType::None)
    }

    /// Check if this model has a seasonal component.
    pub fn has_seasonal(&self) -> bool {
        !matches!(self.seasonal, SeasonalType::None)
    }

    /// Check if this model has damping.
    pub fn is_damped(&self) -> bool {
        matches!(
            self.trend,
            TrendType::AdditiveDamped | TrendType::MultiplicativeDamped
        )
    }
}

/// Fitted ETS model.
#[derive(Debug, Clone, PartialEq)]
pub struct EtsFit {
    spec: ETSSpec,
    seasonal_period: usize,
    /// Level smoothing parameter.
    alpha: f64,
    /// Trend smoothing parameter.
    beta: Option<f64>,
    /// Seasonal smoothing parameter.
    gamma: Option<f64>,
    /// Damping parameter.
    phi: Option<f64>,
    initial_level: f64,
    initial_slope: Option<f64>,
    initial_seasonal: Vec<f64>,
    /// Residual variance.
    sigma2: f64,
    log_likelihood: Option<f64>,
    aic: Option<f64>,
    aicc: Option<f64>,
    bic: Option<f64>,
    states: Option<StateComponents>,
    data: InSample,
}

impl_in_sample!(EtsFit);

impl EtsFit {
    pub fn new(
        spec: ETSSpec,
        series: TimeSeries,
        alpha: f64,
        initial_level: f64,
        sigma2: f64,
    ) -> Self {
        Self {
            spec,
            seasonal_period: 1,
            alpha,
            beta: None,
            gamma: None,
            phi: None,
            initial_level,
            initial_slope: None,
            initial_seasonal: Vec::new(),
            sigma2,
            log_likelihood: None,
            aic: None,
            aicc: None,
            bic: None,
            states: None,
            data: InSample::new(series),
        }
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn with_phi(mut self, phi: f64) -> Self {
        self.phi = Some(phi);
        self
    }

    pub fn with_initial_slope(mut self, slope: f64) -> Self {
        self.initial_slope = Some(slope);
        self
    }

    /// Initial seasonal states `s0..s{m-1}`; also sets the seasonal period.
    pub fn with_initial_seasonal(mut self, seasonal: Vec<f64>) -> Self {
        self.seasonal_period = seasonal.len().max(1);
        self.initial_seasonal = seasonal;
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

    pub fn with_states(mut self, states: StateComponents) -> Self {
        self.states = Some(states);
        self
    }

    pub fn spec(&self) -> ETSSpec {
        self.spec
    }

    pub fn seasonal_period(&self) -> usize {
        self.seasonal_period
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

    pub fn states(&self) -> Option<&StateComponents> {
        self.states.as_ref()
    }

    pub fn description(&self) -> String {
        self.spec.short_name()
    }

    /// Smoothing parameters then initial states, checked against the spec.
    pub(crate) fn parameters(&self) -> Result<Vec<Coefficient>> {
        let method = self.spec.short_name();
        let require = |present: bool, name: &str| -> Result<()> {
            if present {
                Ok(())
            } else {
                Err(SweepError::malformed(format!("{method}: missing '{name}'")))
            }
        };

        let mut params = vec![Coefficient::new("alpha", self.alpha)];
        if self.spec.has_trend() {
            require(self.beta.is_some(), "beta")?;
            require(self.initial_slope.is_some(), "b")?;
        }
        if self.spec.has_seasonal() {
            require(self.gamma.is_some(), "gamma")?;
            require(!self.initial_seasonal.is_empty(), "s0")?;
        }
        if self.spec.is_damped() {
            require(self.phi.is_some(), "phi")?;
        }

        for (name, value) in [("beta", self.beta), ("gamma", self.gamma), ("phi", self.phi)] {
            if let Some(v) = value {
                params.push(Coefficient::new(name, v));
            }
        }
        params.push(Coefficient::new("l", self.initial_level));
        if let Some(b) = self.initial_slope {
            params.push(Coefficient::new("b", b));
        }
        params.extend(
            self.initial_seasonal
                .iter()
                .enumerate()
                .map(|(i, &s)| Coefficient::new(format!("s{i}"), s)),
        );
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> TimeSeries {
        TimeSeries::new(vec![1.0, 2.0, 3.0, 4.0])
    }

    #[test]
    fn short_name_round_trips_through_parse() {
        for spec in [
            ETSSpec::ann(),
            ETSSpec::aan(),
            ETSSpec::new(ErrorType::Additive, TrendType::AdditiveDamped, SeasonalType::None),
            ETSSpec::aaa(),
            ETSSpec::new(
                ErrorType::Multiplicative,
                TrendType::Additive,
                SeasonalType::Multiplicative,
            ),
        ] {
            assert_eq!(ETSSpec::parse(&spec.short_name()).unwrap(), spec);
        }
        let md = ETSSpec::parse("ETS(M,Md,N)").unwrap();
        assert!(md.is_damped());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(ETSSpec::parse("ARIMA(1,0,0)").is_err());
        assert!(ETSSpec::parse("ETS(A,N)").is_err());
        assert!(ETSSpec::parse("ETS(X,N,N)").is_err());
    }

    #[test]
    fn parameters_follow_smoothing_then_states() {
        let fit = EtsFit::new(ETSSpec::aaa(), series(), 0.3, 10.0, 1.0)
            .with_beta(0.1)
            .with_gamma(0.05)
            .with_initial_slope(0.5)
            .with_initial_seasonal(vec![1.0, -1.0, 0.5, -0.5]);
        let names: Vec<_> = fit.parameters().unwrap().into_iter().map(|c| c.term).collect();
        assert_eq!(
            names,
            vec!["alpha", "beta", "gamma", "l", "b", "s0", "s1", "s2", "s3"]
        );
        assert_eq!(fit.seasonal_period(), 4);
    }

    #[test]
    fn trend_without_beta_is_malformed() {
        let fit = EtsFit::new(ETSSpec::aan(), series(), 0.3, 10.0, 1.0).with_initial_slope(0.5);
        assert_eq!(
            fit.parameters().unwrap_err(),
            SweepError::MalformedInput("ETS(A,A,N): missing 'beta'".to_string())
        );
    }
}
