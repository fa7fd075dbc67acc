//! Basic structural (state-space) model fit snapshot.

use super::fit::impl_in_sample;
use super::{Coefficient, InSample, StateComponents};
use crate::core::TimeSeries;
use crate::error::{Result, SweepError};

/// Structural model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StructTsKind {
    /// Local level model.
    #[default]
    Level,
    /// Local linear trend model.
    Trend,
    /// Basic structural model (trend plus season).
    Bsm,
}

impl StructTsKind {
    pub fn name(&self) -> &'static str {
        match self {
            StructTsKind::Level => "level",
            StructTsKind::Trend => "trend",
            StructTsKind::Bsm => "BSM",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "level" => Some(StructTsKind::Level),
            "trend" => Some(StructTsKind::Trend),
            "BSM" | "bsm" => Some(StructTsKind::Bsm),
            _ => None,
        }
    }

    /// Variance terms the model estimates.
    fn expected_terms(&self) -> &'static [&'static str] {
        match self {
            StructTsKind::Level => &["level", "epsilon"],
            StructTsKind::Trend => &["level", "slope", "epsilon"],
            StructTsKind::Bsm => &["level", "slope", "seas", "epsilon"],
        }
    }
}

/// Fitted structural model.
#[derive(Debug, Clone, PartialEq)]
pub struct StructTsFit {
    kind: StructTsKind,
    /// Estimated variances, keyed by component.
    variances: Vec<Coefficient>,
    log_likelihood: Option<f64>,
    states: Option<StateComponents>,
    data: InSample,
}

impl_in_sample!(StructTsFit);

impl StructTsFit {
    pub fn new(kind: StructTsKind, series: TimeSeries) -> Self {
        Self {
            kind,
            variances: Vec::new(),
            log_likelihood: None,
            states: None,
            data: InSample::new(series),
        }
    }

    /// Add an estimated variance, e.g. `("level", 0.4)`.
    pub fn with_variance(mut self, term: impl Into<String>, value: f64) -> Self {
        self.variances.push(Coefficient::new(term, value));
        self
    }

    pub fn with_log_likelihood(mut self, log_likelihood: f64) -> Self {
        self.log_likelihood = Some(log_likelihood);
        self
    }

    pub fn with_states(mut self, states: StateComponents) -> Self {
        self.states = Some(states);
        self
    }

    pub fn kind(&self) -> StructTsKind {
        self.kind
    }

    pub fn log_likelihood(&self) -> Option<f64> {
        self.log_likelihood
    }

    pub fn states(&self) -> Option<&StateComponents> {
        self.states.as_ref()
    }

    pub fn description(&self) -> String {
        format!("StructTS({})", self.kind.name())
    }

    /// Observation noise standard deviation, when `epsilon` was estimated.
    pub fn sigma(&self) -> Option<f64> {
        self.variances
            .iter()
            .find(|c| c.term == "epsilon")
            .map(|c| c.estimate.sqrt())
    }

    /// Akaike criterion, counting one parameter per estimated variance.
    pub fn aic(&self) -> Option<f64> {
        let k = self.variances.len() as f64;
        self.log_likelihood.map(|ll| -2.0 * ll + 2.0 * k)
    }

    /// Bayesian criterion over the training length.
    pub fn bic(&self) -> Option<f64> {
        let k = self.variances.len() as f64;
        let n = self.data.series().len() as f64;
        self.log_likelihood
            .filter(|_| n > 0.0)
            .map(|ll| -2.0 * ll + k * n.ln())
    }

    /// Variance coefficients, checked against the model type.
    pub(crate) fn parameters(&self) -> Result<Vec<Coefficient>> {
        for term in self.kind.expected_terms() {
            if !self.variances.iter().any(|c| c.term == *term) {
                return Err(SweepError::malformed(format!(
                    "{}: missing variance '{term}'",
                    self.description()
                )));
            }
        }
        Ok(self.variances.clone())
    }
}
