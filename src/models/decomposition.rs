//! Seasonal decomposition snapshots: STL, STL + model, classical.

use super::fit::impl_in_sample;
use super::{InSample, ModelResult};
use crate::core::TimeSeries;
use crate::error::{Result, SweepError};

/// Decomposition components aligned with the observed series.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Components<'a> {
    pub season: &'a [f64],
    pub trend: &'a [f64],
    pub remainder: &'a [f64],
}

fn check_components<'a>(
    class: &str,
    observed: &'a [f64],
    parts: [(&str, &'a [f64]); 3],
) -> Result<Components<'a>> {
    for (name, values) in parts {
        if values.len() != observed.len() {
            return Err(SweepError::malformed(format!(
                "{class}: component '{name}' has {} values for {} observations",
                values.len(),
                observed.len()
            )));
        }
    }
    let [(_, season), (_, trend), (_, remainder)] = parts;
    Ok(Components {
        season,
        trend,
        remainder,
    })
}

/// STL (Seasonal-Trend decomposition using LOESS) result.
#[derive(Debug, Clone, PartialEq)]
pub struct StlFit {
    series: TimeSeries,
    seasonal: Vec<f64>,
    trend: Vec<f64>,
    remainder: Vec<f64>,
}

impl StlFit {
    pub fn new(series: TimeSeries, seasonal: Vec<f64>, trend: Vec<f64>, remainder: Vec<f64>) -> Self {
        Self {
            series,
            seasonal,
            trend,
            remainder,
        }
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn seasonal(&self) -> &[f64] {
        &self.seasonal
    }

    pub fn trend(&self) -> &[f64] {
        &self.trend
    }

    pub fn remainder(&self) -> &[f64] {
        &self.remainder
    }

    /// Seasonally adjusted series (observed - seasonal).
    pub fn seasonally_adjusted(&self) -> Vec<f64> {
        self.series
            .values()
            .iter()
            .zip(&self.seasonal)
            .map(|(y, s)| y - s)
            .collect()
    }

    pub(crate) fn components(&self) -> Result<Components<'_>> {
        check_components(
            "stl",
            self.series.values(),
            [
                ("seasonal", self.seasonal.as_slice()),
                ("trend", self.trend.as_slice()),
                ("remainder", self.remainder.as_slice()),
            ],
        )
    }
}

/// STL decomposition with a model fitted to the seasonally adjusted series.
#[derive(Debug, Clone, PartialEq)]
pub struct StlmFit {
    stl: StlFit,
    model: Box<ModelResult>,
    data: InSample,
}

impl_in_sample!(StlmFit);

impl StlmFit {
    /// The training series is taken from the decomposition.
    pub fn new(stl: StlFit, model: impl Into<ModelResult>) -> Self {
        let data = InSample::new(stl.series().clone());
        Self {
            stl,
            model: Box::new(model.into()),
            data,
        }
    }

    pub fn stl(&self) -> &StlFit {
        &self.stl
    }

    /// Model of the seasonally adjusted series.
    pub fn model(&self) -> &ModelResult {
        &self.model
    }
}

/// Classical decomposition type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecompositionType {
    #[default]
    Additive,
    Multiplicative,
}

impl DecompositionType {
    pub fn name(&self) -> &'static str {
        match self {
            DecompositionType::Additive => "additive",
            DecompositionType::Multiplicative => "multiplicative",
        }
    }
}

/// Classical moving-average decomposition.
///
/// Trend and random components are undefined (NaN) for the first and
/// last half-window of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposedTs {
    kind: DecompositionType,
    series: TimeSeries,
    seasonal: Vec<f64>,
    trend: Vec<f64>,
    random: Vec<f64>,
}

impl DecomposedTs {
    pub fn new(
        kind: DecompositionType,
        series: TimeSeries,
        seasonal: Vec<f64>,
        trend: Vec<f64>,
        random: Vec<f64>,
    ) -> Self {
        Self {
            kind,
            series,
            seasonal,
            trend,
            random,
        }
    }

    pub fn kind(&self) -> DecompositionType {
        self.kind
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Observed series with the seasonal component removed.
    pub fn seasonally_adjusted(&self) -> Vec<f64> {
        let observed = self.series.values().iter().zip(&self.seasonal);
        match self.kind {
            DecompositionType::Additive => observed.map(|(y, s)| y - s).collect(),
            DecompositionType::Multiplicative => observed.map(|(y, s)| y / s).collect(),
        }
    }

    pub(crate) fn components(&self) -> Result<Components<'_>> {
        check_components(
            "decomposed.ts",
            self.series.values(),
            [
                ("seasonal", self.seasonal.as_slice()),
                ("trend", self.trend.as_slice()),
                ("random", self.random.as_slice()),
            ],
        )
    }
}
