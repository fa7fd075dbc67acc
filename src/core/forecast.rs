//! Forecast result structure holding history, point forecasts and intervals.

use crate::core::TimeSeries;
use crate::error::{Result, SweepError};
use chrono::{DateTime, Utc};

/// Lower and upper bounds at one confidence level.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionInterval {
    /// Confidence level in percent, e.g. `95.0`.
    level: f64,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl PredictionInterval {
    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Level rendered for column names: `80`, `95`, `97.5`.
    pub fn label(&self) -> String {
        format!("{}", self.level)
    }
}

/// A forecast: the series it was produced from, point predictions and
/// zero or more interval levels.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    method: String,
    x: TimeSeries,
    mean: Vec<f64>,
    intervals: Vec<PredictionInterval>,
    future_timestamps: Option<Vec<DateTime<Utc>>>,
}

impl ForecastResult {
    /// Create a forecast without intervals.
    pub fn new(method: impl Into<String>, x: TimeSeries, mean: Vec<f64>) -> Self {
        Self {
            method: method.into(),
            x,
            mean,
            intervals: Vec::new(),
            future_timestamps: None,
        }
    }

    /// Add an interval level.
    ///
    /// Levels may be given in percent (`95.0`) or as a fraction (`0.95`).
    pub fn with_interval(mut self, level: f64, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        let level = normalize_level(level)?;
        if self.intervals.iter().any(|i| i.level == level) {
            return Err(SweepError::InvalidParameter(format!(
                "duplicate interval level {level}"
            )));
        }
        for bound in [&lower, &upper] {
            if bound.len() != self.mean.len() {
                return Err(SweepError::DimensionMismatch {
                    expected: self.mean.len(),
                    got: bound.len(),
                });
            }
        }
        self.intervals.push(PredictionInterval {
            level,
            lower,
            upper,
        });
        Ok(self)
    }

    /// Attach calendar timestamps for the forecast horizon.
    pub fn with_future_timestamps(mut self, timestamps: Vec<DateTime<Utc>>) -> Result<Self> {
        if timestamps.len() != self.mean.len() {
            return Err(SweepError::DimensionMismatch {
                expected: self.mean.len(),
                got: timestamps.len(),
            });
        }
        if timestamps.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SweepError::TimestampError(
                "forecast timestamps must be strictly increasing".to_string(),
            ));
        }
        self.future_timestamps = Some(timestamps);
        Ok(self)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Historical series the forecast continues.
    pub fn x(&self) -> &TimeSeries {
        &self.x
    }

    /// Point forecasts.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Get the forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    pub fn intervals(&self) -> &[PredictionInterval] {
        &self.intervals
    }

    /// Confidence levels in percent, in insertion order.
    pub fn levels(&self) -> Vec<f64> {
        self.intervals.iter().map(|i| i.level).collect()
    }

    pub fn interval(&self, level: f64) -> Option<&PredictionInterval> {
        let level = normalize_level(level).ok()?;
        self.intervals.iter().find(|i| i.level == level)
    }

    pub fn future_timestamps(&self) -> Option<&[DateTime<Utc>]> {
        self.future_timestamps.as_deref()
    }
}

/// Convert a level to percent, rejecting values outside `(0, 100)`.
fn normalize_level(level: f64) -> Result<f64> {
    let pct = if level > 0.0 && level < 1.0 {
        level * 100.0
    } else {
        level
    };
    if !pct.is_finite() || pct <= 0.0 || pct >= 100.0 {
        return Err(SweepError::InvalidParameter(format!(
            "confidence level must be in (0, 1) or (0, 100), got {level}"
        )));
    }
    // 0.95 * 100 is not exactly 95 in binary.
    Ok((pct * 1e6).round() / 1e6)
}
