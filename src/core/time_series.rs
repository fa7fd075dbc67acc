//! TimeSeries data structure: observed values with a numeric and an
//! optional calendar time index.

use crate::error::{Result, SweepError};
use crate::table::IndexValue;
use chrono::{DateTime, Datelike, Duration, Months, Timelike, Utc};
use std::collections::HashMap;

/// A univariate series with a regular numeric index and optional timestamps.
///
/// The numeric index follows the classic `ts` convention: observation `i`
/// (zero-based) sits at period `start + i / frequency`. A series built
/// without index information therefore counts `1, 2, 3, ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    values: Vec<f64>,
    start: f64,
    frequency: f64,
    timestamps: Option<Vec<DateTime<Utc>>>,
}

/// Builder for constructing TimeSeries.
#[derive(Debug, Clone)]
pub struct TimeSeriesBuilder {
    values: Vec<f64>,
    start: f64,
    frequency: f64,
    timestamps: Option<Vec<DateTime<Utc>>>,
}

impl Default for TimeSeriesBuilder {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            start: 1.0,
            frequency: 1.0,
            timestamps: None,
        }
    }
}

impl TimeSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(mut self, values: Vec<f64>) -> Self {
        self.values = values;
        self
    }

    /// Period of the first observation, e.g. `2015.0` for January 2015.
    pub fn start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    /// Observations per unit of the numeric index (12 for monthly data).
    pub fn frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn timestamps(mut self, timestamps: Vec<DateTime<Utc>>) -> Self {
        self.timestamps = Some(timestamps);
        self
    }

    pub fn build(self) -> Result<TimeSeries> {
        TimeSeries::from_parts(self.values, self.start, self.frequency, self.timestamps)
    }
}

impl TimeSeries {
    fn from_parts(
        values: Vec<f64>,
        start: f64,
        frequency: f64,
        timestamps: Option<Vec<DateTime<Utc>>>,
    ) -> Result<Self> {
        if !start.is_finite() {
            return Err(SweepError::InvalidParameter(format!(
                "start must be finite, got {start}"
            )));
        }
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(SweepError::InvalidParameter(format!(
                "frequency must be positive, got {frequency}"
            )));
        }

        if let Some(ts) = &timestamps {
            if ts.len() != values.len() {
                return Err(SweepError::DimensionMismatch {
                    expected: values.len(),
                    got: ts.len(),
                });
            }
            for w in ts.windows(2) {
                if w[1] <= w[0] {
                    return Err(SweepError::TimestampError(
                        "timestamps must be strictly increasing".to_string(),
                    ));
                }
            }
        }

        Ok(Self {
            values,
            start,
            frequency,
            timestamps,
        })
    }

    /// Series indexed `1..=n` with no calendar information.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            start: 1.0,
            frequency: 1.0,
            timestamps: None,
        }
    }

    /// Series with a regular numeric index.
    pub fn regular(values: Vec<f64>, start: f64, frequency: f64) -> Result<Self> {
        Self::from_parts(values, start, frequency, None)
    }

    /// Series indexed by timestamps; the numeric index counts `1..=n`.
    pub fn with_timestamps(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        Self::from_parts(values, 1.0, 1.0, Some(timestamps))
    }

    pub fn builder() -> TimeSeriesBuilder {
        TimeSeriesBuilder::new()
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Calendar timestamps, if the series carries them.
    pub fn timestamps(&self) -> Option<&[DateTime<Utc>]> {
        self.timestamps.as_deref()
    }

    pub fn has_timestamps(&self) -> bool {
        self.timestamps.is_some()
    }

    /// Check for NaN or infinite observations.
    pub fn has_missing_values(&self) -> bool {
        self.values.iter().any(|v| !v.is_finite())
    }

    /// Seasonal lag used for scaled error measures (at least 1).
    pub fn seasonal_period(&self) -> usize {
        (self.frequency.round() as usize).max(1)
    }

    /// Numeric period of the zero-based position `i`.
    ///
    /// Positions past the end extrapolate the regular index.
    pub fn period(&self, i: usize) -> f64 {
        self.start + i as f64 / self.frequency
    }

    /// Numeric periods for every observation.
    pub fn periods(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.period(i)).collect()
    }

    /// Numeric periods for the `horizon` steps following the last observation.
    pub fn future_periods(&self, horizon: usize) -> Vec<f64> {
        let n = self.len();
        (n..n + horizon).map(|i| self.period(i)).collect()
    }

    /// Index values for every observation.
    ///
    /// With `calendar` set and timestamps present, the index is the
    /// timestamps; otherwise it is the numeric periods.
    pub fn index_values(&self, calendar: bool) -> Vec<IndexValue> {
        match (&self.timestamps, calendar) {
            (Some(ts), true) => ts.iter().copied().map(IndexValue::Timestamp).collect(),
            _ => self.periods().into_iter().map(IndexValue::Period).collect(),
        }
    }

    /// Index values for the last `count` observations.
    pub fn tail_index_values(&self, count: usize, calendar: bool) -> Vec<IndexValue> {
        let all = self.index_values(calendar);
        let skip = all.len().saturating_sub(count);
        all.into_iter().skip(skip).collect()
    }

    /// Extract a slice of the time series, keeping the index aligned.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end {
            return Err(SweepError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(SweepError::DimensionMismatch {
                expected: self.len(),
                got: end,
            });
        }

        Ok(TimeSeries {
            values: self.values[start..end].to_vec(),
            start: self.period(start),
            frequency: self.frequency,
            timestamps: self
                .timestamps
                .as_ref()
                .map(|ts| ts[start..end].to_vec()),
        })
    }

    /// Infer the modal spacing between timestamps.
    pub fn infer_spacing(&self, tolerance: f64) -> Result<Duration> {
        let ts = self.timestamps.as_deref().ok_or_else(|| {
            SweepError::TimestampError("series has no timestamps".to_string())
        })?;
        if ts.len() < 2 {
            return Err(SweepError::TimestampError(format!(
                "need at least 2 timestamps to infer spacing, got {}",
                ts.len()
            )));
        }

        let mut counts: HashMap<i64, usize> = HashMap::new();
        for w in ts.windows(2) {
            *counts.entry((w[1] - w[0]).num_seconds()).or_insert(0) += 1;
        }

        // Smallest spacing wins ties so the result is deterministic.
        let (modal_diff, modal_count) = counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(&diff, &count)| (diff, count))
            .ok_or_else(|| SweepError::TimestampError("empty spacing data".to_string()))?;

        let total: usize = counts.values().sum();
        if (modal_count as f64 / total as f64) < tolerance {
            return Err(SweepError::TimestampError(
                "no unique modal spacing found".to_string(),
            ));
        }

        Ok(Duration::seconds(modal_diff))
    }

    /// Timestamps for the `horizon` steps following the last observation.
    ///
    /// Month-aligned series (same day and time, or every timestamp on the
    /// last day of its month, with a constant month step) advance by
    /// calendar months; everything else advances by the modal spacing.
    pub fn future_timestamps(&self, horizon: usize) -> Result<Vec<DateTime<Utc>>> {
        let ts = self.timestamps.as_deref().ok_or_else(|| {
            SweepError::TimestampError("series has no timestamps".to_string())
        })?;
        let last = *ts.last().ok_or(SweepError::EmptyData)?;

        if let Some((step, anchor)) = month_step(ts) {
            return (1..=horizon)
                .map(|h| {
                    let months = step * h as u32;
                    let next = match anchor {
                        MonthAnchor::DayOfMonth => last.checked_add_months(Months::new(months)),
                        // first day of the month after the target, minus one day
                        MonthAnchor::MonthEnd => last
                            .with_day(1)
                            .and_then(|start| start.checked_add_months(Months::new(months + 1)))
                            .and_then(|after| after.checked_sub_signed(Duration::days(1))),
                    };
                    next.ok_or_else(|| {
                        SweepError::TimestampError("timestamp out of range".to_string())
                    })
                })
                .collect();
        }

        let spacing = self.infer_spacing(0.5)?;
        (1..=horizon)
            .map(|h| {
                last.checked_add_signed(spacing * h as i32).ok_or_else(|| {
                    SweepError::TimestampError("timestamp out of range".to_string())
                })
            })
            .collect()
    }
}

/// How month-stepped timestamps sit within their month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MonthAnchor {
    /// Every timestamp on the same day of the month.
    DayOfMonth,
    /// Every timestamp on the last day of its month.
    MonthEnd,
}

fn is_month_end(t: &DateTime<Utc>) -> bool {
    t.date_naive()
        .succ_opt()
        .map_or(true, |next| next.month() != t.month())
}

/// Constant month step between timestamps sharing a time of day and a
/// day-of-month or month-end anchor.
fn month_step(ts: &[DateTime<Utc>]) -> Option<(u32, MonthAnchor)> {
    if ts.len() < 2 {
        return None;
    }
    let first = ts[0];
    if !ts
        .iter()
        .all(|t| t.num_seconds_from_midnight() == first.num_seconds_from_midnight())
    {
        return None;
    }
    let anchor = if ts.iter().all(is_month_end) {
        MonthAnchor::MonthEnd
    } else if ts.iter().all(|t| t.day() == first.day()) {
        MonthAnchor::DayOfMonth
    } else {
        return None;
    };

    let month_number = |t: &DateTime<Utc>| t.year() as i64 * 12 + t.month0() as i64;
    let step = month_number(&ts[1]) - month_number(&ts[0]);
    if step <= 0 {
        return None;
    }
    let constant = ts
        .windows(2)
        .all(|w| month_number(&w[1]) - month_number(&w[0]) == step);

    constant.then_some((step as u32, anchor))
}
