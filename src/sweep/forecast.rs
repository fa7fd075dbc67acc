//! Long-format forecast tables.

use super::options::SweepOptions;
use crate::core::ForecastResult;
use crate::error::Result;
use crate::table::{ColumnValues, IndexValue, Table};
use tracing::warn;

/// Index of the history rows (when included) followed by the horizon.
///
/// The calendar index needs timestamps for every rendered row: the
/// forecast's own future timestamps, or ones continued from the history.
/// When they cannot be had the whole column falls back to numeric periods.
fn sweep_index(forecast: &ForecastResult, include_history: bool, calendar: bool) -> Vec<IndexValue> {
    let x = forecast.x();
    let horizon = forecast.horizon();

    if calendar {
        let history = x.timestamps();
        let future = match forecast.future_timestamps() {
            Some(ts) => Ok(ts.to_vec()),
            None => x.future_timestamps(horizon),
        };
        match (history, future) {
            (Some(history), Ok(future)) => {
                let past = if include_history { history } else { &[] };
                return past
                    .iter()
                    .chain(&future)
                    .copied()
                    .map(IndexValue::Timestamp)
                    .collect();
            }
            (None, Ok(future)) if !include_history => {
                return future.into_iter().map(IndexValue::Timestamp).collect();
            }
            (_, Err(err)) => {
                warn!(error = %err, "calendar index unavailable for forecast; using numeric periods")
            }
            (None, Ok(_)) => {
                warn!("history has no timestamps; using numeric periods")
            }
        }
    }

    let mut index = if include_history { x.periods() } else { Vec::new() };
    index.extend(x.future_periods(horizon));
    index.into_iter().map(IndexValue::Period).collect()
}

/// Merge history and forecast into one table tagged by `key`.
///
/// Columns are `<index>`, `key` (`"actual"` or `"forecast"`), `value`,
/// then `lo.L` and `hi.L` for every interval level `L`. History rows have
/// null bounds.
pub fn sweep(forecast: &ForecastResult, options: &SweepOptions) -> Result<Table> {
    let history: &[f64] = if options.fitted() {
        forecast.x().values()
    } else {
        &[]
    };
    let pad = history.len();
    let horizon = forecast.horizon();

    let keys = std::iter::repeat("actual")
        .take(pad)
        .chain(std::iter::repeat("forecast").take(horizon));
    let values: Vec<f64> = history.iter().chain(forecast.mean()).copied().collect();

    let mut table = Table::new()
        .with_column(
            options.index_name(),
            ColumnValues::Index(sweep_index(forecast, options.fitted(), options.timetk_idx())),
        )?
        .with_column("key", ColumnValues::texts(keys))?
        .with_column("value", ColumnValues::numbers(&values))?;

    for interval in forecast.intervals() {
        let label = interval.label();
        for (prefix, bound) in [("lo", interval.lower()), ("hi", interval.upper())] {
            let cells = std::iter::repeat(None)
                .take(pad)
                .chain(bound.iter().copied().map(Some));
            table.push_column(format!("{prefix}.{label}"), ColumnValues::optional_numbers(cells))?;
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeSeries;
    use chrono::{TimeZone, Utc};

    fn forecast() -> ForecastResult {
        let x = TimeSeries::regular(vec![1.0, 2.0, 3.0], 2000.0, 1.0).unwrap();
        ForecastResult::new("Naive", x, vec![3.0, 3.0])
            .with_interval(80.0, vec![2.0, 1.5], vec![4.0, 4.5])
            .unwrap()
            .with_interval(0.95, vec![1.5, 1.0], vec![4.5, 5.0])
            .unwrap()
    }

    #[test]
    fn forecast_only() {
        let table = sweep(&forecast(), &SweepOptions::new().with_fitted(false)).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(
            table.column_names(),
            vec!["index", "key", "value", "lo.80", "hi.80", "lo.95", "hi.95"]
        );
        assert_eq!(table.index("index").unwrap()[0], IndexValue::Period(2003.0));
        assert_eq!(table.text("key", 1), Some("forecast"));
    }

    #[test]
    fn history_rows_have_null_bounds() {
        let table = sweep(&forecast(), &SweepOptions::default()).unwrap();
        assert_eq!(table.n_rows(), 5);
        assert_eq!(table.text("key", 2), Some("actual"));
        assert_eq!(table.number("lo.80", 2), None);
        assert_eq!(table.number("lo.80", 3), Some(2.0));
        assert_eq!(table.number("value", 0), Some(1.0));
    }

    #[test]
    fn calendar_index_extends_history() {
        let ts: Vec<_> = (1..=3)
            .map(|m| Utc.with_ymd_and_hms(2020, m, 1, 0, 0, 0).unwrap())
            .collect();
        let x = TimeSeries::with_timestamps(ts, vec![1.0, 2.0, 3.0]).unwrap();
        let fc = ForecastResult::new("Naive", x, vec![3.0, 3.0]);

        let table = sweep(&fc, &SweepOptions::new().with_timetk_idx(true)).unwrap();
        let index = table.index("index").unwrap();
        assert_eq!(
            index[4],
            IndexValue::Timestamp(Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn supplied_future_timestamps_index_the_horizon() {
        let ts: Vec<_> = (1..=3)
            .map(|m| Utc.with_ymd_and_hms(2020, m, 1, 0, 0, 0).unwrap())
            .collect();
        let x = TimeSeries::with_timestamps(ts, vec![1.0, 2.0, 3.0]).unwrap();
        let future = vec![
            Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 9, 1, 0, 0, 0).unwrap(),
        ];
        let fc = ForecastResult::new("Naive", x, vec![3.0, 3.0])
            .with_future_timestamps(future.clone())
            .unwrap();

        let table = sweep(&fc, &SweepOptions::new().with_timetk_idx(true)).unwrap();
        let index = table.index("index").unwrap();
        assert_eq!(index.len(), 5);
        assert_eq!(
            index[2],
            IndexValue::Timestamp(Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(index[3], IndexValue::Timestamp(future[0]));
        assert_eq!(index[4], IndexValue::Timestamp(future[1]));
    }

    #[test]
    fn future_timestamps_without_history_timestamps() {
        let future = vec![
            Utc.with_ymd_and_hms(2003, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2004, 1, 1, 0, 0, 0).unwrap(),
        ];
        let fc = forecast().with_future_timestamps(future.clone()).unwrap();

        let only = sweep(&fc, &SweepOptions::new().with_fitted(false).with_timetk_idx(true)).unwrap();
        assert_eq!(
            only.index("index").unwrap(),
            future.into_iter().map(IndexValue::Timestamp).collect::<Vec<_>>()
        );

        // history rows have no timestamps, so the whole column stays numeric
        let full = sweep(&fc, &SweepOptions::new().with_timetk_idx(true)).unwrap();
        let index = full.index("index").unwrap();
        assert_eq!(index[0], IndexValue::Period(2000.0));
        assert_eq!(index[3], IndexValue::Period(2003.0));
    }

    #[test]
    fn irregular_history_falls_back_to_periods() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ts: Vec<_> = [0, 1, 3, 6]
            .iter()
            .map(|&d| start + chrono::Duration::days(d))
            .collect();
        let x = TimeSeries::with_timestamps(ts, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let fc = ForecastResult::new("Naive", x, vec![4.0, 4.0]);

        let table = sweep(&fc, &SweepOptions::new().with_timetk_idx(true)).unwrap();
        let index = table.index("index").unwrap();
        assert_eq!(index[0], IndexValue::Period(1.0));
        assert_eq!(index[4], IndexValue::Period(5.0));
    }

    #[test]
    fn calendar_request_without_timestamps_falls_back() {
        let table = sweep(&forecast(), &SweepOptions::new().with_timetk_idx(true)).unwrap();
        assert!(table
            .index("index")
            .unwrap()
            .iter()
            .all(|i| i.as_period().is_some()));
    }
}
