//! Fitted values and residuals aligned with the time index.

use super::options::AugmentOptions;
use super::{in_sample, index_column};
use crate::error::{Result, SweepError};
use crate::models::{InSample, ModelResult};
use crate::table::{ColumnValues, Table};

/// Build the `<index>`, `.actual`, `.fitted`, `.resid` table of an in-sample fit.
///
/// Without supplied data there is one row per fitted value, indexed and
/// valued by the tail of the training series. Supplied data gives one row
/// per observation; fitted values align with its last observations and
/// earlier rows are null.
pub fn in_sample_table(data: &InSample, class: &str, options: &AugmentOptions) -> Result<Table> {
    let (fitted, residuals) = data.resolved(class)?;
    let k = fitted.len();

    let (reference, rows) = match options.data() {
        Some(original) => (original, original.len()),
        None => (data.series(), k),
    };
    if reference.len() < k {
        return Err(SweepError::malformed(format!(
            "{class}: {k} fitted values for {} observations",
            reference.len()
        )));
    }

    let actual = &reference.values()[reference.len() - rows..];
    let pad = rows - k;
    let padded = |values: Vec<f64>| {
        ColumnValues::optional_numbers(
            std::iter::repeat(None)
                .take(pad)
                .chain(values.into_iter().map(Some)),
        )
    };

    Table::new()
        .with_column(
            options.index_name(),
            index_column(reference, rows, options.timetk_idx(), "augment"),
        )?
        .with_column(".actual", ColumnValues::numbers(actual))?
        .with_column(".fitted", padded(fitted))?
        .with_column(".resid", padded(residuals))
}

pub(crate) fn augment(model: &ModelResult, options: &AugmentOptions) -> Result<Table> {
    let data =
        in_sample(model).ok_or_else(|| SweepError::unsupported(model.class(), "augment"))?;
    in_sample_table(data, model.class(), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeSeries;
    use crate::models::{ArimaFit, ArimaOrder, HoltWintersFit, StlFit};
    use crate::table::IndexValue;

    fn series() -> TimeSeries {
        TimeSeries::regular(vec![10.0, 12.0, 11.0, 13.0], 2020.0, 4.0).unwrap()
    }

    #[test]
    fn rows_follow_fitted_values_without_data() {
        let fit = HoltWintersFit::new(series(), 0.5, 13.0, 1.0).with_fitted(vec![11.5, 12.5]);
        let table = augment(&fit.into(), &AugmentOptions::default()).unwrap();

        assert_eq!(table.n_rows(), 2);
        assert_eq!(
            table.index("index").unwrap(),
            &[IndexValue::Period(2020.5), IndexValue::Period(2020.75)]
        );
        assert_eq!(table.number(".actual", 0), Some(11.0));
        assert_eq!(table.number(".resid", 1), Some(0.5));
    }

    #[test]
    fn supplied_data_pads_leading_rows() {
        let fit = HoltWintersFit::new(series(), 0.5, 13.0, 1.0).with_fitted(vec![11.5, 12.5]);
        let options = AugmentOptions::new()
            .with_data(series())
            .with_index_name("date");
        let table = augment(&fit.into(), &options).unwrap();

        assert_eq!(table.n_rows(), 4);
        assert_eq!(table.column_names(), vec!["date", ".actual", ".fitted", ".resid"]);
        assert_eq!(table.number(".fitted", 0), None);
        assert_eq!(table.number(".fitted", 2), Some(11.5));
        assert_eq!(table.number(".actual", 0), Some(10.0));
    }

    #[test]
    fn short_data_is_malformed() {
        let fit = ArimaFit::new(ArimaOrder::new(0, 0, 0), series(), 1.0)
            .with_residuals(vec![0.0; 4]);
        let options = AugmentOptions::new().with_data(TimeSeries::new(vec![1.0, 2.0]));
        assert!(matches!(
            augment(&fit.into(), &options),
            Err(SweepError::MalformedInput(_))
        ));
    }

    #[test]
    fn synthetic_index_starts_at_one() {
        let fit = ArimaFit::new(ArimaOrder::new(0, 0, 0), TimeSeries::new(vec![5.0, 6.0, 7.0]), 1.0)
            .with_residuals(vec![-1.0, 0.0, 1.0]);
        let table = augment(&fit.into(), &AugmentOptions::default()).unwrap();
        let periods: Vec<f64> = table
            .index("index")
            .unwrap()
            .iter()
            .filter_map(IndexValue::as_period)
            .collect();
        assert_eq!(periods, vec![1.0, 2.0, 3.0]);
        assert_eq!(table.number(".fitted", 2), Some(6.0));
    }

    #[test]
    fn decomposition_cannot_be_augmented() {
        let stl = StlFit::new(series(), vec![0.0; 4], vec![0.0; 4], vec![0.0; 4]);
        assert_eq!(
            augment(&stl.into(), &AugmentOptions::default()).unwrap_err(),
            SweepError::unsupported("stl", "augment")
        );
    }
}
