//! Coefficient tables.

use crate::error::{Result, SweepError};
use crate::models::{Coefficient, ModelResult};
use crate::table::{ColumnValues, Table};
use crate::utils::stats::normal_p_value;

/// Build a `term`, `estimate`, `std.error`, `statistic`, `p.value` table.
///
/// The statistic is the z value `estimate / std.error` with a two-sided
/// normal p-value; all three are null without a standard error.
pub fn coefficient_table(terms: &[Coefficient]) -> Result<Table> {
    let statistic: Vec<Option<f64>> = terms
        .iter()
        .map(|c| match c.std_error {
            Some(se) if se > 0.0 => Some(c.estimate / se),
            _ => None,
        })
        .collect();
    let p_value: Vec<Option<f64>> = statistic
        .iter()
        .map(|z| z.and_then(normal_p_value))
        .collect();

    Table::new()
        .with_column("term", ColumnValues::texts(terms.iter().map(|c| c.term.clone())))?
        .with_column(
            "estimate",
            ColumnValues::optional_numbers(terms.iter().map(|c| Some(c.estimate))),
        )?
        .with_column(
            "std.error",
            ColumnValues::optional_numbers(terms.iter().map(|c| c.std_error)),
        )?
        .with_column("statistic", ColumnValues::optional_numbers(statistic))?
        .with_column("p.value", ColumnValues::optional_numbers(p_value))
}

pub(crate) fn tidy(model: &ModelResult) -> Result<Table> {
    let terms = match model {
        ModelResult::Arima(fit) => fit.terms()?,
        ModelResult::Ets(fit) => fit.parameters()?,
        ModelResult::Bats(fit) => fit.parameters()?,
        ModelResult::HoltWinters(fit) => fit.parameters()?,
        ModelResult::StructTs(fit) => fit.parameters()?,
        ModelResult::Stlm(fit) => {
            let inner = fit.model().resolve()?;
            return tidy(&inner);
        }
        ModelResult::Nnetar(_)
        | ModelResult::Stl(_)
        | ModelResult::Decomposed(_)
        | ModelResult::Generic(_) => return Err(SweepError::unsupported(model.class(), "tidy")),
    };
    coefficient_table(&terms)
}
