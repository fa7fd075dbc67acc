//! Per-observation state and decomposition components.

use super::index_column;
use super::options::DecompOptions;
use crate::core::TimeSeries;
use crate::error::{Result, SweepError};
use crate::models::{align_states, ModelResult, StateComponents, StlFit};
use crate::table::{ColumnValues, Table};

fn decomposition_table(
    series: &TimeSeries,
    remainder_name: &str,
    components: [&[f64]; 3],
    seasadj: &[f64],
    options: &DecompOptions,
) -> Result<Table> {
    let [season, trend, remainder] = components;
    Table::new()
        .with_column(
            options.index_name(),
            index_column(series, series.len(), options.timetk_idx(), "tidy_decomp"),
        )?
        .with_column("observed", ColumnValues::numbers(series.values()))?
        .with_column("season", ColumnValues::numbers(season))?
        .with_column("trend", ColumnValues::numbers(trend))?
        .with_column(remainder_name, ColumnValues::numbers(remainder))?
        .with_column("seasadj", ColumnValues::numbers(seasadj))
}

fn state_table(
    class: &str,
    series: &TimeSeries,
    states: Option<&StateComponents>,
    options: &DecompOptions,
) -> Result<Table> {
    let states = states
        .ok_or_else(|| SweepError::malformed(format!("{class}: no state components")))?;
    let n = series.len();

    let mut table = Table::new()
        .with_column(
            options.index_name(),
            index_column(series, n, options.timetk_idx(), "tidy_decomp"),
        )?
        .with_column("observed", ColumnValues::numbers(series.values()))?
        .with_column(
            "level",
            ColumnValues::numbers(&align_states(&states.level, n, "level")?),
        )?;
    if let Some(slope) = &states.slope {
        table.push_column("slope", ColumnValues::numbers(&align_states(slope, n, "slope")?))?;
    }
    if let Some(season) = &states.season {
        table.push_column(
            "season",
            ColumnValues::numbers(&align_states(season, n, "season")?),
        )?;
    }
    Ok(table)
}

fn stl_table(fit: &StlFit, options: &DecompOptions) -> Result<Table> {
    let c = fit.components()?;
    decomposition_table(
        fit.series(),
        "remainder",
        [c.season, c.trend, c.remainder],
        &fit.seasonally_adjusted(),
        options,
    )
}

pub(crate) fn tidy_decomp(model: &ModelResult, options: &DecompOptions) -> Result<Table> {
    match model {
        ModelResult::Stl(fit) => stl_table(fit, options),
        ModelResult::Stlm(fit) => stl_table(fit.stl(), options),
        ModelResult::Decomposed(fit) => {
            let c = fit.components()?;
            decomposition_table(
                fit.series(),
                "random",
                [c.season, c.trend, c.remainder],
                &fit.seasonally_adjusted(),
                options,
            )
        }
        ModelResult::Ets(fit) => state_table(model.class(), fit.series(), fit.states(), options),
        ModelResult::Bats(fit) => state_table(model.class(), fit.series(), fit.states(), options),
        ModelResult::StructTs(fit) => {
            state_table(model.class(), fit.series(), fit.states(), options)
        }
        ModelResult::Arima(_)
        | ModelResult::HoltWinters(_)
        | ModelResult::Nnetar(_)
        | ModelResult::Generic(_) => Err(SweepError::unsupported(model.class(), "tidy_decomp")),
    }
}
