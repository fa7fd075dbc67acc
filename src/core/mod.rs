//! Core data structures: indexed series and forecast results.

mod forecast;
mod time_series;

pub use forecast::{ForecastResult, PredictionInterval};
pub use time_series::{TimeSeries, TimeSeriesBuilder};
