//! # anofox-sweep
//!
//! Tidy tables from time series forecasting results.
//!
//! Fitted models (ARIMA, ETS, BATS/TBATS, Holt-Winters, structural
//! models, neural autoregression, STL and classical decompositions) and
//! their forecasts are turned into rectangular tables: coefficients
//! (`tidy`), one-row summaries (`glance`), in-sample fits (`augment`),
//! decomposition components (`tidy_decomp`) and long-format forecasts
//! (`sweep`).
//!
//! ```
//! use anofox_sweep::prelude::*;
//!
//! let x = TimeSeries::regular(vec![112.0, 118.0, 132.0, 129.0], 1949.0, 12.0)?;
//! let forecast = ForecastResult::new("ETS(A,N,N)", x, vec![129.0, 129.0])
//!     .with_interval(80.0, vec![120.0, 117.0], vec![138.0, 141.0])?
//!     .with_interval(95.0, vec![115.0, 111.0], vec![143.0, 147.0])?;
//!
//! let table = Normalizer::new().sweep(&forecast, &SweepOptions::default())?;
//! assert_eq!(table.n_rows(), 6);
//! assert_eq!(
//!     table.column_names(),
//!     ["index", "key", "value", "lo.80", "hi.80", "lo.95", "hi.95"]
//! );
//! # Ok::<(), anofox_sweep::SweepError>(())
//! ```

#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::too_many_arguments)]

pub mod core;
pub mod error;
pub mod models;
pub mod sweep;
pub mod table;
pub mod utils;

pub use error::{Result, SweepError};
pub use sweep::Normalizer;
pub use table::Table;

pub mod prelude {
    pub use crate::core::{ForecastResult, TimeSeries};
    pub use crate::error::{Result, SweepError};
    pub use crate::models::{
        ArimaFit, ArimaOrder, BatsFit, DecomposedTs, DecompositionType, ETSSpec, EtsFit, Field,
        GenericModel, HoltWintersFit, HoltWintersSeasonal, ModelResult, NnetarFit,
        StateComponents, StlFit, StlmFit, StructTsFit, StructTsKind, Variant,
    };
    pub use crate::sweep::{
        AugmentOptions, DecompOptions, Extractor, Normalizer, SweepOptions,
    };
    pub use crate::table::{ColumnValues, IndexValue, Table, Value};
}
