//! Turning model results and forecasts into tables.
//!
//! [`Normalizer`] dispatches on the family of a [`ModelResult`] and runs
//! the matching extraction:
//!
//! - [`Normalizer::tidy`]: one row per estimated term
//! - [`Normalizer::glance`]: one summary row per model
//! - [`Normalizer::augment`]: fitted values and residuals per observation
//! - [`Normalizer::tidy_decomp`]: state or decomposition components per observation
//! - [`Normalizer::sweep`]: history and forecast in one long table
//!
//! Built-in families are matched exhaustively. Generic results with an
//! unknown class tag are looked up in the normalizer's
//! [`ExtractorRegistry`].

mod augment;
mod decomp;
mod forecast;
mod glance;
mod options;
mod registry;
mod tidy;

pub use augment::in_sample_table;
pub use forecast::sweep;
pub use glance::{in_sample_accuracy, Glance, GLANCE_COLUMNS};
pub use options::{AugmentOptions, DecompOptions, SweepOptions};
pub use registry::{BoxedExtractor, Extractor, ExtractorRegistry};
pub use tidy::coefficient_table;

use crate::core::{ForecastResult, TimeSeries};
use crate::error::{Result, SweepError};
use crate::models::{InSample, ModelResult};
use crate::table::{ColumnValues, Table};
use tracing::{debug, warn};

/// In-sample data of families that have fitted values.
pub(crate) fn in_sample(model: &ModelResult) -> Option<&InSample> {
    match model {
        ModelResult::Arima(fit) => Some(fit.in_sample()),
        ModelResult::Ets(fit) => Some(fit.in_sample()),
        ModelResult::Bats(fit) => Some(fit.in_sample()),
        ModelResult::HoltWinters(fit) => Some(fit.in_sample()),
        ModelResult::StructTs(fit) => Some(fit.in_sample()),
        ModelResult::Nnetar(fit) => Some(fit.in_sample()),
        ModelResult::Stlm(fit) => Some(fit.in_sample()),
        ModelResult::Stl(_) | ModelResult::Decomposed(_) | ModelResult::Generic(_) => None,
    }
}

/// Index column for the last `count` observations of `series`.
pub(crate) fn index_column(
    series: &TimeSeries,
    count: usize,
    calendar: bool,
    operation: &str,
) -> ColumnValues {
    if calendar && !series.has_timestamps() {
        warn!(operation = %operation, "series has no timestamps; using numeric periods");
    }
    ColumnValues::Index(series.tail_index_values(count, calendar))
}

/// Dispatches model results to their table extraction.
///
/// # Example
///
/// ```
/// use anofox_sweep::prelude::*;
///
/// let series = TimeSeries::new(vec![1.0, 2.0, 3.0, 2.5, 3.5]);
/// let fit = ArimaFit::new(ArimaOrder::new(2, 0, 1), series, 0.4)
///     .with_ar(&[0.6, -0.2])
///     .with_ma(&[0.3]);
///
/// let table = Normalizer::new().tidy(&fit.into()).unwrap();
/// assert_eq!(table.n_rows(), 3);
/// ```
#[derive(Debug, Default)]
pub struct Normalizer {
    registry: ExtractorRegistry,
}

/// Builder for a [`Normalizer`] with registered extractors.
#[derive(Debug, Default)]
pub struct NormalizerBuilder {
    registry: ExtractorRegistry,
}

impl NormalizerBuilder {
    pub fn register(
        mut self,
        class: impl Into<String>,
        extractor: impl Extractor + 'static,
    ) -> Result<Self> {
        self.registry.register(class, Box::new(extractor))?;
        Ok(self)
    }

    pub fn build(self) -> Normalizer {
        Normalizer {
            registry: self.registry,
        }
    }
}

impl Normalizer {
    /// Normalizer for the built-in families only.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> NormalizerBuilder {
        NormalizerBuilder::default()
    }

    /// Register an extractor for a class tag outside the built-in set.
    pub fn register(
        &mut self,
        class: impl Into<String>,
        extractor: impl Extractor + 'static,
    ) -> Result<()> {
        self.registry.register(class, Box::new(extractor))
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    fn dispatch(
        &self,
        model: &ModelResult,
        operation: &'static str,
        builtin: impl FnOnce(&ModelResult) -> Result<Table>,
        extension: impl FnOnce(&dyn Extractor, &crate::models::GenericModel) -> Result<Table>,
    ) -> Result<Table> {
        let resolved = model.resolve()?;
        let table = match resolved.as_ref() {
            ModelResult::Generic(generic) => {
                let extractor = self
                    .registry
                    .get(generic.class())
                    .ok_or_else(|| SweepError::unsupported(generic.class(), operation))?;
                extension(extractor, generic)?
            }
            typed => builtin(typed)?,
        };
        debug!(
            class = model.class(),
            operation = operation,
            rows = table.n_rows(),
            "extracted table"
        );
        Ok(table)
    }

    /// Coefficient table: `term`, `estimate`, `std.error`, `statistic`, `p.value`.
    pub fn tidy(&self, model: &ModelResult) -> Result<Table> {
        self.dispatch(model, "tidy", tidy::tidy, |e, g| e.tidy(g))
    }

    /// Single-row summary with the columns of [`GLANCE_COLUMNS`].
    pub fn glance(&self, model: &ModelResult) -> Result<Table> {
        let table = self.dispatch(model, "glance", glance::glance, |e, g| e.glance(g))?;
        if table.n_rows() != 1 {
            return Err(SweepError::malformed(format!(
                "{}: glance produced {} rows",
                model.class(),
                table.n_rows()
            )));
        }
        Ok(table)
    }

    /// In-sample table: `<index>`, `.actual`, `.fitted`, `.resid`.
    pub fn augment(&self, model: &ModelResult, options: &AugmentOptions) -> Result<Table> {
        self.dispatch(
            model,
            "augment",
            |m| augment::augment(m, options),
            |e, g| e.augment(g, options),
        )
    }

    /// Per-observation components of a decomposition or state-space fit.
    pub fn tidy_decomp(&self, model: &ModelResult, options: &DecompOptions) -> Result<Table> {
        self.dispatch(
            model,
            "tidy_decomp",
            |m| decomp::tidy_decomp(m, options),
            |e, g| e.tidy_decomp(g, options),
        )
    }

    /// Long forecast table: `<index>`, `key`, `value`, `lo.L`, `hi.L`.
    pub fn sweep(&self, forecast: &ForecastResult, options: &SweepOptions) -> Result<Table> {
        let table = self::forecast::sweep(forecast, options)?;
        debug!(
            method = forecast.method(),
            operation = "sweep",
            rows = table.n_rows(),
            "extracted table"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ETSSpec, EtsFit, Field, GenericModel};
    use crate::utils::stats::mean;

    struct MeanOnly;

    impl Extractor for MeanOnly {
        fn glance(&self, model: &GenericModel) -> Result<Table> {
            let values = model.vector("values")?;
            Glance::new(model.class())
                .with_sigma(Some(mean(values)))
                .into_table()
        }
    }

    #[test]
    fn normalizer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Normalizer>();
    }

    #[test]
    fn unknown_class_is_unsupported() {
        let model = ModelResult::from(GenericModel::new("garch"));
        assert_eq!(
            Normalizer::new().tidy(&model).unwrap_err(),
            SweepError::unsupported("garch", "tidy")
        );
    }

    #[test]
    fn registered_extractor_handles_its_class() {
        let normalizer = Normalizer::builder()
            .register("custom", MeanOnly)
            .unwrap()
            .build();
        let model = ModelResult::from(
            GenericModel::new("custom").with_field("values", Field::Vector(vec![1.0, 3.0])),
        );

        let table = normalizer.glance(&model).unwrap();
        assert_eq!(table.number("sigma", 0), Some(2.0));
        assert_eq!(
            normalizer.tidy(&model).unwrap_err(),
            SweepError::unsupported("custom", "tidy")
        );
    }

    #[test]
    fn builtin_tag_cannot_be_registered() {
        let mut normalizer = Normalizer::new();
        assert!(normalizer.register("ets", MeanOnly).is_err());
        assert!(normalizer.registry().is_empty());
    }

    #[test]
    fn generic_builtin_tags_use_typed_extraction() {
        let model = ModelResult::from(
            GenericModel::new("ets")
                .with_field("x", Field::Series(TimeSeries::new(vec![1.0, 2.0])))
                .with_field("method", Field::Text("ETS(A,N,N)".to_string()))
                .with_field(
                    "par",
                    Field::Named(vec![("alpha".to_string(), 0.5), ("l".to_string(), 1.0)]),
                )
                .with_field("sigma2", Field::Number(1.0)),
        );
        let typed = ModelResult::from(EtsFit::new(
            ETSSpec::ann(),
            TimeSeries::new(vec![1.0, 2.0]),
            0.5,
            1.0,
            1.0,
        ));

        let normalizer = Normalizer::new();
        assert_eq!(
            normalizer.tidy(&model).unwrap(),
            normalizer.tidy(&typed).unwrap()
        );
    }
}
