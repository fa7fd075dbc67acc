//! Model result snapshots.
//!
//! Each supported model family has a plain data struct holding what a
//! fitted model exposes: parameters, information criteria, the training
//! series, fitted values, residuals and (where the family has them)
//! state components. [`ModelResult`] tags one of them with its family.

mod arima;
mod bats;
mod decomposition;
mod ets;
mod fit;
mod generic;
mod holt_winters;
mod nnetar;
mod struct_ts;

pub use arima::{ArimaFit, ArimaOrder};
pub use bats::BatsFit;
pub use decomposition::{DecomposedTs, DecompositionType, StlFit, StlmFit};
pub use ets::{ETSSpec, ErrorType, EtsFit, SeasonalType, TrendType};
pub use fit::InSample;
pub use generic::{Field, GenericModel};
pub use holt_winters::{HoltWintersFit, HoltWintersSeasonal};
pub use nnetar::NnetarFit;
pub use struct_ts::{StructTsFit, StructTsKind};

use crate::error::{Result, SweepError};
use std::fmt;

/// Closed set of model families with built-in extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Arima,
    Ets,
    Bats,
    Tbats,
    HoltWinters,
    StructTs,
    Nnetar,
    Stl,
    Stlm,
    Decomposed,
}

impl Variant {
    /// Every built-in variant.
    pub const ALL: [Variant; 10] = [
        Variant::Arima,
        Variant::Ets,
        Variant::Bats,
        Variant::Tbats,
        Variant::HoltWinters,
        Variant::StructTs,
        Variant::Nnetar,
        Variant::Stl,
        Variant::Stlm,
        Variant::Decomposed,
    ];

    /// Canonical class tag.
    pub fn class(&self) -> &'static str {
        match self {
            Variant::Arima => "Arima",
            Variant::Ets => "ets",
            Variant::Bats => "bats",
            Variant::Tbats => "tbats",
            Variant::HoltWinters => "HoltWinters",
            Variant::StructTs => "StructTS",
            Variant::Nnetar => "nnetar",
            Variant::Stl => "stl",
            Variant::Stlm => "stlm",
            Variant::Decomposed => "decomposed.ts",
        }
    }

    /// Look up a variant by class tag, accepting common aliases.
    pub fn from_class(class: &str) -> Option<Variant> {
        let variant = match class {
            "Arima" | "ARIMA" | "arima" | "auto.arima" | "forecast_ARIMA" => Variant::Arima,
            "ets" | "ETS" => Variant::Ets,
            "bats" | "BATS" => Variant::Bats,
            "tbats" | "TBATS" => Variant::Tbats,
            "HoltWinters" => Variant::HoltWinters,
            "StructTS" => Variant::StructTs,
            "nnetar" => Variant::Nnetar,
            "stl" | "STL" => Variant::Stl,
            "stlm" => Variant::Stlm,
            "decomposed.ts" | "decompose" => Variant::Decomposed,
            _ => return None,
        };
        Some(variant)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class())
    }
}

/// A named parameter estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficient {
    pub term: String,
    pub estimate: f64,
    /// Standard error, when the fitting routine computed one.
    pub std_error: Option<f64>,
}

impl Coefficient {
    pub fn new(term: impl Into<String>, estimate: f64) -> Self {
        Self {
            term: term.into(),
            estimate,
            std_error: None,
        }
    }

    pub fn with_std_error(mut self, std_error: f64) -> Self {
        self.std_error = Some(std_error);
        self
    }
}

/// Per-observation state estimates of a state-space model.
///
/// Vectors may hold `n + 1` entries when the initial state is included;
/// extraction drops the initial row to align with the observations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateComponents {
    pub level: Vec<f64>,
    pub slope: Option<Vec<f64>>,
    pub season: Option<Vec<f64>>,
}

impl StateComponents {
    pub fn new(level: Vec<f64>) -> Self {
        Self {
            level,
            slope: None,
            season: None,
        }
    }

    pub fn with_slope(mut self, slope: Vec<f64>) -> Self {
        self.slope = Some(slope);
        self
    }

    pub fn with_season(mut self, season: Vec<f64>) -> Self {
        self.season = Some(season);
        self
    }
}

/// A fitted model or decomposition, tagged by family.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelResult {
    Arima(ArimaFit),
    Ets(EtsFit),
    /// BATS or TBATS, distinguished by [`BatsFit::is_trigonometric`].
    Bats(BatsFit),
    HoltWinters(HoltWintersFit),
    StructTs(StructTsFit),
    Nnetar(NnetarFit),
    Stl(StlFit),
    Stlm(StlmFit),
    Decomposed(DecomposedTs),
    /// Untyped result identified only by its class tag.
    Generic(GenericModel),
}

impl ModelResult {
    /// Class tag of the result.
    pub fn class(&self) -> &str {
        match self {
            ModelResult::Generic(g) => g.class(),
            other => other.variant().map(|v| v.class()).unwrap_or_default(),
        }
    }

    /// Built-in variant, if the result is typed or its tag names one.
    pub fn variant(&self) -> Option<Variant> {
        match self {
            ModelResult::Arima(_) => Some(Variant::Arima),
            ModelResult::Ets(_) => Some(Variant::Ets),
            ModelResult::Bats(b) if b.is_trigonometric() => Some(Variant::Tbats),
            ModelResult::Bats(_) => Some(Variant::Bats),
            ModelResult::HoltWinters(_) => Some(Variant::HoltWinters),
            ModelResult::StructTs(_) => Some(Variant::StructTs),
            ModelResult::Nnetar(_) => Some(Variant::Nnetar),
            ModelResult::Stl(_) => Some(Variant::Stl),
            ModelResult::Stlm(_) => Some(Variant::Stlm),
            ModelResult::Decomposed(_) => Some(Variant::Decomposed),
            ModelResult::Generic(g) => Variant::from_class(g.class()),
        }
    }

    /// Convert a generic result with a built-in tag into its typed form.
    ///
    /// Typed results and generic results with unknown tags are returned
    /// unchanged; a built-in tag with missing fields is `MalformedInput`.
    pub fn resolve(&self) -> Result<std::borrow::Cow<'_, ModelResult>> {
        use std::borrow::Cow;
        match self {
            ModelResult::Generic(g) => match Variant::from_class(g.class()) {
                Some(variant) => Ok(Cow::Owned(generic::resolve(variant, g)?)),
                None => Ok(Cow::Borrowed(self)),
            },
            typed => Ok(Cow::Borrowed(typed)),
        }
    }
}

macro_rules! impl_from_fit {
    ($($fit:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$fit> for ModelResult {
                fn from(fit: $fit) -> Self {
                    ModelResult::$variant(fit)
                }
            }
        )*
    };
}

impl_from_fit!(
    ArimaFit => Arima,
    EtsFit => Ets,
    BatsFit => Bats,
    HoltWintersFit => HoltWinters,
    StructTsFit => StructTs,
    NnetarFit => Nnetar,
    StlFit => Stl,
    StlmFit => Stlm,
    DecomposedTs => Decomposed,
    GenericModel => Generic,
);

/// Drop a leading initial-state entry so `values` lines up with `n` observations.
pub(crate) fn align_states(values: &[f64], n: usize, name: &str) -> Result<Vec<f64>> {
    match values.len() {
        len if len == n => Ok(values.to_vec()),
        len if len == n + 1 => Ok(values[1..].to_vec()),
        len => Err(SweepError::malformed(format!(
            "state '{name}' has {len} rows for {n} observations"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeSeries;

    #[test]
    fn class_tags_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(Variant::from_class(variant.class()), Some(variant));
        }
        assert_eq!(Variant::from_class("auto.arima"), Some(Variant::Arima));
        assert_eq!(Variant::from_class("decompose"), Some(Variant::Decomposed));
        assert_eq!(Variant::from_class("garch"), None);
    }

    #[test]
    fn model_result_reports_variant_and_class() {
        let fit = BatsFit::tbats(TimeSeries::new(vec![1.0; 24]), 0.2, 1.0).with_seasonal_periods(vec![12.0], vec![3]);
        let model = ModelResult::from(fit);
        assert_eq!(model.variant(), Some(Variant::Tbats));
        assert_eq!(model.class(), "tbats");

        let generic = ModelResult::from(GenericModel::new("prophet"));
        assert_eq!(generic.variant(), None);
        assert_eq!(generic.class(), "prophet");
    }

    #[test]
    fn resolve_leaves_unknown_generic_untouched() {
        let model = ModelResult::from(GenericModel::new("prophet"));
        let resolved = model.resolve().unwrap();
        assert_eq!(resolved.as_ref(), &model);
    }

    #[test]
    fn resolve_converts_builtin_generic() {
        let generic = GenericModel::new("stl")
            .with_field("x", Field::Series(TimeSeries::new(vec![1.0, 2.0])))
            .with_field("seasonal", Field::Vector(vec![0.1, -0.1]))
            .with_field("trend", Field::Vector(vec![1.0, 2.0]))
            .with_field("remainder", Field::Vector(vec![-0.1, 0.1]));
        let model = ModelResult::from(generic);
        let resolved = model.resolve().unwrap();
        assert!(matches!(resolved.as_ref(), ModelResult::Stl(_)));
    }

    #[test]
    fn align_states_drops_initial_row() {
        assert_eq!(align_states(&[0.0, 1.0, 2.0], 2, "level").unwrap(), vec![1.0, 2.0]);
        assert_eq!(align_states(&[1.0, 2.0], 2, "level").unwrap(), vec![1.0, 2.0]);
        assert!(matches!(
            align_states(&[1.0], 3, "level"),
            Err(SweepError::MalformedInput(_))
        ));
    }
}
