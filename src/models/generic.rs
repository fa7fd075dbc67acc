//! Untyped model results identified by class tag.
//!
//! A [`GenericModel`] is a bag of named fields, the shape a model object
//! has when it arrives from outside the crate. Results whose tag names a
//! built-in family are converted into the typed snapshot by [`resolve`];
//! other tags are handled by registered extractors.
//!
//! Field names follow the usual accessor names of the fitted objects:
//!
//! | Class | Required | Optional |
//! |---|---|---|
//! | `Arima` | `x`, `coef`, `sigma2` | `arma`, `var.coef`, `loglik`, `aic`, `aicc`, `bic`, `fitted`, `residuals` |
//! | `ets` | `x`, `method`, `par`, `sigma2` | `loglik`, `aic`, `aicc`, `bic`, `fitted`, `residuals`, `level`, `slope`, `season` |
//! | `bats`/`tbats` | `x`, `alpha`, `variance` | `lambda`, `beta`, `damping.parameter`, `gamma.values`, `gamma.one.values`, `gamma.two.values`, `ar.coefficients`, `ma.coefficients`, `seasonal.periods`, `k.vector`, `likelihood`, `AIC`, `fitted.values`, `errors`, `level`, `slope`, `season` |
//! | `HoltWinters` | `x`, `alpha`, `coefficients`, `SSE` | `beta`, `gamma`, `seasonal`, `fitted` |
//! | `StructTS` | `x`, `type`, `coef` | `loglik`, `fitted`, `residuals`, `level`, `slope`, `season` |
//! | `nnetar` | `x`, `p`, `size` | `P`, `m`, `fitted`, `residuals` |
//! | `stl` | `x`, `seasonal`, `trend`, `remainder` | |
//! | `stlm` | `stl`, `model` | `fitted`, `residuals` |
//! | `decomposed.ts` | `x`, `seasonal`, `trend`, `random` | `type` |

use super::{
    ArimaFit, ArimaOrder, BatsFit, Coefficient, DecomposedTs, DecompositionType, ETSSpec, EtsFit,
    HoltWintersFit, HoltWintersSeasonal, ModelResult, NnetarFit, StateComponents, StlFit, StlmFit,
    StructTsFit, StructTsKind, Variant,
};
use crate::core::TimeSeries;
use crate::error::{Result, SweepError};
use std::collections::BTreeMap;

/// A field value of a generic model.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Number(f64),
    Vector(Vec<f64>),
    /// Named numeric vector, e.g. coefficients.
    Named(Vec<(String, f64)>),
    Text(String),
    Series(TimeSeries),
    /// Nested model, e.g. the components of an STL + model fit.
    Model(Box<ModelResult>),
}

impl Field {
    fn kind(&self) -> &'static str {
        match self {
            Field::Number(_) => "number",
            Field::Vector(_) => "vector",
            Field::Named(_) => "named vector",
            Field::Text(_) => "text",
            Field::Series(_) => "series",
            Field::Model(_) => "model",
        }
    }
}

/// Model result known only by its class tag and fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericModel {
    class: String,
    fields: BTreeMap<String, Field>,
}

macro_rules! field_getters {
    ($($name:ident, $opt:ident => $variant:ident($ty:ty), $kind:literal;)*) => {
        $(
            #[doc = concat!("Required ", $kind, " field.")]
            pub fn $name(&self, name: &str) -> Result<$ty> {
                self.$opt(name)?.ok_or_else(|| self.missing(name))
            }

            #[doc = concat!("Optional ", $kind, " field; present with another type is an error.")]
            pub fn $opt(&self, name: &str) -> Result<Option<$ty>> {
                match self.fields.get(name) {
                    None => Ok(None),
                    Some(Field::$variant(v)) => Ok(Some(v)),
                    Some(other) => Err(self.wrong_type(name, $kind, other)),
                }
            }
        )*
    };
}

impl GenericModel {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Field) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn missing(&self, name: &str) -> SweepError {
        SweepError::malformed(format!("{}: missing field '{name}'", self.class))
    }

    fn wrong_type(&self, name: &str, expected: &str, got: &Field) -> SweepError {
        SweepError::malformed(format!(
            "{}: field '{name}' is a {}, expected a {expected}",
            self.class,
            got.kind()
        ))
    }

    field_getters! {
        vector, vector_opt => Vector(&Vec<f64>), "vector";
        named, named_opt => Named(&Vec<(String, f64)>), "named vector";
        text, text_opt => Text(&String), "text";
        series, series_opt => Series(&TimeSeries), "series";
        model, model_opt => Model(&Box<ModelResult>), "model";
    }

    /// Required scalar field.
    pub fn number(&self, name: &str) -> Result<f64> {
        self.number_opt(name)?.ok_or_else(|| self.missing(name))
    }

    /// Optional scalar field. A one-element vector counts as a scalar.
    pub fn number_opt(&self, name: &str) -> Result<Option<f64>> {
        match self.fields.get(name) {
            None => Ok(None),
            Some(Field::Number(v)) => Ok(Some(*v)),
            Some(Field::Vector(v)) if v.len() == 1 => Ok(Some(v[0])),
            Some(other) => Err(self.wrong_type(name, "number", other)),
        }
    }

    /// Optional count field, e.g. a lag order.
    fn count_opt(&self, name: &str) -> Result<Option<usize>> {
        match self.number_opt(name)? {
            None => Ok(None),
            Some(v) if v >= 0.0 && v.fract() == 0.0 => Ok(Some(v as usize)),
            Some(v) => Err(SweepError::malformed(format!(
                "{}: field '{name}' must be a non-negative integer, got {v}",
                self.class
            ))),
        }
    }

    fn count(&self, name: &str) -> Result<usize> {
        self.count_opt(name)?.ok_or_else(|| self.missing(name))
    }

    /// Numeric vector; a scalar counts as a one-element vector.
    fn values_opt(&self, name: &str) -> Result<Option<Vec<f64>>> {
        match self.fields.get(name) {
            None => Ok(None),
            Some(Field::Number(v)) => Ok(Some(vec![*v])),
            Some(Field::Vector(v)) => Ok(Some(v.clone())),
            Some(other) => Err(self.wrong_type(name, "vector", other)),
        }
    }

    fn states_opt(&self) -> Result<Option<StateComponents>> {
        let Some(level) = self.vector_opt("level")? else {
            return Ok(None);
        };
        let mut states = StateComponents::new(level.clone());
        if let Some(slope) = self.vector_opt("slope")? {
            states = states.with_slope(slope.clone());
        }
        if let Some(season) = self.vector_opt("season")? {
            states = states.with_season(season.clone());
        }
        Ok(Some(states))
    }
}

/// Attach optional in-sample vectors stored under the given field names.
macro_rules! attach_in_sample {
    ($fit:expr, $g:expr, $fitted:literal, $residuals:literal) => {{
        let mut fit = $fit;
        if let Some(v) = $g.vector_opt($fitted)? {
            fit = fit.with_fitted(v.clone());
        }
        if let Some(v) = $g.vector_opt($residuals)? {
            fit = fit.with_residuals(v.clone());
        }
        fit
    }};
}

/// Convert a generic result into the typed snapshot of `variant`.
pub(crate) fn resolve(variant: Variant, g: &GenericModel) -> Result<ModelResult> {
    let model: ModelResult = match variant {
        Variant::Arima => arima(g)?.into(),
        Variant::Ets => ets(g)?.into(),
        Variant::Bats => bats(g, false)?.into(),
        Variant::Tbats => bats(g, true)?.into(),
        Variant::HoltWinters => holt_winters(g)?.into(),
        Variant::StructTs => struct_ts(g)?.into(),
        Variant::Nnetar => nnetar(g)?.into(),
        Variant::Stl => stl(g)?.into(),
        Variant::Stlm => stlm(g)?.into(),
        Variant::Decomposed => decomposed(g)?.into(),
    };
    Ok(model)
}

fn arima(g: &GenericModel) -> Result<ArimaFit> {
    let coef = g.named("coef")?;
    let order = match g.vector_opt("arma")? {
        // p, q, P, Q, m, d, D
        Some(arma) => {
            let [p, q, sp, sq, m, d, sd] = arma.as_slice() else {
                return Err(SweepError::malformed(format!(
                    "{}: 'arma' needs 7 entries, got {}",
                    g.class(),
                    arma.len()
                )));
            };
            let n = |v: &f64| v.max(0.0) as usize;
            ArimaOrder::new(n(p), n(d), n(q)).with_seasonal(n(sp), n(sd), n(sq), n(m))
        }
        None => {
            let count = |prefix: &str| {
                coef.iter()
                    .filter(|(name, _)| {
                        name.strip_prefix(prefix)
                            .is_some_and(|rest| rest.parse::<usize>().is_ok())
                    })
                    .count()
            };
            ArimaOrder::new(count("ar"), 0, count("ma"))
        }
    };

    let mut fit = ArimaFit::new(order, g.series("x")?.clone(), g.number("sigma2")?);
    for (name, value) in coef {
        fit = fit.with_coefficient(Coefficient::new(name.as_str(), *value));
    }
    if let Some(var) = g.vector_opt("var.coef")? {
        fit = fit.with_std_errors(var.iter().map(|v| v.sqrt()).collect());
    }
    if let (Some(ll), Some(aic), Some(bic)) = (
        g.number_opt("loglik")?,
        g.number_opt("aic")?,
        g.number_opt("bic")?,
    ) {
        fit = fit.with_information_criteria(ll, aic, g.number_opt("aicc")?, bic);
    }
    Ok(attach_in_sample!(fit, g, "fitted", "residuals"))
}

fn ets(g: &GenericModel) -> Result<EtsFit> {
    let spec = ETSSpec::parse(g.text("method")?)?;
    let par = g.named("par")?;
    let lookup = |name: &str| par.iter().find(|(n, _)| n == name).map(|(_, v)| *v);
    let alpha = lookup("alpha").ok_or_else(|| {
        SweepError::malformed(format!("{}: 'par' has no 'alpha'", g.class()))
    })?;
    let level = lookup("l").ok_or_else(|| {
        SweepError::malformed(format!("{}: 'par' has no 'l'", g.class()))
    })?;

    let mut fit = EtsFit::new(spec, g.series("x")?.clone(), alpha, level, g.number("sigma2")?);
    if let Some(beta) = lookup("beta") {
        fit = fit.with_beta(beta);
    }
    if let Some(gamma) = lookup("gamma") {
        fit = fit.with_gamma(gamma);
    }
    if let Some(phi) = lookup("phi") {
        fit = fit.with_phi(phi);
    }
    if let Some(b) = lookup("b") {
        fit = fit.with_initial_slope(b);
    }
    let seasonal: Vec<f64> = (0..)
        .map_while(|i| lookup(&format!("s{i}")))
        .collect();
    if !seasonal.is_empty() {
        fit = fit.with_initial_seasonal(seasonal);
    }
    if let (Some(ll), Some(aic), Some(bic)) = (
        g.number_opt("loglik")?,
        g.number_opt("aic")?,
        g.number_opt("bic")?,
    ) {
        fit = fit.with_information_criteria(ll, aic, g.number_opt("aicc")?, bic);
    }
    if let Some(states) = g.states_opt()? {
        fit = fit.with_states(states);
    }
    Ok(attach_in_sample!(fit, g, "fitted", "residuals"))
}

fn bats(g: &GenericModel, trigonometric: bool) -> Result<BatsFit> {
    let series = g.series("x")?.clone();
    let (alpha, variance) = (g.number("alpha")?, g.number("variance")?);
    let mut fit = if trigonometric {
        BatsFit::tbats(series, alpha, variance)
    } else {
        BatsFit::bats(series, alpha, variance)
    };

    if let Some(lambda) = g.number_opt("lambda")? {
        fit = fit.with_lambda(lambda);
    }
    if let Some(beta) = g.number_opt("beta")? {
        fit = fit.with_beta(beta);
    }
    if let Some(phi) = g.number_opt("damping.parameter")? {
        fit = fit.with_damping(phi);
    }
    if trigonometric {
        let one = g.values_opt("gamma.one.values")?.unwrap_or_default();
        let two = g.values_opt("gamma.two.values")?.unwrap_or_default();
        fit = fit.with_trig_gamma(one, two);
    } else if let Some(gamma) = g.values_opt("gamma.values")? {
        fit = fit.with_gamma(gamma);
    }
    fit = fit.with_arma(
        g.values_opt("ar.coefficients")?.unwrap_or_default(),
        g.values_opt("ma.coefficients")?.unwrap_or_default(),
    );
    if let Some(periods) = g.values_opt("seasonal.periods")? {
        let k = g
            .values_opt("k.vector")?
            .unwrap_or_default()
            .into_iter()
            .map(|k| k.max(0.0) as usize)
            .collect();
        fit = fit.with_seasonal_periods(periods, k);
    }
    if let (Some(ll), Some(aic)) = (g.number_opt("likelihood")?, g.number_opt("AIC")?) {
        fit = fit.with_likelihood(ll, aic);
    }
    if let Some(states) = g.states_opt()? {
        fit = fit.with_states(states);
    }
    Ok(attach_in_sample!(fit, g, "fitted.values", "errors"))
}

fn holt_winters(g: &GenericModel) -> Result<HoltWintersFit> {
    let coefficients = g.named("coefficients")?;
    let lookup = |name: &str| coefficients.iter().find(|(n, _)| n == name).map(|(_, v)| *v);
    let level = lookup("a").ok_or_else(|| {
        SweepError::malformed(format!("{}: 'coefficients' has no 'a'", g.class()))
    })?;

    let mut fit = HoltWintersFit::new(g.series("x")?.clone(), g.number("alpha")?, level, g.number("SSE")?);
    match (g.number_opt("beta")?, lookup("b")) {
        (Some(beta), Some(b)) => fit = fit.with_trend(beta, b),
        (None, None) => {}
        (Some(_), None) => {
            return Err(SweepError::malformed(format!(
                "{}: 'beta' given but 'coefficients' has no 'b'",
                g.class()
            )))
        }
        (None, Some(_)) => {
            return Err(SweepError::malformed(format!(
                "{}: 'coefficients' has 'b' but 'beta' is missing",
                g.class()
            )))
        }
    }
    if let Some(gamma) = g.number_opt("gamma")? {
        let seasonal = match g.text_opt("seasonal")?.map(String::as_str) {
            None | Some("additive") => HoltWintersSeasonal::Additive,
            Some("multiplicative") => HoltWintersSeasonal::Multiplicative,
            Some(other) => {
                return Err(SweepError::malformed(format!(
                    "{}: unknown seasonal type '{other}'",
                    g.class()
                )))
            }
        };
        let s = (1..).map_while(|i| lookup(&format!("s{i}"))).collect();
        fit = fit.with_season(seasonal, gamma, s);
    }
    if let Some(fitted) = g.vector_opt("fitted")? {
        fit = fit.with_fitted(fitted.clone());
    }
    Ok(fit)
}

fn struct_ts(g: &GenericModel) -> Result<StructTsFit> {
    let name = g.text("type")?;
    let kind = StructTsKind::parse(name).ok_or_else(|| {
        SweepError::malformed(format!("{}: unknown model type '{name}'", g.class()))
    })?;
    let mut fit = StructTsFit::new(kind, g.series("x")?.clone());
    for (term, value) in g.named("coef")? {
        fit = fit.with_variance(term.as_str(), *value);
    }
    if let Some(ll) = g.number_opt("loglik")? {
        fit = fit.with_log_likelihood(ll);
    }
    if let Some(states) = g.states_opt()? {
        fit = fit.with_states(states);
    }
    Ok(attach_in_sample!(fit, g, "fitted", "residuals"))
}

fn nnetar(g: &GenericModel) -> Result<NnetarFit> {
    let mut fit = NnetarFit::new(g.series("x")?.clone(), g.count("p")?, g.count("size")?);
    if let Some(seasonal_p) = g.count_opt("P")? {
        fit = fit.with_seasonal(seasonal_p, g.count_opt("m")?.unwrap_or(1));
    }
    Ok(attach_in_sample!(fit, g, "fitted", "residuals"))
}

fn stl(g: &GenericModel) -> Result<StlFit> {
    Ok(StlFit::new(
        g.series("x")?.clone(),
        g.vector("seasonal")?.clone(),
        g.vector("trend")?.clone(),
        g.vector("remainder")?.clone(),
    ))
}

fn stlm(g: &GenericModel) -> Result<StlmFit> {
    let decomposition = g.model("stl")?.resolve()?;
    let ModelResult::Stl(stl) = decomposition.as_ref() else {
        return Err(SweepError::malformed(format!(
            "{}: field 'stl' holds a '{}' result",
            g.class(),
            decomposition.class()
        )));
    };
    let inner = g.model("model")?.resolve()?.into_owned();
    let fit = StlmFit::new(stl.clone(), inner);
    Ok(attach_in_sample!(fit, g, "fitted", "residuals"))
}

fn decomposed(g: &GenericModel) -> Result<DecomposedTs> {
    let kind = match g.text_opt("type")?.map(String::as_str) {
        None | Some("additive") => DecompositionType::Additive,
        Some("multiplicative") => DecompositionType::Multiplicative,
        Some(other) => {
            return Err(SweepError::malformed(format!(
                "{}: unknown decomposition type '{other}'",
                g.class()
            )))
        }
    };
    Ok(DecomposedTs::new(
        kind,
        g.series("x")?.clone(),
        g.vector("seasonal")?.clone(),
        g.vector("trend")?.clone(),
        g.vector("random")?.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(pairs: &[(&str, f64)]) -> Field {
        Field::Named(pairs.iter().map(|(n, v)| (n.to_string(), *v)).collect())
    }

    fn series() -> Field {
        Field::Series(TimeSeries::new(vec![1.0, 2.0, 3.0, 4.0]))
    }

    #[test]
    fn arima_infers_order_from_coefficient_names() {
        let g = GenericModel::new("Arima")
            .with_field("x", series())
            .with_field("coef", named(&[("ar1", 0.5), ("ar2", -0.1), ("ma1", 0.3)]))
            .with_field("sigma2", Field::Number(1.0));
        let fit = arima(&g).unwrap();
        assert_eq!(fit.order(), ArimaOrder::new(2, 0, 1));
        assert_eq!(fit.coefficients().len(), 3);
    }

    #[test]
    fn arima_reads_arma_vector() {
        let g = GenericModel::new("Arima")
            .with_field("x", series())
            .with_field("coef", named(&[("ma1", 0.3), ("sma1", -0.6)]))
            .with_field("sigma2", Field::Number(1.0))
            .with_field("arma", Field::Vector(vec![0.0, 1.0, 0.0, 1.0, 12.0, 1.0, 1.0]));
        let fit = arima(&g).unwrap();
        assert_eq!(fit.description(), "ARIMA(0,1,1)(0,1,1)[12]");
    }

    #[test]
    fn missing_field_is_malformed() {
        let g = GenericModel::new("Arima").with_field("x", series());
        assert_eq!(
            resolve(Variant::Arima, &g).unwrap_err(),
            SweepError::MalformedInput("Arima: missing field 'coef'".to_string())
        );
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let g = GenericModel::new("nnetar")
            .with_field("x", series())
            .with_field("p", Field::Text("two".to_string()))
            .with_field("size", Field::Number(2.0));
        assert_eq!(
            resolve(Variant::Nnetar, &g).unwrap_err(),
            SweepError::MalformedInput(
                "nnetar: field 'p' is a text, expected a number".to_string()
            )
        );
    }

    #[test]
    fn ets_reads_parameter_vector() {
        let g = GenericModel::new("ets")
            .with_field("x", series())
            .with_field("method", Field::Text("ETS(A,N,A)".to_string()))
            .with_field(
                "par",
                named(&[("alpha", 0.3), ("gamma", 0.1), ("l", 2.0), ("s0", 1.0), ("s1", -1.0)]),
            )
            .with_field("sigma2", Field::Number(0.5));
        let fit = ets(&g).unwrap();
        assert_eq!(fit.seasonal_period(), 2);
        assert_eq!(fit.parameters().unwrap().len(), 5);
    }

    fn holt_winters_model(coefficients: &[(&str, f64)]) -> GenericModel {
        GenericModel::new("HoltWinters")
            .with_field("x", series())
            .with_field("alpha", Field::Number(0.5))
            .with_field("SSE", Field::Number(2.0))
            .with_field("coefficients", named(coefficients))
    }

    #[test]
    fn holt_winters_reads_trend() {
        let g = holt_winters_model(&[("a", 4.0), ("b", 1.0)]).with_field("beta", Field::Number(0.2));
        let fit = holt_winters(&g).unwrap();
        assert_eq!(fit.description(), "HoltWinters(trend)");
        assert_eq!(fit.parameters().unwrap().len(), 4);
    }

    #[test]
    fn holt_winters_trend_needs_beta_and_slope() {
        let beta_only = holt_winters_model(&[("a", 4.0)]).with_field("beta", Field::Number(0.2));
        assert_eq!(
            holt_winters(&beta_only).unwrap_err(),
            SweepError::MalformedInput(
                "HoltWinters: 'beta' given but 'coefficients' has no 'b'".to_string()
            )
        );

        let slope_only = holt_winters_model(&[("a", 4.0), ("b", 1.0)]);
        assert!(matches!(
            holt_winters(&slope_only),
            Err(SweepError::MalformedInput(_))
        ));
    }

    #[test]
    fn stlm_requires_an_stl_decomposition() {
        let inner = GenericModel::new("ets");
        let g = GenericModel::new("stlm")
            .with_field("stl", Field::Model(Box::new(GenericModel::new("prophet").into())))
            .with_field("model", Field::Model(Box::new(inner.into())));
        assert!(matches!(
            resolve(Variant::Stlm, &g),
            Err(SweepError::MalformedInput(_))
        ));
    }
}
