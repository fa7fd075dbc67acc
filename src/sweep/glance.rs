//! One-row model summaries.

use super::in_sample;
use crate::error::{Result, SweepError};
use crate::models::{InSample, ModelResult};
use crate::table::{ColumnValues, Table};
use crate::utils::{training_accuracy, TrainingAccuracy};

/// Columns of every glance table, in order.
pub const GLANCE_COLUMNS: [&str; 12] = [
    "model.desc",
    "sigma",
    "logLik",
    "AIC",
    "BIC",
    "ME",
    "RMSE",
    "MAE",
    "MPE",
    "MAPE",
    "MASE",
    "ACF1",
];

/// Summary statistics of one model, rendered as a single-row table.
///
/// Statistics a model family does not provide stay `None` and become
/// null cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Glance {
    description: String,
    sigma: Option<f64>,
    log_likelihood: Option<f64>,
    aic: Option<f64>,
    bic: Option<f64>,
    accuracy: Option<TrainingAccuracy>,
}

impl Glance {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            sigma: None,
            log_likelihood: None,
            aic: None,
            bic: None,
            accuracy: None,
        }
    }

    pub fn with_sigma(mut self, sigma: Option<f64>) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_log_likelihood(mut self, log_likelihood: Option<f64>) -> Self {
        self.log_likelihood = log_likelihood;
        self
    }

    pub fn with_information_criteria(mut self, aic: Option<f64>, bic: Option<f64>) -> Self {
        self.aic = aic;
        self.bic = bic;
        self
    }

    pub fn with_accuracy(mut self, accuracy: Option<TrainingAccuracy>) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn into_table(self) -> Result<Table> {
        let acc = self.accuracy.as_ref();
        let cells = [
            self.sigma,
            self.log_likelihood,
            self.aic,
            self.bic,
            acc.map(|a| a.me),
            acc.map(|a| a.rmse),
            acc.map(|a| a.mae),
            acc.and_then(|a| a.mpe),
            acc.and_then(|a| a.mape),
            acc.and_then(|a| a.mase),
            acc.and_then(|a| a.acf1),
        ];

        let mut table =
            Table::new().with_column(GLANCE_COLUMNS[0], ColumnValues::texts([self.description]))?;
        for (name, cell) in GLANCE_COLUMNS[1..].iter().zip(cells) {
            table.push_column(*name, ColumnValues::optional_numbers([cell]))?;
        }
        Ok(table)
    }
}

/// Accuracy of the in-sample fit, scaled by the series' seasonal period.
///
/// `None` when no observation has both a finite actual and a finite
/// residual.
pub fn in_sample_accuracy(data: &InSample, class: &str) -> Result<Option<TrainingAccuracy>> {
    let (_, residuals) = data.resolved(class)?;
    let actual = data.tail(residuals.len(), class)?;
    match training_accuracy(actual, &residuals, data.series().seasonal_period()) {
        Ok(accuracy) => Ok(Some(accuracy)),
        Err(SweepError::EmptyData) => Ok(None),
        Err(err) => Err(err),
    }
}

fn residual_sigma(data: &InSample, class: &str) -> Result<Option<f64>> {
    let (_, residuals) = data.resolved(class)?;
    let finite: Vec<f64> = residuals.into_iter().filter(|r| r.is_finite()).collect();
    if finite.is_empty() {
        return Ok(None);
    }
    let mse = finite.iter().map(|r| r * r).sum::<f64>() / finite.len() as f64;
    Ok(Some(mse.sqrt()))
}

/// Description, sigma, likelihood and information criteria.
fn fit_statistics(model: &ModelResult) -> Result<Glance> {
    let glance = match model {
        ModelResult::Arima(fit) => Glance::new(fit.description())
            .with_sigma(Some(fit.sigma2().sqrt()))
            .with_log_likelihood(fit.log_likelihood())
            .with_information_criteria(fit.aic(), fit.bic()),
        ModelResult::Ets(fit) => Glance::new(fit.description())
            .with_sigma(Some(fit.sigma2().sqrt()))
            .with_log_likelihood(fit.log_likelihood())
            .with_information_criteria(fit.aic(), fit.bic()),
        ModelResult::Bats(fit) => Glance::new(fit.description())
            .with_sigma(Some(fit.variance().sqrt()))
            .with_log_likelihood(fit.likelihood())
            .with_information_criteria(fit.aic(), None),
        ModelResult::HoltWinters(fit) => Glance::new(fit.description()).with_sigma(fit.sigma()?),
        ModelResult::StructTs(fit) => Glance::new(fit.description())
            .with_sigma(fit.sigma())
            .with_log_likelihood(fit.log_likelihood())
            .with_information_criteria(fit.aic(), fit.bic()),
        ModelResult::Nnetar(fit) => Glance::new(fit.description())
            .with_sigma(residual_sigma(fit.in_sample(), model.class())?),
        ModelResult::Stlm(fit) => {
            let inner = fit.model().resolve()?;
            let stats = fit_statistics(&inner)?;
            Glance {
                description: format!("STL + {}", stats.description),
                ..stats
            }
        }
        ModelResult::Stl(_) | ModelResult::Decomposed(_) | ModelResult::Generic(_) => {
            return Err(SweepError::unsupported(model.class(), "glance"))
        }
    };
    Ok(glance)
}

pub(crate) fn summarize(model: &ModelResult) -> Result<Glance> {
    let stats = fit_statistics(model)?;
    let data = in_sample(model).ok_or_else(|| SweepError::unsupported(model.class(), "glance"))?;
    Ok(stats.with_accuracy(in_sample_accuracy(data, model.class())?))
}

pub(crate) fn glance(model: &ModelResult) -> Result<Table> {
    summarize(model)?.into_table()
}
