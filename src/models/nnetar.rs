//! Neural network autoregression fit snapshot.

use super::fit::impl_in_sample;
use super::InSample;
use crate::core::TimeSeries;

/// Fitted NNAR(p,P,k)[m] model.
///
/// Network weights are not exposed; the snapshot keeps the architecture
/// and the in-sample fit. The first `max(p, P*m)` fitted values are
/// undefined and are stored as NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct NnetarFit {
    /// Non-seasonal lags.
    p: usize,
    /// Seasonal lags.
    seasonal_p: usize,
    /// Hidden layer size.
    size: usize,
    period: usize,
    data: InSample,
}

impl_in_sample!(NnetarFit);

impl NnetarFit {
    pub fn new(series: TimeSeries, p: usize, size: usize) -> Self {
        Self {
            p,
            seasonal_p: 0,
            size,
            period: 1,
            data: InSample::new(series),
        }
    }

    pub fn with_seasonal(mut self, seasonal_p: usize, period: usize) -> Self {
        self.seasonal_p = seasonal_p;
        self.period = period;
        self
    }

    pub fn p(&self) -> usize {
        self.p
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// `NNAR(p,k)` or `NNAR(p,P,k)[m]`.
    pub fn description(&self) -> String {
        if self.seasonal_p > 0 && self.period > 1 {
            format!(
                "NNAR({},{},{})[{}]",
                self.p, self.seasonal_p, self.size, self.period
            )
        } else {
            format!("NNAR({},{})", self.p, self.size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_includes_seasonal_lags() {
        let series = TimeSeries::new(vec![1.0; 30]);
        assert_eq!(NnetarFit::new(series.clone(), 3, 2).description(), "NNAR(3,2)");
        assert_eq!(
            NnetarFit::new(series, 2, 2).with_seasonal(1, 12).description(),
            "NNAR(2,1,2)[12]"
        );
    }
}
