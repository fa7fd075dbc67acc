//! Per-call options for the table-producing operations.

use crate::core::TimeSeries;

const DEFAULT_INDEX_NAME: &str = "index";

/// Options for [`Normalizer::augment`](super::Normalizer::augment).
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentOptions {
    data: Option<TimeSeries>,
    index_name: String,
    timetk_idx: bool,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            data: None,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            timetk_idx: false,
        }
    }
}

impl AugmentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Original data to align the fitted values with.
    ///
    /// Its values become `.actual` and its index the index column; it must
    /// be at least as long as the fitted values.
    pub fn with_data(mut self, data: TimeSeries) -> Self {
        self.data = Some(data);
        self
    }

    /// Name of the index column (default `"index"`).
    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = name.into();
        self
    }

    /// Render calendar timestamps instead of numeric periods when available.
    pub fn with_timetk_idx(mut self, timetk_idx: bool) -> Self {
        self.timetk_idx = timetk_idx;
        self
    }

    pub fn data(&self) -> Option<&TimeSeries> {
        self.data.as_ref()
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn timetk_idx(&self) -> bool {
        self.timetk_idx
    }
}

/// Options for [`Normalizer::tidy_decomp`](super::Normalizer::tidy_decomp).
#[derive(Debug, Clone, PartialEq)]
pub struct DecompOptions {
    index_name: String,
    timetk_idx: bool,
}

impl Default for DecompOptions {
    fn default() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_string(),
            timetk_idx: false,
        }
    }
}

impl DecompOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = name.into();
        self
    }

    pub fn with_timetk_idx(mut self, timetk_idx: bool) -> Self {
        self.timetk_idx = timetk_idx;
        self
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn timetk_idx(&self) -> bool {
        self.timetk_idx
    }
}

/// Options for [`Normalizer::sweep`](super::Normalizer::sweep).
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOptions {
    fitted: bool,
    index_name: String,
    timetk_idx: bool,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            fitted: true,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            timetk_idx: false,
        }
    }
}

impl SweepOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Include the historical actuals before the forecast rows (default `true`).
    pub fn with_fitted(mut self, fitted: bool) -> Self {
        self.fitted = fitted;
        self
    }

    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = name.into();
        self
    }

    pub fn with_timetk_idx(mut self, timetk_idx: bool) -> Self {
        self.timetk_idx = timetk_idx;
        self
    }

    pub fn fitted(&self) -> bool {
        self.fitted
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn timetk_idx(&self) -> bool {
        self.timetk_idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let augment = AugmentOptions::default();
        assert_eq!(augment.index_name(), "index");
        assert!(augment.data().is_none());
        assert!(!augment.timetk_idx());

        let sweep = SweepOptions::default();
        assert!(sweep.fitted());
        assert!(!sweep.timetk_idx());
    }

    #[test]
    fn builders_override() {
        let opts = SweepOptions::new()
            .with_fitted(false)
            .with_index_name("date")
            .with_timetk_idx(true);
        assert!(!opts.fitted());
        assert_eq!(opts.index_name(), "date");
        assert!(opts.timetk_idx());

        let opts = AugmentOptions::new().with_data(TimeSeries::new(vec![1.0]));
        assert_eq!(opts.data().map(TimeSeries::len), Some(1));
    }
}
