//! Error types for the anofox-sweep library.

use thiserror::Error;

/// Result type alias for normalizer operations.
pub type Result<T> = std::result::Result<T, SweepError>;

/// Errors that can occur while turning model output into tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    /// No extraction strategy exists for this model family and operation.
    #[error("unsupported variant: no {operation} extraction for class '{class}'")]
    UnsupportedVariant {
        class: String,
        operation: &'static str,
    },

    /// The model is a supported variant but lacks fields the strategy needs.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl SweepError {
    pub(crate) fn unsupported(class: impl Into<String>, operation: &'static str) -> Self {
        SweepError::UnsupportedVariant {
            class: class.into(),
            operation,
        }
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        SweepError::MalformedInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = SweepError::unsupported("garch", "tidy");
        assert_eq!(
            err.to_string(),
            "unsupported variant: no tidy extraction for class 'garch'"
        );

        let err = SweepError::malformed("Arima model has no 'coef' field");
        assert_eq!(
            err.to_string(),
            "malformed input: Arima model has no 'coef' field"
        );

        let err = SweepError::DimensionMismatch {
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, got 2");

        assert_eq!(SweepError::EmptyData.to_string(), "empty input data");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = SweepError::unsupported("x", "glance");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
        assert_ne!(err1, SweepError::EmptyData);
    }
}
