//! Utility functions shared by the extraction routines.

pub mod metrics;
pub mod stats;

pub use metrics::{training_accuracy, TrainingAccuracy};
