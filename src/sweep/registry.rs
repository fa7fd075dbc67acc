//! Extraction strategies for model families outside the built-in set.

use super::options::{AugmentOptions, DecompOptions};
use crate::error::{Result, SweepError};
use crate::models::{GenericModel, Variant};
use crate::table::Table;
use std::collections::HashMap;

/// Table extraction for one class of [`GenericModel`].
///
/// Every method defaults to `UnsupportedVariant`, so an implementation
/// provides only the operations its model family supports.
///
/// # Example
///
/// ```
/// use anofox_sweep::models::GenericModel;
/// use anofox_sweep::sweep::{coefficient_table, Extractor};
/// use anofox_sweep::models::Coefficient;
/// use anofox_sweep::{Result, Table};
///
/// struct Prophet;
///
/// impl Extractor for Prophet {
///     fn tidy(&self, model: &GenericModel) -> Result<Table> {
///         let k = model.number("k")?;
///         coefficient_table(&[Coefficient::new("k", k)])
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    fn tidy(&self, model: &GenericModel) -> Result<Table> {
        Err(SweepError::unsupported(model.class(), "tidy"))
    }

    /// Must return exactly one row.
    fn glance(&self, model: &GenericModel) -> Result<Table> {
        Err(SweepError::unsupported(model.class(), "glance"))
    }

    fn augment(&self, model: &GenericModel, options: &AugmentOptions) -> Result<Table> {
        let _ = options;
        Err(SweepError::unsupported(model.class(), "augment"))
    }

    fn tidy_decomp(&self, model: &GenericModel, options: &DecompOptions) -> Result<Table> {
        let _ = options;
        Err(SweepError::unsupported(model.class(), "tidy_decomp"))
    }
}

/// Boxed extractor.
pub type BoxedExtractor = Box<dyn Extractor>;

/// Extractors keyed by class tag.
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<String, BoxedExtractor>,
}

impl ExtractorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extractor for `class`, replacing any earlier one.
    ///
    /// Built-in class tags (and their aliases) cannot be overridden.
    pub fn register(&mut self, class: impl Into<String>, extractor: BoxedExtractor) -> Result<()> {
        let class = class.into();
        if let Some(variant) = Variant::from_class(&class) {
            return Err(SweepError::InvalidParameter(format!(
                "class '{class}' is handled by the built-in {variant} extraction"
            )));
        }
        if class.is_empty() {
            return Err(SweepError::InvalidParameter(
                "class tag must not be empty".to_string(),
            ));
        }
        if self.extractors.insert(class.clone(), extractor).is_some() {
            tracing::debug!(class = %class, "replaced registered extractor");
        }
        Ok(())
    }

    pub fn get(&self, class: &str) -> Option<&dyn Extractor> {
        self.extractors.get(class).map(|e| e.as_ref())
    }

    pub fn contains(&self, class: &str) -> bool {
        self.extractors.contains_key(class)
    }

    /// Get the number of registered extractors.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Registered class tags, sorted.
    pub fn classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self.extractors.keys().map(String::as_str).collect();
        classes.sort_unstable();
        classes
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("classes", &self.classes())
            .finish()
    }
}
