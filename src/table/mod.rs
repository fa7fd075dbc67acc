//! Rectangular output tables.
//!
//! A [`Table`] is an ordered set of equally long, named, typed columns.
//! Numeric cells are `Option<f64>`: a statistic a model does not provide
//! is a `None` cell, never a missing column.

use crate::error::{Result, SweepError};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One entry of a time index column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IndexValue {
    /// Numeric period, e.g. `2015.25`.
    Period(f64),
    /// Calendar timestamp.
    Timestamp(DateTime<Utc>),
}

impl IndexValue {
    pub fn as_period(&self) -> Option<f64> {
        match self {
            IndexValue::Period(p) => Some(*p),
            IndexValue::Timestamp(_) => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            IndexValue::Timestamp(t) => Some(*t),
            IndexValue::Period(_) => None,
        }
    }
}

/// Typed storage of a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum ColumnValues {
    Index(Vec<IndexValue>),
    Text(Vec<Option<String>>),
    Number(Vec<Option<f64>>),
}

impl ColumnValues {
    /// Numeric column from raw values; non-finite values become nulls.
    pub fn numbers(values: &[f64]) -> Self {
        ColumnValues::Number(values.iter().map(|&v| finite(v)).collect())
    }

    /// Numeric column from optional values; non-finite values become nulls.
    pub fn optional_numbers(values: impl IntoIterator<Item = Option<f64>>) -> Self {
        ColumnValues::Number(values.into_iter().map(|v| v.and_then(finite)).collect())
    }

    /// Text column with every cell present.
    pub fn texts<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        ColumnValues::Text(values.into_iter().map(|s| Some(s.into())).collect())
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Index(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Number(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn value(&self, row: usize) -> Option<Value> {
        match self {
            ColumnValues::Index(v) => v.get(row).map(|i| match i {
                IndexValue::Period(p) => Value::Period(*p),
                IndexValue::Timestamp(t) => Value::Timestamp(*t),
            }),
            ColumnValues::Text(v) => v
                .get(row)
                .map(|s| s.clone().map(Value::Text).unwrap_or(Value::Null)),
            ColumnValues::Number(v) => v
                .get(row)
                .map(|x| x.map(Value::Number).unwrap_or(Value::Null)),
        }
    }
}

/// `Some(v)` for finite values.
pub(crate) fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    #[serde(flatten)]
    values: ColumnValues,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A single cell, as returned by row access.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Number(f64),
    Text(String),
    Period(f64),
    Timestamp(DateTime<Utc>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// A rectangular table of named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    #[serde(rename = "rows")]
    n_rows: usize,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, consuming and returning the table.
    pub fn with_column(mut self, name: impl Into<String>, values: ColumnValues) -> Result<Self> {
        self.push_column(name, values)?;
        Ok(self)
    }

    /// Append a column. The first column fixes the row count.
    pub fn push_column(&mut self, name: impl Into<String>, values: ColumnValues) -> Result<()> {
        let name = name.into();
        if self.column(&name).is_some() {
            return Err(SweepError::InvalidParameter(format!(
                "duplicate column name '{name}'"
            )));
        }
        if self.columns.is_empty() {
            self.n_rows = values.len();
        } else if values.len() != self.n_rows {
            return Err(SweepError::DimensionMismatch {
                expected: self.n_rows,
                got: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Rename a column in place.
    pub fn rename_column(&mut self, from: &str, to: impl Into<String>) -> Result<()> {
        let to = to.into();
        if from == to {
            return Ok(());
        }
        if self.column(&to).is_some() {
            return Err(SweepError::InvalidParameter(format!(
                "duplicate column name '{to}'"
            )));
        }
        let col = self
            .columns
            .iter_mut()
            .find(|c| c.name == from)
            .ok_or_else(|| SweepError::InvalidParameter(format!("no column named '{from}'")))?;
        col.name = to;
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Numeric column by name.
    pub fn numbers(&self, name: &str) -> Option<&[Option<f64>]> {
        match &self.column(name)?.values {
            ColumnValues::Number(v) => Some(v),
            _ => None,
        }
    }

    /// Text column by name.
    pub fn texts(&self, name: &str) -> Option<&[Option<String>]> {
        match &self.column(name)?.values {
            ColumnValues::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Index column by name.
    pub fn index(&self, name: &str) -> Option<&[IndexValue]> {
        match &self.column(name)?.values {
            ColumnValues::Index(v) => Some(v),
            _ => None,
        }
    }

    /// Single numeric cell; `None` for nulls or a missing column.
    pub fn number(&self, name: &str, row: usize) -> Option<f64> {
        self.numbers(name)?.get(row).copied().flatten()
    }

    /// Single text cell.
    pub fn text(&self, name: &str, row: usize) -> Option<&str> {
        self.texts(name)?.get(row)?.as_deref()
    }

    /// All cells of one row, in column order.
    pub fn row(&self, row: usize) -> Option<Vec<Value>> {
        if row >= self.n_rows {
            return None;
        }
        self.columns.iter().map(|c| c.values.value(row)).collect()
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.n_rows).filter_map(move |i| self.row(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new()
            .with_column("term", ColumnValues::texts(["ar1", "ma1"]))
            .unwrap()
            .with_column("estimate", ColumnValues::numbers(&[0.5, f64::NAN]))
            .unwrap()
    }

    #[test]
    fn first_column_fixes_row_count() {
        let table = sample();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.n_cols(), 2);
        assert_eq!(table.column_names(), vec!["term", "estimate"]);

        let err = table
            .clone()
            .with_column("extra", ColumnValues::numbers(&[1.0]))
            .unwrap_err();
        assert_eq!(
            err,
            SweepError::DimensionMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn non_finite_numbers_become_nulls() {
        let table = sample();
        assert_eq!(table.number("estimate", 0), Some(0.5));
        assert_eq!(table.number("estimate", 1), None);
        assert_eq!(table.numbers("estimate").unwrap()[1], None);
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let result = sample().with_column("term", ColumnValues::texts(["a", "b"]));
        assert!(matches!(result, Err(SweepError::InvalidParameter(_))));
    }

    #[test]
    fn rename_column_keeps_values() {
        let mut table = sample();
        table.rename_column("term", "parameter").unwrap();
        assert_eq!(table.text("parameter", 0), Some("ar1"));
        assert!(table.column("term").is_none());
        assert!(table.rename_column("missing", "x").is_err());
        assert!(table.rename_column("parameter", "estimate").is_err());
    }

    #[test]
    fn typed_accessors_check_column_type() {
        let table = sample();
        assert!(table.texts("estimate").is_none());
        assert!(table.numbers("term").is_none());
        assert!(table.index("term").is_none());
    }

    #[test]
    fn rows_expose_cells_in_column_order() {
        let table = sample();
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![Value::Text("ar1".into()), Value::Number(0.5)]);
        assert!(rows[1][1].is_null());
        assert!(table.row(2).is_none());
    }

    #[test]
    fn index_values_convert() {
        let p = IndexValue::Period(3.0);
        assert_eq!(p.as_period(), Some(3.0));
        assert!(p.as_timestamp().is_none());
    }
}
