//! In-memory tabular data: cell values and datasets

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single cell value
///
/// Values are opaque comparables: no coercion happens beyond treating
/// integers and floats as the same kind of number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render for grids and CSV files, where null is an empty cell
    pub fn display_or_empty(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Render with an explicit sentinel for null
    pub fn display_or<'a>(&'a self, sentinel: &'a str) -> std::borrow::Cow<'a, str> {
        match self {
            Value::Null => std::borrow::Cow::Borrowed(sentinel),
            Value::Text(s) => std::borrow::Cow::Borrowed(s.as_str()),
            other => std::borrow::Cow::Owned(other.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Integer(_) | Value::Float(_) => 0,
            Value::Text(_) => 1,
            Value::Null => 2,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

// Zeros of either sign are one number; otherwise IEEE total order.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Exact comparison; `i as f64` alone rounds above 2^53
fn cmp_integer_float(i: i64, f: f64) -> Ordering {
    if f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) {
        return i.cmp(&(f as i64));
    }
    match (i as f64).total_cmp(&f) {
        // Only reachable when `f` is at or beyond the i64 range
        Ordering::Equal if f > 0.0 => Ordering::Less,
        Ordering::Equal => Ordering::Greater,
        other => other,
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => cmp_floats(*a, *b),
            (Value::Integer(a), Value::Float(b)) => cmp_integer_float(*a, *b),
            (Value::Float(a), Value::Integer(b)) => cmp_integer_float(*b, *a).reverse(),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Null, Value::Null) => Ordering::Equal,
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Null equals null: nulls group together as keys and never count as a change.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// One row, positionally aligned with its dataset's columns
pub type Row = Vec<Value>;

/// An ordered collection of rows sharing one column list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, rejecting rows whose width differs from the header
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> crate::Result<Self> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(crate::KeydiffError::invalid_input(format!(
                "Row {} has {} values but the dataset has {} columns",
                idx,
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Value of `column` in row `row`, if both exist
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// First `n` rows, for previews
    pub fn head(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.columns, self.rows)
    }

    pub(crate) fn from_parts_unchecked(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }
}
