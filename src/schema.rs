//! Column-set validation and key resolution

use crate::dataset::{Dataset, Value};
use crate::error::{KeydiffError, Result};
use serde::Serialize;
use std::collections::BTreeSet;

/// Ensure both datasets expose the same column set, ignoring order
pub fn validate_columns(a: &Dataset, b: &Dataset) -> Result<()> {
    let set_a: BTreeSet<&str> = a.columns().iter().map(String::as_str).collect();
    let set_b: BTreeSet<&str> = b.columns().iter().map(String::as_str).collect();

    if set_a == set_b {
        return Ok(());
    }

    let only_in_a = set_a.difference(&set_b).map(|c| c.to_string()).collect();
    let only_in_b = set_b.difference(&set_a).map(|c| c.to_string()).collect();
    Err(KeydiffError::schema_mismatch(only_in_a, only_in_b))
}

/// What kind of values a column holds, ignoring nulls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Empty,
    Numeric,
    Text,
    Mixed,
}

fn column_kind(dataset: &Dataset, index: usize) -> ColumnKind {
    let mut kind = ColumnKind::Empty;
    for row in dataset.rows() {
        let seen = match &row[index] {
            Value::Null => continue,
            Value::Integer(_) | Value::Float(_) => ColumnKind::Numeric,
            Value::Text(_) => ColumnKind::Text,
        };
        kind = match kind {
            ColumnKind::Empty => seen,
            k if k == seen => k,
            _ => return ColumnKind::Mixed,
        };
    }
    kind
}

/// Shared columns holding numbers on one side and text on the other
///
/// Numbers never equal text, so every row touching such a column compares as
/// different. Columns that are all-null on either side are not reported.
pub fn kind_mismatches(a: &Dataset, b: &Dataset) -> Vec<(String, ColumnKind, ColumnKind)> {
    a.columns()
        .iter()
        .enumerate()
        .filter_map(|(ia, name)| {
            let ib = b.column_index(name)?;
            let (ka, kb) = (column_kind(a, ia), column_kind(b, ib));
            let comparable =
                ka == kb || ka == ColumnKind::Empty || kb == ColumnKind::Empty;
            (!comparable).then(|| (name.clone(), ka, kb))
        })
        .collect()
}

/// The key columns actually used for a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Key {
    columns: Vec<String>,
    /// True when no key was requested and every column became part of the key
    defaulted: bool,
}

impl Key {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_defaulted(&self) -> bool {
        self.defaulted
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Resolve the requested key against both datasets
///
/// With no request the full column list of `a`, in its order, becomes the key.
/// A requested key is never repaired or replaced; missing columns are an error.
pub fn resolve_key(a: &Dataset, b: &Dataset, requested: Option<&[String]>) -> Result<Key> {
    let Some(requested) = requested else {
        if a.column_count() == 0 {
            return Err(KeydiffError::EmptyKey);
        }
        log::info!("Using all columns as primary key: {}", a.columns().join(", "));
        return Ok(Key {
            columns: a.columns().to_vec(),
            defaulted: true,
        });
    };

    let mut columns: Vec<String> = Vec::with_capacity(requested.len());
    for name in requested {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if !columns.iter().any(|c| c == name) {
            columns.push(name.to_string());
        }
    }
    if columns.is_empty() {
        return Err(KeydiffError::EmptyKey);
    }

    let missing_in_a: Vec<String> = columns.iter().filter(|c| !a.has_column(c)).cloned().collect();
    let missing_in_b: Vec<String> = columns.iter().filter(|c| !b.has_column(c)).cloned().collect();
    if !missing_in_a.is_empty() || !missing_in_b.is_empty() {
        return Err(KeydiffError::key_not_found(missing_in_a, missing_in_b));
    }

    Ok(Key {
        columns,
        defaulted: false,
    })
}

/// Split a comma-separated key argument such as `"snap, inst"`
pub fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
