//! Projection of classified rows into DELETED / INSERTED / UPDATED change sets

use crate::align::{AlignedResult, ClassifiedRow};
use crate::classify::Classification;
use crate::dataset::{Dataset, Row, Value};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

pub const BEFORE_SUFFIX: &str = "_before";
pub const AFTER_SUFFIX: &str = "_after";
pub const STATUS_COLUMN: &str = "status";

/// Where one non-key column's two values live in a paired change set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnPair {
    pub base: String,
    pub before: usize,
    pub after: usize,
}

/// A filtered, re-projected view over rows of one classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeSet {
    columns: Vec<String>,
    rows: Vec<Row>,
    key_len: usize,
    pairs: Vec<ColumnPair>,
}

impl ChangeSet {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Leading key values of a row
    pub fn key_values<'a>(&self, row: &'a Row) -> &'a [Value] {
        &row[..self.key_len]
    }

    /// Before/after column positions; empty for single-sided sets
    pub fn pairs(&self) -> &[ColumnPair] {
        &self.pairs
    }

    /// Rows as column-name keyed records, preserving column order
    pub fn records(&self) -> Vec<IndexMap<&str, &Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter())
                    .collect()
            })
            .collect()
    }

    pub fn to_dataset(&self) -> Dataset {
        Dataset::from_parts_unchecked(self.columns.clone(), self.rows.clone())
    }
}

/// The three canonical change sets of a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeSets {
    pub deleted: ChangeSet,
    pub inserted: ChangeSet,
    pub updated: ChangeSet,
}

/// Hands out output column names that never collide with source columns
struct ColumnNamer {
    taken: HashSet<String>,
}

impl ColumnNamer {
    fn new(result: &AlignedResult) -> Self {
        Self {
            taken: result.columns().iter().cloned().collect(),
        }
    }

    fn derive(&mut self, base: &str, suffix: &str) -> String {
        let candidate = format!("{}{}", base, suffix);
        self.claim(candidate)
    }

    fn claim(&mut self, candidate: String) -> String {
        let mut name = candidate.clone();
        let mut n = 1;
        while self.taken.contains(&name) {
            name = format!("{}_{}", candidate, n);
            n += 1;
        }
        self.taken.insert(name.clone());
        name
    }
}

fn key_columns(result: &AlignedResult) -> Vec<String> {
    result.key().columns().to_vec()
}

/// Key columns followed by `<c>_before`, `<c>_after` for every non-key column
fn paired_columns(
    result: &AlignedResult,
    namer: &mut ColumnNamer,
) -> (Vec<String>, Vec<ColumnPair>) {
    let mut columns = key_columns(result);
    let mut pairs = Vec::with_capacity(result.non_key_indices().len());
    for &i in result.non_key_indices() {
        let base = &result.columns()[i];
        pairs.push(ColumnPair {
            base: base.clone(),
            before: columns.len(),
            after: columns.len() + 1,
        });
        columns.push(namer.derive(base, BEFORE_SUFFIX));
        columns.push(namer.derive(base, AFTER_SUFFIX));
    }
    (columns, pairs)
}

fn paired_values(result: &AlignedResult, row: &ClassifiedRow) -> Row {
    let mut values: Row = row.aligned.key().to_vec();
    for &i in result.non_key_indices() {
        values.push(row.aligned.value_before(i).clone());
        values.push(row.aligned.value_after(i).clone());
    }
    values
}

/// One side of the rows of `class`, under their original column names
fn single_side(result: &AlignedResult, class: Classification) -> ChangeSet {
    let mut columns = key_columns(result);
    columns.extend(
        result
            .non_key_indices()
            .iter()
            .map(|&i| result.columns()[i].clone()),
    );

    let rows = result
        .rows_of(class)
        .map(|row| {
            let mut values: Row = row.aligned.key().to_vec();
            for &i in result.non_key_indices() {
                let value = match class {
                    Classification::Inserted => row.aligned.value_after(i),
                    _ => row.aligned.value_before(i),
                };
                values.push(value.clone());
            }
            values
        })
        .collect();

    ChangeSet {
        columns,
        rows,
        key_len: result.key().len(),
        pairs: Vec::new(),
    }
}

/// Build the DELETED, INSERTED and UPDATED change sets
///
/// Updated rows keep every non-key column in both forms, changed or not.
pub fn project(result: &AlignedResult) -> ChangeSets {
    let deleted = single_side(result, Classification::Deleted);
    let inserted = single_side(result, Classification::Inserted);

    let mut namer = ColumnNamer::new(result);
    let (columns, pairs) = paired_columns(result, &mut namer);
    let rows = result
        .rows_of(Classification::Updated)
        .map(|row| paired_values(result, row))
        .collect();

    ChangeSets {
        deleted,
        inserted,
        updated: ChangeSet {
            columns,
            rows,
            key_len: result.key().len(),
            pairs,
        },
    }
}

/// The full outer-aligned table with a status column, in alignment order
pub fn project_combined(result: &AlignedResult) -> ChangeSet {
    let mut namer = ColumnNamer::new(result);
    let (mut columns, pairs) = paired_columns(result, &mut namer);
    columns.push(namer.claim(STATUS_COLUMN.to_string()));

    let rows = result
        .rows()
        .iter()
        .map(|row| {
            let mut values = paired_values(result, row);
            values.push(Value::from(row.classification.as_str()));
            values
        })
        .collect();

    ChangeSet {
        columns,
        rows,
        key_len: result.key().len(),
        pairs,
    }
}
