//! Key-based outer alignment of two datasets

use crate::classify::{changed_columns, classify, Classification};
use crate::dataset::{Dataset, Row, Value};
use crate::error::{KeydiffError, Result};
use crate::normalize::key_indices;
use crate::schema::Key;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which datasets contributed to an aligned row
///
/// Rows are stored in the reference dataset's column order regardless of
/// the column order of the file they came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Sides {
    OnlyA(Row),
    OnlyB(Row),
    Both(Row, Row),
}

/// One logical record for a key value
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    key: Vec<Value>,
    sides: Sides,
}

impl AlignedRow {
    pub fn new(key: Vec<Value>, sides: Sides) -> Self {
        Self { key, sides }
    }

    pub fn key(&self) -> &[Value] {
        &self.key
    }

    pub fn sides(&self) -> &Sides {
        &self.sides
    }

    pub fn in_a(&self) -> bool {
        matches!(self.sides, Sides::OnlyA(_) | Sides::Both(..))
    }

    pub fn in_b(&self) -> bool {
        matches!(self.sides, Sides::OnlyB(_) | Sides::Both(..))
    }

    pub fn before(&self) -> Option<&Row> {
        match &self.sides {
            Sides::OnlyA(row) | Sides::Both(row, _) => Some(row),
            Sides::OnlyB(_) => None,
        }
    }

    pub fn after(&self) -> Option<&Row> {
        match &self.sides {
            Sides::OnlyB(row) | Sides::Both(_, row) => Some(row),
            Sides::OnlyA(_) => None,
        }
    }

    /// `<column>_before` value; null when the row is absent from A
    pub fn value_before(&self, column: usize) -> &Value {
        self.before().map(|r| &r[column]).unwrap_or(&Value::Null)
    }

    /// `<column>_after` value; null when the row is absent from B
    pub fn value_after(&self, column: usize) -> &Value {
        self.after().map(|r| &r[column]).unwrap_or(&Value::Null)
    }
}

/// An aligned row together with its derived classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    pub aligned: AlignedRow,
    pub classification: Classification,
}

/// Per-category row counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub same: usize,
    pub updated: usize,
    pub deleted: usize,
    pub inserted: usize,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.same + self.updated + self.deleted + self.inserted
    }
}

/// The shared output of a comparison, consumed by projection and rendering
#[derive(Debug, Clone)]
pub struct AlignedResult {
    columns: Vec<String>,
    key: Key,
    key_indices: Vec<usize>,
    non_key_indices: Vec<usize>,
    rows: Vec<ClassifiedRow>,
    total_a: usize,
    total_b: usize,
}

impl AlignedResult {
    /// Column order of the reference dataset
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn key_indices(&self) -> &[usize] {
        &self.key_indices
    }

    pub fn non_key_indices(&self) -> &[usize] {
        &self.non_key_indices
    }

    pub fn non_key_columns(&self) -> Vec<&str> {
        self.non_key_indices
            .iter()
            .map(|&i| self.columns[i].as_str())
            .collect()
    }

    pub fn rows(&self) -> &[ClassifiedRow] {
        &self.rows
    }

    pub fn rows_of(&self, class: Classification) -> impl Iterator<Item = &ClassifiedRow> + '_ {
        self.rows.iter().filter(move |r| r.classification == class)
    }

    /// Rows of A seen during alignment
    pub fn total_a(&self) -> usize {
        self.total_a
    }

    /// Rows of B seen during alignment
    pub fn total_b(&self) -> usize {
        self.total_b
    }

    pub fn counts(&self) -> CategoryCounts {
        let mut counts = CategoryCounts::default();
        for row in &self.rows {
            match row.classification {
                Classification::Same => counts.same += 1,
                Classification::Updated => counts.updated += 1,
                Classification::Deleted => counts.deleted += 1,
                Classification::Inserted => counts.inserted += 1,
            }
        }
        counts
    }

    /// Non-key column positions that differ for `row`
    pub fn changed_columns(&self, row: &AlignedRow) -> Vec<usize> {
        changed_columns(row, &self.non_key_indices)
    }
}

/// Column positions of B that line up with A's columns
fn reorder_map(a: &Dataset, b: &Dataset) -> Result<Vec<usize>> {
    a.columns()
        .iter()
        .map(|name| {
            b.column_index(name).ok_or_else(|| {
                KeydiffError::schema_mismatch(vec![name.clone()], Vec::new())
            })
        })
        .collect()
}

fn key_of(row: &Row, indices: &[usize]) -> Vec<Value> {
    indices.iter().map(|&i| row[i].clone()).collect()
}

/// Outer-align `a` and `b` on `key` and classify every aligned row
///
/// Rows are grouped by key value. A key present only in A yields DELETED rows,
/// only in B yields INSERTED rows. A key present on both sides pairs every
/// A-row with every B-row of that key, the way a relational join does, so
/// duplicate keys multiply rather than zip positionally.
///
/// Output is ordered by key ascending; inside one key group A-rows lead and
/// keep their input order, then B-rows in input order.
pub fn align(a: &Dataset, b: &Dataset, key: &Key) -> Result<AlignedResult> {
    let key_idx = key_indices(a, key.columns())?;
    let b_map = reorder_map(a, b)?;
    let non_key_indices: Vec<usize> = (0..a.column_count())
        .filter(|i| !key_idx.contains(i))
        .collect();

    let mut groups: BTreeMap<Vec<Value>, (Vec<&Row>, Vec<Row>)> = BTreeMap::new();
    for row in a.rows() {
        groups
            .entry(key_of(row, &key_idx))
            .or_default()
            .0
            .push(row);
    }
    for row in b.rows() {
        let reordered: Row = b_map.iter().map(|&i| row[i].clone()).collect();
        groups
            .entry(key_of(&reordered, &key_idx))
            .or_default()
            .1
            .push(reordered);
    }

    let mut aligned = Vec::with_capacity(a.row_count().max(b.row_count()));
    let mut largest_group = 0usize;
    for (key_value, (a_rows, b_rows)) in groups {
        largest_group = largest_group.max(a_rows.len() * b_rows.len());
        match (a_rows.is_empty(), b_rows.is_empty()) {
            (false, true) => aligned.extend(
                a_rows
                    .into_iter()
                    .map(|r| AlignedRow::new(key_value.clone(), Sides::OnlyA(r.clone()))),
            ),
            (true, false) => aligned.extend(
                b_rows
                    .into_iter()
                    .map(|r| AlignedRow::new(key_value.clone(), Sides::OnlyB(r))),
            ),
            _ => {
                for a_row in &a_rows {
                    for b_row in &b_rows {
                        aligned.push(AlignedRow::new(
                            key_value.clone(),
                            Sides::Both((*a_row).clone(), b_row.clone()),
                        ));
                    }
                }
            }
        }
    }
    if largest_group > 1 {
        log::debug!(
            "Duplicate keys present; largest key group produced {} pairings",
            largest_group
        );
    }

    // Classification is per-row; the indexed collect keeps alignment order.
    let rows: Vec<ClassifiedRow> = aligned
        .into_par_iter()
        .map(|row| {
            let classification = classify(&row, &non_key_indices);
            ClassifiedRow {
                aligned: row,
                classification,
            }
        })
        .collect();

    Ok(AlignedResult {
        columns: a.columns().to_vec(),
        key: key.clone(),
        key_indices: key_idx,
        non_key_indices,
        rows,
        total_a: a.row_count(),
        total_b: b.row_count(),
    })
}
