//! Change classification for aligned rows

use crate::align::{AlignedRow, Sides};
use crate::dataset::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The change category of one aligned row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Same,
    Updated,
    Deleted,
    Inserted,
}

impl Classification {
    /// Categories in the order reviewers scan them: unchanged, changed, removed, added
    pub const DISPLAY_ORDER: [Classification; 4] = [
        Classification::Same,
        Classification::Updated,
        Classification::Deleted,
        Classification::Inserted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Same => "SAME",
            Classification::Updated => "UPDATED",
            Classification::Deleted => "DELETED",
            Classification::Inserted => "INSERTED",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Null-aware equality: two nulls match, null never matches a value
pub fn values_equal(before: &Value, after: &Value) -> bool {
    match (before, after) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (x, y) => x == y,
    }
}

/// Classify a row by presence, then by its non-key columns
pub fn classify(row: &AlignedRow, non_key: &[usize]) -> Classification {
    match row.sides() {
        Sides::OnlyA(_) => Classification::Deleted,
        Sides::OnlyB(_) => Classification::Inserted,
        Sides::Both(before, after) => {
            if non_key.iter().any(|&i| !values_equal(&before[i], &after[i])) {
                Classification::Updated
            } else {
                Classification::Same
            }
        }
    }
}

/// Non-key column positions whose values differ between the two sides
pub fn changed_columns(row: &AlignedRow, non_key: &[usize]) -> Vec<usize> {
    match row.sides() {
        Sides::Both(before, after) => non_key
            .iter()
            .copied()
            .filter(|&i| !values_equal(&before[i], &after[i]))
            .collect(),
        _ => Vec::new(),
    }
}
