//! Whitespace trimming and deterministic key ordering

use crate::dataset::{Dataset, Value};
use crate::error::{KeydiffError, Result};

/// Strip leading and trailing whitespace from every text cell
///
/// Non-text values pass through untouched; this is not a type coercion step.
pub fn trim_text(mut dataset: Dataset) -> Dataset {
    let mut trimmed = 0usize;
    for row in dataset.rows_mut() {
        for value in row.iter_mut() {
            if let Value::Text(s) = value {
                let t = s.trim();
                if t.len() != s.len() {
                    *s = t.to_string();
                    trimmed += 1;
                }
            }
        }
    }
    if trimmed > 0 {
        log::debug!("Trimmed whitespace in {} cells", trimmed);
    }
    dataset
}

/// Column positions of `key` within `dataset`
pub fn key_indices(dataset: &Dataset, key: &[String]) -> Result<Vec<usize>> {
    key.iter()
        .map(|name| {
            dataset.column_index(name).ok_or_else(|| {
                KeydiffError::invalid_input(format!("Key column '{}' not in dataset", name))
            })
        })
        .collect()
}

/// Sort rows ascending by the key columns
///
/// The sort is stable: rows with equal keys keep their original relative order,
/// which makes duplicate-key pairing reproducible between runs.
pub fn sort_by_key(dataset: Dataset, key: &[String]) -> Result<Dataset> {
    let indices = key_indices(&dataset, key)?;
    let (columns, mut rows) = dataset.into_parts();
    rows.sort_by(|x, y| {
        indices
            .iter()
            .map(|&i| x[i].cmp(&y[i]))
            .find(|o| o.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(Dataset::from_parts_unchecked(columns, rows))
}

/// Trim (when enabled) then sort by key
pub fn normalize(dataset: Dataset, key: &[String], trim: bool) -> Result<Dataset> {
    let dataset = if trim { trim_text(dataset) } else { dataset };
    sort_by_key(dataset, key)
}
