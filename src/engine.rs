//! The comparison pipeline: validate, normalize, align, classify

use crate::align::{align, AlignedResult};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::normalize::normalize;
use crate::schema::{kind_mismatches, resolve_key, validate_columns};
use std::time::Instant;

/// Options that change how datasets are prepared before alignment
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub trim_whitespace: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
        }
    }
}

/// Compare two datasets with default options
pub fn compare(a: &Dataset, b: &Dataset, key: Option<&[String]>) -> Result<AlignedResult> {
    compare_with_options(a, b, key, &CompareOptions::default())
}

/// Compare two datasets
///
/// Validation runs before any normalization or alignment, so a schema or key
/// problem fails without doing comparison work.
pub fn compare_with_options(
    a: &Dataset,
    b: &Dataset,
    key: Option<&[String]>,
    options: &CompareOptions,
) -> Result<AlignedResult> {
    validate_columns(a, b)?;
    let key = resolve_key(a, b, key)?;
    for (column, kind_a, kind_b) in kind_mismatches(a, b) {
        log::warn!(
            "Column '{}' is {:?} in A but {:?} in B; its values will never match",
            column,
            kind_a,
            kind_b
        );
    }

    let started = Instant::now();
    let a = normalize(a.clone(), key.columns(), options.trim_whitespace)?;
    let b = normalize(b.clone(), key.columns(), options.trim_whitespace)?;
    log::debug!("Normalized both datasets in {:?}", started.elapsed());

    let started = Instant::now();
    let result = align(&a, &b, &key)?;
    log::debug!(
        "Aligned {} + {} rows into {} records in {:?}",
        result.total_a(),
        result.total_b(),
        result.rows().len(),
        started.elapsed()
    );
    Ok(result)
}
