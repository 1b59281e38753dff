//! Line-oriented change report

use crate::align::{AlignedResult, CategoryCounts};
use crate::dataset::Value;
use crate::labels::SourceLabels;
use crate::project::{ChangeSet, ChangeSets};
use crate::schema::Key;
use std::fmt::{self, Write};

const HEAVY_RULE: &str = "================================================================================";
const LIGHT_RULE: &str = "────────────────────────────────────────────────────────────────────────────────";
const PAIR_SEPARATOR: &str = " | ";

/// Row totals and category counts shown in the report header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportCounts {
    pub total_a: usize,
    pub total_b: usize,
    pub categories: CategoryCounts,
}

impl From<&AlignedResult> for ReportCounts {
    fn from(result: &AlignedResult) -> Self {
        Self {
            total_a: result.total_a(),
            total_b: result.total_b(),
            categories: result.counts(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Rendering of null values
    pub null_sentinel: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            null_sentinel: "NULL".to_string(),
        }
    }
}

fn join_pairs<'a>(
    columns: impl Iterator<Item = &'a String>,
    values: &[Value],
    null: &str,
) -> String {
    columns
        .zip(values)
        .map(|(c, v)| format!("{}={}", c, v.display_or(null)))
        .collect::<Vec<_>>()
        .join(PAIR_SEPARATOR)
}

fn write_header<W: Write>(
    out: &mut W,
    key: &Key,
    counts: &ReportCounts,
    labels: &SourceLabels,
) -> fmt::Result {
    let key_list = if key.is_empty() {
        "None".to_string()
    } else {
        key.columns().join(", ")
    };
    writeln!(out)?;
    writeln!(out, "{}", HEAVY_RULE)?;
    writeln!(out, "TABLE COMPARISON REPORT (Reference vs Compare-to)")?;
    writeln!(out, "{}", HEAVY_RULE)?;
    writeln!(out, "Primary Key Columns: {}", key_list)?;
    writeln!(out, "Reference (A): {}", labels.reference())?;
    writeln!(out, "Compare-to (B): {}", labels.compare_to())?;
    writeln!(out, "Total Rows in Reference (A): {}", counts.total_a)?;
    writeln!(out, "Total Rows in Compare-to (B): {}", counts.total_b)?;
    writeln!(out, "Identical Rows: {}", counts.categories.same)?;
    writeln!(out, "Deleted Rows: {}", counts.categories.deleted)?;
    writeln!(out, "Inserted Rows: {}", counts.categories.inserted)?;
    writeln!(out, "Updated Rows: {}", counts.categories.updated)?;
    writeln!(out, "{}", HEAVY_RULE)?;
    writeln!(out)
}

fn write_section_title<W: Write>(out: &mut W, title: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", LIGHT_RULE)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", LIGHT_RULE)
}

fn write_single_side<W: Write>(out: &mut W, set: &ChangeSet, title: &str, null: &str) -> fmt::Result {
    if set.is_empty() {
        return Ok(());
    }
    write_section_title(out, title)?;
    for row in set.rows() {
        writeln!(out, "{}", join_pairs(set.columns().iter(), row, null))?;
    }
    Ok(())
}

fn write_updated<W: Write>(out: &mut W, set: &ChangeSet, key: &Key, null: &str) -> fmt::Result {
    if set.is_empty() {
        return Ok(());
    }
    write_section_title(
        out,
        &format!("DIFFERENT: {} row(s) with changed values", set.len()),
    )?;

    let mut pairs: Vec<_> = set.pairs().iter().collect();
    pairs.sort_by(|x, y| x.base.cmp(&y.base));

    for row in set.rows() {
        writeln!(out)?;
        writeln!(
            out,
            "Key: {}",
            join_pairs(key.columns().iter(), set.key_values(row), null)
        )?;
        for pair in &pairs {
            let before = &row[pair.before];
            let after = &row[pair.after];
            if crate::classify::values_equal(before, after) {
                continue;
            }
            writeln!(
                out,
                "  {}: {} → {}",
                pair.base,
                before.display_or(null),
                after.display_or(null)
            )?;
        }
    }
    Ok(())
}

/// The change report, written on demand through `Display`
///
/// DELETED and INSERTED rows are listed as `column=value` pairs. UPDATED rows
/// list their key, then one `before → after` line per differing column.
pub struct TextReport<'a> {
    pub sets: &'a ChangeSets,
    pub key: &'a Key,
    pub counts: &'a ReportCounts,
    pub labels: &'a SourceLabels,
    pub options: &'a ReportOptions,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let null = self.options.null_sentinel.as_str();
        let sets = self.sets;

        let deleted_title = match self.labels.reference_name() {
            Some(name) => format!("ONLY IN {}: {} row(s)", name, sets.deleted.len()),
            None => format!(
                "DELETED: {} row(s) only in Reference (removed from Compare-to)",
                sets.deleted.len()
            ),
        };
        let inserted_title = match self.labels.compare_to_name() {
            Some(name) => format!("ONLY IN {}: {} row(s)", name, sets.inserted.len()),
            None => format!(
                "INSERTED: {} row(s) only in Compare-to (new rows)",
                sets.inserted.len()
            ),
        };

        write_header(f, self.key, self.counts, self.labels)?;
        write_single_side(f, &sets.deleted, &deleted_title, null)?;
        write_single_side(f, &sets.inserted, &inserted_title, null)?;
        write_updated(f, &sets.updated, self.key, null)
    }
}

/// Render the change report to a string
pub fn render_text(
    sets: &ChangeSets,
    key: &Key,
    counts: &ReportCounts,
    labels: &SourceLabels,
    options: &ReportOptions,
) -> String {
    TextReport {
        sets,
        key,
        counts,
        labels,
        options,
    }
    .to_string()
}
