//! Output formatting utilities

use crate::commands::RunOutcome;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::schema::Key;

/// Rows shown per dataset before a comparison
pub const PREVIEW_ROWS: usize = 10;

/// Pretty printer for keydiff output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print the header and first rows of a dataset
    pub fn print_preview(role: &str, label: &str, dataset: &Dataset) {
        println!("{}", Self::format_preview(role, label, dataset));
    }

    pub fn format_preview(role: &str, label: &str, dataset: &Dataset) -> String {
        let mut lines = vec![format!(
            "📄 {}: {} ({} rows, {} columns)",
            role,
            label,
            dataset.row_count(),
            dataset.column_count()
        )];
        lines.push(format!("├─ {}", dataset.columns().join(" | ")));

        let head = dataset.head(PREVIEW_ROWS);
        for (i, row) in head.iter().enumerate() {
            let prefix = if i == head.len() - 1 { "└─" } else { "├─" };
            let values = row
                .iter()
                .map(|v| v.display_or_empty())
                .collect::<Vec<_>>()
                .join(" | ");
            lines.push(format!("{} {}", prefix, values));
        }
        if head.is_empty() {
            lines.push("└─ (no rows)".to_string());
        }
        lines.join("\n")
    }

    /// Print the outcome of a compare run
    pub fn print_run_summary(outcome: &RunOutcome) {
        println!("{}", Self::format_run_summary(outcome));
    }

    pub fn format_run_summary(outcome: &RunOutcome) -> String {
        let counts = &outcome.counts;
        let mut lines = vec![format!(
            "🔍 Comparison: {} → {}",
            outcome.reference, outcome.compare_to
        )];
        if outcome.swapped {
            lines.push("├─ ℹ️  Inputs swapped: the larger dataset is the reference".to_string());
        }
        let key_note = if outcome.key_defaulted {
            " (all columns)"
        } else {
            ""
        };
        lines.push(format!("├─ Key: {}{}", outcome.key.join(", "), key_note));
        lines.push(format!(
            "├─ Rows: {} in reference, {} in compare-to",
            outcome.total_a, outcome.total_b
        ));
        lines.push(format!("├─ Same: {}", counts.same));
        lines.push(format!("├─ Updated: {}", counts.updated));
        lines.push(format!("├─ Deleted: {}", counts.deleted));
        lines.push(format!("├─ Inserted: {}", counts.inserted));

        for skipped in &outcome.skipped {
            lines.push(format!(
                "├─ ⚠️  Skipped {}: {}",
                skipped.path.display(),
                skipped.reason
            ));
        }

        lines.push(format!("└─ Written to {}:", outcome.outdir.display()));
        for (i, artifact) in outcome.artifacts.iter().enumerate() {
            let prefix = if i == outcome.artifacts.len() - 1 {
                "   └─"
            } else {
                "   ├─"
            };
            let name = artifact
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| artifact.display().to_string());
            lines.push(format!("{} {}", prefix, name));
        }
        lines.join("\n")
    }

    /// Print the result of a compatibility check
    pub fn print_check(columns: &[String], key: &Key) {
        println!("✅ Datasets are comparable");
        println!("├─ Columns: {}", columns.join(", "));
        let note = if key.is_defaulted() {
            " (all columns)"
        } else {
            ""
        };
        println!("└─ Key: {}{}", key.columns().join(", "), note);
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}
