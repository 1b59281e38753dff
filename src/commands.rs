//! Command implementations for keydiff CLI

use crate::align::CategoryCounts;
use crate::cli::Commands;
use crate::config::{CompareConfig, ReferencePolicy};
use crate::dataset::Dataset;
use crate::engine::{compare_with_options, CompareOptions};
use crate::error::{KeydiffError, Result};
use crate::labels::SourceLabels;
use crate::normalize::trim_text;
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::progress::ProgressReporter;
use crate::project::{project, project_combined};
use crate::render::render_side_by_side;
use crate::report::{render_text, ReportCounts};
use crate::schema::{parse_key_list, resolve_key, validate_columns};
use crate::source::{CsvSink, DuckDbSource, TabularSink, TabularSource};
use crate::xlsx::{spreadsheet_backend, SpreadsheetSink};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// An artifact that was requested but not written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedArtifact {
    pub path: PathBuf,
    pub reason: String,
}

/// What a compare run did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    pub reference: String,
    pub compare_to: String,
    /// The inputs traded places so the larger one is the reference
    pub swapped: bool,
    pub key: Vec<String>,
    pub key_defaulted: bool,
    pub total_a: usize,
    pub total_b: usize,
    pub counts: CategoryCounts,
    pub outdir: PathBuf,
    pub artifacts: Vec<PathBuf>,
    pub skipped: Vec<SkippedArtifact>,
}

/// Inputs of a compare run after config layering
#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub a: PathBuf,
    pub b: PathBuf,
    pub name: String,
    pub config: CompareConfig,
    pub quiet: bool,
}

/// Command-line flags that override the config file
#[derive(Debug, Clone, Default)]
pub struct CompareOverrides {
    pub key: Option<String>,
    pub outdir: Option<PathBuf>,
    pub prefix: Option<String>,
    pub report: bool,
    pub excel: bool,
    pub no_combined: bool,
    pub as_given: bool,
    pub no_trim: bool,
}

impl CompareOverrides {
    /// Apply flags on top of `config`; flags only ever switch features on or narrow defaults
    pub fn apply(&self, mut config: CompareConfig) -> Result<CompareConfig> {
        if let Some(raw) = &self.key {
            config.key = Some(parse_key_list(raw));
        }
        if let Some(outdir) = &self.outdir {
            config.outputs.outdir = Some(outdir.clone());
        }
        if let Some(prefix) = &self.prefix {
            config.outputs.prefix = prefix.clone();
        }
        config.outputs.report |= self.report;
        config.outputs.excel |= self.excel;
        if self.no_combined {
            config.outputs.combined = false;
        }
        if self.as_given {
            config.reference = ReferencePolicy::AsGiven;
        }
        if self.no_trim {
            config.trim_whitespace = false;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Execute a command
pub fn execute_command(command: Commands) -> Result<()> {
    match command {
        Commands::Compare {
            a,
            b,
            name,
            key,
            outdir,
            prefix,
            report,
            excel,
            no_combined,
            as_given,
            no_trim,
            config,
            json,
            quiet,
        } => {
            let overrides = CompareOverrides {
                key,
                outdir,
                prefix,
                report,
                excel,
                no_combined,
                as_given,
                no_trim,
            };
            let config = overrides.apply(CompareConfig::load(config.as_deref())?)?;
            let request = CompareRequest {
                a,
                b,
                name,
                config,
                quiet: quiet || json,
            };
            let backend = spreadsheet_backend();
            let outcome = run_compare(&request, backend.as_deref())?;
            if json {
                println!("{}", JsonFormatter::format(&outcome)?);
            } else if !quiet {
                PrettyPrinter::print_run_summary(&outcome);
            }
            Ok(())
        }
        Commands::Check { a, b, key } => check_command(&a, &b, key.as_deref()),
    }
}

fn load_pair(a: &Path, b: &Path) -> Result<(Dataset, Dataset)> {
    let source = DuckDbSource::new()?;
    let dataset_a = source.load(a)?;
    let dataset_b = source.load(b)?;
    Ok((dataset_a, dataset_b))
}

/// Validate schema and key without comparing or writing anything
fn check_command(a: &Path, b: &Path, key: Option<&str>) -> Result<()> {
    let (dataset_a, dataset_b) = load_pair(a, b)?;
    validate_columns(&dataset_a, &dataset_b)?;
    let requested = key.map(parse_key_list);
    let key = resolve_key(&dataset_a, &dataset_b, requested.as_deref())?;
    PrettyPrinter::print_check(dataset_a.columns(), &key);
    Ok(())
}

fn write_dataset(dataset: &Dataset, path: PathBuf, artifacts: &mut Vec<PathBuf>) -> Result<()> {
    CsvSink.save(dataset, &path)?;
    log::debug!("Wrote {} rows to {}", dataset.row_count(), path.display());
    artifacts.push(path);
    Ok(())
}

/// Load, compare and write every requested artifact
///
/// Validation errors surface before the output directory exists. A spreadsheet
/// that cannot be written is recorded as skipped and does not fail the run.
pub fn run_compare(
    request: &CompareRequest,
    spreadsheet: Option<&dyn SpreadsheetSink>,
) -> Result<RunOutcome> {
    let config = &request.config;
    let mut progress = if request.quiet {
        ProgressReporter::new_minimal()
    } else {
        ProgressReporter::new_for_compare()
    };

    let (mut dataset_a, mut dataset_b) = load_pair(&request.a, &request.b)?;
    if config.trim_whitespace {
        dataset_a = trim_text(dataset_a);
        dataset_b = trim_text(dataset_b);
    }

    let mut labels = SourceLabels::from_paths(&request.a, &request.b);
    let swapped = config
        .reference
        .should_swap(dataset_a.row_count(), dataset_b.row_count());
    if swapped {
        log::info!(
            "{} has more rows ({} > {}); using it as the reference",
            labels.compare_to(),
            dataset_b.row_count(),
            dataset_a.row_count()
        );
        std::mem::swap(&mut dataset_a, &mut dataset_b);
        labels = labels.swapped();
    }
    progress.finish_load();

    if !request.quiet {
        PrettyPrinter::print_preview("Reference (A)", labels.reference(), &dataset_a);
        PrettyPrinter::print_preview("Compare-to (B)", labels.compare_to(), &dataset_b);
    }

    progress.start_compare();
    // Already trimmed above
    let options = CompareOptions {
        trim_whitespace: false,
    };
    let result = compare_with_options(&dataset_a, &dataset_b, config.key.as_deref(), &options)?;
    let counts = result.counts();
    progress.finish_compare(&format!(
        "Compared: {} same, {} updated, {} deleted, {} inserted",
        counts.same, counts.updated, counts.deleted, counts.inserted
    ));

    let outputs = &config.outputs;
    let outdir = outputs
        .outdir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&request.name));
    fs::create_dir_all(&outdir)
        .map_err(|e| KeydiffError::source_write(&outdir, e.to_string()))?;

    let mut artifacts = Vec::new();
    let mut skipped = Vec::new();

    let sets = project(&result);
    for (suffix, set) in [
        ("deleted.csv", &sets.deleted),
        ("inserted.csv", &sets.inserted),
        ("updated.csv", &sets.updated),
    ] {
        progress.update_write(suffix);
        write_dataset(
            &set.to_dataset(),
            outputs.artifact_path(&outdir, suffix),
            &mut artifacts,
        )?;
    }

    if outputs.combined {
        progress.update_write("combined.csv");
        let combined = project_combined(&result);
        write_dataset(
            &combined.to_dataset(),
            outputs.artifact_path(&outdir, "combined.csv"),
            &mut artifacts,
        )?;
    }

    if outputs.report {
        progress.update_write("report.txt");
        let path = outputs.artifact_path(&outdir, "report.txt");
        let text = render_text(
            &sets,
            result.key(),
            &ReportCounts::from(&result),
            &labels,
            &config.report_options(),
        );
        fs::write(&path, text).map_err(|e| KeydiffError::source_write(&path, e.to_string()))?;
        artifacts.push(path);
    }

    if outputs.excel {
        progress.update_write("comparison.xlsx");
        let path = outputs.artifact_path(&outdir, "comparison.xlsx");
        let written = match spreadsheet {
            Some(sink) => {
                let view = render_side_by_side(&result, &labels, &config.layout_options());
                sink.write(&view, &path)
            }
            None => Err(KeydiffError::backend_unavailable("xlsx")),
        };
        match written {
            Ok(()) => artifacts.push(path),
            Err(e) => {
                log::warn!("Spreadsheet not written: {}", e);
                skipped.push(SkippedArtifact {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }
    progress.finish_write(&format!("Wrote {} files to {}", artifacts.len(), outdir.display()));

    let key = result.key();
    Ok(RunOutcome {
        reference: labels.reference().to_string(),
        compare_to: labels.compare_to().to_string(),
        swapped,
        key: key.columns().to_vec(),
        key_defaulted: key.is_defaulted(),
        total_a: result.total_a(),
        total_b: result.total_b(),
        counts,
        outdir,
        artifacts,
        skipped,
    })
}
