//! Command-line interface for keydiff

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keydiff")]
#[command(about = "A key-based relational diff tool for tabular datasets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two datasets and write the change sets
    Compare {
        /// Reference dataset (A)
        a: PathBuf,

        /// Compare-to dataset (B)
        b: PathBuf,

        /// Name of this comparison; also the default output directory
        #[arg(long)]
        name: String,

        /// Comma-separated key columns (default: all columns)
        #[arg(long)]
        key: Option<String>,

        /// Output directory (defaults to --name)
        #[arg(long)]
        outdir: Option<PathBuf>,

        /// File name prefix for written artifacts
        #[arg(long)]
        prefix: Option<String>,

        /// Also write the text change report
        #[arg(long)]
        report: bool,

        /// Also write the side-by-side spreadsheet
        #[arg(long)]
        excel: bool,

        /// Skip the combined change set
        #[arg(long)]
        no_combined: bool,

        /// Keep A and B as given instead of using the larger one as reference
        #[arg(long)]
        as_given: bool,

        /// Compare text values without trimming surrounding whitespace
        #[arg(long)]
        no_trim: bool,

        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print a machine-readable run summary
        #[arg(long)]
        json: bool,

        /// Suppress previews and progress output
        #[arg(long)]
        quiet: bool,
    },

    /// Validate that two datasets can be compared, without writing anything
    Check {
        /// Reference dataset (A)
        a: PathBuf,

        /// Compare-to dataset (B)
        b: PathBuf,

        /// Comma-separated key columns (default: all columns)
        #[arg(long)]
        key: Option<String>,
    },
}
