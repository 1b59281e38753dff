//! # keydiff
//!
//! A key-based relational diff tool: aligns two tabular datasets on a key,
//! classifies every row as SAME, UPDATED, DELETED or INSERTED, and renders the
//! result as change sets, a text report and a side-by-side spreadsheet.

pub mod align;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod labels;
pub mod normalize;
pub mod output;
pub mod progress;
pub mod project;
pub mod render;
pub mod report;
pub mod schema;
pub mod source;
pub mod xlsx;

pub use align::{AlignedResult, CategoryCounts};
pub use classify::Classification;
pub use dataset::{Dataset, Value};
pub use engine::{compare, compare_with_options, CompareOptions};
pub use error::{KeydiffError, Result};
pub use labels::SourceLabels;
pub use project::{project, project_combined, ChangeSet, ChangeSets};
pub use render::{render_side_by_side, SideBySide};
pub use report::{render_text, ReportCounts, TextReport};
