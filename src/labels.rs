//! Display names for the reference and compare-to datasets

use serde::Serialize;
use std::path::Path;

pub const DEFAULT_REFERENCE_LABEL: &str = "Reference (A)";
pub const DEFAULT_COMPARE_TO_LABEL: &str = "Compare-to (B)";

/// Source names shown in reports and spreadsheets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceLabels {
    reference: Option<String>,
    compare_to: Option<String>,
}

impl SourceLabels {
    pub fn new(reference: Option<String>, compare_to: Option<String>) -> Self {
        Self {
            reference,
            compare_to,
        }
    }

    /// Label each side by its file name, without directories
    pub fn from_paths(reference: &Path, compare_to: &Path) -> Self {
        Self {
            reference: file_name(reference),
            compare_to: file_name(compare_to),
        }
    }

    /// The explicit reference name, if one was given
    pub fn reference_name(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn compare_to_name(&self) -> Option<&str> {
        self.compare_to.as_deref()
    }

    pub fn reference(&self) -> &str {
        self.reference.as_deref().unwrap_or(DEFAULT_REFERENCE_LABEL)
    }

    pub fn compare_to(&self) -> &str {
        self.compare_to.as_deref().unwrap_or(DEFAULT_COMPARE_TO_LABEL)
    }

    pub fn swapped(self) -> Self {
        Self {
            reference: self.compare_to,
            compare_to: self.reference,
        }
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
}
