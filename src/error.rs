//! Error types for keydiff operations

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeydiffError>;

#[derive(Error, Debug)]
pub enum KeydiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[cfg(feature = "xlsx")]
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Column mismatch: {}", describe_mismatch(.only_in_a, .only_in_b))]
    SchemaMismatch {
        only_in_a: Vec<String>,
        only_in_b: Vec<String>,
    },

    #[error("Key columns missing in files: {}", describe_missing_keys(.missing_in_a, .missing_in_b))]
    KeyColumnNotFound {
        missing_in_a: Vec<String>,
        missing_in_b: Vec<String>,
    },

    #[error("Key must name at least one column")]
    EmptyKey,

    #[error("Failed to read '{path}': {message}")]
    SourceRead { path: PathBuf, message: String },

    #[error("Failed to write '{path}': {message}")]
    SourceWrite { path: PathBuf, message: String },

    #[error("Spreadsheet output requires the {backend} backend, which is not available in this build")]
    RenderBackendUnavailable { backend: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl KeydiffError {
    pub fn schema_mismatch(only_in_a: Vec<String>, only_in_b: Vec<String>) -> Self {
        Self::SchemaMismatch {
            only_in_a,
            only_in_b,
        }
    }

    pub fn key_not_found(missing_in_a: Vec<String>, missing_in_b: Vec<String>) -> Self {
        Self::KeyColumnNotFound {
            missing_in_a,
            missing_in_b,
        }
    }

    pub fn source_read(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::SourceRead {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn source_write(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::SourceWrite {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn backend_unavailable(backend: impl Into<String>) -> Self {
        Self::RenderBackendUnavailable {
            backend: backend.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    /// Validation errors are raised before any comparison work or output happens
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::SchemaMismatch { .. } | Self::KeyColumnNotFound { .. } | Self::EmptyKey
        )
    }
}

fn describe_mismatch(only_in_a: &[String], only_in_b: &[String]) -> String {
    let mut parts = Vec::new();
    if !only_in_a.is_empty() {
        parts.push(format!("Columns in A not in B: [{}]", only_in_a.join(", ")));
    }
    if !only_in_b.is_empty() {
        parts.push(format!("Columns in B not in A: [{}]", only_in_b.join(", ")));
    }
    parts.join("; ")
}

fn describe_missing_keys(missing_in_a: &[String], missing_in_b: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing_in_a.is_empty() {
        parts.push(format!("not in A: [{}]", missing_in_a.join(", ")));
    }
    if !missing_in_b.is_empty() {
        parts.push(format!("not in B: [{}]", missing_in_b.join(", ")));
    }
    parts.join("; ")
}
