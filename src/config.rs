//! Comparison settings: defaults, JSON config file, then command-line overrides

use crate::error::{KeydiffError, Result};
use crate::render::LayoutOptions;
use crate::report::ReportOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Names a config file used when `--config` is not given
pub const CONFIG_ENV_VAR: &str = "KEYDIFF_CONFIG";

pub const DEFAULT_PREFIX: &str = "diff";

/// Which dataset becomes the reference (A)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// The dataset with more rows is the reference
    #[default]
    LargerAsReference,
    AsGiven,
}

impl ReferencePolicy {
    /// Whether the inputs must trade places, given their row counts
    pub fn should_swap(&self, rows_a: usize, rows_b: usize) -> bool {
        match self {
            Self::LargerAsReference => rows_b > rows_a,
            Self::AsGiven => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub outdir: Option<PathBuf>,
    pub prefix: String,
    pub report: bool,
    pub excel: bool,
    pub combined: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            outdir: None,
            prefix: DEFAULT_PREFIX.to_string(),
            report: false,
            excel: false,
            combined: true,
        }
    }
}

impl OutputConfig {
    /// `<outdir>/<prefix>_<suffix>`
    pub fn artifact_path(&self, outdir: &Path, suffix: &str) -> PathBuf {
        outdir.join(format!("{}_{}", self.prefix, suffix))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
    /// Key columns; all columns when absent
    pub key: Option<Vec<String>>,
    pub reference: ReferencePolicy,
    pub trim_whitespace: bool,
    pub null_sentinel: String,
    pub max_column_width: f64,
    pub column_padding: f64,
    pub outputs: OutputConfig,
}

impl Default for CompareConfig {
    fn default() -> Self {
        let layout = LayoutOptions::default();
        Self {
            key: None,
            reference: ReferencePolicy::default(),
            trim_whitespace: true,
            null_sentinel: ReportOptions::default().null_sentinel,
            max_column_width: layout.max_column_width,
            column_padding: layout.column_padding,
            outputs: OutputConfig::default(),
        }
    }
}

impl CompareConfig {
    /// Read a JSON config file; omitted fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            KeydiffError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            KeydiffError::config(format!("invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit file, else the file named by `KEYDIFF_CONFIG`, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(env_path) if !env_path.is_empty() => {
                log::debug!("Loading config from ${}", CONFIG_ENV_VAR);
                Self::from_file(Path::new(&env_path))
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.outputs.prefix.trim().is_empty() {
            return Err(KeydiffError::config("output prefix must not be empty"));
        }
        if self.max_column_width.is_nan() || self.max_column_width <= 0.0 {
            return Err(KeydiffError::config("max_column_width must be positive"));
        }
        if self.column_padding.is_nan() || self.column_padding < 0.0 {
            return Err(KeydiffError::config("column_padding must not be negative"));
        }
        Ok(())
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            max_column_width: self.max_column_width,
            column_padding: self.column_padding,
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            null_sentinel: self.null_sentinel.clone(),
        }
    }
}
