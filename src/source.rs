//! Reading and writing tabular files

use crate::dataset::{Dataset, Row, Value};
use crate::error::{KeydiffError, Result};
use duckdb::types::ValueRef;
use duckdb::Connection;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Loads a dataset from a path
pub trait TabularSource {
    fn load(&self, path: &Path) -> Result<Dataset>;
}

/// Persists a dataset to a path
pub trait TabularSink {
    fn save(&self, dataset: &Dataset, path: &Path) -> Result<()>;
}

/// Column name and DuckDB type as reported by DESCRIBE
#[derive(Debug, Clone)]
struct ColumnInfo {
    name: String,
    data_type: String,
}

impl ColumnInfo {
    /// Numeric columns are fetched natively; everything else is read as text
    fn is_numeric(&self) -> bool {
        let ty = self.data_type.to_ascii_uppercase();
        matches!(
            ty.as_str(),
            "TINYINT"
                | "SMALLINT"
                | "INTEGER"
                | "BIGINT"
                | "HUGEINT"
                | "UTINYINT"
                | "USMALLINT"
                | "UINTEGER"
                | "UBIGINT"
                | "FLOAT"
                | "DOUBLE"
        ) || ty.starts_with("DECIMAL")
    }

    fn select_expr(&self) -> String {
        let quoted = quote_identifier(&self.name);
        if self.is_numeric() {
            quoted
        } else {
            format!("CAST({} AS VARCHAR)", quoted)
        }
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Table expression for a file
///
/// Delimited text always has a header row, and column types are sniffed over
/// every row so a late text value does not break an integer column.
fn scan_expr(path: &Path) -> String {
    let literal = quote_literal(&path.to_string_lossy());
    let delimited = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "csv" | "tsv" | "txt"))
        .unwrap_or(false);
    if delimited {
        format!("read_csv({}, header = true, sample_size = -1)", literal)
    } else {
        literal
    }
}

/// DuckDB-backed reader for CSV, TSV, Parquet and JSON files
pub struct DuckDbSource {
    connection: Connection,
}

impl DuckDbSource {
    pub fn new() -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        connection.execute("SET enable_progress_bar=false", [])?;
        // Alignment breaks ties by source position
        connection.execute("SET preserve_insertion_order=true", [])?;
        Ok(Self { connection })
    }

    /// Map DuckDB failures onto read errors with a readable cause
    fn convert_duckdb_error(error: duckdb::Error, path: &Path) -> KeydiffError {
        let msg = error.to_string();
        let message = if msg.contains("CSV Error")
            || msg.contains("Could not convert")
            || msg.contains("Invalid CSV")
            || msg.contains("Unterminated quoted field")
        {
            format!("malformed CSV: {}", msg)
        } else if msg.contains("JSON") {
            format!("malformed JSON: {}", msg)
        } else if msg.contains("No files found") || msg.contains("does not exist") {
            "file not found".to_string()
        } else if msg.contains("Permission denied") {
            "permission denied".to_string()
        } else if msg.contains("UTF-8") || msg.contains("encoding") {
            format!("encoding error: {}", msg)
        } else {
            msg
        };
        KeydiffError::source_read(path, message)
    }

    fn describe(&self, path: &Path) -> Result<Vec<ColumnInfo>> {
        let sql = format!("DESCRIBE SELECT * FROM {}", scan_expr(path));
        let mut stmt = self
            .connection
            .prepare(&sql)
            .map_err(|e| Self::convert_duckdb_error(e, path))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ColumnInfo {
                    name: row.get::<_, String>(0)?,
                    data_type: row.get::<_, String>(1)?,
                })
            })
            .map_err(|e| Self::convert_duckdb_error(e, path))?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row.map_err(|e| Self::convert_duckdb_error(e, path))?);
        }
        Ok(columns)
    }
}

fn to_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::TinyInt(i) => Value::Integer(i.into()),
        ValueRef::SmallInt(i) => Value::Integer(i.into()),
        ValueRef::Int(i) => Value::Integer(i.into()),
        ValueRef::BigInt(i) => Value::Integer(i),
        ValueRef::UTinyInt(i) => Value::Integer(i.into()),
        ValueRef::USmallInt(i) => Value::Integer(i.into()),
        ValueRef::UInt(i) => Value::Integer(i.into()),
        ValueRef::UBigInt(i) => match i64::try_from(i) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::Text(i.to_string()),
        },
        ValueRef::HugeInt(i) => match i64::try_from(i) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::Text(i.to_string()),
        },
        ValueRef::Float(f) => Value::Float(f.into()),
        ValueRef::Double(f) => Value::Float(f),
        ValueRef::Decimal(d) => {
            let text = d.to_string();
            text.parse::<f64>().map(Value::Float).unwrap_or(Value::Text(text))
        }
        ValueRef::Boolean(b) => Value::Text(b.to_string()),
        ValueRef::Text(s) => Value::Text(String::from_utf8_lossy(s).into_owned()),
        ValueRef::Blob(b) => Value::Text(format!("<blob:{} bytes>", b.len())),
        other => Value::Text(format!("{:?}", other)),
    }
}

impl TabularSource for DuckDbSource {
    fn load(&self, path: &Path) -> Result<Dataset> {
        if !path.is_file() {
            return Err(KeydiffError::source_read(path, "file not found"));
        }

        let columns = self.describe(path)?;
        let select_list = columns
            .iter()
            .map(ColumnInfo::select_expr)
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("SELECT {} FROM {}", select_list, scan_expr(path));

        let width = columns.len();
        let mut stmt = self
            .connection
            .prepare(&sql)
            .map_err(|e| Self::convert_duckdb_error(e, path))?;
        let rows = stmt
            .query_map([], |row| {
                let mut values: Row = Vec::with_capacity(width);
                for i in 0..width {
                    values.push(to_value(row.get_ref(i)?));
                }
                Ok(values)
            })
            .map_err(|e| Self::convert_duckdb_error(e, path))?;

        let mut data = Vec::new();
        for row in rows {
            data.push(row.map_err(|e| Self::convert_duckdb_error(e, path))?);
        }

        log::debug!(
            "Loaded {} rows x {} columns from {}",
            data.len(),
            width,
            path.display()
        );
        Dataset::new(columns.into_iter().map(|c| c.name).collect(), data)
    }
}

/// Writes RFC 4180 CSV with nulls as empty fields
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvSink;

fn escape_field(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        std::borrow::Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        std::borrow::Cow::Borrowed(value)
    }
}

fn write_record<W: Write>(out: &mut W, fields: impl Iterator<Item = String>) -> std::io::Result<()> {
    let line = fields
        .map(|f| escape_field(&f).into_owned())
        .collect::<Vec<_>>()
        .join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")
}

impl TabularSink for CsvSink {
    fn save(&self, dataset: &Dataset, path: &Path) -> Result<()> {
        let write = || -> std::io::Result<()> {
            let mut out = BufWriter::new(fs::File::create(path)?);
            write_record(&mut out, dataset.columns().iter().cloned())?;
            for row in dataset.rows() {
                write_record(&mut out, row.iter().map(Value::display_or_empty))?;
            }
            out.flush()
        };
        write().map_err(|e| KeydiffError::source_write(path, e.to_string()))
    }
}
