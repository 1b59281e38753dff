//! Side-by-side comparison grid
//!
//! The grid is a backend-neutral description of the comparison sheet: cell
//! values, a highlight tag per cell, header styling, frozen rows, the filter
//! range and column widths. Spreadsheet sinks only translate it.

use crate::align::{AlignedResult, CategoryCounts, ClassifiedRow};
use crate::classify::Classification;
use crate::dataset::Value;
use crate::labels::SourceLabels;
use serde::Serialize;

/// Highlight class attached to a rendered cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Highlight {
    #[default]
    None,
    Removed,
    Added,
    Changed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cell {
    pub value: Value,
    pub highlight: Highlight,
    pub bold: bool,
    pub centered: bool,
}

impl Cell {
    fn blank() -> Self {
        Self::default()
    }

    fn header(text: impl Into<String>) -> Self {
        Self {
            value: Value::Text(text.into()),
            highlight: Highlight::None,
            bold: true,
            centered: true,
        }
    }

    fn data(value: Value, highlight: Highlight) -> Self {
        Self {
            value,
            highlight,
            bold: false,
            centered: false,
        }
    }

    /// Text as it appears in the sheet; null renders empty
    pub fn rendered(&self) -> String {
        self.value.display_or_empty()
    }
}

/// Inclusive, zero-based cell rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRange {
    pub first_row: usize,
    pub first_col: usize,
    pub last_row: usize,
    pub last_col: usize,
}

impl CellRange {
    /// Spreadsheet notation, e.g. `A2:E9`
    pub fn to_a1(&self) -> String {
        format!(
            "{}{}:{}{}",
            column_letter(self.first_col),
            self.first_row + 1,
            column_letter(self.last_col),
            self.last_row + 1
        )
    }
}

/// Zero-based column index to spreadsheet letters (0 → A, 26 → AA)
pub fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub cells: Vec<Vec<Cell>>,
    /// Rows kept visible while scrolling
    pub frozen_rows: usize,
    pub filter_range: CellRange,
    /// Range drawn with thin borders
    pub bordered_range: CellRange,
    pub column_widths: Vec<f64>,
    pub status_column: usize,
    /// Classification of each data row, in grid order
    pub row_classes: Vec<Classification>,
}

impl Grid {
    pub const HEADER_ROWS: usize = 2;

    pub fn width(&self) -> usize {
        self.column_widths.len()
    }

    pub fn data_rows(&self) -> &[Vec<Cell>] {
        &self.cells[Self::HEADER_ROWS..]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub title: String,
    pub reference_label: String,
    pub compare_to_label: String,
    pub total_a: usize,
    pub total_b: usize,
    pub counts: CategoryCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub description: String,
    pub highlight: Highlight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn standard() -> Self {
        Self {
            title: "Legend".to_string(),
            entries: vec![
                LegendEntry {
                    label: "UPDATED (Yellow)".to_string(),
                    description: "Rows with differences in non-key columns between files (A → B)"
                        .to_string(),
                    highlight: Highlight::Changed,
                },
                LegendEntry {
                    label: "INSERTED/DELETED (Orange)".to_string(),
                    description: "Rows present only in one file (left-only or right-only)"
                        .to_string(),
                    highlight: Highlight::Added,
                },
            ],
        }
    }
}

/// Everything a spreadsheet sink needs to write the comparison workbook
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideBySide {
    pub grid: Grid,
    pub summary: Summary,
    pub legend: Legend,
}

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub max_column_width: f64,
    pub column_padding: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_column_width: 50.0,
            column_padding: 2.0,
        }
    }
}

fn status_highlight(class: Classification) -> Highlight {
    match class {
        Classification::Same => Highlight::None,
        Classification::Updated => Highlight::Changed,
        Classification::Deleted => Highlight::Removed,
        Classification::Inserted => Highlight::Added,
    }
}

/// Values for one block; `primary` is the side the block shows
fn block(
    row: &ClassifiedRow,
    width: usize,
    primary: Option<&Vec<Value>>,
    other: Option<&Vec<Value>>,
    highlight: Highlight,
) -> Vec<Cell> {
    let Some(primary) = primary else {
        return vec![Cell::blank(); width];
    };
    (0..width)
        .map(|i| {
            let mut value = &primary[i];
            // SAME rows fall back to the other side for a missing value
            if value.is_null() && row.classification == Classification::Same {
                if let Some(other) = other {
                    value = &other[i];
                }
            }
            Cell::data(value.clone(), highlight)
        })
        .collect()
}

fn render_row(row: &ClassifiedRow, width: usize) -> Vec<Cell> {
    let class = row.classification;
    let before = row.aligned.before();
    let after = row.aligned.after();

    let (left_hl, right_hl) = match class {
        Classification::Same => (Highlight::None, Highlight::None),
        Classification::Updated => (Highlight::Changed, Highlight::Changed),
        Classification::Deleted => (Highlight::Removed, Highlight::None),
        Classification::Inserted => (Highlight::None, Highlight::Added),
    };

    let mut cells = Vec::with_capacity(width * 2 + 1);
    cells.extend(block(row, width, before, after, left_hl));
    cells.push(Cell::data(
        Value::from(class.as_str()),
        status_highlight(class),
    ));
    cells.extend(block(row, width, after, before, right_hl));
    cells
}

fn column_widths(cells: &[Vec<Cell>], columns: usize, options: &LayoutOptions) -> Vec<f64> {
    (0..columns)
        .map(|c| {
            let longest = cells
                .iter()
                .filter_map(|row| row.get(c))
                .map(|cell| cell.rendered().chars().count())
                .max()
                .unwrap_or(0);
            (longest as f64 + options.column_padding).min(options.max_column_width)
        })
        .collect()
}

/// Lay out the comparison as reference block | status | compare-to block
///
/// Data rows appear grouped as SAME, UPDATED, DELETED, INSERTED. Both blocks
/// use the reference dataset's column order.
pub fn render_side_by_side(
    result: &AlignedResult,
    labels: &SourceLabels,
    options: &LayoutOptions,
) -> SideBySide {
    let columns = result.columns();
    let n = columns.len();
    let status_col = n;
    let total_width = n * 2 + 1;

    let mut group_row = vec![Cell::header(""); total_width];
    if n > 0 {
        group_row[0] = Cell::header(format!("--- {} ---", labels.reference()));
        group_row[status_col + 1] = Cell::header(format!("--- {} ---", labels.compare_to()));
    }
    group_row[status_col] = Cell::header("--- Status ---");

    let mut label_row: Vec<Cell> = columns.iter().map(|c| Cell::header(c.as_str())).collect();
    label_row.push(Cell::header("Status"));
    label_row.extend(columns.iter().map(|c| Cell::header(c.as_str())));

    let mut cells = vec![group_row, label_row];
    let mut row_classes = Vec::with_capacity(result.rows().len());
    for class in Classification::DISPLAY_ORDER {
        for row in result.rows_of(class) {
            cells.push(render_row(row, n));
            row_classes.push(class);
        }
    }

    let last_row = cells.len() - 1;
    let last_col = total_width - 1;
    let widths = column_widths(&cells, total_width, options);

    SideBySide {
        grid: Grid {
            cells,
            frozen_rows: Grid::HEADER_ROWS,
            filter_range: CellRange {
                first_row: 1,
                first_col: 0,
                last_row,
                last_col,
            },
            bordered_range: CellRange {
                first_row: 0,
                first_col: 0,
                last_row,
                last_col,
            },
            column_widths: widths,
            status_column: status_col,
            row_classes,
        },
        summary: Summary {
            title: "Table Comparison Summary".to_string(),
            reference_label: labels.reference().to_string(),
            compare_to_label: labels.compare_to().to_string(),
            total_a: result.total_a(),
            total_b: result.total_b(),
            counts: result.counts(),
        },
        legend: Legend::standard(),
    }
}
