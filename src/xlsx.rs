//! Spreadsheet output for the side-by-side comparison

use crate::error::Result;
use crate::render::SideBySide;
use std::path::Path;

/// Commits a rendered comparison to a spreadsheet file
pub trait SpreadsheetSink {
    /// Backend name used in messages
    fn name(&self) -> &str;

    fn write(&self, view: &SideBySide, path: &Path) -> Result<()>;
}

/// The spreadsheet writer compiled into this build, if any
pub fn spreadsheet_backend() -> Option<Box<dyn SpreadsheetSink>> {
    #[cfg(feature = "xlsx")]
    {
        Some(Box::new(XlsxSink::default()))
    }
    #[cfg(not(feature = "xlsx"))]
    {
        None
    }
}

#[cfg(feature = "xlsx")]
pub use self::workbook::XlsxSink;

#[cfg(feature = "xlsx")]
mod workbook {
    use super::SpreadsheetSink;
    use crate::dataset::Value;
    use crate::error::{KeydiffError, Result};
    use crate::render::{Cell, CellRange, Highlight, SideBySide};
    use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
    use std::path::Path;

    const CHANGED_FILL: u32 = 0xFFFF00;
    const ONE_SIDED_FILL: u32 = 0xFFA500;
    const LEGEND_COLUMN_WIDTH: f64 = 40.0;

    /// `.xlsx` writer: Summary, Legend and Comparison sheets
    #[derive(Debug, Default, Clone, Copy)]
    pub struct XlsxSink;

    fn fill(highlight: Highlight) -> Option<Color> {
        match highlight {
            Highlight::None => None,
            Highlight::Changed => Some(Color::RGB(CHANGED_FILL)),
            Highlight::Added | Highlight::Removed => Some(Color::RGB(ONE_SIDED_FILL)),
        }
    }

    fn cell_format(cell: &Cell, bordered: bool) -> Format {
        let mut format = Format::new();
        if cell.bold {
            format = format.set_bold();
        }
        if cell.centered {
            format = format.set_align(FormatAlign::Center);
        }
        if bordered {
            format = format
                .set_border(FormatBorder::Thin)
                .set_border_color(Color::Black);
        }
        if let Some(color) = fill(cell.highlight) {
            format = format.set_background_color(color);
        }
        format
    }

    fn contains(range: &CellRange, row: usize, col: usize) -> bool {
        (range.first_row..=range.last_row).contains(&row)
            && (range.first_col..=range.last_col).contains(&col)
    }

    fn write_value(
        sheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &Value,
        format: &Format,
    ) -> Result<()> {
        match value {
            Value::Null => sheet.write_blank(row, col, format)?,
            Value::Integer(i) => sheet.write_number_with_format(row, col, *i as f64, format)?,
            Value::Float(x) => sheet.write_number_with_format(row, col, *x, format)?,
            Value::Text(s) => sheet.write_string_with_format(row, col, s, format)?,
        };
        Ok(())
    }

    fn cell_position(row: usize, col: usize) -> Result<(u32, u16)> {
        let row = u32::try_from(row)
            .map_err(|_| KeydiffError::invalid_input(format!("Row {} exceeds sheet limits", row)))?;
        let col = u16::try_from(col).map_err(|_| {
            KeydiffError::invalid_input(format!("Column {} exceeds sheet limits", col))
        })?;
        Ok((row, col))
    }

    fn summary_sheet(view: &SideBySide) -> Result<Worksheet> {
        let summary = &view.summary;
        let bold = Format::new().set_bold();
        let mut sheet = Worksheet::new();
        sheet.set_name("Summary")?;

        sheet.write_string_with_format(0, 0, &summary.title, &bold)?;
        sheet.write_string(1, 0, "Reference (A)")?;
        sheet.write_string(1, 1, &summary.reference_label)?;
        sheet.write_string(2, 0, "Compare-to (B)")?;
        sheet.write_string(2, 1, &summary.compare_to_label)?;

        sheet.write_string(4, 0, "Total Rows (A)")?;
        sheet.write_number(4, 1, summary.total_a as f64)?;
        sheet.write_string(5, 0, "Total Rows (B)")?;
        sheet.write_number(5, 1, summary.total_b as f64)?;

        let counts = &summary.counts;
        let lines = [
            ("SAME", counts.same),
            ("UPDATED", counts.updated),
            ("DELETED", counts.deleted),
            ("INSERTED", counts.inserted),
        ];
        for (offset, (label, count)) in lines.iter().enumerate() {
            let row = 7 + offset as u32;
            sheet.write_string(row, 0, *label)?;
            sheet.write_number(row, 1, *count as f64)?;
        }

        sheet.set_column_width(0, 20)?;
        sheet.set_column_width(1, 40)?;
        Ok(sheet)
    }

    fn legend_sheet(view: &SideBySide) -> Result<Worksheet> {
        let legend = &view.legend;
        let mut sheet = Worksheet::new();
        sheet.set_name("Legend")?;

        sheet.write_string_with_format(0, 0, &legend.title, &Format::new().set_bold())?;
        for (offset, entry) in legend.entries.iter().enumerate() {
            let row = 1 + offset as u32;
            let mut swatch = Format::new();
            if let Some(color) = fill(entry.highlight) {
                swatch = swatch.set_background_color(color);
            }
            sheet.write_string_with_format(row, 0, &entry.label, &swatch)?;
            sheet.write_string(row, 1, &entry.description)?;
        }

        sheet.set_column_width(0, LEGEND_COLUMN_WIDTH)?;
        sheet.set_column_width(1, LEGEND_COLUMN_WIDTH)?;
        Ok(sheet)
    }

    fn comparison_sheet(view: &SideBySide) -> Result<Worksheet> {
        let grid = &view.grid;
        let mut sheet = Worksheet::new();
        sheet.set_name("Comparison")?;

        for (r, row) in grid.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (xr, xc) = cell_position(r, c)?;
                let format = cell_format(cell, contains(&grid.bordered_range, r, c));
                write_value(&mut sheet, xr, xc, &cell.value, &format)?;
            }
        }

        for (c, width) in grid.column_widths.iter().enumerate() {
            let (_, xc) = cell_position(0, c)?;
            sheet.set_column_width(xc, *width)?;
        }

        let (frozen, _) = cell_position(grid.frozen_rows, 0)?;
        sheet.set_freeze_panes(frozen, 0)?;

        let range = &grid.filter_range;
        let (first_row, first_col) = cell_position(range.first_row, range.first_col)?;
        let (last_row, last_col) = cell_position(range.last_row, range.last_col)?;
        sheet.autofilter(first_row, first_col, last_row, last_col)?;
        Ok(sheet)
    }

    impl SpreadsheetSink for XlsxSink {
        fn name(&self) -> &str {
            "xlsx"
        }

        fn write(&self, view: &SideBySide, path: &Path) -> Result<()> {
            let mut workbook = Workbook::new();
            workbook.push_worksheet(summary_sheet(view)?);
            workbook.push_worksheet(legend_sheet(view)?);
            workbook.push_worksheet(comparison_sheet(view)?);
            workbook.save(path)?;
            log::debug!(
                "Wrote {} comparison rows to {}",
                view.grid.row_classes.len(),
                path.display()
            );
            Ok(())
        }
    }
}
