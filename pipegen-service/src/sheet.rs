//! Workbook and sheet access
//!
//! Thin wrapper over `calamine` exposing a sheet as trimmed string
//! cells with absolute, zero-based coordinates. Cell contents are
//! normalized the way the analysts typed them: whitespace is stripped
//! and an integral numeric cell reads back without a trailing `.0`.

use calamine::{Data, Reader, Xlsx};
use pipegen_core::error::{PipegenError, Result};
use std::io::Cursor;
use std::path::Path;

/// One worksheet of an input workbook
#[derive(Debug)]
pub struct Sheet {
    name: String,
    range: calamine::Range<Data>,
}

impl Sheet {
    /// Open `sheet_name` inside the workbook at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PipegenError::ConfigSource`] when the file cannot be
    /// read, is not a valid workbook, or has no sheet of that name.
    pub fn open(path: &Path, sheet_name: &str) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            PipegenError::config_source(format!("load xls file {} failed: {e}", path.display()))
        })?;
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(|e| {
            PipegenError::config_source(format!("load xls file {} failed: {e}", path.display()))
        })?;
        let range = workbook.worksheet_range(sheet_name).map_err(|e| {
            PipegenError::config_source(format!(
                "sheet {sheet_name} is not in the workbook: {e}"
            ))
        })?;
        Ok(Self {
            name: sheet_name.to_string(),
            range,
        })
    }

    /// Sheet name as given on the command line
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows, counted from absolute row 0
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.range.end().map_or(0, |(row, _)| row as usize + 1)
    }

    /// Trimmed text of one cell; blank for empty or out-of-range cells
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn cell_text(&self, row: usize, col: usize) -> String {
        self.range
            .get_value((row as u32, col as u32))
            .map_or_else(String::new, cell_to_string)
    }

    /// Trimmed cells of one row, up to the last non-empty cell.
    ///
    /// Trailing blanks are dropped so the row's length reflects how many
    /// columns the analyst actually filled in, matching how ragged rows
    /// behave in spreadsheet readers that only report used cells.
    #[must_use]
    pub fn row_text(&self, row: usize) -> Vec<String> {
        let width = self.range.end().map_or(0, |(_, col)| col as usize + 1);
        let mut cells: Vec<String> = (0..width).map(|col| self.cell_text(row, col)).collect();
        while cells.last().is_some_and(String::is_empty) {
            cells.pop();
        }
        cells
    }
}

/// Normalize one cell to a trimmed string
fn cell_to_string(data: &Data) -> String {
    match data {
        Data::Int(i) => i.to_string(),
        Data::Float(f) => float_to_string(*f),
        Data::String(s) => s.trim().to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format!("{dt:?}"),
        Data::DateTimeIso(dt) => dt.to_string(),
        Data::DurationIso(d) => d.to_string(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

/// Render an integral float without the trailing `.0`
///
/// Numeric spreadsheet cells always come back as floats, so a slot the
/// analyst typed as `5` would otherwise read `"5"` in one sheet and
/// `"5.0"` in another depending on the cell format.
#[allow(clippy::cast_possible_truncation)]
fn float_to_string(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}
