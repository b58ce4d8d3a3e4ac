//! Xlsx question source.
//!
//! Reads the question workbook with calamine and exposes its rows through
//! the [`QuestionSource`] port. The workbook layout is one question per
//! row on the first sheet, after a fixed number of header rows:
//!
//! | column | content |
//! |--------|---------|
//! | 0 | question index (may be numeric or alphanumeric like `7a`) |
//! | 1 | question text |
//! | 2 | comma-joined quick-reply options |
//! | 3 | condition string, either dialect |
//!
//! Row-level problems are left to the bank builder (blank text rows are
//! dropped there); only a workbook that cannot be opened or read at all is
//! an error, and that error is fatal at startup.

use calamine::{Data, Reader};
use intake_application::ports::question_source::{QuestionSource, SourceError};
use intake_domain::RawQuestionRow;
use std::path::PathBuf;
use tracing::debug;

/// [`QuestionSource`] backed by an xlsx workbook on local disk.
pub struct XlsxQuestionSource {
    path: PathBuf,
    skip_rows: usize,
}

impl XlsxQuestionSource {
    pub fn new(path: impl Into<PathBuf>, skip_rows: usize) -> Self {
        Self {
            path: path.into(),
            skip_rows,
        }
    }
}

impl QuestionSource for XlsxQuestionSource {
    fn load(&self) -> Result<Vec<RawQuestionRow>, SourceError> {
        let mut workbook = calamine::open_workbook_auto(&self.path)
            .map_err(|e| SourceError::Unavailable(format!("{}: {}", self.path.display(), e)))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SourceError::Unreadable("workbook has no sheets".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| SourceError::Unreadable(format!("sheet '{}': {}", sheet_name, e)))?;

        let rows: Vec<RawQuestionRow> = range
            .rows()
            .skip(self.skip_rows)
            .map(row_from_cells)
            .collect();

        debug!(
            sheet = %sheet_name,
            rows = rows.len(),
            "Read question rows from {}",
            self.path.display()
        );
        Ok(rows)
    }
}

/// Convert one sheet row into a raw question row.
///
/// Missing cells read as empty strings; the options cell is split on
/// commas the way the sheet encodes them.
fn row_from_cells(cells: &[Data]) -> RawQuestionRow {
    let index = cell_text(cells, 0);
    let text = cell_text(cells, 1);
    let options: Vec<String> = cell_text(cells, 2)
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();
    let condition = Some(cell_text(cells, 3)).filter(|c| !c.is_empty());

    RawQuestionRow::new(index, text, options, condition)
}

/// Render a cell as trimmed text. Numeric indices come out of Excel as
/// floats; a whole-number float renders without the trailing `.0`.
fn cell_text(cells: &[Data], column: usize) -> String {
    match cells.get(column) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::Float(f)) if f.fract() == 0.0 => format!("{}", *f as i64),
        Some(cell) => cell.to_string().trim().to_string(),
    }
}
