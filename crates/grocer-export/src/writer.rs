//! `.xlsx` serialization for one category's fetch outcome.

use std::path::{Path, PathBuf};

use grocer_core::{CategoryMeta, CategoryTarget, FetchOutcome};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::ExportError;
use crate::rows::{build_rows, Cell, COLUMNS};

/// Excel rejects longer strings in a single cell.
const MAX_CELL_CHARS: usize = 32_767;

/// Worksheet row limit minus the header row.
const MAX_DATA_ROWS: usize = 1_048_575;

const SHEET_NAME: &str = "products";

/// What [`export_outcome`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSummary {
    Written { path: PathBuf, rows: usize },
    /// The outcome had no records; no file was created.
    NothingToSave,
}

/// Writes `outcome.records` to `path` as a single-sheet workbook.
///
/// A file is written whenever there is at least one record, regardless of
/// `outcome.had_error`. With no records nothing is written. The parent
/// directory must already exist.
///
/// # Errors
///
/// - [`ExportError::Xlsx`] if the workbook cannot be built or saved.
/// - [`ExportError::TooManyRows`] if the records do not fit in one sheet.
pub fn export_outcome(
    outcome: &FetchOutcome,
    meta: &CategoryMeta,
    target: &CategoryTarget,
    path: &Path,
) -> Result<ExportSummary, ExportError> {
    if outcome.records.is_empty() {
        tracing::info!(url = %target.source_url, "nothing to save");
        return Ok(ExportSummary::NothingToSave);
    }

    let rows = build_rows(&outcome.records, meta, target);
    if rows.len() > MAX_DATA_ROWS {
        return Err(ExportError::TooManyRows { rows: rows.len() });
    }
    let xlsx_err = |source| ExportError::Xlsx {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    write_sheet(&mut workbook, &rows).map_err(xlsx_err)?;
    workbook.save(path).map_err(xlsx_err)?;

    tracing::info!(
        rows = rows.len(),
        path = %path.display(),
        partial = outcome.had_error,
        "fetched data stored"
    );
    Ok(ExportSummary::Written {
        path: path.to_path_buf(),
        rows: rows.len(),
    })
}

fn write_sheet(
    workbook: &mut Workbook,
    rows: &[[Cell; COLUMNS.len()]],
) -> Result<(), XlsxError> {
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in (0u16..).zip(COLUMNS) {
        worksheet.write_string_with_format(0, col, name, &header)?;
    }

    for (index, row) in rows.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let row_num = (index + 1) as u32;
        for (col, cell) in (0u16..).zip(row) {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row_num, col, clamp_cell(text))?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row_num, col, *n)?;
                }
                Cell::Empty => {}
            }
        }
    }
    Ok(())
}

fn clamp_cell(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
