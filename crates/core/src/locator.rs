//! Find marker cells in a raw import sheet.
//!
//! All positions returned here are 1-based, as a spreadsheet shows them.

use crate::error::InsightsResult;
use metainsights_sheet::{parse_column_range, CellValue, Sheet};
use tracing::debug;

/// 1-based position of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub row: usize,
    pub column: usize,
}

fn is_marker(cell: &CellValue, marker: &str) -> bool {
    matches!(cell, CellValue::String(s) if s == marker)
}

/// First row, scanning top to bottom, whose cell in `column_range` equals
/// `marker` exactly. Only the first column of the range is scanned.
///
/// Returns `Ok(None)` when nothing matches, including on an empty sheet and
/// for an empty marker (blank cells never match).
pub fn find_marker_row(
    sheet: &Sheet,
    column_range: &str,
    marker: &str,
) -> InsightsResult<Option<usize>> {
    let (col, _) = parse_column_range(column_range)?;

    let row = sheet
        .column_values(col)
        .position(|cell| is_marker(cell, marker))
        .map(|idx| idx + 1);

    match row {
        Some(row) => debug!(sheet = sheet.name(), marker, row, "marker found"),
        None => debug!(sheet = sheet.name(), marker, "marker not found"),
    }
    Ok(row)
}

/// First cell anywhere in the sheet, scanning row by row, whose value
/// equals `marker` exactly.
pub fn find_marker(sheet: &Sheet, marker: &str) -> Option<CellPosition> {
    sheet.data().iter().enumerate().find_map(|(row, cells)| {
        cells
            .iter()
            .position(|cell| is_marker(cell, marker))
            .map(|col| CellPosition {
                row: row + 1,
                column: col + 1,
            })
    })
}

/// Last 1-based row at or below `start_row` (1-based) whose cell in the
/// 1-based `column` is not blank.
pub fn last_row_with_value(sheet: &Sheet, start_row: usize, column: usize) -> Option<usize> {
    if start_row == 0 || column == 0 {
        return None;
    }
    sheet.last_row_in_column(start_row - 1, column - 1)
}
