//! Slice a `(date, value)` series out of a raw import sheet.
//!
//! A raw export stacks sections vertically: a marker row in column A, one
//! header row, then data rows with the date in column A and the value in
//! column B. Only the upper section is followed by another marker; the last
//! section runs to the last filled row.

use crate::error::{InsightsError, InsightsResult};
use crate::locator::{find_marker_row, last_row_with_value};
use chrono::NaiveDateTime;
use metainsights_sheet::{CellValue, Sheet};
use tracing::{debug, warn};

/// Column holding marker labels and dates (A).
pub const MARKER_COLUMN: &str = "A:A";
/// 1-based column of the dates.
pub const DATE_COLUMN: usize = 1;
/// 1-based column of the values.
pub const VALUE_COLUMN: usize = 2;

/// Offset from a marker row to its first data row (marker + header).
const DATA_OFFSET: usize = 2;
/// Offset from the next section's marker back to this section's last data row.
const NEXT_MARKER_GAP: usize = 3;

/// How the end of a section is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEnd<'a> {
    /// Upper section: ends a fixed gap above the next section's marker.
    NextMarker(&'a str),
    /// Last section: ends at the last row with a date.
    LastValue,
}

/// One day of a metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub date: NaiveDateTime,
    pub value: CellValue,
}

impl MetricRecord {
    pub fn new(date: NaiveDateTime, value: impl Into<CellValue>) -> Self {
        MetricRecord {
            date,
            value: value.into(),
        }
    }
}

/// Inclusive 1-based row span of a section's data. `end < start` means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBounds {
    pub start: usize,
    pub end: usize,
}

impl SectionBounds {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Locate the data rows under `marker`, or `None` when the marker is absent.
pub fn section_bounds(
    sheet: &Sheet,
    marker: &str,
    end: SectionEnd<'_>,
) -> InsightsResult<Option<SectionBounds>> {
    let Some(marker_row) = find_marker_row(sheet, MARKER_COLUMN, marker)? else {
        return Ok(None);
    };
    let start = marker_row + DATA_OFFSET;
    let last_value = || last_row_with_value(sheet, start, DATE_COLUMN).unwrap_or(0);

    let end = match end {
        SectionEnd::NextMarker(next) => match find_marker_row(sheet, MARKER_COLUMN, next)? {
            Some(next_row) => next_row.saturating_sub(NEXT_MARKER_GAP),
            None => last_value(),
        },
        SectionEnd::LastValue => last_value(),
    };

    let bounds = SectionBounds { start, end };
    debug!(sheet = sheet.name(), marker, start, end, "section bounds");
    Ok(Some(bounds))
}

/// Read the series under `marker`.
///
/// Returns `Ok(None)` when the marker is absent and an empty vector when the
/// section has no rows. Rows keep sheet order; rows with a blank date are
/// skipped and a non-blank cell that is not a date is an error.
pub fn extract_series(
    sheet: &Sheet,
    marker: &str,
    end: SectionEnd<'_>,
) -> InsightsResult<Option<Vec<MetricRecord>>> {
    let Some(bounds) = section_bounds(sheet, marker, end)? else {
        return Ok(None);
    };
    if bounds.is_empty() {
        warn!(sheet = sheet.name(), marker, "section has no data rows");
        return Ok(Some(Vec::new()));
    }

    let block = sheet.read_range(
        bounds.start - 1,
        bounds.end - 1,
        DATE_COLUMN - 1,
        VALUE_COLUMN - 1,
    );

    let mut records = Vec::with_capacity(block.len());
    for (offset, mut pair) in block.into_iter().enumerate() {
        let row = bounds.start + offset;
        let value = pair.pop().unwrap_or_default();
        let date_cell = pair.pop().unwrap_or_default();

        if date_cell.is_blank() {
            debug!(sheet = sheet.name(), row, "skipping row without date");
            continue;
        }
        let date = date_cell
            .as_datetime()
            .ok_or_else(|| InsightsError::invalid_date(sheet.name(), row, date_cell.as_str()))?;
        records.push(MetricRecord { date, value });
    }

    debug!(sheet = sheet.name(), marker, records = records.len(), "series extracted");
    Ok(Some(records))
}
