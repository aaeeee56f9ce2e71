//! Merge a metric series into a tracking sheet, one row per date.

use crate::destination::{
    month_name_formula, month_number_formula, DATE_COLUMN, FIRST_DATA_ROW, MONTH_NAME_COLUMN,
    MONTH_NUMBER_COLUMN,
};
use crate::extractor::MetricRecord;
use chrono::NaiveDateTime;
use metainsights_sheet::{CellValue, Sheet};
use std::collections::HashMap;
use tracing::{debug, info};

/// What a reconcile pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Records written over an existing date row.
    pub updated: usize,
    /// Records that added a new date row.
    pub appended: usize,
}

/// Date-to-row index over a tracking sheet's date column.
struct DateIndex {
    rows: HashMap<NaiveDateTime, usize>,
    next_row: usize,
}

impl DateIndex {
    fn build(sheet: &Sheet) -> Self {
        let mut rows = HashMap::new();
        for row in FIRST_DATA_ROW..sheet.row_count() {
            if let Some(date) = sheet.cell(row, DATE_COLUMN).as_datetime() {
                // First row wins when the sheet already holds a duplicate date
                rows.entry(date).or_insert(row);
            }
        }
        let next_row = sheet
            .last_row_in_column(0, DATE_COLUMN)
            .unwrap_or(0)
            .max(FIRST_DATA_ROW);
        DateIndex { rows, next_row }
    }

    fn get(&self, date: &NaiveDateTime) -> Option<usize> {
        self.rows.get(date).copied()
    }

    /// Reserve the next free row for `date`.
    fn append(&mut self, date: NaiveDateTime) -> usize {
        let row = self.next_row;
        self.rows.insert(date, row);
        self.next_row += 1;
        row
    }
}

/// Upsert `records` into `dest` in input order.
///
/// A record whose date (exact timestamp) already has a row overwrites
/// `metric_column` (0-based) in that row; otherwise a row is appended after
/// the last filled date with the date, the value and, where empty, the
/// month formulas. Dates appended earlier in the same call are matched like
/// existing ones. Other metric columns are never touched.
pub fn reconcile(dest: &mut Sheet, metric_column: usize, records: &[MetricRecord]) -> ReconcileSummary {
    let mut index = DateIndex::build(dest);
    let mut summary = ReconcileSummary::default();

    for record in records {
        match index.get(&record.date) {
            Some(row) => {
                debug!(sheet = dest.name(), row = row + 1, date = %record.date, "updating row");
                dest.set(row, metric_column, record.value.clone());
                summary.updated += 1;
            }
            None => {
                let row = index.append(record.date);
                debug!(sheet = dest.name(), row = row + 1, date = %record.date, "appending row");
                dest.set(row, DATE_COLUMN, record.date);
                dest.set(row, metric_column, record.value.clone());
                if dest.cell(row, MONTH_NUMBER_COLUMN).is_blank() {
                    dest.set(row, MONTH_NUMBER_COLUMN, CellValue::formula(month_number_formula(row + 1)));
                }
                if dest.cell(row, MONTH_NAME_COLUMN).is_blank() {
                    dest.set(row, MONTH_NAME_COLUMN, CellValue::formula(month_name_formula(row + 1)));
                }
                summary.appended += 1;
            }
        }
    }

    info!(
        sheet = dest.name(),
        updated = summary.updated,
        appended = summary.appended,
        "reconciled"
    );
    summary
}
