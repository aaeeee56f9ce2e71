//! Layout and creation of the per-platform tracking sheets.

use crate::context::ImportContext;
use crate::error::InsightsResult;
use crate::platform::Platform;
use crate::ui::Ui;
use chrono::{Datelike, NaiveDate};
use metainsights_sheet::{CellValue, SheetError};
use tracing::info;

/// 0-based column of the month number (A).
pub const MONTH_NUMBER_COLUMN: usize = 0;
/// 0-based column of the month name (B).
pub const MONTH_NAME_COLUMN: usize = 1;
/// 0-based column of the dates (C).
pub const DATE_COLUMN: usize = 2;
/// 0-based index of the first data row (row 2; row 1 holds the header).
pub const FIRST_DATA_ROW: usize = 1;

/// Header row of a tracking sheet.
pub const HEADER_TITLES: [&str; 6] = ["Nº do Mês", "Mês", "Data", "Alcance", "Curtidas", "Seguidores"];

/// `=MONTH(C<row>)` for a 1-based row.
#[must_use]
pub fn month_number_formula(row: usize) -> String {
    format!("=MONTH(C{row})")
}

/// `=PROPER(TEXT(C<row>,"mmmm"))` for a 1-based row.
#[must_use]
pub fn month_name_formula(row: usize) -> String {
    format!("=PROPER(TEXT(C{row},\"mmmm\"))")
}

/// Result of asking for a tracking sheet to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// Create the tracking sheet for `platform`: header row, one row per day of
/// `year` in column C and month formulas in columns A and B.
///
/// An existing sheet is left untouched and reported to the user.
pub fn create_insights_sheet<U: Ui + ?Sized>(
    ctx: &mut ImportContext<'_, U>,
    platform: Platform,
    year: i32,
) -> InsightsResult<CreateOutcome> {
    let name = platform.insights_sheet_name();

    let sheet = match ctx.book.insert_sheet(name) {
        Ok(sheet) => sheet,
        Err(SheetError::SheetAlreadyExists { .. }) => {
            ctx.ui.alert(
                "⚠️ Planilha já existente",
                &format!(
                    "A planilha {name} já foi criada. Caso queira criá-la novamente, \
                     é necessário excluir a atual e executar essa ação novamente."
                ),
            );
            return Ok(CreateOutcome::AlreadyExists);
        }
        Err(e) => return Err(e.into()),
    };
    ctx.ui.toast(&format!("Criando planilha {name}..."));

    for (col, title) in HEADER_TITLES.iter().enumerate() {
        sheet.set(0, col, *title);
    }

    let days = NaiveDate::from_ymd_opt(year, 1, 1)
        .into_iter()
        .flat_map(|first| first.iter_days())
        .take_while(|d| d.year() == year);
    let mut rows = 0usize;
    for (offset, date) in days.enumerate() {
        let row = FIRST_DATA_ROW + offset;
        sheet.set(row, MONTH_NUMBER_COLUMN, CellValue::formula(month_number_formula(row + 1)));
        sheet.set(row, MONTH_NAME_COLUMN, CellValue::formula(month_name_formula(row + 1)));
        sheet.set(row, DATE_COLUMN, date);
        rows += 1;
    }

    ctx.book.set_active_sheet(name)?;
    info!(sheet = name, year, rows, "tracking sheet created");
    Ok(CreateOutcome::Created)
}
