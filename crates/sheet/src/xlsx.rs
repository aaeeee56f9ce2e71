use crate::book::Book;
use crate::cell::{datetime_to_serial, serial_to_datetime, CellValue};
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::Timelike;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel stores dates as days since 1899-12-30
        Data::DateTime(dt) => serial_to_datetime(dt.as_f64())
            .map_or(CellValue::Float(dt.as_f64()), CellValue::DateTime),
        Data::DateTimeIso(s) => CellValue::parse(s),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

/// Read one worksheet, keeping formula sources where the file has them.
fn read_worksheet(workbook: &mut Xlsx<BufReader<File>>, sheet_name: &str) -> Result<Sheet> {
    let range = workbook.worksheet_range(sheet_name)?;
    let mut sheet = Sheet::with_name(sheet_name);

    let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
    for (row, col, data) in range.cells() {
        if matches!(data, Data::Empty) {
            continue;
        }
        sheet.set(
            row_offset as usize + row,
            col_offset as usize + col,
            data_to_cell_value(data),
        );
    }

    // Formula ranges may be absent; cached values are kept in that case
    if let Ok(formulas) = workbook.worksheet_formula(sheet_name) {
        let (row_offset, col_offset) = formulas.start().unwrap_or((0, 0));
        for (row, col, formula) in formulas.cells() {
            if formula.trim().is_empty() {
                continue;
            }
            let source = if formula.starts_with('=') {
                formula.clone()
            } else {
                format!("={formula}")
            };
            sheet.set(
                row_offset as usize + row,
                col_offset as usize + col,
                CellValue::formula(source),
            );
        }
    }

    Ok(sheet)
}

impl Sheet {
    /// Load the first sheet of an Excel file
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut workbook: Xlsx<BufReader<File>> = open_workbook(path.as_ref())?;

        let Some(first) = workbook.sheet_names().first().cloned() else {
            return Ok(Sheet::new());
        };
        read_worksheet(&mut workbook, &first)
    }

    /// Write sheet data to a worksheet
    fn write_to_worksheet(&self, worksheet: &mut Worksheet) -> Result<()> {
        let date_format = Format::new().set_num_format(DATE_FORMAT);
        let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);

        for (row_idx, row) in self.data().iter().enumerate() {
            let row_num = u32::try_from(row_idx)
                .map_err(|_| SheetError::Workbook("Row index overflow".to_string()))?;
            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = u16::try_from(col_idx)
                    .map_err(|_| SheetError::Workbook("Column index overflow".to_string()))?;

                match cell {
                    CellValue::Null => {}
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row_num, col_num, *b)?;
                    }
                    CellValue::Int(i) => {
                        // Excel stores all numbers as f64
                        worksheet.write_number(row_num, col_num, *i as f64)?;
                    }
                    CellValue::Float(f) => {
                        worksheet.write_number(row_num, col_num, *f)?;
                    }
                    CellValue::String(s) => {
                        worksheet.write_string(row_num, col_num, s)?;
                    }
                    CellValue::DateTime(dt) => {
                        let serial = datetime_to_serial(dt);
                        let format = if dt.num_seconds_from_midnight() == 0 {
                            &date_format
                        } else {
                            &datetime_format
                        };
                        worksheet.write_number_with_format(row_num, col_num, serial, format)?;
                    }
                    CellValue::Formula(formula) => {
                        worksheet.write_formula(row_num, col_num, formula.source.as_str())?;
                    }
                }
            }
        }

        Ok(())
    }
}

impl Book {
    /// Load a book from an Excel file (all sheets)
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut workbook: Xlsx<BufReader<File>> = open_workbook(path.as_ref())?;

        let sheet_names = workbook.sheet_names();
        let mut book = Book::new();

        for sheet_name in sheet_names {
            let sheet = read_worksheet(&mut workbook, &sheet_name)?;
            book.add_sheet(&sheet_name, sheet)?;
        }

        Ok(book)
    }

    /// Save the book to an Excel file
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();

        for (name, sheet) in self.sheets() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(name)?;
            sheet.write_to_worksheet(worksheet)?;
        }

        workbook.save(path.as_ref())?;
        Ok(())
    }
}
