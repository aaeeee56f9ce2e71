//! Workbook substrate for metainsights
//!
//! Provides the grid the importer runs against: a [`Book`] of named
//! [`Sheet`]s holding [`CellValue`]s, addressed with A1 notation, loaded from
//! and saved to XLSX files or directories of CSV files.
//!
//! # Examples
//!
//! ## Creating a sheet from data
//!
//! ```
//! use metainsights_sheet::{Sheet, CellValue};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["Alcance no Facebook"],
//!     vec!["Data", "Primary"],
//! ]);
//!
//! assert_eq!(sheet.row_count(), 2);
//! assert_eq!(sheet.col_count(), 2);
//! assert_eq!(sheet.cell(1, 1), &CellValue::from("Primary"));
//! ```
//!
//! ## Growing a sheet
//!
//! ```
//! use metainsights_sheet::{Sheet, CellValue};
//!
//! let mut sheet = Sheet::new();
//! sheet.set_a1("D5", 150).unwrap();
//!
//! assert_eq!(sheet.row_count(), 5);
//! assert_eq!(sheet.get_a1("D5").unwrap(), &CellValue::Int(150));
//! ```
//!
//! ## Working with books
//!
//! ```
//! use metainsights_sheet::{Book, Sheet};
//!
//! let mut book = Book::new();
//! book.add_sheet("Alcance", Sheet::new()).unwrap();
//! book.insert_sheet("Facebook Insights").unwrap();
//!
//! assert_eq!(book.sheet_count(), 2);
//! assert!(book.insert_sheet("Alcance").is_err());
//! ```

mod a1_notation;
mod book;
mod cell;
mod csv;
mod error;
mod sheet;
mod xlsx;

/// Re-export A1 notation helpers.
pub use a1_notation::{
    column_index_to_letters, parse_a1, parse_column, parse_column_range, to_a1_notation,
};
/// Re-export book type.
pub use book::Book;
/// Re-export cell value types and date helpers.
pub use cell::{datetime_to_serial, parse_datetime, serial_to_datetime, CellValue, FormulaCell};
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
