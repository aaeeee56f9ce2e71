//! Error types for metainsights.

use metainsights_sheet::SheetError;
use thiserror::Error;

/// Result type for import operations.
pub type InsightsResult<T> = Result<T, InsightsError>;

/// Errors that abort an import or sheet-creation run.
///
/// Anticipated conditions (cancelled dialog, missing raw sheet, absent
/// marker, sheet already created) are not errors; they surface as outcome
/// variants instead.
#[derive(Debug, Error)]
pub enum InsightsError {
    /// Failure reported by the workbook layer.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// A platform has data to import but its tracking sheet does not exist.
    #[error("Destination sheet not found: {name}")]
    DestinationMissing { name: String },

    /// A non-blank date cell could not be read as a date.
    #[error("Invalid date in sheet '{sheet}' at row {row}: {value:?}")]
    InvalidDate {
        sheet: String,
        row: usize,
        value: String,
    },

    /// Invalid import configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl InsightsError {
    /// Create an invalid date error for a 1-based row.
    pub fn invalid_date(sheet: impl Into<String>, row: usize, value: impl Into<String>) -> Self {
        Self::InvalidDate {
            sheet: sheet.into(),
            row,
            value: value.into(),
        }
    }
}

impl From<serde_yaml::Error> for InsightsError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Config(e.to_string())
    }
}
