use crate::cell::CellValue;
use crate::error::{Result, SheetError};

static NULL_CELL: CellValue = CellValue::Null;

/// A sheet representing a 2D grid of cells (row-major storage).
///
/// Like a spreadsheet tab, the grid is unbounded for writes: setting a cell
/// past the current extent grows the grid with nulls. Rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let converted: Vec<Vec<CellValue>> = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Sheet {
            name: "Sheet1".to_string(),
            data: converted,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the number of columns (width of the widest row)
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.data.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the sheet is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the raw row data
    #[must_use]
    pub fn data(&self) -> &[Vec<CellValue>] {
        &self.data
    }

    /// Borrow the raw row data mutably
    pub fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.data
    }

    // ===== Cell Access =====

    /// Get a cell value by row and column index (0-based)
    pub fn get(&self, row: usize, col: usize) -> Result<&CellValue> {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(SheetError::IndexOutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.col_count(),
            })
    }

    /// Get a cell value (0-based), reading cells outside the grid as null.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&NULL_CELL)
    }

    /// Set a cell value by row and column index (0-based), growing the grid as needed
    pub fn set<T: Into<CellValue>>(&mut self, row: usize, col: usize, value: T) {
        if self.data.len() <= row {
            self.data.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.data[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Null);
        }
        cells[col] = value.into();
    }

    // ===== A1-Style Notation Access =====

    /// Get a cell value using A1-style notation (e.g., "A1", "B2")
    pub fn get_a1(&self, notation: &str) -> Result<&CellValue> {
        let (row, col) = crate::a1_notation::parse_a1(notation)?;
        self.get(row, col)
    }

    /// Set a cell value using A1-style notation
    pub fn set_a1<T: Into<CellValue>>(&mut self, notation: &str, value: T) -> Result<()> {
        let (row, col) = crate::a1_notation::parse_a1(notation)?;
        self.set(row, col, value);
        Ok(())
    }

    // ===== Extents =====

    /// 1-based index of the last row whose cell in `col` (0-based) is non-blank,
    /// considering only rows at or after `start_row` (0-based).
    #[must_use]
    pub fn last_row_in_column(&self, start_row: usize, col: usize) -> Option<usize> {
        (start_row..self.row_count())
            .rev()
            .find(|&row| !self.cell(row, col).is_blank())
            .map(|row| row + 1)
    }

    /// Values of one column (0-based), top to bottom, one entry per grid row.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &CellValue> + '_ {
        (0..self.row_count()).map(move |row| self.cell(row, col))
    }

    /// Copy the rectangle `[start_row..=end_row] x [start_col..=end_col]` (0-based).
    /// Cells outside the grid read as null.
    #[must_use]
    pub fn read_range(
        &self,
        start_row: usize,
        end_row: usize,
        start_col: usize,
        end_col: usize,
    ) -> Vec<Vec<CellValue>> {
        if end_row < start_row || end_col < start_col {
            return Vec::new();
        }
        (start_row..=end_row)
            .map(|row| {
                (start_col..=end_col)
                    .map(|col| self.cell(row, col).clone())
                    .collect()
            })
            .collect()
    }
}
