//! Spreadsheet-style row storage.
//!
//! Rows are 1-based and columns are addressed by letters, as in a
//! spreadsheet. The session only needs to read single cells and write one
//! contiguous run of cells per row, so that is all [`RowStore`] offers.

mod csv_file;
mod memory;

use std::fmt;

use crate::error_handling::StoreError;

pub use csv_file::CsvRowStore;
pub use memory::MemoryRowStore;

/// A contiguous, inclusive range of columns such as `F:O`, or a single `D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    /// 0-based index of the first column
    pub start: usize,
    /// 0-based index of the last column (inclusive)
    pub end: usize,
}

impl ColumnRange {
    /// Parses `"D"` or `"F:O"`. Letters are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidColumns` for empty or non-alphabetic parts
    /// and for reversed ranges such as `O:F`.
    pub fn parse(reference: &str) -> Result<Self, StoreError> {
        let invalid = || StoreError::InvalidColumns(reference.to_string());
        let (first, last) = match reference.split_once(':') {
            Some((first, last)) => (first, last),
            None => (reference, reference),
        };
        let start = column_index(first.trim()).ok_or_else(invalid)?;
        let end = column_index(last.trim()).ok_or_else(invalid)?;
        if end < start {
            return Err(invalid());
        }
        Ok(Self { start, end })
    }

    pub fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    /// Number of columns covered.
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", column_letters(self.start))
        } else {
            write!(
                f,
                "{}:{}",
                column_letters(self.start),
                column_letters(self.end)
            )
        }
    }
}

/// `A` → 0, `Z` → 25, `AA` → 26.
fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut index = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index - 1)
}

fn column_letters(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Cell access by row number and column range.
pub trait RowStore: Send + Sync {
    /// Reads `columns` of `row`. Missing rows and cells read as empty strings,
    /// so the result always has `columns.width()` entries.
    fn get(&self, row: u32, columns: &ColumnRange) -> Result<Vec<String>, StoreError>;

    /// Overwrites `columns` of `row` with `values`, growing the sheet as needed.
    fn update(&self, row: u32, columns: &ColumnRange, values: &[String]) -> Result<(), StoreError>;

    /// Reads a single cell, treating whitespace-only content as empty.
    fn cell(&self, row: u32, column: &ColumnRange) -> Result<Option<String>, StoreError> {
        let values = self.get(row, column)?;
        Ok(values
            .into_iter()
            .next()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }
}

/// Row number to 0-based index.
pub(crate) fn row_index(row: u32) -> Result<usize, StoreError> {
    if row == 0 {
        return Err(StoreError::InvalidRow(row));
    }
    Ok((row - 1) as usize)
}

pub(crate) fn check_width(columns: &ColumnRange, values: &[String]) -> Result<(), StoreError> {
    if values.len() != columns.width() {
        return Err(StoreError::WidthMismatch {
            range: columns.to_string(),
            expected: columns.width(),
            actual: values.len(),
        });
    }
    Ok(())
}

/// Copies `columns` out of `cells`, padding with empty strings.
pub(crate) fn read_cells(cells: Option<&Vec<String>>, columns: &ColumnRange) -> Vec<String> {
    (columns.start..=columns.end)
        .map(|i| cells.and_then(|c| c.get(i)).cloned().unwrap_or_default())
        .collect()
}

/// Writes `values` into `rows[index]` at `columns`, padding rows and cells.
pub(crate) fn write_cells(
    rows: &mut Vec<Vec<String>>,
    index: usize,
    columns: &ColumnRange,
    values: &[String],
) {
    if rows.len() <= index {
        rows.resize_with(index + 1, Vec::new);
    }
    let cells = &mut rows[index];
    if cells.len() <= columns.end {
        cells.resize(columns.end + 1, String::new());
    }
    for (offset, value) in values.iter().enumerate() {
        cells[columns.start + offset] = value.clone();
    }
}
