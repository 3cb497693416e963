//! In-memory row store.

use std::sync::Mutex;

use crate::error_handling::StoreError;

use super::{check_width, read_cells, row_index, write_cells, ColumnRange, RowStore};

/// A sheet held in memory. Row 1 is `rows[0]`.
#[derive(Debug, Default)]
pub struct MemoryRowStore {
    rows: Mutex<Vec<Vec<String>>>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Snapshot of every row.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<String>>> {
        // A panic mid-write leaves at worst a partially padded row
        self.rows.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RowStore for MemoryRowStore {
    fn get(&self, row: u32, columns: &ColumnRange) -> Result<Vec<String>, StoreError> {
        let index = row_index(row)?;
        Ok(read_cells(self.lock().get(index), columns))
    }

    fn update(&self, row: u32, columns: &ColumnRange, values: &[String]) -> Result<(), StoreError> {
        let index = row_index(row)?;
        check_width(columns, values)?;
        write_cells(&mut self.lock(), index, columns, values);
        Ok(())
    }
}
