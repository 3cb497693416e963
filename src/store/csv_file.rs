//! CSV-file row store.
//!
//! Treats a headerless CSV file as a sheet: CSV line 1 is row 1. Every read
//! parses the file afresh and every update rewrites it through a temporary
//! file in the same directory, so concurrent readers never see a torn file.
//! Blank lines count as empty rows, so row numbers match the file's lines
//! even after a rewrite.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::debug;
use tempfile::NamedTempFile;

use crate::error_handling::StoreError;

use super::{check_width, read_cells, row_index, write_cells, ColumnRange, RowStore};

/// A sheet backed by a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvRowStore {
    path: PathBuf,
}

impl CsvRowStore {
    /// Opens an existing CSV file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file does not exist or is unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        fs::metadata(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Vec<String>>, StoreError> {
        let data = fs::read(&self.path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_slice());

        // The reader skips blank lines silently. Each record's first line is
        // recovered from the line counter after the read, and any gap since
        // the previous record is filled with empty rows.
        let mut rows = Vec::new();
        let mut record = StringRecord::new();
        let mut next_line = 1u64;
        while reader.read_record(&mut record)? {
            let position = reader.position();
            let embedded: u64 = record
                .iter()
                .map(|field| field.matches('\n').count() as u64)
                .sum();
            // A CRLF terminator leaves its LF for the next read
            let consumed_lf = usize::try_from(position.byte())
                .ok()
                .and_then(|end| end.checked_sub(1))
                .and_then(|last| data.get(last))
                == Some(&b'\n');
            let start = position
                .line()
                .saturating_sub(embedded + u64::from(consumed_lf));
            for _ in next_line..start {
                rows.push(Vec::new());
            }
            rows.push(record.iter().map(str::to_string).collect());
            next_line = start.max(next_line) + embedded + 1;
        }
        Ok(rows)
    }

    fn write_all(&self, rows: &[Vec<String>]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = WriterBuilder::new()
                .flexible(true)
                .from_writer(tmp.as_file());
            for row in rows {
                // A truly blank line would be skipped on the next read
                if row.is_empty() {
                    writer.write_record([""])?;
                } else {
                    writer.write_record(row)?;
                }
            }
            writer.flush()?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl RowStore for CsvRowStore {
    fn get(&self, row: u32, columns: &ColumnRange) -> Result<Vec<String>, StoreError> {
        let index = row_index(row)?;
        let rows = self.read_all()?;
        Ok(read_cells(rows.get(index), columns))
    }

    fn update(&self, row: u32, columns: &ColumnRange, values: &[String]) -> Result<(), StoreError> {
        let index = row_index(row)?;
        check_width(columns, values)?;

        let mut rows = self.read_all()?;
        write_cells(&mut rows, index, columns, values);
        self.write_all(&rows)?;
        debug!(
            "Wrote {} cell(s) to {}{} in {}",
            values.len(),
            columns,
            row,
            self.path.display()
        );
        Ok(())
    }
}
