//! Operator curation session.
//!
//! A session walks a sheet row by row: load a row's product URL, scrape it,
//! hand the validated images to the operator, write their selections to the
//! destination columns, and move on.

mod selection;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;

use crate::config::{FIRST_DATA_ROW, LABEL_COLUMN, SELECTION_COLUMNS, URL_COLUMN};
use crate::pipeline::{scrape_images, ScrapeContext, ScrapeReport};
use crate::store::{ColumnRange, RowStore};

pub use selection::build_selection_row;

/// What the operator sees for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum RowView {
    /// The row has no product URL
    NoLink { row: u32 },
    /// The row's page was scraped; `images` may be empty
    Images {
        row: u32,
        url: String,
        label: Option<String>,
        images: Vec<String>,
        report: ScrapeReport,
    },
}

impl RowView {
    pub fn row(&self) -> u32 {
        match self {
            RowView::NoLink { row } | RowView::Images { row, .. } => *row,
        }
    }
}

/// Where to go after saving a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Advance,
    Jump(u32),
}

impl Navigation {
    /// A positive row number jumps there; anything else advances.
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Navigation::Advance;
        }
        match raw.parse::<u32>() {
            Ok(row) if row >= 1 => Navigation::Jump(row),
            _ => Navigation::Advance,
        }
    }
}

/// Per-operator position in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurationSession {
    current_row: u32,
}

impl Default for CurationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CurationSession {
    /// Starts at the first data row.
    pub fn new() -> Self {
        Self::at(FIRST_DATA_ROW)
    }

    /// Starts at `row`, clamped to 1.
    pub fn at(row: u32) -> Self {
        Self {
            current_row: row.max(1),
        }
    }

    pub fn current_row(&self) -> u32 {
        self.current_row
    }

    /// Moves to `row`, clamped to 1.
    pub fn jump_to(&mut self, row: u32) {
        self.current_row = row.max(1);
        debug!("Session moved to row {}", self.current_row);
    }

    /// Loads the current row, scraping its product page if it has one.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot be read. Scrape failures are
    /// reported inside the returned view.
    pub async fn load_row(&self, store: &dyn RowStore, ctx: &ScrapeContext) -> Result<RowView> {
        let row = self.current_row;
        let url_column = ColumnRange::parse(URL_COLUMN)?;
        let Some(url) = store
            .cell(row, &url_column)
            .with_context(|| format!("Failed to read {URL_COLUMN}{row}"))?
        else {
            info!("Row {} has no product link", row);
            return Ok(RowView::NoLink { row });
        };

        let report = scrape_images(ctx, &url).await;
        let label_column = ColumnRange::parse(LABEL_COLUMN)?;
        let label = store
            .cell(row, &label_column)
            .with_context(|| format!("Failed to read {LABEL_COLUMN}{row}"))?;
        let images = report
            .validated_urls()
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(RowView::Images {
            row,
            url,
            label,
            images,
            report,
        })
    }

    /// Writes the operator's selections to the current row and navigates.
    ///
    /// # Returns
    ///
    /// The new current row.
    ///
    /// # Errors
    ///
    /// Fails on an unknown slot token or a store write error. The session does
    /// not move when the write fails.
    pub fn apply_selection(
        &mut self,
        store: &dyn RowStore,
        selections: &[(String, String)],
        navigation: Navigation,
    ) -> Result<u32> {
        let values = build_selection_row(selections)?;
        let columns = ColumnRange::parse(SELECTION_COLUMNS)?;
        store
            .update(self.current_row, &columns, &values)
            .with_context(|| {
                format!(
                    "Failed to write selections to {columns} of row {}",
                    self.current_row
                )
            })?;
        info!(
            "Saved {} selection(s) for row {}",
            values.iter().filter(|v| !v.is_empty()).count(),
            self.current_row
        );

        match navigation {
            Navigation::Jump(row) => self.jump_to(row),
            Navigation::Advance => self.jump_to(self.current_row.saturating_add(1)),
        }
        Ok(self.current_row)
    }
}
