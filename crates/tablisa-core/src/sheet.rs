use std::io::Cursor;
use std::path::Path;

use calamine::{Reader, open_workbook_auto_from_rs};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cell::Cell;

/// Why a spreadsheet could not be turned into a [`Sheet`].
///
/// Load failures are terminal: the viewer shows a static error message and
/// never retries, so no partial sheet is ever exposed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read spreadsheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode spreadsheet: {0}")]
    Decode(#[from] calamine::Error),
    #[error("workbook contains no sheets")]
    NoSheet,
}

/// The full dataset, loaded once and immutable afterwards.
///
/// Row 0 of the source becomes `headers`; every data row is normalized to
/// exactly `headers.len()` cells (short rows are padded with [`Cell::Empty`],
/// long rows truncated), so column indexing is total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Decode an in-memory spreadsheet (the bundled asset) into a `Sheet`,
    /// using the first declared sheet of the workbook only.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(LoadError::NoSheet)?;
        let range = workbook.worksheet_range(&name)?;

        let mut grid = range
            .rows()
            .map(|row| row.iter().map(Cell::from).collect::<Vec<_>>());

        let headers: Vec<String> = match grid.next() {
            Some(header_row) => header_row.iter().map(Cell::to_string).collect(),
            // A sheet with zero rows is the empty-data state, not a failure.
            None => Vec::new(),
        };

        let width = headers.len();
        let rows: Vec<Vec<Cell>> = grid
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();

        debug!(
            sheet = %name,
            columns = headers.len(),
            rows = rows.len(),
            "decoded spreadsheet"
        );
        Ok(Sheet { headers, rows })
    }

    /// Read a spreadsheet file and decode it via [`Sheet::from_bytes`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Build a sheet directly from a grid whose first row is the header row.
    pub fn from_grid(mut grid: Vec<Vec<Cell>>) -> Self {
        if grid.is_empty() {
            return Sheet {
                headers: Vec::new(),
                rows: Vec::new(),
            };
        }
        let headers: Vec<String> = grid.remove(0).iter().map(Cell::to_string).collect();
        let width = headers.len();
        for row in &mut grid {
            row.resize(width, Cell::Empty);
        }
        Sheet {
            headers,
            rows: grid,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows only; the header row is held separately.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// True when the source had no rows at all.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}
