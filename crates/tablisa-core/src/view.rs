use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cell::Cell;
use crate::pager::Pager;
use crate::sheet::Sheet;

/// The single effective predicate behind the active view.
///
/// Search and column filter override each other rather than compose: each is
/// always evaluated against the full sheet, and applying one discards the
/// other, exactly like the viewer this engine reproduces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    All,
    Search(String),
    Filter { column: usize, value: Cell },
}

/// A user action that can change the view.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// The search box changed; fired on every keystroke. An empty query is
    /// the full reset back to all rows.
    SearchChanged(String),
    /// A value was picked in the filter modal for the given column.
    FilterApplied { column: usize, value: Cell },
    /// A page selector was clicked.
    PageRequested(usize),
}

/// Case-insensitive free-text search: a row matches when any cell's string
/// rendering contains the lowercased query as a substring.
pub fn search_rows(sheet: &Sheet, query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return (0..sheet.row_count()).collect();
    }
    sheet
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            row.iter()
                .any(|cell| cell.to_string().to_lowercase().contains(&needle))
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Exact, type-sensitive equality filter on one column. Never substring.
pub fn filter_rows(sheet: &Sheet, column: usize, value: &Cell) -> Vec<usize> {
    sheet
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row.get(column) == Some(value))
        .map(|(idx, _)| idx)
        .collect()
}

/// Unique values observed at `column` across all data rows, in first-seen
/// order. These are the candidates offered by the filter modal.
pub fn distinct_values(sheet: &Sheet, column: usize) -> Vec<Cell> {
    let mut seen: Vec<Cell> = Vec::new();
    for row in sheet.rows() {
        if let Some(cell) = row.get(column)
            && !seen.contains(cell)
        {
            seen.push(cell.clone());
        }
    }
    seen
}

/// The viewer's whole UI-visible state: the immutable sheet plus the derived
/// active view and pagination.
///
/// State transitions go through [`ViewState::apply`], a total reducer over
/// [`TableEvent`]s; every predicate mutation recomputes the active rows from
/// the full sheet and resets pagination to page 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewState {
    sheet: Sheet,
    predicate: Predicate,
    /// Indices into `sheet.rows()` currently matching the predicate.
    active: Vec<usize>,
    pager: Pager,
}

impl ViewState {
    pub fn new(sheet: Sheet) -> Self {
        let active = (0..sheet.row_count()).collect();
        ViewState {
            sheet,
            predicate: Predicate::All,
            active,
            pager: Pager::default(),
        }
    }

    pub fn apply(&mut self, event: TableEvent) {
        match event {
            TableEvent::SearchChanged(query) => {
                self.set_predicate(if query.is_empty() {
                    Predicate::All
                } else {
                    Predicate::Search(query)
                });
            }
            TableEvent::FilterApplied { column, value } => {
                self.set_predicate(Predicate::Filter { column, value });
            }
            TableEvent::PageRequested(page) => {
                // Pure page move: predicate and active rows are untouched.
                self.pager.request(page, self.active.len());
            }
        }
    }

    fn set_predicate(&mut self, predicate: Predicate) {
        self.active = match &predicate {
            Predicate::All => (0..self.sheet.row_count()).collect(),
            Predicate::Search(query) => search_rows(&self.sheet, query),
            Predicate::Filter { column, value } => filter_rows(&self.sheet, *column, value),
        };
        self.pager.reset();
        debug!(matches = self.active.len(), ?predicate, "view recomputed");
        self.predicate = predicate;
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn headers(&self) -> &[String] {
        self.sheet.headers()
    }

    /// Row count of the active view (the "items found" readout).
    pub fn total_items(&self) -> usize {
        self.active.len()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.active.len())
    }

    pub fn current_page(&self) -> usize {
        self.pager.page()
    }

    pub fn page_size(&self) -> usize {
        self.pager.page_size()
    }

    /// Filter candidates for a column, always drawn from the full sheet.
    pub fn distinct_values(&self, column: usize) -> Vec<Cell> {
        distinct_values(&self.sheet, column)
    }

    /// The active view's rows, in sheet order.
    pub fn active_rows(&self) -> impl Iterator<Item = &[Cell]> {
        let rows = self.sheet.rows();
        self.active.iter().map(move |&idx| rows[idx].as_slice())
    }

    /// Only the current page's slice of the active view.
    pub fn page_rows(&self) -> Vec<&[Cell]> {
        self.active[self.pager.bounds(self.active.len())]
            .iter()
            .map(|&idx| self.sheet.rows()[idx].as_slice())
            .collect()
    }
}
