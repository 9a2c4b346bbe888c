//! In-memory table engine behind the Tablisa viewer: load a spreadsheet
//! once, then derive a searchable, filterable, paginated view from it.

pub use crate::cell::Cell;
pub use crate::pager::{DEFAULT_PAGE_SIZE, Pager};
pub use crate::sheet::{LoadError, Sheet};
pub use crate::view::{Predicate, TableEvent, ViewState};

pub mod cell;
pub mod pager;
pub mod sheet;
pub mod view;
