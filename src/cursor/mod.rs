//! # Cursor Capability Interface
//!
//! A `Cursor` is the only thing the materializer needs from a database
//! driver: a forward-only, one-row-at-a-time view over a query's result.
//!
//! ## Protocol
//!
//! ```text
//! column_types()          once, before the first advance
//!      │
//!      ▼
//! advance() ──false──> completion_error()   Some(err): iteration failed
//!      │ true                               None: clean end of data
//!      ▼
//! read_into(&mut slots)   populate slot i from column i of the current row
//!      │
//!      └──> advance() ...
//! ```
//!
//! `advance` cannot fail directly; a driver error that stops iteration is
//! held by the cursor and reported by `completion_error`. The cursor is not
//! closed by the materializer; dropping it stays with the caller.
//!
//! ## Implementations
//!
//! - [`MemoryCursor`]: rows held in memory, with fault injection for tests
//! - `SqliteCursor` (feature `sqlite`): a rusqlite statement query

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryCursor;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteCursor;

use crate::slot::Slot;
use crate::types::ColumnType;
use eyre::{Report, Result};

pub trait Cursor {
    /// Describes every column of the result, in column order.
    fn column_types(&self) -> Result<Vec<ColumnType>>;

    /// Moves to the next row. Returns false at end of data or on error.
    fn advance(&mut self) -> bool;

    /// Stores the current row into `slots`, matched by position.
    fn read_into(&mut self, slots: &mut [Slot]) -> Result<()>;

    /// Takes the error that ended iteration, if any.
    fn completion_error(&mut self) -> Option<Report>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn column_types(&self) -> Result<Vec<ColumnType>> {
        (**self).column_types()
    }

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn read_into(&mut self, slots: &mut [Slot]) -> Result<()> {
        (**self).read_into(slots)
    }

    fn completion_error(&mut self) -> Option<Report> {
        (**self).completion_error()
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    fn column_types(&self) -> Result<Vec<ColumnType>> {
        (**self).column_types()
    }

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn read_into(&mut self, slots: &mut [Slot]) -> Result<()> {
        (**self).read_into(slots)
    }

    fn completion_error(&mut self) -> Option<Report> {
        (**self).completion_error()
    }
}
