//! # In-Memory Cursor
//!
//! `MemoryCursor` serves rows from a `Vec<Vec<OwnedValue>>` through the
//! `Cursor` protocol. It backs fixture-driven tests and benchmarks, and can
//! inject each of the three failure kinds a real driver produces:
//!
//! | Fault | Effect |
//! |-------|--------|
//! | `fail_column_types(msg)` | `column_types()` returns `msg` |
//! | `fail_read_at(n, msg)` | `read_into` fails on 1-indexed row `n` |
//! | `fail_advance_at(n, msg)` | `advance()` stops before row `n`; `completion_error()` returns `msg` |
//!
//! ```ignore
//! let mut cursor = MemoryCursor::new(columns, rows).fail_advance_at(2, "connection reset");
//! assert!(materialize(&mut cursor).is_err());
//! ```

use super::Cursor;
use crate::slot::Slot;
use crate::types::{ColumnType, OwnedValue};
use eyre::{bail, eyre, Report, Result, WrapErr};

#[derive(Debug, Default)]
struct Faults {
    column_types: Option<String>,
    read_at: Option<(usize, String)>,
    advance_at: Option<(usize, String)>,
}

#[derive(Debug)]
pub struct MemoryCursor {
    columns: Vec<ColumnType>,
    rows: Vec<Vec<OwnedValue>>,
    // Number of rows delivered so far; the current row is `delivered - 1`.
    delivered: usize,
    advances: usize,
    finished: bool,
    deferred: Option<Report>,
    faults: Faults,
}

impl MemoryCursor {
    pub fn new(columns: Vec<ColumnType>, rows: Vec<Vec<OwnedValue>>) -> Self {
        Self {
            columns,
            rows,
            delivered: 0,
            advances: 0,
            finished: false,
            deferred: None,
            faults: Faults::default(),
        }
    }

    pub fn fail_column_types(mut self, message: impl Into<String>) -> Self {
        self.faults.column_types = Some(message.into());
        self
    }

    pub fn fail_read_at(mut self, row: usize, message: impl Into<String>) -> Self {
        self.faults.read_at = Some((row, message.into()));
        self
    }

    pub fn fail_advance_at(mut self, row: usize, message: impl Into<String>) -> Self {
        self.faults.advance_at = Some((row, message.into()));
        self
    }

    /// Number of `advance()` calls made against this cursor.
    pub fn advance_count(&self) -> usize {
        self.advances
    }

    /// Rewinds to before the first row and clears any deferred error.
    pub fn reset(&mut self) {
        self.delivered = 0;
        self.advances = 0;
        self.finished = false;
        self.deferred = None;
    }
}

impl Cursor for MemoryCursor {
    fn column_types(&self) -> Result<Vec<ColumnType>> {
        if let Some(message) = &self.faults.column_types {
            bail!("{}", message);
        }
        Ok(self.columns.clone())
    }

    fn advance(&mut self) -> bool {
        self.advances += 1;
        if self.finished {
            return false;
        }

        let next = self.delivered + 1;
        if let Some((row, message)) = &self.faults.advance_at {
            if *row == next {
                self.deferred = Some(eyre!("{}", message));
                self.finished = true;
                return false;
            }
        }

        if self.delivered >= self.rows.len() {
            self.finished = true;
            return false;
        }
        self.delivered = next;
        true
    }

    fn read_into(&mut self, slots: &mut [Slot]) -> Result<()> {
        if self.finished || self.delivered == 0 {
            bail!("read_into called without a current row");
        }
        if let Some((row, message)) = &self.faults.read_at {
            if *row == self.delivered {
                bail!("{}", message);
            }
        }

        let values = &self.rows[self.delivered - 1];
        if values.len() != slots.len() {
            bail!(
                "row {} has {} values but {} slots were supplied",
                self.delivered,
                values.len(),
                slots.len()
            );
        }

        for (idx, (slot, value)) in slots.iter_mut().zip(values).enumerate() {
            slot.store(value.to_value()).wrap_err_with(|| {
                let name = self.columns.get(idx).map(ColumnType::name).unwrap_or("?");
                format!("row {} column {} ('{}')", self.delivered, idx, name)
            })?;
        }
        Ok(())
    }

    fn completion_error(&mut self) -> Option<Report> {
        self.deferred.take()
    }
}
