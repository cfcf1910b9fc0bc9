//! # Dynamic Row Materializer
//!
//! Turns an open cursor into a `ResultSet` without a caller-declared row
//! type. The column layout is discovered from the cursor at call time.
//!
//! ## Algorithm
//!
//! ```text
//! 1. column_types()            error ──> return it (no slots, no advances)
//! 2. one Slot per column       unresolved type ──> error (no advances)
//! 3. empty ResultSet
//! 4. loop advance()            false ──> step 6
//!      read_into(slots)        error ──> return it, rows discarded
//! 5.   copy slots into a Row, append
//! 6. completion_error()        Some ──> return it, rows discarded
//!                              None ──> return the ResultSet
//! ```
//!
//! Slots are allocated once per call and overwritten for every row; each
//! `Row` holds copies, so rows stay independent of each other and of the
//! cursor. The call is all-or-nothing: on any error the caller gets only
//! the error, exactly as the cursor reported it.
//!
//! The cursor is consumed but not closed.
//!
//! ## Usage
//!
//! ```ignore
//! use rowscan::{materialize, Materializer};
//!
//! let rows = materialize(&mut cursor)?;
//!
//! let wide = Materializer::builder()
//!     .row_capacity(10_000)
//!     .text_capacity(256)
//!     .build();
//! let rows = wide.materialize(&mut cursor)?;
//! ```

use crate::config::{
    DEFAULT_ROW_CAPACITY, DEFAULT_TEXT_CAPACITY, INLINE_SLOT_COUNT, MAX_ROW_CAPACITY,
    MAX_TEXT_CAPACITY,
};
use crate::cursor::Cursor;
use crate::row::{ResultSet, Row};
use crate::slot::Slot;
use crate::types::ColumnType;
use eyre::Result;
use log::{debug, trace};
use smallvec::SmallVec;

type SlotList = SmallVec<[Slot; INLINE_SLOT_COUNT]>;

/// Materializes every row of `cursor` using default capacities.
pub fn materialize<C: Cursor + ?Sized>(cursor: &mut C) -> Result<ResultSet> {
    Materializer::default().materialize(cursor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Materializer {
    row_capacity: usize,
    text_capacity: usize,
}

impl Default for Materializer {
    fn default() -> Self {
        Self {
            row_capacity: DEFAULT_ROW_CAPACITY,
            text_capacity: DEFAULT_TEXT_CAPACITY,
        }
    }
}

impl Materializer {
    pub fn builder() -> MaterializerBuilder {
        MaterializerBuilder::new()
    }

    pub fn row_capacity(&self) -> usize {
        self.row_capacity
    }

    pub fn text_capacity(&self) -> usize {
        self.text_capacity
    }

    pub fn materialize<C: Cursor + ?Sized>(&self, cursor: &mut C) -> Result<ResultSet> {
        let columns = cursor.column_types()?;
        let mut slots = self.allocate_slots(&columns)?;
        let mut result = ResultSet::with_capacity(columns, self.row_capacity);

        while cursor.advance() {
            cursor.read_into(&mut slots)?;
            result.push(Row::new(slots.iter().map(Slot::value).collect()));
        }

        if let Some(err) = cursor.completion_error() {
            return Err(err);
        }

        debug!(
            "materialized {} rows x {} columns",
            result.len(),
            result.column_count()
        );
        Ok(result)
    }

    fn allocate_slots(&self, columns: &[ColumnType]) -> Result<SlotList> {
        columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let slot = Slot::for_column(column, self.text_capacity)?;
                trace!(
                    "column {} ('{}'): {} slot, nullable={}",
                    idx,
                    column.name(),
                    slot.scan_type(),
                    slot.is_nullable()
                );
                Ok(slot)
            })
            .collect()
    }
}

/// Builder for a `Materializer`.
///
/// Capacities above `MAX_ROW_CAPACITY` / `MAX_TEXT_CAPACITY` are clamped;
/// buffers still grow past them on demand.
#[derive(Debug, Default)]
pub struct MaterializerBuilder {
    row_capacity: Option<usize>,
    text_capacity: Option<usize>,
}

impl MaterializerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows reserved in the ResultSet before the first read.
    pub fn row_capacity(mut self, rows: usize) -> Self {
        self.row_capacity = Some(rows);
        self
    }

    /// Bytes reserved in each Text/Blob slot before the first read.
    pub fn text_capacity(mut self, bytes: usize) -> Self {
        self.text_capacity = Some(bytes);
        self
    }

    pub fn build(self) -> Materializer {
        Materializer {
            row_capacity: self
                .row_capacity
                .unwrap_or(DEFAULT_ROW_CAPACITY)
                .min(MAX_ROW_CAPACITY),
            text_capacity: self
                .text_capacity
                .unwrap_or(DEFAULT_TEXT_CAPACITY)
                .min(MAX_TEXT_CAPACITY),
        }
    }
}
