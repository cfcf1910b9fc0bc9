//! # rowscan - Dynamic Row Materialization
//!
//! rowscan reads every row of a SQL result set into memory without the
//! caller declaring a row type up front. The column layout is discovered
//! from the cursor when the query runs:
//!
//! - **One slot per column**: a typed cell allocated from the column's
//!   declared type, reused for every row of the query
//! - **Copy-out rows**: each row owns its values and outlives the cursor
//! - **All or nothing**: a call returns every row or the cursor's error
//!
//! ## Quick Start
//!
//! ```ignore
//! use rowscan::{materialize, SqliteCursor};
//!
//! let mut stmt = conn.prepare("SELECT emp_no, birth_date, first_name FROM employee")?;
//! let mut cursor = SqliteCursor::query(&mut stmt, [])?;
//! let result = materialize(&mut cursor)?;
//!
//! for row in &result {
//!     println!("{} {} {}", row[0], row[1], row[2]);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        materialize / Materializer    │
//! ├──────────────────┬──────────────────┤
//! │   Slot (write)   │  Row / ResultSet │
//! ├──────────────────┴──────────────────┤
//! │   Cursor trait (column_types,        │
//! │   advance, read_into, completion)    │
//! ├──────────────────┬──────────────────┤
//! │   MemoryCursor   │   SqliteCursor   │
//! └──────────────────┴──────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`types`]: `ScanType`, `ColumnType`, `Value`, `OwnedValue`
//! - [`slot`]: typed, reusable per-column storage
//! - [`row`]: `Row` and `ResultSet`
//! - [`cursor`]: the `Cursor` trait and its implementations
//! - [`materialize`]: the materializer and its builder
//! - [`parsing`]: date/time text parsing for temporal slots
//! - [`config`]: allocation defaults
//!
//! ## Feature Flags
//!
//! - `sqlite` (default): `SqliteCursor` over rusqlite

pub mod config;
pub mod cursor;
pub mod materialize;
pub mod parsing;
pub mod row;
pub mod slot;
pub mod types;

pub use cursor::{Cursor, MemoryCursor};
#[cfg(feature = "sqlite")]
pub use cursor::SqliteCursor;
pub use materialize::{materialize, Materializer, MaterializerBuilder};
pub use row::{ResultSet, Row};
pub use slot::Slot;
pub use types::{ColumnType, OwnedValue, ScanType, Value};
