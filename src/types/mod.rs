//! # Type System
//!
//! The types every other module speaks in.
//!
//! ## Module Structure
//!
//! - `scan_type`: `ScanType`, the closed set of slot representations
//! - `column`: `ColumnType`, the per-column descriptor reported by a cursor
//! - `value`: `Value<'a>`, borrowed values handed from a cursor to a slot
//! - `owned_value`: `OwnedValue`, owned values stored in rows
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `ScanType` | Runtime type handle used to allocate a slot |
//! | `ColumnType` | Column name, declared type, nullability, scan type |
//! | `Value<'a>` | Write-path value (borrows from the driver row) |
//! | `OwnedValue` | Copied-out value (owned by the row) |
//!
//! ## Usage
//!
//! ```ignore
//! use rowscan::types::{ColumnType, OwnedValue, ScanType, Value};
//!
//! let col = ColumnType::from_declared("hire_date", Some("DATE"));
//! assert_eq!(col.scan_type(), Some(ScanType::Date));
//!
//! let owned: OwnedValue = Value::Text("Georgi").into();
//! ```

mod column;
mod owned_value;
mod scan_type;
mod value;

pub use column::ColumnType;
pub use owned_value::OwnedValue;
pub use scan_type::ScanType;
pub use value::Value;
