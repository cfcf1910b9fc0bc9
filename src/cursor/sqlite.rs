//! # SQLite Cursor
//!
//! `SqliteCursor` adapts a rusqlite statement query to the `Cursor`
//! protocol.
//!
//! ## Column Descriptors
//!
//! Descriptors come from the prepared statement's declared column types,
//! resolved with `ScanType::from_declared`:
//!
//! ```text
//! CREATE TABLE employee (emp_no INT, birth_date DATE, first_name VARCHAR(14), ...)
//!                        ───┬───    ─────┬─────     ──────────┬──────────
//!                          Int          Date                 Text
//!
//! SELECT count(*) ...   no declared type ──> Any
//! ```
//!
//! A declared name outside the known list falls back to SQLite's affinity
//! rules (`NUMBER`, `UUID` and `GEOMETRY` become Any, `UNSIGNED INT` becomes
//! Int), so every column SQLite accepts resolves.
//!
//! SQLite does not report nullability, so every slot is nullable.
//!
//! ## Iteration
//!
//! `advance` steps the underlying `Rows`. A step error ends iteration and is
//! held until `completion_error`. `read_into` converts each SQLite storage
//! class into a `Value` (`INTEGER` → Int, `REAL` → Float, `TEXT` → Text,
//! `BLOB` → Blob) and lets the slot convert it to its scan type, so a DATE
//! column stored as `'1986-06-26'` lands in a Date slot as days since epoch.
//!
//! ## Usage
//!
//! ```ignore
//! let mut stmt = conn.prepare("SELECT * FROM employee")?;
//! let mut cursor = SqliteCursor::query(&mut stmt, [])?;
//! let result = rowscan::materialize(&mut cursor)?;
//! ```

use super::Cursor;
use crate::slot::Slot;
use crate::types::{ColumnType, ScanType, Value};
use eyre::{bail, Report, Result, WrapErr};
use fallible_streaming_iterator::FallibleStreamingIterator;
use rusqlite::types::ValueRef;
use rusqlite::{Params, Rows, Statement};

pub struct SqliteCursor<'stmt> {
    columns: Vec<ColumnType>,
    rows: Rows<'stmt>,
    finished: bool,
    deferred: Option<rusqlite::Error>,
}

impl<'stmt> SqliteCursor<'stmt> {
    /// Executes `stmt` with `params` and positions the cursor before the first row.
    pub fn query<P: Params>(stmt: &'stmt mut Statement<'_>, params: P) -> Result<Self> {
        let columns = describe_columns(stmt);
        let rows = stmt.query(params).wrap_err("failed to execute query")?;
        Ok(Self {
            columns,
            rows,
            finished: false,
            deferred: None,
        })
    }
}

fn describe_columns(stmt: &Statement<'_>) -> Vec<ColumnType> {
    stmt.columns()
        .iter()
        .map(|column| match column.decl_type() {
            Some(declared) => {
                let scan_type =
                    ScanType::from_declared(declared).unwrap_or_else(|| affinity(declared));
                ColumnType::new(column.name(), scan_type).with_database_type_name(declared)
            }
            None => ColumnType::from_declared(column.name(), None),
        })
        .collect()
}

/// SQLite column affinity for a declared type the name table does not know.
///
/// Rules are applied in SQLite's order, so `FLOATING POINT` is an integer
/// column. NUMERIC affinity keeps whatever storage class the row holds.
fn affinity(declared: &str) -> ScanType {
    let upper = declared.to_ascii_uppercase();
    if upper.contains("INT") {
        ScanType::Int
    } else if ["CHAR", "CLOB", "TEXT"].iter().any(|k| upper.contains(k)) {
        ScanType::Text
    } else if upper.contains("BLOB") {
        ScanType::Blob
    } else if ["REAL", "FLOA", "DOUB"].iter().any(|k| upper.contains(k)) {
        ScanType::Float
    } else {
        ScanType::Any
    }
}

fn to_value(raw: ValueRef<'_>) -> Result<Value<'_>> {
    Ok(match raw {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(bytes) => {
            Value::Text(std::str::from_utf8(bytes).wrap_err("TEXT value is not valid UTF-8")?)
        }
        ValueRef::Blob(bytes) => Value::Blob(bytes),
    })
}

impl Cursor for SqliteCursor<'_> {
    fn column_types(&self) -> Result<Vec<ColumnType>> {
        Ok(self.columns.clone())
    }

    fn advance(&mut self) -> bool {
        if self.finished {
            return false;
        }
        match FallibleStreamingIterator::advance(&mut self.rows) {
            Ok(()) if self.rows.get().is_some() => true,
            Ok(()) => {
                self.finished = true;
                false
            }
            Err(err) => {
                self.deferred = Some(err);
                self.finished = true;
                false
            }
        }
    }

    fn read_into(&mut self, slots: &mut [Slot]) -> Result<()> {
        let Some(row) = self.rows.get() else {
            bail!("read_into called without a current row");
        };
        if slots.len() != self.columns.len() {
            bail!(
                "query returns {} columns but {} slots were supplied",
                self.columns.len(),
                slots.len()
            );
        }

        for (idx, slot) in slots.iter_mut().enumerate() {
            let name = self.columns[idx].name();
            let raw = row
                .get_ref(idx)
                .wrap_err_with(|| format!("failed to read column {} ('{}')", idx, name))?;
            let value =
                to_value(raw).wrap_err_with(|| format!("column {} ('{}')", idx, name))?;
            slot.store(value)
                .wrap_err_with(|| format!("column {} ('{}')", idx, name))?;
        }
        Ok(())
    }

    fn completion_error(&mut self) -> Option<Report> {
        self.deferred.take().map(Report::new)
    }
}
