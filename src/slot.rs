//! # Typed Slots
//!
//! A `Slot` is the write target for one column. The materializer allocates
//! one slot per column from the column's `ScanType` before reading the first
//! row, then reuses the same slots for every row of the query:
//!
//! ```text
//!   row 1 ──store──> [Int][Date][Text][Text][Text][Date] ──value()──> Row 1
//!   row 2 ──store──> [Int][Date][Text][Text][Text][Date] ──value()──> Row 2
//!                     └──── same slots, contents overwritten ────┘
//! ```
//!
//! Text and Blob cells keep their buffer between rows: storing a new string
//! clears and refills the existing `String` instead of allocating a new one.
//! `value()` copies the current contents out into an `OwnedValue`, so a row
//! never aliases slot storage.
//!
//! ## Conversions
//!
//! `store` accepts the value kinds a driver may plausibly deliver for the
//! slot's type and rejects everything else:
//!
//! | Slot | Accepts |
//! |------|---------|
//! | Bool | Bool, Int 0/1, Text `true`/`false`/`1`/`0` |
//! | Int | Int, Bool, Text holding an integer |
//! | Float | Float, Int, Text holding a number |
//! | Text | Text, UTF-8 Blob, Int/Float/Bool rendered as text |
//! | Blob | Blob, Text bytes |
//! | Date | Date, Text `YYYY-MM-DD` |
//! | Time | Time, Text `HH:MM:SS[.ffffff]` |
//! | Timestamp | Timestamp, Date (midnight), Text timestamp |
//! | Any | everything |
//!
//! NULL is accepted only by nullable slots.

use crate::parsing::{days_to_micros, parse_date, parse_time, parse_timestamp};
use crate::types::{ColumnType, OwnedValue, ScanType, Value};
use eyre::{bail, Result, WrapErr};
use std::fmt::Write;

#[derive(Debug)]
enum Cell {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
    Date(i32),
    Time(i64),
    Timestamp(i64),
    Any(OwnedValue),
}

impl Cell {
    fn zero(scan_type: ScanType, text_capacity: usize) -> Self {
        match scan_type {
            ScanType::Bool => Cell::Bool(false),
            ScanType::Int => Cell::Int(0),
            ScanType::Float => Cell::Float(0.0),
            ScanType::Text => Cell::Text(String::with_capacity(text_capacity)),
            ScanType::Blob => Cell::Blob(Vec::with_capacity(text_capacity)),
            ScanType::Date => Cell::Date(0),
            ScanType::Time => Cell::Time(0),
            ScanType::Timestamp => Cell::Timestamp(0),
            ScanType::Any => Cell::Any(OwnedValue::Null),
        }
    }
}

/// Reusable, uniquely-owned storage for one column's value.
#[derive(Debug)]
pub struct Slot {
    scan_type: ScanType,
    nullable: bool,
    null: bool,
    cell: Cell,
}

impl Slot {
    pub fn new(scan_type: ScanType, nullable: bool) -> Self {
        Self::with_capacity(scan_type, nullable, 0)
    }

    /// Creates a slot whose Text/Blob buffer starts with `text_capacity` bytes.
    pub fn with_capacity(scan_type: ScanType, nullable: bool, text_capacity: usize) -> Self {
        let capacity = if scan_type.is_variable() { text_capacity } else { 0 };
        Self {
            scan_type,
            nullable,
            null: true,
            cell: Cell::zero(scan_type, capacity),
        }
    }

    /// Allocates the slot described by `column`.
    ///
    /// Fails if the descriptor has no resolved scan type. Columns whose
    /// nullability is unknown get nullable slots.
    pub fn for_column(column: &ColumnType, text_capacity: usize) -> Result<Self> {
        let scan_type = column.resolve()?;
        let nullable = column.nullable().unwrap_or(true);
        Ok(Self::with_capacity(scan_type, nullable, text_capacity))
    }

    pub fn scan_type(&self) -> ScanType {
        self.scan_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_null(&self) -> bool {
        self.null
    }

    /// Overwrites the slot with `value`, converting it to the slot's type.
    pub fn store(&mut self, value: Value<'_>) -> Result<()> {
        if value.is_null() {
            if !self.nullable {
                bail!("cannot store NULL in non-nullable {} slot", self.scan_type);
            }
            self.null = true;
            return Ok(());
        }

        match (&mut self.cell, value) {
            (Cell::Any(v), value) => *v = OwnedValue::from(value),

            (Cell::Bool(b), Value::Bool(x)) => *b = x,
            (Cell::Bool(b), Value::Int(x)) => *b = int_to_bool(x)?,
            (Cell::Bool(b), Value::Text(s)) => *b = text_to_bool(s)?,

            (Cell::Int(i), Value::Int(x)) => *i = x,
            (Cell::Int(i), Value::Bool(x)) => *i = x as i64,
            (Cell::Int(i), Value::Text(s)) => {
                *i = s
                    .trim()
                    .parse()
                    .wrap_err_with(|| format!("cannot convert '{}' to INT", s))?
            }

            (Cell::Float(f), Value::Float(x)) => *f = x,
            (Cell::Float(f), Value::Int(x)) => *f = x as f64,
            (Cell::Float(f), Value::Text(s)) => {
                *f = s
                    .trim()
                    .parse()
                    .wrap_err_with(|| format!("cannot convert '{}' to FLOAT", s))?
            }

            (Cell::Text(buf), Value::Text(s)) => {
                buf.clear();
                buf.push_str(s);
            }
            (Cell::Text(buf), Value::Blob(b)) => {
                let s = std::str::from_utf8(b).wrap_err("BLOB value is not valid UTF-8 text")?;
                buf.clear();
                buf.push_str(s);
            }
            (Cell::Text(buf), Value::Int(x)) => {
                buf.clear();
                write!(buf, "{}", x)?;
            }
            (Cell::Text(buf), Value::Float(x)) => {
                buf.clear();
                write!(buf, "{}", x)?;
            }
            (Cell::Text(buf), Value::Bool(x)) => {
                buf.clear();
                buf.push_str(if x { "true" } else { "false" });
            }

            (Cell::Blob(buf), Value::Blob(b)) => {
                buf.clear();
                buf.extend_from_slice(b);
            }
            (Cell::Blob(buf), Value::Text(s)) => {
                buf.clear();
                buf.extend_from_slice(s.as_bytes());
            }

            (Cell::Date(d), Value::Date(x)) => *d = x,
            (Cell::Date(d), Value::Text(s)) => *d = parse_date(s)?,

            (Cell::Time(t), Value::Time(x)) => *t = x,
            (Cell::Time(t), Value::Text(s)) => *t = parse_time(s)?,

            (Cell::Timestamp(ts), Value::Timestamp(x)) => *ts = x,
            (Cell::Timestamp(ts), Value::Date(x)) => match days_to_micros(x) {
                Some(micros) => *ts = micros,
                None => bail!("timestamp out of range: DATE {} days since epoch", x),
            },
            (Cell::Timestamp(ts), Value::Text(s)) => *ts = parse_timestamp(s)?,

            (_, value) => bail!(
                "cannot store {} value in {} slot",
                value.kind(),
                self.scan_type
            ),
        }

        self.null = false;
        Ok(())
    }

    /// Borrows the current contents without copying.
    pub fn as_value(&self) -> Value<'_> {
        if self.null {
            return Value::Null;
        }
        match &self.cell {
            Cell::Bool(b) => Value::Bool(*b),
            Cell::Int(i) => Value::Int(*i),
            Cell::Float(f) => Value::Float(*f),
            Cell::Text(s) => Value::Text(s),
            Cell::Blob(b) => Value::Blob(b),
            Cell::Date(d) => Value::Date(*d),
            Cell::Time(t) => Value::Time(*t),
            Cell::Timestamp(ts) => Value::Timestamp(*ts),
            Cell::Any(v) => v.to_value(),
        }
    }

    /// Copies the current contents out of the slot.
    pub fn value(&self) -> OwnedValue {
        if self.null {
            return OwnedValue::Null;
        }
        match &self.cell {
            Cell::Any(v) => v.clone(),
            _ => OwnedValue::from(self.as_value()),
        }
    }
}

fn int_to_bool(x: i64) -> Result<bool> {
    match x {
        0 => Ok(false),
        1 => Ok(true),
        _ => bail!("cannot convert {} to BOOL: expected 0 or 1", x),
    }
}

fn text_to_bool(s: &str) -> Result<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") || s == "1" {
        Ok(true)
    } else if s.eq_ignore_ascii_case("false") || s == "0" {
        Ok(false)
    } else {
        bail!("cannot convert '{}' to BOOL", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{days_from_civil, MICROS_PER_DAY};

    fn text_buffer(slot: &Slot) -> (*const u8, usize) {
        match &slot.cell {
            Cell::Text(s) => (s.as_ptr(), s.capacity()),
            other => panic!("expected text cell, got {:?}", other),
        }
    }

    #[test]
    fn test_new_slot_reads_as_null() {
        let slot = Slot::new(ScanType::Int, false);
        assert!(slot.is_null());
        assert_eq!(slot.value(), OwnedValue::Null);
    }

    #[test]
    fn test_store_overwrites_previous_value() {
        let mut slot = Slot::new(ScanType::Int, false);
        slot.store(Value::Int(10001)).unwrap();
        assert_eq!(slot.value(), OwnedValue::Int(10001));
        slot.store(Value::Int(10002)).unwrap();
        assert_eq!(slot.value(), OwnedValue::Int(10002));
    }

    #[test]
    fn test_text_buffer_is_reused() {
        let mut slot = Slot::with_capacity(ScanType::Text, false, 32);
        slot.store(Value::Text("Georgi")).unwrap();
        let (ptr, cap) = text_buffer(&slot);
        slot.store(Value::Text("Bezalel")).unwrap();
        assert_eq!(text_buffer(&slot), (ptr, cap));
        assert_eq!(slot.value(), OwnedValue::Text("Bezalel".into()));
    }

    #[test]
    fn test_copy_out_does_not_alias_slot() {
        let mut slot = Slot::new(ScanType::Text, false);
        slot.store(Value::Text("Facello")).unwrap();
        let first = slot.value();
        slot.store(Value::Text("Simmel")).unwrap();
        assert_eq!(first, OwnedValue::Text("Facello".into()));
    }

    #[test]
    fn test_null_rejected_by_non_nullable_slot() {
        let mut slot = Slot::new(ScanType::Int, false);
        let err = slot.store(Value::Null).unwrap_err();
        assert!(err.to_string().contains("NULL"), "{}", err);
    }

    #[test]
    fn test_null_after_value_reads_as_null() {
        let mut slot = Slot::new(ScanType::Text, true);
        slot.store(Value::Text("x")).unwrap();
        slot.store(Value::Null).unwrap();
        assert_eq!(slot.value(), OwnedValue::Null);
        slot.store(Value::Text("y")).unwrap();
        assert_eq!(slot.value(), OwnedValue::Text("y".into()));
    }

    #[test]
    fn test_bool_conversions() {
        let mut slot = Slot::new(ScanType::Bool, false);
        slot.store(Value::Int(1)).unwrap();
        assert_eq!(slot.value(), OwnedValue::Bool(true));
        slot.store(Value::Text("false")).unwrap();
        assert_eq!(slot.value(), OwnedValue::Bool(false));
        assert!(slot.store(Value::Int(2)).is_err());
        assert!(slot.store(Value::Float(1.0)).is_err());
    }

    #[test]
    fn test_numeric_conversions() {
        let mut int_slot = Slot::new(ScanType::Int, false);
        int_slot.store(Value::Text(" 42 ")).unwrap();
        assert_eq!(int_slot.value(), OwnedValue::Int(42));
        assert!(int_slot.store(Value::Text("abc")).is_err());
        assert!(int_slot.store(Value::Float(1.5)).is_err());

        let mut float_slot = Slot::new(ScanType::Float, false);
        float_slot.store(Value::Int(3)).unwrap();
        assert_eq!(float_slot.value(), OwnedValue::Float(3.0));
        float_slot.store(Value::Text("2.5")).unwrap();
        assert_eq!(float_slot.value(), OwnedValue::Float(2.5));
    }

    #[test]
    fn test_text_conversions() {
        let mut slot = Slot::new(ScanType::Text, false);
        slot.store(Value::Int(7)).unwrap();
        assert_eq!(slot.value(), OwnedValue::Text("7".into()));
        slot.store(Value::Blob(b"bytes")).unwrap();
        assert_eq!(slot.value(), OwnedValue::Text("bytes".into()));
        assert!(slot.store(Value::Blob(&[0xff, 0xfe])).is_err());
        assert!(slot.store(Value::Date(0)).is_err());
    }

    #[test]
    fn test_blob_accepts_text_bytes() {
        let mut slot = Slot::new(ScanType::Blob, false);
        slot.store(Value::Text("ab")).unwrap();
        assert_eq!(slot.value(), OwnedValue::Blob(b"ab".to_vec()));
        assert!(slot.store(Value::Int(1)).is_err());
    }

    #[test]
    fn test_temporal_conversions() {
        let mut date = Slot::new(ScanType::Date, false);
        date.store(Value::Text("1986-06-26")).unwrap();
        assert_eq!(date.value(), OwnedValue::Date(days_from_civil(1986, 6, 26) as i32));
        assert!(date.store(Value::Text("26/06/1986")).is_err());
        assert!(date.store(Value::Int(5)).is_err());

        let mut ts = Slot::new(ScanType::Timestamp, false);
        ts.store(Value::Date(1)).unwrap();
        assert_eq!(ts.value(), OwnedValue::Timestamp(MICROS_PER_DAY));
        ts.store(Value::Text("1970-01-01 00:00:01")).unwrap();
        assert_eq!(ts.value(), OwnedValue::Timestamp(1_000_000));

        let mut time = Slot::new(ScanType::Time, false);
        time.store(Value::Text("00:01:00")).unwrap();
        assert_eq!(time.value(), OwnedValue::Time(60_000_000));
    }

    #[test]
    fn test_timestamp_out_of_range_is_error() {
        let mut ts = Slot::new(ScanType::Timestamp, false);
        ts.store(Value::Text("1986-06-26 00:00:00")).unwrap();

        let err = ts.store(Value::Text("300000-01-01 00:00:00")).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{}", err);
        let err = ts.store(Value::Date(i32::MAX)).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{}", err);
        assert!(ts.store(Value::Date(i32::MIN)).is_err());

        assert_eq!(ts.value().to_string(), "1986-06-26 00:00:00");
    }

    #[test]
    fn test_date_beyond_day_range_is_error() {
        let mut date = Slot::new(ScanType::Date, false);
        let err = date.store(Value::Text("9999999-01-01")).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{}", err);
    }

    #[test]
    fn test_any_slot_keeps_driver_value() {
        let mut slot = Slot::new(ScanType::Any, true);
        slot.store(Value::Float(1.5)).unwrap();
        assert_eq!(slot.value(), OwnedValue::Float(1.5));
        slot.store(Value::Text("mixed")).unwrap();
        assert_eq!(slot.value(), OwnedValue::Text("mixed".into()));
        assert_eq!(slot.as_value(), Value::Text("mixed"));
    }

    #[test]
    fn test_for_column_uses_descriptor() {
        let col = ColumnType::new("gender", ScanType::Text).with_nullable(false);
        let slot = Slot::for_column(&col, 8).unwrap();
        assert_eq!(slot.scan_type(), ScanType::Text);
        assert!(!slot.is_nullable());

        let unknown = ColumnType::from_declared("g", Some("GEOMETRY"));
        assert!(Slot::for_column(&unknown, 8).is_err());
        let untyped = ColumnType::from_declared("n", None);
        assert!(Slot::for_column(&untyped, 8).unwrap().is_nullable());
    }
}
