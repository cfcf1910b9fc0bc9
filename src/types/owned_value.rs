//! # Heap-Owned Value Representation
//!
//! `OwnedValue` is the element type of a materialized `Row`. Unlike
//! `Value<'a>`, it owns all of its data, so rows stay valid after the cursor
//! advances, is closed, or the connection goes away.
//!
//! ## Conversion
//!
//! ```ignore
//! // Value -> OwnedValue (always works, may allocate)
//! let owned: OwnedValue = (&value).into();
//!
//! // OwnedValue -> Value (borrows from owned)
//! let borrowed: Value<'_> = owned.to_value();
//! ```
//!
//! ## Display
//!
//! `Display` renders values the way a SQL shell would: `NULL`, ISO 8601
//! dates and times, `\x`-prefixed hex for blobs.

use super::{ScanType, Value};
use crate::parsing::{format_date, format_time, format_timestamp};
use std::fmt;

/// Fully-owned SQL value held by a materialized row.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
    Date(i32),
    Time(i64),
    Timestamp(i64),
}

impl<'a> From<&Value<'a>> for OwnedValue {
    fn from(v: &Value<'a>) -> Self {
        match v {
            Value::Null => OwnedValue::Null,
            Value::Bool(b) => OwnedValue::Bool(*b),
            Value::Int(i) => OwnedValue::Int(*i),
            Value::Float(f) => OwnedValue::Float(*f),
            Value::Text(s) => OwnedValue::Text(s.to_string()),
            Value::Blob(b) => OwnedValue::Blob(b.to_vec()),
            Value::Date(d) => OwnedValue::Date(*d),
            Value::Time(t) => OwnedValue::Time(*t),
            Value::Timestamp(ts) => OwnedValue::Timestamp(*ts),
        }
    }
}

impl<'a> From<Value<'a>> for OwnedValue {
    fn from(v: Value<'a>) -> Self {
        OwnedValue::from(&v)
    }
}

impl From<i64> for OwnedValue {
    fn from(v: i64) -> Self {
        OwnedValue::Int(v)
    }
}

impl From<f64> for OwnedValue {
    fn from(v: f64) -> Self {
        OwnedValue::Float(v)
    }
}

impl From<bool> for OwnedValue {
    fn from(v: bool) -> Self {
        OwnedValue::Bool(v)
    }
}

impl From<&str> for OwnedValue {
    fn from(v: &str) -> Self {
        OwnedValue::Text(v.to_string())
    }
}

impl From<String> for OwnedValue {
    fn from(v: String) -> Self {
        OwnedValue::Text(v)
    }
}

impl From<Vec<u8>> for OwnedValue {
    fn from(v: Vec<u8>) -> Self {
        OwnedValue::Blob(v)
    }
}

impl OwnedValue {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, OwnedValue::Null)
    }

    /// Converts to a borrowed Value.
    pub fn to_value(&self) -> Value<'_> {
        match self {
            OwnedValue::Null => Value::Null,
            OwnedValue::Bool(b) => Value::Bool(*b),
            OwnedValue::Int(i) => Value::Int(*i),
            OwnedValue::Float(f) => Value::Float(*f),
            OwnedValue::Text(s) => Value::Text(s.as_str()),
            OwnedValue::Blob(b) => Value::Blob(b.as_slice()),
            OwnedValue::Date(d) => Value::Date(*d),
            OwnedValue::Time(t) => Value::Time(*t),
            OwnedValue::Timestamp(ts) => Value::Timestamp(*ts),
        }
    }

    /// Returns the scan type that natively holds this value, or None for NULL.
    pub fn scan_type(&self) -> Option<ScanType> {
        match self {
            OwnedValue::Null => None,
            OwnedValue::Bool(_) => Some(ScanType::Bool),
            OwnedValue::Int(_) => Some(ScanType::Int),
            OwnedValue::Float(_) => Some(ScanType::Float),
            OwnedValue::Text(_) => Some(ScanType::Text),
            OwnedValue::Blob(_) => Some(ScanType::Blob),
            OwnedValue::Date(_) => Some(ScanType::Date),
            OwnedValue::Time(_) => Some(ScanType::Time),
            OwnedValue::Timestamp(_) => Some(ScanType::Timestamp),
        }
    }
}

impl fmt::Display for OwnedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnedValue::Null => f.write_str("NULL"),
            OwnedValue::Bool(b) => write!(f, "{}", b),
            OwnedValue::Int(i) => write!(f, "{}", i),
            OwnedValue::Float(v) => write!(f, "{}", v),
            OwnedValue::Text(s) => f.write_str(s),
            OwnedValue::Blob(b) => {
                f.write_str("\\x")?;
                b.iter().try_for_each(|byte| write!(f, "{:02x}", byte))
            }
            OwnedValue::Date(d) => f.write_str(&format_date(*d)),
            OwnedValue::Time(t) => f.write_str(&format_time(*t)),
            OwnedValue::Timestamp(ts) => f.write_str(&format_timestamp(*ts)),
        }
    }
}
