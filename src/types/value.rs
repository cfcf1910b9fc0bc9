//! # Borrowed Value Representation
//!
//! `Value<'a>` is what a cursor hands to a slot: a tagged union whose
//! variable-length variants borrow straight from the driver's row buffer.
//! The slot copies the bytes into its own cell, so nothing borrowed here
//! outlives the current cursor row.
//!
//! ## Variants
//!
//! - **Null**: SQL NULL
//! - **Bool / Int / Float**: inline scalars
//! - **Text / Blob**: borrowed `&str` / `&[u8]`
//! - **Date**: days since 1970-01-01
//! - **Time**: microseconds since midnight
//! - **Timestamp**: microseconds since 1970-01-01 00:00:00
//!
//! ## Memory Layout
//!
//! ```text
//! Value enum (24 bytes on 64-bit):
//! +----------------+
//! | discriminant   |
//! +----------------+
//! | data: 16       |  (i64, f64, or pointer + len)
//! +----------------+
//! ```

use super::OwnedValue;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(&'a str),
    Blob(&'a [u8]),
    Date(i32),
    Time(i64),
    Timestamp(i64),
}

impl<'a> Value<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type label used in conversion error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOL",
            Value::Int(_) => "INT",
            Value::Float(_) => "FLOAT",
            Value::Text(_) => "TEXT",
            Value::Blob(_) => "BLOB",
            Value::Date(_) => "DATE",
            Value::Time(_) => "TIME",
            Value::Timestamp(_) => "TIMESTAMP",
        }
    }

    pub fn to_owned_value(&self) -> OwnedValue {
        OwnedValue::from(self)
    }
}

impl From<i64> for Value<'_> {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value<'_> {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::Text(v)
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(v: &'a [u8]) -> Self {
        Value::Blob(v)
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_none_is_null() {
        let v: Value<'_> = Option::<i64>::None.into();
        assert!(v.is_null());
        let v: Value<'_> = Some("x").into();
        assert_eq!(v, Value::Text("x"));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(Value::Int(1).kind(), "INT");
        assert_eq!(Value::Blob(b"x").kind(), "BLOB");
        assert_eq!(Value::Null.kind(), "NULL");
    }
}
