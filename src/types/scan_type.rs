//! # Scan Types
//!
//! A `ScanType` names the native representation a slot holds for one column.
//! It is the runtime type handle the materializer uses to allocate a
//! correctly-typed cell before any row is read.
//!
//! ## Representations
//!
//! | ScanType | Cell | Typical declared types |
//! |----------|------|------------------------|
//! | Bool | `bool` | BOOL, BOOLEAN |
//! | Int | `i64` | INT, INTEGER, BIGINT, SMALLINT |
//! | Float | `f64` | REAL, DOUBLE, FLOAT, NUMERIC, DECIMAL |
//! | Text | `String` | TEXT, VARCHAR(n), CHAR(n), ENUM, JSON |
//! | Blob | `Vec<u8>` | BLOB, BYTEA, VARBINARY |
//! | Date | `i32` days | DATE |
//! | Time | `i64` micros | TIME |
//! | Timestamp | `i64` micros | DATETIME, TIMESTAMP |
//! | Any | `OwnedValue` | no declared type (expression columns) |
//!
//! ## Declared Type Resolution
//!
//! `ScanType::from_declared` matches the base type name (everything before
//! the first `(`, case-insensitive, whitespace collapsed) against a fixed
//! list. Unknown names resolve to `None`; the caller decides whether that is
//! fatal. An empty declared type resolves to `Any`.
//!
//! ```ignore
//! use rowscan::types::ScanType;
//!
//! assert_eq!(ScanType::from_declared("VARCHAR(14)"), Some(ScanType::Text));
//! assert_eq!(ScanType::from_declared("bigint unsigned"), Some(ScanType::Int));
//! assert_eq!(ScanType::from_declared("GEOMETRY"), None);
//! ```

use std::fmt;

/// Native representation of a slot.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanType {
    Bool = 0,
    Int = 1,
    Float = 2,
    Date = 3,
    Time = 4,
    Timestamp = 5,

    Text = 20,
    Blob = 21,

    Any = 50,
}

impl ScanType {
    /// Resolves a SQL declared type name to a scan type.
    pub fn from_declared(declared: &str) -> Option<ScanType> {
        let base = declared.split('(').next().unwrap_or("");
        let normalized = base
            .split_whitespace()
            .map(|word| word.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join(" ");

        let scan_type = match normalized.as_str() {
            "" => ScanType::Any,
            "BOOL" | "BOOLEAN" => ScanType::Bool,
            "INT" | "INTEGER" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "BIGINT" | "INT2"
            | "INT4" | "INT8" | "UNSIGNED BIG INT" | "SERIAL" | "BIGSERIAL" => ScanType::Int,
            "REAL" | "DOUBLE" | "DOUBLE PRECISION" | "FLOAT" | "FLOAT4" | "FLOAT8"
            | "NUMERIC" | "DECIMAL" => ScanType::Float,
            "TEXT" | "CHAR" | "CHARACTER" | "VARCHAR" | "VARYING CHARACTER" | "NCHAR"
            | "NATIVE CHARACTER" | "NVARCHAR" | "CLOB" | "STRING" | "ENUM" | "JSON"
            | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" => ScanType::Text,
            "BLOB" | "BYTEA" | "BINARY" | "VARBINARY" | "TINYBLOB" | "MEDIUMBLOB"
            | "LONGBLOB" => ScanType::Blob,
            "DATE" => ScanType::Date,
            "TIME" => ScanType::Time,
            "DATETIME" | "TIMESTAMP" => ScanType::Timestamp,
            other => return Self::from_unsigned(other),
        };
        Some(scan_type)
    }

    // MySQL spells unsigned integers as a suffix: "INT UNSIGNED", "BIGINT UNSIGNED".
    fn from_unsigned(normalized: &str) -> Option<ScanType> {
        let base = normalized.strip_suffix(" UNSIGNED")?;
        match Self::from_declared(base)? {
            ScanType::Int => Some(ScanType::Int),
            ScanType::Float => Some(ScanType::Float),
            _ => None,
        }
    }

    /// Returns true for types whose slot owns a pre-sized growable buffer.
    ///
    /// `Any` slots hold an `OwnedValue` and allocate per stored value.
    pub fn is_variable(&self) -> bool {
        matches!(self, ScanType::Text | ScanType::Blob)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScanType::Bool => "BOOL",
            ScanType::Int => "INT",
            ScanType::Float => "FLOAT",
            ScanType::Date => "DATE",
            ScanType::Time => "TIME",
            ScanType::Timestamp => "TIMESTAMP",
            ScanType::Text => "TEXT",
            ScanType::Blob => "BLOB",
            ScanType::Any => "ANY",
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
