//! # Column Type Descriptors
//!
//! A `ColumnType` is the per-column metadata a cursor reports before any row
//! is read. The materializer only needs the resolved `ScanType`; the name,
//! declared type and nullability travel along so error messages and the
//! returned `ResultSet` can describe the columns.
//!
//! A descriptor built from a declared type the resolver does not recognize
//! keeps `scan_type == None`. `resolve()` turns that into an error so the
//! materializer never allocates a slot list of the wrong width.

use super::ScanType;
use eyre::{eyre, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnType {
    name: String,
    database_type_name: Option<String>,
    nullable: Option<bool>,
    scan_type: Option<ScanType>,
}

impl ColumnType {
    /// Creates a resolved, nullable-unknown descriptor.
    pub fn new(name: impl Into<String>, scan_type: ScanType) -> Self {
        Self {
            name: name.into(),
            database_type_name: None,
            nullable: None,
            scan_type: Some(scan_type),
        }
    }

    /// Creates a descriptor from a driver-reported declared type.
    ///
    /// `None` means the driver reported no declared type and resolves to
    /// `ScanType::Any`. Unrecognized names leave the descriptor unresolved.
    pub fn from_declared(name: impl Into<String>, declared: Option<&str>) -> Self {
        Self {
            name: name.into(),
            database_type_name: declared.map(str::to_string),
            nullable: None,
            scan_type: ScanType::from_declared(declared.unwrap_or("")),
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    pub fn with_database_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.database_type_name = Some(type_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn database_type_name(&self) -> Option<&str> {
        self.database_type_name.as_deref()
    }

    /// Whether the column may hold NULL; `None` when the driver cannot tell.
    pub fn nullable(&self) -> Option<bool> {
        self.nullable
    }

    pub fn scan_type(&self) -> Option<ScanType> {
        self.scan_type
    }

    /// Returns the scan type, or an error naming the column if unresolved.
    pub fn resolve(&self) -> Result<ScanType> {
        self.scan_type.ok_or_else(|| {
            eyre!(
                "cannot resolve scan type for column '{}' (declared type: {})",
                self.name,
                self.database_type_name.as_deref().unwrap_or("<none>")
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_declared_resolves_known_type() {
        let col = ColumnType::from_declared("first_name", Some("VARCHAR(14)"));
        assert_eq!(col.scan_type(), Some(ScanType::Text));
        assert_eq!(col.database_type_name(), Some("VARCHAR(14)"));
        assert_eq!(col.nullable(), None);
    }

    #[test]
    fn test_missing_declared_type_is_any() {
        let col = ColumnType::from_declared("count(*)", None);
        assert_eq!(col.resolve().unwrap(), ScanType::Any);
    }

    #[test]
    fn test_unresolved_descriptor_error_names_column() {
        let col = ColumnType::from_declared("location", Some("GEOMETRY"));
        let err = col.resolve().unwrap_err().to_string();
        assert!(err.contains("location"), "{}", err);
        assert!(err.contains("GEOMETRY"), "{}", err);
    }

    #[test]
    fn test_with_nullable() {
        let col = ColumnType::new("emp_no", ScanType::Int).with_nullable(false);
        assert_eq!(col.nullable(), Some(false));
    }
}
