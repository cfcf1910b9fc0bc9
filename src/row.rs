//! # Materialized Rows
//!
//! `Row` is an owned snapshot of one cursor row: a fixed-length vector of
//! `OwnedValue`, one per column, in column order. `ResultSet` is the ordered
//! collection of rows produced by one successful materialization, together
//! with the column descriptors of that execution.
//!
//! Values are addressed by position only.

use crate::types::{ColumnType, OwnedValue};
use eyre::{bail, Result};
use std::ops::Index;

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<OwnedValue>,
}

impl Row {
    pub fn new(values: Vec<OwnedValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&OwnedValue> {
        self.values.get(index)
    }

    pub fn get_int(&self, index: usize) -> Result<i64> {
        match self.get(index) {
            Some(OwnedValue::Int(i)) => Ok(*i),
            Some(other) => bail!("expected INT, got {:?}", other),
            None => bail!("column {} out of bounds", index),
        }
    }

    pub fn get_float(&self, index: usize) -> Result<f64> {
        match self.get(index) {
            Some(OwnedValue::Float(f)) => Ok(*f),
            Some(other) => bail!("expected FLOAT, got {:?}", other),
            None => bail!("column {} out of bounds", index),
        }
    }

    pub fn get_bool(&self, index: usize) -> Result<bool> {
        match self.get(index) {
            Some(OwnedValue::Bool(b)) => Ok(*b),
            Some(other) => bail!("expected BOOL, got {:?}", other),
            None => bail!("column {} out of bounds", index),
        }
    }

    pub fn get_text(&self, index: usize) -> Result<&str> {
        match self.get(index) {
            Some(OwnedValue::Text(s)) => Ok(s),
            Some(other) => bail!("expected TEXT, got {:?}", other),
            None => bail!("column {} out of bounds", index),
        }
    }

    pub fn get_blob(&self, index: usize) -> Result<&[u8]> {
        match self.get(index) {
            Some(OwnedValue::Blob(b)) => Ok(b),
            Some(other) => bail!("expected BLOB, got {:?}", other),
            None => bail!("column {} out of bounds", index),
        }
    }

    /// Returns the date as days since 1970-01-01.
    pub fn get_date(&self, index: usize) -> Result<i32> {
        match self.get(index) {
            Some(OwnedValue::Date(d)) => Ok(*d),
            Some(other) => bail!("expected DATE, got {:?}", other),
            None => bail!("column {} out of bounds", index),
        }
    }

    pub fn is_null(&self, index: usize) -> bool {
        matches!(self.get(index), Some(OwnedValue::Null))
    }

    pub fn column_count(&self) -> usize {
        self.values.len()
    }
}

impl Index<usize> for Row {
    type Output = OwnedValue;

    fn index(&self, index: usize) -> &OwnedValue {
        &self.values[index]
    }
}

/// Rows of one query execution, in cursor delivery order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    columns: Vec<ColumnType>,
    rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(columns: Vec<ColumnType>) -> Self {
        Self::with_capacity(columns, 0)
    }

    pub fn with_capacity(columns: Vec<ColumnType>, capacity: usize) -> Self {
        Self {
            columns,
            rows: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, row: Row) {
        debug_assert_eq!(row.column_count(), self.columns.len());
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[ColumnType] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Plain values, one `Vec` per row.
    pub fn into_values(self) -> Vec<Vec<OwnedValue>> {
        self.rows.into_iter().map(|row| row.values).collect()
    }
}

impl Index<usize> for ResultSet {
    type Output = Row;

    fn index(&self, index: usize) -> &Row {
        &self.rows[index]
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScanType;

    #[test]
    fn test_results_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Row>();
        assert_send_sync::<ResultSet>();
        assert_send_sync::<OwnedValue>();
        assert_send_sync::<ColumnType>();
    }

    fn sample_row() -> Row {
        Row::new(vec![
            OwnedValue::Int(10001),
            OwnedValue::Text("Georgi".into()),
            OwnedValue::Null,
            OwnedValue::Date(-5965),
        ])
    }

    #[test]
    fn test_typed_accessors() {
        let row = sample_row();
        assert_eq!(row.get_int(0).unwrap(), 10001);
        assert_eq!(row.get_text(1).unwrap(), "Georgi");
        assert!(row.is_null(2));
        assert_eq!(row.get_date(3).unwrap(), -5965);
        assert_eq!(row.column_count(), 4);
    }

    #[test]
    fn test_accessor_type_mismatch() {
        let row = sample_row();
        assert!(row.get_int(1).is_err());
        assert!(row.get_text(0).is_err());
        let err = row.get_int(9).unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_result_set_order_and_iteration() {
        let columns = vec![ColumnType::new("n", ScanType::Int)];
        let mut rs = ResultSet::new(columns);
        for i in 0..3 {
            rs.push(Row::new(vec![OwnedValue::Int(i)]));
        }
        assert_eq!(rs.len(), 3);
        assert_eq!(rs.column_count(), 1);
        let seen: Vec<i64> = rs.iter().map(|r| r.get_int(0).unwrap()).collect();
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(rs[2][0], OwnedValue::Int(2));
        assert_eq!(rs.into_values(), vec![
            vec![OwnedValue::Int(0)],
            vec![OwnedValue::Int(1)],
            vec![OwnedValue::Int(2)],
        ]);
    }

    #[test]
    fn test_empty_result_set() {
        let rs = ResultSet::new(Vec::new());
        assert!(rs.is_empty());
        assert_eq!(rs.len(), 0);
        assert!(rs.get(0).is_none());
    }
}
