use std::collections::HashMap;
use std::sync::Arc;

use super::from_row::FromRow;
use super::row::{Row, index_columns};
use crate::error::SqlNullableError;
use crate::value::DriverValue;

/// A result set from a database query
///
/// Rows share a single column list and name index.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    rows: Vec<Row>,
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
}

impl ResultSet {
    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            rows: Vec::with_capacity(capacity),
            ..ResultSet::default()
        }
    }

    /// Set the column names for this result set (to be shared by all rows)
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = index_columns(&column_names);
        self.column_names = column_names;
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Add a row to the result set
    pub fn add_row_values(&mut self, values: Vec<DriverValue>) {
        self.rows.push(Row::with_index(
            self.column_names.clone(),
            self.column_index.clone(),
            values,
        ));
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Map the first row, like a single-row lookup.
    ///
    /// # Errors
    ///
    /// Returns `SqlNullableError::NoRows` for an empty result set, or the
    /// error produced while mapping the row.
    pub fn first<T: FromRow>(&self) -> Result<T, SqlNullableError> {
        let row = self.rows.first().ok_or(SqlNullableError::NoRows)?;
        T::from_row(row)
    }

    /// Map every row, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error produced while mapping a row.
    pub fn map_rows<T: FromRow>(&self) -> Result<Vec<T>, SqlNullableError> {
        self.rows.iter().map(T::from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nullable::Nullable;

    fn students() -> ResultSet {
        let mut rs = ResultSet::with_capacity(2);
        rs.set_column_names(Arc::new(vec!["first_name".into(), "age".into()]));
        rs.add_row_values(vec![DriverValue::Text("Bob".into()), DriverValue::Int(19)]);
        rs.add_row_values(vec![DriverValue::Text("Ann".into()), DriverValue::Null]);
        rs
    }

    #[test]
    fn rows_share_column_lookup() {
        let rs = students();
        assert_eq!(rs.len(), 2);
        assert_eq!(rs.rows()[1].get("first_name"), Some(&DriverValue::Text("Ann".into())));
        assert_eq!(rs.column_names(), ["first_name", "age"]);
    }

    #[test]
    fn map_rows_through_tuples() {
        let all: Vec<(String, Nullable<u32>)> = students().map_rows().unwrap();
        assert_eq!(
            all,
            vec![
                ("Bob".to_string(), Nullable::Present(19)),
                ("Ann".to_string(), Nullable::Absent),
            ]
        );
    }

    #[test]
    fn empty_result_is_no_rows() {
        let mut rs = ResultSet::with_capacity(0);
        rs.set_column_names(Arc::new(vec!["id".into()]));
        assert!(rs.is_empty());
        assert!(matches!(rs.first::<(i64,)>(), Err(SqlNullableError::NoRows)));
        assert!(rs.map_rows::<(i64,)>().unwrap().is_empty());
    }
}
