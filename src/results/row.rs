use std::collections::HashMap;
use std::sync::Arc;

use crate::adapter::Scannable;
use crate::error::SqlNullableError;
use crate::value::DriverValue;

/// A row from a database query result
///
/// This struct represents a single row from a database query result,
/// with access to both the column names and the values.
#[derive(Debug, Clone)]
pub struct Row {
    /// The column names for this row (shared across all rows in a result set)
    column_names: Arc<Vec<String>>,
    /// The values for this row
    values: Vec<DriverValue>,
    // Shared name -> index map so lookups skip repeated string comparisons
    column_index: Arc<HashMap<String, usize>>,
}

pub(crate) fn index_columns(column_names: &[String]) -> Arc<HashMap<String, usize>> {
    // First occurrence wins for duplicated names, like a positional scan would.
    let mut index = HashMap::with_capacity(column_names.len());
    for (i, name) in column_names.iter().enumerate() {
        index.entry(name.clone()).or_insert(i);
    }
    Arc::new(index)
}

impl Row {
    /// Create a new database row
    ///
    /// # Arguments
    ///
    /// * `column_names` - The column names
    /// * `values` - The values for this row
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<DriverValue>) -> Self {
        let column_index = index_columns(&column_names);
        Self {
            column_names,
            values,
            column_index,
        }
    }

    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        column_index: Arc<HashMap<String, usize>>,
        values: Vec<DriverValue>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index,
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn values(&self) -> &[DriverValue] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index.get(column_name).copied()
    }

    /// Get a raw value from the row by column name
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&DriverValue> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a raw value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&DriverValue> {
        self.values.get(index)
    }

    /// Scan the named column into `T`.
    ///
    /// # Errors
    ///
    /// Returns `SqlNullableError::ColumnNotFound` for an unknown column, or
    /// `SqlNullableError::Conversion` if the value does not map onto `T`.
    pub fn try_get<T: Scannable>(&self, column_name: &str) -> Result<T, SqlNullableError> {
        let value = self
            .get(column_name)
            .ok_or_else(|| SqlNullableError::ColumnNotFound(column_name.to_string()))?;
        T::scan(value).map_err(|err| {
            tracing::debug!(column = column_name, error = %err, "column conversion failed");
            SqlNullableError::conversion(column_name, err)
        })
    }

    /// Scan the column at `index` into `T`.
    ///
    /// # Errors
    ///
    /// Returns `SqlNullableError::ColumnIndexOutOfRange` past the last column,
    /// or `SqlNullableError::Conversion` if the value does not map onto `T`.
    pub fn try_get_by_index<T: Scannable>(&self, index: usize) -> Result<T, SqlNullableError> {
        let value = self
            .get_by_index(index)
            .ok_or(SqlNullableError::ColumnIndexOutOfRange(index))?;
        T::scan(value).map_err(|err| {
            let column = self
                .column_names
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("#{index}"));
            tracing::debug!(column = %column, error = %err, "column conversion failed");
            SqlNullableError::conversion(column, err)
        })
    }
}
