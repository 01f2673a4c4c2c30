use std::sync::Arc;

use crate::error::SqlNullableError;
use crate::results::ResultSet;
use crate::value::DriverValue;

/// Extracts a `DriverValue` from a `tokio_postgres` Row at the given index.
///
/// # Errors
/// Returns `SqlNullableError::PostgresError` if the column type is not one of
/// the supported ones or the value cannot be decoded.
pub fn postgres_extract_value(
    row: &tokio_postgres::Row,
    idx: usize,
) -> Result<DriverValue, SqlNullableError> {
    Ok(row.try_get::<_, DriverValue>(idx)?)
}

/// Build a result set from raw Postgres rows
///
/// # Errors
/// Returns errors from row value extraction.
pub fn build_result_set_from_rows(
    rows: &[tokio_postgres::Row],
) -> Result<ResultSet, SqlNullableError> {
    let mut result_set = ResultSet::with_capacity(rows.len());
    if let Some(row) = rows.first() {
        let cols: Vec<String> = row.columns().iter().map(|c| c.name().to_string()).collect();
        result_set.set_column_names(Arc::new(cols));
    }

    for row in rows {
        let col_count = row.columns().len();
        let mut values = Vec::with_capacity(col_count);
        for idx in 0..col_count {
            values.push(postgres_extract_value(row, idx)?);
        }
        result_set.add_row_values(values);
    }

    tracing::debug!(rows = result_set.len(), "built postgres result set");
    Ok(result_set)
}
