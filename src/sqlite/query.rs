use std::sync::Arc;

use rusqlite::{Connection, Statement};

use crate::error::SqlNullableError;
use crate::named::{NamedParams, NamedQuery, PlaceholderStyle};
use crate::results::ResultSet;
use crate::value::DriverValue;

/// Build a result set from a `SQLite` query
///
/// # Errors
/// Returns `SqlNullableError::SqliteError` if query execution or value
/// extraction fails.
pub fn build_result_set(
    stmt: &mut Statement<'_>,
    params: &[DriverValue],
) -> Result<ResultSet, SqlNullableError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let column_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(Arc::new(column_names));

    let mut rows = stmt.query(rusqlite::params_from_iter(params.iter()))?;
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            values.push(row.get::<_, DriverValue>(idx)?);
        }
        result_set.add_row_values(values);
    }

    tracing::debug!(
        columns = column_count,
        rows = result_set.len(),
        "built sqlite result set"
    );
    Ok(result_set)
}

/// Prepare and run a SELECT, materializing every row.
///
/// # Errors
/// Returns `SqlNullableError::SqliteError` on preparation or execution failure.
pub fn select(
    conn: &Connection,
    sql: &str,
    params: &[DriverValue],
) -> Result<ResultSet, SqlNullableError> {
    let mut stmt = conn.prepare(sql)?;
    build_result_set(&mut stmt, params)
}

/// Run a named-parameter SELECT.
///
/// # Errors
/// Returns `SqlNullableError::ParameterError` if `query` was not rewritten
/// for SQLite placeholders, `SqlNullableError::MissingParameter` for an
/// unbound name, or `SqlNullableError::SqliteError` on execution failure.
pub fn select_named<P: NamedParams + ?Sized>(
    conn: &Connection,
    query: &NamedQuery,
    params: &P,
) -> Result<ResultSet, SqlNullableError> {
    if query.style() != PlaceholderStyle::Sqlite {
        return Err(SqlNullableError::ParameterError(format!(
            "query uses {:?} placeholders; SQLite expects ?N",
            query.style()
        )));
    }
    let values = query.bind(params)?;
    select(conn, query.sql(), &values)
}

/// Execute a statement (INSERT/UPDATE/DELETE) and return the affected rows.
///
/// # Errors
/// Returns `SqlNullableError::SqliteError` on execution failure.
pub fn execute(
    conn: &Connection,
    sql: &str,
    params: &[DriverValue],
) -> Result<usize, SqlNullableError> {
    let rows_affected = conn.execute(sql, rusqlite::params_from_iter(params.iter()))?;
    Ok(rows_affected)
}
