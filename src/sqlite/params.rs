use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};

use crate::adapter::{Bindable, Scannable};
use crate::nullable::Nullable;
use crate::value::DriverValue;

// SQLite has no timestamp storage class; timestamps are stored as TEXT.
const TIMESTAMP_FORMAT: &str = "%F %T%.f";

/// Convert a single `DriverValue` to a rusqlite `Value`.
#[must_use]
pub fn driver_value_to_sqlite_value(value: &DriverValue) -> Value {
    match value {
        DriverValue::Int(i) => Value::Integer(*i),
        DriverValue::Float(f) => Value::Real(*f),
        DriverValue::Bool(b) => Value::Integer(i64::from(*b)),
        DriverValue::Blob(bytes) => Value::Blob(bytes.clone()),
        DriverValue::Text(s) => Value::Text(s.clone()),
        DriverValue::Timestamp(ts) => Value::Text(ts.format(TIMESTAMP_FORMAT).to_string()),
        DriverValue::Null => Value::Null,
    }
}

impl ToSql for DriverValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            DriverValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            DriverValue::Blob(bytes) => ToSqlOutput::Borrowed(ValueRef::Blob(bytes)),
            other => ToSqlOutput::Owned(driver_value_to_sqlite_value(other)),
        })
    }
}

impl FromSql for DriverValue {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => DriverValue::Null,
            ValueRef::Integer(i) => DriverValue::Int(i),
            ValueRef::Real(f) => DriverValue::Float(f),
            ValueRef::Text(text) => DriverValue::Text(
                std::str::from_utf8(text)
                    .map_err(|e| FromSqlError::Other(Box::new(e)))?
                    .to_owned(),
            ),
            ValueRef::Blob(bytes) => DriverValue::Blob(bytes.to_vec()),
        })
    }
}

impl<T: Bindable> ToSql for Nullable<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(driver_value_to_sqlite_value(&self.bind())))
    }
}

impl<T: Scannable> FromSql for Nullable<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = DriverValue::column_result(value)?;
        Nullable::<T>::scan(&raw).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// Unified `SQLite` parameter container.
#[derive(Debug, Clone, Default)]
pub struct Params(Vec<Value>);

impl Params {
    /// Convert driver values into `SQLite` values.
    #[must_use]
    pub fn convert(params: &[DriverValue]) -> Self {
        Params(params.iter().map(driver_value_to_sqlite_value).collect())
    }

    /// Bind heterogeneous domain values in positional order.
    #[must_use]
    pub fn from_bindables(values: &[&dyn Bindable]) -> Self {
        Params(
            values
                .iter()
                .map(|value| driver_value_to_sqlite_value(&value.bind()))
                .collect(),
        )
    }

    /// Borrow the underlying values.
    #[must_use]
    pub fn as_values(&self) -> &[Value] {
        &self.0
    }

    /// Build a borrowed params slice suitable for rusqlite execution.
    #[must_use]
    pub fn as_refs(&self) -> Vec<&dyn ToSql> {
        self.0.iter().map(|v| v as &dyn ToSql).collect()
    }
}
