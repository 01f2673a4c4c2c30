//! `tokio-postgres` integration.
//!
//! [`DriverValue`](crate::DriverValue) and [`Nullable<T>`](crate::Nullable)
//! implement `ToSql`/`FromSql`. Each kind binds only to the column types of
//! its own mapping (`Int` to INT2/INT4/INT8, `Float` to FLOAT4/FLOAT8, `Text`
//! to the text and JSON types, `Timestamp` to TIMESTAMP/TIMESTAMPTZ/DATE) and
//! any other pairing is an error. Narrowing to INT2, INT4, FLOAT4 or DATE
//! fails rather than truncating. SQL NULL scans into `DriverValue::Null` /
//! `Nullable::Absent`.

mod params;
mod query;

pub use params::Params;
pub use query::{build_result_set_from_rows, postgres_extract_value};
