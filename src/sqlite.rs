//! `rusqlite` integration.
//!
//! [`DriverValue`](crate::DriverValue) and [`Nullable<T>`](crate::Nullable)
//! implement rusqlite's `ToSql`/`FromSql`, so they can be passed straight to
//! statements and read straight out of rows:
//! ```rust
//! use sql_nullable::prelude::*;
//!
//! let conn = rusqlite::Connection::open_in_memory()?;
//! let age: Nullable<i64> = conn.query_row("SELECT NULL", [], |row| row.get(0))?;
//! assert!(age.is_absent());
//! # Ok::<(), rusqlite::Error>(())
//! ```

mod params;
mod query;

pub use params::{Params, driver_value_to_sqlite_value};
pub use query::{build_result_set, execute, select, select_named};
