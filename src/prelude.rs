//! Convenient imports for scanning, binding and row mapping.
//!
//! Glob-import this module to bring the adapter traits, the error types
//! and the driver parameter containers into scope.

pub use crate::adapter::{Bindable, Scannable, bind, bind_all, scan};
pub use crate::error::{ConversionError, SqlNullableError};
pub use crate::named::{NamedArgs, NamedParams, NamedQuery, PlaceholderStyle};
pub use crate::nullable::Nullable;
pub use crate::results::{FromRow, ResultSet, Row};
pub use crate::value::{DriverValue, ValueKind};

#[cfg(feature = "postgres")]
pub use crate::postgres::Params as PostgresParams;

#[cfg(feature = "sqlite")]
pub use crate::sqlite::Params as SqliteParams;
