#![doc = include_str!("../README.md")]

mod adapter;
mod error;
mod macros;
mod nullable;
mod results;
mod types;
mod value;

pub mod named;
pub mod prelude;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use adapter::{Bindable, Scannable, bind, bind_all, scan};
pub use error::{ConversionError, SqlNullableError};
pub use named::{NamedArgs, NamedParams, NamedQuery, PlaceholderStyle};
pub use nullable::Nullable;
pub use results::{FromRow, ResultSet, Row};
pub use value::{DriverValue, ValueKind};
