use super::row::Row;
use crate::adapter::Scannable;
use crate::error::SqlNullableError;

/// Map a whole row onto an application type.
///
/// Tuples of [`Scannable`] elements scan positionally. Structs usually scan
/// by column name:
/// ```rust
/// use sql_nullable::prelude::*;
///
/// struct Student {
///     first_name: String,
///     age: Nullable<u32>,
/// }
///
/// impl FromRow for Student {
///     fn from_row(row: &Row) -> Result<Self, SqlNullableError> {
///         Ok(Student {
///             first_name: row.try_get("first_name")?,
///             age: row.try_get("age")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// # Errors
    ///
    /// Returns `SqlNullableError` if a column is missing or does not convert.
    fn from_row(row: &Row) -> Result<Self, SqlNullableError>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> Result<Self, SqlNullableError> {
        Ok(row.clone())
    }
}

macro_rules! impl_from_row_tuple {
    ($($idx:tt $ty:ident),+) => {
        impl<$($ty: Scannable),+> FromRow for ($($ty,)+) {
            fn from_row(row: &Row) -> Result<Self, SqlNullableError> {
                Ok(($(row.try_get_by_index::<$ty>($idx)?,)+))
            }
        }
    };
}

impl_from_row_tuple!(0 A);
impl_from_row_tuple!(0 A, 1 B);
impl_from_row_tuple!(0 A, 1 B, 2 C);
impl_from_row_tuple!(0 A, 1 B, 2 C, 3 D);
impl_from_row_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
impl_from_row_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
