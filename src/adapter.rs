//! Scan and bind adapters.
//!
//! A domain type takes part in row materialization by implementing
//! [`Scannable`], and in parameter binding by implementing [`Bindable`].
//! The two must be mutually inverse: `T::scan(&v.bind()) == Ok(v)` for every
//! value `v` the type can hold.

use crate::error::ConversionError;
use crate::nullable::Nullable;
use crate::value::DriverValue;

/// Convert one driver-supplied column value into a domain value.
pub trait Scannable: Sized {
    /// # Errors
    ///
    /// Returns `ConversionError` if the representation of `value` has no
    /// defined mapping onto `Self`, or the value does not fit.
    fn scan(value: &DriverValue) -> Result<Self, ConversionError>;
}

/// Convert a domain value into a driver-acceptable query parameter.
pub trait Bindable {
    fn bind(&self) -> DriverValue;
}

impl<T: Scannable> Scannable for Nullable<T> {
    fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
        if value.is_null() {
            Ok(Nullable::Absent)
        } else {
            T::scan(value).map(Nullable::Present)
        }
    }
}

impl<T: Bindable> Bindable for Nullable<T> {
    fn bind(&self) -> DriverValue {
        match self {
            Nullable::Present(value) => value.bind(),
            Nullable::Absent => DriverValue::Null,
        }
    }
}

impl<T: Scannable> Scannable for Option<T> {
    fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
        Nullable::<T>::scan(value).map(Nullable::into_option)
    }
}

impl<T: Bindable> Bindable for Option<T> {
    fn bind(&self) -> DriverValue {
        match self {
            Some(value) => value.bind(),
            None => DriverValue::Null,
        }
    }
}

impl<T: Bindable + ?Sized> Bindable for &T {
    fn bind(&self) -> DriverValue {
        (**self).bind()
    }
}

impl Scannable for DriverValue {
    fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl Bindable for DriverValue {
    fn bind(&self) -> DriverValue {
        self.clone()
    }
}

/// Scan a driver value into `T`.
///
/// # Errors
///
/// Returns `ConversionError` if `T` does not recognize the representation.
pub fn scan<T: Scannable>(value: &DriverValue) -> Result<T, ConversionError> {
    T::scan(value)
}

#[must_use]
pub fn bind(value: &dyn Bindable) -> DriverValue {
    value.bind()
}

/// Bind a list of heterogeneous parameters in positional order.
/// ```rust
/// use sql_nullable::prelude::*;
///
/// let age: Nullable<i32> = Nullable::Absent;
/// let params = bind_all(&[&"Bob", &age, &true]);
/// assert_eq!(
///     params,
///     vec![DriverValue::Text("Bob".into()), DriverValue::Null, DriverValue::Bool(true)]
/// );
/// ```
#[must_use]
pub fn bind_all(values: &[&dyn Bindable]) -> Vec<DriverValue> {
    values.iter().map(|value| value.bind()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    #[test]
    fn null_scans_absent_for_nullable_and_option() {
        assert_eq!(scan::<Nullable<i64>>(&DriverValue::Null), Ok(Nullable::Absent));
        assert_eq!(scan::<Option<String>>(&DriverValue::Null), Ok(None));
    }

    #[test]
    fn null_into_plain_domain_fails() {
        let err = scan::<i64>(&DriverValue::Null).unwrap_err();
        assert_eq!(err.found(), ValueKind::Null);
        assert_eq!(err.target(), "i64");
    }

    #[test]
    fn nullable_delegates_failures() {
        let err = scan::<Nullable<i64>>(&DriverValue::Blob(vec![0x01])).unwrap_err();
        assert_eq!(err.found(), ValueKind::Blob);
    }

    #[test]
    fn absent_binds_null() {
        assert_eq!(Nullable::<bool>::Absent.bind(), DriverValue::Null);
        assert_eq!(None::<f64>.bind(), DriverValue::Null);
        assert_eq!(bind(&Some(2_i64)), DriverValue::Int(2));
    }
}
