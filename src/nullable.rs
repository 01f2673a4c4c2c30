use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A column value or query parameter that may be SQL NULL.
///
/// The variant is the presence flag: an absent value carries no payload, so
/// there is nothing to read by mistake.
/// ```rust
/// use sql_nullable::prelude::*;
///
/// let age: Nullable<i64> = scan(&DriverValue::Null)?;
/// assert!(age.is_absent());
/// assert_eq!(age.coalesce(-1), -1);
/// # Ok::<(), ConversionError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nullable<T> {
    /// SQL NULL
    Absent,
    /// A meaningful value
    Present(T),
}

impl<T> Nullable<T> {
    #[must_use]
    pub fn present(value: T) -> Self {
        Nullable::Present(value)
    }

    #[must_use]
    pub fn absent() -> Self {
        Nullable::Absent
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Nullable::Present(_))
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Nullable::Absent)
    }

    /// Borrow the value when present.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Nullable::Present(value) => Some(value),
            Nullable::Absent => None,
        }
    }

    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Nullable::Present(value) => Some(value),
            Nullable::Absent => None,
        }
    }

    #[must_use]
    pub fn as_ref(&self) -> Nullable<&T> {
        match self {
            Nullable::Present(value) => Nullable::Present(value),
            Nullable::Absent => Nullable::Absent,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Nullable<U> {
        match self {
            Nullable::Present(value) => Nullable::Present(f(value)),
            Nullable::Absent => Nullable::Absent,
        }
    }

    /// Substitute `default` for NULL, like `COALESCE(column, default)`.
    pub fn coalesce(self, default: T) -> T {
        self.into_option().unwrap_or(default)
    }

    pub fn coalesce_with<F: FnOnce() -> T>(self, f: F) -> T {
        self.into_option().unwrap_or_else(f)
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Absent
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Nullable::Present(value),
            None => Nullable::Absent,
        }
    }
}

impl<T> From<Nullable<T>> for Option<T> {
    fn from(value: Nullable<T>) -> Self {
        value.into_option()
    }
}

impl<T: fmt::Display> fmt::Display for Nullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nullable::Present(value) => value.fmt(f),
            Nullable::Absent => f.write_str("NULL"),
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Nullable::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_absent_for_any_payload() {
        struct NoDefault;
        let value: Nullable<NoDefault> = Nullable::default();
        assert!(value.is_absent());
    }

    #[test]
    fn coalesce_distinguishes_null_from_zero() {
        assert_eq!(Nullable::present(0).coalesce(-1), 0);
        assert_eq!(Nullable::<i32>::absent().coalesce(-1), -1);
        assert_eq!(Nullable::<i32>::absent().coalesce_with(|| 7), 7);
    }

    #[test]
    fn option_conversions() {
        assert_eq!(Nullable::from(Some(3)), Nullable::Present(3));
        assert_eq!(Option::<u8>::from(Nullable::Absent), None);
        assert_eq!(Nullable::present("x").map(str::len), Nullable::Present(1));
    }

    #[test]
    fn display_and_serde() {
        assert_eq!(Nullable::present(42).to_string(), "42");
        assert_eq!(Nullable::<i64>::Absent.to_string(), "NULL");

        assert_eq!(serde_json::to_string(&Nullable::present(5)).unwrap(), "5");
        assert_eq!(serde_json::to_string(&Nullable::<i32>::Absent).unwrap(), "null");
        let back: Nullable<String> = serde_json::from_str("null").unwrap();
        assert!(back.is_absent());
    }
}
