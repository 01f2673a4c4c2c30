use std::fmt;

use chrono::NaiveDateTime;

/// Values a driver hands over while materializing a row, or accepts as a
/// query parameter.
///
/// Every domain type maps onto one or more of these representations, and the
/// mapping can be checked exhaustively.
/// ```rust
/// use sql_nullable::prelude::*;
///
/// let params = vec![
///     DriverValue::Int(1),
///     DriverValue::Text("alice".into()),
///     DriverValue::Null,
/// ];
/// assert!(params[2].is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Binary data
    Blob(Vec<u8>),
    /// Text/string value
    Text(String),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
}

/// The representation a [`DriverValue`] carries, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Float,
    Bool,
    Blob,
    Text,
    Timestamp,
    Null,
}

impl ValueKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Bool => "boolean",
            ValueKind::Blob => "blob",
            ValueKind::Text => "text",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Null => "NULL",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DriverValue {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            DriverValue::Int(_) => ValueKind::Int,
            DriverValue::Float(_) => ValueKind::Float,
            DriverValue::Bool(_) => ValueKind::Bool,
            DriverValue::Blob(_) => ValueKind::Blob,
            DriverValue::Text(_) => ValueKind::Text,
            DriverValue::Timestamp(_) => ValueKind::Timestamp,
            DriverValue::Null => ValueKind::Null,
        }
    }

    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let DriverValue::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let DriverValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if let DriverValue::Bool(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let DriverValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let DriverValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let DriverValue::Timestamp(value) = self {
            Some(*value)
        } else {
            None
        }
    }
}
