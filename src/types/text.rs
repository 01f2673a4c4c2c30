use crate::adapter::{Bindable, Scannable};
use crate::error::ConversionError;
use crate::value::{DriverValue, ValueKind};

impl Scannable for String {
    fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
        match value {
            DriverValue::Text(s) => Ok(s.clone()),
            DriverValue::Blob(bytes) => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| ConversionError::invalid(ValueKind::Blob, "String", "invalid UTF-8")),
            other => Err(ConversionError::unsupported(other.kind(), "String")),
        }
    }
}

impl Bindable for String {
    fn bind(&self) -> DriverValue {
        DriverValue::Text(self.clone())
    }
}

impl Bindable for str {
    fn bind(&self) -> DriverValue {
        DriverValue::Text(self.to_owned())
    }
}

impl Scannable for Vec<u8> {
    fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
        match value {
            DriverValue::Blob(bytes) => Ok(bytes.clone()),
            DriverValue::Text(s) => Ok(s.as_bytes().to_vec()),
            other => Err(ConversionError::unsupported(other.kind(), "Vec<u8>")),
        }
    }
}

impl Bindable for Vec<u8> {
    fn bind(&self) -> DriverValue {
        DriverValue::Blob(self.clone())
    }
}

impl Bindable for [u8] {
    fn bind(&self) -> DriverValue {
        DriverValue::Blob(self.to_vec())
    }
}
