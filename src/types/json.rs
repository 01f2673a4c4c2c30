use serde_json::Value as JsonValue;

use crate::adapter::{Bindable, Scannable};
use crate::error::ConversionError;
use crate::value::{DriverValue, ValueKind};

impl Scannable for JsonValue {
    fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
        match value {
            DriverValue::Text(s) => serde_json::from_str(s)
                .map_err(|e| ConversionError::invalid(ValueKind::Text, "JSON", e.to_string())),
            DriverValue::Blob(bytes) => serde_json::from_slice(bytes)
                .map_err(|e| ConversionError::invalid(ValueKind::Blob, "JSON", e.to_string())),
            other => Err(ConversionError::unsupported(other.kind(), "JSON")),
        }
    }
}

impl Bindable for JsonValue {
    fn bind(&self) -> DriverValue {
        DriverValue::Text(self.to_string())
    }
}
