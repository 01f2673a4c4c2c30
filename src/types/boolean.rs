use crate::adapter::{Bindable, Scannable};
use crate::error::ConversionError;
use crate::value::{DriverValue, ValueKind};

impl Scannable for bool {
    fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
        match value {
            DriverValue::Bool(b) => Ok(*b),
            DriverValue::Int(0) => Ok(false),
            DriverValue::Int(1) => Ok(true),
            DriverValue::Int(_) => Err(ConversionError::invalid(
                ValueKind::Int,
                "bool",
                "expected 0 or 1",
            )),
            other => Err(ConversionError::unsupported(other.kind(), "bool")),
        }
    }
}

impl Bindable for bool {
    fn bind(&self) -> DriverValue {
        DriverValue::Bool(*self)
    }
}
