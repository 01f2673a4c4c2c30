use crate::adapter::{Bindable, Scannable};
use crate::error::ConversionError;
use crate::value::{DriverValue, ValueKind};

// Largest magnitudes every integer up to which is exactly representable.
const F64_EXACT_INT: u64 = 1 << 53;
const F32_EXACT_INT: u64 = 1 << 24;

macro_rules! impl_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Scannable for $ty {
                fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
                    match value {
                        DriverValue::Int(i) => <$ty>::try_from(*i).map_err(|_| {
                            ConversionError::invalid(ValueKind::Int, stringify!($ty), "out of range")
                        }),
                        DriverValue::Bool(b) => Ok(<$ty>::from(*b)),
                        other => Err(ConversionError::unsupported(other.kind(), stringify!($ty))),
                    }
                }
            }

            impl Bindable for $ty {
                fn bind(&self) -> DriverValue {
                    DriverValue::Int(i64::from(*self))
                }
            }
        )+
    };
}

impl_integer!(i64, i32, i16, u8, u16, u32);

impl Scannable for f64 {
    #[allow(clippy::cast_precision_loss)]
    fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
        match value {
            DriverValue::Float(f) => Ok(*f),
            DriverValue::Int(i) if i.unsigned_abs() <= F64_EXACT_INT => Ok(*i as f64),
            DriverValue::Int(_) => Err(ConversionError::invalid(
                ValueKind::Int,
                "f64",
                "integer is not exactly representable",
            )),
            other => Err(ConversionError::unsupported(other.kind(), "f64")),
        }
    }
}

impl Bindable for f64 {
    fn bind(&self) -> DriverValue {
        DriverValue::Float(*self)
    }
}

impl Scannable for f32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
        match value {
            DriverValue::Float(f) => {
                let narrowed = *f as f32;
                if f.is_nan() || f64::from(narrowed) == *f {
                    Ok(narrowed)
                } else {
                    Err(ConversionError::invalid(
                        ValueKind::Float,
                        "f32",
                        "float is not exactly representable",
                    ))
                }
            }
            DriverValue::Int(i) if i.unsigned_abs() <= F32_EXACT_INT => Ok(*i as f32),
            DriverValue::Int(_) => Err(ConversionError::invalid(
                ValueKind::Int,
                "f32",
                "integer is not exactly representable",
            )),
            other => Err(ConversionError::unsupported(other.kind(), "f32")),
        }
    }
}

impl Bindable for f32 {
    fn bind(&self) -> DriverValue {
        DriverValue::Float(f64::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_one_scans_present() {
        assert_eq!(i64::scan(&DriverValue::Int(-1)), Ok(-1));
        assert_eq!(i32::scan(&DriverValue::Int(-1)), Ok(-1));
    }

    #[test]
    fn booleans_map_to_one_and_zero() {
        assert_eq!(i64::scan(&DriverValue::Bool(true)), Ok(1));
        assert_eq!(u8::scan(&DriverValue::Bool(false)), Ok(0));
    }

    #[test]
    fn out_of_range_never_truncates() {
        let err = u8::scan(&DriverValue::Int(256)).unwrap_err();
        assert_eq!(err.reason(), Some("out of range"));
        assert!(u32::scan(&DriverValue::Int(-1)).is_err());
        assert!(i16::scan(&DriverValue::Int(i64::from(i16::MAX) + 1)).is_err());
    }

    #[test]
    fn floats_do_not_scan_into_integers() {
        let err = i64::scan(&DriverValue::Float(3.0)).unwrap_err();
        assert_eq!(err.found(), ValueKind::Float);
        assert!(i64::scan(&DriverValue::Text("3".into())).is_err());
        assert!(i64::scan(&DriverValue::Blob(vec![3])).is_err());
    }

    #[test]
    fn integers_widen_into_floats_only_when_exact() {
        assert_eq!(f64::scan(&DriverValue::Int(1 << 53)), Ok(9_007_199_254_740_992.0));
        assert!(f64::scan(&DriverValue::Int((1 << 53) + 1)).is_err());
        assert_eq!(f32::scan(&DriverValue::Int(-16)), Ok(-16.0));
        assert!(f32::scan(&DriverValue::Int((1 << 24) + 1)).is_err());
    }

    #[test]
    fn f32_rejects_precision_loss() {
        assert_eq!(f32::scan(&DriverValue::Float(0.5)), Ok(0.5));
        assert!(f32::scan(&DriverValue::Float(0.1)).is_err());
        assert!(f32::scan(&DriverValue::Float(f64::NAN)).unwrap().is_nan());
    }

    #[test]
    fn integers_bind_as_int() {
        assert_eq!(7_u16.bind(), DriverValue::Int(7));
        assert_eq!(u32::MAX.bind(), DriverValue::Int(i64::from(u32::MAX)));
        assert_eq!(1.5_f32.bind(), DriverValue::Float(1.5));
    }
}
