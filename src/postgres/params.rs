use std::error::Error;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde_json::Value as JsonValue;
use tokio_postgres::types::{FromSql, IsNull, ToSql, Type, to_sql_checked};
use tokio_util::bytes;

use crate::adapter::{Bindable, Scannable};
use crate::nullable::Nullable;
use crate::value::DriverValue;

type BoxError = Box<dyn Error + Sync + Send>;

/// Container for Postgres parameters with lifetime tracking
pub struct Params<'a> {
    references: Vec<&'a (dyn ToSql + Sync)>,
}

impl<'a> Params<'a> {
    /// Convert from a slice of driver values to Postgres parameters
    #[must_use]
    pub fn convert(params: &'a [DriverValue]) -> Params<'a> {
        let references = params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        Params { references }
    }

    /// Get a reference to the underlying parameter array
    #[must_use]
    pub fn as_refs(&self) -> &[&'a (dyn ToSql + Sync)] {
        &self.references
    }
}

fn accepts_type(ty: &Type) -> bool {
    matches!(
        *ty,
        Type::INT2
            | Type::INT4
            | Type::INT8
            | Type::FLOAT4
            | Type::FLOAT8
            | Type::BOOL
            | Type::TEXT
            | Type::VARCHAR
            | Type::BPCHAR
            | Type::NAME
            | Type::BYTEA
            | Type::TIMESTAMP
            | Type::TIMESTAMPTZ
            | Type::DATE
            | Type::JSON
            | Type::JSONB
    )
}

fn mismatch(value: &DriverValue, ty: &Type) -> BoxError {
    format!("cannot bind {} to a {ty} column", value.kind()).into()
}

// Postgres keeps microseconds; finer digits would be dropped on the wire.
fn whole_micros(ts: &NaiveDateTime, ty: &Type) -> Result<(), BoxError> {
    if ts.nanosecond() % 1_000 == 0 {
        Ok(())
    } else {
        Err(format!("timestamp {ts} is finer than the microsecond precision of {ty}").into())
    }
}

impl ToSql for DriverValue {
    #[allow(clippy::cast_possible_truncation)]
    fn to_sql(&self, ty: &Type, out: &mut bytes::BytesMut) -> Result<IsNull, BoxError> {
        match (self, ty) {
            (DriverValue::Null, _) => Ok(IsNull::Yes),
            (DriverValue::Int(i), &Type::INT2) => i16::try_from(*i)?.to_sql(ty, out),
            (DriverValue::Int(i), &Type::INT4) => i32::try_from(*i)?.to_sql(ty, out),
            (DriverValue::Int(i), &Type::INT8) => i.to_sql(ty, out),
            (DriverValue::Float(f), &Type::FLOAT4) => {
                let narrowed = *f as f32;
                if f.is_nan() || f64::from(narrowed) == *f {
                    narrowed.to_sql(ty, out)
                } else {
                    Err(format!("float {f} is not exactly representable in {ty}").into())
                }
            }
            (DriverValue::Float(f), &Type::FLOAT8) => f.to_sql(ty, out),
            (DriverValue::Bool(b), &Type::BOOL) => b.to_sql(ty, out),
            (DriverValue::Blob(bytes), &Type::BYTEA) => bytes.as_slice().to_sql(ty, out),
            (DriverValue::Text(s), &Type::TEXT | &Type::VARCHAR | &Type::BPCHAR | &Type::NAME) => {
                s.to_sql(ty, out)
            }
            (DriverValue::Text(s), &Type::JSON | &Type::JSONB) => {
                serde_json::from_str::<JsonValue>(s)?.to_sql(ty, out)
            }
            (DriverValue::Timestamp(ts), &Type::TIMESTAMP) => {
                whole_micros(ts, ty)?;
                ts.to_sql(ty, out)
            }
            (DriverValue::Timestamp(ts), &Type::TIMESTAMPTZ) => {
                whole_micros(ts, ty)?;
                ts.and_utc().to_sql(ty, out)
            }
            (DriverValue::Timestamp(ts), &Type::DATE) => {
                if ts.time() == NaiveTime::MIN {
                    ts.date().to_sql(ty, out)
                } else {
                    Err(format!("timestamp {ts} has a time component; {ty} holds dates only").into())
                }
            }
            (value, ty) => Err(mismatch(value, ty)),
        }
    }

    fn accepts(ty: &Type) -> bool {
        accepts_type(ty)
    }

    to_sql_checked!();
}

impl<'a> FromSql<'a> for DriverValue {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, BoxError> {
        Ok(match *ty {
            Type::INT2 => DriverValue::Int(i64::from(i16::from_sql(ty, raw)?)),
            Type::INT4 => DriverValue::Int(i64::from(i32::from_sql(ty, raw)?)),
            Type::INT8 => DriverValue::Int(i64::from_sql(ty, raw)?),
            Type::FLOAT4 => DriverValue::Float(f64::from(f32::from_sql(ty, raw)?)),
            Type::FLOAT8 => DriverValue::Float(f64::from_sql(ty, raw)?),
            Type::BOOL => DriverValue::Bool(bool::from_sql(ty, raw)?),
            Type::BYTEA => DriverValue::Blob(Vec::<u8>::from_sql(ty, raw)?),
            Type::TIMESTAMP => DriverValue::Timestamp(NaiveDateTime::from_sql(ty, raw)?),
            Type::TIMESTAMPTZ => {
                DriverValue::Timestamp(DateTime::<Utc>::from_sql(ty, raw)?.naive_utc())
            }
            Type::DATE => {
                DriverValue::Timestamp(NaiveDate::from_sql(ty, raw)?.and_time(NaiveTime::MIN))
            }
            Type::JSON | Type::JSONB => {
                DriverValue::Text(JsonValue::from_sql(ty, raw)?.to_string())
            }
            _ => DriverValue::Text(String::from_sql(ty, raw)?),
        })
    }

    fn from_sql_null(_ty: &Type) -> Result<Self, BoxError> {
        Ok(DriverValue::Null)
    }

    fn accepts(ty: &Type) -> bool {
        accepts_type(ty)
    }
}

impl<T: Bindable + fmt::Debug> ToSql for Nullable<T> {
    fn to_sql(&self, ty: &Type, out: &mut bytes::BytesMut) -> Result<IsNull, BoxError> {
        self.bind().to_sql(ty, out)
    }

    fn accepts(ty: &Type) -> bool {
        accepts_type(ty)
    }

    to_sql_checked!();
}

impl<'a, T: Scannable> FromSql<'a> for Nullable<T> {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, BoxError> {
        let value = DriverValue::from_sql(ty, raw)?;
        Ok(Nullable::<T>::scan(&value)?)
    }

    fn from_sql_null(_ty: &Type) -> Result<Self, BoxError> {
        Ok(Nullable::Absent)
    }

    fn accepts(ty: &Type) -> bool {
        accepts_type(ty)
    }
}
