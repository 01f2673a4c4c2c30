use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::adapter::{Bindable, Scannable};
use crate::error::ConversionError;
use crate::value::{DriverValue, ValueKind};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse the textual timestamps SQLite-style stores hand back.
fn parse_naive_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

impl Scannable for NaiveDateTime {
    fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
        match value {
            DriverValue::Timestamp(ts) => Ok(*ts),
            DriverValue::Text(s) => parse_naive_timestamp(s).ok_or_else(|| {
                ConversionError::invalid(
                    ValueKind::Text,
                    "NaiveDateTime",
                    "unrecognized timestamp format",
                )
            }),
            other => Err(ConversionError::unsupported(other.kind(), "NaiveDateTime")),
        }
    }
}

impl Bindable for NaiveDateTime {
    fn bind(&self) -> DriverValue {
        DriverValue::Timestamp(*self)
    }
}

impl Scannable for NaiveDate {
    fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
        match value {
            DriverValue::Timestamp(ts) if ts.time() == NaiveTime::MIN => Ok(ts.date()),
            DriverValue::Timestamp(_) => Err(ConversionError::invalid(
                ValueKind::Timestamp,
                "NaiveDate",
                "timestamp has a time component",
            )),
            DriverValue::Text(s) => {
                if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    return Ok(date);
                }
                match parse_naive_timestamp(s) {
                    Some(ts) if ts.time() == NaiveTime::MIN => Ok(ts.date()),
                    Some(_) => Err(ConversionError::invalid(
                        ValueKind::Text,
                        "NaiveDate",
                        "timestamp has a time component",
                    )),
                    None => Err(ConversionError::invalid(
                        ValueKind::Text,
                        "NaiveDate",
                        "unrecognized date format",
                    )),
                }
            }
            other => Err(ConversionError::unsupported(other.kind(), "NaiveDate")),
        }
    }
}

impl Bindable for NaiveDate {
    fn bind(&self) -> DriverValue {
        DriverValue::Timestamp(self.and_time(NaiveTime::MIN))
    }
}

impl Scannable for DateTime<Utc> {
    fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
        match value {
            DriverValue::Timestamp(ts) => Ok(ts.and_utc()),
            DriverValue::Text(s) => DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| parse_naive_timestamp(s).map(|ts| ts.and_utc()))
                .ok_or_else(|| {
                    ConversionError::invalid(
                        ValueKind::Text,
                        "DateTime<Utc>",
                        "unrecognized timestamp format",
                    )
                }),
            other => Err(ConversionError::unsupported(other.kind(), "DateTime<Utc>")),
        }
    }
}

impl Bindable for DateTime<Utc> {
    fn bind(&self) -> DriverValue {
        DriverValue::Timestamp(self.naive_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap()
    }

    #[test]
    fn parses_stored_text_formats() {
        let expected = ts("2024-03-01 12:30:00");
        for text in ["2024-03-01 12:30:00", "2024-03-01T12:30:00", "2024-03-01 12:30:00.000"] {
            assert_eq!(
                NaiveDateTime::scan(&DriverValue::Text(text.into())),
                Ok(expected),
                "{text}"
            );
        }
        assert_eq!(
            NaiveDateTime::scan(&DriverValue::Text("2024-03-01 12:30:00.250".into())),
            Ok(ts("2024-03-01 12:30:00.250"))
        );
        assert!(NaiveDateTime::scan(&DriverValue::Text("yesterday".into())).is_err());
        assert!(NaiveDateTime::scan(&DriverValue::Int(0)).is_err());
    }

    #[test]
    fn dates_refuse_time_components() {
        let midnight = ts("2024-03-01 00:00:00");
        let date = NaiveDate::scan(&DriverValue::Timestamp(midnight)).unwrap();
        assert_eq!(date.bind(), DriverValue::Timestamp(midnight));

        let err = NaiveDate::scan(&DriverValue::Timestamp(ts("2024-03-01 00:00:01"))).unwrap_err();
        assert_eq!(err.found(), ValueKind::Timestamp);
        assert_eq!(
            NaiveDate::scan(&DriverValue::Text("2024-03-01".into())),
            Ok(midnight.date())
        );
    }

    #[test]
    fn dates_read_back_from_stored_midnight_text() {
        let date = NaiveDate::from_ymd_opt(2023, 9, 1).unwrap();
        for text in ["2023-09-01 00:00:00", "2023-09-01T00:00:00", "2023-09-01 00:00:00.000"] {
            assert_eq!(NaiveDate::scan(&DriverValue::Text(text.into())), Ok(date), "{text}");
        }

        let err = NaiveDate::scan(&DriverValue::Text("2023-09-01 08:15:00".into())).unwrap_err();
        assert_eq!(err.reason(), Some("timestamp has a time component"));
        let err = NaiveDate::scan(&DriverValue::Text("September".into())).unwrap_err();
        assert_eq!(err.reason(), Some("unrecognized date format"));
    }

    #[test]
    fn utc_accepts_rfc3339_with_offset() {
        let scanned =
            DateTime::<Utc>::scan(&DriverValue::Text("2024-03-01T14:30:00+02:00".into())).unwrap();
        assert_eq!(scanned.naive_utc(), ts("2024-03-01 12:30:00"));
        assert_eq!(scanned.bind(), DriverValue::Timestamp(ts("2024-03-01 12:30:00")));
    }
}
