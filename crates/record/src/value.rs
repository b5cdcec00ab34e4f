use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed rendering pattern for date-only values.
pub const DATE_PATTERN: &str = "%Y-%m-%d";
/// Fixed rendering pattern for date-time values.
pub const DATE_TIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// A dynamically typed value held by a record field.
///
/// Numeric variants carry their exact width so a decoded cell can be
/// narrowed to precisely the type the column schema declares. The serde
/// representation is externally tagged so every variant, width included,
/// survives a round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl FieldValue {
    /// Try to get the value as a boolean
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a 64-bit integer, widening narrower ints
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::I8(v) => Some(i64::from(*v)),
            FieldValue::I16(v) => Some(i64::from(*v)),
            FieldValue::I32(v) => Some(i64::from(*v)),
            FieldValue::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the value as a float, widening any numeric variant
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::F32(v) => Some(f64::from(*v)),
            FieldValue::F64(v) => Some(*v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    /// Try to get the value as a string slice
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a calendar date, truncating date-times
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::DateTime(dt) => Some(dt.date()),
            _ => None,
        }
    }

    /// Try to get the value as a date-time
    #[must_use]
    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::I8(v) => write!(f, "{v}"),
            FieldValue::I16(v) => write!(f, "{v}"),
            FieldValue::I32(v) => write!(f, "{v}"),
            FieldValue::I64(v) => write!(f, "{v}"),
            FieldValue::F32(v) => write!(f, "{v}"),
            FieldValue::F64(v) => write!(f, "{v}"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Date(d) => write!(f, "{}", d.format(DATE_PATTERN)),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.format(DATE_TIME_PATTERN)),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i8> for FieldValue {
    fn from(v: i8) -> Self {
        FieldValue::I8(v)
    }
}

impl From<i16> for FieldValue {
    fn from(v: i16) -> Self {
        FieldValue::I16(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::I32(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::I64(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::F32(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::F64(v)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(dt: NaiveDateTime) -> Self {
        FieldValue::DateTime(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_widening() {
        assert_eq!(FieldValue::I8(7).as_i64(), Some(7));
        assert_eq!(FieldValue::I16(-3).as_i64(), Some(-3));
        assert_eq!(FieldValue::I32(42).as_f64(), Some(42.0));
        assert_eq!(FieldValue::F32(1.5).as_f64(), Some(1.5));
        assert_eq!(FieldValue::Text("42".to_string()).as_i64(), None);
    }

    #[test]
    fn test_date_truncation() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(13, 45, 0)
            .unwrap();
        assert_eq!(
            FieldValue::DateTime(dt).as_date(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_serde_roundtrip_is_lossless() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let values = vec![
            FieldValue::Bool(true),
            FieldValue::I8(-7),
            FieldValue::I64(1_000_000),
            FieldValue::F32(1.5),
            FieldValue::F64(2.5),
            FieldValue::Text("2024-03-01".to_string()),
            FieldValue::Date(day),
            FieldValue::DateTime(day.and_hms_opt(13, 45, 9).unwrap()),
        ];

        for value in values {
            let json = serde_json::to_string(&value).unwrap();
            let back: FieldValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value, "lost through {json}");
        }
    }

    #[test]
    fn test_display_patterns() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(FieldValue::Date(d).to_string(), "2024-03-01");

        let dt = d.and_hms_opt(13, 45, 9).unwrap();
        assert_eq!(FieldValue::DateTime(dt).to_string(), "2024-03-01 13:45:09");

        assert_eq!(FieldValue::Bool(true).to_string(), "true");
        assert_eq!(FieldValue::I64(-12).to_string(), "-12");
    }
}
