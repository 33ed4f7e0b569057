//! Scalar cell values and type-aware equality

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use duckdb::types::{TimeUnit, Value};
use serde::Serialize;
use std::fmt;

/// One cell of a result set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Fixed-point value kept in its exact textual form
    Decimal(String),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Bytes(Vec<u8>),
    /// Nested or exotic values (lists, structs, intervals) in debug form
    Other(String),
}

impl CellValue {
    fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellValue::Int(_) | CellValue::Float(_) | CellValue::Decimal(_)
        )
    }

    /// Numeric value as f64, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Decimal(d) => d.parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Canonical text of an exact number, `None` for floats and non-numbers
    fn exact_text(&self) -> Option<String> {
        match self {
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Decimal(d) => canonical_decimal(d),
            _ => None,
        }
    }

    /// Dates are treated as midnight when compared with timestamps
    fn as_instant(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Date(d) => d.and_hms_opt(0, 0, 0),
            CellValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Type-aware equality used when grading results.
    ///
    /// Numbers compare by value across integer, float, and decimal
    /// representations. Integers and decimals compare exactly, and a float
    /// on either side compares as `f64`. Dates and timestamps compare by
    /// instant. Text is compared byte-for-byte and null only equals null.
    /// Values of unrelated kinds (text `"5"` and number `5`) never match.
    pub fn matches(&self, other: &CellValue) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Null, _) | (_, CellValue::Null) => false,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Decimal(_), CellValue::Decimal(_) | CellValue::Int(_))
            | (CellValue::Int(_), CellValue::Decimal(_)) => {
                match (self.exact_text(), other.exact_text()) {
                    (Some(a), Some(b)) => a == b,
                    _ => float_matches(self, other),
                }
            }
            (a, b) if a.is_numeric() && b.is_numeric() => float_matches(a, b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Time(a), CellValue::Time(b)) => a == b,
            (a, b) if a.as_instant().is_some() && b.as_instant().is_some() => {
                a.as_instant() == b.as_instant()
            }
            (CellValue::Bytes(a), CellValue::Bytes(b)) => a == b,
            (CellValue::Other(a), CellValue::Other(b)) => a == b,
            _ => false,
        }
    }

    /// Short name of the value's kind, for mismatch messages
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "boolean",
            CellValue::Int(_) | CellValue::Float(_) | CellValue::Decimal(_) => "number",
            CellValue::Text(_) => "text",
            CellValue::Date(_) => "date",
            CellValue::Time(_) => "time",
            CellValue::Timestamp(_) => "timestamp",
            CellValue::Bytes(_) => "blob",
            CellValue::Other(_) => "other",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Decimal(d) => write!(f, "{}", d),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Date(d) => write!(f, "{}", d),
            CellValue::Time(t) => write!(f, "{}", t),
            CellValue::Timestamp(ts) => write!(f, "{}", ts),
            CellValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            CellValue::Other(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

fn float_matches(a: &CellValue, b: &CellValue) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y || (x.is_nan() && y.is_nan()),
        _ => false,
    }
}

/// Normalize decimal text: no leading integer zeros, no trailing fraction
/// zeros, and no sign on zero. `"-0012.500"` becomes `"-12.5"`.
fn canonical_decimal(text: &str) -> Option<String> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part
        .bytes()
        .chain(frac_part.bytes())
        .all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let int_part = match int_part.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(int_part.len() + frac_part.len() + 2);
    if negative && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    Some(out)
}

fn to_micros(unit: TimeUnit, value: i64) -> i64 {
    match unit {
        TimeUnit::Second => value.saturating_mul(1_000_000),
        TimeUnit::Millisecond => value.saturating_mul(1_000),
        TimeUnit::Microsecond => value,
        TimeUnit::Nanosecond => value / 1_000,
    }
}

fn timestamp_from_micros(micros: i64) -> Option<NaiveDateTime> {
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::from_timestamp(secs, nanos).map(|dt| dt.naive_utc())
}

fn date_from_days(days: i32) -> Option<NaiveDate> {
    DateTime::from_timestamp(i64::from(days) * 86_400, 0).map(|dt| dt.date_naive())
}

fn time_from_micros(micros: i64) -> Option<NaiveTime> {
    let secs = u32::try_from(micros.div_euclid(1_000_000)).ok()?;
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
}

fn int_or_float(value: i128) -> CellValue {
    match i64::try_from(value) {
        Ok(i) => CellValue::Int(i),
        Err(_) => CellValue::Float(value as f64),
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Boolean(b) => CellValue::Bool(b),
            Value::TinyInt(i) => CellValue::Int(i64::from(i)),
            Value::SmallInt(i) => CellValue::Int(i64::from(i)),
            Value::Int(i) => CellValue::Int(i64::from(i)),
            Value::BigInt(i) => CellValue::Int(i),
            Value::HugeInt(i) => int_or_float(i),
            Value::UTinyInt(i) => CellValue::Int(i64::from(i)),
            Value::USmallInt(i) => CellValue::Int(i64::from(i)),
            Value::UInt(i) => CellValue::Int(i64::from(i)),
            Value::UBigInt(i) => int_or_float(i128::from(i)),
            Value::Float(x) => CellValue::Float(f64::from(x)),
            Value::Double(x) => CellValue::Float(x),
            Value::Decimal(d) => CellValue::Decimal(d.to_string()),
            Value::Text(s) => CellValue::Text(s),
            Value::Enum(s) => CellValue::Text(s),
            Value::Blob(b) => CellValue::Bytes(b),
            Value::Date32(days) => date_from_days(days)
                .map(CellValue::Date)
                .unwrap_or_else(|| CellValue::Other(format!("date({})", days))),
            Value::Timestamp(unit, v) => timestamp_from_micros(to_micros(unit, v))
                .map(CellValue::Timestamp)
                .unwrap_or_else(|| CellValue::Other(format!("timestamp({})", v))),
            Value::Time64(unit, v) => time_from_micros(to_micros(unit, v))
                .map(CellValue::Time)
                .unwrap_or_else(|| CellValue::Other(format!("time({})", v))),
            other => CellValue::Other(format!("{:?}", other)),
        }
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
