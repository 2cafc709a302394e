//! Decoding of untyped result rows into JSON values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use common_service_sdk::models::Row;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::QueryResult;
use serde_json::{Number, Value};

/// Decodes every column of `row`, in the order the driver reports them.
pub fn decode_row(row: &QueryResult) -> Row {
    row.column_names()
        .into_iter()
        .map(|col| {
            let value = decode_column(row, &col);
            (col, value)
        })
        .collect()
}

/// Decodes a single column.
///
/// The driver refuses a decode whose Rust type does not match the stored
/// value, so the first type that succeeds is the value's own type. Narrow
/// integer types come before floats, and integers before `bool`, because
/// some drivers accept a boolean decode of an integer column.
pub fn decode_column(row: &QueryResult, col: &str) -> Value {
    macro_rules! attempt {
        ($ty:ty, $conv:expr) => {
            if let Ok(v) = row.try_get::<Option<$ty>>("", col) {
                return v.map_or(Value::Null, $conv);
            }
        };
    }

    attempt!(i64, Value::from);
    attempt!(i32, Value::from);
    attempt!(i16, Value::from);
    attempt!(f64, float);
    attempt!(f32, |f| float(f64::from(f)));
    attempt!(Decimal, decimal);
    attempt!(String, Value::String);
    attempt!(bool, Value::Bool);
    attempt!(NaiveDateTime, |v| Value::String(v.to_string()));
    attempt!(DateTime<Utc>, |v| Value::String(v.to_rfc3339()));
    attempt!(NaiveDate, |v| Value::String(v.to_string()));
    attempt!(NaiveTime, |v| Value::String(v.to_string()));
    attempt!(Value, std::convert::identity);
    attempt!(Vec<u8>, |v| Value::String(String::from_utf8_lossy(&v).into_owned()));

    Value::Null
}

fn float(f: f64) -> Value {
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}

fn decimal(d: Decimal) -> Value {
    if d.is_integer() {
        if let Some(i) = d.to_i64() {
            return Value::from(i);
        }
    }
    d.to_f64()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::String(d.to_string()), Value::Number)
}

/// Renders an option value as text; `NULL` and `""` yield nothing.
#[must_use]
pub fn option_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
