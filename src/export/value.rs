//! Conversion of stored values into export fields.
//!
//! Instants and enum codes are stored as text (ISO-8601 and their code), so
//! they already come out in their export form.

use rusqlite::types::Value;
use serde_json::{Number, Value as Json};

pub(crate) fn to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Integer(i) => Json::from(*i),
        Value::Real(f) => Number::from_f64(*f).map(Json::Number).unwrap_or(Json::Null),
        Value::Text(s) => Json::String(s.clone()),
        Value::Blob(b) => Json::String(String::from_utf8_lossy(b).into_owned()),
    }
}

/// Text of one CSV field. NULL becomes an empty field.
pub(crate) fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => real_text(*f),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => String::from_utf8_lossy(b).into_owned(),
    }
}

/// Same digits as the JSON export (`8.0`, not `8`). NaN and infinities
/// have no JSON form and give an empty field.
fn real_text(f: f64) -> String {
    Number::from_f64(f).map(|n| n.to_string()).unwrap_or_default()
}

