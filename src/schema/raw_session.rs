//! Focus-session document schema
//!
//! Sessions are stored by the document database as loosely-typed JSON with
//! camelCase field names. Nothing about a stored document is guaranteed: a
//! field may be absent, `null`, a number sent as a string, or a timestamp in
//! one of several encodings. This module keeps every field as raw JSON and
//! offers typed accessors that report whether a value was missing, invalid or
//! present.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A field read from a raw document
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Absent or `null`
    Missing,
    /// Present but not interpretable as `T`
    Invalid,
    Present(T),
}

impl<T> Field<T> {
    pub fn present(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Missing | Field::Invalid => None,
        }
    }
}

/// Focus session exactly as stored by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFocusSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_duration_minutes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_duration_minutes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interruption_count: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_mode_used: Option<Value>,
}

impl RawFocusSession {
    /// Document id; numeric ids are rendered as strings
    pub fn id_field(&self) -> Field<String> {
        match &self.id {
            None => Field::Missing,
            Some(Value::String(s)) if s.trim().is_empty() => Field::Missing,
            Some(Value::String(s)) => Field::Present(s.clone()),
            Some(Value::Number(n)) => Field::Present(n.to_string()),
            Some(_) => Field::Invalid,
        }
    }

    pub fn start_time_field(&self) -> Field<DateTime<Utc>> {
        match &self.start_time {
            None => Field::Missing,
            Some(value) => match parse_timestamp(value) {
                Some(ts) => Field::Present(ts),
                None => Field::Invalid,
            },
        }
    }

    pub fn actual_duration_field(&self) -> Field<f64> {
        number_field(&self.actual_duration_minutes)
    }

    pub fn planned_duration_field(&self) -> Field<f64> {
        number_field(&self.planned_duration_minutes)
    }

    pub fn interruption_count_field(&self) -> Field<f64> {
        number_field(&self.interruption_count)
    }

    pub fn status_field(&self) -> Field<String> {
        match &self.status {
            None => Field::Missing,
            Some(Value::String(s)) => Field::Present(s.clone()),
            Some(_) => Field::Invalid,
        }
    }

    pub fn strict_mode_field(&self) -> Field<bool> {
        match &self.strict_mode_used {
            None => Field::Missing,
            Some(Value::Bool(b)) => Field::Present(*b),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Field::Present(true),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Field::Present(false),
            Some(_) => Field::Invalid,
        }
    }
}

/// Read a numeric field, accepting numbers and numeric strings
fn number_field(value: &Option<Value>) -> Field<f64> {
    match value {
        None => Field::Missing,
        Some(Value::Number(n)) => n.as_f64().map_or(Field::Invalid, Field::Present),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_or(Field::Invalid, Field::Present),
        Some(_) => Field::Invalid,
    }
}

/// Parse a stored timestamp.
///
/// Accepted encodings:
/// - RFC 3339 / ISO-8601 string with an offset (`2024-01-15T09:00:00Z`)
/// - integer epoch milliseconds
/// - document-store timestamp objects: `{ "seconds", "nanoseconds" }`
///   (also the underscore-prefixed export form)
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            // absent or null nanoseconds mean zero; anything else must be a u32
            let nanos = match map.get("nanoseconds").or_else(|| map.get("_nanoseconds")) {
                None | Some(Value::Null) => 0,
                Some(value) => u32::try_from(value.as_u64()?).ok()?,
            };
            DateTime::from_timestamp(seconds, nanos)
        }
        _ => None,
    }
}
