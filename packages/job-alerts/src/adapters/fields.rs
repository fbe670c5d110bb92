//! Field resolution helpers shared by the provider parsers.
//!
//! Everything here degrades to an empty string or `None`; nothing fails.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{FetchError, FetchResult};

/// First non-empty string among `keys`.
pub(crate) fn first_str<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| item.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// First non-empty string among `keys`, or an empty string.
pub(crate) fn string_or_empty(item: &Value, keys: &[&str]) -> String {
    first_str(item, keys).unwrap_or_default().to_string()
}

/// Provider id from the first key holding a non-empty string or a number.
pub(crate) fn job_id(item: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| match item.get(*k)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .next()
        .unwrap_or_default()
}

/// Location from either `{"name": ...}` or a plain string.
pub(crate) fn location_name(value: Option<&Value>) -> String {
    match value {
        Some(Value::Object(obj)) => obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Parse an ISO-8601 timestamp carrying an offset (or `Z`) into UTC.
///
/// Naive timestamps are rejected rather than guessed.
pub(crate) fn iso_datetime(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let s = value?.as_str()?.trim();
    if s.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Primary timestamp field, falling back to a secondary one.
pub(crate) fn iso_datetime_either(item: &Value, primary: &str, fallback: &str) -> Option<DateTime<Utc>> {
    iso_datetime(item.get(primary)).or_else(|| iso_datetime(item.get(fallback)))
}

/// Epoch milliseconds (integer or float) into UTC.
pub(crate) fn epoch_millis(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let value = value?;
    let millis = value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?;
    DateTime::from_timestamp_millis(millis)
}

/// The `jobs` array of an object payload. A missing key means no jobs.
pub(crate) fn jobs_array<'a>(payload: &'a Value, url: &str) -> FetchResult<&'a [Value]> {
    let obj: &Map<String, Value> = payload.as_object().ok_or_else(|| FetchError::Payload {
        url: url.to_string(),
        reason: format!("expected an object, got {}", kind_of(payload)),
    })?;

    match obj.get("jobs") {
        None | Some(Value::Null) => Ok(&[] as &[Value]),
        Some(Value::Array(jobs)) => Ok(jobs.as_slice()),
        Some(other) => Err(FetchError::Payload {
            url: url.to_string(),
            reason: format!("expected \"jobs\" to be an array, got {}", kind_of(other)),
        }),
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
