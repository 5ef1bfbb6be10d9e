//! Field extraction from loosely-typed JSON.
//!
//! Every entity is populated by pulling named fields out of a
//! [`serde_json::Value`] with these functions. They never fail: a missing,
//! `null` or mistyped field yields the documented default, so a partial
//! payload still produces a usable entity.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::Value;

use super::client::RestClient;
use super::resource::Resource;

/// Timestamp type for JIRA date and date-time fields.
pub type Timestamp = DateTime<FixedOffset>;

/// JIRA's date-time format, e.g. `2013-10-01T12:34:56.000+0000`.
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// JIRA's date format, e.g. `2013-10-01`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Extract a string, or `""` when absent.
///
/// Numbers and booleans are converted to their JSON text.
pub fn get_string(value: Option<&Value>) -> String {
    get_string_or(value, "")
}

/// Extract a string, or `default` when absent or not a scalar.
pub fn get_string_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

/// Extract a boolean. Accepts `"true"`/`"false"` strings; anything else is `false`.
pub fn get_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Extract an integer. Accepts numeric strings; anything else is `0`.
pub fn get_integer(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Extract a timestamp.
///
/// Accepts JIRA's date-time format, RFC 3339, and plain dates (taken as
/// midnight UTC). Anything else is `None`.
pub fn get_date(value: Option<&Value>) -> Option<Timestamp> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        return None;
    }

    DateTime::parse_from_str(text, DATETIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(text))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc().fixed_offset())
        })
}

/// Build a nested resource.
///
/// Returns `None` when the field is absent, not an object, or an empty object.
pub fn get_resource<T: Resource>(value: Option<&Value>, client: &RestClient) -> Option<T> {
    match value {
        Some(json) if json.as_object().map_or(false, |map| !map.is_empty()) => {
            Some(T::from_json(client, json))
        }
        _ => None,
    }
}

/// Build a list of resources from a JSON array, in order.
///
/// Elements that are not objects are skipped. A missing or non-array field
/// yields an empty list.
pub fn get_resource_array<T: Resource>(value: Option<&Value>, client: &RestClient) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .map(|item| T::from_json(client, item))
                .collect()
        })
        .unwrap_or_default()
}

/// Extract a string-to-string map from a JSON object.
///
/// Scalar values are converted to strings; `null`, objects and arrays are
/// dropped.
pub fn get_map(value: Option<&Value>) -> HashMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|object| {
            object
                .iter()
                .filter(|(_, v)| matches!(v, Value::String(_) | Value::Number(_) | Value::Bool(_)))
                .map(|(k, v)| (k.clone(), get_string(Some(v))))
                .collect()
        })
        .unwrap_or_default()
}

/// Extract a list of strings, e.g. labels.
pub fn get_string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|v| !v.is_null())
                .map(|v| get_string(Some(v)))
                .collect()
        })
        .unwrap_or_default()
}
