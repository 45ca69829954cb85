use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex_lite::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use static_init::dynamic;

use crate::constants::{ENVELOPE_LOG_TARGET, INVALID_DATE_LABEL, LONG_DATE_FMT, SHORT_DATE_FMT};
use crate::data_types::lenient::is_truthy;
use crate::errors::PortalError;

pub mod diet_parser;
pub mod meal_presentation;
pub mod progress_parser;
pub mod trend;

/// Reads the leading decimal literal of a measurement, the way the portal
/// forms always did: "80.5" and "80.5kg" are 80.5, "kg" is nothing.
pub fn parse_decimal(raw: &Value) -> Option<f64> {
    #[dynamic]
    static RE: Regex = Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap();

    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => RE
            .captures(s)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok()),
        _ => None,
    };

    value.filter(|v| v.is_finite())
}

/// Parses `dateRecorded`. Accepts RFC 3339 timestamps (normalized to UTC),
/// naive timestamps and plain dates.
pub fn parse_recorded_at(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn short_date_fmt(raw: &str) -> String {
    date_fmt(raw, SHORT_DATE_FMT)
}

pub fn long_date_fmt(raw: &str) -> String {
    date_fmt(raw, LONG_DATE_FMT)
}

fn date_fmt(raw: &str, fmt: &str) -> String {
    match parse_recorded_at(raw) {
        Some(dt) => dt.format(fmt).to_string(),
        None => INVALID_DATE_LABEL.to_string(),
    }
}

pub fn parse_body(text: &str) -> Result<Value, PortalError> {
    serde_json::from_str(text).map_err(|e| PortalError::InvalidBody(e.to_string()))
}

/// Flattens the backend's list envelopes: `{data: {data: [..]}}`,
/// `{data: [..]}` and a bare `[..]`. Anything else is an empty list.
pub fn unwrap_collection(body: Value) -> Vec<Value> {
    let inner = match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if is_truthy(&data) => data,
            _ => Value::Object(map),
        },
        other => other,
    };

    match inner {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Decodes every record on its own; a broken record is dropped, not the list.
pub fn decode_records<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!(target: ENVELOPE_LOG_TARGET, "Skipping record #{}: {}", idx, e);
                None
            }
        })
        .collect();

    log::debug!(target: ENVELOPE_LOG_TARGET, "Decoded {}/{} records", records.len(), total);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decimal_from_number_and_string() {
        assert_eq!(parse_decimal(&json!(80.5)), Some(80.5));
        assert_eq!(parse_decimal(&json!("80.50")), Some(80.5));
        assert_eq!(parse_decimal(&json!(" 72kg")), Some(72.0));
        assert_eq!(parse_decimal(&json!(".5")), Some(0.5));
    }

    #[test]
    fn malformed_decimal_is_missing() {
        assert_eq!(parse_decimal(&json!("abc")), None);
        assert_eq!(parse_decimal(&json!("")), None);
        assert_eq!(parse_decimal(&json!(true)), None);
        assert_eq!(parse_decimal(&json!({"kg": 80})), None);
    }

    #[test]
    fn recorded_at_formats() {
        let d = |s| parse_recorded_at(s).map(|dt| dt.to_string());
        assert_eq!(d("2024-03-01"), Some("2024-03-01 00:00:00".into()));
        assert_eq!(d("2024-03-01T10:30:00.000Z"), Some("2024-03-01 10:30:00".into()));
        assert_eq!(d("2024-03-01T23:30:00-02:00"), Some("2024-03-02 01:30:00".into()));
        assert_eq!(d("2024-03-01 08:15:00"), Some("2024-03-01 08:15:00".into()));
        assert_eq!(d("yesterday"), None);
    }

    #[test]
    fn date_labels() {
        assert_eq!(short_date_fmt("2024-01-05"), "Jan 5");
        assert_eq!(short_date_fmt("2024-12-25T09:00:00Z"), "Dec 25");
        assert_eq!(long_date_fmt("2024-03-01"), "March 1, 2024");
        assert_eq!(short_date_fmt("soon"), "Invalid Date");
    }

    #[test]
    fn envelopes_unwrap() {
        let items = json!([{"id": 1}, {"id": 2}]);
        assert_eq!(unwrap_collection(json!({"data": {"data": items.clone()}})).len(), 2);
        assert_eq!(unwrap_collection(json!({"data": items.clone()})).len(), 2);
        assert_eq!(unwrap_collection(items).len(), 2);
        assert!(unwrap_collection(json!({})).is_empty());
        assert!(unwrap_collection(json!({"data": null})).is_empty());
        assert!(unwrap_collection(json!({"data": {"total": 3}})).is_empty());
        assert!(unwrap_collection(json!("nope")).is_empty());
    }

    #[test]
    fn broken_records_are_skipped() {
        #[derive(serde::Deserialize)]
        struct Row {
            id: u32,
        }
        let rows: Vec<Row> = decode_records(vec![json!({"id": 1}), json!("x"), json!({"id": 3})]);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn invalid_body_is_an_error() {
        assert!(matches!(parse_body("{"), Err(PortalError::InvalidBody(_))));
    }
}
