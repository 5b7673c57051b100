use chrono::{Duration, NaiveDateTime, Timelike};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

pub const RAW_INDENT: &[u8] = b"    ";
pub const DOCUMENT_INDENT: &[u8] = b"  ";

pub fn to_pretty_json(value: &Value, indent: &[u8]) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Copy of `value` with the keys of every nested object in ascending order.
pub fn sorted_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), sorted_keys(value)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted_keys).collect()),
        other => other.clone(),
    }
}

/// `YYYY-MM-DDTHH:MM:SS`, plus `.ffffff` only when there are microseconds.
pub fn format_iso(instant: &NaiveDateTime) -> String {
    if instant.nanosecond() / 1_000 == 0 {
        instant.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        instant.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

pub fn format_summary_time(instant: &NaiveDateTime) -> String {
    instant.format("%d-%m-%Y %I:%M %p").to_string()
}

/// Whole days between `start` and `end`, rounded down (so negative spans
/// round away from zero).
pub fn whole_days(start: &NaiveDateTime, end: &NaiveDateTime) -> i64 {
    let span = *end - *start;
    let days = span.num_days();
    if span < Duration::days(days) {
        days - 1
    } else {
        days
    }
}
