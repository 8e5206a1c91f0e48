//! Serde helpers for the `scheduledFor` and `created` fields.
//!
//! Always written as RFC 3339. Reading also accepts naive ISO-8601 date-times
//! (interpreted as UTC) and epoch milliseconds.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Millis(i64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(text) => {
            parse(&text).ok_or_else(|| D::Error::custom(format!("invalid timestamp `{text}`")))
        }
        Raw::Millis(millis) => DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {millis}"))),
    }
}

/// Parse any accepted textual timestamp.
pub fn parse(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}
