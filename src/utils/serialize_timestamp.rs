use chrono::{DateTime, Utc};

/// Serializes unix seconds as an RFC 3339 string.
pub fn serialize_timestamp<S>(timestamp: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match DateTime::<Utc>::from_timestamp(*timestamp, 0) {
        Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
        None => Err(serde::ser::Error::custom(format!(
            "timestamp out of range: {timestamp}"
        ))),
    }
}
