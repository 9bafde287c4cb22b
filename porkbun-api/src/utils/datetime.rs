//! Serde helpers for the registrar's loosely typed fields.
//!
//! The API returns `"2024-03-01 12:00:00"` style timestamps, numbers encoded as
//! strings (`"ttl": "600"`), and flags as `1`, `"1"`, `"yes"` or `true`
//! depending on the endpoint.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Timestamp format used by `domain/listAll`.
const REGISTRAR_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a registrar timestamp (UTC assumed), accepting RFC 3339 as well.
pub fn parse_registrar_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(s, REGISTRAR_FORMAT)
        .map(|naive| naive.and_utc())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

/// Serialize `Option<DateTime<Utc>>` as an RFC 3339 string.
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// Deserialize a registrar timestamp; unparseable or empty values become `None`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_registrar_timestamp))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Str(String),
    U64(u64),
    I64(i64),
    F64(f64),
    Bool(bool),
}

/// Deserialize `"600"`, `600`, `""` or `null` into `Option<u32>`.
///
/// Empty strings map to `None`; anything non-numeric is an error.
pub fn deserialize_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Loose::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(Loose::Str(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|e| Error::custom(format!("invalid number '{s}': {e}"))),
        Some(Loose::U64(n)) => u32::try_from(n)
            .map(Some)
            .map_err(|_| Error::custom(format!("number out of range: {n}"))),
        Some(Loose::I64(n)) => u32::try_from(n)
            .map(Some)
            .map_err(|_| Error::custom(format!("number out of range: {n}"))),
        Some(Loose::F64(_) | Loose::Bool(_)) => Err(Error::custom("expected an integer")),
    }
}

/// Deserialize an id that may arrive as a string or a number.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Loose::deserialize(deserializer)? {
        Loose::Str(s) => Ok(s),
        Loose::U64(n) => Ok(n.to_string()),
        Loose::I64(n) => Ok(n.to_string()),
        Loose::F64(_) | Loose::Bool(_) => Err(Error::custom("expected a string or integer id")),
    }
}

/// Deserialize a flag sent as `1`/`0`, `"1"`/`"0"`, `"yes"`/`"no"` or a bool.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        None => false,
        Some(Loose::Bool(b)) => b,
        Some(Loose::U64(n)) => n != 0,
        Some(Loose::I64(n)) => n != 0,
        Some(Loose::F64(n)) => n != 0.0,
        Some(Loose::Str(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "yes" | "true" | "on"
        ),
    })
}
