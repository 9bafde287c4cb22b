//! Log sanitization
//!
//! Request bodies carry the API key pair and SSL responses carry private keys.
//! Nothing leaves this crate through `log` without passing one of these helpers.

/// Maximum number of bytes of a body included in a log line.
const TRUNCATE_LIMIT: usize = 256;

/// Placeholder written in place of secret values.
const REDACTED: &str = "***";

/// JSON keys whose string values are never logged.
const SECRET_KEYS: &[&str] = &["apikey", "secretapikey", "privatekey"];

/// Largest char boundary `<= index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Truncate a string for logging.
///
/// Bodies within the limit are returned unchanged; longer ones keep the first
/// `TRUNCATE_LIMIT` bytes (on a char boundary) plus the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Serialize a JSON body for logging with every secret value replaced.
///
/// Only top-level keys are inspected; the registrar never nests credentials.
pub fn redact_body(body: &serde_json::Value) -> String {
    let mut copy = body.clone();
    if let Some(map) = copy.as_object_mut() {
        for key in SECRET_KEYS {
            if let Some(v) = map.get_mut(*key) {
                *v = serde_json::Value::String(REDACTED.to_string());
            }
        }
    }
    truncate_for_log(&copy.to_string())
}
