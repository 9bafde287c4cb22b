//! Client helpers: HTTP client construction, name conversion, endpoint paths

use reqwest::Client;

use super::ClientConfig;
use crate::error::{ApiError, Result};
use crate::types::DnsRecordType;

// ============ HTTP Client ============

/// Create an HTTP client with the configured timeouts.
pub fn create_http_client(config: &ClientConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.timeout)
        .user_agent(concat!("porkbun-cli/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ApiError::NetworkError {
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ Name handling ============

/// Lower-case and strip the trailing dot.
fn normalize_domain_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Convert an FQDN to a name relative to `domain`.
///
/// `www.example.com` under `example.com` is `www`; the apex is `""`.
/// Names outside the domain are returned normalized but otherwise unchanged.
pub fn full_name_to_relative(full_name: &str, domain: &str) -> String {
    let full = normalize_domain_name(full_name);
    let zone = normalize_domain_name(domain);

    if full == zone || full == "@" || full.is_empty() {
        String::new()
    } else if let Some(sub) = full.strip_suffix(&format!(".{zone}")) {
        sub.to_string()
    } else {
        full
    }
}

/// Convert a relative name (`""` or `@` for the apex) to an FQDN under `domain`.
pub fn relative_to_full_name(relative_name: &str, domain: &str) -> String {
    let zone = normalize_domain_name(domain);
    let rel = relative_name.trim().trim_end_matches('.');

    if rel.is_empty() || rel == "@" {
        zone
    } else {
        format!("{}.{zone}", rel.to_ascii_lowercase())
    }
}

// ============ Endpoint paths ============

/// Single percent-encoded path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value.trim()).into_owned()
}

/// `{action}/{domain}/{type}[/{name}]` for the by-name-type family.
pub(crate) fn name_type_path(
    action: &str,
    domain: &str,
    record_type: DnsRecordType,
    name: &str,
) -> String {
    let mut path = format!("{action}/{}/{}", segment(domain), record_type.as_str());
    let name = name.trim();
    if !name.is_empty() && name != "@" {
        path.push('/');
        path.push_str(&segment(name));
    }
    path
}
