//! Porkbun error mapping
//!
//! The registrar has no error codes: every failure is `status: ERROR` plus a
//! free-text `message`. Classification uses the HTTP status first, then the message.

use crate::error::ApiError;
use crate::traits::{ErrorContext, ErrorMapper, RawApiError};

use super::PorkbunClient;

const AUTH_PHRASES: &[&str] = &[
    "api key",
    "apikey",
    "api access",
    "authentication",
    "unauthorized",
    "not opted in",
];

const RATE_LIMIT_PHRASES: &[&str] = &[
    "rate limit",
    "rate-limit",
    "ratelimit",
    "too many requests",
    "limit exceeded",
];

const NOT_FOUND_PHRASES: &[&str] = &[
    "not found",
    "does not exist",
    "invalid domain",
    "invalid record",
    "unable to find",
    "no record",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

impl ErrorMapper for PorkbunClient {
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ApiError {
        map_registrar_error(raw, context)
    }
}

/// Free function so the mapping is testable without a client.
pub(crate) fn map_registrar_error(raw: RawApiError, context: ErrorContext) -> ApiError {
    let lower = raw.message.to_ascii_lowercase();

    match raw.http_status {
        Some(401 | 403) => {
            return ApiError::InvalidCredentials {
                raw_message: Some(raw.message),
            };
        }
        Some(404) => return not_found(raw, context, &lower),
        Some(429) => {
            return ApiError::RateLimited {
                retry_after: None,
                raw_message: Some(raw.message),
            };
        }
        Some(code @ 500..=599) => {
            return ApiError::NetworkError {
                detail: format!("HTTP {code}: {}", raw.message),
            };
        }
        _ => {}
    }

    if contains_any(&lower, AUTH_PHRASES) {
        ApiError::InvalidCredentials {
            raw_message: Some(raw.message),
        }
    } else if contains_any(&lower, RATE_LIMIT_PHRASES) {
        ApiError::RateLimited {
            retry_after: None,
            raw_message: Some(raw.message),
        }
    } else if contains_any(&lower, NOT_FOUND_PHRASES) {
        not_found(raw, context, &lower)
    } else {
        ApiError::Unknown {
            http_status: raw.http_status,
            raw_message: raw.message,
        }
    }
}

/// Decide between a missing record and a missing domain.
fn not_found(raw: RawApiError, context: ErrorContext, lower: &str) -> ApiError {
    let mentions_record = lower.contains("record") || lower.contains("forward");
    let mentions_domain = lower.contains("domain");

    match (context.record_id, context.domain) {
        (Some(record_id), _) if mentions_record || !mentions_domain => ApiError::RecordNotFound {
            record_id,
            raw_message: Some(raw.message),
        },
        (_, domain) => ApiError::DomainNotFound {
            domain: domain.unwrap_or_else(|| "<unknown>".to_string()),
            raw_message: Some(raw.message),
        },
    }
}
