use serde::{Deserialize, Serialize};

/// Coarse classification of an [`ApiError`].
///
/// Callers that only need to decide how to report a failure (exit code, log level,
/// bulk outcome text) match on this instead of the full variant set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// The registrar rejected or did not receive the API key pair.
    Auth,
    /// The target domain or record does not exist.
    NotFound,
    /// The registrar throttled the request.
    RateLimit,
    /// Connectivity failure, timeout, or an unreadable response.
    Transport,
    /// Any other error reported by the registrar (`status: ERROR`).
    Api,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth => write!(f, "auth"),
            Self::NotFound => write!(f, "not-found"),
            Self::RateLimit => write!(f, "rate-limit"),
            Self::Transport => write!(f, "transport"),
            Self::Api => write!(f, "api"),
        }
    }
}

/// Unified error type for all registrar API operations.
///
/// Every variant is serializable for structured error reporting (the CLI's
/// `--json` output and the MCP server both forward it).
///
/// No variant is retried automatically: a failure surfaces immediately to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A network-level error occurred (DNS resolution failure, connection refused,
    /// HTTP 5xx from an intermediary, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The API key pair is missing, invalid, or not enabled for API access.
    InvalidCredentials {
        /// Original error message from the registrar, if available.
        raw_message: Option<String>,
    },

    /// The domain is not in the account or does not exist.
    DomainNotFound {
        /// Domain name that was not found.
        domain: String,
        /// Original error message from the registrar, if available.
        raw_message: Option<String>,
    },

    /// The specified DNS record or URL forward was not found.
    RecordNotFound {
        /// ID (or name/type description) of the record that was not found.
        record_id: String,
        /// Original error message from the registrar, if available.
        raw_message: Option<String>,
    },

    /// The registrar throttled the request (HTTP 429 or equivalent message).
    RateLimited {
        /// Suggested wait time in seconds, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the registrar, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the registrar's response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// An error reported by the registrar that is not mapped to a specific variant.
    Unknown {
        /// HTTP status code of the response, if any.
        http_status: Option<u16>,
        /// Raw error message from the registrar.
        raw_message: String,
    },
}

impl ApiError {
    /// Classify this error into the coarse [`ErrorKind`] taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCredentials { .. } => ErrorKind::Auth,
            Self::DomainNotFound { .. } | Self::RecordNotFound { .. } => ErrorKind::NotFound,
            Self::RateLimited { .. } => ErrorKind::RateLimit,
            Self::NetworkError { .. }
            | Self::Timeout { .. }
            | Self::ParseError { .. }
            | Self::SerializationError { .. } => ErrorKind::Transport,
            Self::Unknown { .. } => ErrorKind::Api,
        }
    }

    /// Whether this is expected behaviour (bad input, missing resource), used to pick the
    /// log level.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::DomainNotFound { .. }
                | Self::RecordNotFound { .. }
                | Self::RateLimited { .. }
                | Self::Unknown { .. }
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::InvalidCredentials { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Invalid credentials: {msg}")
                } else {
                    write!(f, "Invalid credentials")
                }
            }
            Self::DomainNotFound {
                domain,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "Domain '{domain}' not found: {msg}")
                } else {
                    write!(f, "Domain '{domain}' not found")
                }
            }
            Self::RecordNotFound {
                record_id,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "Record '{record_id}' not found: {msg}")
                } else {
                    write!(f, "Record '{record_id}' not found")
                }
            }
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "Rate limited")
                }
            }
            Self::ParseError { detail } => write!(f, "Malformed response: {detail}"),
            Self::SerializationError { detail } => write!(f, "Serialization error: {detail}"),
            Self::Unknown { raw_message, .. } => write!(f, "Porkbun API error: {raw_message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ApiError::NetworkError {
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "Network error: connection refused");
    }

    #[test]
    fn display_invalid_credentials_with_message() {
        let e = ApiError::InvalidCredentials {
            raw_message: Some("Invalid API key. (002)".to_string()),
        };
        assert_eq!(e.to_string(), "Invalid credentials: Invalid API key. (002)");
    }

    #[test]
    fn display_invalid_credentials_without_message() {
        let e = ApiError::InvalidCredentials { raw_message: None };
        assert_eq!(e.to_string(), "Invalid credentials");
    }

    #[test]
    fn display_domain_not_found() {
        let e = ApiError::DomainNotFound {
            domain: "example.com".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "Domain 'example.com' not found");
    }

    #[test]
    fn display_record_not_found_with_message() {
        let e = ApiError::RecordNotFound {
            record_id: "123".to_string(),
            raw_message: Some("no such record".to_string()),
        };
        assert_eq!(e.to_string(), "Record '123' not found: no such record");
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = ApiError::RateLimited {
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "Rate limited (retry after 30s)");
    }

    #[test]
    fn display_rate_limited_without_retry() {
        let e = ApiError::RateLimited {
            retry_after: None,
            raw_message: None,
        };
        assert_eq!(e.to_string(), "Rate limited");
    }

    #[test]
    fn display_unknown() {
        let e = ApiError::Unknown {
            http_status: Some(400),
            raw_message: "something broke".to_string(),
        };
        assert_eq!(e.to_string(), "Porkbun API error: something broke");
    }

    #[test]
    fn kind_classification() {
        assert_eq!(
            ApiError::InvalidCredentials { raw_message: None }.kind(),
            ErrorKind::Auth
        );
        assert_eq!(
            ApiError::RecordNotFound {
                record_id: "1".into(),
                raw_message: None
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ApiError::RateLimited {
                retry_after: None,
                raw_message: None
            }
            .kind(),
            ErrorKind::RateLimit
        );
        assert_eq!(
            ApiError::Timeout {
                detail: "30s".into()
            }
            .kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            ApiError::ParseError {
                detail: "eof".into()
            }
            .kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            ApiError::Unknown {
                http_status: None,
                raw_message: "x".into()
            }
            .kind(),
            ErrorKind::Api
        );
    }

    #[test]
    fn transport_errors_are_not_expected() {
        assert!(
            !ApiError::NetworkError {
                detail: "x".into()
            }
            .is_expected()
        );
        assert!(ApiError::InvalidCredentials { raw_message: None }.is_expected());
    }

    #[test]
    fn serialize_carries_code_tag() {
        let e = ApiError::RateLimited {
            retry_after: Some(60),
            raw_message: Some("too many requests".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }
}
