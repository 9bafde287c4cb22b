//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

pub use porkbun_api::{ApiError, CredentialValidationError, ErrorKind};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No usable credentials, or the config file is unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential pair failed local validation.
    #[error("{0}")]
    CredentialValidation(CredentialValidationError),

    /// Invalid user input (record type, ttl, missing field, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A bulk file could not be read as JSON/CSV or lacks `records`.
    #[error("Bulk file error: {0}")]
    BulkFile(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Registrar API error.
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    /// Whether it is expected behaviour (user input, missing resource), used to pick the
    /// log level.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Config(_)
            | Self::CredentialValidation(_)
            | Self::Validation(_)
            | Self::BulkFile(_) => true,
            Self::Api(e) => e.is_expected(),
            Self::Io(_) | Self::Serialization(_) => false,
        }
    }

    /// Registrar error category, when this wraps an API error.
    #[must_use]
    pub fn api_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Api(e) => Some(e.kind()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<CredentialValidationError> for CoreError {
    fn from(e: CredentialValidationError) -> Self {
        Self::CredentialValidation(e)
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
