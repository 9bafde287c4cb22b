//! Porkbun v3 client

mod api;
mod common;
mod error;
mod http;
mod types;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Credentials;

pub use common::{full_name_to_relative, relative_to_full_name};

pub(crate) use common::create_http_client;

/// Production endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.porkbun.com/api/json/v3";
/// Default connect timeout (seconds)
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default total request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Transport settings for [`PorkbunClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// API root without trailing slash. Tests point this at a mock server.
    pub base_url: String,
    /// Total per-request timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Registrar client holding the key pair and a pooled HTTP client.
pub struct PorkbunClient {
    pub(crate) client: Client,
    pub(crate) credentials: Credentials,
    pub(crate) base_url: String,
}

impl PorkbunClient {
    /// Build a client. Fails only if the TLS backend cannot be initialised.
    pub fn new(credentials: Credentials, config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client(config)?,
            credentials,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl std::fmt::Debug for PorkbunClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PorkbunClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
