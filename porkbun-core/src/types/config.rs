//! Persisted configuration

use serde::{Deserialize, Serialize};

use porkbun_api::Credentials;

/// Contents of the config file.
///
/// `{"apikey": "...", "secretapikey": "...", "timeoutSecs": 30}`; the timeout is
/// optional so files written by older versions keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredConfig {
    /// API key pair.
    #[serde(flatten)]
    pub credentials: Credentials,
    /// Request timeout override in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl StoredConfig {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            timeout_secs: None,
        }
    }
}
