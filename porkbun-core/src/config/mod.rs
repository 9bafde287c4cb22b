//! Configuration resolution
//!
//! Values come from, in order of precedence: command-line flags, environment
//! variables, the config file, built-in defaults. The result is an explicit
//! [`AppConfig`] handed to constructors; nothing is global.

mod file_store;

use std::path::PathBuf;
use std::time::Duration;

pub use file_store::{CONFIG_PATH_ENV, FileCredentialStore};

use porkbun_api::{ClientConfig, Credentials};

use crate::error::{CoreError, CoreResult};
use crate::traits::CredentialStore;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "PORKBUN_API_KEY";
/// Environment variable holding the secret API key.
pub const SECRET_KEY_ENV: &str = "PORKBUN_SECRET_KEY";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "PORKBUN_TIMEOUT";

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub config_path: Option<PathBuf>,
}

/// Everything needed to build a client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub client: ClientConfig,
}

impl AppConfig {
    /// Resolve against the process environment.
    pub async fn resolve(
        overrides: &ConfigOverrides,
        store: &dyn CredentialStore,
    ) -> CoreResult<Self> {
        Self::resolve_with(overrides, store, |key| std::env::var(key).ok()).await
    }

    /// Resolve with an explicit environment lookup.
    pub async fn resolve_with<F>(
        overrides: &ConfigOverrides,
        store: &dyn CredentialStore,
        env: F,
    ) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let mut api_key = overrides.api_key.clone().or_else(|| env(API_KEY_ENV));
        let mut secret_key = overrides.secret_key.clone().or_else(|| env(SECRET_KEY_ENV));
        let mut timeout_secs = match overrides.timeout_secs {
            Some(secs) => Some(secs),
            None => env(TIMEOUT_ENV).map(|raw| parse_timeout(&raw)).transpose()?,
        };

        let credentials_complete = api_key.is_some() && secret_key.is_some();
        if !credentials_complete || timeout_secs.is_none() {
            match store.load().await {
                Ok(Some(stored)) => {
                    api_key = api_key.or(Some(stored.credentials.api_key));
                    secret_key = secret_key.or(Some(stored.credentials.secret_api_key));
                    timeout_secs = timeout_secs.or(stored.timeout_secs);
                }
                Ok(None) => {}
                // The file is only optional when it has nothing left to contribute
                Err(e) if credentials_complete => {
                    log::warn!("Ignoring unreadable config file: {e}");
                }
                Err(e) => return Err(e),
            }
        }

        let (Some(api_key), Some(secret_key)) = (api_key, secret_key) else {
            return Err(CoreError::Config(format!(
                "No API credentials found. Run `porkbun configure` or set {API_KEY_ENV} and {SECRET_KEY_ENV}"
            )));
        };

        let credentials = Credentials::new(api_key, secret_key);
        credentials.validate()?;

        let mut client = ClientConfig::default();
        if let Some(secs) = timeout_secs {
            if secs == 0 {
                return Err(CoreError::Config("Timeout must be at least 1 second".to_string()));
            }
            client = client.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            credentials,
            client,
        })
    }
}

fn parse_timeout(raw: &str) -> CoreResult<u64> {
    raw.trim().parse::<u64>().map_err(|_| {
        CoreError::Config(format!("{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::test_utils::MockCredentialStore;
    use crate::types::StoredConfig;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn stored(api: &str, secret: &str, timeout: Option<u64>) -> StoredConfig {
        StoredConfig {
            credentials: Credentials::new(api, secret),
            timeout_secs: timeout,
        }
    }

    #[tokio::test]
    async fn file_only() {
        let store = MockCredentialStore::with(stored("pk1_file", "sk1_file", Some(12)));
        let config = AppConfig::resolve_with(&ConfigOverrides::default(), &store, env_of(&[]))
            .await
            .unwrap();
        assert_eq!(config.credentials.api_key, "pk1_file");
        assert_eq!(config.client.timeout, Duration::from_secs(12));
    }

    #[tokio::test]
    async fn env_beats_file() {
        let store = MockCredentialStore::with(stored("pk1_file", "sk1_file", None));
        let env = env_of(&[(API_KEY_ENV, "pk1_env"), (SECRET_KEY_ENV, "sk1_env")]);
        let config = AppConfig::resolve_with(&ConfigOverrides::default(), &store, env)
            .await
            .unwrap();
        assert_eq!(config.credentials.api_key, "pk1_env");
        assert_eq!(config.credentials.secret_api_key, "sk1_env");
    }

    #[tokio::test]
    async fn flags_beat_env() {
        let store = MockCredentialStore::new();
        let env = env_of(&[
            (API_KEY_ENV, "pk1_env"),
            (SECRET_KEY_ENV, "sk1_env"),
            (TIMEOUT_ENV, "5"),
        ]);
        let overrides = ConfigOverrides {
            api_key: Some("pk1_flag".into()),
            timeout_secs: Some(90),
            ..ConfigOverrides::default()
        };
        let config = AppConfig::resolve_with(&overrides, &store, env).await.unwrap();
        assert_eq!(config.credentials.api_key, "pk1_flag");
        assert_eq!(config.credentials.secret_api_key, "sk1_env");
        assert_eq!(config.client.timeout, Duration::from_secs(90));
    }

    #[tokio::test]
    async fn default_timeout_when_unset() {
        let store = MockCredentialStore::with(stored("pk1_a", "sk1_b", None));
        let config = AppConfig::resolve_with(&ConfigOverrides::default(), &store, env_of(&[]))
            .await
            .unwrap();
        assert_eq!(config.client.timeout, ClientConfig::default().timeout);
    }

    #[tokio::test]
    async fn missing_credentials_is_config_error() {
        let store = MockCredentialStore::new();
        let err = AppConfig::resolve_with(&ConfigOverrides::default(), &store, env_of(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)), "got {err:?}");
        assert!(err.to_string().contains("porkbun configure"));
    }

    #[tokio::test]
    async fn bad_timeout_env_is_rejected() {
        let store = MockCredentialStore::with(stored("pk1_a", "sk1_b", None));
        let env = env_of(&[(TIMEOUT_ENV, "soon")]);
        let err = AppConfig::resolve_with(&ConfigOverrides::default(), &store, env)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[tokio::test]
    async fn blank_env_values_are_ignored() {
        let store = MockCredentialStore::with(stored("pk1_file", "sk1_file", None));
        let env = env_of(&[(API_KEY_ENV, "  ")]);
        let config = AppConfig::resolve_with(&ConfigOverrides::default(), &store, env)
            .await
            .unwrap();
        assert_eq!(config.credentials.api_key, "pk1_file");
    }

    #[tokio::test]
    async fn identical_keys_fail_validation() {
        let store = MockCredentialStore::new();
        let env = env_of(&[(API_KEY_ENV, "same"), (SECRET_KEY_ENV, "same")]);
        let err = AppConfig::resolve_with(&ConfigOverrides::default(), &store, env)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::CredentialValidation(_)));
    }

    #[tokio::test]
    async fn broken_file_ignored_when_env_complete() {
        let store = MockCredentialStore::failing("corrupt");
        let env = env_of(&[(API_KEY_ENV, "pk1_env"), (SECRET_KEY_ENV, "sk1_env")]);
        let config = AppConfig::resolve_with(&ConfigOverrides::default(), &store, env)
            .await
            .unwrap();
        assert_eq!(config.credentials.api_key, "pk1_env");
    }
}
