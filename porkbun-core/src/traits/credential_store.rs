//! Credential storage abstraction

use std::path::Path;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::StoredConfig;

/// Persistent home of the API key pair (plus optional settings).
///
/// Implementations:
/// - `FileCredentialStore`: JSON file in the user's config directory
/// - `MockCredentialStore` (tests): in memory
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the stored configuration.
    ///
    /// # Returns
    /// * `Ok(Some(config))` - a configuration exists
    /// * `Ok(None)` - nothing has been configured yet
    async fn load(&self) -> CoreResult<Option<StoredConfig>>;

    /// Persist the configuration, replacing any previous one.
    async fn save(&self, config: &StoredConfig) -> CoreResult<()>;

    /// Backing location, for user-facing messages.
    fn path(&self) -> Option<&Path>;
}
