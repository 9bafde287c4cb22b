//! File-backed credential store
//!
//! `{config_dir}/porkbun-cli/config.json`, owner read/write only on Unix.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::traits::CredentialStore;
use crate::types::StoredConfig;

const CONFIG_DIR_NAME: &str = "porkbun-cli";
const CONFIG_FILE_NAME: &str = "config.json";
/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "PORKBUN_CONFIG";
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Credential store reading and writing a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store at an explicit path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform default location.
    pub fn default_path() -> CoreResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                CoreError::Config("Cannot determine the user config directory".to_string())
            })
    }

    /// Resolve the location: explicit path, then `PORKBUN_CONFIG`, then the default.
    pub fn locate(explicit: Option<PathBuf>) -> CoreResult<Self> {
        if let Some(path) = explicit {
            return Ok(Self::new(path));
        }
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(Self::new(PathBuf::from(path)));
        }
        Self::default_path().map(Self::new)
    }

    async fn restrict_permissions(&self) -> CoreResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| {
                    CoreError::Io(format!(
                        "Failed to restrict permissions on {}: {e}",
                        self.path.display()
                    ))
                })?;
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> CoreResult<Option<StoredConfig>> {
        if !self.path.exists() {
            log::debug!("Config file does not exist: {}", self.path.display());
            return Ok(None);
        }

        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| CoreError::Config(format!("Failed to read config file metadata: {e}")))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(CoreError::Config(format!(
                "Config file too large: {} bytes (max: {MAX_CONFIG_FILE_SIZE} bytes)",
                metadata.len()
            )));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o077 != 0 {
                log::warn!(
                    "Config file {} is readable by other users; run `chmod 600` on it",
                    self.path.display()
                );
            }
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CoreError::Config(format!("Failed to read config file: {e}")))?;

        let config: StoredConfig = serde_json::from_str(&content).map_err(|e| {
            CoreError::Config(format!(
                "Invalid config file {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(Some(config))
    }

    async fn save(&self, config: &StoredConfig) -> CoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CoreError::Io(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;

        // Create empty and lock down before the secret is written
        tokio::fs::write(&self.path, b"")
            .await
            .map_err(|e| CoreError::Io(format!("Failed to write {}: {e}", self.path.display())))?;
        self.restrict_permissions().await?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| CoreError::Io(format!("Failed to write {}: {e}", self.path.display())))?;

        log::info!("Credentials saved to {}", self.path.display());
        Ok(())
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
