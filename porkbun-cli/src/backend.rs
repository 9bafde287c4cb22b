//! Service wiring
//!
//! Resolves configuration, builds the API client and hands out the core
//! services the commands call.

use std::sync::Arc;

use anyhow::Result;
use porkbun_api::PorkbunClient;
use porkbun_core::services::{
    BulkService, DnsService, DomainService, ServiceContext, SslService, UrlForwardService,
};
use porkbun_core::{AppConfig, ConfigOverrides, FileCredentialStore};

/// Core services bound to one registrar client.
pub struct CoreService {
    ctx: Arc<ServiceContext>,
}

impl CoreService {
    /// Resolve credentials (flag > env > config file) and build a live client.
    pub async fn connect(overrides: &ConfigOverrides) -> Result<Self> {
        let store = FileCredentialStore::locate(overrides.config_path.clone())?;
        let config = AppConfig::resolve(overrides, &store).await?;
        let client = PorkbunClient::new(config.credentials, &config.client)?;
        log::debug!("Client ready, timeout {:?}", config.client.timeout);
        Ok(Self::from_context(Arc::new(ServiceContext::new(Arc::new(
            client,
        )))))
    }

    pub fn from_context(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub fn domain(&self) -> DomainService {
        DomainService::new(self.ctx.clone())
    }

    pub fn dns(&self) -> DnsService {
        DnsService::new(self.ctx.clone())
    }

    pub fn url_forward(&self) -> UrlForwardService {
        UrlForwardService::new(self.ctx.clone())
    }

    pub fn ssl(&self) -> SslService {
        SslService::new(self.ctx.clone())
    }

    pub fn bulk(&self) -> BulkService {
        BulkService::new(self.ctx.clone())
    }
}
