//! URL forwarding service

use std::sync::Arc;

use porkbun_api::{UrlForward, UrlForwardRequest, UrlForwardType};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;

/// URL forwarding service
pub struct UrlForwardService {
    ctx: Arc<ServiceContext>,
}

impl UrlForwardService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn list(&self, domain: &str) -> CoreResult<Vec<UrlForward>> {
        Ok(self.ctx.registrar.list_url_forwards(domain).await?)
    }

    /// Add a forward. `status_code` is the HTTP redirect code: 301 is permanent,
    /// 302 and 307 temporary.
    pub async fn set(
        &self,
        domain: &str,
        location: &str,
        subdomain: &str,
        status_code: u16,
        wildcard: bool,
        include_path: bool,
    ) -> CoreResult<()> {
        let forward_type = UrlForwardType::from_status_code(status_code).ok_or_else(|| {
            CoreError::Validation(format!(
                "unsupported redirect type {status_code} (use 301, 302 or 307)"
            ))
        })?;

        let location = location.trim();
        if !(location.starts_with("http://") || location.starts_with("https://")) {
            return Err(CoreError::Validation(format!(
                "forward location must be an http(s) URL, got '{location}'"
            )));
        }

        let request = UrlForwardRequest {
            subdomain: subdomain.trim().trim_end_matches('.').to_string(),
            location: location.to_string(),
            forward_type,
            include_path,
            wildcard,
        };
        self.ctx.registrar.add_url_forward(domain, &request).await?;
        log::info!(
            "Forwarding {}{domain} to {location} ({})",
            if request.subdomain.is_empty() {
                String::new()
            } else {
                format!("{}.", request.subdomain)
            },
            forward_type.as_str()
        );
        Ok(())
    }

    pub async fn delete(&self, domain: &str, forward_id: &str) -> CoreResult<()> {
        self.ctx
            .registrar
            .delete_url_forward(domain, forward_id)
            .await?;
        log::info!("Deleted URL forward {forward_id} from {domain}");
        Ok(())
    }
}
