//! Domain management service

use std::sync::Arc;

use porkbun_api::{Domain, DomainPricing, DomainRegistration, PingResult, RegistrationResult};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;

/// Domain management service
pub struct DomainService {
    ctx: Arc<ServiceContext>,
}

impl DomainService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Verify the credentials.
    pub async fn ping(&self) -> CoreResult<PingResult> {
        Ok(self.ctx.registrar.ping().await?)
    }

    /// All domains in the account, sorted by name.
    pub async fn list_domains(&self) -> CoreResult<Vec<Domain>> {
        let mut domains = self.ctx.registrar.list_domains().await?;
        domains.sort_by(|a, b| a.domain.cmp(&b.domain));
        Ok(domains)
    }

    /// Availability and pricing.
    pub async fn check_domain(&self, domain: &str) -> CoreResult<DomainPricing> {
        Ok(self.ctx.registrar.check_domain(&normalize(domain)?).await?)
    }

    /// Register a domain. The caller is responsible for confirming the purchase.
    pub async fn buy_domain(
        &self,
        domain: &str,
        options: &DomainRegistration,
    ) -> CoreResult<RegistrationResult> {
        let domain = normalize(domain)?;
        log::info!("Registering {domain}");
        let result = self.ctx.registrar.register_domain(&domain, options).await?;
        log::info!("Registered {domain}, invoice {:?}", result.invoice_id);
        Ok(result)
    }

    pub async fn get_nameservers(&self, domain: &str) -> CoreResult<Vec<String>> {
        Ok(self.ctx.registrar.get_nameservers(&normalize(domain)?).await?)
    }

    /// Replace the nameserver set.
    pub async fn set_nameservers(&self, domain: &str, nameservers: &[String]) -> CoreResult<()> {
        let nameservers: Vec<String> = nameservers
            .iter()
            .map(|ns| ns.trim().trim_end_matches('.').to_ascii_lowercase())
            .filter(|ns| !ns.is_empty())
            .collect();
        if nameservers.is_empty() {
            return Err(CoreError::Validation(
                "at least one nameserver is required".to_string(),
            ));
        }
        if let Some(bad) = nameservers.iter().find(|ns| !ns.contains('.')) {
            return Err(CoreError::Validation(format!(
                "'{bad}' is not a fully qualified host name"
            )));
        }

        let domain = normalize(domain)?;
        self.ctx
            .registrar
            .update_nameservers(&domain, &nameservers)
            .await?;
        log::info!("Nameservers for {domain} set to {}", nameservers.join(", "));
        Ok(())
    }
}

/// Lower-case, strip a trailing dot, reject empty names.
pub(crate) fn normalize(domain: &str) -> CoreResult<String> {
    let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
    if domain.is_empty() || !domain.contains('.') {
        return Err(CoreError::Validation(format!(
            "'{domain}' is not a domain name"
        )));
    }
    Ok(domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_context;

    #[tokio::test]
    async fn list_is_sorted() {
        let (ctx, registrar) = mock_context("zeta.dev").await;
        registrar.add_domain("alpha.io").await;

        let domains = DomainService::new(ctx).list_domains().await.unwrap();
        let names: Vec<&str> = domains.iter().map(|d| d.domain.as_str()).collect();
        assert_eq!(names, vec!["alpha.io", "zeta.dev"]);
    }

    #[tokio::test]
    async fn set_nameservers_normalizes() {
        let (ctx, registrar) = mock_context("example.com").await;
        let service = DomainService::new(ctx);

        service
            .set_nameservers(
                "Example.com.",
                &["NS1.Example.net.".to_string(), " ns2.example.net ".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(
            service.get_nameservers("example.com").await.unwrap(),
            vec!["ns1.example.net", "ns2.example.net"]
        );
        assert_eq!(
            registrar.mutating_calls().await,
            vec!["domain/updateNs/example.com"]
        );
    }

    #[tokio::test]
    async fn empty_nameserver_list_rejected() {
        let (ctx, registrar) = mock_context("example.com").await;
        let err = DomainService::new(ctx)
            .set_nameservers("example.com", &[" ".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(registrar.calls().await.is_empty());
    }

    #[tokio::test]
    async fn buy_registers_domain() {
        let (ctx, registrar) = mock_context("example.com").await;
        let result = DomainService::new(ctx)
            .buy_domain("new-name.dev", &DomainRegistration::default())
            .await
            .unwrap();
        assert_eq!(result.domain, "new-name.dev");
        assert!(result.invoice_id.is_some());
        assert_eq!(registrar.mutating_calls().await, vec!["domain/create/new-name.dev"]);
    }

    #[test]
    fn normalize_rejects_bare_labels() {
        assert_eq!(normalize(" Example.COM. ").unwrap(), "example.com");
        assert!(normalize("localhost").is_err());
        assert!(normalize("").is_err());
    }
}
