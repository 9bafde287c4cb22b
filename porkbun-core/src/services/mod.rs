//! Business logic service layer

mod bulk_service;
mod dns_service;
mod domain_service;
mod ssl_service;
mod url_forward_service;

pub use bulk_service::BulkService;
pub use dns_service::{DnsService, UpsertOutcome, UpsertPlan, plan_upsert};
pub use domain_service::DomainService;
pub use ssl_service::{SslFiles, SslService};
pub use url_forward_service::UrlForwardService;

use std::sync::Arc;

use porkbun_api::RegistrarApi;

/// Service context - holds every dependency
///
/// Binaries build the registrar client from the resolved configuration and hand it
/// in here; tests hand in a mock.
pub struct ServiceContext {
    /// Registrar API client
    pub registrar: Arc<dyn RegistrarApi>,
}

impl ServiceContext {
    #[must_use]
    pub fn new(registrar: Arc<dyn RegistrarApi>) -> Self {
        Self { registrar }
    }
}
