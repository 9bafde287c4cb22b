use async_trait::async_trait;

use crate::error::{ApiError, Result};
use crate::types::{
    DnsRecord, DnsRecordType, Domain, DomainPricing, DomainRegistration, PingResult, RecordSpec,
    RegistrationResult, SslBundle, UrlForward, UrlForwardRequest,
};

/// Raw registrar error (internal)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status of the response carrying the error.
    pub http_status: Option<u16>,
    /// `message` field of the `status: ERROR` envelope.
    pub message: String,
}

impl RawApiError {
    pub fn with_status(http_status: u16, message: impl Into<String>) -> Self {
        Self {
            http_status: Some(http_status),
            message: message.into(),
        }
    }
}

/// What the failing call was about, so a bare message can name its target.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record id (or `type/name` for by-name-type calls).
    pub record_id: Option<String>,
    /// Domain the call targeted.
    pub domain: Option<String>,
}

impl ErrorContext {
    pub fn domain(domain: &str) -> Self {
        Self {
            record_id: None,
            domain: Some(domain.to_string()),
        }
    }

    pub fn record(domain: &str, record_id: impl Into<String>) -> Self {
        Self {
            record_id: Some(record_id.into()),
            domain: Some(domain.to_string()),
        }
    }
}

/// Maps raw registrar errors onto [`ApiError`] (internal)
pub(crate) trait ErrorMapper {
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ApiError;

    fn parse_error(&self, detail: impl ToString) -> ApiError {
        ApiError::ParseError {
            detail: detail.to_string(),
        }
    }
}

/// Operations offered by the registrar.
///
/// `domain` arguments are bare domain names (`example.com`). Record names in
/// [`RecordSpec`] are relative; returned [`DnsRecord`]s carry the FQDN the
/// registrar reports.
#[async_trait]
pub trait RegistrarApi: Send + Sync {
    /// Authenticated no-op; verifies the key pair and reports the caller's IP.
    async fn ping(&self) -> Result<PingResult>;

    /// Every domain in the account.
    async fn list_domains(&self) -> Result<Vec<Domain>>;

    /// Availability and pricing for a domain.
    async fn check_domain(&self, domain: &str) -> Result<DomainPricing>;

    /// Buy a domain. Charges the account balance.
    async fn register_domain(
        &self,
        domain: &str,
        options: &DomainRegistration,
    ) -> Result<RegistrationResult>;

    async fn get_nameservers(&self, domain: &str) -> Result<Vec<String>>;

    /// Replace the authoritative nameserver set.
    async fn update_nameservers(&self, domain: &str, nameservers: &[String]) -> Result<()>;

    async fn retrieve_ssl(&self, domain: &str) -> Result<SslBundle>;

    /// All DNS records of a domain, in registrar order.
    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>>;

    /// Records of one type, optionally restricted to a relative name.
    async fn list_records_by_name_type(
        &self,
        domain: &str,
        record_type: DnsRecordType,
        name: &str,
    ) -> Result<Vec<DnsRecord>>;

    /// Create a record and return its new id.
    async fn create_record(&self, domain: &str, spec: &RecordSpec) -> Result<String>;

    async fn edit_record(&self, domain: &str, record_id: &str, spec: &RecordSpec) -> Result<()>;

    /// Edit every record matching the record type and name in `spec`.
    async fn edit_records_by_name_type(&self, domain: &str, spec: &RecordSpec) -> Result<()>;

    async fn delete_record(&self, domain: &str, record_id: &str) -> Result<()>;

    /// Delete every record with the given type and relative name.
    async fn delete_records_by_name_type(
        &self,
        domain: &str,
        record_type: DnsRecordType,
        name: &str,
    ) -> Result<()>;

    async fn list_url_forwards(&self, domain: &str) -> Result<Vec<UrlForward>>;

    async fn add_url_forward(&self, domain: &str, request: &UrlForwardRequest) -> Result<()>;

    async fn delete_url_forward(&self, domain: &str, forward_id: &str) -> Result<()>;
}
