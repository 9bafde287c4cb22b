//! Type definitions

mod bulk;
mod config;

pub use bulk::{
    BulkAction, BulkDocument, BulkEntry, BulkFile, BulkFormat, BulkItemResult, BulkOperation,
    BulkOutcome, BulkRecord, BulkReport, BulkSummary, DeleteTarget, ValidationError,
};
pub use config::StoredConfig;

// Re-export the API crate's public types
pub use porkbun_api::{
    Credentials, DnsRecord, DnsRecordType, Domain, DomainPricing, DomainRegistration, PingResult,
    RecordSpec, RegistrationResult, SslBundle, UrlForward, UrlForwardRequest, UrlForwardType,
};
