//! MCP tool parameter schemas
//!
//! All structs derive `Debug`, `Deserialize`, and `JsonSchema` as required by rmcp.

use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters for `list_domains` tool.
///
/// This tool takes no parameters, but we need an empty struct for the schema.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListDomainsParams {}

/// Parameters for `check_domain` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CheckDomainParams {
    #[schemars(description = "Domain to check (e.g. example.com)")]
    pub domain: String,
}

/// Parameters for `dns_list` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DnsListParams {
    #[schemars(description = "Domain whose DNS records to list")]
    pub domain: String,
}

/// Parameters for `dns_update` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DnsUpdateParams {
    #[schemars(description = "Domain the record belongs to")]
    pub domain: String,

    /// Record type; `type` on the wire.
    #[serde(rename = "type")]
    #[schemars(
        description = "Record type (A, AAAA, CNAME, ALIAS, MX, TXT, NS, SRV, TLSA, CAA, HTTPS, SVCB, SSHFP)"
    )]
    pub record_type: String,

    #[schemars(description = "Record content (IP address, target host, text)")]
    pub content: String,

    #[schemars(description = "Subdomain (optional, e.g. 'www'; omit for the apex)")]
    pub name: Option<String>,

    #[schemars(description = "TTL in seconds (optional)")]
    pub ttl: Option<u32>,

    #[schemars(description = "Priority for MX and SRV records (optional)")]
    pub prio: Option<u32>,
}

/// Parameters for `dns_delete` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DnsDeleteParams {
    #[schemars(description = "Domain the record belongs to")]
    pub domain: String,

    #[schemars(description = "Record ID as returned by dns_list")]
    pub record_id: String,
}
