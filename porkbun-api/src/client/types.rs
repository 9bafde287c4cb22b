//! Porkbun wire types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::datetime::{deserialize_flag, deserialize_id, deserialize_opt_u32};

// ============ Responses ============

/// DNS record as returned by `dns/retrieve*`
#[derive(Debug, Deserialize)]
pub struct PorkbunRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_opt_u32")]
    pub ttl: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_opt_u32")]
    pub prio: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub records: Vec<PorkbunRecord>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecordResponse {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct PingResponse {
    #[serde(rename = "yourIp", default)]
    pub your_ip: String,
}

/// Domain entry of `domain/listAll`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PorkbunDomain {
    pub domain: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tld: Option<String>,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub expire_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub security_lock: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub whois_privacy: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub auto_renew: bool,
}

#[derive(Debug, Deserialize)]
pub struct DomainListResponse {
    #[serde(default)]
    pub domains: Vec<PorkbunDomain>,
}

#[derive(Debug, Deserialize)]
pub struct NameserversResponse {
    #[serde(default)]
    pub ns: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SslResponse {
    #[serde(default)]
    pub certificatechain: String,
    #[serde(default)]
    pub privatekey: String,
    #[serde(default)]
    pub publickey: String,
    #[serde(default)]
    pub intermediatecertificate: String,
}

/// URL forward entry of `domain/getUrlForwarding`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PorkbunForward {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub subdomain: Option<String>,
    pub location: String,
    #[serde(rename = "type", default)]
    pub forward_type: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub include_path: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub wildcard: bool,
}

#[derive(Debug, Deserialize)]
pub struct ForwardsResponse {
    #[serde(default)]
    pub forwards: Vec<PorkbunForward>,
}

#[derive(Debug, Deserialize)]
pub struct PricingResponse {
    #[serde(default)]
    pub pricing: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(default)]
    pub invoice_id: Option<Value>,
}

/// Envelope-only response for calls that return nothing of interest
#[derive(Debug, Deserialize)]
pub struct EmptyResponse {}

// ============ Requests ============

/// Body of `dns/create`, `dns/edit` and `dns/editByNameType`
#[derive(Debug, Serialize)]
pub struct RecordBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(rename = "type")]
    pub record_type: &'static str,
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NameserversBody<'a> {
    pub ns: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<&'a str>,
    pub location: &'a str,
    #[serde(rename = "type")]
    pub forward_type: &'static str,
    pub include_path: &'static str,
    pub wildcard: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody<'a> {
    pub registration_type: &'a str,
    pub admin_filing_type: &'a str,
    pub whois_privacy: &'static str,
    pub auto_renew: &'static str,
}

/// `yes`/`no` flag encoding used by request bodies.
pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
