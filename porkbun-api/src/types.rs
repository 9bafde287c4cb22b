use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Credentials ============

/// Error returned when a credential pair is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CredentialValidationError {
    /// A required field is empty or whitespace.
    EmptyField {
        /// Field label for display (e.g., `"API key"`).
        label: String,
    },
    /// A field does not look like a Porkbun key.
    InvalidFormat {
        /// Field label for display.
        label: String,
        /// Human-readable reason.
        reason: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { label } => write!(f, "Field must not be empty: {label}"),
            Self::InvalidFormat { label, reason } => write!(f, "{label}: {reason}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// API key pair merged into every request body.
///
/// Serialized with the registrar's field names, which are also the config file's.
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Public API key (`pk1_...`).
    #[serde(rename = "apikey")]
    pub api_key: String,
    /// Secret API key (`sk1_...`).
    #[serde(rename = "secretapikey")]
    pub secret_api_key: String,
}

impl Credentials {
    /// Build a credential pair, trimming surrounding whitespace.
    pub fn new(api_key: impl Into<String>, secret_api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into().trim().to_string(),
            secret_api_key: secret_api_key.into().trim().to_string(),
        }
    }

    /// Check that both keys are present.
    ///
    /// Keys without the usual `pk`/`sk` prefix are accepted with a warning; the
    /// registrar is the final judge.
    pub fn validate(&self) -> Result<(), CredentialValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(CredentialValidationError::EmptyField {
                label: "API key".to_string(),
            });
        }
        if self.secret_api_key.trim().is_empty() {
            return Err(CredentialValidationError::EmptyField {
                label: "Secret API key".to_string(),
            });
        }
        if self.api_key == self.secret_api_key {
            return Err(CredentialValidationError::InvalidFormat {
                label: "Secret API key".to_string(),
                reason: "must differ from the API key".to_string(),
            });
        }
        if !self.api_key.starts_with("pk") || !self.secret_api_key.starts_with("sk") {
            log::warn!("API keys do not use the usual pk1_/sk1_ prefixes");
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &mask(&self.api_key))
            .field("secret_api_key", &"***")
            .finish()
    }
}

/// Keep the first few characters of a key for recognisability.
fn mask(key: &str) -> String {
    let visible: String = key.chars().take(6).collect();
    format!("{visible}***")
}

// ============ DNS Records ============

/// Record types accepted by the registrar.
///
/// Parsing is case-insensitive; serialization uses the upper-case wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name record.
    Cname,
    /// Apex-capable alias (registrar-side flattening).
    Alias,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// DANE TLS association record.
    Tlsa,
    /// Certificate Authority Authorization record.
    Caa,
    /// HTTPS service binding record.
    Https,
    /// General service binding record.
    Svcb,
    /// SSH fingerprint record.
    Sshfp,
}

impl DnsRecordType {
    /// Every supported type, in display order.
    pub const ALL: [Self; 13] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Alias,
        Self::Mx,
        Self::Txt,
        Self::Ns,
        Self::Srv,
        Self::Tlsa,
        Self::Caa,
        Self::Https,
        Self::Svcb,
        Self::Sshfp,
    ];

    /// Upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Alias => "ALIAS",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Tlsa => "TLSA",
            Self::Caa => "CAA",
            Self::Https => "HTTPS",
            Self::Svcb => "SVCB",
            Self::Sshfp => "SSHFP",
        }
    }

    /// Whether `prio` is meaningful for this type.
    pub fn has_priority(self) -> bool {
        matches!(self, Self::Mx | Self::Srv)
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a record type outside [`DnsRecordType::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedRecordType(pub String);

impl std::fmt::Display for UnsupportedRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported record type '{}'", self.0)
    }
}

impl std::error::Error for UnsupportedRecordType {}

impl FromStr for DnsRecordType {
    type Err = UnsupportedRecordType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| UnsupportedRecordType(s.trim().to_string()))
    }
}

impl TryFrom<String> for DnsRecordType {
    type Error = UnsupportedRecordType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DnsRecordType> for String {
    fn from(value: DnsRecordType) -> Self {
        value.as_str().to_string()
    }
}

/// A DNS record as stored at the registrar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Registrar record id.
    pub id: String,
    /// Fully qualified name (`www.example.com`, or `example.com` at the apex).
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    /// Record value.
    pub content: String,
    /// TTL in seconds, when reported.
    pub ttl: Option<u32>,
    /// Priority, when reported.
    pub prio: Option<u32>,
    /// Free-form notes attached in the registrar UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DnsRecord {
    /// Name relative to `domain` (`""` for the apex).
    pub fn relative_name(&self, domain: &str) -> String {
        crate::client::full_name_to_relative(&self.name, domain)
    }
}

/// Normalized record fields used for create and edit calls.
///
/// `name` is relative to the domain; `""` is the apex. `None` for `prio` or `ttl`
/// leaves the field out of the payload so the registrar applies its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSpec {
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    /// Relative subdomain.
    #[serde(default)]
    pub name: String,
    /// Record value.
    pub content: String,
    /// Priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prio: Option<u32>,
    /// TTL in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

impl RecordSpec {
    /// Spec with no priority and the registrar's default TTL.
    pub fn new(
        record_type: DnsRecordType,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            record_type,
            name: name.into(),
            content: content.into(),
            prio: None,
            ttl: None,
        }
    }

    #[must_use]
    pub fn with_prio(mut self, prio: Option<u32>) -> Self {
        self.prio = prio;
        self
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Option<u32>) -> Self {
        self.ttl = ttl;
        self
    }

    /// FQDN this spec resolves to under `domain`.
    pub fn full_name(&self, domain: &str) -> String {
        crate::client::relative_to_full_name(&self.name, domain)
    }
}

// ============ URL Forwarding ============

/// Redirect kind for a URL forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlForwardType {
    /// HTTP 301.
    Permanent,
    /// HTTP 302 / 307.
    Temporary,
}

impl UrlForwardType {
    /// Map an HTTP redirect status code onto the registrar's two kinds.
    pub fn from_status_code(code: u16) -> Option<Self> {
        match code {
            301 | 308 => Some(Self::Permanent),
            302 | 303 | 307 => Some(Self::Temporary),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Permanent => "permanent",
            Self::Temporary => "temporary",
        }
    }
}

impl std::fmt::Display for UrlForwardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An existing URL forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlForward {
    pub id: String,
    /// Relative subdomain, `""` for the apex.
    pub subdomain: String,
    /// Target URL.
    pub location: String,
    #[serde(rename = "type")]
    pub forward_type: UrlForwardType,
    pub include_path: bool,
    pub wildcard: bool,
}

/// Parameters for creating a URL forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlForwardRequest {
    /// Relative subdomain, `""` for the apex.
    #[serde(default)]
    pub subdomain: String,
    pub location: String,
    #[serde(rename = "type")]
    pub forward_type: UrlForwardType,
    #[serde(default)]
    pub include_path: bool,
    #[serde(default)]
    pub wildcard: bool,
}

// ============ Domains ============

/// A domain in the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub domain: String,
    /// Registrar status string (`ACTIVE`, ...).
    pub status: String,
    pub tld: String,
    #[serde(default, with = "crate::utils::datetime")]
    pub create_date: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub expire_date: Option<DateTime<Utc>>,
    pub auto_renew: bool,
    pub security_lock: bool,
    pub whois_privacy: bool,
}

/// Prices for a domain or its TLD, as decimal strings in USD.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainPricing {
    pub domain: String,
    pub registration: Option<String>,
    pub renewal: Option<String>,
    pub transfer: Option<String>,
}

/// Purchase options for `domain/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRegistration {
    /// `personal` or `business`.
    pub registration_type: String,
    /// Required by some registries for business registrations.
    #[serde(default)]
    pub admin_filing_type: String,
    pub whois_privacy: bool,
    pub auto_renew: bool,
}

impl Default for DomainRegistration {
    fn default() -> Self {
        Self {
            registration_type: "personal".to_string(),
            admin_filing_type: String::new(),
            whois_privacy: false,
            auto_renew: false,
        }
    }
}

/// Outcome of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResult {
    pub domain: String,
    pub invoice_id: Option<String>,
}

// ============ SSL / misc ============

/// Free certificate bundle issued by the registrar.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslBundle {
    pub certificate_chain: String,
    pub private_key: String,
    pub public_key: String,
    pub intermediate_certificate: String,
}

impl std::fmt::Debug for SslBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SslBundle")
            .field("certificate_chain_len", &self.certificate_chain.len())
            .field("private_key", &"***")
            .field("public_key_len", &self.public_key.len())
            .field(
                "intermediate_certificate_len",
                &self.intermediate_certificate.len(),
            )
            .finish()
    }
}

/// Result of the authenticated `ping` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResult {
    /// Caller address as seen by the registrar.
    pub your_ip: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_parse_is_case_insensitive() {
        assert_eq!("a".parse::<DnsRecordType>().unwrap(), DnsRecordType::A);
        assert_eq!(" Mx ".parse::<DnsRecordType>().unwrap(), DnsRecordType::Mx);
        assert_eq!(
            "sshfp".parse::<DnsRecordType>().unwrap(),
            DnsRecordType::Sshfp
        );
    }

    #[test]
    fn record_type_rejects_unknown() {
        let err = "FOO".parse::<DnsRecordType>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported record type 'FOO'");
    }

    #[test]
    fn record_type_round_trips_every_variant() {
        for t in DnsRecordType::ALL {
            assert_eq!(t.as_str().parse::<DnsRecordType>().unwrap(), t);
        }
    }

    #[test]
    fn record_type_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&DnsRecordType::Aaaa).unwrap(),
            "\"AAAA\""
        );
        let t: DnsRecordType = serde_json::from_str("\"cname\"").unwrap();
        assert_eq!(t, DnsRecordType::Cname);
    }

    #[test]
    fn only_mx_and_srv_carry_priority() {
        let with_prio: Vec<_> = DnsRecordType::ALL
            .into_iter()
            .filter(|t| t.has_priority())
            .collect();
        assert_eq!(with_prio, vec![DnsRecordType::Mx, DnsRecordType::Srv]);
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let c = Credentials::new("pk1_abcdef123456", "sk1_supersecret");
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("supersecret"));
        assert!(!dbg.contains("123456"));
        assert!(dbg.contains("pk1_ab"));
    }

    #[test]
    fn credentials_use_registrar_field_names() {
        let c: Credentials =
            serde_json::from_str(r#"{"apikey":" pk1_a ","secretapikey":"sk1_b"}"#).unwrap();
        assert_eq!(c.secret_api_key, "sk1_b");
        let json = serde_json::to_value(Credentials::new("pk1_a", "sk1_b")).unwrap();
        assert_eq!(json["apikey"], "pk1_a");
        assert_eq!(json["secretapikey"], "sk1_b");
    }

    #[test]
    fn credentials_validation() {
        assert!(Credentials::new("pk1_a", "sk1_b").validate().is_ok());
        assert_eq!(
            Credentials::new("", "sk1_b").validate(),
            Err(CredentialValidationError::EmptyField {
                label: "API key".to_string()
            })
        );
        assert!(Credentials::new("pk1_a", "  ").validate().is_err());
        assert!(Credentials::new("same", "same").validate().is_err());
    }

    #[test]
    fn url_forward_type_from_status_code() {
        assert_eq!(
            UrlForwardType::from_status_code(301),
            Some(UrlForwardType::Permanent)
        );
        assert_eq!(
            UrlForwardType::from_status_code(302),
            Some(UrlForwardType::Temporary)
        );
        assert_eq!(
            UrlForwardType::from_status_code(307),
            Some(UrlForwardType::Temporary)
        );
        assert_eq!(UrlForwardType::from_status_code(200), None);
    }

    #[test]
    fn record_spec_full_name() {
        let spec = RecordSpec::new(DnsRecordType::A, "www", "203.0.113.1");
        assert_eq!(spec.full_name("example.com"), "www.example.com");
        let apex = RecordSpec::new(DnsRecordType::A, "", "203.0.113.1");
        assert_eq!(apex.full_name("example.com"), "example.com");
    }
}
