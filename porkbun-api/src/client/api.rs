//! `RegistrarApi` implementation for Porkbun

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{ErrorContext, RegistrarApi};
use crate::types::{
    DnsRecord, DnsRecordType, Domain, DomainPricing, DomainRegistration, PingResult, RecordSpec,
    RegistrationResult, SslBundle, UrlForward, UrlForwardRequest, UrlForwardType,
};
use crate::utils::datetime::parse_registrar_timestamp;

use super::common::{name_type_path, segment};
use super::types::{
    CreateRecordResponse, DomainListResponse, EmptyResponse, ForwardBody, ForwardsResponse,
    NameserversBody, NameserversResponse, PingResponse, PorkbunDomain, PorkbunForward,
    PorkbunRecord, PricingResponse, RecordBody, RecordsResponse, RegisterBody, RegisterResponse,
    SslResponse, yes_no,
};
use super::PorkbunClient;

impl PorkbunClient {
    /// Convert wire records, dropping types outside the supported set.
    fn convert_records(records: Vec<PorkbunRecord>) -> Vec<DnsRecord> {
        records
            .into_iter()
            .filter_map(|r| match r.record_type.parse::<DnsRecordType>() {
                Ok(record_type) => Some(DnsRecord {
                    id: r.id,
                    name: r.name,
                    record_type,
                    content: r.content,
                    ttl: r.ttl,
                    prio: r.prio,
                    notes: r.notes.filter(|n| !n.is_empty()),
                }),
                Err(e) => {
                    log::warn!("[porkbun] Skipping record {} ({}): {e}", r.id, r.name);
                    None
                }
            })
            .collect()
    }

    fn convert_domain(d: PorkbunDomain) -> Domain {
        let tld = d.tld.unwrap_or_else(|| {
            d.domain
                .split_once('.')
                .map(|(_, tld)| tld.to_string())
                .unwrap_or_default()
        });
        Domain {
            status: d.status.unwrap_or_default(),
            tld,
            create_date: d.create_date.as_deref().and_then(parse_registrar_timestamp),
            expire_date: d.expire_date.as_deref().and_then(parse_registrar_timestamp),
            auto_renew: d.auto_renew,
            security_lock: d.security_lock,
            whois_privacy: d.whois_privacy,
            domain: d.domain,
        }
    }

    fn convert_forward(f: PorkbunForward) -> UrlForward {
        let forward_type = if f.forward_type.eq_ignore_ascii_case("permanent") {
            UrlForwardType::Permanent
        } else {
            UrlForwardType::Temporary
        };
        UrlForward {
            id: f.id,
            subdomain: f.subdomain.unwrap_or_default(),
            location: f.location,
            forward_type,
            include_path: f.include_path,
            wildcard: f.wildcard,
        }
    }

    fn record_body(spec: &RecordSpec, include_name: bool) -> RecordBody<'_> {
        let name = spec.name.trim();
        RecordBody {
            name: (include_name && !name.is_empty() && name != "@").then_some(name),
            record_type: spec.record_type.as_str(),
            content: &spec.content,
            ttl: spec.ttl.map(|t| t.to_string()),
            prio: spec.prio.map(|p| p.to_string()),
        }
    }
}

/// Pick the price block for `domain` out of a `pricing` payload.
///
/// The payload is either keyed by TLD (`{"com": {...}}`) or already flat.
pub(crate) fn extract_pricing(domain: &str, pricing: Option<&serde_json::Value>) -> DomainPricing {
    let mut result = DomainPricing {
        domain: domain.to_string(),
        ..DomainPricing::default()
    };
    let Some(pricing) = pricing else {
        return result;
    };

    let full_tld = domain.split_once('.').map_or(domain, |(_, tld)| tld);
    let last_label = domain.rsplit('.').next().unwrap_or(domain);
    let block = pricing
        .get(full_tld)
        .or_else(|| pricing.get(last_label))
        .unwrap_or(pricing);

    let price = |key: &str| {
        block.get(key).and_then(|v| match v {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    };
    result.registration = price("registration");
    result.renewal = price("renewal");
    result.transfer = price("transfer");
    result
}

#[async_trait]
impl RegistrarApi for PorkbunClient {
    async fn ping(&self) -> Result<PingResult> {
        let resp: PingResponse = self.post_empty("ping", ErrorContext::default()).await?;
        Ok(PingResult {
            your_ip: resp.your_ip,
        })
    }

    async fn list_domains(&self) -> Result<Vec<Domain>> {
        let resp: DomainListResponse = self
            .post_empty("domain/listAll", ErrorContext::default())
            .await?;
        Ok(resp.domains.into_iter().map(Self::convert_domain).collect())
    }

    async fn check_domain(&self, domain: &str) -> Result<DomainPricing> {
        let resp: PricingResponse = self
            .post_empty(
                &format!("pricing/get/{}", segment(domain)),
                ErrorContext::domain(domain),
            )
            .await?;
        Ok(extract_pricing(domain, resp.pricing.as_ref()))
    }

    async fn register_domain(
        &self,
        domain: &str,
        options: &DomainRegistration,
    ) -> Result<RegistrationResult> {
        let body = RegisterBody {
            registration_type: &options.registration_type,
            admin_filing_type: &options.admin_filing_type,
            whois_privacy: yes_no(options.whois_privacy),
            auto_renew: yes_no(options.auto_renew),
        };
        let resp: RegisterResponse = self
            .post(
                &format!("domain/create/{}", segment(domain)),
                Some(&body),
                ErrorContext::domain(domain),
            )
            .await?;

        log::info!("[porkbun] Registered {domain}");
        Ok(RegistrationResult {
            domain: domain.to_string(),
            invoice_id: resp.invoice_id.and_then(|v| match v {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
        })
    }

    async fn get_nameservers(&self, domain: &str) -> Result<Vec<String>> {
        let resp: NameserversResponse = self
            .post_empty(
                &format!("domain/getNs/{}", segment(domain)),
                ErrorContext::domain(domain),
            )
            .await?;
        Ok(resp.ns)
    }

    async fn update_nameservers(&self, domain: &str, nameservers: &[String]) -> Result<()> {
        let _: EmptyResponse = self
            .post(
                &format!("domain/updateNs/{}", segment(domain)),
                Some(&NameserversBody { ns: nameservers }),
                ErrorContext::domain(domain),
            )
            .await?;
        Ok(())
    }

    async fn retrieve_ssl(&self, domain: &str) -> Result<SslBundle> {
        let resp: SslResponse = self
            .post_empty(
                &format!("ssl/retrieve/{}", segment(domain)),
                ErrorContext::domain(domain),
            )
            .await?;
        Ok(SslBundle {
            certificate_chain: resp.certificatechain,
            private_key: resp.privatekey,
            public_key: resp.publickey,
            intermediate_certificate: resp.intermediatecertificate,
        })
    }

    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        let resp: RecordsResponse = self
            .post_empty(
                &format!("dns/retrieve/{}", segment(domain)),
                ErrorContext::domain(domain),
            )
            .await?;
        Ok(Self::convert_records(resp.records))
    }

    async fn list_records_by_name_type(
        &self,
        domain: &str,
        record_type: DnsRecordType,
        name: &str,
    ) -> Result<Vec<DnsRecord>> {
        let path = name_type_path("dns/retrieveByNameType", domain, record_type, name);
        let resp: RecordsResponse = self
            .post_empty(&path, ErrorContext::domain(domain))
            .await?;
        Ok(Self::convert_records(resp.records))
    }

    async fn create_record(&self, domain: &str, spec: &RecordSpec) -> Result<String> {
        let body = Self::record_body(spec, true);
        let resp: CreateRecordResponse = self
            .post(
                &format!("dns/create/{}", segment(domain)),
                Some(&body),
                ErrorContext::domain(domain),
            )
            .await?;
        Ok(resp.id)
    }

    async fn edit_record(&self, domain: &str, record_id: &str, spec: &RecordSpec) -> Result<()> {
        let body = Self::record_body(spec, true);
        let _: EmptyResponse = self
            .post(
                &format!("dns/edit/{}/{}", segment(domain), segment(record_id)),
                Some(&body),
                ErrorContext::record(domain, record_id),
            )
            .await?;
        Ok(())
    }

    async fn edit_records_by_name_type(&self, domain: &str, spec: &RecordSpec) -> Result<()> {
        // name travels in the path for this endpoint
        let body = Self::record_body(spec, false);
        let path = name_type_path("dns/editByNameType", domain, spec.record_type, &spec.name);
        let _: EmptyResponse = self
            .post(
                &path,
                Some(&body),
                ErrorContext::record(domain, format!("{}/{}", spec.record_type, spec.name)),
            )
            .await?;
        Ok(())
    }

    async fn delete_record(&self, domain: &str, record_id: &str) -> Result<()> {
        let _: EmptyResponse = self
            .post_empty(
                &format!("dns/delete/{}/{}", segment(domain), segment(record_id)),
                ErrorContext::record(domain, record_id),
            )
            .await?;
        Ok(())
    }

    async fn delete_records_by_name_type(
        &self,
        domain: &str,
        record_type: DnsRecordType,
        name: &str,
    ) -> Result<()> {
        let path = name_type_path("dns/deleteByNameType", domain, record_type, name);
        let _: EmptyResponse = self
            .post_empty(
                &path,
                ErrorContext::record(domain, format!("{record_type}/{name}")),
            )
            .await?;
        Ok(())
    }

    async fn list_url_forwards(&self, domain: &str) -> Result<Vec<UrlForward>> {
        let resp: ForwardsResponse = self
            .post_empty(
                &format!("domain/getUrlForwarding/{}", segment(domain)),
                ErrorContext::domain(domain),
            )
            .await?;
        Ok(resp.forwards.into_iter().map(Self::convert_forward).collect())
    }

    async fn add_url_forward(&self, domain: &str, request: &UrlForwardRequest) -> Result<()> {
        let subdomain = request.subdomain.trim();
        let body = ForwardBody {
            subdomain: (!subdomain.is_empty() && subdomain != "@").then_some(subdomain),
            location: &request.location,
            forward_type: request.forward_type.as_str(),
            include_path: yes_no(request.include_path),
            wildcard: yes_no(request.wildcard),
        };
        let _: EmptyResponse = self
            .post(
                &format!("domain/addUrlForwarding/{}", segment(domain)),
                Some(&body),
                ErrorContext::domain(domain),
            )
            .await?;
        Ok(())
    }

    async fn delete_url_forward(&self, domain: &str, forward_id: &str) -> Result<()> {
        let _: EmptyResponse = self
            .post_empty(
                &format!(
                    "domain/deleteUrlForwarding/{}/{}",
                    segment(domain),
                    segment(forward_id)
                ),
                ErrorContext::record(domain, forward_id),
            )
            .await?;
        Ok(())
    }
}
