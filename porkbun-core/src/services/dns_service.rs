//! DNS record management service

use std::sync::Arc;

use porkbun_api::{DnsRecord, DnsRecordType, RecordSpec};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;

/// What an upsert will do, decided from the current record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertPlan {
    Create,
    Update { record_id: String },
    /// A record with the same type, name and values already exists.
    Unchanged { record_id: String },
}

/// What an upsert did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created { record_id: String },
    Updated { record_id: String },
    Unchanged { record_id: String },
}

/// Decide create vs. update for `spec` against the records of `domain`.
///
/// Candidates share type and FQDN, in registrar order. A candidate already holding
/// the same content (and the same prio/ttl where `spec` sets them) means nothing to
/// do. Otherwise the candidate with equal content is edited, falling back to the
/// first candidate.
pub fn plan_upsert(existing: &[DnsRecord], domain: &str, spec: &RecordSpec) -> UpsertPlan {
    let fqdn = spec.full_name(domain);
    let candidates: Vec<&DnsRecord> = existing
        .iter()
        .filter(|r| r.record_type == spec.record_type && r.name.eq_ignore_ascii_case(&fqdn))
        .collect();

    let Some(first) = candidates.first() else {
        return UpsertPlan::Create;
    };

    let same_content = |r: &&&DnsRecord| r.content == spec.content;
    let identical = |r: &&&DnsRecord| {
        same_content(r)
            && spec.prio.is_none_or(|p| r.prio == Some(p))
            && spec.ttl.is_none_or(|t| r.ttl == Some(t))
    };

    if let Some(record) = candidates.iter().find(identical) {
        return UpsertPlan::Unchanged {
            record_id: record.id.clone(),
        };
    }

    let chosen = candidates.iter().find(same_content).unwrap_or(first);
    if candidates.len() > 1 {
        log::warn!(
            "{} {} records named {fqdn}; updating {}",
            candidates.len(),
            spec.record_type,
            chosen.id
        );
    }
    UpsertPlan::Update {
        record_id: chosen.id.clone(),
    }
}

/// DNS record management service
pub struct DnsService {
    ctx: Arc<ServiceContext>,
}

impl DnsService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// List the records of a domain, optionally of one type only.
    pub async fn list_records(
        &self,
        domain: &str,
        record_type: Option<DnsRecordType>,
    ) -> CoreResult<Vec<DnsRecord>> {
        let records = self.ctx.registrar.list_records(domain).await?;
        Ok(match record_type {
            Some(t) => records.into_iter().filter(|r| r.record_type == t).collect(),
            None => records,
        })
    }

    /// Records of one type, optionally at one relative name.
    pub async fn list_by_name_type(
        &self,
        domain: &str,
        record_type: DnsRecordType,
        name: &str,
    ) -> CoreResult<Vec<DnsRecord>> {
        Ok(self
            .ctx
            .registrar
            .list_records_by_name_type(domain, record_type, name)
            .await?)
    }

    /// Create a record, returning the new id.
    pub async fn create_record(&self, domain: &str, spec: &RecordSpec) -> CoreResult<String> {
        validate_spec(spec)?;
        let id = self.ctx.registrar.create_record(domain, spec).await?;
        log::info!("Created {} record {} ({id})", spec.record_type, spec.full_name(domain));
        Ok(id)
    }

    pub async fn edit_record(
        &self,
        domain: &str,
        record_id: &str,
        spec: &RecordSpec,
    ) -> CoreResult<()> {
        validate_spec(spec)?;
        self.ctx.registrar.edit_record(domain, record_id, spec).await?;
        log::info!("Updated record {record_id} on {domain}");
        Ok(())
    }

    /// Edit every record sharing the type and name of `spec`.
    pub async fn edit_by_name_type(&self, domain: &str, spec: &RecordSpec) -> CoreResult<()> {
        validate_spec(spec)?;
        self.ctx
            .registrar
            .edit_records_by_name_type(domain, spec)
            .await?;
        log::info!("Updated {} records at {}", spec.record_type, spec.full_name(domain));
        Ok(())
    }

    /// Create or update the record keyed by (name, type).
    pub async fn upsert_record(&self, domain: &str, spec: &RecordSpec) -> CoreResult<UpsertOutcome> {
        validate_spec(spec)?;
        let existing = self.ctx.registrar.list_records(domain).await?;

        match plan_upsert(&existing, domain, spec) {
            UpsertPlan::Create => {
                let record_id = self.ctx.registrar.create_record(domain, spec).await?;
                log::info!("Upsert created record {record_id}");
                Ok(UpsertOutcome::Created { record_id })
            }
            UpsertPlan::Update { record_id } => {
                self.ctx
                    .registrar
                    .edit_record(domain, &record_id, spec)
                    .await?;
                log::info!("Upsert updated record {record_id}");
                Ok(UpsertOutcome::Updated { record_id })
            }
            UpsertPlan::Unchanged { record_id } => {
                log::info!("Record {record_id} already up to date");
                Ok(UpsertOutcome::Unchanged { record_id })
            }
        }
    }

    pub async fn delete_record(&self, domain: &str, record_id: &str) -> CoreResult<()> {
        self.ctx.registrar.delete_record(domain, record_id).await?;
        log::info!("Deleted record {record_id} from {domain}");
        Ok(())
    }

    /// Delete every record with the given type at a relative name.
    pub async fn delete_by_name_type(
        &self,
        domain: &str,
        record_type: DnsRecordType,
        name: &str,
    ) -> CoreResult<()> {
        self.ctx
            .registrar
            .delete_records_by_name_type(domain, record_type, name)
            .await?;
        log::info!("Deleted {record_type} records at {name:?} on {domain}");
        Ok(())
    }
}

/// Local checks run before a write reaches the registrar.
pub(crate) fn validate_spec(spec: &RecordSpec) -> CoreResult<()> {
    if spec.content.trim().is_empty() {
        return Err(CoreError::Validation("record content must not be empty".to_string()));
    }
    if spec.prio.is_some() && !spec.record_type.has_priority() {
        log::debug!("Priority ignored by the registrar for {} records", spec.record_type);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_context;

    const DOMAIN: &str = "example.com";

    fn record(id: &str, name: &str, t: DnsRecordType, content: &str) -> DnsRecord {
        DnsRecord {
            id: id.into(),
            name: name.into(),
            record_type: t,
            content: content.into(),
            ttl: Some(600),
            prio: Some(0),
            notes: None,
        }
    }

    #[test]
    fn plan_create_when_no_candidate() {
        let existing = vec![record("1", "www.example.com", DnsRecordType::Aaaa, "::1")];
        let spec = RecordSpec::new(DnsRecordType::A, "www", "1.1.1.1");
        assert_eq!(plan_upsert(&existing, DOMAIN, &spec), UpsertPlan::Create);
    }

    #[test]
    fn plan_unchanged_when_identical() {
        let existing = vec![record("1", "www.example.com", DnsRecordType::A, "1.1.1.1")];
        let spec = RecordSpec::new(DnsRecordType::A, "www", "1.1.1.1").with_ttl(Some(600));
        assert_eq!(
            plan_upsert(&existing, DOMAIN, &spec),
            UpsertPlan::Unchanged {
                record_id: "1".into()
            }
        );
    }

    #[test]
    fn plan_update_when_ttl_differs() {
        let existing = vec![record("1", "www.example.com", DnsRecordType::A, "1.1.1.1")];
        let spec = RecordSpec::new(DnsRecordType::A, "www", "1.1.1.1").with_ttl(Some(3600));
        assert_eq!(
            plan_upsert(&existing, DOMAIN, &spec),
            UpsertPlan::Update {
                record_id: "1".into()
            }
        );
    }

    #[test]
    fn plan_prefers_equal_content_then_first() {
        let existing = vec![
            record("1", "example.com", DnsRecordType::Txt, "google-site-verification=a"),
            record("2", "example.com", DnsRecordType::Txt, "v=spf1 -all"),
        ];
        let spec = RecordSpec::new(DnsRecordType::Txt, "", "v=spf1 -all").with_ttl(Some(300));
        assert_eq!(
            plan_upsert(&existing, DOMAIN, &spec),
            UpsertPlan::Update {
                record_id: "2".into()
            }
        );

        let spec = RecordSpec::new(DnsRecordType::Txt, "", "v=spf1 mx -all");
        assert_eq!(
            plan_upsert(&existing, DOMAIN, &spec),
            UpsertPlan::Update {
                record_id: "1".into()
            }
        );
    }

    #[tokio::test]
    async fn upsert_edits_existing_record() {
        let (ctx, registrar) = mock_context(DOMAIN).await;
        let id = registrar
            .seed_record(DOMAIN, &RecordSpec::new(DnsRecordType::A, "www", "1.1.1.1"))
            .await;
        let service = DnsService::new(ctx);

        let outcome = service
            .upsert_record(DOMAIN, &RecordSpec::new(DnsRecordType::A, "www", "2.2.2.2"))
            .await
            .unwrap();

        assert_eq!(outcome, UpsertOutcome::Updated { record_id: id.clone() });
        assert_eq!(
            registrar.mutating_calls().await,
            vec![format!("dns/edit/{DOMAIN}/{id}")]
        );
        assert_eq!(registrar.records(DOMAIN).await[0].content, "2.2.2.2");
    }

    #[tokio::test]
    async fn upsert_creates_when_absent() {
        let (ctx, registrar) = mock_context(DOMAIN).await;
        let service = DnsService::new(ctx);

        let outcome = service
            .upsert_record(DOMAIN, &RecordSpec::new(DnsRecordType::Cname, "blog", "host.example.net"))
            .await
            .unwrap();

        assert!(matches!(outcome, UpsertOutcome::Created { .. }));
        assert_eq!(registrar.records(DOMAIN).await.len(), 1);
    }

    #[tokio::test]
    async fn list_filters_by_type() {
        let (ctx, registrar) = mock_context(DOMAIN).await;
        registrar
            .seed_record(DOMAIN, &RecordSpec::new(DnsRecordType::A, "", "1.1.1.1"))
            .await;
        registrar
            .seed_record(DOMAIN, &RecordSpec::new(DnsRecordType::Mx, "", "mx.example.net").with_prio(Some(10)))
            .await;
        let service = DnsService::new(ctx);

        let all = service.list_records(DOMAIN, None).await.unwrap();
        let mx = service.list_records(DOMAIN, Some(DnsRecordType::Mx)).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(mx.len(), 1);
        assert_eq!(mx[0].prio, Some(10));
    }

    #[tokio::test]
    async fn empty_content_rejected_locally() {
        let (ctx, registrar) = mock_context(DOMAIN).await;
        let service = DnsService::new(ctx);

        let err = service
            .create_record(DOMAIN, &RecordSpec::new(DnsRecordType::A, "www", "  "))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(registrar.calls().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_domain_surfaces_not_found() {
        let (ctx, _) = mock_context(DOMAIN).await;
        let service = DnsService::new(ctx);

        let err = service.list_records("other.org", None).await.unwrap_err();
        assert_eq!(err.api_kind(), Some(porkbun_api::ErrorKind::NotFound));
    }
}
