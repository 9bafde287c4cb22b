//! Bulk import/export service
//!
//! Entries run strictly one after another. A failing entry is recorded and the
//! batch moves on; only an unreadable file or a failed preflight stops it.

use std::path::Path;
use std::sync::Arc;

use porkbun_api::{ErrorKind, RecordSpec};

use crate::bulk::normalizer;
use crate::error::{CoreError, CoreResult};
use crate::services::dns_service::{DnsService, UpsertOutcome, UpsertPlan, plan_upsert};
use crate::services::ServiceContext;
use crate::types::{
    BulkEntry, BulkFile, BulkFormat, BulkItemResult, BulkOperation, BulkOutcome, BulkReport,
    BulkSummary, DeleteTarget,
};

const UNCHANGED: &str = "unchanged";

/// Bulk import/export service
pub struct BulkService {
    ctx: Arc<ServiceContext>,
    dns: DnsService,
}

impl BulkService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            dns: DnsService::new(ctx.clone()),
            ctx,
        }
    }

    /// Read and parse a bulk file. The format defaults to the file extension.
    pub async fn load_file(
        path: &Path,
        format: Option<BulkFormat>,
        domain_override: Option<&str>,
    ) -> CoreResult<BulkFile> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CoreError::BulkFile(format!("cannot read {}: {e}", path.display())))?;
        let format = format.unwrap_or_else(|| BulkFormat::from_path(path));
        normalizer::parse(&content, format, domain_override)
    }

    /// Render every record of `domain` as a bulk document. Returns the text and the
    /// number of records.
    pub async fn export(&self, domain: &str, format: BulkFormat) -> CoreResult<(String, usize)> {
        let records = self.ctx.registrar.list_records(domain).await?;
        let document = normalizer::document_from_records(domain, &records);
        let rendered = normalizer::render(&document, format)?;
        log::info!("Exported {} records from {domain}", records.len());
        Ok((rendered, records.len()))
    }

    /// Run a parsed batch.
    ///
    /// With `dry_run` nothing is written; upserts still list the zone to tell a
    /// create from an update.
    pub async fn import(&self, file: &BulkFile, dry_run: bool) -> CoreResult<BulkReport> {
        let domain = file.domain.as_str();
        let total = file.entries.len();
        log::info!(
            "{} {total} entries for {domain}",
            if dry_run { "Previewing" } else { "Importing" }
        );

        if !dry_run && file.operations().next().is_some() {
            self.preflight().await?;
        }

        let mut results = Vec::with_capacity(total);
        for entry in &file.entries {
            let outcome = match &entry.operation {
                Err(e) => BulkOutcome::Failed(format!("validation: {e}")),
                Ok(op) => self.run(domain, op, dry_run).await,
            };

            if let BulkOutcome::Failed(reason) = &outcome {
                log::warn!("[{}/{total}] {} failed: {reason}", entry.index, describe(entry));
            } else {
                log::info!("[{}/{total}] {} {outcome}", entry.index, describe(entry));
            }

            results.push(item_result(entry, outcome));
        }

        let summary = BulkSummary::from_results(&results);
        log::info!(
            "Bulk import for {domain}: {} succeeded, {} skipped, {} failed",
            summary.succeeded(),
            summary.skipped,
            summary.failed
        );

        Ok(BulkReport {
            domain: domain.to_string(),
            dry_run,
            results,
            summary,
        })
    }

    /// Bad credentials or no connectivity would fail every entry the same way.
    async fn preflight(&self) -> CoreResult<()> {
        match self.ctx.registrar.ping().await {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.kind(), ErrorKind::Auth | ErrorKind::Transport) => {
                log::error!("Preflight failed, nothing was changed: {e}");
                Err(e.into())
            }
            Err(e) => {
                log::warn!("Preflight ping failed ({e}); continuing");
                Ok(())
            }
        }
    }

    async fn run(&self, domain: &str, op: &BulkOperation, dry_run: bool) -> BulkOutcome {
        let result = if dry_run {
            self.preview(domain, op).await
        } else {
            self.apply(domain, op).await
        };
        result.unwrap_or_else(|e| BulkOutcome::Failed(e.to_string()))
    }

    async fn preview(&self, domain: &str, op: &BulkOperation) -> CoreResult<BulkOutcome> {
        Ok(match op {
            BulkOperation::Create(_) => BulkOutcome::WouldCreate,
            BulkOperation::Delete(_) => BulkOutcome::WouldDelete,
            BulkOperation::Upsert(spec) => {
                let existing = self.ctx.registrar.list_records(domain).await?;
                match plan_upsert(&existing, domain, spec) {
                    UpsertPlan::Create => BulkOutcome::WouldCreate,
                    UpsertPlan::Update { .. } => BulkOutcome::WouldUpdate,
                    UpsertPlan::Unchanged { .. } => BulkOutcome::Skipped(UNCHANGED.to_string()),
                }
            }
        })
    }

    async fn apply(&self, domain: &str, op: &BulkOperation) -> CoreResult<BulkOutcome> {
        Ok(match op {
            BulkOperation::Create(spec) => {
                self.dns.create_record(domain, spec).await?;
                BulkOutcome::Created
            }
            BulkOperation::Upsert(spec) => match self.dns.upsert_record(domain, spec).await? {
                UpsertOutcome::Created { .. } => BulkOutcome::Created,
                UpsertOutcome::Updated { .. } => BulkOutcome::Updated,
                UpsertOutcome::Unchanged { .. } => BulkOutcome::Skipped(UNCHANGED.to_string()),
            },
            BulkOperation::Delete(DeleteTarget::ById(id)) => {
                self.dns.delete_record(domain, id).await?;
                BulkOutcome::Deleted
            }
            BulkOperation::Delete(DeleteTarget::ByNameType { record_type, name }) => {
                self.dns
                    .delete_by_name_type(domain, *record_type, name)
                    .await?;
                BulkOutcome::Deleted
            }
        })
    }
}

fn item_result(entry: &BulkEntry, outcome: BulkOutcome) -> BulkItemResult {
    let (action, record_type, name) = match &entry.operation {
        Ok(op) => (
            op.action().as_str().to_string(),
            op.record_type()
                .map_or_else(String::new, |t| t.as_str().to_string()),
            op.name().to_string(),
        ),
        Err(_) => (
            entry.action.clone(),
            entry.record_type.clone(),
            entry.name.clone(),
        ),
    };
    BulkItemResult {
        index: entry.index,
        action,
        record_type,
        name,
        outcome,
    }
}

/// `UPSERT MX @ -> mx.example.net` style label for log lines.
fn describe(entry: &BulkEntry) -> String {
    let name = if entry.name.is_empty() { "@" } else { entry.name.as_str() };
    match &entry.operation {
        Ok(BulkOperation::Create(spec) | BulkOperation::Upsert(spec)) => format!(
            "{} {} {name} -> {}",
            entry.action.to_ascii_uppercase(),
            spec.record_type,
            short(spec)
        ),
        Ok(BulkOperation::Delete(DeleteTarget::ById(id))) => format!("DELETE #{id}"),
        _ => format!(
            "{} {} {name}",
            entry.action.to_ascii_uppercase(),
            entry.record_type
        ),
    }
}

fn short(spec: &RecordSpec) -> String {
    const MAX: usize = 30;
    if spec.content.chars().count() > MAX {
        let head: String = spec.content.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        spec.content.clone()
    }
}
