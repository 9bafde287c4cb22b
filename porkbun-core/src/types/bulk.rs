//! Bulk import/export types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use porkbun_api::{DnsRecordType, RecordSpec};

/// Action column of a bulk entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Create,
    Upsert,
    Delete,
}

impl BulkAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Upsert => "upsert",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BulkAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "upsert" => Ok(Self::Upsert),
            "delete" => Ok(Self::Delete),
            other => Err(ValidationError::new(format!(
                "unknown action '{other}' (expected create, upsert or delete)"
            ))),
        }
    }
}

/// What a delete entry removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// A single record by registrar id.
    ById(String),
    /// Every record with this type at this relative name.
    ByNameType {
        record_type: DnsRecordType,
        name: String,
    },
}

/// One validated bulk entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOperation {
    Create(RecordSpec),
    Upsert(RecordSpec),
    Delete(DeleteTarget),
}

impl BulkOperation {
    #[must_use]
    pub fn action(&self) -> BulkAction {
        match self {
            Self::Create(_) => BulkAction::Create,
            Self::Upsert(_) => BulkAction::Upsert,
            Self::Delete(_) => BulkAction::Delete,
        }
    }

    /// Record type, unknown for deletes by id.
    #[must_use]
    pub fn record_type(&self) -> Option<DnsRecordType> {
        match self {
            Self::Create(spec) | Self::Upsert(spec) => Some(spec.record_type),
            Self::Delete(DeleteTarget::ByNameType { record_type, .. }) => Some(*record_type),
            Self::Delete(DeleteTarget::ById(_)) => None,
        }
    }

    /// Relative name, `""` for the apex and for deletes by id.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Create(spec) | Self::Upsert(spec) => &spec.name,
            Self::Delete(DeleteTarget::ByNameType { name, .. }) => name,
            Self::Delete(DeleteTarget::ById(_)) => "",
        }
    }
}

/// Why an entry was rejected before reaching the registrar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// A bulk entry after parsing, valid or not.
///
/// The raw `action`/`type`/`name` labels are kept so a rejected entry can still be
/// reported next to its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkEntry {
    /// 1-based position in the input.
    pub index: usize,
    pub action: String,
    pub record_type: String,
    pub name: String,
    pub operation: Result<BulkOperation, ValidationError>,
}

/// A parsed bulk file bound to its target domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFile {
    pub domain: String,
    pub entries: Vec<BulkEntry>,
}

impl BulkFile {
    /// Entries that passed validation, in input order.
    pub fn operations(&self) -> impl Iterator<Item = &BulkOperation> {
        self.entries.iter().filter_map(|e| e.operation.as_ref().ok())
    }
}

/// On-disk bulk entry, shared by import and export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRecord {
    pub action: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prio: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// On-disk bulk JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDocument {
    pub domain: String,
    pub records: Vec<BulkRecord>,
}

/// Bulk file encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkFormat {
    #[default]
    Json,
    Csv,
}

impl BulkFormat {
    /// Guess from a file name: `.csv` is CSV, anything else JSON.
    #[must_use]
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

impl FromStr for BulkFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown format '{other}' (expected json or csv)")),
        }
    }
}

/// Result of one bulk entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "kebab-case")]
pub enum BulkOutcome {
    Created,
    Updated,
    Deleted,
    Skipped(String),
    Failed(String),
    WouldCreate,
    WouldUpdate,
    WouldDelete,
}

impl BulkOutcome {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for BulkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::Updated => f.write_str("updated"),
            Self::Deleted => f.write_str("deleted"),
            Self::Skipped(reason) => write!(f, "skipped ({reason})"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
            Self::WouldCreate => f.write_str("would-create"),
            Self::WouldUpdate => f.write_str("would-update"),
            Self::WouldDelete => f.write_str("would-delete"),
        }
    }
}

/// Per-entry line of a bulk report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkItemResult {
    /// 1-based position in the input.
    pub index: usize,
    pub action: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub outcome: BulkOutcome,
}

/// Outcome counts of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub would_create: usize,
    pub would_update: usize,
    pub would_delete: usize,
    pub total: usize,
}

impl BulkSummary {
    /// Count one outcome.
    pub fn record(&mut self, outcome: &BulkOutcome) {
        match outcome {
            BulkOutcome::Created => self.created += 1,
            BulkOutcome::Updated => self.updated += 1,
            BulkOutcome::Deleted => self.deleted += 1,
            BulkOutcome::Skipped(_) => self.skipped += 1,
            BulkOutcome::Failed(_) => self.failed += 1,
            BulkOutcome::WouldCreate => self.would_create += 1,
            BulkOutcome::WouldUpdate => self.would_update += 1,
            BulkOutcome::WouldDelete => self.would_delete += 1,
        }
        self.total += 1;
    }

    /// Writes that went through.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.created + self.updated + self.deleted
    }

    #[must_use]
    pub fn from_results(results: &[BulkItemResult]) -> Self {
        let mut summary = Self::default();
        for item in results {
            summary.record(&item.outcome);
        }
        summary
    }
}

/// Full report of a bulk import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkReport {
    pub domain: String,
    pub dry_run: bool,
    pub results: Vec<BulkItemResult>,
    pub summary: BulkSummary,
}
