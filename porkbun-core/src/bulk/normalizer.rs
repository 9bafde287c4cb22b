//! Record normalizer
//!
//! Import turns each raw entry into `Result<BulkOperation, ValidationError>`: a bad
//! entry is reported in the batch, it never rejects the file. Only a file that is not
//! JSON/CSV at all, lacks `records`, or has no target domain is fatal.
//!
//! Export writes relative names, `prio` only for MX/SRV and an explicit
//! `"action": "create"` on every entry.

use serde_json::{Map, Value};

use porkbun_api::{DnsRecord, DnsRecordType, RecordSpec, full_name_to_relative};

use crate::error::{CoreError, CoreResult};
use crate::types::{
    BulkAction, BulkDocument, BulkEntry, BulkFile, BulkFormat, BulkOperation, BulkRecord,
    DeleteTarget, ValidationError,
};

/// CSV columns written on export, in order.
const CSV_COLUMNS: [&str; 6] = ["action", "type", "name", "content", "prio", "ttl"];
/// Optional trailing column carrying a registrar id for deletes.
const CSV_ID_COLUMN: &str = "id";

// ============ Import ============

/// Parse a bulk file in the given format.
///
/// `domain_override` wins over a `domain` field in the file. CSV has no domain
/// field, so it needs the override.
pub fn parse(content: &str, format: BulkFormat, domain_override: Option<&str>) -> CoreResult<BulkFile> {
    match format {
        BulkFormat::Json => parse_json(content, domain_override),
        BulkFormat::Csv => parse_csv(content, domain_override),
    }
}

/// Parse `{ "domain": ..., "records": [...] }`.
pub fn parse_json(content: &str, domain_override: Option<&str>) -> CoreResult<BulkFile> {
    let root: Value = serde_json::from_str(content)
        .map_err(|e| CoreError::BulkFile(format!("invalid JSON: {e}")))?;

    let Value::Object(root) = root else {
        return Err(CoreError::BulkFile(
            "expected a JSON object with a 'records' array".to_string(),
        ));
    };

    let Some(Value::Array(records)) = root.get("records") else {
        return Err(CoreError::BulkFile("missing 'records' array".to_string()));
    };

    let file_domain = root.get("domain").and_then(Value::as_str);
    let domain = resolve_domain(domain_override, file_domain)?;

    let entries = records
        .iter()
        .enumerate()
        .map(|(i, raw)| match raw {
            Value::Object(fields) => normalize_entry(i + 1, fields, &domain),
            other => BulkEntry {
                index: i + 1,
                action: String::new(),
                record_type: String::new(),
                name: String::new(),
                operation: Err(ValidationError::new(format!(
                    "entry must be an object, got {}",
                    json_kind(other)
                ))),
            },
        })
        .collect();

    Ok(BulkFile { domain, entries })
}

/// Parse CSV with a header row. Columns are matched by name, so order is free and
/// unknown columns are ignored.
pub fn parse_csv(content: &str, domain_override: Option<&str>) -> CoreResult<BulkFile> {
    let domain = resolve_domain(domain_override, None)?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CoreError::BulkFile(format!("invalid CSV header: {e}")))?
        .iter()
        .map(str::to_ascii_lowercase)
        .collect();

    if !headers.iter().any(|h| h == "type") && !headers.iter().any(|h| h == CSV_ID_COLUMN) {
        return Err(CoreError::BulkFile(format!(
            "CSV header must name the columns ({})",
            CSV_COLUMNS.join(",")
        )));
    }

    let mut entries = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row.map_err(|e| CoreError::BulkFile(format!("invalid CSV row {}: {e}", i + 1)))?;
        let fields: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.clone(), Value::String(v.to_string())))
            .collect();
        entries.push(normalize_entry(i + 1, &fields, &domain));
    }

    Ok(BulkFile { domain, entries })
}

fn resolve_domain(domain_override: Option<&str>, file_domain: Option<&str>) -> CoreResult<String> {
    domain_override
        .or(file_domain)
        .map(|d| d.trim().trim_end_matches('.').to_ascii_lowercase())
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            CoreError::BulkFile(
                "no target domain: pass --domain or set \"domain\" in the file".to_string(),
            )
        })
}

fn normalize_entry(index: usize, fields: &Map<String, Value>, domain: &str) -> BulkEntry {
    let label = |key: &str| match fields.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    let action = label("action");
    let record_type = label("type").to_ascii_uppercase();
    let name = text_field(fields, "name")
        .ok()
        .flatten()
        .map(|n| full_name_to_relative(&n, domain))
        .unwrap_or_default();

    BulkEntry {
        index,
        action: if action.is_empty() {
            BulkAction::Create.as_str().to_string()
        } else {
            action.to_ascii_lowercase()
        },
        record_type,
        name,
        operation: build_operation(fields, domain),
    }
}

fn build_operation(fields: &Map<String, Value>, domain: &str) -> Result<BulkOperation, ValidationError> {
    let action = match text_field(fields, "action")? {
        Some(raw) => raw.parse::<BulkAction>()?,
        None => BulkAction::Create,
    };

    let name = text_field(fields, "name")?
        .map(|n| full_name_to_relative(&n, domain))
        .unwrap_or_default();

    if action == BulkAction::Delete {
        if let Some(id) = text_field(fields, "id")? {
            return Ok(BulkOperation::Delete(DeleteTarget::ById(id)));
        }
        let record_type = required_type(fields)
            .map_err(|e| ValidationError::new(format!("delete needs 'id' or 'type': {e}")))?;
        return Ok(BulkOperation::Delete(DeleteTarget::ByNameType { record_type, name }));
    }

    let record_type = required_type(fields)?;
    let content = text_field(fields, "content")?
        .ok_or_else(|| ValidationError::new("missing 'content'"))?;
    let spec = RecordSpec::new(record_type, name, content)
        .with_prio(number_field(fields, "prio")?)
        .with_ttl(number_field(fields, "ttl")?);

    Ok(match action {
        BulkAction::Upsert => BulkOperation::Upsert(spec),
        _ => BulkOperation::Create(spec),
    })
}

fn required_type(fields: &Map<String, Value>) -> Result<DnsRecordType, ValidationError> {
    let raw = text_field(fields, "type")?.ok_or_else(|| ValidationError::new("missing 'type'"))?;
    raw.parse::<DnsRecordType>()
        .map_err(|e| ValidationError::new(e.to_string()))
}

/// Trimmed string field; absent, `null` and `""` are `None`. Numbers are accepted
/// (ids are often numeric).
fn text_field(fields: &Map<String, Value>, key: &str) -> Result<Option<String>, ValidationError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            Ok((!s.is_empty()).then(|| s.to_string()))
        }
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(ValidationError::new(format!(
            "'{key}' must be a string, got {}",
            json_kind(other)
        ))),
    }
}

/// Non-negative integer given as a number or numeric string; absent, `null` and `""`
/// are `None`.
fn number_field(fields: &Map<String, Value>, key: &str) -> Result<Option<u32>, ValidationError> {
    let invalid = |shown: &dyn std::fmt::Display| {
        ValidationError::new(format!("'{key}' must be a non-negative integer, got {shown}"))
    };

    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| invalid(&format!("'{s}'"))),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| invalid(n)),
        Some(other) => Err(invalid(&json_kind(other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============ Export ============

/// Bulk document recreating `records` under `domain`.
pub fn document_from_records(domain: &str, records: &[DnsRecord]) -> BulkDocument {
    BulkDocument {
        domain: domain.to_string(),
        records: records
            .iter()
            .map(|r| BulkRecord {
                action: BulkAction::Create.as_str().to_string(),
                record_type: Some(r.record_type.as_str().to_string()),
                name: Some(r.relative_name(domain)),
                content: Some(r.content.clone()),
                prio: r.prio.filter(|_| r.record_type.has_priority()),
                ttl: r.ttl,
                id: None,
            })
            .collect(),
    }
}

/// Bulk document for already-normalized operations.
pub fn document_from_operations<'a>(
    domain: &str,
    operations: impl IntoIterator<Item = &'a BulkOperation>,
) -> BulkDocument {
    let records = operations
        .into_iter()
        .map(|op| match op {
            BulkOperation::Create(spec) | BulkOperation::Upsert(spec) => BulkRecord {
                action: op.action().as_str().to_string(),
                record_type: Some(spec.record_type.as_str().to_string()),
                name: Some(spec.name.clone()),
                content: Some(spec.content.clone()),
                prio: spec.prio,
                ttl: spec.ttl,
                id: None,
            },
            BulkOperation::Delete(DeleteTarget::ById(id)) => BulkRecord {
                action: BulkAction::Delete.as_str().to_string(),
                id: Some(id.clone()),
                ..BulkRecord::default()
            },
            BulkOperation::Delete(DeleteTarget::ByNameType { record_type, name }) => BulkRecord {
                action: BulkAction::Delete.as_str().to_string(),
                record_type: Some(record_type.as_str().to_string()),
                name: Some(name.clone()),
                ..BulkRecord::default()
            },
        })
        .collect();

    BulkDocument {
        domain: domain.to_string(),
        records,
    }
}

/// Serialize in the given format.
pub fn render(document: &BulkDocument, format: BulkFormat) -> CoreResult<String> {
    match format {
        BulkFormat::Json => to_json(document),
        BulkFormat::Csv => to_csv(document),
    }
}

pub fn to_json(document: &BulkDocument) -> CoreResult<String> {
    serde_json::to_string_pretty(document).map_err(|e| CoreError::Serialization(e.to_string()))
}

/// CSV with the fixed columns, plus `id` when any entry carries one.
pub fn to_csv(document: &BulkDocument) -> CoreResult<String> {
    let with_id = document.records.iter().any(|r| r.id.is_some());
    let mut writer = csv::Writer::from_writer(Vec::new());

    let csv_err = |e: csv::Error| CoreError::Serialization(e.to_string());

    let mut header: Vec<&str> = CSV_COLUMNS.to_vec();
    if with_id {
        header.push(CSV_ID_COLUMN);
    }
    writer.write_record(&header).map_err(csv_err)?;

    for record in &document.records {
        let mut row = vec![
            record.action.clone(),
            record.record_type.clone().unwrap_or_default(),
            record.name.clone().unwrap_or_default(),
            record.content.clone().unwrap_or_default(),
            record.prio.map(|p| p.to_string()).unwrap_or_default(),
            record.ttl.map(|t| t.to_string()).unwrap_or_default(),
        ];
        if with_id {
            row.push(record.id.clone().unwrap_or_default());
        }
        writer.write_record(&row).map_err(csv_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Serialization(e.to_string()))
}
