//! `porkbun dns ...`

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Subcommand;
use porkbun_api::{DnsRecord, DnsRecordType, RecordSpec};
use porkbun_core::services::UpsertOutcome;

use crate::backend::CoreService;
use crate::commands::print_json;
use crate::console::Console;
use crate::table::{Table, opt_cell, truncate};

/// Content column width in record tables.
const CONTENT_WIDTH: usize = 50;

/// Type, content and optional fields of one record.
#[derive(clap::Args, Debug, Clone)]
pub struct RecordArgs {
    /// Record type (A, AAAA, CNAME, MX, TXT, ...)
    #[arg(value_name = "TYPE")]
    pub record_type: DnsRecordType,

    /// Record content
    pub content: String,

    /// Subdomain, empty for the apex
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Priority (MX, SRV)
    #[arg(short, long)]
    pub prio: Option<u32>,

    /// TTL in seconds
    #[arg(short, long)]
    pub ttl: Option<u32>,
}

impl RecordArgs {
    pub fn to_spec(&self) -> RecordSpec {
        RecordSpec::new(self.record_type, self.name.trim(), self.content.as_str())
            .with_prio(self.prio)
            .with_ttl(self.ttl)
    }
}

#[derive(Subcommand, Debug)]
pub enum DnsCommand {
    /// List the records of a domain
    List {
        domain: String,
        /// Only records of this type
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        record_type: Option<DnsRecordType>,
        /// Only records at this subdomain (needs --type)
        #[arg(short, long, requires = "record_type")]
        name: Option<String>,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a record
    Create {
        domain: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Replace a record by id
    Edit {
        domain: String,
        id: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Create the record, or update the one with the same name and type
    Upsert {
        domain: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Delete a record by id
    Delete { domain: String, id: String },
    /// Update every record with the given name and type
    EditByNameType {
        domain: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Delete every record with the given name and type
    DeleteByNameType {
        domain: String,
        #[arg(value_name = "TYPE")]
        record_type: DnsRecordType,
        /// Subdomain, empty for the apex
        #[arg(short, long, default_value = "")]
        name: String,
    },
}

pub async fn run<R: BufRead, W: Write>(
    command: DnsCommand,
    core: &CoreService,
    console: &mut Console<R, W>,
) -> Result<()> {
    let dns = core.dns();
    match command {
        DnsCommand::List {
            domain,
            record_type,
            name,
            json,
        } => {
            let records = match (record_type, name) {
                (Some(t), Some(name)) => dns.list_by_name_type(&domain, t, name.trim()).await?,
                (t, _) => dns.list_records(&domain, t).await?,
            };
            if json {
                print_json(console, &records)
            } else {
                print_records(console, &records)
            }
        }
        DnsCommand::Create { domain, record } => {
            let id = dns.create_record(&domain, &record.to_spec()).await?;
            writeln!(console, "Record created successfully (id {id}).")?;
            Ok(())
        }
        DnsCommand::Edit { domain, id, record } => {
            dns.edit_record(&domain, &id, &record.to_spec()).await?;
            writeln!(console, "Record updated successfully.")?;
            Ok(())
        }
        DnsCommand::Upsert { domain, record } => {
            let outcome = dns.upsert_record(&domain, &record.to_spec()).await?;
            print_upsert(console, &outcome)
        }
        DnsCommand::Delete { domain, id } => {
            dns.delete_record(&domain, &id).await?;
            writeln!(console, "Record deleted successfully.")?;
            Ok(())
        }
        DnsCommand::EditByNameType { domain, record } => {
            dns.edit_by_name_type(&domain, &record.to_spec()).await?;
            writeln!(console, "Records updated successfully.")?;
            Ok(())
        }
        DnsCommand::DeleteByNameType {
            domain,
            record_type,
            name,
        } => {
            dns.delete_by_name_type(&domain, record_type, name.trim())
                .await?;
            writeln!(console, "Records deleted successfully.")?;
            Ok(())
        }
    }
}

pub fn print_records<W: Write>(out: &mut W, records: &[DnsRecord]) -> Result<()> {
    if records.is_empty() {
        writeln!(out, "No records found.")?;
        return Ok(());
    }

    let mut table = Table::new(&["ID", "Type", "Name", "Content", "Prio", "TTL"]);
    for r in records {
        table.row(vec![
            r.id.clone(),
            r.record_type.to_string(),
            r.name.clone(),
            truncate(&r.content, CONTENT_WIDTH),
            opt_cell(r.prio),
            opt_cell(r.ttl),
        ]);
    }
    write!(out, "{}", table.render())?;
    Ok(())
}

pub fn print_upsert<W: Write>(out: &mut W, outcome: &UpsertOutcome) -> Result<()> {
    match outcome {
        UpsertOutcome::Created { record_id } => {
            writeln!(out, "Record created (id {record_id}).")?;
        }
        UpsertOutcome::Updated { record_id } => {
            writeln!(out, "Record {record_id} updated.")?;
        }
        UpsertOutcome::Unchanged { record_id } => {
            writeln!(out, "Record {record_id} already up to date.")?;
        }
    }
    Ok(())
}
