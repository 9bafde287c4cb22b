//! `porkbun bulk ...`

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use porkbun_core::services::BulkService;
use porkbun_core::types::{BulkFormat, BulkReport};

use crate::backend::CoreService;
use crate::commands::print_json;
use crate::console::Console;

#[derive(Subcommand, Debug)]
pub enum BulkCommand {
    /// Export every record of a domain
    Export {
        domain: String,
        /// json or csv; defaults to the output file's extension, else json
        #[arg(short, long)]
        format: Option<BulkFormat>,
        /// Write to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Apply a JSON or CSV batch of record changes
    Import {
        file: PathBuf,
        /// Target domain (required for CSV, overrides the JSON document's)
        #[arg(short, long)]
        domain: Option<String>,
        /// json or csv; detected from the extension when omitted
        #[arg(short, long)]
        format: Option<BulkFormat>,
        /// Show what would change without writing anything
        #[arg(long)]
        dry_run: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Per-item failures do not fail the command; only file and preflight errors do.
pub async fn run<R: BufRead, W: Write>(
    command: BulkCommand,
    core: &CoreService,
    console: &mut Console<R, W>,
) -> Result<()> {
    match command {
        BulkCommand::Export {
            domain,
            format,
            output,
        } => {
            let format = format
                .or_else(|| output.as_deref().map(BulkFormat::from_path))
                .unwrap_or_default();
            let (text, count) = core.bulk().export(&domain, format).await?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, &text)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    writeln!(console, "Exported {count} records to {}", path.display())?;
                }
                None => {
                    write!(console, "{text}")?;
                    if !text.ends_with('\n') {
                        writeln!(console)?;
                    }
                }
            }
            Ok(())
        }
        BulkCommand::Import {
            file,
            domain,
            format,
            dry_run,
            json,
        } => {
            let batch = BulkService::load_file(&file, format, domain.as_deref()).await?;
            let report = core.bulk().import(&batch, dry_run).await?;
            if json {
                print_json(console, &report)
            } else {
                print_report(console, &report)
            }
        }
    }
}

pub fn print_report<W: Write>(out: &mut W, report: &BulkReport) -> Result<()> {
    if report.dry_run {
        writeln!(out, "Dry run for {}: nothing was changed.", report.domain)?;
    } else {
        writeln!(out, "Import into {}:", report.domain)?;
    }

    for item in &report.results {
        let name = if item.name.is_empty() { "@" } else { item.name.as_str() };
        writeln!(
            out,
            "  [{}] {} {} {name}: {}",
            item.index, item.action, item.record_type, item.outcome
        )?;
    }

    let s = &report.summary;
    if report.dry_run {
        writeln!(
            out,
            "Summary: {} would-create, {} would-update, {} would-delete, {} skipped, {} failed ({} total)",
            s.would_create, s.would_update, s.would_delete, s.skipped, s.failed, s.total
        )?;
    } else {
        writeln!(
            out,
            "Summary: {} created, {} updated, {} deleted, {} skipped, {} failed ({} total)",
            s.created, s.updated, s.deleted, s.skipped, s.failed, s.total
        )?;
    }
    Ok(())
}
