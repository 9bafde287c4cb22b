//! `porkbun interactive`: numbered menus over the other commands
//!
//! Errors inside a menu are printed and the menu is shown again; end of input
//! backs out one level at a time.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use porkbun_api::{DnsRecordType, RecordSpec};
use porkbun_core::types::BulkFormat;

use crate::backend::CoreService;
use crate::commands::bulk::{self, BulkCommand};
use crate::commands::dns::{print_records, print_upsert};
use crate::commands::domain::{self, DomainCommand};
use crate::commands::url::print_forwards;
use crate::console::Console;

const MAIN_MENU: &[&str] = &[
    "List domains",
    "Check domain availability",
    "DNS records",
    "URL forwarding",
    "Export DNS records",
    "Import DNS records",
];

const DNS_MENU: &[&str] = &[
    "List all records",
    "Create record",
    "Edit record",
    "Delete record",
    "Create or update record",
];

const URL_MENU: &[&str] = &["List forwards", "Add forward", "Delete forward"];

pub async fn run<R: BufRead, W: Write>(core: &CoreService, console: &mut Console<R, W>) -> Result<()> {
    writeln!(console, "Porkbun interactive mode")?;

    while let Some(choice) = menu(console, "Main menu", MAIN_MENU, "Quit")? {
        let result = match choice {
            1 => domain::run(DomainCommand::List { json: false }, core, console).await,
            2 => check_domain(core, console).await,
            3 => dns_menu(core, console).await,
            4 => url_menu(core, console).await,
            5 => export(core, console).await,
            _ => import(core, console).await,
        };
        report_error(console, result)?;
    }

    writeln!(console, "Bye.")?;
    Ok(())
}

/// Show a numbered menu; `None` for `0` or end of input.
fn menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    title: &str,
    items: &[&str],
    exit_label: &str,
) -> Result<Option<usize>> {
    loop {
        writeln!(console)?;
        writeln!(console, "{title}")?;
        for (i, item) in items.iter().enumerate() {
            writeln!(console, "  {}) {item}", i + 1)?;
        }
        writeln!(console, "  0) {exit_label}")?;

        let Some(answer) = console.ask("> ")? else {
            return Ok(None);
        };
        match answer.parse::<usize>() {
            Ok(0) => return Ok(None),
            Ok(n) if n <= items.len() => return Ok(Some(n)),
            _ => writeln!(console, "Invalid choice: {answer}")?,
        }
    }
}

fn report_error<R: BufRead, W: Write>(console: &mut Console<R, W>, result: Result<()>) -> Result<()> {
    if let Err(e) = result {
        log::debug!("Menu action failed: {e:?}");
        writeln!(console, "Error: {e:#}")?;
    }
    Ok(())
}

/// Choose one of the account's domains, or type one in.
async fn pick_domain<R: BufRead, W: Write>(
    core: &CoreService,
    console: &mut Console<R, W>,
) -> Result<Option<String>> {
    let domains = match core.domain().list_domains().await {
        Ok(list) => list.into_iter().map(|d| d.domain).collect::<Vec<_>>(),
        Err(e) => {
            log::warn!("Could not list domains: {e}");
            Vec::new()
        }
    };
    if domains.is_empty() {
        return console.ask_required("Domain name: ");
    }

    let mut items: Vec<&str> = domains.iter().map(String::as_str).collect();
    items.push("[Enter manually]");
    match menu(console, "Select domain", &items, "Back")? {
        Some(n) if n <= domains.len() => Ok(Some(domains[n - 1].clone())),
        Some(_) => console.ask_required("Domain name: "),
        None => Ok(None),
    }
}

async fn check_domain<R: BufRead, W: Write>(
    core: &CoreService,
    console: &mut Console<R, W>,
) -> Result<()> {
    let Some(domain) = console.ask_required("Domain to check: ")? else {
        return Ok(());
    };
    domain::run(DomainCommand::Search { domain, json: false }, core, console).await
}

/// Ask for the fields of a record. `None` when the user leaves a required one empty.
fn prompt_spec<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Option<RecordSpec>> {
    let Some(raw_type) = console.ask_or("Record type", "A")? else {
        return Ok(None);
    };
    let record_type: DnsRecordType = raw_type.parse()?;

    let Some(name) = console.ask("Name (empty for the apex): ")? else {
        return Ok(None);
    };
    let Some(content) = console.ask_required("Content: ")? else {
        return Ok(None);
    };
    let Some(ttl) = console.ask_or("TTL", "600")? else {
        return Ok(None);
    };
    let ttl: u32 = ttl.parse().with_context(|| format!("invalid TTL '{ttl}'"))?;

    let prio = if record_type.has_priority() {
        let Some(prio) = console.ask_or("Priority", "10")? else {
            return Ok(None);
        };
        Some(
            prio.parse::<u32>()
                .with_context(|| format!("invalid priority '{prio}'"))?,
        )
    } else {
        None
    };

    Ok(Some(
        RecordSpec::new(record_type, name, content)
            .with_ttl(Some(ttl))
            .with_prio(prio),
    ))
}

async fn dns_menu<R: BufRead, W: Write>(core: &CoreService, console: &mut Console<R, W>) -> Result<()> {
    let Some(domain) = pick_domain(core, console).await? else {
        return Ok(());
    };

    while let Some(choice) = menu(console, &format!("DNS for {domain}"), DNS_MENU, "Back")? {
        let result = dns_action(core, console, &domain, choice).await;
        report_error(console, result)?;
    }
    Ok(())
}

async fn dns_action<R: BufRead, W: Write>(
    core: &CoreService,
    console: &mut Console<R, W>,
    domain: &str,
    choice: usize,
) -> Result<()> {
    let dns = core.dns();
    match choice {
        1 => {
            let records = dns.list_records(domain, None).await?;
            print_records(console, &records)
        }
        2 => {
            if let Some(spec) = prompt_spec(console)? {
                let id = dns.create_record(domain, &spec).await?;
                writeln!(console, "Record created (id {id}).")?;
            }
            Ok(())
        }
        3 => {
            let records = dns.list_records(domain, None).await?;
            print_records(console, &records)?;
            let Some(id) = console.ask_required("Record ID: ")? else {
                return Ok(());
            };
            if let Some(spec) = prompt_spec(console)? {
                dns.edit_record(domain, &id, &spec).await?;
                writeln!(console, "Record {id} updated.")?;
            }
            Ok(())
        }
        4 => {
            let records = dns.list_records(domain, None).await?;
            print_records(console, &records)?;
            let Some(id) = console.ask_required("Record ID: ")? else {
                return Ok(());
            };
            if console.confirm(&format!("Delete record {id}?"))? {
                dns.delete_record(domain, &id).await?;
                writeln!(console, "Record {id} deleted.")?;
            }
            Ok(())
        }
        _ => {
            if let Some(spec) = prompt_spec(console)? {
                let outcome = dns.upsert_record(domain, &spec).await?;
                print_upsert(console, &outcome)?;
            }
            Ok(())
        }
    }
}

fn parse_redirect(raw: &str) -> Result<u16> {
    match raw.trim() {
        "301" => Ok(301),
        "302" => Ok(302),
        "307" => Ok(307),
        other => Err(anyhow!("'{other}' is not one of 301, 302, 307")),
    }
}

async fn url_menu<R: BufRead, W: Write>(core: &CoreService, console: &mut Console<R, W>) -> Result<()> {
    let Some(domain) = pick_domain(core, console).await? else {
        return Ok(());
    };

    let title = format!("URL forwarding for {domain}");
    while let Some(choice) = menu(console, &title, URL_MENU, "Back")? {
        let result = url_action(core, console, &domain, choice).await;
        report_error(console, result)?;
    }
    Ok(())
}

async fn url_action<R: BufRead, W: Write>(
    core: &CoreService,
    console: &mut Console<R, W>,
    domain: &str,
    choice: usize,
) -> Result<()> {
    let forwards = core.url_forward();
    match choice {
        1 => {
            let list = forwards.list(domain).await?;
            print_forwards(console, &list)
        }
        2 => {
            let Some(subdomain) = console.ask("Subdomain (empty for the apex): ")? else {
                return Ok(());
            };
            let Some(location) = console.ask_required("Destination URL: ")? else {
                return Ok(());
            };
            let Some(code) = console.ask_or("Redirect type (301/302/307)", "302")? else {
                return Ok(());
            };
            let code = parse_redirect(&code)?;
            let wildcard = console.confirm("Forward all subdomains too?")?;
            let include_path = console.confirm("Append the request path?")?;
            forwards
                .set(domain, &location, &subdomain, code, wildcard, include_path)
                .await?;
            writeln!(console, "URL forward set.")?;
            Ok(())
        }
        _ => {
            let list = forwards.list(domain).await?;
            print_forwards(console, &list)?;
            let Some(id) = console.ask_required("Forward ID: ")? else {
                return Ok(());
            };
            if console.confirm(&format!("Delete forward {id}?"))? {
                forwards.delete(domain, &id).await?;
                writeln!(console, "URL forward {id} deleted.")?;
            }
            Ok(())
        }
    }
}

async fn export<R: BufRead, W: Write>(core: &CoreService, console: &mut Console<R, W>) -> Result<()> {
    let Some(domain) = pick_domain(core, console).await? else {
        return Ok(());
    };
    let Some(format) = console.ask_or("Format (json/csv)", "json")? else {
        return Ok(());
    };
    let format: BulkFormat = format.parse().map_err(|e: String| anyhow!(e))?;
    let Some(output) = console.ask("Output file (empty to print): ")? else {
        return Ok(());
    };
    let output = (!output.is_empty()).then(|| PathBuf::from(output));

    let command = BulkCommand::Export {
        domain,
        format: Some(format),
        output,
    };
    bulk::run(command, core, console).await
}

async fn import<R: BufRead, W: Write>(core: &CoreService, console: &mut Console<R, W>) -> Result<()> {
    let Some(file) = console.ask_required("File to import: ")? else {
        return Ok(());
    };
    let Some(domain) = console.ask("Target domain (empty to use the file's): ")? else {
        return Ok(());
    };
    let file = PathBuf::from(file);
    let domain = (!domain.is_empty()).then_some(domain);

    let preview = BulkCommand::Import {
        file: file.clone(),
        domain: domain.clone(),
        format: None,
        dry_run: true,
        json: false,
    };
    bulk::run(preview, core, console).await?;

    if console.confirm("Apply these changes?")? {
        let apply = BulkCommand::Import {
            file,
            domain,
            format: None,
            dry_run: false,
            json: false,
        };
        bulk::run(apply, core, console).await?;
    }
    Ok(())
}
