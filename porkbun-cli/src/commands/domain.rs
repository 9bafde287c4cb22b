//! `porkbun domain ...`

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use porkbun_api::{Domain, DomainPricing, DomainRegistration};
use porkbun_core::services::SslService;

use crate::backend::CoreService;
use crate::commands::print_json;
use crate::console::Console;
use crate::table::{Table, yes_no};

#[derive(Subcommand, Debug)]
pub enum DomainCommand {
    /// List all domains in the account
    List {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Check availability and pricing
    Search {
        domain: String,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Register a domain (charges the account balance)
    Buy {
        domain: String,
        /// Skip the typed confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Show the authoritative nameservers
    Ns { domain: String },
    /// Replace the authoritative nameservers
    NsSet {
        domain: String,
        #[arg(required = true, num_args = 1..)]
        nameservers: Vec<String>,
    },
    /// Retrieve the free SSL certificate bundle
    Ssl {
        domain: String,
        /// Write PREFIX.crt, PREFIX.key and PREFIX.ca
        #[arg(short, long, value_name = "PREFIX")]
        output: Option<PathBuf>,
    },
}

pub async fn run<R: BufRead, W: Write>(
    command: DomainCommand,
    core: &CoreService,
    console: &mut Console<R, W>,
) -> Result<()> {
    match command {
        DomainCommand::List { json } => {
            let domains = core.domain().list_domains().await?;
            if json {
                print_json(console, &domains)
            } else {
                print_domains(console, &domains)
            }
        }
        DomainCommand::Search { domain, json } => {
            let pricing = core.domain().check_domain(&domain).await?;
            if json {
                print_json(console, &pricing)
            } else {
                print_pricing(console, &pricing)
            }
        }
        DomainCommand::Buy { domain, yes } => buy(core, console, &domain, yes).await,
        DomainCommand::Ns { domain } => {
            let nameservers = core.domain().get_nameservers(&domain).await?;
            if nameservers.is_empty() {
                writeln!(console, "No nameservers found (using Porkbun defaults)")?;
                return Ok(());
            }
            writeln!(console, "Nameservers for {domain}:")?;
            for ns in nameservers {
                writeln!(console, "  {ns}")?;
            }
            Ok(())
        }
        DomainCommand::NsSet {
            domain,
            nameservers,
        } => {
            core.domain().set_nameservers(&domain, &nameservers).await?;
            writeln!(console, "Nameservers updated for {domain}")?;
            Ok(())
        }
        DomainCommand::Ssl { domain, output } => {
            let bundle = core.ssl().retrieve(&domain).await?;
            if let Some(prefix) = output {
                let files = SslService::save_bundle(&bundle, &prefix).await?;
                writeln!(
                    console,
                    "SSL files written: {}, {}, {}",
                    files.certificate.display(),
                    files.private_key.display(),
                    files.intermediate.display()
                )?;
            } else {
                writeln!(console, "=== Certificate Chain ===")?;
                writeln!(console, "{}", bundle.certificate_chain.trim_end())?;
                writeln!(console)?;
                writeln!(console, "=== Private Key ===")?;
                writeln!(console, "[REDACTED - use --output to save]")?;
            }
            Ok(())
        }
    }
}

async fn buy<R: BufRead, W: Write>(
    core: &CoreService,
    console: &mut Console<R, W>,
    domain: &str,
    yes: bool,
) -> Result<()> {
    writeln!(console, "PREPARING TO BUY DOMAIN: {domain}")?;
    writeln!(console, "This will charge your account.")?;
    if !yes && !console.confirm_word("Are you sure? Type 'YES' to confirm: ", "YES")? {
        writeln!(console, "Aborted.")?;
        return Ok(());
    }

    let options = DomainRegistration {
        whois_privacy: true,
        auto_renew: true,
        ..DomainRegistration::default()
    };
    let result = core.domain().buy_domain(domain, &options).await?;
    writeln!(console, "Success! Domain registered.")?;
    if let Some(invoice) = result.invoice_id {
        writeln!(console, "Invoice ID: {invoice}")?;
    }
    Ok(())
}

pub fn print_domains<W: Write>(out: &mut W, domains: &[Domain]) -> Result<()> {
    if domains.is_empty() {
        writeln!(out, "No domains found.")?;
        return Ok(());
    }

    let mut table = Table::new(&["Domain", "Status", "TLD", "Created", "Expires", "AutoRenew"]);
    for d in domains {
        table.row(vec![
            d.domain.clone(),
            d.status.clone(),
            d.tld.clone(),
            d.create_date
                .map(|dt| dt.date_naive().to_string())
                .unwrap_or_default(),
            d.expire_date
                .map(|dt| dt.date_naive().to_string())
                .unwrap_or_default(),
            yes_no(d.auto_renew),
        ]);
    }
    write!(out, "{}", table.render())?;
    Ok(())
}

pub fn print_pricing<W: Write>(out: &mut W, pricing: &DomainPricing) -> Result<()> {
    writeln!(out, "Domain: {}", pricing.domain)?;
    if pricing.registration.is_none() && pricing.renewal.is_none() && pricing.transfer.is_none() {
        writeln!(out, "Pricing information not available")?;
        return Ok(());
    }
    let price = |p: &Option<String>| p.as_deref().unwrap_or("N/A").to_string();
    writeln!(out, "Registration: ${}", price(&pricing.registration))?;
    writeln!(out, "Renewal: ${}", price(&pricing.renewal))?;
    writeln!(out, "Transfer: ${}", price(&pricing.transfer))?;
    Ok(())
}
