//! `porkbun url ...`

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Subcommand;
use porkbun_api::UrlForward;

use crate::backend::CoreService;
use crate::commands::print_json;
use crate::console::Console;
use crate::table::{Table, yes_no};

#[derive(Subcommand, Debug)]
pub enum UrlCommand {
    /// List URL forwards
    List {
        domain: String,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a URL forward
    Set {
        domain: String,
        /// Destination URL
        location: String,
        /// Subdomain to forward, empty for the apex
        #[arg(short, long, default_value = "")]
        subdomain: String,
        /// Redirect status code
        #[arg(short = 't', long = "type", default_value_t = 302, value_parser = parse_redirect)]
        status_code: u16,
        /// Also forward every subdomain
        #[arg(short, long)]
        wildcard: bool,
        /// Append the request path to the destination
        #[arg(short = 'p', long = "path")]
        include_path: bool,
    },
    /// Delete a URL forward
    Delete { domain: String, id: String },
}

fn parse_redirect(raw: &str) -> Result<u16, String> {
    match raw.trim() {
        "301" => Ok(301),
        "302" => Ok(302),
        "307" => Ok(307),
        other => Err(format!("'{other}' is not one of 301, 302, 307")),
    }
}

pub async fn run<R: BufRead, W: Write>(
    command: UrlCommand,
    core: &CoreService,
    console: &mut Console<R, W>,
) -> Result<()> {
    let forwards = core.url_forward();
    match command {
        UrlCommand::List { domain, json } => {
            let list = forwards.list(&domain).await?;
            if json {
                print_json(console, &list)
            } else {
                print_forwards(console, &list)
            }
        }
        UrlCommand::Set {
            domain,
            location,
            subdomain,
            status_code,
            wildcard,
            include_path,
        } => {
            forwards
                .set(&domain, &location, &subdomain, status_code, wildcard, include_path)
                .await?;
            writeln!(console, "URL forward set successfully.")?;
            Ok(())
        }
        UrlCommand::Delete { domain, id } => {
            forwards.delete(&domain, &id).await?;
            writeln!(console, "URL forward deleted successfully.")?;
            Ok(())
        }
    }
}

pub fn print_forwards<W: Write>(out: &mut W, forwards: &[UrlForward]) -> Result<()> {
    if forwards.is_empty() {
        writeln!(out, "No forwards found.")?;
        return Ok(());
    }

    let mut table = Table::new(&["ID", "Subdomain", "Location", "Type", "Wildcard", "Path"]);
    for f in forwards {
        let subdomain = if f.subdomain.is_empty() {
            "(root)".to_string()
        } else {
            f.subdomain.clone()
        };
        table.row(vec![
            f.id.clone(),
            subdomain,
            f.location.clone(),
            f.forward_type.to_string(),
            yes_no(f.wildcard),
            yes_no(f.include_path),
        ]);
    }
    write!(out, "{}", table.render())?;
    Ok(())
}
