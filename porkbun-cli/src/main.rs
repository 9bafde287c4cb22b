//! `porkbun`: command-line client for the Porkbun registrar API
//!
//! Credentials come from `--api-key`-style flags of `configure`, the
//! `PORKBUN_API_KEY` / `PORKBUN_SECRET_KEY` environment variables, or the config
//! file written by `porkbun configure`, in that order.
//!
//! Results go to stdout; logs and errors go to stderr.

mod backend;
mod commands;
mod console;
mod table;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use porkbun_core::{ConfigOverrides, FileCredentialStore};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use backend::CoreService;
use commands::bulk::BulkCommand;
use commands::dns::DnsCommand;
use commands::domain::DomainCommand;
use commands::url::UrlCommand;
use console::Console;

#[derive(Parser, Debug)]
#[command(
    name = "porkbun",
    version,
    about = "Manage Porkbun domains, DNS records and URL forwards"
)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Config file (default: platform config dir, or PORKBUN_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Save API credentials to the config file
    Configure(commands::configure::Args),
    /// Test the API connection and credentials
    Ping,
    /// Domains, nameservers and SSL certificates
    #[command(subcommand)]
    Domain(DomainCommand),
    /// DNS records
    #[command(subcommand)]
    Dns(DnsCommand),
    /// URL forwarding
    #[command(subcommand)]
    Url(UrlCommand),
    /// Export and import record batches
    #[command(subcommand)]
    Bulk(BulkCommand),
    /// Menu-driven mode
    #[command(visible_alias = "i")]
    Interactive,
}

/// Default log filter for a `-v` count.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// stderr logging; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .without_time()
                .with_target(verbose > 1),
        )
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());

    let overrides = ConfigOverrides {
        timeout_secs: cli.timeout,
        config_path: cli.config,
        ..ConfigOverrides::default()
    };

    if let Commands::Configure(args) = cli.command {
        let store = FileCredentialStore::locate(overrides.config_path)?;
        return commands::configure::run(args, overrides.timeout_secs, &store, &mut console).await;
    }

    let core = CoreService::connect(&overrides).await?;
    match cli.command {
        Commands::Configure(_) => Ok(()),
        Commands::Ping => commands::ping::run(&core, &mut console).await,
        Commands::Domain(command) => commands::domain::run(command, &core, &mut console).await,
        Commands::Dns(command) => commands::dns::run(command, &core, &mut console).await,
        Commands::Url(command) => commands::url::run(command, &core, &mut console).await,
        Commands::Bulk(command) => commands::bulk::run(command, &core, &mut console).await,
        Commands::Interactive => commands::interactive::run(&core, &mut console).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
