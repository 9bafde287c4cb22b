//! `porkbun configure`

use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use porkbun_api::Credentials;
use porkbun_core::CredentialStore;
use porkbun_core::types::StoredConfig;

use crate::console::Console;

#[derive(clap::Args, Debug)]
pub struct Args {
    /// API key (pk1_...); prompted when omitted
    #[arg(long)]
    pub api_key: Option<String>,

    /// Secret API key (sk1_...); prompted when omitted
    #[arg(long)]
    pub secret_key: Option<String>,
}

/// Write the key pair to the config file.
///
/// A timeout already stored in the file is kept unless `timeout_secs` replaces it.
pub async fn run<R: BufRead, W: Write>(
    args: Args,
    timeout_secs: Option<u64>,
    store: &dyn CredentialStore,
    console: &mut Console<R, W>,
) -> Result<()> {
    writeln!(console, "Porkbun API Configuration")?;
    writeln!(console, "Get your API keys at: https://porkbun.com/account/api")?;
    writeln!(console)?;

    let api_key = match args.api_key {
        Some(key) => key,
        None => match console.ask_required("Enter API Key: ")? {
            Some(key) => key,
            None => bail!("No API key entered"),
        },
    };
    let secret_key = match args.secret_key {
        Some(key) => key,
        None => match console.ask_required("Enter Secret API Key: ")? {
            Some(key) => key,
            None => bail!("No secret API key entered"),
        },
    };

    let credentials = Credentials::new(api_key.trim(), secret_key.trim());
    credentials.validate()?;

    let previous_timeout = match store.load().await {
        Ok(existing) => existing.and_then(|c| c.timeout_secs),
        Err(e) => {
            log::warn!("Overwriting unreadable config file: {e}");
            None
        }
    };

    let mut config = StoredConfig::new(credentials);
    config.timeout_secs = timeout_secs.or(previous_timeout);
    store.save(&config).await?;

    match store.path() {
        Some(path) => writeln!(console, "Configuration saved to {}", path.display())?,
        None => writeln!(console, "Configuration saved")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::{printed, scripted};
    use porkbun_core::test_utils::MockCredentialStore;

    fn no_flags() -> Args {
        Args {
            api_key: None,
            secret_key: None,
        }
    }

    #[tokio::test]
    async fn prompts_for_missing_keys() {
        let store = MockCredentialStore::new();
        let mut console = scripted("pk1_abc\nsk1_def\n");

        run(no_flags(), None, &store, &mut console).await.unwrap();

        let saved = store.stored().await.unwrap();
        assert_eq!(saved.credentials.api_key, "pk1_abc");
        assert_eq!(saved.credentials.secret_api_key, "sk1_def");
        assert!(printed(&console).contains("Enter Secret API Key: "));
    }

    #[tokio::test]
    async fn flags_skip_prompts() {
        let store = MockCredentialStore::new();
        let mut console = scripted("");
        let args = Args {
            api_key: Some("pk1_abc".to_string()),
            secret_key: Some("sk1_def".to_string()),
        };

        run(args, Some(45), &store, &mut console).await.unwrap();

        let saved = store.stored().await.unwrap();
        assert_eq!(saved.timeout_secs, Some(45));
        assert!(!printed(&console).contains("Enter API Key"));
    }

    #[tokio::test]
    async fn keeps_stored_timeout() {
        let mut existing = StoredConfig::new(Credentials::new("pk1_old", "sk1_old"));
        existing.timeout_secs = Some(90);
        let store = MockCredentialStore::with(existing);
        let mut console = scripted("pk1_new\nsk1_new\n");

        run(no_flags(), None, &store, &mut console).await.unwrap();

        let saved = store.stored().await.unwrap();
        assert_eq!(saved.credentials.api_key, "pk1_new");
        assert_eq!(saved.timeout_secs, Some(90));
    }

    #[tokio::test]
    async fn empty_input_saves_nothing() {
        let store = MockCredentialStore::new();
        let mut console = scripted("\n");

        assert!(run(no_flags(), None, &store, &mut console).await.is_err());
        assert!(store.stored().await.is_none());
    }
}
