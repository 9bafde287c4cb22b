//! `porkbun ping`

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::backend::CoreService;
use crate::console::Console;

/// Check the key pair against the registrar.
pub async fn run<R: BufRead, W: Write>(core: &CoreService, console: &mut Console<R, W>) -> Result<()> {
    let result = core.domain().ping().await?;
    writeln!(console, "Success! Your IP: {}", result.your_ip)?;
    Ok(())
}
