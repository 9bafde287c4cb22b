//! Subcommand handlers
//!
//! Each handler takes the resolved [`CoreService`](crate::backend::CoreService) and a
//! [`Console`](crate::console::Console); the interactive menu reuses them.

pub mod bulk;
pub mod configure;
pub mod dns;
pub mod domain;
pub mod interactive;
pub mod ping;
pub mod url;

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

/// Pretty JSON, as printed by every `--json` flag.
pub fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
