//! JSON output helpers for `--json` code paths.
//!
//! Only successful results are machine-readable; errors always go to stderr
//! as `ERROR:` lines.

use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty-print `value` as JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn format<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("JSON serialization failed")
}

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", format(value)?);
    Ok(())
}
