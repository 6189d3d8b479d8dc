//! # iban-cli — IBAN Command-Line Interface
//!
//! Thin clap front end over `iban-core`.
//!
//! ## Subcommands
//!
//! - `validate` — classify IBANs as valid or invalid
//! - `bban` — extract the BBAN of an IBAN, segment by segment
//! - `generate` — compute check digits and build an IBAN from a BBAN
//! - `format` — print or electronic form of an IBAN
//! - `countries` — list the registry
//!
//! ## Crate Policy
//!
//! - Argument parsing lives next to each handler; handlers delegate to
//!   `iban-core` and hold no IBAN logic of their own.
//! - Handlers write to a caller-supplied writer and return an exit code.

use std::path::Path;

use anyhow::{Context, Result};
use iban_core::Registry;

pub mod convert;
pub mod countries;
pub mod validate;

/// The built-in registry, with entries from `overrides` layered on top.
pub fn load_registry(overrides: Option<&Path>) -> Result<Registry> {
    let mut registry = Registry::builtin().clone();
    if let Some(path) = overrides {
        let extra = Registry::load(path)
            .with_context(|| format!("failed to load registry from {}", path.display()))?;
        tracing::info!(
            entries = extra.len(),
            source = %path.display(),
            "merging registry overrides"
        );
        registry.merge(extra);
    }
    Ok(registry)
}
