//! # Countries Subcommand
//!
//! Lists the registry as a table or as a JSON registry document.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use iban_core::Registry;

/// Arguments for `iban countries`.
#[derive(Args, Debug)]
pub struct CountriesArgs {
    /// Emit a JSON registry document instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Execute the countries subcommand.
pub fn run_countries(args: &CountriesArgs, registry: &Registry, out: &mut dyn Write) -> Result<u8> {
    if args.json {
        writeln!(out, "{}", registry.to_json_string()?)?;
        return Ok(0);
    }

    writeln!(
        out,
        "{:<4} {:>6}  {:<20} EXAMPLE",
        "CODE",
        "LENGTH",
        "STRUCTURE"
    )?;
    for spec in registry.iter() {
        writeln!(
            out,
            "{:<4} {:>6}  {:<20} {}",
            spec.country_code(),
            spec.length(),
            spec.structure(),
            spec.example()
        )?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_country() {
        let args = CountriesArgs { json: false };
        let mut out = Vec::new();
        run_countries(&args, Registry::builtin(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), Registry::builtin().len() + 1);
        let gb_row = text.lines().find(|l| l.starts_with("GB")).unwrap();
        assert!(gb_row.contains("4!a6!n8!n"));
    }

    #[test]
    fn json_reloads_as_registry() {
        let args = CountriesArgs { json: true };
        let mut out = Vec::new();
        run_countries(&args, Registry::builtin(), &mut out).unwrap();
        let json = String::from_utf8(out).unwrap();
        let reloaded = Registry::from_json_str(&json).unwrap();
        assert_eq!(reloaded.len(), Registry::builtin().len());
    }
}
