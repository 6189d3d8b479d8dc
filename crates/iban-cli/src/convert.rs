//! # Conversion Subcommands
//!
//! `bban`, `generate`, and `format`: the IBAN/BBAN conversions and the
//! print/electronic formatting.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use iban_core::{electronic_format, print_format, Registry};

/// Arguments for `iban bban`.
#[derive(Args, Debug)]
pub struct BbanArgs {
    /// IBAN to convert.
    #[arg(value_name = "IBAN")]
    pub iban: String,

    /// Separator placed between BBAN segments.
    #[arg(long, short, default_value = " ")]
    pub separator: String,
}

/// Arguments for `iban generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// ISO 3166-1 alpha-2 country code.
    #[arg(long, short)]
    pub country: String,

    /// BBAN to wrap in an IBAN.
    #[arg(value_name = "BBAN")]
    pub bban: String,
}

/// Arguments for `iban format`.
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// IBAN to format.
    #[arg(value_name = "IBAN")]
    pub iban: String,

    /// Separator placed between groups of four.
    #[arg(long, short, default_value = " ")]
    pub separator: String,

    /// Print the electronic form (no separators, uppercase) instead.
    #[arg(long)]
    pub electronic: bool,
}

/// Execute `iban bban`.
pub fn run_bban(args: &BbanArgs, registry: &Registry, out: &mut dyn Write) -> Result<u8> {
    let bban = registry
        .to_bban(&args.iban, &args.separator)
        .with_context(|| format!("cannot extract BBAN from {}", args.iban))?;
    writeln!(out, "{bban}")?;
    Ok(0)
}

/// Execute `iban generate`.
pub fn run_generate(args: &GenerateArgs, registry: &Registry, out: &mut dyn Write) -> Result<u8> {
    let country = args.country.to_ascii_uppercase();
    let iban = registry
        .from_bban(&country, &args.bban)
        .with_context(|| format!("cannot generate IBAN for {country}"))?;
    tracing::info!(country = %country, iban = %iban, "generated IBAN");
    writeln!(out, "{iban}")?;
    Ok(0)
}

/// Execute `iban format`. Formatting does not validate.
pub fn run_format(args: &FormatArgs, out: &mut dyn Write) -> Result<u8> {
    let formatted = if args.electronic {
        electronic_format(&args.iban)
    } else {
        print_format(&args.iban, &args.separator)
    };
    writeln!(out, "{formatted}")?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<u8>) -> String {
        let mut out = Vec::new();
        assert_eq!(f(&mut out).unwrap(), 0);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn bban_with_separator() {
        let args = BbanArgs {
            iban: "GB82 WEST 1234 5698 7654 32".to_string(),
            separator: "-".to_string(),
        };
        let out = output(|o| run_bban(&args, Registry::builtin(), o));
        assert_eq!(out, "WEST-123456-98765432\n");
    }

    #[test]
    fn bban_of_invalid_iban_fails() {
        let args = BbanArgs {
            iban: "GB00WEST12345698765432".to_string(),
            separator: " ".to_string(),
        };
        let mut out = Vec::new();
        assert!(run_bban(&args, Registry::builtin(), &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn generate_accepts_lowercase_country() {
        let args = GenerateArgs {
            country: "gb".to_string(),
            bban: "WEST12345698765432".to_string(),
        };
        let out = output(|o| run_generate(&args, Registry::builtin(), o));
        assert_eq!(out, "GB82WEST12345698765432\n");
    }

    #[test]
    fn generate_rejects_bad_bban() {
        let args = GenerateArgs {
            country: "GB".to_string(),
            bban: "WEST1234".to_string(),
        };
        let mut out = Vec::new();
        let err = run_generate(&args, Registry::builtin(), &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("invalid BBAN"));
    }

    #[test]
    fn format_print_and_electronic() {
        let print = FormatArgs {
            iban: "gb82west12345698765432".to_string(),
            separator: " ".to_string(),
            electronic: false,
        };
        assert_eq!(
            output(|o| run_format(&print, o)),
            "GB82 WEST 1234 5698 7654 32\n"
        );

        let electronic = FormatArgs {
            iban: "GB82 WEST 1234 5698 7654 32".to_string(),
            separator: " ".to_string(),
            electronic: true,
        };
        assert_eq!(
            output(|o| run_format(&electronic, o)),
            "GB82WEST12345698765432\n"
        );
    }
}
