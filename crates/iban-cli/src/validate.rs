//! # Validate Subcommand
//!
//! Classifies each IBAN argument as `VALID` or `INVALID`.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use iban_core::Registry;

/// Arguments for `iban validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// IBANs to check. Spaces and lowercase are accepted.
    #[arg(value_name = "IBAN", required = true)]
    pub ibans: Vec<String>,

    /// Print only the summary line.
    #[arg(long, short)]
    pub quiet: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every IBAN is valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs, registry: &Registry, out: &mut dyn Write) -> Result<u8> {
    let mut invalid = 0usize;

    for iban in &args.ibans {
        let valid = registry.is_valid(iban);
        tracing::debug!(iban = %iban, valid, "validated");
        if !valid {
            invalid += 1;
        }
        if !args.quiet {
            writeln!(out, "{}: {iban}", if valid { "VALID" } else { "INVALID" })?;
        }
    }

    writeln!(
        out,
        "{}/{} valid",
        args.ibans.len() - invalid,
        args.ibans.len()
    )?;

    Ok(u8::from(invalid > 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ibans: &[&str], quiet: bool) -> (u8, String) {
        let args = ValidateArgs {
            ibans: ibans.iter().map(|s| s.to_string()).collect(),
            quiet,
        };
        let mut out = Vec::new();
        let code = run_validate(&args, Registry::builtin(), &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn all_valid_exits_zero() {
        let (code, out) = run(&["GB82WEST12345698765432", "nl91 abna 0417 1643 00"], false);
        assert_eq!(code, 0);
        assert!(out.contains("VALID: GB82WEST12345698765432"));
        assert!(out.ends_with("2/2 valid\n"));
    }

    #[test]
    fn any_invalid_exits_one() {
        let (code, out) = run(&["GB82WEST12345698765432", "GB82WEST12345698765433"], false);
        assert_eq!(code, 1);
        assert!(out.contains("INVALID: GB82WEST12345698765433"));
        assert!(out.ends_with("1/2 valid\n"));
    }

    #[test]
    fn quiet_prints_summary_only() {
        let (_, out) = run(&["GB82WEST12345698765432"], true);
        assert_eq!(out, "1/1 valid\n");
    }
}
