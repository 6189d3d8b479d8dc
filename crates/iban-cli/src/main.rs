//! # iban CLI entry point
//!
//! Parses command-line arguments, installs tracing, loads the registry, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use iban_cli::convert::{run_bban, run_format, run_generate, BbanArgs, FormatArgs, GenerateArgs};
use iban_cli::countries::{run_countries, CountriesArgs};
use iban_cli::validate::{run_validate, ValidateArgs};

/// IBAN toolkit: validate IBANs, extract BBANs, generate check digits.
#[derive(Parser, Debug)]
#[command(name = "iban", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML or JSON registry file whose entries override the built-in table.
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check IBANs for length, layout, and check digits.
    Validate(ValidateArgs),

    /// Extract the BBAN from an IBAN.
    Bban(BbanArgs),

    /// Build an IBAN from a country code and BBAN.
    Generate(GenerateArgs),

    /// Print an IBAN in grouped or electronic form.
    Format(FormatArgs),

    /// List the countries in the registry.
    Countries(CountriesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let registry = match iban_cli::load_registry(cli.registry.as_deref()) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    tracing::debug!(countries = registry.len(), "registry ready");

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &registry, &mut stdout),
        Commands::Bban(args) => run_bban(&args, &registry, &mut stdout),
        Commands::Generate(args) => run_generate(&args, &registry, &mut stdout),
        Commands::Format(args) => run_format(&args, &mut stdout),
        Commands::Countries(args) => run_countries(&args, &registry, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
