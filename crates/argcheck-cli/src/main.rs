//! # argcheck CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod check;
mod signature;

use check::{run_check, CheckArgs};
use signature::{run_signature, SignatureArgs};

/// Check argument values against runtime type expectations.
#[derive(Parser, Debug)]
#[command(name = "argcheck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check JSON argument values against expectations.
    Check(CheckArgs),

    /// Validate a signature file and print its normalized form.
    Signature(SignatureArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Check(args) => run_check(&args),
        Commands::Signature(args) => run_signature(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_check_with_expectations() {
        let cli = Cli::try_parse_from([
            "argcheck", "check", "-e", "string", "-e", "number", "\"a\"", "5",
        ])
        .unwrap();

        let Commands::Check(args) = cli.command else {
            panic!("expected check subcommand");
        };
        assert_eq!(args.expectations, vec!["string", "number"]);
        assert_eq!(args.values, vec!["\"a\"", "5"]);
        assert!(!args.report);
    }

    #[test]
    fn cli_parse_check_signature_conflicts_with_expect() {
        let result = Cli::try_parse_from([
            "argcheck", "check", "-e", "string", "--signature", "sig.yaml", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_verbose_is_global() {
        let cli = Cli::try_parse_from(["argcheck", "signature", "sig.yaml", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Signature(_)));
    }
}
