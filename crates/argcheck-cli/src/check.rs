//! `argcheck check`: validate argument values given on the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use argcheck_core::{
    Arguments, ErrorKind, ReportIndexing, Signature, Validator, ValidatorConfig, Value,
};
use clap::Args;

/// Exit code when validation ran and found a mismatch.
pub const EXIT_MISMATCH: u8 = 1;

/// Exit code when validation could not run (bad expectations, arity, input).
pub const EXIT_INVALID: u8 = 2;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Expectation for the next position, e.g. "string|number". Repeatable.
    #[arg(short = 'e', long = "expect", value_name = "EXPECTATION")]
    pub expectations: Vec<String>,

    /// Read expectations from a YAML or JSON signature file.
    #[arg(short, long, value_name = "FILE", conflicts_with = "expectations")]
    pub signature: Option<PathBuf>,

    /// Check every position and print the JSON report.
    #[arg(short, long)]
    pub report: bool,

    /// Attribute reporting-mode failures the historical way.
    #[arg(long)]
    pub legacy_indexing: bool,

    /// Root URL for documentation links in error messages.
    #[arg(long, value_name = "URL")]
    pub docs_url: Option<String>,

    /// Validator configuration file (YAML).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Argument values as JSON literals (`"text"`, `5`, `true`, `null`,
    /// `[..]`, `{..}`) or `undefined`.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub values: Vec<String>,
}

/// Run the check subcommand and return the process exit code.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let validator = Validator::with_config(build_config(args)?);

    let expectations = match &args.signature {
        Some(path) => load_signature(path)?.expects,
        None => args.expectations.clone(),
    };
    let arguments = parse_values(&args.values)?;

    tracing::info!(
        arity = arguments.len(),
        expectations = expectations.len(),
        report = args.report,
        "Checking arguments"
    );

    if args.report {
        return match validator.check(&arguments, &expectations) {
            Ok(report) => {
                println!("{}", serde_json::to_string_pretty(&report)?);
                Ok(if report.passed { 0 } else { EXIT_MISMATCH })
            }
            Err(e) => {
                eprintln!("{e}");
                Ok(EXIT_INVALID)
            }
        };
    }

    match validator.expect(&arguments, &expectations) {
        Ok(_) => {
            println!("ok");
            Ok(0)
        }
        Err(e) if e.kind() == ErrorKind::ArgumentType => {
            eprintln!("{e}");
            Ok(EXIT_MISMATCH)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(EXIT_INVALID)
        }
    }
}

fn build_config(args: &CheckArgs) -> Result<ValidatorConfig> {
    let mut config = match &args.config {
        Some(path) => ValidatorConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ValidatorConfig::default(),
    };

    if args.legacy_indexing {
        config = config.with_indexing(ReportIndexing::Legacy);
    }
    if let Some(url) = &args.docs_url {
        config = config.with_docs_url(url.clone());
    }

    tracing::debug!(?config, "Validator configured");
    Ok(config)
}

/// Load a signature, choosing the format by file extension.
pub fn load_signature(path: &Path) -> Result<Signature> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let signature = if is_json {
        Signature::from_json_file(path)
    } else {
        Signature::from_yaml_file(path)
    };

    signature.with_context(|| format!("failed to load signature {}", path.display()))
}

fn parse_values(raw: &[String]) -> Result<Arguments> {
    raw.iter()
        .enumerate()
        .map(|(i, text)| {
            parse_value(text)
                .with_context(|| format!("value {} is not a JSON literal: {}", i + 1, text))
        })
        .collect()
}

fn parse_value(text: &str) -> Result<Value> {
    if text == "undefined" {
        return Ok(Value::Undefined);
    }
    let json: serde_json::Value = serde_json::from_str(text)?;
    Ok(Value::from(json))
}
