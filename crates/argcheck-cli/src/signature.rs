//! `argcheck signature`: validate and print a signature file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::check::load_signature;

#[derive(Args, Debug)]
pub struct SignatureArgs {
    /// Signature file (YAML, or JSON by `.json` extension).
    #[arg(required = true)]
    pub file: PathBuf,
}

/// Print the rendered signature followed by its normalized YAML.
pub fn run_signature(args: &SignatureArgs) -> Result<u8> {
    let signature = load_signature(&args.file)?;
    tracing::info!(arity = signature.arity(), "Signature is valid");

    println!("# {}", signature.render());
    print!("{}", serde_yaml::to_string(&signature)?);
    Ok(0)
}
