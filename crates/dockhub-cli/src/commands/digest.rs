//! Digest command implementation.

use anyhow::{Context, Result};
use clap::Args;
use dockhub_core::Digest;

/// Arguments for the digest command.
#[derive(Args)]
pub struct DigestArgs {
    /// Digest text, "algorithm:hex"
    pub text: String,
}

/// Runs the digest command.
pub fn run(args: &DigestArgs) -> Result<()> {
    let digest: Digest = args
        .text
        .parse()
        .with_context(|| format!("Invalid digest: {}", args.text))?;

    println!("{digest}");
    Ok(())
}
