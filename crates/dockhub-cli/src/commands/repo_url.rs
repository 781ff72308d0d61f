//! Repo-url command implementation.

use anyhow::{Context, Result};
use clap::Args;
use dockhub_registry::Endpoint;

use super::RootArgs;

/// Arguments for the repo-url command.
#[derive(Args)]
pub struct RepoUrlArgs {
    /// Repository name (e.g. library/ubuntu)
    pub name: String,

    #[command(flatten)]
    pub root: RootArgs,
}

/// Runs the repo-url command.
///
/// No network request is made.
pub fn run(args: &RepoUrlArgs) -> Result<()> {
    let config = args.root.config()?;
    let endpoint = Endpoint::new(config.api_version, config.root_url)
        .context("Invalid registry root URL")?;

    let name = args
        .name
        .parse()
        .with_context(|| format!("Invalid repository name: {}", args.name))?;

    println!("{}", endpoint.repository(&name));
    Ok(())
}
