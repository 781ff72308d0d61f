//! Ping command implementation.

use anyhow::{Context, Result};
use clap::Args;
use dockhub_registry::{PingPolicy, RegistryClient};
use tracing::info;

use super::RootArgs;

/// Arguments for the ping command.
#[derive(Args)]
pub struct PingArgs {
    #[command(flatten)]
    pub root: RootArgs,

    /// Require a 2xx response (404 means the API version is unsupported)
    #[arg(long)]
    pub strict: bool,
}

/// Runs the ping command.
pub async fn run(args: &PingArgs) -> Result<()> {
    let policy = if args.strict {
        PingPolicy::Strict
    } else {
        PingPolicy::Lenient
    };
    let config = args.root.config()?.with_ping_policy(policy);
    let client = RegistryClient::new(config).context("Failed to create registry client")?;

    let api = client.endpoint().api();
    info!(url = %api, strict = args.strict, "Pinging registry");

    client
        .ping()
        .await
        .with_context(|| format!("Ping failed for {api}"))?;

    let auth = if client.token().await.is_some() {
        " (authenticated)"
    } else {
        ""
    };
    println!("OK: {api} supports API version {}{auth}", client.endpoint().api_version());

    Ok(())
}
