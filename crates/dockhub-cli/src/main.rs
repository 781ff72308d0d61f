//! Dockhub CLI - command-line interface for Registry V2 hosts.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dockhub=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ping(args) => commands::ping::run(&args).await,
        Commands::RepoUrl(args) => commands::repo_url::run(&args),
        Commands::Digest(args) => commands::digest::run(&args),
        Commands::Version => {
            println!("dockhub {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
