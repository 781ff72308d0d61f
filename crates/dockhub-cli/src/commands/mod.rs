//! CLI commands and argument parsing.

pub mod digest;
pub mod ping;
pub mod repo_url;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dockhub_registry::{ClientConfig, TlsConfig, DOCKER_HUB_ROOT_URL};

/// Dockhub - Registry V2 client
#[derive(Parser)]
#[command(name = "dockhub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check that a registry speaks the V2 API
    Ping(ping::PingArgs),

    /// Print the API base URL of a repository
    RepoUrl(repo_url::RepoUrlArgs),

    /// Parse and normalize a content digest
    Digest(digest::DigestArgs),

    /// Print version information
    Version,
}

/// Registry root URL argument shared by networked commands.
#[derive(clap::Args)]
pub struct RootArgs {
    /// Registry root URL (must end in "/")
    #[arg(long, env = "DOCKHUB_ROOT_URL", default_value = DOCKER_HUB_ROOT_URL)]
    pub root: String,

    /// Additional CA certificate (PEM) to trust
    #[arg(long, env = "DOCKHUB_CA_CERT")]
    pub ca_cert: Option<PathBuf>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,
}

impl RootArgs {
    /// Builds a client configuration for the selected registry.
    pub fn config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::new(&self.root)
            .with_context(|| format!("Invalid registry root URL: {}", self.root))?;

        if self.ca_cert.is_none() && !self.insecure {
            return Ok(config);
        }

        let mut tls = TlsConfig::new();
        if let Some(ref ca_cert) = self.ca_cert {
            tls = tls.with_ca_cert(ca_cert);
        }
        if self.insecure {
            tls = tls.insecure();
        }
        Ok(config.with_tls(tls))
    }
}
