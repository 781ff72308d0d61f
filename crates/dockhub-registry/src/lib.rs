//! # Dockhub Registry
//!
//! Client for the container registry HTTP API (Registry V2), with transparent
//! bearer-token authentication.
//!
//! ## Features
//!
//! - **Endpoint URLs**: versioned API root and per-repository base URLs
//! - **Bearer Challenges**: a `401` triggers one token fetch and one retry
//! - **Ping**: lenient or strict API version checks
//! - **Pluggable HTTP**: anything implementing [`HttpTransport`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dockhub_registry::{ClientConfig, PingPolicy, RegistryClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default().with_ping_policy(PingPolicy::Strict);
//!     let client = RegistryClient::new(config)?;
//!
//!     client.ping().await?;
//!     println!("{}", client.repository_url("library/ubuntu")?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                RegistryClient                │
//! │  ┌──────────┐  ┌────────────┐  ┌──────────┐  │
//! │  │ Endpoint │  │ AuthState  │  │ Transport│  │
//! │  │  (URLs)  │  │  (token)   │  │  (HTTP)  │  │
//! │  └──────────┘  └────────────┘  └──────────┘  │
//! └──────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌──────────────────────────────────────────────┐
//! │     Registry V2 host  +  token service       │
//! └──────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod auth;
mod client;
mod config;
mod endpoint;
mod error;
mod transport;

pub use auth::{AuthState, BearerChallenge};
pub use client::RegistryClient;
pub use config::{ClientConfig, PingPolicy, TlsConfig, DEFAULT_API_VERSION, DOCKER_HUB_ROOT_URL};
pub use endpoint::Endpoint;
pub use error::{RegistryError, RegistryResult, TransportSource};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
