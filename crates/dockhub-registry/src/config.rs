//! Configuration types for the registry client.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{RegistryError, RegistryResult};

/// Root URL of the Docker Hub registry.
pub const DOCKER_HUB_ROOT_URL: &str = "https://registry.hub.docker.com/";

/// Registry API version spoken by the client.
pub const DEFAULT_API_VERSION: &str = "2";

/// How [`RegistryClient::ping`](crate::RegistryClient::ping) interprets the
/// response from the API root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PingPolicy {
    /// Any exchange that completes without an error is a success, including a
    /// retried request that still answered 401.
    #[default]
    Lenient,

    /// 2xx is success; 404 means the API version is not supported; 401 and
    /// any other status are protocol errors.
    Strict,
}

/// Configuration for the registry client.
///
/// The configuration is immutable once handed to the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL of the registry host. Must end in `/`.
    pub root_url: Url,

    /// API version, used to build `{root}v{api_version}/`.
    pub api_version: String,

    /// Ping response policy.
    pub ping_policy: PingPolicy,

    /// Request timeout.
    pub timeout: Duration,

    /// TLS configuration.
    pub tls: Option<TlsConfig>,

    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_root_url(docker_hub_root_url())
    }
}

impl ClientConfig {
    /// Creates a new configuration for the registry at `root_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root_url` is not an absolute URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockhub_registry::ClientConfig;
    ///
    /// let config = ClientConfig::new("https://registry.example.com/")?;
    /// assert_eq!(config.root_url.as_str(), "https://registry.example.com/");
    /// assert_eq!(config.api_version, "2");
    /// # Ok::<(), dockhub_registry::RegistryError>(())
    /// ```
    pub fn new(root_url: &str) -> RegistryResult<Self> {
        let root_url = Url::parse(root_url).map_err(|e| RegistryError::InvalidRootUrl {
            url: root_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::with_root_url(root_url))
    }

    /// Creates a new configuration from an already parsed root URL.
    #[must_use]
    pub fn with_root_url(root_url: Url) -> Self {
        Self {
            root_url,
            api_version: DEFAULT_API_VERSION.to_string(),
            ping_policy: PingPolicy::default(),
            timeout: Duration::from_secs(30),
            tls: None,
            user_agent: format!("dockhub/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the API version.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Sets the ping policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockhub_registry::{ClientConfig, PingPolicy};
    ///
    /// let config = ClientConfig::default().with_ping_policy(PingPolicy::Strict);
    /// assert_eq!(config.ping_policy, PingPolicy::Strict);
    /// ```
    #[must_use]
    pub const fn with_ping_policy(mut self, ping_policy: PingPolicy) -> Self {
        self.ping_policy = ping_policy;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the TLS configuration.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Sets the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn docker_hub_root_url() -> Url {
    // Infallible: the constant is a valid absolute URL.
    Url::parse(DOCKER_HUB_ROOT_URL).unwrap_or_else(|_| unreachable!("invalid Docker Hub URL"))
}

/// TLS configuration for the reqwest transport.
#[derive(Debug, Clone, Default)]
pub struct TlsConfig {
    /// Path to an additional CA certificate (PEM).
    pub ca_cert: Option<PathBuf>,

    /// Whether to skip certificate verification (NOT recommended for production).
    pub insecure_skip_verify: bool,
}

impl TlsConfig {
    /// Creates a new TLS configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ca_cert: None,
            insecure_skip_verify: false,
        }
    }

    /// Sets the CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert = Some(path.into());
        self
    }

    /// Enables insecure mode (skips certificate verification).
    ///
    /// # Warning
    ///
    /// This should only be used for testing. Never use in production.
    #[must_use]
    pub const fn insecure(mut self) -> Self {
        self.insecure_skip_verify = true;
        self
    }
}
