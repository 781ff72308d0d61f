//! Error types for registry operations.

use dockhub_core::{InvalidDigestError, InvalidNameError};
use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Boxed error produced by an HTTP transport.
pub type TransportSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Repository name failed validation.
    #[error("Invalid repository name: {0}")]
    InvalidName(#[from] InvalidNameError),

    /// Digest failed validation.
    #[error("Invalid digest: {0}")]
    InvalidDigest(#[from] InvalidDigestError),

    /// Root URL cannot be used as an API root.
    #[error("Invalid root URL {url}: {reason}")]
    InvalidRootUrl {
        /// URL text.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// The registry violated the authentication or API contract.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// The registry does not implement the requested API version.
    #[error("Registry at {url} does not support API version {api_version}")]
    ProtocolNotSupported {
        /// API version requested by the client.
        api_version: String,
        /// URL that was probed.
        url: String,
    },

    /// The HTTP exchange itself failed.
    #[error("HTTP request to {url} failed: {source}")]
    Transport {
        /// Request URL.
        url: String,
        /// Underlying error.
        #[source]
        source: TransportSource,
    },

    /// A response body was not the expected JSON.
    #[error("JSON error: {source}")]
    Json {
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A header value could not be encoded.
    #[error("Invalid {name} header: {message}")]
    InvalidHeader {
        /// Header name.
        name: String,
        /// Error message.
        message: String,
    },
}

impl RegistryError {
    /// Creates a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Returns true if this is a protocol error.
    #[must_use]
    pub const fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol { .. })
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            url: err
                .url()
                .map_or_else(|| "unknown".to_string(), ToString::to_string),
            source: Box::new(err),
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json { source: err }
    }
}
