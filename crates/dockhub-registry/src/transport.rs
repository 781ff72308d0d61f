//! HTTP GET capability consumed by the client.
//!
//! The client only needs "GET a URL with headers, get back status, headers
//! and body". Connection management, TLS and redirects belong to the
//! [`HttpTransport`] implementation; [`ReqwestTransport`] is the default one.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{RegistryError, RegistryResult};

/// A completed HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status.
    pub status: StatusCode,

    /// Response headers, in the order they were received.
    pub headers: HeaderMap,

    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> RegistryResult<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    /// Returns the last value of a header, as text.
    ///
    /// When a header is repeated, the most recently set value wins.
    ///
    /// # Errors
    ///
    /// Returns a protocol error if the header is present but its last value
    /// is not visible ASCII.
    pub fn last_header(&self, name: &str) -> RegistryResult<Option<&str>> {
        self.headers
            .get_all(name)
            .iter()
            .next_back()
            .map(|value| {
                value.to_str().map_err(|_| {
                    RegistryError::protocol(format!("undecodable {name} header in response"))
                })
            })
            .transpose()
    }
}

/// Performs HTTP GET requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a GET request for `url` with `headers` and waits for the full
    /// response.
    ///
    /// Network failures are reported as [`RegistryError::Transport`].
    async fn get(&self, url: &Url, headers: &HeaderMap) -> RegistryResult<HttpResponse>;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the CA certificate cannot be read or the HTTP
    /// client cannot be created.
    pub fn new(config: &ClientConfig) -> RegistryResult<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent);

        if let Some(ref tls) = config.tls {
            if tls.insecure_skip_verify {
                builder = builder.danger_accept_invalid_certs(true);
            }

            if let Some(ref ca_cert) = tls.ca_cert {
                let cert_pem = std::fs::read(ca_cert).map_err(|e| RegistryError::Transport {
                    url: config.root_url.to_string(),
                    source: format!("cannot read CA certificate {}: {e}", ca_cert.display()).into(),
                })?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)?;
                builder = builder.add_root_certificate(cert);
            }
        }

        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub const fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url, headers: &HeaderMap) -> RegistryResult<HttpResponse> {
        let response = self
            .http
            .get(url.clone())
            .headers(headers.clone())
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}
