//! Registry V2 API client.
//!
//! [`RegistryClient::get`] implements the authentication state machine:
//!
//! ```text
//! Unauthenticated ──GET──▶ 401 ──▶ Authenticating ──token──▶ Authenticated
//!        ▲                              │
//!        └──────── protocol error ◀─────┘
//! ```
//!
//! A 401 response triggers exactly one token fetch and exactly one retry. A
//! second 401 is returned to the caller as-is.

use std::sync::Arc;

use dockhub_core::{ErrorCode, ErrorList, RepositoryName};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, WWW_AUTHENTICATE};
use reqwest::StatusCode;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use crate::auth::{AuthState, BearerChallenge, TokenResponse};
use crate::config::{ClientConfig, PingPolicy};
use crate::endpoint::Endpoint;
use crate::error::{RegistryError, RegistryResult};
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport};

/// Client for a Registry V2 API host.
///
/// The configuration and endpoint are immutable. The bearer token lives in an
/// [`AuthState`] behind an async mutex that is held for a whole exchange
/// (request, challenge, token fetch, retry), so concurrent calls on a shared
/// client are serialized rather than racing on the token.
pub struct RegistryClient {
    config: ClientConfig,
    endpoint: Endpoint,
    transport: Arc<dyn HttpTransport>,
    auth: Mutex<AuthState>,
}

impl std::fmt::Debug for RegistryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryClient")
            .field("config", &self.config)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl RegistryClient {
    /// Creates a client that talks HTTP through `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root URL is not a collection URL or the HTTP
    /// client cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dockhub_registry::{ClientConfig, RegistryClient};
    ///
    /// let client = RegistryClient::new(ClientConfig::default())?;
    /// # Ok::<(), dockhub_registry::RegistryError>(())
    /// ```
    pub fn new(config: ClientConfig) -> RegistryResult<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a client that talks HTTP through `transport`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root URL is not a collection URL.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> RegistryResult<Self> {
        let endpoint = Endpoint::new(config.api_version.clone(), config.root_url.clone())?;

        Ok(Self {
            config,
            endpoint,
            transport,
            auth: Mutex::new(AuthState::new()),
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the API endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns a copy of the current bearer token, if any.
    pub async fn token(&self) -> Option<String> {
        self.auth.lock().await.token().map(ToString::to_string)
    }

    /// Returns the base URL for a repository.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid repository name.
    pub fn repository_url(&self, name: &str) -> RegistryResult<Url> {
        let name = RepositoryName::new(name)?;
        Ok(self.endpoint.repository(&name))
    }

    /// Checks whether the registry supports the API version in use.
    ///
    /// With [`PingPolicy::Lenient`], any exchange that completes without an
    /// error succeeds. With [`PingPolicy::Strict`], the final status decides.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ProtocolNotSupported`] on 404 (strict),
    /// [`RegistryError::Protocol`] when the challenge or status is not
    /// acceptable, and [`RegistryError::Transport`] on network failure.
    pub async fn ping(&self) -> RegistryResult<()> {
        let url = self.endpoint.api();
        let response = self.get(&url).await?;

        match self.config.ping_policy {
            PingPolicy::Lenient => Ok(()),
            PingPolicy::Strict => self.check_ping_response(&url, &response),
        }
    }

    /// Sends an authenticated GET request.
    ///
    /// On 401, answers the bearer challenge and retries once.
    ///
    /// # Errors
    ///
    /// Returns a protocol error if the challenge cannot be answered, and a
    /// transport error if either request fails on the network.
    pub async fn get(&self, url: &Url) -> RegistryResult<HttpResponse> {
        let mut auth = self.auth.lock().await;

        let response = self.send(url, &auth).await?;
        if response.status != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        self.handle_unauthorized_response(&mut auth, &response)
            .await?;

        debug!(url = %url, "retrying request after authentication");
        self.send(url, &auth).await
    }

    /// Issues one GET, attaching the bearer token if one is held.
    async fn send(&self, url: &Url, auth: &AuthState) -> RegistryResult<HttpResponse> {
        let mut headers = HeaderMap::new();
        if let Some(token) = auth.token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                RegistryError::InvalidHeader {
                    name: AUTHORIZATION.to_string(),
                    message: e.to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        debug!(url = %url, authenticated = auth.is_authenticated(), "GET");
        self.transport.get(url, &headers).await
    }

    /// Answers a 401 challenge by fetching a new token into `auth`.
    async fn handle_unauthorized_response(
        &self,
        auth: &mut AuthState,
        response: &HttpResponse,
    ) -> RegistryResult<()> {
        auth.clear();

        let header = response
            .last_header(WWW_AUTHENTICATE.as_str())?
            .ok_or_else(|| RegistryError::protocol("no WWW-Authenticate header in response"))?;

        let challenge = BearerChallenge::parse(header)?;
        if let Some(ref error) = challenge.error {
            warn!(error = %error, realm = %challenge.realm, "registry reported authentication error");
        }

        let token = self.fetch_token(&challenge).await?;
        info!(realm = %challenge.realm, service = %challenge.service, "obtained bearer token");
        auth.set_token(token);

        Ok(())
    }

    /// Fetches a token from the challenge realm, unauthenticated.
    async fn fetch_token(&self, challenge: &BearerChallenge) -> RegistryResult<String> {
        let url = challenge.token_url()?;
        debug!(url = %url, "fetching bearer token");

        let response = self.transport.get(&url, &HeaderMap::new()).await?;
        let token: TokenResponse = response.json()?;
        token.into_token()
    }

    /// Applies [`PingPolicy::Strict`] to the final ping response.
    fn check_ping_response(&self, url: &Url, response: &HttpResponse) -> RegistryResult<()> {
        let status = response.status;

        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::NOT_FOUND {
            return Err(RegistryError::ProtocolNotSupported {
                api_version: self.endpoint.api_version().to_string(),
                url: url.to_string(),
            });
        }

        if status == StatusCode::UNAUTHORIZED {
            let unauthorized = ErrorList::from_json(&response.body)
                .ok()
                .and_then(|list| list.find(ErrorCode::Unauthorized).cloned());
            return Err(unauthorized.map_or_else(
                || RegistryError::protocol("not authorized to access the registry API"),
                |error| {
                    RegistryError::protocol(format!(
                        "not authorized to access the registry API: {}",
                        error.message
                    ))
                },
            ));
        }

        Err(RegistryError::protocol(format!(
            "unexpected response status {} from {url}",
            status.as_u16()
        )))
    }
}
