//! Bearer token authentication.
//!
//! Registries answer unauthenticated requests with `401 Unauthorized` and a
//! challenge such as:
//!
//! ```text
//! WWW-Authenticate: Bearer realm="https://auth.docker.io/token",service="registry.docker.io"
//! ```
//!
//! The client answers the challenge by fetching `{realm}?service={service}`,
//! which returns a JSON document holding the token, and stores the token in
//! its [`AuthState`].
//!
//! # Limitations
//!
//! Challenge parameters are split naively on `,` and `=`. A quoted value that
//! itself contains a comma (or an escaped quote) is not supported.

use std::collections::BTreeMap;

use serde::Deserialize;
use url::Url;

use crate::error::{RegistryError, RegistryResult};

/// Authentication scheme prefix accepted in challenges.
const BEARER_PREFIX: &str = "Bearer ";

/// Bearer token held by a client session.
///
/// This is the only mutable piece of session state. It is not persisted and
/// lives as long as the client that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    token: Option<String>,
}

impl AuthState {
    /// Creates an empty (unauthenticated) state.
    #[must_use]
    pub const fn new() -> Self {
        Self { token: None }
    }

    /// Returns the current token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Stores a token, replacing any previous one.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Forgets the current token.
    pub fn clear(&mut self) {
        self.token = None;
    }

    /// Returns true if a token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Parameters of a `Bearer` authentication challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerChallenge {
    /// Token endpoint URL.
    pub realm: String,

    /// Service the token is requested for.
    pub service: String,

    /// Diagnostic error reported by the registry, if any.
    pub error: Option<String>,

    /// All parameters as sent, including the ones above.
    pub params: BTreeMap<String, String>,
}

impl BearerChallenge {
    /// Parses a `WWW-Authenticate` header value.
    ///
    /// # Errors
    ///
    /// Returns a protocol error if the scheme is not `Bearer`, if it carries
    /// no parameters, or if the `realm` or `service` parameter is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockhub_registry::BearerChallenge;
    ///
    /// let challenge =
    ///     BearerChallenge::parse(r#"Bearer realm="https://auth.example/token",service="registry""#)
    ///         .unwrap();
    /// assert_eq!(challenge.realm, "https://auth.example/token");
    /// assert_eq!(challenge.service, "registry");
    /// ```
    pub fn parse(value: &str) -> RegistryResult<Self> {
        if value.trim_end() == BEARER_PREFIX.trim_end() {
            return Err(RegistryError::protocol(
                "no parameters in Bearer WWW-Authenticate header",
            ));
        }

        let Some(rest) = value.strip_prefix(BEARER_PREFIX) else {
            let mechanism = value.split_whitespace().next().unwrap_or_default();
            return Err(RegistryError::protocol(format!(
                "unrecognized authentication mechanism: {mechanism:?}"
            )));
        };

        let params = parse_params(rest);

        let realm = params
            .get("realm")
            .cloned()
            .ok_or_else(|| RegistryError::protocol("no realm in WWW-Authenticate header"))?;
        let service = params
            .get("service")
            .cloned()
            .ok_or_else(|| RegistryError::protocol("no service in WWW-Authenticate header"))?;
        let error = params.get("error").cloned();

        Ok(Self {
            realm,
            service,
            error,
            params,
        })
    }

    /// Returns the token endpoint URL, `{realm}?service={service}`.
    ///
    /// # Errors
    ///
    /// Returns a protocol error if the realm is not an absolute URL.
    pub fn token_url(&self) -> RegistryResult<Url> {
        let mut url = Url::parse(&self.realm).map_err(|e| {
            RegistryError::protocol(format!("invalid realm URL {:?}: {e}", self.realm))
        })?;
        url.query_pairs_mut().append_pair("service", &self.service);
        Ok(url)
    }
}

/// Splits `key=value` pairs on `,`, unwrapping double-quoted values.
fn parse_params(text: &str) -> BTreeMap<String, String> {
    text.split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), unquote(value.trim()).to_string()))
        .collect()
}

/// Strips surrounding double quotes, only if both are present.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

/// Token endpoint response.
///
/// Real responses also carry `expires_in` and `issued_at`; they are not used.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: Option<String>,
}

impl TokenResponse {
    /// Extracts the token.
    pub(crate) fn into_token(self) -> RegistryResult<String> {
        self.token
            .ok_or_else(|| RegistryError::protocol("no token in token response"))
    }
}
