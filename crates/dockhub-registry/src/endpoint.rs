//! API endpoint URLs.
//!
//! An [`Endpoint`] pairs an API version with a registry root URL and derives
//! the versioned API root and per-repository base URLs from it. All derived
//! URLs are collection URLs (their path ends in `/`).

use dockhub_core::RepositoryName;
use url::Url;

use crate::error::{RegistryError, RegistryResult};

/// Returns true if the URL path is empty or ends with an empty segment.
fn is_collection(url: &Url) -> bool {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .is_none_or(str::is_empty)
}

/// Registry API endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    api_version: String,
    root: Url,
}

impl Endpoint {
    /// Creates an endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a collection URL (its path does not
    /// end in `/`) or cannot be used as a base URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockhub_registry::Endpoint;
    /// use url::Url;
    ///
    /// let root = Url::parse("https://host/v2/").unwrap();
    /// let endpoint = Endpoint::new("2", root).unwrap();
    /// assert_eq!(endpoint.api().as_str(), "https://host/v2/v2/");
    ///
    /// assert!(Endpoint::new("2", Url::parse("https://host/v2").unwrap()).is_err());
    /// ```
    pub fn new(api_version: impl Into<String>, root: Url) -> RegistryResult<Self> {
        if root.cannot_be_a_base() {
            return Err(RegistryError::InvalidRootUrl {
                url: root.to_string(),
                reason: "URL cannot be a base".to_string(),
            });
        }

        if !is_collection(&root) {
            return Err(RegistryError::InvalidRootUrl {
                url: root.to_string(),
                reason: r#"Root URL must end in "/""#.to_string(),
            });
        }

        Ok(Self {
            api_version: api_version.into(),
            root,
        })
    }

    /// Returns the API version.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Returns the root URL.
    #[must_use]
    pub const fn root(&self) -> &Url {
        &self.root
    }

    /// Returns the versioned API root, `{root}v{api_version}/`.
    #[must_use]
    pub fn api(&self) -> Url {
        let mut url = self.root.clone();
        Self::push_segments(&mut url, [format!("v{}", self.api_version).as_str()]);
        url
    }

    /// Returns the base URL for endpoints operating on `repository`,
    /// `{api}{component}/.../`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockhub_core::RepositoryName;
    /// use dockhub_registry::Endpoint;
    /// use url::Url;
    ///
    /// let endpoint = Endpoint::new("2", Url::parse("https://host/").unwrap()).unwrap();
    /// let name = RepositoryName::new("library/ubuntu").unwrap();
    /// assert_eq!(
    ///     endpoint.repository(&name).as_str(),
    ///     "https://host/v2/library/ubuntu/"
    /// );
    /// ```
    #[must_use]
    pub fn repository(&self, repository: &RepositoryName) -> Url {
        let mut url = self.api();
        Self::push_segments(&mut url, repository.components());
        url
    }

    /// Appends child segments to a collection URL, keeping the trailing `/`.
    fn push_segments<'a>(url: &mut Url, children: impl IntoIterator<Item = &'a str>) {
        // The root was checked to be a base URL at construction.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(children).push("");
        }
    }
}
