//! Client configuration.

use std::env;

/// Default root of the Releases API.
pub const DEFAULT_BASE_URL: &str = "https://api.releases.hashicorp.com";

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("hashicorp-releases/", env!("CARGO_PKG_VERSION"));

const BASE_URL_VAR: &str = "RELEASES_API_URL";
const USER_AGENT_VAR: &str = "RELEASES_USER_AGENT";

/// Configuration for a [`ReleasesClient`](crate::ReleasesClient).
///
/// # Example
///
/// ```no_run
/// use hashicorp_releases::{ClientConfig, ReleasesClient};
///
/// # fn example() -> hashicorp_releases::Result<()> {
/// let config = ClientConfig::default()
///     .with_base_url("https://releases.internal.example.com")
///     .with_user_agent("my-installer/1.2.0");
/// let client = ReleasesClient::with_config(config)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// URL at which the root of the Releases API may be reached.
    ///
    /// Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: String,

    /// Value of the `User-Agent` header. `None` disables the header.
    ///
    /// Defaults to [`DEFAULT_USER_AGENT`]. Applications should set this to
    /// their own name and version.
    pub user_agent: Option<String>,

    /// HTTP client used to make requests.
    ///
    /// When `None`, a client with response decompression enabled and no
    /// request timeout is built.
    pub http_client: Option<reqwest::Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            http_client: None,
        }
    }
}

impl ClientConfig {
    /// Build a configuration from environment variables.
    ///
    /// Reads `RELEASES_API_URL` and `RELEASES_USER_AGENT`; both are optional
    /// and fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.is_empty()) {
            config.base_url = base_url;
        }
        if let Some(user_agent) = lookup(USER_AGENT_VAR).filter(|v| !v.is_empty()) {
            config.user_agent = Some(user_agent);
        }
        config
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Disable sending a `User-Agent` header.
    ///
    /// Prefer [`with_user_agent`](Self::with_user_agent) with the name and
    /// version of the consuming application.
    #[must_use]
    pub fn without_user_agent(mut self) -> Self {
        self.user_agent = None;
        self
    }

    /// Use a caller-supplied HTTP client, for example one with a timeout or proxy.
    #[must_use]
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }
}
