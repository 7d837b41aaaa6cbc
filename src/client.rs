//! Releases API client.
//!
//! Low-level HTTP client that builds endpoint URLs, issues GET requests and
//! decodes JSON bodies. Product and release operations are implemented on
//! top of it in the `models` module.

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ReleasesError, Result};

/// Client for the HashiCorp Releases API.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use hashicorp_releases::ReleasesClient;
///
/// # fn example() -> hashicorp_releases::Result<()> {
/// // Public API with default settings
/// let client = ReleasesClient::new("https://api.releases.hashicorp.com")?;
///
/// // Or read RELEASES_API_URL / RELEASES_USER_AGENT
/// let client = ReleasesClient::from_env()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ReleasesClient {
    http: Client,
    base_url: Arc<Url>,
    user_agent: Option<Arc<str>>,
}

impl std::fmt::Debug for ReleasesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleasesClient")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl ReleasesClient {
    /// Create a client for the given base URL with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default().with_base_url(base_url))
    }

    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if `RELEASES_API_URL` is set to an invalid URL.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the default HTTP
    /// client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        // Ensure base URL ends with / so endpoint paths resolve beneath it
        let base_url_str = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };

        let base_url = Url::parse(&base_url_str).map_err(|source| ReleasesError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let http = match config.http_client {
            Some(http) => http,
            None => Client::builder()
                .brotli(true)
                .gzip(true)
                .deflate(true)
                .build()?,
        };

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            user_agent: config.user_agent.map(Arc::from),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the `User-Agent` sent with each request, if any.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Resolve a path of already-encoded segments against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(ReleasesError::request_construction)
    }

    /// GET a URL and decode a JSON body.
    ///
    /// The response must be `200 OK`; the content type is not checked.
    #[tracing::instrument(skip(self, url), fields(url = %url))]
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.send(url, None).await?;
        Self::check_status(&response)?;
        Self::decode(response).await
    }

    /// GET a URL that must answer with the given media type.
    #[tracing::instrument(skip(self, url), fields(url = %url))]
    pub(crate) async fn get_json_as<T: DeserializeOwned>(
        &self,
        url: Url,
        media_type: &str,
    ) -> Result<T> {
        let response = self.send(url, Some(media_type)).await?;
        Self::check_status(&response)?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();
        if content_type != media_type {
            let shown = if content_type.is_empty() {
                "<none>".to_string()
            } else {
                content_type
            };
            return Err(ReleasesError::InvalidContentType(shown));
        }

        Self::decode(response).await
    }

    /// Build and send a GET request.
    async fn send(&self, url: Url, accept: Option<&str>) -> Result<Response> {
        let mut builder = self.http.get(url);
        if let Some(user_agent) = &self.user_agent {
            builder = builder.header(USER_AGENT, user_agent.as_ref());
        }
        if let Some(accept) = accept {
            builder = builder.header(ACCEPT, accept);
        }

        let request = builder
            .build()
            .map_err(ReleasesError::request_construction)?;

        tracing::trace!(url = %request.url(), "sending request");
        Ok(self.http.execute(request).await?)
    }

    /// Reject anything other than `200 OK`.
    fn check_status(response: &Response) -> Result<()> {
        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(status = status.as_u16(), url = %response.url(), "unexpected status");
            return Err(ReleasesError::InvalidStatusCode(status.as_u16()));
        }
        Ok(())
    }

    /// Read the whole body and decode it as JSON.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(ReleasesError::InvalidResponseBody)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = ReleasesClient::new("https://api.releases.hashicorp.com").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("ReleasesClient"));
        assert!(debug.contains("base_url"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = ReleasesClient::new("https://api.example.com/releases").unwrap();
        let client2 = ReleasesClient::new("https://api.example.com/releases/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_endpoint_resolves_below_base_path() {
        let client = ReleasesClient::new("https://api.example.com/releases").unwrap();
        let url = client.endpoint("v1/releases/waypoint").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/releases/v1/releases/waypoint"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ReleasesClient::new("localhost\0").unwrap_err();
        assert!(matches!(err, ReleasesError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_default_user_agent() {
        let client = ReleasesClient::new("https://api.releases.hashicorp.com").unwrap();
        assert_eq!(client.user_agent(), Some(crate::config::DEFAULT_USER_AGENT));

        let client =
            ReleasesClient::with_config(ClientConfig::default().without_user_agent()).unwrap();
        assert_eq!(client.user_agent(), None);
    }
}
