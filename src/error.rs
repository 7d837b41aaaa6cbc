//! Error types for Releases API operations.

use thiserror::Error;

/// Boxed cause carried by [`ReleasesError::RequestConstruction`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during Releases API operations.
#[derive(Debug, Error)]
pub enum ReleasesError {
    /// The configured base URL could not be parsed.
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A product name supplied as a parameter is invalid, usually because it is empty.
    #[error("invalid product: {0}")]
    InvalidProduct(String),

    /// A version supplied as a parameter is invalid, usually because it is empty.
    #[error("invalid version: {0}")]
    InvalidVersion(String),

    /// A license class tag is not one of the known classes.
    #[error("invalid license class: {0}")]
    InvalidLicenseClass(String),

    /// The HTTP request could not be built.
    #[error("failed to construct HTTP request: {0}")]
    RequestConstruction(#[source] BoxError),

    /// The server returned an undocumented content type.
    #[error("invalid response content type: {0}")]
    InvalidContentType(String),

    /// The server returned an undocumented object structure.
    #[error("invalid response body: {0}")]
    InvalidResponseBody(#[source] serde_json::Error),

    /// The server returned a status code other than `200 OK`.
    #[error("invalid response status code: {0}")]
    InvalidStatusCode(u16),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ReleasesError {
    pub(crate) fn request_construction(cause: impl Into<BoxError>) -> Self {
        Self::RequestConstruction(cause.into())
    }

    /// The HTTP status code, if this error was caused by an unexpected status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::InvalidStatusCode(code) => Some(*code),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for Releases API operations.
pub type Result<T> = core::result::Result<T, ReleasesError>;
