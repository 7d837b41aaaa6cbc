//! HashiCorp Releases API client library.
//!
//! A Rust library for reading product release metadata from the HashiCorp
//! Releases API: the list of products, single releases, the latest release
//! under a license class, and the full release history of a product as a
//! lazily paginated stream.
//!
//! # Quick Start
//!
//! ```no_run
//! use futures::TryStreamExt;
//! use hashicorp_releases::{LicenseClass, ReleasesClient};
//!
//! #[tokio::main]
//! async fn main() -> hashicorp_releases::Result<()> {
//!     // Create client from environment variables (all optional)
//!     let client = ReleasesClient::from_env()?;
//!
//!     // List products
//!     let products = client.products().await?;
//!     println!("Found {} products", products.len());
//!
//!     // Latest OSS release of a product
//!     let latest = client.latest_release("terraform", Some(LicenseClass::Oss)).await?;
//!     println!("Latest: {}", latest.version);
//!
//!     // Walk the full history, one release at a time
//!     let mut releases = client.releases("terraform", Some(LicenseClass::Oss))?;
//!     while let Some(release) = releases.try_next().await? {
//!         println!("  {} ({:?})", release.version, release.status.state);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Pagination
//!
//! The listing endpoint is paged by creation time: each request asks for up
//! to [`PAGE_SIZE`] releases created before the last one already seen.
//! [`ReleasesClient::releases_paged`] exposes this as a [`Stream`] of
//! [`Page`]s and [`ReleasesClient::releases`] as a [`Stream`] of
//! [`ReleaseInfo`]. Both are lazy: no request is made until the stream is
//! polled, and a consumer that stops early never triggers another request.
//! An error is always the last element of either stream.
//!
//! [`Stream`]: futures::Stream
//!
//! # Configuration
//!
//! [`ClientConfig`] holds the base URL, user agent and optional custom
//! `reqwest::Client`. [`ClientConfig::from_env`] reads:
//!
//! - `RELEASES_API_URL` (optional) - Base URL (defaults to `https://api.releases.hashicorp.com`)
//! - `RELEASES_USER_AGENT` (optional) - `User-Agent` header value

mod client;
mod config;
mod error;
mod models;
mod pagination;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::ReleasesClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{BoxError, ReleasesError, Result};
pub use pagination::{Page, ReleasePages, ReleasePaginator, Releases, PAGE_SIZE};

// Re-export models
pub use models::{
    BuildInfo, LicenseClass, ReleaseInfo, ReleaseState, ReleaseStatus, PRODUCTS_MEDIA_TYPE,
};
