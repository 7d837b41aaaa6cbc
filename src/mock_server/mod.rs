//! Mock HashiCorp Releases API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Releases
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server answers cursor-paginated listings from
//! a real release history and records every listing request, so a full
//! traversal can be checked page by page.
//!
//! # Example
//!
//! ```ignore
//! use futures::TryStreamExt;
//! use hashicorp_releases::mock_server::MockServer;
//! use hashicorp_releases::{LicenseClass, ReleasesClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = ReleasesClient::new(server.url()).unwrap();
//!
//!     // Server comes with the waypoint release history
//!     let releases: Vec<_> = client
//!         .releases("waypoint", Some(LicenseClass::Oss))
//!         .unwrap()
//!         .try_collect()
//!         .await
//!         .unwrap();
//!     assert_eq!(releases.len(), 43);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{ListingRequest, MockState};
