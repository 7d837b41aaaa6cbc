//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Releases API server.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{LicenseClass, ReleaseInfo, PRODUCTS_MEDIA_TYPE};

/// A listing request as received by the mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    /// Product path segment, decoded.
    pub product: String,
    /// Raw `limit` query value.
    pub limit: Option<String>,
    /// Raw `after` query value.
    pub after: Option<String>,
    /// Raw `license_class` query value.
    pub license_class: Option<String>,
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Releases indexed by product name, in no particular order.
    pub releases: HashMap<String, Vec<ReleaseInfo>>,

    /// Products listed by `/v1/products` even without releases.
    pub extra_products: BTreeSet<String>,

    /// `Content-Type` sent by `/v1/products`.
    pub products_content_type: String,

    /// Every listing request received, in arrival order.
    pub listing_requests: Vec<ListingRequest>,

    /// When set to `(n, status)`, listing requests after the first `n`
    /// answer with `status`.
    pub listing_failure: Option<(usize, u16)>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            releases: HashMap::new(),
            extra_products: BTreeSet::new(),
            products_content_type: PRODUCTS_MEDIA_TYPE.to_string(),
            listing_requests: Vec::new(),
            listing_failure: None,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a release to the state.
    pub fn with_release(mut self, release: ReleaseInfo) -> Self {
        self.insert_release(release);
        self
    }

    /// Add several releases to the state.
    pub fn with_releases(mut self, releases: impl IntoIterator<Item = ReleaseInfo>) -> Self {
        for release in releases {
            self.insert_release(release);
        }
        self
    }

    /// List a product that has no releases.
    pub fn with_product(mut self, product: &str) -> Self {
        self.extra_products.insert(product.to_string());
        self
    }

    /// Override the `Content-Type` of the product listing.
    pub fn with_products_content_type(mut self, content_type: &str) -> Self {
        self.products_content_type = content_type.to_string();
        self
    }

    /// Fail every listing request after the first `pages` with `status`.
    pub fn with_listing_failure_after(mut self, pages: usize, status: u16) -> Self {
        self.listing_failure = Some((pages, status));
        self
    }

    /// Insert a release under its product name.
    pub fn insert_release(&mut self, release: ReleaseInfo) {
        self.releases
            .entry(release.name.clone())
            .or_default()
            .push(release);
    }

    /// Whether a product is known.
    pub fn has_product(&self, product: &str) -> bool {
        self.releases.contains_key(product) || self.extra_products.contains(product)
    }

    /// All known product names, sorted.
    pub fn products(&self) -> Vec<String> {
        let mut products: BTreeSet<String> = self.releases.keys().cloned().collect();
        products.extend(self.extra_products.iter().cloned());
        products.into_iter().collect()
    }

    /// Get a release by product and exact version.
    pub fn get_release(&self, product: &str, version: &str) -> Option<&ReleaseInfo> {
        self.releases
            .get(product)?
            .iter()
            .find(|r| r.version == version)
    }

    /// Get the most recently created release, optionally filtered by license class.
    pub fn latest_release(
        &self,
        product: &str,
        license_class: Option<LicenseClass>,
    ) -> Option<&ReleaseInfo> {
        self.releases
            .get(product)?
            .iter()
            .filter(|r| Self::matches_class(r, license_class))
            .max_by_key(|r| r.timestamp_created)
    }

    /// One page of the listing: newest first, created strictly before `after`.
    pub fn list_releases(
        &self,
        product: &str,
        license_class: Option<LicenseClass>,
        after: Option<DateTime<Utc>>,
        limit: usize,
    ) -> Vec<ReleaseInfo> {
        let Some(releases) = self.releases.get(product) else {
            return Vec::new();
        };

        let mut matching: Vec<&ReleaseInfo> = releases
            .iter()
            .filter(|r| Self::matches_class(r, license_class))
            .filter(|r| after.map_or(true, |after| r.timestamp_created < after))
            .collect();

        matching.sort_by(|a, b| b.timestamp_created.cmp(&a.timestamp_created));
        matching.into_iter().take(limit).cloned().collect()
    }

    /// Status to fail the next listing request with, if any.
    ///
    /// Call after recording the request.
    pub fn listing_failure_status(&self) -> Option<u16> {
        match self.listing_failure {
            Some((pages, status)) if self.listing_requests.len() > pages => Some(status),
            _ => None,
        }
    }

    fn matches_class(release: &ReleaseInfo, filter: Option<LicenseClass>) -> bool {
        match filter {
            None | Some(LicenseClass::Any) => true,
            Some(class) => release.license_class == class,
        }
    }
}
