//! Release model and release operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ReleasesClient;
use crate::error::{ReleasesError, Result};
use crate::models::license_class::LicenseClass;
use crate::pagination::{releases_path, ReleasePages, ReleasePaginator, Releases};

/// Whether a release is within support, out of support, or withdrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseState {
    /// The release is within support.
    Supported,
    /// The release is out of support.
    Unsupported,
    /// The release has been withdrawn.
    Withdrawn,
}

/// Metadata about a specific build variant of a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Target CPU architecture (e.g., "amd64", "arm64").
    pub arch: String,

    /// Target operating system (e.g., "linux", "darwin").
    pub os: String,

    /// Set when the build is provided for convenience but is not supported.
    #[serde(default)]
    pub unsupported: bool,

    /// Download URL for this build.
    pub url: String,
}

/// Support status of a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseStatus {
    /// Information about the most recent change to `state`. Required by the
    /// API when the release is withdrawn.
    #[serde(default)]
    pub message: Option<String>,

    /// Current support state.
    pub state: ReleaseState,
}

/// Metadata about a specific release of a product.
///
/// Records are decoded from the API as-is and never modified by this crate.
///
/// `license_class` and `status.state` are closed sets: a record carrying a
/// tag outside [`LicenseClass`] or [`ReleaseState`] (or `null`) fails to
/// decode, and with it the whole page, as
/// [`ReleasesError::InvalidResponseBody`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Build variants of this release.
    #[serde(default)]
    pub builds: Vec<BuildInfo>,

    /// Docker image name and tag, in `name:tag` form.
    #[serde(default)]
    pub docker_name_tag: Option<String>,

    /// Whether this release is a prerelease.
    #[serde(default)]
    pub is_prerelease: bool,

    /// License class which applies to this release.
    #[serde(default)]
    pub license_class: LicenseClass,

    /// Name of the product.
    pub name: String,

    /// Support status.
    pub status: ReleaseStatus,

    /// When the release was first created. Listing pagination is keyed on this.
    pub timestamp_created: DateTime<Utc>,

    /// When the release was last updated. Support status changes are tracked
    /// in `status` instead.
    pub timestamp_updated: DateTime<Utc>,

    /// Blog post announcing the release (possibly the major/minor announcement).
    #[serde(default)]
    pub url_blogpost: Option<String>,

    /// Changelog covering this release.
    #[serde(default)]
    pub url_changelog: Option<String>,

    /// Docker Hub image.
    #[serde(default)]
    pub url_docker_registry_dockerhub: Option<String>,

    /// Public AWS ECR image.
    #[serde(default)]
    pub url_docker_registry_ecr: Option<String>,

    /// License text.
    #[serde(default)]
    pub url_license: Option<String>,

    /// Product website.
    #[serde(default)]
    pub url_project_website: Option<String>,

    /// Release notes.
    #[serde(default)]
    pub url_release_notes: Option<String>,

    /// SHA-256 checksums of every build.
    #[serde(default)]
    pub url_shasums: Option<String>,

    /// Detached GPG signatures of the checksums file. Key IDs may appear in
    /// the file names.
    #[serde(default)]
    pub url_shasums_signatures: Vec<String>,

    /// Source repository. Typically absent for enterprise products.
    #[serde(default)]
    pub url_source_repository: Option<String>,

    /// Version number.
    pub version: String,
}

impl ReleaseInfo {
    /// Whether the release is within support.
    pub fn is_supported(&self) -> bool {
        self.status.state == ReleaseState::Supported
    }

    /// Whether the release has been withdrawn.
    pub fn is_withdrawn(&self) -> bool {
        self.status.state == ReleaseState::Withdrawn
    }

    /// Find the build for an OS/architecture pair.
    pub fn build_for(&self, os: &str, arch: &str) -> Option<&BuildInfo> {
        self.builds.iter().find(|b| b.os == os && b.arch == arch)
    }

    /// Builds that are officially supported.
    pub fn supported_builds(&self) -> impl Iterator<Item = &BuildInfo> {
        self.builds.iter().filter(|b| !b.unsupported)
    }
}

impl ReleasesClient {
    /// Fetch all metadata for a specific version of a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product or version is empty, the server
    /// answers with anything other than `200 OK`, or the body is not a
    /// release object.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: hashicorp_releases::ReleasesClient) -> hashicorp_releases::Result<()> {
    /// let release = client.release("terraform", "1.9.0").await?;
    /// if let Some(build) = release.build_for("linux", "amd64") {
    ///     println!("download: {}", build.url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self))]
    pub async fn release(&self, product: &str, version: &str) -> Result<ReleaseInfo> {
        let base = releases_path(product)?;
        if version.is_empty() {
            return Err(ReleasesError::InvalidVersion("may not be empty".to_string()));
        }

        let url = self.endpoint(&format!("{base}/{}", urlencoding::encode(version)))?;
        self.get_json(url).await
    }

    /// Fetch the latest release of a product.
    ///
    /// When `license_class` is `None` or [`LicenseClass::Any`], the latest
    /// release of any license class is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is empty or the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn latest_release(
        &self,
        product: &str,
        license_class: Option<LicenseClass>,
    ) -> Result<ReleaseInfo> {
        let mut url = self.endpoint(&format!("{}/latest", releases_path(product)?))?;
        if let Some(tag) = LicenseClass::filter_tag(license_class) {
            url.query_pairs_mut().append_pair("license_class", tag);
        }
        self.get_json(url).await
    }

    /// Create a paginator over the full release history of a product.
    ///
    /// Most callers want [`releases_paged`](Self::releases_paged) or
    /// [`releases`](Self::releases) instead; the paginator is the manual,
    /// one-page-at-a-time form.
    ///
    /// # Errors
    ///
    /// Returns [`ReleasesError::InvalidProduct`] if `product` is empty. No
    /// request is made.
    pub fn paginator(
        &self,
        product: &str,
        license_class: Option<LicenseClass>,
    ) -> Result<ReleasePaginator> {
        ReleasePaginator::new(self.clone(), product, license_class)
    }

    /// Stream every page of releases of a product, newest first.
    ///
    /// Nothing is requested until the stream is polled. Each element may be
    /// an error, which is always the final element.
    ///
    /// # Errors
    ///
    /// Returns [`ReleasesError::InvalidProduct`] if `product` is empty. No
    /// request is made.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use futures::TryStreamExt;
    /// use hashicorp_releases::LicenseClass;
    ///
    /// # async fn example(client: hashicorp_releases::ReleasesClient) -> hashicorp_releases::Result<()> {
    /// let mut pages = client.releases_paged("waypoint", Some(LicenseClass::Oss))?;
    /// while let Some(page) = pages.try_next().await? {
    ///     println!("page with {} releases", page.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn releases_paged(
        &self,
        product: &str,
        license_class: Option<LicenseClass>,
    ) -> Result<ReleasePages> {
        Ok(self.paginator(product, license_class)?.into_pages())
    }

    /// Stream every release of a product, newest first.
    ///
    /// Pages are fetched only as the stream is drained.
    ///
    /// # Errors
    ///
    /// Returns [`ReleasesError::InvalidProduct`] if `product` is empty. No
    /// request is made.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use futures::TryStreamExt;
    ///
    /// # async fn example(client: hashicorp_releases::ReleasesClient) -> hashicorp_releases::Result<()> {
    /// let mut releases = client.releases("waypoint", None)?;
    /// while let Some(release) = releases.try_next().await? {
    ///     println!("{} {}", release.name, release.version);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn releases(
        &self,
        product: &str,
        license_class: Option<LicenseClass>,
    ) -> Result<Releases> {
        Ok(self.releases_paged(product, license_class)?.into_releases())
    }
}
