//! Product listing.

use crate::client::ReleasesClient;
use crate::error::Result;

/// Media type the product listing endpoint must answer with.
pub const PRODUCTS_MEDIA_TYPE: &str = "application/vnd+hashicorp.releases-api.v1+json";

impl ReleasesClient {
    /// List the products for which release information is available.
    ///
    /// Unlike the release endpoints, this endpoint's `Content-Type` is
    /// checked and must be exactly [`PRODUCTS_MEDIA_TYPE`].
    ///
    /// # Errors
    ///
    /// Returns [`ReleasesError::InvalidContentType`](crate::ReleasesError::InvalidContentType)
    /// if the server answers with another media type, or any request error.
    #[tracing::instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<String>> {
        let url = self.endpoint("v1/products")?;
        self.get_json_as(url, PRODUCTS_MEDIA_TYPE).await
    }
}
