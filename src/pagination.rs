//! Cursor pagination over the release listing endpoint.
//!
//! The listing endpoint returns releases newest first, at most `limit` per
//! request. The next page is requested with `after` set to the creation
//! timestamp of the last release of the previous page, and an empty page
//! marks the end of the history.
//!
//! [`ReleasePaginator`] holds the cursor and fetches one page per call.
//! [`ReleasePages`] drives a paginator as a [`Stream`] of pages, and
//! [`Releases`] flattens that into a [`Stream`] of individual releases.
//!
//! Correctness depends on the server ordering releases strictly by creation
//! time: two releases sharing a creation timestamp across a page boundary
//! can be skipped or repeated.

use std::pin::Pin;
use std::task::{Context, Poll};

use chrono::{DateTime, SecondsFormat, Utc};
use futures::future::BoxFuture;
use futures::ready;
use futures::stream::{FusedStream, Stream};
use futures::FutureExt;
use serde::Serialize;
use url::Url;

use crate::client::ReleasesClient;
use crate::error::{ReleasesError, Result};
use crate::models::{LicenseClass, ReleaseInfo};

/// Number of releases requested per page.
pub const PAGE_SIZE: u32 = 16;

/// One page of results from the listing endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page, in server order.
    pub items: Vec<T>,
    /// Cursor the page was requested with (`None` for the first page).
    pub after: Option<DateTime<Utc>>,
    /// Maximum number of items the page could hold.
    pub limit: u32,
}

impl<T> Page<T> {
    /// Create a new page from items and the request that produced them.
    #[must_use]
    pub fn new(items: Vec<T>, after: Option<DateTime<Utc>>, limit: u32) -> Self {
        Self {
            items,
            after,
            limit,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the page holds as many items as were requested.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.limit as usize
    }

    /// Returns the last item, whose position decides the next cursor.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Path of the listing endpoint for a product, e.g. `v1/releases/terraform`.
pub(crate) fn releases_path(product: &str) -> Result<String> {
    if product.is_empty() {
        return Err(ReleasesError::InvalidProduct("may not be empty".to_string()));
    }
    Ok(format!("v1/releases/{}", urlencoding::encode(product)))
}

/// Format a cursor for the `after` query parameter.
///
/// RFC 3339 in UTC with a `Z` suffix; fractional seconds are kept only when
/// non-zero so sub-second creation times are not truncated. This is finer
/// than second resolution on purpose: a server that rejects sub-second
/// `after` values will fail the page after any release created off the
/// whole second.
pub(crate) fn encode_cursor(cursor: &DateTime<Utc>) -> String {
    cursor.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Fetches the release history of one product, one page at a time.
///
/// A paginator is good for exactly one traversal: the cursor only moves
/// forward. Create one with [`ReleasesClient::paginator`].
#[derive(Debug)]
pub struct ReleasePaginator {
    client: ReleasesClient,
    product: String,
    product_url: Url,
    page_size: u32,
    license_class: Option<LicenseClass>,
    cursor: Option<DateTime<Utc>>,
}

impl ReleasePaginator {
    pub(crate) fn new(
        client: ReleasesClient,
        product: &str,
        license_class: Option<LicenseClass>,
    ) -> Result<Self> {
        let product_url = client.endpoint(&releases_path(product)?)?;

        Ok(Self {
            client,
            product: product.to_string(),
            product_url,
            page_size: PAGE_SIZE,
            license_class,
            cursor: None,
        })
    }

    /// The product being paged through.
    pub fn product(&self) -> &str {
        &self.product
    }

    /// The license class filter, if any.
    pub fn license_class(&self) -> Option<LicenseClass> {
        self.license_class
    }

    /// Creation timestamp of the last release returned so far.
    pub fn cursor(&self) -> Option<DateTime<Utc>> {
        self.cursor
    }

    /// URL of the next page request.
    pub fn page_url(&self) -> Url {
        let mut url = self.product_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &self.page_size.to_string());
            if let Some(cursor) = &self.cursor {
                query.append_pair("after", &encode_cursor(cursor));
            }
            if let Some(tag) = LicenseClass::filter_tag(self.license_class) {
                query.append_pair("license_class", tag);
            }
        }
        url
    }

    /// Fetch the next page.
    ///
    /// Returns `Ok(None)` once the server answers with an empty page. On
    /// error the cursor is left where it was.
    ///
    /// # Errors
    ///
    /// Returns any error from the request or from decoding the page.
    pub async fn next_page(&mut self) -> Result<Option<Page<ReleaseInfo>>> {
        let items = self.page_request().await?;
        Ok(self.accept(items))
    }

    /// Turn this paginator into a stream of pages.
    pub fn into_pages(self) -> ReleasePages {
        ReleasePages {
            paginator: self,
            state: PageState::Idle,
        }
    }

    /// Build the request for the page after the current cursor.
    ///
    /// The returned future owns everything it needs, so the paginator stays
    /// free until the response is accepted.
    fn page_request(&self) -> BoxFuture<'static, Result<Vec<ReleaseInfo>>> {
        let client = self.client.clone();
        let url = self.page_url();
        tracing::debug!(
            product = %self.product,
            cursor = ?self.cursor,
            url = %url,
            "requesting release page"
        );
        async move { client.get_json::<Vec<ReleaseInfo>>(url).await }.boxed()
    }

    /// Wrap a fetched page and advance the cursor past it.
    fn accept(&mut self, items: Vec<ReleaseInfo>) -> Option<Page<ReleaseInfo>> {
        let page = Page::new(items, self.cursor, self.page_size);
        match page.last() {
            Some(last) => {
                self.cursor = Some(last.timestamp_created);
                tracing::debug!(
                    product = %self.product,
                    items = page.len(),
                    cursor = ?self.cursor,
                    "advanced release cursor"
                );
                Some(page)
            }
            None => {
                tracing::debug!(product = %self.product, "release history exhausted");
                None
            }
        }
    }
}

enum PageState {
    /// Waiting to be polled; the next poll issues a request.
    Idle,
    /// A page request is in flight.
    Fetching(BoxFuture<'static, Result<Vec<ReleaseInfo>>>),
    /// An empty page was returned.
    Exhausted,
    /// A request failed and the error has been yielded.
    Failed,
}

/// Stream of release pages for one product, newest first.
///
/// Returned by [`ReleasesClient::releases_paged`]. Nothing is requested until
/// the stream is polled, and each poll issues at most one request. The stream
/// ends after an empty page, or after yielding the first error. Dropping it
/// cancels any request in flight.
pub struct ReleasePages {
    paginator: ReleasePaginator,
    state: PageState,
}

impl std::fmt::Debug for ReleasePages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            PageState::Idle => "idle",
            PageState::Fetching(_) => "fetching",
            PageState::Exhausted => "exhausted",
            PageState::Failed => "failed",
        };
        f.debug_struct("ReleasePages")
            .field("paginator", &self.paginator)
            .field("state", &state)
            .finish()
    }
}

impl ReleasePages {
    /// The underlying paginator.
    pub fn paginator(&self) -> &ReleasePaginator {
        &self.paginator
    }

    /// Flatten this stream into individual releases.
    pub fn into_releases(self) -> Releases {
        Releases {
            pages: self,
            current: Vec::new().into_iter(),
        }
    }
}

impl Stream for ReleasePages {
    type Item = Result<Page<ReleaseInfo>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            match &mut this.state {
                PageState::Idle => {
                    this.state = PageState::Fetching(this.paginator.page_request());
                }
                PageState::Fetching(request) => {
                    let outcome = ready!(request.poll_unpin(cx));
                    return Poll::Ready(match outcome {
                        Ok(items) => match this.paginator.accept(items) {
                            Some(page) => {
                                this.state = PageState::Idle;
                                Some(Ok(page))
                            }
                            None => {
                                this.state = PageState::Exhausted;
                                None
                            }
                        },
                        Err(err) => {
                            this.state = PageState::Failed;
                            Some(Err(err))
                        }
                    });
                }
                PageState::Exhausted | PageState::Failed => return Poll::Ready(None),
            }
        }
    }
}

impl FusedStream for ReleasePages {
    fn is_terminated(&self) -> bool {
        matches!(self.state, PageState::Exhausted | PageState::Failed)
    }
}

/// Stream of individual releases for one product, newest first.
///
/// Returned by [`ReleasesClient::releases`]. The next page is only requested
/// once every release of the current page has been yielded. Errors from the
/// page stream are passed through and end this stream too.
#[derive(Debug)]
pub struct Releases {
    pages: ReleasePages,
    current: std::vec::IntoIter<ReleaseInfo>,
}

impl Releases {
    /// The underlying paginator.
    pub fn paginator(&self) -> &ReleasePaginator {
        self.pages.paginator()
    }
}

impl Stream for Releases {
    type Item = Result<ReleaseInfo>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(release) = this.current.next() {
                return Poll::Ready(Some(Ok(release)));
            }

            match ready!(Pin::new(&mut this.pages).poll_next(cx)) {
                Some(Ok(page)) => this.current = page.into_iter(),
                Some(Err(err)) => return Poll::Ready(Some(Err(err))),
                None => return Poll::Ready(None),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.pages.is_terminated() {
            (self.current.len(), Some(self.current.len()))
        } else {
            (self.current.len(), None)
        }
    }
}

impl FusedStream for Releases {
    fn is_terminated(&self) -> bool {
        self.current.len() == 0 && self.pages.is_terminated()
    }
}
