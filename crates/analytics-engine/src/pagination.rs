//! Cursor-based pagination support.

use std::marker::PhantomData;
use std::sync::Arc;

use futures::Stream;
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::ClientInner;
use crate::error::AnalyticsEngineError;
use crate::http_client::HttpClient;
use crate::models::Paginated;

/// The fixed parameters of a listing: where to send it and what to filter on.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    segments: Vec<String>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    start: Option<String>,
}

impl ListRequest {
    /// A listing of the collection at the given path segments.
    #[must_use]
    pub fn new<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add filter parameters. `start` must not be among them.
    #[must_use]
    pub fn with_query(mut self, query: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query
            .extend(query.into_iter().filter(|(name, _)| name != "start"));
        self
    }

    /// Headers sent with every page request, overriding client defaults.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Begin at `cursor` instead of the first page. An empty cursor means the first page.
    #[must_use]
    pub fn with_start(mut self, cursor: Option<String>) -> Self {
        self.start = cursor.filter(|c| !c.is_empty());
        self
    }

    /// The path this listing targets, for logging.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PagerState {
    NotStarted,
    Resume(String),
    Exhausted,
}

/// Lazily walks a paginated listing one page per request.
///
/// The presence of a `next` link on the last fetched page is the only thing
/// that decides whether another page exists; page size and total count in
/// the body are ignored. A failed fetch leaves the pager where it was, so the
/// same page can be requested again. The same holds when a `get_next` future
/// is dropped before completing.
pub struct Pager<C: HttpClient, Page: Paginated + DeserializeOwned> {
    inner: Arc<ClientInner<C>>,
    request: ListRequest,
    state: PagerState,
    _page: PhantomData<fn() -> Page>,
}

impl<C: HttpClient, Page: Paginated + DeserializeOwned> Pager<C, Page> {
    pub(crate) fn new(inner: Arc<ClientInner<C>>, request: ListRequest) -> Self {
        let state = request
            .start
            .clone()
            .map_or(PagerState::NotStarted, PagerState::Resume);
        Self {
            inner,
            request,
            state,
            _page: PhantomData,
        }
    }

    /// Whether [`Self::get_next`] is expected to produce another page.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.state != PagerState::Exhausted
    }

    /// The cursor the next request will send, if any.
    ///
    /// Persist it to resume the listing later with a fresh pager.
    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        match &self.state {
            PagerState::Resume(cursor) => Some(cursor),
            PagerState::NotStarted | PagerState::Exhausted => None,
        }
    }

    /// Fetch the next page and return its items.
    ///
    /// A page may be empty without being the last one.
    ///
    /// # Errors
    ///
    /// - [`AnalyticsEngineError::IllegalState`] if the listing is exhausted. No
    ///   request is sent.
    /// - [`AnalyticsEngineError::MalformedResponse`] if the page lacks its item
    ///   array or has a `next` link without a cursor.
    /// - Any error of the underlying request.
    pub async fn get_next(&mut self) -> Result<Vec<Page::Item>, AnalyticsEngineError> {
        let cursor = match &self.state {
            PagerState::Exhausted => {
                return Err(AnalyticsEngineError::IllegalState("no more results"));
            }
            PagerState::NotStarted => None,
            PagerState::Resume(cursor) => Some(cursor.as_str()),
        };

        let page = self.fetch_page(cursor).await?;
        let next = match page.next_link() {
            Some(link) => Some(link.cursor().ok_or_else(|| {
                AnalyticsEngineError::MalformedResponse(
                    "`next` link carries no `start` cursor".to_owned(),
                )
            })?),
            None => None,
        };

        let items = page.into_items();
        debug!(
            path = %self.request.path(),
            items = items.len(),
            has_next = next.is_some(),
            "Fetched page."
        );
        self.state = next.map_or(PagerState::Exhausted, PagerState::Resume);
        Ok(items)
    }

    /// Fetch every remaining page and concatenate the items in order.
    ///
    /// Stops at the first error and discards what was collected so far.
    pub async fn get_all(&mut self) -> Result<Vec<Page::Item>, AnalyticsEngineError> {
        let mut all = Vec::new();
        while self.has_next() {
            all.extend(self.get_next().await?);
        }
        Ok(all)
    }

    /// Turn the pager into a stream of pages.
    ///
    /// The stream ends after the last page or right after yielding an error.
    pub fn into_stream(
        self,
    ) -> impl Stream<Item = Result<Vec<Page::Item>, AnalyticsEngineError>> {
        futures::stream::try_unfold(self, |mut pager| async move {
            if !pager.has_next() {
                return Ok::<_, AnalyticsEngineError>(None);
            }
            let items = pager.get_next().await?;
            Ok::<_, AnalyticsEngineError>(Some((items, pager)))
        })
    }

    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page, AnalyticsEngineError> {
        let segments: Vec<&str> = self.request.segments.iter().map(String::as_str).collect();
        let mut query: Vec<(&str, &str)> = self
            .request
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        if let Some(cursor) = cursor {
            query.push(("start", cursor));
        }

        debug!(path = %self.request.path(), cursor = ?cursor, "Fetching page.");
        let response = self
            .inner
            .execute(Method::GET, &segments, &query, &self.request.headers, None)
            .await?;

        serde_json::from_slice(&response.body).map_err(|e| {
            AnalyticsEngineError::MalformedResponse(format!("unexpected list page body: {e}"))
        })
    }
}
