//! Client for one logical ISS request

use super::tables::{merge_into, take_table};
use crate::decode::decode_envelope;
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::pagination::{next_page, take_cursor, NextPage, PaginationConfig, PaginationState};
use crate::types::{Query, Table, TablesDict};
use futures::stream::{self, Stream, TryStreamExt};
use indexmap::IndexMap;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Parameters requesting extended JSON without column metadata
pub const EXTENDED_JSON_PARAMS: [(&str, &str); 2] = [("iss.json", "extended"), ("iss.meta", "off")];

/// Stream of pages, cursor tables removed
pub type PageStream = Pin<Box<dyn Stream<Item = Result<TablesDict>> + Send>>;

/// Immutable request description shared with running page streams
struct Request {
    transport: Arc<dyn Transport>,
    url: String,
    query: Query,
    page_timeout: Option<Duration>,
}

impl Request {
    fn make_query(&self, start: Option<u64>) -> Vec<(String, String)> {
        let mut query: IndexMap<String, String> = EXTENDED_JSON_PARAMS
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();

        for (key, value) in &self.query {
            query.insert(key.clone(), value.to_string());
        }

        // Offset 0 is never sent, so it looks the same as no offset
        if let Some(start) = start.filter(|s| *s != 0) {
            query.insert("start".to_string(), start.to_string());
        }

        query.into_iter().collect()
    }

    async fn fetch(&self, start: Option<u64>) -> Result<TablesDict> {
        let query = self.make_query(start);
        let request = self.transport.get(&self.url, &query);

        let response = match self.page_timeout {
            Some(timeout) => tokio::time::timeout(timeout, request)
                .await
                .map_err(|_| Error::Timeout {
                    url: self.url.clone(),
                    timeout_ms: timeout.as_millis() as u64,
                })??,
            None => request.await?,
        };

        if !response.is_success() {
            return Err(Error::http_status(response.url, response.status));
        }

        decode_envelope(&response.body)
    }
}

/// Progress of a page stream between polls
enum Step {
    Fetch(PaginationState),
    Fail(Error),
    Done,
}

/// Client for one ISS request that may span several pages
///
/// The URL and base query never change after construction. The query is
/// always sent together with [`EXTENDED_JSON_PARAMS`].
///
/// Dropping a [`PageStream`] or a pending [`IssClient::collect_all`] future
/// cancels the request in flight.
#[derive(Clone)]
pub struct IssClient {
    request: Arc<Request>,
    pagination: PaginationConfig,
}

impl IssClient {
    /// Create a client for `url` with no extra query parameters
    pub fn new(transport: Arc<dyn Transport>, url: impl Into<String>) -> Self {
        Self::with_query(transport, url, Query::new())
    }

    /// Create a client for `url` with a base query
    pub fn with_query(
        transport: Arc<dyn Transport>,
        url: impl Into<String>,
        query: Query,
    ) -> Self {
        Self {
            request: Arc::new(Request {
                transport,
                url: url.into(),
                query,
                page_timeout: None,
            }),
            pagination: PaginationConfig::default(),
        }
    }

    /// Set pagination guards
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Bound the time spent on each page fetch
    #[must_use]
    pub fn with_page_timeout(self, timeout: Duration) -> Self {
        let request = Request {
            transport: Arc::clone(&self.request.transport),
            url: self.request.url.clone(),
            query: self.request.query.clone(),
            page_timeout: Some(timeout),
        };
        Self {
            request: Arc::new(request),
            pagination: self.pagination,
        }
    }

    /// Request URL
    pub fn url(&self) -> &str {
        &self.request.url
    }

    /// Base query, without the fixed extended JSON parameters
    pub fn query(&self) -> &Query {
        &self.request.query
    }

    /// Pagination guards in effect
    pub fn pagination(&self) -> &PaginationConfig {
        &self.pagination
    }

    /// Query parameters sent for a page starting at `start`
    pub fn make_query(&self, start: Option<u64>) -> Vec<(String, String)> {
        self.request.make_query(start)
    }

    /// Load one page
    ///
    /// `start` is the row number to load from; `None` or `Some(0)` loads
    /// from the beginning. The cursor table, if any, is left in the result.
    pub async fn fetch(&self, start: Option<u64>) -> Result<TablesDict> {
        self.request.fetch(start).await
    }

    /// Stream successive pages of the request
    ///
    /// Each yielded page has its `history.cursor` table removed. A page is
    /// yielded before its cursor is checked, so an inconsistent cursor shows
    /// up as an error right after that page. The stream ends after the first
    /// error.
    pub fn pages(&self) -> PageStream {
        let request = Arc::clone(&self.request);
        let config = self.pagination;

        Box::pin(stream::try_unfold(
            Step::Fetch(PaginationState::new()),
            move |step| {
                let request = Arc::clone(&request);
                async move {
                    let mut state = match step {
                        Step::Fetch(state) => state,
                        Step::Fail(err) => return Err(err),
                        Step::Done => return Ok(None),
                    };

                    if state.limit_reached(&config) {
                        return Err(Error::PageLimit {
                            url: request.url.clone(),
                            max_pages: state.pages,
                        });
                    }

                    let mut page = request.fetch(Some(state.start)).await?;
                    let cursor = take_cursor(&mut page);
                    state.record_page(&page);

                    debug!(
                        url = %request.url,
                        start = state.start,
                        cursor = cursor.is_some(),
                        "Fetched page {}",
                        state.pages
                    );

                    let next = match next_page(state.start, cursor.as_ref(), &page, &config) {
                        Ok(NextPage::Continue { start }) => {
                            state.start = start;
                            Step::Fetch(state)
                        }
                        Ok(NextPage::Done) => {
                            debug!(
                                url = %request.url,
                                "Completed after {} pages, {} rows",
                                state.pages,
                                state.rows
                            );
                            Step::Done
                        }
                        Err(err) => Step::Fail(err),
                    };

                    Ok(Some((page, next)))
                }
            },
        ))
    }

    /// Fetch every page and merge the tables in page order
    ///
    /// Fails with the first error met; rows gathered before it are dropped.
    pub async fn collect_all(&self) -> Result<TablesDict> {
        let mut all = TablesDict::new();
        let mut pages = self.pages();

        while let Some(page) = pages.try_next().await? {
            merge_into(&mut all, page);
        }

        Ok(all)
    }

    /// Fetch a single page and return one of its tables
    pub async fn fetch_table(&self, table: &str) -> Result<Table> {
        take_table(self.fetch(None).await?, table)
    }

    /// Fetch every page and return one of the merged tables
    pub async fn collect_table(&self, table: &str) -> Result<Table> {
        take_table(self.collect_all().await?, table)
    }
}

impl fmt::Debug for IssClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssClient")
            .field("url", &self.request.url)
            .field("query", &self.request.query)
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}
