//! Named ISS endpoints
//!
//! # Overview
//!
//! [`Iss`] turns typed calls (candles, daily history, reference data) into
//! a URL and a query, runs them through [`IssClient`], and returns the one
//! table each endpoint is about.
//!
//! Request descriptions: <https://iss.moex.com/iss/reference/>

mod candles;
mod history;
mod query;
mod reference;
mod url;

pub use candles::{CandleQuery, CANDLES, CANDLE_BORDERS, DEFAULT_CANDLE_COLUMNS};
pub use history::{HistoryQuery, SecuritiesTable, DEFAULT_HISTORY_COLUMNS, SECURITIES};
pub use query::{CandleInterval, QueryBuilder};
pub use reference::{Placeholder, SERIES};
pub use url::{Prefix, UrlBuilder};

use crate::client::IssClient;
use crate::config::IssConfig;
use crate::error::Result;
use crate::http::{HttpClient, Transport};
use crate::types::{Query, Table};
use std::sync::Arc;
use tracing::debug;

/// Engine, market, and board overrides for one call
///
/// Unset segments fall back to the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments {
    /// Trading engine
    pub engine: Option<String>,
    /// Market within the engine
    pub market: Option<String>,
    /// Board within the market
    pub board: Option<String>,
}

impl Segments {
    /// Use the configured defaults for every segment
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the engine
    #[must_use]
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    /// Override the market
    #[must_use]
    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Override the board
    #[must_use]
    pub fn board(mut self, board: impl Into<String>) -> Self {
        self.board = Some(board.into());
        self
    }
}

/// Entry point for the named ISS endpoints
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct Iss {
    transport: Arc<dyn Transport>,
    config: IssConfig,
}

impl Iss {
    /// Use an existing transport
    pub fn new(transport: Arc<dyn Transport>, config: IssConfig) -> Self {
        Self { transport, config }
    }

    /// Build a reqwest transport from the configuration
    pub fn from_config(config: IssConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(config.http_client_config())?;
        Ok(Self::new(Arc::new(http), config))
    }

    /// Configuration in effect
    pub fn config(&self) -> &IssConfig {
        &self.config
    }

    /// Shared transport
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Start a URL under the configured base
    pub fn url(&self) -> UrlBuilder {
        UrlBuilder::new(&self.config.base_url)
    }

    /// Paginating client for an arbitrary request, with configured guards
    pub fn client(&self, url: impl Into<String>, query: Query) -> IssClient {
        let client = IssClient::with_query(self.transport(), url, query)
            .with_pagination(self.config.pagination_config());
        match self.config.page_timeout() {
            Some(timeout) => client.with_page_timeout(timeout),
            None => client,
        }
    }

    /// Load a table that the server returns in one response
    pub async fn short_data(&self, url: String, table: &str, query: Query) -> Result<Table> {
        debug!(%url, table, "Loading single-page table");
        self.client(url, query).fetch_table(table).await
    }

    /// Load a table that the server may split into several blocks
    pub async fn long_data(&self, url: String, table: &str, query: Query) -> Result<Table> {
        debug!(%url, table, "Loading paginated table");
        self.client(url, query).collect_table(table).await
    }

    fn engine<'a>(&'a self, segments: &'a Segments) -> &'a str {
        segments
            .engine
            .as_deref()
            .unwrap_or(&self.config.defaults.engine)
    }

    fn market<'a>(&'a self, segments: &'a Segments) -> &'a str {
        segments
            .market
            .as_deref()
            .unwrap_or(&self.config.defaults.market)
    }

    fn board<'a>(&'a self, segments: &'a Segments) -> &'a str {
        segments
            .board
            .as_deref()
            .unwrap_or(&self.config.defaults.board)
    }
}

impl std::fmt::Debug for Iss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iss")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
