//! Candles and candle borders

use super::query::{CandleInterval, QueryBuilder};
use super::{Iss, Segments};
use crate::error::Result;
use crate::types::Table;
use chrono::NaiveDate;

/// Path ending and table of candle requests
pub const CANDLES: &str = "candles";

/// Path ending of candle border requests
pub const CANDLE_BORDERS: &str = "candleborders";

/// Table returned by candle border requests
const BORDERS: &str = "borders";

/// Columns loaded when a candle query does not name any
pub const DEFAULT_CANDLE_COLUMNS: [&str; 6] = ["begin", "open", "high", "low", "close", "volume"];

/// Parameters of a candle request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleQuery {
    /// Candle size
    pub interval: CandleInterval,
    /// First date; `None` loads from the beginning of history
    pub from: Option<NaiveDate>,
    /// Last date; `None` loads to the end of history
    pub till: Option<NaiveDate>,
    /// Columns to load; `None` or an empty list loads all of them
    pub columns: Option<Vec<String>>,
}

impl Default for CandleQuery {
    fn default() -> Self {
        Self {
            interval: CandleInterval::Day,
            from: None,
            till: None,
            columns: Some(DEFAULT_CANDLE_COLUMNS.iter().map(ToString::to_string).collect()),
        }
    }
}

impl CandleQuery {
    fn to_query(&self) -> crate::types::Query {
        QueryBuilder::new()
            .interval(self.interval)
            .from_date(self.from)
            .till_date(self.till)
            .only(CANDLES)
            .columns(CANDLES, self.columns.as_deref().unwrap_or_default())
            .build()
    }
}

impl Iss {
    /// Date ranges available for candles in every board of the market
    ///
    /// <https://iss.moex.com/iss/reference/156>
    pub async fn market_candle_borders(&self, security: &str, segments: &Segments) -> Result<Table> {
        let url = self
            .url()
            .engine(self.engine(segments))
            .market(self.market(segments))
            .security(security)
            .ending(CANDLE_BORDERS)
            .build();
        self.short_data(url, BORDERS, Default::default()).await
    }

    /// Date ranges available for candles in one board
    ///
    /// <https://iss.moex.com/iss/reference/48>
    pub async fn board_candle_borders(&self, security: &str, segments: &Segments) -> Result<Table> {
        let url = self
            .url()
            .engine(self.engine(segments))
            .market(self.market(segments))
            .board(self.board(segments))
            .security(security)
            .ending(CANDLE_BORDERS)
            .build();
        self.short_data(url, BORDERS, Default::default()).await
    }

    /// HLOCV candles of a security across the main boards of the market
    ///
    /// Several candles may share one interval when the security trades in
    /// more than one main board.
    ///
    /// <https://iss.moex.com/iss/reference/155>
    pub async fn market_candles(
        &self,
        security: &str,
        query: &CandleQuery,
        segments: &Segments,
    ) -> Result<Table> {
        let url = self
            .url()
            .engine(self.engine(segments))
            .market(self.market(segments))
            .security(security)
            .ending(CANDLES)
            .build();
        self.long_data(url, CANDLES, query.to_query()).await
    }

    /// HLOCV candles of a security in one board
    ///
    /// <https://iss.moex.com/iss/reference/46>
    pub async fn board_candles(
        &self,
        security: &str,
        query: &CandleQuery,
        segments: &Segments,
    ) -> Result<Table> {
        let url = self
            .url()
            .engine(self.engine(segments))
            .market(self.market(segments))
            .board(self.board(segments))
            .security(security)
            .ending(CANDLES)
            .build();
        self.long_data(url, CANDLES, query.to_query()).await
    }
}
