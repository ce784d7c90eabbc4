//! Daily trading history

use super::query::QueryBuilder;
use super::{Iss, Segments};
use crate::error::Result;
use crate::types::{Query, Table};
use chrono::NaiveDate;

/// Path ending and table of security listings
pub const SECURITIES: &str = "securities";

const HISTORY: &str = "history";
const DATES: &str = "dates";

/// Columns loaded when a history query does not name any
pub const DEFAULT_HISTORY_COLUMNS: [&str; 5] = ["BOARDID", "TRADEDATE", "CLOSE", "VOLUME", "VALUE"];

/// Columns of a board listing loaded by default
const DEFAULT_SECURITIES_COLUMNS: [&str; 4] = ["SECID", "REGNUMBER", "LOTSIZE", "SHORTNAME"];

/// Table of a board listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecuritiesTable {
    /// Directory of traded securities
    #[default]
    Securities,
    /// Results of today's trading
    MarketData,
}

impl SecuritiesTable {
    /// Wire name of the table
    pub fn as_str(self) -> &'static str {
        match self {
            SecuritiesTable::Securities => SECURITIES,
            SecuritiesTable::MarketData => "marketdata",
        }
    }
}

/// Parameters of a history request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    /// First date; `None` loads from the beginning of history
    pub from: Option<NaiveDate>,
    /// Last date; `None` loads to the end of history
    pub till: Option<NaiveDate>,
    /// Columns to load; `None` or an empty list loads all of them
    pub columns: Option<Vec<String>>,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            from: None,
            till: None,
            columns: Some(DEFAULT_HISTORY_COLUMNS.iter().map(ToString::to_string).collect()),
        }
    }
}

impl HistoryQuery {
    fn to_query(&self) -> Query {
        QueryBuilder::new()
            .from_date(self.from)
            .till_date(self.till)
            .only(HISTORY)
            .columns(HISTORY, self.columns.as_deref().unwrap_or_default())
            .build()
    }
}

impl Iss {
    /// Date range available in the history of a board, as one `from`/`till` row
    ///
    /// <https://iss.moex.com/iss/reference/26>
    pub async fn board_dates(&self, segments: &Segments) -> Result<Table> {
        let url = self
            .url()
            .history()
            .engine(self.engine(segments))
            .market(self.market(segments))
            .board(self.board(segments))
            .ending(DATES)
            .build();
        self.short_data(url, DATES, Query::new()).await
    }

    /// Securities of a board with reference or market data
    ///
    /// `None` columns load the ticker, registration number, lot size, and
    /// short name; an empty list loads every column.
    ///
    /// <https://iss.moex.com/iss/reference/32>
    pub async fn board_securities(
        &self,
        table: SecuritiesTable,
        columns: Option<&[String]>,
        segments: &Segments,
    ) -> Result<Table> {
        let url = self
            .url()
            .engine(self.engine(segments))
            .market(self.market(segments))
            .board(self.board(segments))
            .ending(SECURITIES)
            .build();

        let name = table.as_str();
        let builder = QueryBuilder::new().only(name);
        let query = match columns {
            Some(columns) => builder.columns(name, columns),
            None => builder.columns(name, &DEFAULT_SECURITIES_COLUMNS),
        }
        .build();

        self.short_data(url, name, query).await
    }

    /// History of one security in every board of the market
    ///
    /// A date may appear more than once when the security traded in
    /// several boards.
    ///
    /// <https://iss.moex.com/iss/reference/63>
    pub async fn market_history(
        &self,
        security: &str,
        query: &HistoryQuery,
        segments: &Segments,
    ) -> Result<Table> {
        let url = self
            .url()
            .history()
            .engine(self.engine(segments))
            .market(self.market(segments))
            .security(security)
            .build();
        self.long_data(url, HISTORY, query.to_query()).await
    }

    /// History of one security in one board
    ///
    /// <https://iss.moex.com/iss/reference/65>
    pub async fn board_history(
        &self,
        security: &str,
        query: &HistoryQuery,
        segments: &Segments,
    ) -> Result<Table> {
        let url = self
            .url()
            .history()
            .engine(self.engine(segments))
            .market(self.market(segments))
            .board(self.board(segments))
            .security(security)
            .build();
        self.long_data(url, HISTORY, query.to_query()).await
    }
}
