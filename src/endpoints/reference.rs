//! Reference data: placeholders, security search, futures series

use super::history::SECURITIES;
use super::query::QueryBuilder;
use super::{Iss, Segments};
use crate::error::Result;
use crate::types::{Query, Table};
use std::str::FromStr;

/// Path ending and table of futures series requests
pub const SERIES: &str = "series";

const DEFAULT_SEARCH_COLUMNS: [&str; 2] = ["secid", "regnumber"];
const SERIES_ENGINE: &str = "futures";
const SERIES_MARKET: &str = "forts";

/// URL placeholder whose valid values [`Iss::reference`] lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placeholder {
    /// Trading engines
    Engines,
    /// Markets
    Markets,
    /// Boards (trading modes)
    #[default]
    Boards,
    /// Board groups
    BoardGroups,
    /// Candle durations
    Durations,
    /// Security types
    SecurityTypes,
    /// Security groups
    SecurityGroups,
    /// Security collections
    SecurityCollections,
}

impl Placeholder {
    /// Table name of the placeholder in the index response
    pub fn as_str(self) -> &'static str {
        match self {
            Placeholder::Engines => "engines",
            Placeholder::Markets => "markets",
            Placeholder::Boards => "boards",
            Placeholder::BoardGroups => "boardgroups",
            Placeholder::Durations => "durations",
            Placeholder::SecurityTypes => "securitytypes",
            Placeholder::SecurityGroups => "securitygroups",
            Placeholder::SecurityCollections => "securitycollections",
        }
    }
}

impl FromStr for Placeholder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "engines" => Ok(Placeholder::Engines),
            "markets" => Ok(Placeholder::Markets),
            "boards" => Ok(Placeholder::Boards),
            "boardgroups" => Ok(Placeholder::BoardGroups),
            "durations" => Ok(Placeholder::Durations),
            "securitytypes" => Ok(Placeholder::SecurityTypes),
            "securitygroups" => Ok(Placeholder::SecurityGroups),
            "securitycollections" => Ok(Placeholder::SecurityCollections),
            other => Err(format!("unknown placeholder '{other}'")),
        }
    }
}

impl Iss {
    /// Valid values of a URL placeholder
    ///
    /// For example `/iss/engines/[engine]/markets/[market]/boards/[board]/securities`
    /// contains the `engines`, `markets`, and `boards` placeholders.
    ///
    /// <https://iss.moex.com/iss/reference/28>
    pub async fn reference(&self, placeholder: Placeholder) -> Result<Table> {
        let url = self.url().ending("index").build();
        self.short_data(url, placeholder.as_str(), Query::new()).await
    }

    /// Find securities by part of the code, name, ISIN, issuer id, or
    /// registration number
    ///
    /// `None` columns load the ticker and registration number; an empty
    /// list loads every column.
    ///
    /// <https://iss.moex.com/iss/reference/5>
    pub async fn find_securities(&self, text: &str, columns: Option<&[String]>) -> Result<Table> {
        let url = self.url().ending(SECURITIES).build();

        let builder = QueryBuilder::new().question(text).only(SECURITIES);
        let query = match columns {
            Some(columns) => builder.columns(SECURITIES, columns),
            None => builder.columns(SECURITIES, &DEFAULT_SEARCH_COLUMNS),
        }
        .build();

        self.short_data(url, SECURITIES, query).await
    }

    /// Futures series, optionally for one base asset
    ///
    /// Engine and market default to `futures`/`forts` rather than the
    /// configured defaults.
    ///
    /// <https://iss.moex.com/iss/reference/151>
    pub async fn statistics_series(
        &self,
        asset_code: Option<&str>,
        show_expired: bool,
        segments: &Segments,
    ) -> Result<Table> {
        let url = self
            .url()
            .statistics()
            .engine(segments.engine.as_deref().unwrap_or(SERIES_ENGINE))
            .market(segments.market.as_deref().unwrap_or(SERIES_MARKET))
            .ending(SERIES)
            .build();

        let mut builder = QueryBuilder::new();
        if let Some(code) = asset_code.filter(|c| !c.is_empty()) {
            builder = builder.param("asset_code", code);
        }
        if show_expired {
            builder = builder.param("show_expired", 1_i64);
        }

        self.short_data(url, SERIES, builder.build()).await
    }
}
