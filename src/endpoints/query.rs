//! Request query construction

use crate::pagination::CURSOR_TABLE;
use crate::types::{Query, QueryValue};
use chrono::NaiveDate;

/// Builds the endpoint-specific part of a query
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Start an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Search text (`q`)
    #[must_use]
    pub fn question(self, text: impl Into<String>) -> Self {
        let text: String = text.into();
        self.param("q", text)
    }

    /// Candle size code (`interval`)
    #[must_use]
    pub fn interval(self, interval: CandleInterval) -> Self {
        self.param("interval", interval.code())
    }

    /// First date to load (`from`)
    #[must_use]
    pub fn from_date(self, date: Option<NaiveDate>) -> Self {
        match date {
            Some(date) => self.param("from", date.format("%Y-%m-%d").to_string()),
            None => self,
        }
    }

    /// Last date to load (`till`)
    #[must_use]
    pub fn till_date(self, date: Option<NaiveDate>) -> Self {
        match date {
            Some(date) => self.param("till", date.format("%Y-%m-%d").to_string()),
            None => self,
        }
    }

    /// Restrict the response to `table` and the cursor table (`iss.only`)
    #[must_use]
    pub fn only(self, table: &str) -> Self {
        self.param("iss.only", format!("{table},{CURSOR_TABLE}"))
    }

    /// Restrict the columns of `table`; an empty list keeps all columns
    #[must_use]
    pub fn columns<S: AsRef<str>>(self, table: &str, columns: &[S]) -> Self {
        if columns.is_empty() {
            return self;
        }
        let joined = columns
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        self.param(&format!("{table}.columns"), joined)
    }

    /// Any other parameter
    #[must_use]
    pub fn param(mut self, key: &str, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key.to_string(), value.into());
        self
    }

    /// Finish the query
    pub fn build(self) -> Query {
        self.query
    }
}

/// Candle size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandleInterval {
    /// One minute
    Minute1,
    /// Ten minutes
    Minute10,
    /// One hour
    Hour,
    /// One day
    #[default]
    Day,
    /// One week
    Week,
    /// One month
    Month,
    /// One quarter
    Quarter,
}

impl CandleInterval {
    /// Wire code of the interval
    pub fn code(self) -> i64 {
        match self {
            CandleInterval::Minute1 => 1,
            CandleInterval::Minute10 => 10,
            CandleInterval::Hour => 60,
            CandleInterval::Day => 24,
            CandleInterval::Week => 7,
            CandleInterval::Month => 31,
            CandleInterval::Quarter => 4,
        }
    }

    /// Interval for a wire code
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(CandleInterval::Minute1),
            10 => Some(CandleInterval::Minute10),
            60 => Some(CandleInterval::Hour),
            24 => Some(CandleInterval::Day),
            7 => Some(CandleInterval::Week),
            31 => Some(CandleInterval::Month),
            4 => Some(CandleInterval::Quarter),
            _ => None,
        }
    }
}

impl std::str::FromStr for CandleInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let interval = match s {
            "1m" | "m1" => Some(CandleInterval::Minute1),
            "10m" | "m10" => Some(CandleInterval::Minute10),
            "1h" | "h" | "hour" => Some(CandleInterval::Hour),
            "1d" | "d" | "day" => Some(CandleInterval::Day),
            "1w" | "w" | "week" => Some(CandleInterval::Week),
            "1mo" | "month" => Some(CandleInterval::Month),
            "1q" | "q" | "quarter" => Some(CandleInterval::Quarter),
            other => other.parse().ok().and_then(Self::from_code),
        };
        interval.ok_or_else(|| format!("unknown candle interval '{s}'"))
    }
}
