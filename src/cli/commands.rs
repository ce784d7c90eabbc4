//! CLI commands and argument parsing

use crate::endpoints::{CandleInterval, Placeholder, SecuritiesTable, Segments};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// MOEX ISS command-line client
#[derive(Parser, Debug)]
#[command(name = "moex-iss")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the ISS base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Engine, market, and board overrides
#[derive(Args, Debug, Clone, Default)]
pub struct SegmentArgs {
    /// Trading engine (default from config)
    #[arg(long)]
    pub engine: Option<String>,

    /// Market (default from config)
    #[arg(long)]
    pub market: Option<String>,

    /// Board (default from config)
    #[arg(long)]
    pub board: Option<String>,
}

impl From<&SegmentArgs> for Segments {
    fn from(args: &SegmentArgs) -> Self {
        Segments {
            engine: args.engine.clone(),
            market: args.market.clone(),
            board: args.board.clone(),
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// HLOCV candles of a security
    Candles {
        /// Security ticker
        security: String,

        /// Candle size: 1m, 10m, 1h, 1d, 1w, 1mo, 1q or a wire code
        #[arg(short, long, default_value = "1d")]
        interval: CandleInterval,

        /// First date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last date (YYYY-MM-DD)
        #[arg(long)]
        till: Option<NaiveDate>,

        /// Columns to load (comma-separated, empty = all)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Query every main board of the market instead of one board
        #[arg(long)]
        all_boards: bool,

        #[command(flatten)]
        segments: SegmentArgs,
    },

    /// Date ranges available for candles of a security
    Borders {
        /// Security ticker
        security: String,

        /// Query every board of the market instead of one board
        #[arg(long)]
        all_boards: bool,

        #[command(flatten)]
        segments: SegmentArgs,
    },

    /// Daily trading history of a security
    History {
        /// Security ticker
        security: String,

        /// First date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last date (YYYY-MM-DD)
        #[arg(long)]
        till: Option<NaiveDate>,

        /// Columns to load (comma-separated, empty = all)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Query every board of the market instead of one board
        #[arg(long)]
        all_boards: bool,

        #[command(flatten)]
        segments: SegmentArgs,
    },

    /// Date range available in the history of a board
    Dates {
        #[command(flatten)]
        segments: SegmentArgs,
    },

    /// Securities of a board
    Securities {
        /// Table to return
        #[arg(long, default_value = "securities")]
        table: ListingTable,

        /// Columns to load (comma-separated, empty = all)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        #[command(flatten)]
        segments: SegmentArgs,
    },

    /// Find securities by code, name, ISIN, or registration number
    Find {
        /// Text to search for
        text: String,

        /// Columns to load (comma-separated, empty = all)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,
    },

    /// Valid values of a URL placeholder
    Reference {
        /// engines, markets, boards, boardgroups, durations, securitytypes,
        /// securitygroups, or securitycollections
        #[arg(default_value = "boards")]
        placeholder: Placeholder,
    },

    /// Futures series
    Series {
        /// Base asset code
        #[arg(long)]
        asset_code: Option<String>,

        /// Include series that no longer trade
        #[arg(long)]
        show_expired: bool,

        /// Engine (default futures)
        #[arg(long)]
        engine: Option<String>,

        /// Market (default forts)
        #[arg(long)]
        market: Option<String>,
    },

    /// Any ISS URL
    Raw {
        /// Absolute URL, or a path relative to the base URL
        url: String,

        /// Query parameter (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,

        /// Follow every page and merge the results
        #[arg(long)]
        all: bool,

        /// Print only this table
        #[arg(long)]
        table: Option<String>,
    },
}

/// Table of a board listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ListingTable {
    /// Directory of traded securities
    Securities,
    /// Results of today's trading
    Marketdata,
}

impl From<ListingTable> for SecuritiesTable {
    fn from(table: ListingTable) -> Self {
        match table {
            ListingTable::Securities => SecuritiesTable::Securities,
            ListingTable::Marketdata => SecuritiesTable::MarketData,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one row per line)
    Json,
    /// Indented JSON document
    Pretty,
}

/// Parse a `key=value` pair
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty parameter name in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
