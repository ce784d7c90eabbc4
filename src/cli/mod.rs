//! CLI module
//!
//! Command-line interface over the named endpoints.
//!
//! # Commands
//!
//! - `candles` / `borders` - candles and their available date ranges
//! - `history` / `dates` - daily trading history and its date range
//! - `securities` / `find` - board listings and security search
//! - `reference` / `series` - placeholder values and futures series
//! - `raw` - any ISS URL, optionally following every page

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, SegmentArgs};
pub use runner::Runner;
