//! # MOEX ISS client
//!
//! An async client for the Moscow Exchange Informational & Statistical
//! Server (ISS), a paginated REST data service.
//!
//! ## Features
//!
//! - **Cursor-following pagination**: one logical request becomes as many
//!   sequential GETs as the server needs, driven by `history.cursor`
//! - **Lazy page stream** or **whole-result aggregation**
//! - **Named endpoints**: candles, daily history, board listings, reference data
//! - **Pluggable transport**: reqwest by default, any [`http::Transport`] in tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use moex_iss::{Iss, IssConfig, Segments, HistoryQuery, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let iss = Iss::from_config(IssConfig::default())?;
//!
//!     let history = iss
//!         .board_history("SBER", &HistoryQuery::default(), &Segments::new())
//!         .await?;
//!     println!("{} trading days", history.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  endpoints: Iss facade, UrlBuilder, QueryBuilder         │
//! └─────────────────────────────┬────────────────────────────┘
//!                               │ url + query
//! ┌─────────────────────────────┴────────────────────────────┐
//! │  client: IssClient  fetch / pages / collect_all / extract│
//! ├──────────────┬─────────────────────┬─────────────────────┤
//! │  pagination  │  decode             │  http               │
//! │  cursor      │  [meta, tables]     │  Transport trait    │
//! │  page step   │  envelope           │  reqwest client     │
//! └──────────────┴─────────────────────┴─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Data model and query types
pub mod types;

/// HTTP transport
pub mod http;

/// Response envelope decoding
pub mod decode;

/// Cursor interpretation and page stepping
pub mod pagination;

/// Paginating client
pub mod client;

/// Named endpoints and URL/query builders
pub mod endpoints;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{extract, IssClient, PageStream};
pub use config::IssConfig;
pub use endpoints::{CandleInterval, CandleQuery, HistoryQuery, Iss, Placeholder, Segments};
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
