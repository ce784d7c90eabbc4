//! Paginating ISS client
//!
//! # Overview
//!
//! [`IssClient`] owns one logical request (URL plus base query) and offers
//! three ways to run it:
//!
//! - [`IssClient::fetch`] - a single page starting at an optional offset
//! - [`IssClient::pages`] - a lazy stream of successive pages
//! - [`IssClient::collect_all`] - all pages merged table by table
//!
//! Pages are fetched strictly one after another because each offset depends
//! on the previous page. Independent clients can share one transport.

mod iss;
mod tables;

pub use iss::{IssClient, PageStream, EXTENDED_JSON_PARAMS};
pub use tables::{extract, merge_into, take_table};
