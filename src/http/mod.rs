//! HTTP transport module
//!
//! Provides the transport seam used by the paginating client and its
//! reqwest-backed implementation.
//!
//! # Features
//!
//! - **Transport trait**: one GET with query parameters, returning status and body
//! - **Shared connection pool**: `HttpClient` wraps a cloneable `reqwest::Client`
//! - **Opt-in retries**: constant, linear, and exponential backoff (off by default)

mod client;
mod transport;

pub use client::{HttpClient, HttpClientConfig, RetryPolicy};
pub use transport::{Transport, TransportResponse};
