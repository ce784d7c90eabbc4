//! Transport abstraction
//!
//! The paginating client talks to the network only through [`Transport`],
//! so tests and callers can substitute their own implementation.

use crate::error::Result;
use async_trait::async_trait;

/// Raw answer of one GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// Full request URL, query string included
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl TransportResponse {
    /// Create a response
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs GET requests on behalf of the ISS client
///
/// Implementations return `Ok` for every status code the server sends back
/// and fail with [`Error::Connection`](crate::Error::Connection) only when
/// no response was received.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one GET request with the given query parameters
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<TransportResponse>;
}
