//! Error types for the ISS client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// Underlying cause of a transport failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for the ISS client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Connection error for {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("Request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    // ============================================================================
    // Protocol Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Incorrect data in history.cursor: {message}")]
    InvalidCursor { message: String },

    #[error("Pagination of {url} exceeded {max_pages} pages")]
    PageLimit { url: String, max_pages: usize },

    // ============================================================================
    // Data Errors
    // ============================================================================
    #[error("Table {table} is missing in the data")]
    MissingTable { table: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a connection error
    ///
    /// Accepts any error type (or a plain message) so that every
    /// [`Transport`](crate::http::Transport) can report unreachable servers.
    pub fn connection(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Connection {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a cursor integrity error
    pub fn invalid_cursor(message: impl Into<String>) -> Self {
        Self::InvalidCursor {
            message: message.into(),
        }
    }

    /// Create a missing table error
    pub fn missing_table(table: impl Into<String>) -> Self {
        Self::MissingTable {
            table: table.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The server could not be reached or did not answer in time
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection { .. } | Error::Timeout { .. })
    }

    /// The server answered with data that does not follow the ISS protocol
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Decode { .. } | Error::InvalidCursor { .. })
    }

    /// URL of the failed request, if the error carries one
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Connection { url, .. }
            | Error::Timeout { url, .. }
            | Error::HttpStatus { url, .. }
            | Error::PageLimit { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Check if this error is retryable by a wrapping collaborator
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Connection { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for the ISS client
pub type Result<T> = std::result::Result<T, Error>;
