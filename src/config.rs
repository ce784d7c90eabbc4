//! Client configuration
//!
//! Configuration can be built in code or loaded from a YAML or JSON file.
//! Every field has a default, so an empty file is a valid configuration.
//!
//! ```yaml
//! base_url: https://iss.moex.com/iss
//! defaults:
//!   engine: stock
//!   market: shares
//!   board: TQBR
//! http:
//!   timeout_secs: 30
//!   max_retries: 2
//!   backoff: exponential
//! pagination:
//!   max_pages: 10000
//!   page_timeout_secs: 60
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RetryPolicy};
use crate::pagination::PaginationConfig;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Root of the ISS REST service
pub const DEFAULT_BASE_URL: &str = "https://iss.moex.com/iss";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssConfig {
    /// Root URL every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Engine, market, and board used when an endpoint call names none
    #[serde(default)]
    pub defaults: Defaults,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Pagination guards
    #[serde(default)]
    pub pagination: PaginationSettings,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for IssConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            defaults: Defaults::default(),
            http: HttpSettings::default(),
            pagination: PaginationSettings::default(),
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

/// Default trading segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Trading engine
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Market within the engine
    #[serde(default = "default_market")]
    pub market: String,

    /// Board (trading mode) within the market
    #[serde(default = "default_board")]
    pub board: String,
}

fn default_engine() -> String {
    "stock".to_string()
}

fn default_market() -> String {
    "shares".to_string()
}

fn default_board() -> String {
    "TQBR".to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            market: default_market(),
            board: default_board(),
        }
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Transport-level retries (0 disables them)
    #[serde(default)]
    pub max_retries: u32,

    /// Backoff strategy between retries
    #[serde(default)]
    pub backoff: BackoffType,

    /// First backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Backoff cap in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    60_000
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            max_retries: 0,
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

// ============================================================================
// Pagination Settings
// ============================================================================

/// Pagination guards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationSettings {
    /// Fail a request that needs more pages than this
    #[serde(default)]
    pub max_pages: Option<usize>,

    /// Stop cursor-less requests at the first page shorter than this
    #[serde(default)]
    pub page_size_hint: Option<u64>,

    /// Time limit for each page in seconds
    #[serde(default)]
    pub page_timeout_secs: Option<u64>,
}

// ============================================================================
// Loading and Conversion
// ============================================================================

impl IssConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Check that the configuration can produce valid requests
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        for (name, value) in [
            ("engine", &self.defaults.engine),
            ("market", &self.defaults.market),
            ("board", &self.defaults.board),
        ] {
            if value.trim().is_empty() {
                return Err(Error::config(format!("defaults.{name} must not be empty")));
            }
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::config("http.timeout_secs must be positive"));
        }
        if self.pagination.max_pages == Some(0) {
            return Err(Error::config("pagination.max_pages must be positive"));
        }

        Ok(())
    }

    /// Transport configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: Duration::from_secs(self.http.timeout_secs),
            user_agent: self
                .http
                .user_agent
                .clone()
                .unwrap_or_else(|| HttpClientConfig::default().user_agent),
            retry: RetryPolicy {
                max_retries: self.http.max_retries,
                backoff: self.http.backoff,
                initial_delay: Duration::from_millis(self.http.initial_backoff_ms),
                max_delay: Duration::from_millis(self.http.max_backoff_ms),
            },
        }
    }

    /// Pagination guards for the paginating client
    pub fn pagination_config(&self) -> PaginationConfig {
        PaginationConfig {
            max_pages: self.pagination.max_pages,
            page_size_hint: self.pagination.page_size_hint,
        }
    }

    /// Per-page time limit
    pub fn page_timeout(&self) -> Option<Duration> {
        self.pagination.page_timeout_secs.map(Duration::from_secs)
    }
}
