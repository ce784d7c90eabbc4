//! reqwest-backed transport
//!
//! [`HttpClient`] sends each GET once unless a [`RetryPolicy`] with
//! `max_retries > 0` is configured, in which case throttling (429), gateway
//! errors (5xx) and connect/timeout failures are retried with backoff.

use super::transport::{Transport, TransportResponse};
use crate::error::{is_retryable_status, Error, Result};
use crate::types::BackoffType;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// When and how long to wait before resending a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Resends after the first attempt; 0 disables retrying
    pub max_retries: u32,
    /// Growth of the delay between attempts
    pub backoff: BackoffType,
    /// Delay before the first resend
    pub initial_delay: Duration,
    /// Upper bound on any delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Never resend
    pub const fn disabled() -> Self {
        Self {
            max_retries: 0,
            backoff: BackoffType::Exponential,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(60),
        }
    }

    /// Delay before resend number `attempt + 1`
    pub fn delay(&self, attempt: u32) -> Duration {
        let delay = match self.backoff {
            BackoffType::Constant => self.initial_delay,
            BackoffType::Linear => self.initial_delay.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => self
                .initial_delay
                .saturating_mul(2u32.saturating_pow(attempt)),
        };
        delay.min(self.max_delay)
    }

    fn allows(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Settings of the underlying reqwest client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Time limit of a single attempt
    pub timeout: Duration,
    /// `User-Agent` header
    pub user_agent: String,
    /// Resend policy
    pub retry: RetryPolicy,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("moex-iss/{}", env!("CARGO_PKG_VERSION")),
            retry: RetryPolicy::disabled(),
        }
    }
}

/// HTTP client implementing [`Transport`]
///
/// Cloning is cheap and clones share one connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Client with default settings and no retries
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Client with custom settings
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Wrap an existing reqwest client, reusing its connection pool
    ///
    /// Only `config.retry` applies; timeout and user agent are the client's own.
    pub fn from_client(client: Client, config: HttpClientConfig) -> Self {
        Self { client, config }
    }

    /// Underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Settings in effect
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    async fn pause(&self, attempt: u32, url: &str, reason: &str) {
        let delay = self.config.retry.delay(attempt);
        warn!(
            %url,
            attempt = attempt + 1,
            max_retries = self.config.retry.max_retries,
            ?delay,
            "Retrying after {reason}"
        );
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<TransportResponse> {
        let retry = self.config.retry;
        let mut attempt = 0;

        loop {
            let mut builder = self.client.get(url);
            if !query.is_empty() {
                builder = builder.query(query);
            }
            let request = builder.build().map_err(|e| Error::connection(url, e))?;
            let full_url = request.url().to_string();

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status().as_u16();

                    if is_retryable_status(status) && retry.allows(attempt) {
                        self.pause(attempt, &full_url, &format!("HTTP {status}"))
                            .await;
                        attempt += 1;
                        continue;
                    }

                    let body = response
                        .text()
                        .await
                        .map_err(|e| Error::connection(&full_url, e))?;

                    debug!(url = %full_url, status, bytes = body.len(), "GET");
                    return Ok(TransportResponse::new(full_url, status, body));
                }
                Err(e) if (e.is_timeout() || e.is_connect()) && retry.allows(attempt) => {
                    self.pause(attempt, &full_url, &e.to_string()).await;
                    attempt += 1;
                }
                Err(e) => return Err(Error::connection(full_url, e)),
            }
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
