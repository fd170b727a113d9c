//! HTTP transport: a pooled client with per-call timeout and a narrow
//! fetch contract.
//!
//! The whole pipeline talks to the network through the [`Fetch`] trait, so
//! the scheduler and the source tasks can be exercised in tests with a stub
//! transport while production runs share one [`HttpTransport`] built around
//! a single pooled `reqwest::Client`.
//!
//! # Error taxonomy
//!
//! Every failure mode of one fetch is reduced to a [`FetchError`]:
//! - [`FetchError::InvalidUrl`]: the caller passed a malformed URL
//! - [`FetchError::Timeout`]: the round trip exceeded the configured timeout
//! - [`FetchError::Network`]: connection, DNS, or TLS failure
//! - [`FetchError::Status`]: the server answered with a non-2xx status
//!
//! All four are recoverable at the caller; a source task that hits one logs
//! it and contributes zero records for that run.

use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Error returned by a single fetch attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request URL was not a well-formed absolute URL.
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The request exceeded the configured per-call timeout.
    #[error("request timed out")]
    Timeout,
    /// Connection, DNS resolution, or TLS failure.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The server responded with a non-success status code.
    #[error("unexpected http status {code} from {url}")]
    Status { code: u16, url: String },
}

/// Async fetch contract: exactly one of payload or error per call.
///
/// Implemented by [`HttpTransport`] in production and by in-memory stubs in
/// tests.
pub trait Fetch {
    /// Fetch `url` and return the response body as text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Pooled HTTP transport shared by every source task in a run.
///
/// Wraps one `reqwest::Client` configured with the per-call timeout and a
/// connection-pool cap; each call consumes one pooled connection for its
/// duration and returns it on completion or error.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the given per-call timeout and pool size.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Bounds the total round trip of each fetch
    /// * `max_connections` - Cap on idle pooled connections per host
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the client cannot be built
    /// (e.g. no TLS backend available).
    pub fn new(timeout: Duration, max_connections: usize) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(max_connections)
            .user_agent(concat!("bookscout/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpTransport {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(classify_reqwest_error)?;
        debug!(bytes = body.len(), "Fetched payload");
        Ok(body)
    }
}

/// Map a `reqwest::Error` onto the [`FetchError`] taxonomy.
fn classify_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(e)
    }
}
