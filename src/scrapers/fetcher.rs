//! Single-shot HTTP GET for listing pages.
//!
//! The fetcher performs exactly one request per call and never retries; the
//! pagination driver owns the retry policy.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Why a page could not be fetched.
#[derive(Debug)]
pub enum FetchError {
    /// The server answered with a non-success status.
    Status(StatusCode),
    /// The request did not complete within the configured timeout.
    Timeout,
    /// Connection, TLS or body decoding failure.
    Network(reqwest::Error),
}

impl FetchError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(err)
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Status(status) => write!(f, "unexpected status {status}"),
            FetchError::Timeout => write!(f, "request timed out"),
            FetchError::Network(err) => write!(f, "network error: {err}"),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FetchError::Network(err) => Some(err),
            _ => None,
        }
    }
}

/// Anything that can turn a page URL into its HTML body.
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`PageFetcher`] backed by a `reqwest` client with a fixed header set.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client that sends `user_agent` and an HTML `Accept` header on
    /// every request and gives up after `timeout`.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, Box<dyn Error>> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await.map_err(FetchError::from_reqwest)?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
