//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building HTTP clients with the configured identity and fixed headers
//! - GET requests with a per-client timeout
//! - Classifying failures so callers can decide whether they are fatal
//!
//! Nothing here retries: a failed fetch is reported once and the caller moves on.

use crate::config::HttpConfig;
use crate::WormError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Page body content
        body: String,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Transport failure (connection refused, DNS, timeout, body read error)
    NetworkError {
        /// The underlying client error; `is_timeout()` tells timeouts apart
        source: reqwest::Error,
    },
}

impl FetchResult {
    /// Converts the result into a strict `Result`, mapping every failure to an error
    ///
    /// Non-2xx responses become `Connectivity`, client timeouts `Timeout` and
    /// any other transport failure `Http` carrying the client error.
    pub fn into_body(self, url: &str) -> Result<String, WormError> {
        match self {
            Self::Success { body } => Ok(body),
            Self::HttpError { status_code } => Err(WormError::Connectivity {
                url: url.to_string(),
                status: status_code,
            }),
            Self::NetworkError { source } if source.is_timeout() => Err(WormError::Timeout {
                url: url.to_string(),
            }),
            Self::NetworkError { source } => Err(WormError::Http {
                url: url.to_string(),
                source,
            }),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP identity and fixed header set
/// * `timeout` - Total time allowed for each request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sci_worm::config::HttpConfig;
/// use sci_worm::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&HttpConfig::default(), Duration::from_secs(1)).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(header_map(config))
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Converts the configured header table into a `HeaderMap`
///
/// Entries that are not valid header names or values are skipped with a warning;
/// config validation rejects them before a client is normally built.
fn header_map(config: &HttpConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (name, value) in &config.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!("Skipping invalid header '{}'", name),
        }
    }

    headers
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Success` |
/// | Any other status | `HttpError` |
/// | Timeout, connection, DNS, TLS or body error | `NetworkError` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(source) => return FetchResult::NetworkError { source },
    };

    let status = response.status();
    if response.url().as_str() != url {
        tracing::trace!("{} redirected to {}", url, response.url());
    }

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success { body },
        Err(source) => FetchResult::NetworkError { source },
    }
}

/// Fetches a URL, treating every failure as an empty page
///
/// This is the crawler's view of the network: a failed fetch never stops the crawl.
pub async fn fetch_or_empty(client: &Client, url: &str) -> String {
    match fetch_url(client, url).await {
        FetchResult::Success { body } => body,
        FetchResult::HttpError { status_code } => {
            tracing::debug!("HTTP {} for {}, treating as empty", status_code, url);
            String::new()
        }
        FetchResult::NetworkError { source } => {
            tracing::debug!("Failed to fetch {}: {}, treating as empty", url, source);
            String::new()
        }
    }
}
