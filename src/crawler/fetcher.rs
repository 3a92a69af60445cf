//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests for page content
//! - Mapping transport and status failures onto `FetchError`

use crate::config::Config;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects, used as the base for relative links
    pub final_url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value (empty if absent)
    pub content_type: String,

    /// Page body content
    pub body: String,
}

/// Recoverable failures of a single fetch
///
/// The driver logs these and moves on to the next URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// Anything that can turn a URL into a page body
///
/// The coordinator only needs to tell success from failure; redirect
/// details stay inside the implementation.
pub trait Fetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use wiki_trawl::config::load_config;
/// use wiki_trawl::crawler::build_http_client;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.crawler.request_timeout_seconds);

    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed `Fetcher`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send {
        fetch_url(&self.client, url.clone())
    }
}

/// Fetches a URL with a single GET request
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Ok(FetchedPage)` |
/// | other status | `FetchError::Status` |
/// | timeout | `FetchError::Timeout` |
/// | connect/other transport error | `FetchError::Network` |
/// | body read failure | `FetchError::Body` |
pub async fn fetch_url(client: &Client, url: Url) -> Result<FetchedPage, FetchError> {
    let url_string = url.to_string();

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url_string.clone(),
            }
        } else if e.is_connect() {
            FetchError::Network {
                url: url_string.clone(),
                message: "Connection refused".to_string(),
            }
        } else {
            FetchError::Network {
                url: url_string.clone(),
                message: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url_string,
            status: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url_string.clone(),
            }
        } else {
            FetchError::Body {
                url: url_string.clone(),
                message: e.to_string(),
            }
        }
    })?;

    tracing::trace!("Fetched {} ({} bytes, {})", final_url, body.len(), content_type);

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}
