//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the identifying user agent and timeout
//! - A single GET per URL, redirects followed by the client
//! - Error classification into [`FetchFailure`]
//!
//! There are no retries. A failed fetch is reported to the coordinator,
//! which abandons the URL and moves on.

use crate::config::Config;
use crate::url::force_https;
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;

/// Maximum number of redirect hops followed per request
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// The server answered with a body
    Success {
        /// Final URL after redirects, upgraded to https
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value (empty if absent)
        content_type: String,
        /// Page body content
        body: String,
    },

    /// The request did not produce a usable response
    Failure {
        /// What went wrong
        kind: FetchFailure,
        /// Error description
        detail: String,
    },
}

/// Classification of fetch failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    Timeout,
    Connect,
    Redirect,
    Body,
    Request,
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connection failed",
            Self::Redirect => "redirect error",
            Self::Body => "body read failed",
            Self::Request => "request failed",
        };
        f.write_str(name)
    }
}

/// Anything that can fetch a URL for the coordinator
///
/// [`HttpFetcher`] is the real implementation; tests drive the coordinator
/// with in-memory fetchers.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult>;
}

/// Fetches pages over HTTP with a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from the crawl configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(
            &config.user_agent.header,
            Duration::from_secs(config.crawler.request_timeout_secs),
        )?;
        Ok(Self::new(client))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Value of the `User-Agent` header sent with every request
/// * `timeout` - Total per-request timeout
///
/// # Example
///
/// ```no_run
/// use doccrawl::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client("doccrawl/0.1", Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET
///
/// # Behavior
///
/// | Condition | Result |
/// |-----------|--------|
/// | Any HTTP response | `Success` (status is reported, not judged) |
/// | Timeout | `Failure(Timeout)` |
/// | Connection refused / TLS error | `Failure(Connect)` |
/// | Redirect loop or chain > 10 | `Failure(Redirect)` |
/// | Body could not be read | `Failure(Body)` |
/// | Anything else | `Failure(Request)` |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    let final_url = force_https(response.url().as_str());

    if !status.is_success() {
        tracing::warn!("HTTP {} for {}", status.as_u16(), url);
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        },
        Err(e) => FetchResult::Failure {
            kind: FetchFailure::Body,
            detail: e.to_string(),
        },
    }
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    let kind = if e.is_timeout() {
        FetchFailure::Timeout
    } else if e.is_redirect() {
        FetchFailure::Redirect
    } else if e.is_connect() {
        FetchFailure::Connect
    } else {
        FetchFailure::Request
    };

    FetchResult::Failure {
        kind,
        detail: e.to_string(),
    }
}
