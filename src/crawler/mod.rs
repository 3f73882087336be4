//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The FIFO frontier with deduplication and the discovery cap
//! - HTTP fetching
//! - Content routing (store, parse, or discard)
//! - HTML parsing and link extraction
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod router;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_url, FetchFailure, FetchResult, HttpFetcher, PageFetcher};
pub use frontier::{Admission, Frontier};
pub use parser::{parse_page, ParsedPage};
pub use router::{is_html, route, Route};

use crate::config::Config;
use crate::output::CrawlSummary;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Seed the frontier and create the output files
/// 3. Fetch, store and parse pages breadth-first
/// 4. Stop when the frontier is empty or `max_urls` URLs have been discovered
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seeds` - Seed URLs, in crawl order
/// * `max_urls` - Discovery cap
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl ran to one of its two stopping points
/// * `Err(CrawlError)` - Crawl could not start
pub async fn crawl(
    config: Config,
    seeds: &[String],
    max_urls: usize,
) -> Result<CrawlSummary, CrawlError> {
    run_crawl(config, seeds, max_urls).await
}
