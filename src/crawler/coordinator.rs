//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Seeding the frontier
//! - Fetching, routing and storing each page
//! - Extracting links and feeding them back into the frontier
//! - Writing the discovered, edge and crawled logs
//! - Stopping on frontier exhaustion or when the discovery cap is reached
//!
//! The loop is strictly sequential: one fetch in flight, one parse at a time.

use crate::config::Config;
use crate::crawler::fetcher::{FetchResult, HttpFetcher, PageFetcher};
use crate::crawler::frontier::{Admission, Frontier};
use crate::crawler::parser::parse_page;
use crate::crawler::router::route;
use crate::output::{CrawlLog, CrawlSummary, Termination};
use crate::storage::{ContentStore, StorageLayout};
use crate::url::{normalize_url, Scope};
use crate::CrawlError;
use chrono::Utc;
use std::time::Instant;
use url::Url;

/// Pages between two progress log lines
const PROGRESS_INTERVAL: usize = 10;

/// Whether the loop keeps going after a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

#[derive(Debug, Default)]
struct Counters {
    fetched: usize,
    stored: usize,
    failed: usize,
    discarded: usize,
    edges: usize,
}

/// Main crawler coordinator structure
pub struct Coordinator<F: PageFetcher = HttpFetcher> {
    config: Config,
    fetcher: F,
    frontier: Frontier,
    store: ContentStore,
    log: CrawlLog,
    counters: Counters,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `seeds` - Seed URLs, in crawl order
    /// * `max_urls` - Discovery cap (size bound of the seen set)
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError)` - HTTP client or output files could not be set up
    pub fn new(config: Config, seeds: &[String], max_urls: usize) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::from_config(&config)?;
        Self::with_fetcher(config, seeds, max_urls, fetcher)
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator around any [`PageFetcher`]
    ///
    /// Seeds are admitted immediately; bucket directories and log files are
    /// created (logs truncated) before this returns.
    pub fn with_fetcher(
        config: Config,
        seeds: &[String],
        max_urls: usize,
        fetcher: F,
    ) -> Result<Self, CrawlError> {
        let scope = Scope::from_config(&config.crawler);
        tracing::info!(
            "Allowed roots ({:?} match): {:?}",
            scope.mode(),
            scope.roots()
        );

        let mut frontier = Frontier::new(scope, max_urls);
        for seed in seeds {
            frontier.enqueue_seed(seed);
        }
        tracing::info!(
            "Seeded frontier with {} of {} seed URLs",
            frontier.pending(),
            seeds.len()
        );

        let store = ContentStore::new(StorageLayout::from_config(&config.output));
        store.ensure_buckets()?;

        let log = CrawlLog::from_config(&config.output)?;

        Ok(Self {
            config,
            fetcher,
            frontier,
            store,
            log,
            counters: Counters::default(),
        })
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Runs the main crawl loop until the frontier empties or the cap is hit
    ///
    /// Per-page problems are logged and skipped; they never end the run.
    pub async fn run(&mut self) -> CrawlSummary {
        let started_at = Utc::now();
        let start_time = Instant::now();

        tracing::info!(
            "Starting crawl: {} URLs queued, cap {}",
            self.frontier.pending(),
            self.frontier.max_urls()
        );

        let termination = loop {
            let Some(url) = self.frontier.dequeue() else {
                tracing::info!("Frontier is empty, crawl complete");
                break Termination::FrontierExhausted;
            };

            let flow = self.process_url(&url).await;
            self.counters.fetched += 1;

            if self.counters.fetched % PROGRESS_INTERVAL == 0 {
                let elapsed = start_time.elapsed();
                tracing::info!(
                    "Progress: {} pages fetched, {} in frontier, {} discovered, {:.2} pages/sec",
                    self.counters.fetched,
                    self.frontier.pending(),
                    self.frontier.seen_count(),
                    self.counters.fetched as f64 / elapsed.as_secs_f64()
                );
            }

            // Seeds alone may fill the cap, so the seen set is checked even
            // when the page yielded no links
            if flow == Flow::Stop || self.frontier.is_full() {
                tracing::info!(
                    "Discovery cap of {} URLs reached, stopping",
                    self.frontier.max_urls()
                );
                break Termination::CapReached;
            }
        };

        self.log.flush();

        let summary = CrawlSummary {
            termination,
            started_at,
            elapsed: start_time.elapsed(),
            discovered: self.frontier.seen_count(),
            stored: self.counters.stored,
            failed: self.counters.failed,
            discarded: self.counters.discarded,
            edges: self.counters.edges,
            config_hash: None,
        };

        tracing::info!(
            "Crawl finished ({:?}): {} pages fetched, {} stored in {:?}",
            summary.termination,
            self.counters.fetched,
            summary.stored,
            summary.elapsed
        );

        summary
    }

    /// Fetches, routes and stores one URL, then follows its links if HTML
    async fn process_url(&mut self, url: &str) -> Flow {
        tracing::debug!("Processing URL: {}", url);

        let (final_url, content_type, body) = match self.fetcher.fetch(url).await {
            FetchResult::Success {
                final_url,
                status_code,
                content_type,
                body,
            } => {
                tracing::trace!("{} -> {} (HTTP {})", url, final_url, status_code);
                (final_url, content_type, body)
            }
            FetchResult::Failure { kind, detail } => {
                tracing::warn!("Failed to access {}: {} ({})", url, kind, detail);
                self.counters.failed += 1;
                return Flow::Continue;
            }
        };

        let page_url = match Url::parse(&final_url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Unusable final URL {} for {}: {}", final_url, url, e);
                self.counters.failed += 1;
                return Flow::Continue;
            }
        };

        let route = route(
            &final_url,
            &content_type,
            &self.config.crawler.special_extension,
        );

        let Some(bucket) = route.bucket() else {
            tracing::debug!(
                "Skipping {} with unsupported content type '{}'",
                final_url,
                content_type
            );
            self.counters.discarded += 1;
            return Flow::Continue;
        };

        match self.store.store(&page_url, bucket, &body) {
            Ok(path) => tracing::debug!("Saved {} to {}", final_url, path.display()),
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", final_url, e);
                self.counters.failed += 1;
                return Flow::Continue;
            }
        }

        self.log.record_crawled(&final_url);
        self.counters.stored += 1;

        if !route.should_parse() {
            return Flow::Continue;
        }

        self.follow_links(&page_url, &final_url, &body)
    }

    /// Handles the links of a stored HTML page
    ///
    /// Every canonical link is written to the edge log before the frontier
    /// sees it. Returns `Flow::Stop` the moment the seen set is full; the
    /// remaining anchors of the page are left unprocessed.
    fn follow_links(&mut self, page_url: &Url, source: &str, body: &str) -> Flow {
        let parsed = parse_page(body);
        tracing::debug!(
            "Parsed {} ({}): {} links",
            source,
            parsed.title.as_deref().unwrap_or("untitled"),
            parsed.hrefs.len()
        );

        for href in &parsed.hrefs {
            if self.frontier.is_full() {
                return Flow::Stop;
            }

            let discovered = match normalize_url(href, page_url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::trace!("Dropping link {:?} on {}: {}", href, source, e);
                    continue;
                }
            };

            self.log.record_edge(source, &discovered);
            self.counters.edges += 1;

            match self.frontier.record_discovery(&discovered) {
                Admission::Queued => {
                    self.log.record_discovered(&discovered);
                    if self.frontier.is_full() {
                        return Flow::Stop;
                    }
                }
                Admission::CapReached => return Flow::Stop,
                Admission::Duplicate | Admission::OutOfScope | Admission::Invalid => {
                    tracing::trace!("Not queueing {}", discovered);
                }
            }
        }

        Flow::Continue
    }
}

/// Runs a complete crawl over HTTP
///
/// # Example
///
/// ```no_run
/// use doccrawl::config::{load_seeds, Config};
/// use doccrawl::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let seeds = load_seeds(Path::new("seeds.txt"))?;
/// let summary = run_crawl(Config::default(), &seeds, 500).await?;
/// println!("{} URLs discovered", summary.discovered);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: Config,
    seeds: &[String],
    max_urls: usize,
) -> Result<CrawlSummary, CrawlError> {
    let mut coordinator = Coordinator::new(config, seeds, max_urls)?;
    Ok(coordinator.run().await)
}
