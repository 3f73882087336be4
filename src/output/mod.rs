//! Output module for crawl logs and run summaries
//!
//! This module handles:
//! - The discovered, edge and crawled logs written during a run
//! - The summary reported when the crawl stops

mod logs;
mod summary;

pub use logs::CrawlLog;
pub use summary::{print_summary, CrawlSummary, Termination};
